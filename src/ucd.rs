//! Reader for the emoji sequence data files published with
//! [UTS #51](https://www.unicode.org/reports/tr51/#Data_Files):
//! `emoji-sequences.txt` and `emoji-zwj-sequences.txt`.
//!
//! Each data line has the form
//!
//! ```text
//! code_point(s) ; type_field ; description # comments
//! ```
//!
//! where `code_point(s)` is either a single code point, a range `A..B`
//! standing for each of the single code points in it, or a space-separated
//! sequence. The `type_field` is the name of the property of strings.

use std::collections::BTreeMap;

use crate::{CodePointSequence, DataError, StringPropertySource, UnicodeVersion};

/// Property-of-strings data accumulated from one or more UTS #51 data files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiSequenceData {
    version: Option<UnicodeVersion>,
    properties: BTreeMap<String, Vec<CodePointSequence>>,
}

impl EmojiSequenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single data file.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let mut data = Self::new();
        data.add_file(text)?;
        Ok(data)
    }

    /// Adds the contents of another data file.
    ///
    /// All files must declare the same `# Version:` if they declare one at all.
    pub fn add_file(&mut self, text: &str) -> Result<(), DataError> {
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;

            if let Some(found) = parse_version_header(raw, line)? {
                match self.version {
                    Some(expected) if expected != found => {
                        return Err(DataError::VersionMismatch { expected, found });
                    }
                    _ => self.version = Some(found),
                }
                continue;
            }

            let content = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            if content.trim().is_empty() {
                continue;
            }

            let mut fields = content.split(';').map(str::trim);
            let (Some(code_points), Some(name)) = (fields.next(), fields.next()) else {
                return Err(syntax(line, "expected `code_points ; type_field`"));
            };
            if name.is_empty() {
                return Err(syntax(line, "missing type field"));
            }

            let entry = self.properties.entry(name.to_string()).or_default();
            parse_code_points(code_points, line, entry)?;
        }
        Ok(())
    }

    /// The version declared by the data files, if any of them declared one.
    pub fn version(&self) -> Option<UnicodeVersion> {
        self.version
    }

    /// The sequences listed for `name`, in file order.
    pub fn sequences(&self, name: &str) -> Option<&[CodePointSequence]> {
        self.properties.get(name).map(Vec::as_slice)
    }
}

impl StringPropertySource for EmojiSequenceData {
    fn load_string_property_data(
        &self,
        version: UnicodeVersion,
    ) -> Result<BTreeMap<String, Vec<CodePointSequence>>, DataError> {
        if let Some(found) = self.version {
            if found != version {
                return Err(DataError::VersionMismatch {
                    expected: version,
                    found,
                });
            }
        } else {
            log::warn!("emoji data does not declare a version; assuming Unicode {version}");
        }
        Ok(self.properties.clone())
    }
}

fn syntax(line: usize, msg: impl Into<String>) -> DataError {
    DataError::Syntax {
        line,
        msg: msg.into(),
    }
}

fn parse_version_header(raw: &str, line: usize) -> Result<Option<UnicodeVersion>, DataError> {
    let Some(rest) = raw.strip_prefix('#') else {
        return Ok(None);
    };
    let Some(value) = rest.trim_start().strip_prefix("Version:") else {
        return Ok(None);
    };
    let value = value.trim();
    let mut parts = value.split('.');
    let major = parts.next().and_then(|p| p.parse().ok());
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok());
    match (major, minor) {
        (Some(major), Some(minor)) => Ok(Some(UnicodeVersion::new(major, minor))),
        _ => Err(syntax(line, format!("invalid version `{value}`"))),
    }
}

fn parse_hex(s: &str, line: usize) -> Result<u32, DataError> {
    u32::from_str_radix(s, 16).map_err(|_| syntax(line, format!("invalid code point `{s}`")))
}

fn parse_code_points(
    field: &str,
    line: usize,
    out: &mut Vec<CodePointSequence>,
) -> Result<(), DataError> {
    if let Some((start, end)) = field.split_once("..") {
        let start = parse_hex(start.trim(), line)?;
        let end = parse_hex(end.trim(), line)?;
        if start > end {
            return Err(syntax(line, format!("empty range {start:04X}..{end:04X}")));
        }
        for cp in start..=end {
            out.push(CodePointSequence::from_code_points(&[cp])?);
        }
        return Ok(());
    }

    let code_points = field
        .split_whitespace()
        .map(|s| parse_hex(s, line))
        .collect::<Result<Vec<_>, _>>()?;
    out.push(CodePointSequence::from_code_points(&code_points)?);
    Ok(())
}

#[cfg(test)]
mod tests;
