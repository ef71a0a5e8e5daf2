use super::*;
use crate::test_data::{EMOJI_SEQUENCES, EMOJI_ZWJ_SEQUENCES};
use crate::{SequencePropertyTable, StringProperty};

use pretty_assertions::assert_eq;

fn debug_all(seqs: &[CodePointSequence]) -> Vec<String> {
    seqs.iter().map(|s| format!("{s:?}")).collect()
}

#[test]
fn parses_ranges_and_sequences() {
    let data = EmojiSequenceData::parse(EMOJI_SEQUENCES).unwrap();
    assert_eq!(data.version(), Some(UnicodeVersion::new(15, 1)));
    assert_eq!(
        debug_all(data.sequences("Basic_Emoji").unwrap()),
        &[
            "[231A]",
            "[231B]",
            "[1F466]",
            "[1F467]",
            "[1F468]",
            "[1F469]",
            "[1F44D]",
            "[1F3F4]",
            "[00A9 FE0F]",
            "[2764 FE0F]",
        ],
    );
    assert_eq!(data.sequences("Emoji_Keycap_Sequence").unwrap().len(), 12);
    assert_eq!(
        debug_all(data.sequences("RGI_Emoji_Tag_Sequence").unwrap()),
        &["[1F3F4 E0067 E0062 E0065 E006E E0067 E007F]"],
    );
    assert_eq!(data.sequences("RGI_Emoji_ZWJ_Sequence"), None);
}

#[test]
fn accumulates_multiple_files() {
    let mut data = EmojiSequenceData::parse(EMOJI_SEQUENCES).unwrap();
    data.add_file(EMOJI_ZWJ_SEQUENCES).unwrap();
    assert_eq!(data.sequences("RGI_Emoji_ZWJ_Sequence").unwrap().len(), 3);

    let table = SequencePropertyTable::load(&data, UnicodeVersion::PINNED).unwrap();
    assert_eq!(table.properties().count(), StringProperty::ALL.len());
    assert_eq!(table.get(StringProperty::RgiEmoji).unwrap().len(), 31);
}

#[test]
fn version_must_match() {
    let data = EmojiSequenceData::parse("# Version: 14.0\n231A ; Basic_Emoji ; watch\n").unwrap();
    assert_eq!(
        SequencePropertyTable::load(&data, UnicodeVersion::PINNED).unwrap_err(),
        DataError::VersionMismatch {
            expected: UnicodeVersion::PINNED,
            found: UnicodeVersion::new(14, 0),
        },
    );

    let mut data = EmojiSequenceData::parse("# Version: 15.1\n").unwrap();
    assert_eq!(
        data.add_file("# Version: 15.0\n").unwrap_err(),
        DataError::VersionMismatch {
            expected: UnicodeVersion::new(15, 1),
            found: UnicodeVersion::new(15, 0),
        },
    );
}

#[test]
fn reports_line_numbers() {
    let text = "# Version: 15.1\n\n231A ; Basic_Emoji\n23G0 ; Basic_Emoji\n";
    assert_eq!(
        EmojiSequenceData::parse(text).unwrap_err(),
        DataError::Syntax {
            line: 4,
            msg: "invalid code point `23G0`".into(),
        },
    );
    assert_eq!(
        EmojiSequenceData::parse("231B..231A ; Basic_Emoji\n").unwrap_err(),
        DataError::Syntax {
            line: 1,
            msg: "empty range 231B..231A".into(),
        },
    );
    assert_eq!(
        EmojiSequenceData::parse("231A\n").unwrap_err(),
        DataError::Syntax {
            line: 1,
            msg: "expected `code_points ; type_field`".into(),
        },
    );
    assert_eq!(
        EmojiSequenceData::parse("D800 ; Basic_Emoji\n").unwrap_err(),
        DataError::InvalidCodePoint(0xD800),
    );
}

#[test]
fn duplicates_fail_at_table_build() {
    let data = EmojiSequenceData::parse("231A ; Basic_Emoji\n231A..231B ; Basic_Emoji\n").unwrap();
    assert_eq!(
        SequencePropertyTable::load(&data, UnicodeVersion::PINNED).unwrap_err(),
        DataError::DuplicateSequence {
            name: "Basic_Emoji".into(),
            sequence: "[231A]".into(),
        },
    );
}

#[test]
fn unsupported_names_fail_at_table_build() {
    let data = EmojiSequenceData::parse("1F1FA 1F1F8 ; Emoji_Flag_Sequence\n").unwrap();
    assert_eq!(
        SequencePropertyTable::load(&data, UnicodeVersion::PINNED).unwrap_err(),
        DataError::UnsupportedProperty {
            name: "Emoji_Flag_Sequence".into()
        },
    );
}
