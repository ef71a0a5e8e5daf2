use crate::{EnclosingContext, PropertyError, PropertyReference};

/// Checks whether a reference that names a property of strings appears in a
/// context where such a property can be used.
///
/// A character class always matches exactly one character, but a property of
/// strings can match a run of several code points. Allowing one inside a
/// class would silently change how many characters the class consumes, so
/// that is rejected instead of given a meaning. Negation is rejected for the
/// same reason, including placement in a negated class, which negates its
/// contents. Patterns that need either behavior can be written with an
/// alternation (`\p{RGI_Emoji}|[a-z]`) or a negative lookahead
/// (`(?!\p{RGI_Emoji})`).
///
/// The resolver only calls this after the table lookup has identified the
/// name as a property of strings. Ordinary code point properties may be used
/// anywhere.
pub fn validate(reference: &PropertyReference) -> Result<(), PropertyError> {
    let name = || reference.name.clone();
    let span = reference.span.clone();

    let result = match reference.context {
        _ if reference.negated => Err(PropertyError::NegationNotSupported { name: name(), span }),
        EnclosingContext::CharacterClass { negated: true } => {
            Err(PropertyError::NegationNotSupported { name: name(), span })
        }
        EnclosingContext::CharacterClass { negated: false } => {
            Err(PropertyError::NotAllowedInCharacterClass { name: name(), span })
        }
        EnclosingContext::TopLevel => Ok(()),
    };

    if let Err(err) = &result {
        log::debug!("rejected property escape: {err}");
    }
    result
}
