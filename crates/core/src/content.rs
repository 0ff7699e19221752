//! Content validation helpers.

use crate::error::CoreError;

/// Maximum accepted length of a language code (`de`, `en-US`, ...).
pub const MAX_LANGUAGE_LEN: usize = 11;

/// Whether an optional text field counts as empty content.
pub fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}

/// Validate a BCP-47-ish language code: a two- or three-letter primary
/// subtag, optionally followed by hyphen-separated alphanumeric subtags.
/// There is no cross-language fallback anywhere in the engine, so a typo
/// here would silently author content nobody can resolve -- reject early.
pub fn validate_language(code: &str) -> Result<(), CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid language code '{code}'. Expected e.g. 'de', 'en' or 'en-US'"
        ))
    };

    if code.is_empty() || code.len() > MAX_LANGUAGE_LEN {
        return Err(invalid());
    }

    let mut subtags = code.split('-');
    let primary = subtags.next().ok_or_else(invalid)?;
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(invalid());
    }
    for subtag in subtags {
        if subtag.is_empty() || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
    }
    Ok(())
}
