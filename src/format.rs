//! Grouping for display and its inverse.

use crate::charset::Charset;
use crate::config::FormatOptions;
use crate::error::{IdError, Result};

/// Normalizes `input` to the charset and joins fixed-size chunks with the separator.
///
/// For example `"1234567890123456"` with the defaults becomes `"1234-5678-9012-3456"`.
///
/// # Errors
///
/// Returns `FormatLengthMismatch` if the normalized input is not exactly
/// `groups * group_size` characters long.
pub fn format_id(input: &str, options: &FormatOptions) -> Result<String> {
    let normalized = options.charset.normalize(input);
    let expected = options.groups.saturating_mul(options.group_size);
    if normalized.len() != expected {
        return Err(IdError::FormatLengthMismatch {
            expected,
            actual: normalized.len(),
        });
    }
    if normalized.is_empty() {
        return Ok(normalized);
    }

    // Normalized output is ASCII, so byte chunks are character chunks.
    let chunks: Vec<&str> = normalized
        .as_bytes()
        .chunks(options.group_size)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    Ok(chunks.join(&options.separator))
}

/// Keeps only decimal digits.
pub fn normalize_id(input: &str) -> String {
    Charset::Numeric.normalize(input)
}

/// Keeps only members of `charset`, upper-casing first for alphanumeric.
pub fn normalize_id_for_charset(input: &str, charset: Charset) -> String {
    charset.normalize(input)
}
