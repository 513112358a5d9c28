//! Per-keystroke sanitization of count fields.

use crate::{
    core::record::Count,
    errors::{Error, Result},
};

/// A sanitized field value and whether focus should move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitized {
    /// Value to store in the field
    pub count: Count,
    /// Set once the value reaches two digits
    pub advance: bool,
}

/// Sanitizes the full text of a count field after a keystroke.
///
/// Blank text yields [`Count::Empty`]. An optionally signed run of digits is clamped
/// into `0..=99`. Anything else is rejected and the field should keep its old value.
pub fn sanitize(raw: &str) -> Result<Sanitized> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(Sanitized {
            count: Count::Empty,
            advance: false,
        });
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput {
            input: raw.to_string(),
        });
    }

    let count = if negative {
        Count::Value(0)
    } else {
        let significant = digits.trim_start_matches('0');
        if significant.len() > 2 {
            Count::Value(Count::MAX)
        } else {
            // Nothing left means the input was all zeros
            Count::new(significant.parse::<u8>().unwrap_or(0))
        }
    };

    let advance = digits.len() >= 2 || count.value_or_zero() >= 10;
    Ok(Sanitized { count, advance })
}
