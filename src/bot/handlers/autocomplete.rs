//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests count field identifiers (e.g. `classAttendance-SC-girls`) as the user types,
//! so fields can be picked without remembering the naming scheme.

use crate::{bot::BotData, core::fields::FIELD_ORDER, errors::Error};

/// Provides autocomplete suggestions for count field identifiers.
///
/// Matches case-insensitively anywhere in the identifier and keeps the form's entry
/// order, so the suggestions read top to bottom like the form itself.
///
/// # Arguments
/// * `_ctx` - The poise context (unused, but required by poise signature)
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_field_name(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_fields(partial)
}

/// Field identifiers containing `partial`, in entry order.
#[must_use]
pub fn matching_fields(partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();

    FIELD_ORDER
        .iter()
        .map(ToString::to_string)
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(25) // Discord autocomplete limit
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_partial_lists_all_fields_in_order() {
        let all = matching_fields("");
        assert_eq!(all.len(), 16);
        assert_eq!(all[0], "classAttendance-SC-girls");
        assert_eq!(all[15], "mdmAttendance-OTHER-boys");
    }

    #[test]
    fn test_partial_is_case_insensitive() {
        let matches = matching_fields("MDMattendance-sebc");
        assert_eq!(
            matches,
            vec!["mdmAttendance-SEBC-girls", "mdmAttendance-SEBC-boys"]
        );
    }

    #[test]
    fn test_gender_filter() {
        let matches = matching_fields("boys");
        assert_eq!(matches.len(), 8);
        assert!(matches.iter().all(|m| m.ends_with("-boys")));
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(matching_fields("teachers").is_empty());
    }
}
