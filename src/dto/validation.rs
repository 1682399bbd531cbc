//! Validation helpers for DTOs.

use std::borrow::Cow;

use validator::ValidationError;

/// Longest accepted league, team, field or referee name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Validates that a display name is neither blank nor oversized.
pub fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("blank_name");
        err.message = Some("name must not be blank".into());
        return Err(err);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_length");
        err.message = Some(Cow::Owned(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
        return Err(err);
    }

    Ok(())
}

/// Validates every entry of a roster pool (teams, fields or referees).
///
/// Sizes are not checked here: an empty pool is legal to store and only fails once a
/// schedule is generated from it.
pub fn validate_name_list(names: &[String]) -> Result<(), ValidationError> {
    for (index, name) in names.iter().enumerate() {
        if let Err(mut err) = validate_not_blank(name) {
            err.add_param(Cow::Borrowed("index"), &index);
            return Err(err);
        }
    }
    Ok(())
}
