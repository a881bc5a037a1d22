//! Input constraints for accounts, posts, comments and profiles.
//!
//! The `validate_*` functions returning [`ValidationError`] are meant to be
//! plugged into `#[validate(custom(function = ...))]` on request DTOs; the
//! ones returning [`CoreError`] are called directly by domain operations.

use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const USERNAME_MIN_LENGTH: u64 = 3;
pub const USERNAME_MAX_LENGTH: u64 = 30;

/// Minimum password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Login identifiers (email or username) shorter than this are rejected.
pub const IDENTIFIER_MIN_LENGTH: u64 = 3;

pub const POST_CONTENT_MAX_LENGTH: u64 = 280;

pub const COMMENT_MIN_LENGTH: usize = 1;
pub const COMMENT_MAX_LENGTH: usize = 200;

pub const BIO_MAX_LENGTH: u64 = 160;

// ---------------------------------------------------------------------------
// Enumerated values
// ---------------------------------------------------------------------------

pub const POST_CATEGORIES: &[&str] = &["general", "announcement", "question"];
pub const DEFAULT_POST_CATEGORY: &str = "general";

pub const PROFILE_VISIBILITIES: &[&str] = &["public", "private", "followers_only"];
pub const DEFAULT_PROFILE_VISIBILITY: &str = "public";

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern is valid"));

// ---------------------------------------------------------------------------
// Field validators (validator crate hooks)
// ---------------------------------------------------------------------------

/// Usernames are ASCII letters, digits and underscores only.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("may only contain letters, digits and underscores".into()))
    }
}

pub fn validate_post_category(category: &str) -> Result<(), ValidationError> {
    if POST_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(ValidationError::new("category")
            .with_message("must be one of: general, announcement, question".into()))
    }
}

pub fn validate_profile_visibility(visibility: &str) -> Result<(), ValidationError> {
    if PROFILE_VISIBILITIES.contains(&visibility) {
        Ok(())
    } else {
        Err(ValidationError::new("profile_visibility")
            .with_message("must be one of: public, private, followers_only".into()))
    }
}

// ---------------------------------------------------------------------------
// Domain validators
// ---------------------------------------------------------------------------

/// Comment bodies must be between 1 and 200 characters.
pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    let len = content.chars().count();
    if !(COMMENT_MIN_LENGTH..=COMMENT_MAX_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "content must be between {COMMENT_MIN_LENGTH} and {COMMENT_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Flatten `validator` output into a single, stable, human-readable message.
///
/// Fields are listed alphabetically so the message does not depend on hash
/// map iteration order.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reason = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("invalid ({})", e.code),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field}: {reason}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_accepts_word_characters() {
        assert!(validate_username("alice_01").is_ok());
    }

    #[test]
    fn username_rejects_punctuation() {
        assert!(validate_username("alice.b").is_err());
        assert!(validate_username("bob smith").is_err());
    }

    #[test]
    fn category_must_be_known() {
        assert!(validate_post_category("question").is_ok());
        assert!(validate_post_category("rant").is_err());
    }

    #[test]
    fn visibility_must_be_known() {
        assert!(validate_profile_visibility("followers_only").is_ok());
        assert!(validate_profile_visibility("friends").is_err());
    }

    #[test]
    fn comment_length_bounds() {
        assert!(validate_comment_content("").is_err());
        assert!(validate_comment_content("hi").is_ok());
        assert!(validate_comment_content(&"a".repeat(200)).is_ok());
        assert!(validate_comment_content(&"a".repeat(201)).is_err());
    }

    #[test]
    fn comment_length_counts_characters_not_bytes() {
        // 200 two-byte characters is still within bounds.
        assert!(validate_comment_content(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn describe_errors_is_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("username", ValidationError::new("length"));
        errors.add(
            "email",
            ValidationError::new("email").with_message("must be a valid email".into()),
        );
        assert_eq!(
            describe_errors(&errors),
            "email: must be a valid email; username: invalid (length)"
        );
    }
}
