//! Brand parameter sanitization
//!
//! Free-text brand names arrive straight from the request path and end up in
//! a store query. This module normalizes them first: anything that is not a
//! word character (`[A-Za-z0-9_]`), whitespace, or a hyphen is stripped, so
//! pattern metacharacters never reach the store.
//!
//! "Whitespace" here is the ECMAScript set: Unicode `White_Space` plus the
//! byte order mark U+FEFF, minus U+0085 (next line).
//!
//! # Example
//!
//! ```
//! use motorpool_shared::sanitize::{validate_brand, BrandError};
//!
//! assert_eq!(validate_brand(Some("Toyota!!")).unwrap(), "Toyota");
//! assert_eq!(validate_brand(Some("   ")), Err(BrandError::Required));
//! assert_eq!(validate_brand(Some("!!!")), Err(BrandError::InvalidAfterSanitization));
//! ```

/// Reasons a brand parameter is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BrandError {
    /// Absent, empty, or whitespace-only input
    #[error("Brand parameter is required and must be a non-empty string.")]
    Required,

    /// Nothing left once disallowed characters were stripped
    #[error("Invalid brand parameter after sanitization.")]
    InvalidAfterSanitization,
}

/// Validates and sanitizes a brand parameter
///
/// # Returns
///
/// The sanitized brand, trimmed, containing only word characters,
/// whitespace, and hyphens.
///
/// # Errors
///
/// - [`BrandError::Required`] if the input is absent or blank
/// - [`BrandError::InvalidAfterSanitization`] if stripping leaves nothing
pub fn validate_brand(input: Option<&str>) -> Result<String, BrandError> {
    let raw = match input {
        Some(raw) if !raw.trim_matches(is_space).is_empty() => raw,
        _ => return Err(BrandError::Required),
    };

    let stripped: String = raw.chars().filter(|c| is_allowed(*c)).collect();
    let sanitized = stripped.trim_matches(is_space);

    if sanitized.is_empty() {
        return Err(BrandError::InvalidAfterSanitization);
    }

    Ok(sanitized.to_string())
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_space(c)
}

fn is_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_required() {
        assert_eq!(validate_brand(None), Err(BrandError::Required));
        assert_eq!(validate_brand(Some("")), Err(BrandError::Required));
        assert_eq!(validate_brand(Some("   ")), Err(BrandError::Required));
        assert_eq!(validate_brand(Some("\t\n")), Err(BrandError::Required));
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        assert_eq!(validate_brand(Some("\u{FEFF}")), Err(BrandError::Required));
        assert_eq!(validate_brand(Some(" \u{FEFF} ")), Err(BrandError::Required));
        assert_eq!(validate_brand(Some("\u{FEFF}Honda\u{FEFF}")).unwrap(), "Honda");
        assert_eq!(
            validate_brand(Some("Land\u{FEFF}Rover")).unwrap(),
            "Land\u{FEFF}Rover"
        );
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert_eq!(
            validate_brand(Some("\u{85}")),
            Err(BrandError::InvalidAfterSanitization)
        );
        assert_eq!(validate_brand(Some("Ford\u{85}")).unwrap(), "Ford");
    }

    #[test]
    fn test_fully_stripped_input_is_invalid() {
        assert_eq!(
            validate_brand(Some("!!!")),
            Err(BrandError::InvalidAfterSanitization)
        );
        assert_eq!(
            validate_brand(Some("$$$")),
            Err(BrandError::InvalidAfterSanitization)
        );
        assert_eq!(
            validate_brand(Some(" .* ")),
            Err(BrandError::InvalidAfterSanitization)
        );
    }

    #[test]
    fn test_strips_disallowed_characters() {
        assert_eq!(validate_brand(Some("Toyota!!")).unwrap(), "Toyota");
        assert_eq!(validate_brand(Some("^Honda$")).unwrap(), "Honda");
        assert_eq!(validate_brand(Some("(a|b).*")).unwrap(), "ab");
    }

    #[test]
    fn test_trims_after_stripping() {
        assert_eq!(validate_brand(Some("  Ford ! ")).unwrap(), "Ford");
        assert_eq!(validate_brand(Some("!Mini Cooper?")).unwrap(), "Mini Cooper");
    }

    #[test]
    fn test_clean_input_is_unchanged() {
        for brand in ["Toyota", "Mercedes-Benz", "Land Rover", "BMW_M3", "Rolls - Royce 2"] {
            let sanitized = validate_brand(Some(brand)).unwrap();
            assert_eq!(sanitized, brand);
            assert_eq!(validate_brand(Some(&sanitized)).unwrap(), sanitized);
        }
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        assert_eq!(validate_brand(Some("Citroën")).unwrap(), "Citron");
    }

    #[test]
    fn test_error_messages() {
        assert!(BrandError::Required.to_string().contains("required"));
        assert!(BrandError::InvalidAfterSanitization
            .to_string()
            .contains("Invalid"));
    }
}
