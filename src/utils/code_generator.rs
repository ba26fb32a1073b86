//! Short code generation and validation utilities.

use rand::Rng;
use serde_json::json;

use crate::error::AppError;

/// Alphabet for generated codes: digits plus upper- and lowercase letters.
pub const CODE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes.
///
/// 62^3 is roughly 238k possible codes, so collision checking before every
/// insert is mandatory rather than advisory.
pub const CODE_LENGTH: usize = 3;

/// Longest accepted custom code.
const MAX_CUSTOM_CODE_LENGTH: usize = 32;

/// Codes reserved for sibling routes of `GET /{code}`.
const RESERVED_CODES: &[&str] = &["api", "health", "qr", "static", "dashboard"];

/// Generates a random short code.
///
/// Draws uniformly from [`CODE_ALPHABET`] using the thread RNG, so codes are
/// not trivially enumerable even at this short length.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 3);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Syntactic gate for codes arriving on the redirect path.
///
/// Accepts anything this service could have stored: generated codes and
/// custom codes (ASCII alphanumerics and hyphens, bounded length).
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CUSTOM_CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot shadow a reserved system route
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CODE_LENGTH || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 3-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code.to_ascii_lowercase().as_str()) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_fixed_length() {
        for _ in 0..100 {
            assert_eq!(generate_code().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_generate_code_stays_in_alphabet() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_code_collision_rate_matches_uniform_draw() {
        // 10k draws over ~238k possible codes: the birthday bound puts the
        // expected number of distinct codes near 9795. Accept a generous band
        // around it; a biased generator would fall far outside.
        let mut codes = HashSet::new();
        for _ in 0..10_000 {
            codes.insert(generate_code());
        }
        assert!(
            codes.len() > 9_600 && codes.len() <= 10_000,
            "distinct codes: {}",
            codes.len()
        );
    }

    #[test]
    fn test_generate_code_spreads_over_alphabet() {
        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            for b in generate_code().bytes() {
                seen.insert(b);
            }
        }
        // With 15k symbol draws, every alphabet symbol should appear.
        assert_eq!(seen.len(), CODE_ALPHABET.len());
    }

    #[test]
    fn test_well_formed_accepts_generated_codes() {
        for _ in 0..100 {
            assert!(is_well_formed_code(&generate_code()));
        }
    }

    #[test]
    fn test_well_formed_accepts_custom_codes() {
        assert!(is_well_formed_code("my-link"));
        assert!(is_well_formed_code("Promo2025"));
    }

    #[test]
    fn test_well_formed_rejects_empty_and_oversized() {
        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code(&"a".repeat(33)));
    }

    #[test]
    fn test_well_formed_rejects_special_characters() {
        assert!(!is_well_formed_code("ab@cd"));
        assert!(!is_well_formed_code("a b"));
        assert!(!is_well_formed_code("a/b"));
    }

    #[test]
    fn test_validate_accepts_mixed_case_and_hyphens() {
        assert!(validate_custom_code("My-Link-2025").is_ok());
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("123").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let err = validate_custom_code("ab").unwrap_err();
        assert!(err.to_string().contains("3-32"));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_custom_code(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_custom_code("my_code").is_err());
        assert!(validate_custom_code("my code").is_err());
    }

    #[test]
    fn test_validate_leading_or_trailing_hyphen() {
        assert!(validate_custom_code("-code").is_err());
        assert!(validate_custom_code("code-").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "reserved code '{}' should be invalid",
                reserved
            );
        }
        // Case-insensitive.
        assert!(validate_custom_code("API").is_err());
    }
}
