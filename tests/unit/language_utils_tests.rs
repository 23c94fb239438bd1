/*!
 * Tests for language utilities
 */

use ytgrab::language_utils::{get_language_name, key_matches_language, validate_language_code};

#[test]
fn test_validate_language_code_withIsoCodes_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("fr").is_ok());
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code(" EN ").is_ok());
}

#[test]
fn test_validate_language_code_withUnknownCodes_shouldReject() {
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_get_language_name_withValidCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_key_matches_language_withVariants_shouldMatchByContainment() {
    assert!(key_matches_language("en", "en"));
    assert!(key_matches_language("en-US", "en"));
    assert!(key_matches_language("en-orig", "en"));
    assert!(key_matches_language("EN-us", "en"));
    assert!(!key_matches_language("fr", "en"));
    assert!(!key_matches_language("fr", ""));
}
