/// Shared validation rule helpers
///
/// Prefix checks, password strength, phone shape and blood type rules used
/// by more than one entity, plus the collector that turns rule violations
/// into an aggregable field error list.

use crate::error::FieldError;

/// Schemes accepted for map links: plain web URLs or navigation apps
const MAP_URL_PREFIXES: [&str; 4] = ["http://", "https://", "yandexmaps://", "yandexnavi://"];

/// Prefixes accepted for image and cover URLs: web URLs or local media uploads
const IMAGE_URL_PREFIXES: [&str; 3] = ["http://", "https://", "/media/"];

/// The eight canonical ABO/Rh blood types
const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Accumulates field-level rule violations for one candidate record
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ok when no rule failed, otherwise the full violation list
    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub fn is_valid_map_url(url: &str) -> bool {
    MAP_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

/// Password strength: at least 6 characters and one digit
///
/// Returns the reason the password is unacceptable, or None when it passes.
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.chars().count() < 6 {
        return Some("password must be at least 6 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("password must contain at least one digit");
    }
    None
}

/// A phone number is acceptable when, stripped to digits and '+', it either
/// carries an international prefix or is 10-11 digits long
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    cleaned.starts_with('+') || matches!(cleaned.len(), 10 | 11)
}

/// Blood type must match one of the canonical values, case-insensitively
pub fn is_valid_blood_type(blood_type: &str) -> bool {
    BLOOD_TYPES
        .iter()
        .any(|v| v.eq_ignore_ascii_case(blood_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_url_accepts_web_and_navigation_schemes() {
        assert!(is_valid_map_url("https://maps.example.com/clinic"));
        assert!(is_valid_map_url("http://maps.example.com/clinic"));
        assert!(is_valid_map_url("yandexmaps://build_route?lat=55.7"));
        assert!(is_valid_map_url("yandexnavi://show_point"));
        assert!(!is_valid_map_url("ftp://maps.example.com"));
        assert!(!is_valid_map_url("maps.example.com"));
    }

    #[test]
    fn image_url_accepts_web_and_local_media() {
        assert!(is_valid_image_url("https://cdn.example.com/cat.jpg"));
        assert!(is_valid_image_url("/media/uploads/cat.jpg"));
        assert!(!is_valid_image_url("media/cat.jpg"));
        assert!(!is_valid_image_url("file:///tmp/cat.jpg"));
    }

    #[test]
    fn password_needs_length_and_digit() {
        assert_eq!(
            password_error("a1b2"),
            Some("password must be at least 6 characters long")
        );
        assert_eq!(
            password_error("abcdef"),
            Some("password must contain at least one digit")
        );
        assert_eq!(password_error("abc123"), None);
    }

    #[test]
    fn phone_accepts_international_or_local_lengths() {
        assert!(is_valid_phone("+7 (912) 345-67-89"));
        assert!(is_valid_phone("8 912 345 67 89")); // 11 digits
        assert!(is_valid_phone("9123456789")); // 10 digits
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn blood_type_is_case_insensitive() {
        assert!(is_valid_blood_type("AB+"));
        assert!(is_valid_blood_type("ab+"));
        assert!(is_valid_blood_type("o-"));
        assert!(!is_valid_blood_type("C+"));
        assert!(!is_valid_blood_type("AB"));
    }
}
