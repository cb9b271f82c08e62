//! Aadhar number validation
//!
//! Aadhar format: exactly 12 ASCII digits. Matches the DB columns'
//! uniqueness domains (one per entity type).

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Aadhar numbers are fixed-width
const AADHAR_LEN: usize = 12;

static AADHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("invalid aadhar regex"));

/// Validated Aadhar number (12 digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AadharNumber(String);

impl AadharNumber {
    /// Create a new Aadhar number, validating the digit format.
    ///
    /// # Example
    /// ```
    /// use registrar_server::models::AadharNumber;
    ///
    /// assert!(AadharNumber::new("123456789012").is_ok());
    /// assert!(AadharNumber::new("12345").is_err());      // too short
    /// assert!(AadharNumber::new("12345678901a").is_err()); // non-digit
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "aadharNumber",
            });
        }

        if s.len() > AADHAR_LEN {
            return Err(ValidationError::TooLong {
                field: "aadharNumber",
                max: AADHAR_LEN,
            });
        }

        if !AADHAR_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "aadharNumber",
                reason: "must be exactly 12 digits",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AadharNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_numbers() {
        assert!(AadharNumber::new("123456789012").is_ok());
        assert!(AadharNumber::new("000000000000").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = AadharNumber::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_short() {
        let err = AadharNumber::new("12345678901").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_long() {
        let err = AadharNumber::new("1234567890123").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 12, .. }));
    }

    #[test]
    fn rejects_non_digits() {
        let err = AadharNumber::new("12345678901x").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));

        let err = AadharNumber::new("1234 5678 90").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }
}
