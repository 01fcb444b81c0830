//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided time is not a valid `H:MM` / `HH:MM` time of day.
    InvalidTime(String),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number does not match the country profile.
    InvalidPhone {
        phone: String,
        country_code: String,
        expected_digits: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime(time) => write!(f, "Invalid time of day: {}", time),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone {
                phone,
                country_code,
                expected_digits,
            } => write!(
                f,
                "Invalid phone number for {}: {} (expected {} digits)",
                country_code, phone, expected_digits
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
