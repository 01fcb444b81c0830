//! Per-country phone metadata, formatting and validation.
//!
//! Country codes arrive from forms as composite keys such as `"+1-US"`; the
//! two-letter tag after the hyphen selects a profile. Unknown tags fall back to
//! the US profile so a form never fails on lookup.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Display and validation rules for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneCountryProfile {
    /// Two-letter country tag, e.g. `"FR"`.
    pub country: &'static str,
    /// International dialing prefix, e.g. `"+33"`.
    pub dial_code: &'static str,
    /// Number of significant digits.
    pub digit_count: usize,
    /// Display pattern; each `X` is one digit.
    pub format_pattern: &'static str,
    pub example: &'static str,
    pub placeholder: &'static str,
}

impl PhoneCountryProfile {
    /// Composite key used by forms, e.g. `"+33-FR"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.dial_code, self.country)
    }
}

const fn profile(
    country: &'static str,
    dial_code: &'static str,
    digit_count: usize,
    format_pattern: &'static str,
    example: &'static str,
    placeholder: &'static str,
) -> PhoneCountryProfile {
    PhoneCountryProfile {
        country,
        dial_code,
        digit_count,
        format_pattern,
        example,
        placeholder,
    }
}

/// Supported countries. The first entry is the fallback profile.
pub const PHONE_PROFILES: &[PhoneCountryProfile] = &[
    profile("US", "+1", 10, "XXX-XXX-XXXX", "555-123-4567", "Enter 10 digits"),
    profile("CA", "+1", 10, "XXX-XXX-XXXX", "416-555-0199", "Enter 10 digits"),
    profile("GB", "+44", 10, "XXXX XXX XXX", "7700 900 123", "Enter 10 digits"),
    profile("FR", "+33", 9, "X XX XX XX XX", "6 12 34 56 78", "Enter 9 digits"),
    profile("DE", "+49", 11, "XXX XXXXXXXX", "151 23456789", "Enter 11 digits"),
    profile("ES", "+34", 9, "XXX XXX XXX", "612 345 678", "Enter 9 digits"),
    profile("IT", "+39", 10, "XXX XXX XXXX", "312 345 6789", "Enter 10 digits"),
    profile("IN", "+91", 10, "XXXXX XXXXX", "98765 43210", "Enter 10 digits"),
    profile("AU", "+61", 9, "XXX XXX XXX", "412 345 678", "Enter 9 digits"),
    profile("JP", "+81", 10, "XX-XXXX-XXXX", "90-1234-5678", "Enter 10 digits"),
    profile("MX", "+52", 10, "XX XXXX XXXX", "55 1234 5678", "Enter 10 digits"),
    profile("BR", "+55", 11, "(XX) XXXXX-XXXX", "(11) 91234-5678", "Enter 11 digits"),
    profile("CN", "+86", 11, "XXX XXXX XXXX", "139 1234 5678", "Enter 11 digits"),
];

const fn count_placeholders(pattern: &str) -> usize {
    let bytes = pattern.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'X' {
            count += 1;
        }
        i += 1;
    }
    count
}

const fn profiles_consistent(profiles: &[PhoneCountryProfile]) -> bool {
    let mut i = 0;
    while i < profiles.len() {
        if count_placeholders(profiles[i].format_pattern) != profiles[i].digit_count {
            return false;
        }
        i += 1;
    }
    !profiles.is_empty()
}

// Every pattern must have one `X` per digit.
const _: () = assert!(profiles_consistent(PHONE_PROFILES));

/// Result of resolving a country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhoneLookup {
    pub profile: &'static PhoneCountryProfile,
    /// True when the tag was unknown and the default profile was substituted.
    pub used_fallback: bool,
}

fn default_profile() -> &'static PhoneCountryProfile {
    &PHONE_PROFILES[0]
}

fn country_tag(country_code: &str) -> &str {
    match country_code.rsplit_once('-') {
        Some((_, tag)) => tag.trim(),
        None => country_code.trim(),
    }
}

/// Resolve a composite country code (`"+33-FR"`) or bare tag (`"FR"`).
pub fn lookup_phone_metadata(country_code: &str) -> PhoneLookup {
    let tag = country_tag(country_code);
    match PHONE_PROFILES
        .iter()
        .find(|p| p.country.eq_ignore_ascii_case(tag))
    {
        Some(profile) => PhoneLookup {
            profile,
            used_fallback: false,
        },
        None => {
            tracing::warn!(
                country_code,
                fallback = default_profile().country,
                "Unknown phone country code, using fallback profile"
            );
            PhoneLookup {
                profile: default_profile(),
                used_fallback: true,
            }
        }
    }
}

/// Profile for a country code, defaulting to US on unknown tags.
pub fn get_phone_metadata(country_code: &str) -> &'static PhoneCountryProfile {
    lookup_phone_metadata(country_code).profile
}

fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format raw input according to the country's pattern.
///
/// Non-digits are stripped and extra digits dropped. Formatting stops when the
/// digits run out, so partial input yields a partial string.
pub fn format_phone_number(value: &str, country_code: &str) -> String {
    let profile = get_phone_metadata(country_code);
    let digits = digits_of(value);
    let mut digits = digits.chars().take(profile.digit_count).peekable();

    let mut formatted = String::with_capacity(profile.format_pattern.len());
    for slot in profile.format_pattern.chars() {
        if digits.peek().is_none() {
            break;
        }
        if slot == 'X' {
            if let Some(digit) = digits.next() {
                formatted.push(digit);
            }
        } else {
            formatted.push(slot);
        }
    }
    formatted
}

/// True iff `phone` has exactly the country's digit count. Length check only.
pub fn validate_phone_number(phone: &str, country_code: &str) -> bool {
    digits_of(phone).len() == get_phone_metadata(country_code).digit_count
}

/// Maximum length of the formatted string, separators included.
pub fn get_phone_max_length(country_code: &str) -> usize {
    get_phone_metadata(country_code).format_pattern.chars().count()
}

/// A phone number validated against its country profile.
///
/// Stores the canonical formatted form.
///
/// # Example
///
/// ```
/// use restaurant_desk::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("(555) 123 4567", "+1-US").unwrap();
/// assert_eq!(phone.as_str(), "555-123-4567");
/// assert_eq!(phone.international(), "+1 555-123-4567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    formatted: String,
    profile: &'static PhoneCountryProfile,
}

impl PhoneNumber {
    /// Create a new PhoneNumber for the given country code.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the digit count does not match
    /// the country profile.
    pub fn new(phone: &str, country_code: &str) -> Result<Self, ValidationError> {
        let profile = get_phone_metadata(country_code);
        if !validate_phone_number(phone, country_code) {
            return Err(ValidationError::InvalidPhone {
                phone: phone.to_string(),
                country_code: country_code.to_string(),
                expected_digits: profile.digit_count,
            });
        }

        Ok(Self {
            formatted: format_phone_number(phone, country_code),
            profile,
        })
    }

    /// The formatted national number.
    pub fn as_str(&self) -> &str {
        &self.formatted
    }

    pub fn into_inner(self) -> String {
        self.formatted
    }

    pub fn profile(&self) -> &'static PhoneCountryProfile {
        self.profile
    }

    /// Number prefixed with the dialing code.
    pub fn international(&self) -> String {
        format!("{} {}", self.profile.dial_code, self.formatted)
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        digits_of(&self.formatted)
    }
}

// Serde support - serialize as the formatted string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.formatted.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted)
    }
}

/// Listing entry for a supported country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneCountrySummary {
    pub key: String,
    pub country: String,
    pub dial_code: String,
    pub digit_count: usize,
    pub format_pattern: String,
    pub max_length: usize,
    pub example: String,
    pub placeholder: String,
}

impl From<&PhoneCountryProfile> for PhoneCountrySummary {
    fn from(profile: &PhoneCountryProfile) -> Self {
        Self {
            key: profile.key(),
            country: profile.country.to_string(),
            dial_code: profile.dial_code.to_string(),
            digit_count: profile.digit_count,
            format_pattern: profile.format_pattern.to_string(),
            max_length: profile.format_pattern.chars().count(),
            example: profile.example.to_string(),
            placeholder: profile.placeholder.to_string(),
        }
    }
}
