//! Form field validators.
//!
//! Each rule comes as a predicate (`validate_*`) and a message generator
//! (`*_error`) that re-runs the predicate and returns a fixed message when it
//! fails. `FormValidator` folds a set of field checks into a `FormValidation`.

use super::email::is_valid_email;
use super::phone::{get_phone_metadata, validate_phone_number};
use super::time::{is_valid_time_format, BusinessHours};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MIN_PARTY_SIZE: u32 = 1;
pub const DEFAULT_MAX_PARTY_SIZE: u32 = 20;
pub const MAX_TABLE_NUMBER: u32 = 999;
pub const MAX_TABLE_CAPACITY: u32 = 20;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}' .-]{2,50}$").expect("valid name regex"));

static PRICE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("valid price regex"));

/// Result of a single validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Empty when valid.
    pub error_message: String,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: message.into(),
        }
    }
}

impl From<Option<String>> for ValidationOutcome {
    fn from(error: Option<String>) -> Self {
        match error {
            Some(message) => Self::invalid(message),
            None => Self::valid(),
        }
    }
}

fn error_unless(passed: bool, message: &str) -> Option<String> {
    (!passed).then(|| message.to_string())
}

fn parse_whole_number(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn required_error(value: &str, label: &str) -> Option<String> {
    (!validate_required(value)).then(|| format!("{} is required", label))
}

pub fn validate_email(value: &str) -> bool {
    is_valid_email(value.trim())
}

pub fn email_error(value: &str) -> Option<String> {
    error_unless(validate_email(value), "Please enter a valid email address")
}

/// Letters, spaces, apostrophes, hyphens and periods; 2 to 50 characters.
pub fn validate_name(value: &str) -> bool {
    let trimmed = value.trim();
    NAME_CHARS.is_match(trimmed) && trimmed.chars().any(char::is_alphabetic)
}

pub fn name_error(value: &str) -> Option<String> {
    error_unless(
        validate_name(value),
        "Name must be 2-50 characters and contain only letters, spaces, hyphens and apostrophes",
    )
}

/// `YYYY-MM-DD` on or after `today`.
pub fn validate_future_date_from(date: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed >= today,
        Err(_) => false,
    }
}

/// `YYYY-MM-DD` on or after the local date.
pub fn validate_future_date(date: &str) -> bool {
    validate_future_date_from(date, today())
}

pub fn future_date_error(date: &str, today: NaiveDate) -> Option<String> {
    error_unless(
        validate_future_date_from(date, today),
        "Please select today or a future date",
    )
}

/// Local calendar date, i.e. "now" normalised to midnight.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn validate_party_size(value: &str, min: u32, max: u32) -> bool {
    parse_whole_number(value).is_some_and(|size| size >= min && size <= max)
}

pub fn party_size_error(value: &str, min: u32, max: u32) -> Option<String> {
    (!validate_party_size(value, min, max))
        .then(|| format!("Party size must be between {} and {} guests", min, max))
}

pub fn validate_table_number(value: &str) -> bool {
    parse_whole_number(value).is_some_and(|n| (1..=MAX_TABLE_NUMBER).contains(&n))
}

pub fn table_number_error(value: &str) -> Option<String> {
    (!validate_table_number(value))
        .then(|| format!("Table number must be between 1 and {}", MAX_TABLE_NUMBER))
}

pub fn validate_capacity(value: &str) -> bool {
    parse_whole_number(value).is_some_and(|n| (1..=MAX_TABLE_CAPACITY).contains(&n))
}

pub fn capacity_error(value: &str) -> Option<String> {
    (!validate_capacity(value))
        .then(|| format!("Capacity must be between 1 and {} seats", MAX_TABLE_CAPACITY))
}

pub fn validate_description(value: &str) -> bool {
    value.trim().chars().count() >= MIN_DESCRIPTION_LENGTH
}

pub fn description_error(value: &str) -> Option<String> {
    (!validate_description(value)).then(|| {
        format!(
            "Description must be at least {} characters",
            MIN_DESCRIPTION_LENGTH
        )
    })
}

pub fn validate_category(value: &str) -> bool {
    validate_required(value)
}

pub fn category_error(value: &str) -> Option<String> {
    error_unless(validate_category(value), "Please select a category")
}

/// Parse a price such as `"12.5"` into cents. Zero and malformed input are `None`.
pub fn parse_price_cents(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if !PRICE_SHAPE.is_match(trimmed) {
        return None;
    }
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let whole: u32 = whole.parse().ok()?;
    let fraction: u32 = format!("{:0<2}", fraction).parse().ok()?;
    let cents = whole.checked_mul(100)?.checked_add(fraction)?;
    (cents > 0).then_some(cents)
}

pub fn validate_price(value: &str) -> bool {
    parse_price_cents(value).is_some()
}

pub fn price_error(value: &str) -> Option<String> {
    error_unless(
        validate_price(value),
        "Price must be a positive amount with at most two decimals",
    )
}

/// Canonical time format and inside business hours.
pub fn validate_time(value: &str, hours: BusinessHours) -> bool {
    is_valid_time_format(value) && hours.contains(value)
}

pub fn time_error(value: &str, hours: BusinessHours) -> Option<String> {
    if !is_valid_time_format(value) {
        return Some("Please enter a time as HH:MM".to_string());
    }
    (!hours.contains(value)).then(|| {
        format!(
            "Time must be between {:02}:00 and {:02}:00",
            hours.open_hour, hours.close_hour
        )
    })
}

pub fn validate_phone(value: &str, country_code: &str) -> bool {
    validate_phone_number(value, country_code)
}

pub fn phone_error(value: &str, country_code: &str) -> Option<String> {
    (!validate_phone(value, country_code)).then(|| {
        let profile = get_phone_metadata(country_code);
        format!(
            "Phone number must have {} digits (e.g. {})",
            profile.digit_count, profile.example
        )
    })
}

/// A failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Aggregated result of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidation {
    pub is_valid: bool,
    /// At most one error per field, in check order.
    pub errors: Vec<FieldError>,
}

impl FormValidation {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Collects field checks into a `FormValidation`.
///
/// # Example
///
/// ```
/// use restaurant_desk::domain::validation::{email_error, required_error, FormValidator};
///
/// let mut form = FormValidator::new();
/// form.check("name", required_error("", "Name"))
///     .check("email", email_error("guest@example.com"));
/// let result = form.finish();
/// assert!(!result.is_valid);
/// assert_eq!(result.error_for("name"), Some("Name is required"));
/// ```
#[derive(Debug, Default)]
pub struct FormValidator {
    errors: Vec<FieldError>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` against `field` unless the field already failed.
    pub fn check(&mut self, field: &str, error: Option<String>) -> &mut Self {
        if let Some(message) = error {
            if !self.errors.iter().any(|e| e.field == field) {
                self.errors.push(FieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        self
    }

    /// Record `message` against `field` when `passed` is false.
    pub fn rule(&mut self, field: &str, passed: bool, message: &str) -> &mut Self {
        self.check(field, error_unless(passed, message))
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn finish(self) -> FormValidation {
        FormValidation {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
        }
    }
}
