//! Scheduling and form-validation core.
//!
//! Pure, synchronous helpers used by the reservation, order and menu services:
//! time-of-day conversion, prep-start suggestions, per-country phone formatting
//! and form field validators. Nothing here performs I/O, and invalid input is
//! reported through return values rather than errors.

pub mod email;
pub mod errors;
pub mod phone;
pub mod prep;
pub mod time;
pub mod validation;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::{
    format_phone_number, get_phone_max_length, get_phone_metadata, lookup_phone_metadata,
    validate_phone_number, PhoneCountryProfile, PhoneCountrySummary, PhoneLookup, PhoneNumber,
    PHONE_PROFILES,
};
pub use prep::{compute_suggested_prep_start, PrepFeasibility, PrepPolicy};
pub use time::{
    format_minutes_to_time, is_valid_time_format, is_within_business_hours,
    parse_time_to_minutes, BusinessHours, TimeOfDay,
};
pub use validation::{FieldError, FormValidation, FormValidator, ValidationOutcome};
