//! Field validation for the parameter review form
//!
//! Holds the current form values together with one error message per field.
//! Invalid input never produces an `Err`; it only shows up in [`FieldErrors`].
//!
//! Note: [`FormValidation::validate_form`] checks a fixed set of donor fields
//! (`REQUIRED_FIELDS`) while the rendered form is built from whatever keys the
//! extraction step returned. The two sets can diverge; `Quantity`/`Weight`
//! are checked on edit but never by the whole-form pass.

use crate::form::FormData;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use indexmap::IndexMap;
use regex::Regex;

/// Field name → error message. An empty message or a missing entry means valid.
pub type FieldErrors = IndexMap<String, String>;

pub const EMAIL_ERROR: &str = "Please enter a valid email address.";
pub const PHONE_ERROR: &str = "Phone number must be exactly 10 digits.";
pub const QUANTITY_ERROR: &str = "Quantity of blood must be a positive integer.";
pub const WEIGHT_ERROR: &str = "Weight of donor must be a positive integer.";
pub const DOB_REQUIRED_ERROR: &str = "Date of Birth is required.";
pub const DOB_INVALID_ERROR: &str = "Date of Birth is not a valid date.";
pub const UNDERAGE_ERROR: &str = "Donor must be at least 18 years old.";

/// Minimum donor age accepted by the whole-form pass
pub const MINIMUM_AGE: i32 = 18;

/// Fields checked by `validate_form`, in display order
pub const REQUIRED_FIELDS: &[&str] = &[
    "Name",
    "DOB",
    "Email",
    "Phone",
    "Gender",
    "BloodGroupName",
    "Address",
];

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Quantity/Weight rule: numeric, strictly positive, and no leading "0"
/// in the raw text (so "0.5" and "01" are both rejected).
pub fn is_positive_amount(value: &str) -> bool {
    if value.is_empty() || value.starts_with('0') {
        return false;
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => n.is_finite() && n > 0.0,
        Err(_) => false,
    }
}

/// Parse a date of birth as returned by extraction or typed by the user.
pub fn parse_dob(dob: &str) -> Option<NaiveDate> {
    let dob = dob.trim();
    if let Ok(date) = NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(dob) {
        return Some(dt.date_naive());
    }
    ["%m/%d/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(dob, fmt).ok())
}

/// Whole calendar years between `dob` and `today`.
///
/// One year is subtracted while `today` has not yet reached the birthday in
/// the current year; this is not an elapsed-days division.
pub fn calculate_age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Age in years as of the local date, or `None` if `dob` cannot be parsed.
pub fn calculate_age(dob: &str) -> Option<i32> {
    calculate_age_on_str(dob, Local::now().date_naive())
}

fn calculate_age_on_str(dob: &str, today: NaiveDate) -> Option<i32> {
    parse_dob(dob).map(|d| calculate_age_on(d, today))
}

/// Message for a single field, or `None` if the value passes.
pub fn field_error(field: &str, value: &str) -> Option<String> {
    let message = match field {
        "Email" if !is_valid_email(value) => EMAIL_ERROR.to_string(),
        "Phone" if !is_valid_phone(value) => PHONE_ERROR.to_string(),
        "Quantity" if !is_positive_amount(value) => QUANTITY_ERROR.to_string(),
        "Weight" if !is_positive_amount(value) => WEIGHT_ERROR.to_string(),
        "Email" | "Phone" | "Quantity" | "Weight" => return None,
        _ if value.is_empty() => format!("{} is required.", field),
        _ => return None,
    };
    Some(message)
}

/// Form values plus per-field errors, updated on every edit.
#[derive(Debug, Clone, Default)]
pub struct FormValidation {
    data: FormData,
    errors: FieldErrors,
}

impl FormValidation {
    pub fn new(initial: FormData) -> Self {
        Self {
            data: initial,
            errors: FieldErrors::new(),
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Current message for `field`, `None` when valid.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|m| !m.is_empty())
    }

    /// Replace all values and clear every error.
    pub fn reset(&mut self, data: FormData) {
        self.data = data;
        self.errors.clear();
    }

    pub fn set_field_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Store an edited value, then re-validate that field only.
    pub fn on_field_change(&mut self, field: &str, value: &str) {
        self.data.insert(field, value);
        self.errors.entry(field.to_string()).or_default();
        self.validate_field(field, value);
    }

    /// Apply the rule for `field`; returns whether it is now valid.
    pub fn validate_field(&mut self, field: &str, value: &str) -> bool {
        let message = field_error(field, value);
        let valid = message.is_none();
        self.set_field_error(field, message.unwrap_or_default());
        valid
    }

    /// Re-check the fixed donor field set against today's date.
    pub fn validate_form(&mut self) -> bool {
        self.validate_form_on(Local::now().date_naive())
    }

    /// Whole-form pass with an explicit reference date. Replaces the entire
    /// error map; returns `true` when no field failed.
    pub fn validate_form_on(&mut self, today: NaiveDate) -> bool {
        let mut errors = FieldErrors::new();
        let data = &self.data;

        if data.value("Name").is_empty() {
            errors.insert("Name".into(), "Name is required.".into());
        }

        let dob = data.value("DOB");
        if dob.is_empty() {
            errors.insert("DOB".into(), DOB_REQUIRED_ERROR.into());
        } else {
            match calculate_age_on_str(dob, today) {
                Some(age) if age < MINIMUM_AGE => {
                    errors.insert("DOB".into(), UNDERAGE_ERROR.into());
                }
                Some(_) => {}
                None => {
                    errors.insert("DOB".into(), DOB_INVALID_ERROR.into());
                }
            }
        }

        if !is_valid_email(data.value("Email")) {
            errors.insert("Email".into(), EMAIL_ERROR.into());
        }
        if !is_valid_phone(data.value("Phone")) {
            errors.insert("Phone".into(), PHONE_ERROR.into());
        }
        if data.value("Gender").is_empty() {
            errors.insert("Gender".into(), "Gender is required.".into());
        }
        if data.value("BloodGroupName").is_empty() {
            errors.insert("BloodGroupName".into(), "Blood Group is required.".into());
        }
        if data.value("Address").trim().is_empty() {
            errors.insert("Address".into(), "Address is required.".into());
        }

        self.errors = errors;
        self.errors.is_empty()
    }
}
