//! Field-level form validators.
//!
//! Every validator returns an empty string when the value is acceptable and a
//! human-readable message otherwise. They never fail or panic, so a form can
//! run all of them and collect the non-empty results.

use std::collections::BTreeMap;

use chrono::{Local, Months, NaiveDate};

/// Shortest accepted name, in characters after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Longest accepted name, in characters after trimming.
pub const NAME_MAX_CHARS: usize = 50;
/// Longest accepted free-text description.
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// Number of digits in a domestic mobile number.
pub const PHONE_DIGITS: usize = 10;
/// How far ahead a booking may be placed.
pub const BOOKING_WINDOW_MONTHS: u32 = 3;
/// Minimum length of a new admin password.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Date format produced by HTML date inputs and expected by the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_name(name: &str) -> String {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return "Name is required".into();
    }
    if len < NAME_MIN_CHARS {
        return "Name must be at least 2 characters long".into();
    }
    if len > NAME_MAX_CHARS {
        return "Name must be less than 50 characters".into();
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return "Name can only contain letters and spaces".into();
    }
    String::new()
}

/// Validate an Indian mobile number.
///
/// Punctuation and spaces are ignored. A `+91` country code or a leading
/// trunk `0` is accepted in front of the ten subscriber digits.
pub fn validate_phone(phone: &str) -> String {
    if phone.trim().is_empty() {
        return "Phone number is required".into();
    }

    let digits = subscriber_digits(phone);
    if digits.len() != PHONE_DIGITS {
        return "Please enter a valid 10-digit phone number".into();
    }
    if !matches!(digits.as_bytes().first(), Some(b'6'..=b'9')) {
        return "Phone number must start with 6, 7, 8, or 9".into();
    }
    String::new()
}

/// Digits of a phone number with any country or trunk prefix removed.
fn subscriber_digits(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        12 if digits.starts_with("91") => digits[2..].to_string(),
        11 if digits.starts_with('0') => digits[1..].to_string(),
        _ => digits,
    }
}

pub fn validate_description(description: &str, required: bool) -> String {
    let trimmed = description.trim();
    if required && trimmed.is_empty() {
        return "Description is required".into();
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_CHARS {
        return "Description must be less than 500 characters".into();
    }
    String::new()
}

/// Validate a booking date against the local calendar day.
pub fn validate_date(date: &str) -> String {
    validate_date_on(date, Local::now().date_naive())
}

/// Validate a booking date (`YYYY-MM-DD`) against an explicit `today`.
///
/// The accepted window is `today ..= today + 3 months`, both ends inclusive.
pub fn validate_date_on(date: &str, today: NaiveDate) -> String {
    let date = date.trim();
    if date.is_empty() {
        return "Date is required".into();
    }
    let Ok(selected) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
        return "Please enter a valid date".into();
    };
    if selected < today {
        return "Please select a future date".into();
    }
    let latest = today
        .checked_add_months(Months::new(BOOKING_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MAX);
    if selected > latest {
        return "Please select a date within the next 3 months".into();
    }
    String::new()
}

/// Format a phone number as `XXX-XXX-XXXX` for display.
///
/// Anything that is not exactly ten digits is returned as bare digits.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == PHONE_DIGITS {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        digits
    }
}

/// Validate the admin change-password form.
///
/// Returns a map of field name to message; an empty map means the form can be
/// submitted.
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> BTreeMap<&'static str, String> {
    let mut errors = BTreeMap::new();

    if current.is_empty() {
        errors.insert("currentPassword", "Current password is required".into());
    }

    if new.is_empty() {
        errors.insert("newPassword", "New password is required".into());
    } else if new.chars().count() < PASSWORD_MIN_CHARS {
        errors.insert(
            "newPassword",
            "New password must be at least 6 characters long".into(),
        );
    }

    if confirm.is_empty() {
        errors.insert("confirmPassword", "Please confirm your new password".into());
    } else if new != confirm {
        errors.insert("confirmPassword", "Passwords do not match".into());
    }

    if !current.is_empty() && !new.is_empty() && current == new {
        errors.insert(
            "newPassword",
            "New password must be different from current password".into(),
        );
    }

    errors
}
