//! Caller-side validation shared by every create and update path.
//!
//! The store accepts anything that type-checks; these checks run before a
//! value is sent to the backend, so the store only ever sees accepted data.

use crate::entities::EventType;
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Time of day a deadline is due when the user gives only a date.
pub const DEADLINE_TIME: (u32, u32) = (23, 59);

/// Trims `value` and rejects it if nothing is left.
pub fn required_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank input becomes `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Amount that must be finite and zero or more.
pub fn non_negative_amount(field: &'static str, amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::validation(field, format!("{amount} cannot be negative")));
    }
    Ok(amount)
}

/// Amount that must be finite and strictly positive.
pub fn positive_amount(field: &'static str, amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation(
            field,
            format!("{amount} must be greater than 0"),
        ));
    }
    Ok(amount)
}

/// Loose email check: anything with an `@` passes.
pub fn email(value: Option<&str>) -> Result<()> {
    match value {
        Some(address) if !address.contains('@') => Err(Error::validation(
            "email",
            format!("'{address}' is not a valid email address"),
        )),
        _ => Ok(()),
    }
}

/// Plus-ones cannot be negative.
pub fn plus_ones(count: i32) -> Result<()> {
    if count < 0 {
        return Err(Error::validation("plus_ones", "cannot be negative"));
    }
    Ok(())
}

/// Table numbers start at 1.
pub fn table_number(table: Option<i32>) -> Result<()> {
    match table {
        Some(n) if n < 1 => Err(Error::validation(
            "table_number",
            "must be a positive number",
        )),
        _ => Ok(()),
    }
}

/// An event may not end before it starts.
pub fn event_range(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<()> {
    match end {
        Some(end) if end < start => Err(Error::validation(
            "end_date",
            "cannot be before the start date",
        )),
        _ => Ok(()),
    }
}

/// Builds an event's start instant from form input.
///
/// Deadlines may omit the time and are then due at 23:59 UTC; every other
/// event type needs a time of day.
pub fn event_start(
    date: NaiveDate,
    time: Option<NaiveTime>,
    event_type: EventType,
) -> Result<DateTime<Utc>> {
    let time = match (time, event_type) {
        (Some(time), _) => time,
        (None, EventType::Deadline) => {
            let (hour, minute) = DEADLINE_TIME;
            NaiveTime::from_hms_opt(hour, minute, 0)
                .ok_or_else(|| Error::validation("start_time", "invalid deadline time"))?
        }
        (None, _) => return Err(Error::validation("start_time", "is required")),
    };
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{at, day};

    #[test]
    fn test_required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("title", "  Book venue ").unwrap(), "Book venue");
        assert!(matches!(
            required_text("title", "   "),
            Err(Error::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" Vegan ".to_string())), Some("Vegan".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_amount_rules() {
        assert!(non_negative_amount("spent_amount", 0.0).is_ok());
        assert!(non_negative_amount("spent_amount", -1.0).is_err());
        assert!(non_negative_amount("spent_amount", f64::NAN).is_err());
        assert!(positive_amount("allocated_amount", 0.0).is_err());
        assert!(positive_amount("allocated_amount", 10.0).is_ok());
    }

    #[test]
    fn test_guest_rules() {
        assert!(email(Some("dewi@example.com")).is_ok());
        assert!(email(Some("dewi.example.com")).is_err());
        assert!(email(None).is_ok());
        assert!(plus_ones(-1).is_err());
        assert!(plus_ones(0).is_ok());
        assert!(table_number(Some(0)).is_err());
        assert!(table_number(Some(1)).is_ok());
        assert!(table_number(None).is_ok());
    }

    #[test]
    fn test_event_range() {
        let start = at(2026, 6, 15, 14);
        assert!(event_range(start, None).is_ok());
        assert!(event_range(start, Some(start)).is_ok());
        assert!(event_range(start, Some(at(2026, 6, 15, 13))).is_err());
    }

    #[test]
    fn test_deadline_without_time_is_due_end_of_day() {
        let start = event_start(day(2026, 12, 25), None, EventType::Deadline).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-12-25T23:59:00+00:00");
    }

    #[test]
    fn test_other_events_need_a_time() {
        assert!(matches!(
            event_start(day(2026, 12, 25), None, EventType::Appointment),
            Err(Error::Validation { field: "start_time", .. })
        ));
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        let start = event_start(day(2026, 12, 25), Some(time), EventType::Appointment).unwrap();
        assert_eq!(start, at(2026, 12, 25, 10) + chrono::Duration::minutes(30));
    }
}
