//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, NaiveDate, Utc};
use crate::utils::errors::ValidationError;

/// Parse a date the way browsers send them: RFC 3339 or a bare `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Hour component of an `HH:MM` time string
pub fn parse_hour(time: &str) -> Option<u32> {
    time.split(':').next()?.trim().parse::<u32>().ok()
}

/// Reject coordinates outside the valid degree ranges
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(ValidationError::InvalidCoordinates { lat, lng });
    }
    Ok(())
}

/// Calculate pagination offset
pub fn calculate_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Number of pages needed for `total_items`
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Treat empty and whitespace-only strings as missing
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_event_date() {
        let day = parse_event_date("2024-08-12").unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2024, 8, 12, 0));

        let exact = parse_event_date("2024-08-12T23:30:00+02:00").unwrap();
        assert_eq!(exact.hour(), 21);

        assert!(parse_event_date("tomorrow").is_none());
        assert!(parse_event_date("").is_none());
    }

    #[test]
    fn test_parse_hour() {
        assert_eq!(parse_hour("20:00"), Some(20));
        assert_eq!(parse_hour("7:45"), Some(7));
        assert_eq!(parse_hour("late"), None);
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(45.0, -75.0).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_pagination() {
        assert_eq!(calculate_offset(1, 6), 0);
        assert_eq!(calculate_offset(3, 6), 12);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(21, 10), 3);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 8), "hello...");
        assert_eq!(truncate_text("ééééé", 4), "é...");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("x".into())), Some("x".into()));
    }
}
