//! Calendar export links and iCalendar bodies

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{Result, StarCastError, ValidationError};
use crate::utils::helpers::{non_blank, parse_event_date};

const DURATION_PATTERN: &str = r"(?i)(\d+)\s*(hour|min|minutes?|hours?)";
const GOOGLE_TEMPLATE_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_COMPOSE_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

/// Body of `POST /api/calendar`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRequest {
    pub event_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<String>,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExport {
    pub google_url: String,
    pub outlook_url: String,
    pub ics: String,
    pub filename: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct CalendarService {
    duration_pattern: Regex,
}

impl CalendarService {
    pub fn new() -> Result<Self> {
        let duration_pattern = Regex::new(DURATION_PATTERN)
            .map_err(|e| StarCastError::Config(format!("duration pattern: {}", e)))?;
        Ok(Self { duration_pattern })
    }

    /// Length of the first "N hours" or "N minutes" found in `duration`
    ///
    /// Values too large to represent yield `None`.
    pub fn parse_duration(&self, duration: &str) -> Option<Duration> {
        let captures = self.duration_pattern.captures(duration)?;
        let value: i64 = captures.get(1)?.as_str().parse().ok()?;
        let unit = captures.get(2)?.as_str().to_lowercase();

        if unit.starts_with("hour") {
            Duration::try_hours(value)
        } else {
            Duration::try_minutes(value)
        }
    }

    pub fn export(&self, request: CalendarRequest) -> std::result::Result<CalendarExport, ValidationError> {
        let (event_name, start_date) =
            match (non_blank(request.event_name), non_blank(request.start_date)) {
                (Some(name), Some(date)) => (name, date),
                (name, date) => {
                    let mut missing = Vec::new();
                    if name.is_none() {
                        missing.push("eventName");
                    }
                    if date.is_none() {
                        missing.push("startDate");
                    }
                    return Err(ValidationError::MissingFields(missing));
                }
            };

        let start = parse_event_date(&start_date).ok_or(ValidationError::InvalidDate(start_date))?;
        let end = self
            .parse_duration(&request.duration)
            .and_then(|d| start.checked_add_signed(d))
            .unwrap_or(start);

        Ok(CalendarExport {
            google_url: google_url(&event_name, &request.description, start, end),
            outlook_url: outlook_url(&event_name, &request.description, start, end),
            ics: ics_body(&event_name, &request.description, start, end),
            filename: ics_filename(&event_name),
            start,
            end,
        })
    }
}

/// `20240812T233000Z`
fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

fn google_url(name: &str, description: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{}?action=TEMPLATE&text={}&details={}&dates={}/{}",
        GOOGLE_TEMPLATE_URL,
        urlencoding::encode(name),
        urlencoding::encode(description),
        compact_timestamp(start),
        compact_timestamp(end),
    )
}

fn outlook_url(name: &str, description: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{}?subject={}&body={}&startdt={}&enddt={}",
        OUTLOOK_COMPOSE_URL,
        urlencoding::encode(name),
        urlencoding::encode(description),
        start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Escape TEXT values for iCalendar content lines
fn ics_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

fn ics_body(name: &str, description: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//StarCast//Celestial Events//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}-{}@starcast", compact_timestamp(start), ics_filename_stem(name)),
        format!("DTSTAMP:{}", compact_timestamp(start)),
        format!("SUMMARY:{}", ics_escape(name)),
        format!("DESCRIPTION:{}", ics_escape(description)),
        format!("DTSTART:{}", compact_timestamp(start)),
        format!("DTEND:{}", compact_timestamp(end)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]
    .join("\r\n")
}

fn ics_filename_stem(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

fn ics_filename(name: &str) -> String {
    format!("{}.ics", ics_filename_stem(name))
}
