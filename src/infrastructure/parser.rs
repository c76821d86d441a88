use crate::infrastructure::ControlValue;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Parse a calendar date from a plain `YYYY-MM-DD`, an RFC 3339 timestamp
/// (converted to the local date) or a naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Reads and writes control values as JSON.
///
/// Reading is lenient: anything that is not a usable date or
/// `{startDate, endDate}` pair reads as `None` instead of failing.
pub struct ControlParser;

impl ControlParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Option<ControlValue> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(content) {
            Ok(value) => self.parse_value(&value),
            // bare, unquoted date
            Err(_) => parse_date(content).map(ControlValue::Single),
        }
    }

    pub fn parse_value(&self, value: &Value) -> Option<ControlValue> {
        match value {
            Value::String(text) => parse_date(text).map(ControlValue::Single),
            Value::Object(map) => {
                let start_date = parse_date(map.get("startDate")?.as_str()?)?;
                let end_date = parse_date(map.get("endDate")?.as_str()?)?;
                Some(ControlValue::Range {
                    start_date,
                    end_date,
                })
            }
            _ => None,
        }
    }

    pub fn serialize(&self, value: &ControlValue) -> Result<String> {
        serde_json::to_string_pretty(value).context("Failed to serialize control value")
    }
}

impl Default for ControlParser {
    fn default() -> Self {
        Self::new()
    }
}
