//! Request parsing at the HTTP boundary.
//!
//! Handlers receive loosely typed bodies (every field optional, dates as raw
//! JSON) and turn them into domain inputs here. Each check reports a reason
//! string; [`ValidationErrors`] collects them per field so one response lists
//! every problem with the request.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

pub const REQUIRED: &str = "Required";
pub const INVALID_UUID: &str = "Invalid uuid";
pub const INVALID_DATE: &str = "Invalid date";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(reason.into());
    }

    /// Records the failure of `result` under `field` and hands back the value
    /// on success.
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(reason) => {
                self.add(field, reason);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", reasons.join(", "))?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

pub fn required<T>(value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| REQUIRED.to_string())
}

pub fn min_len(value: String, min: usize) -> Result<String, String> {
    if value.chars().count() < min {
        return Err(format!("String must contain at least {min} character(s)"));
    }
    Ok(value)
}

/// Parses any textual uuid form and returns the lowercase hyphenated id used
/// as the storage key.
pub fn parse_uuid(raw: &str) -> Result<String, String> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| INVALID_UUID.to_string())
}

pub fn parse_path_id(raw: &str) -> Result<String, AppError> {
    let mut errors = ValidationErrors::new();
    match errors.check("tripId", parse_uuid(raw)) {
        Some(id) => Ok(id),
        None => Err(errors.into()),
    }
}

/// A date as clients send it: epoch milliseconds or a timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
}

impl DateInput {
    pub fn to_timestamp(&self) -> Result<DateTime<Utc>, String> {
        match self {
            DateInput::Millis(ms) => {
                DateTime::from_timestamp_millis(*ms).ok_or_else(|| INVALID_DATE.to_string())
            }
            DateInput::Text(raw) => parse_timestamp(raw).ok_or_else(|| INVALID_DATE.to_string()),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn parse_date(value: Option<DateInput>) -> Result<DateTime<Utc>, String> {
    required(value)?.to_timestamp()
}
