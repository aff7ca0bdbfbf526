pub mod service;
pub mod time_frame;
pub mod validation;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer};

pub use service::TodoService;
pub use time_frame::TimeFrame;
pub use validation::{ErrorCode, Field, FieldError};

// MODELS

/// A stored todo. `is_done` is derived, see [`Todo::is_done`].
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub completed_percentage: f64,
}

impl Todo {
    pub fn is_done(&self) -> bool {
        self.completed_percentage >= 1.0
    }
}

/// Incoming todo as the client sent it. Every field is optional here so the
/// validator can report what is missing instead of the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_expiry")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub completed_percentage: Option<f64>,
}

/// Parses an expiry date as clients send it: RFC 3339, a timestamp without
/// offset, or a bare date. Values without an offset are taken as UTC and a
/// bare date means midnight.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

fn lenient_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_expiry(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expiryDate '{raw}' is not a date"))),
    }
}

/// A draft that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub completed_percentage: f64,
}

impl NewTodo {
    pub fn with_id(self, id: i32) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            expiry_date: self.expiry_date,
            completed_percentage: self.completed_percentage,
        }
    }
}
