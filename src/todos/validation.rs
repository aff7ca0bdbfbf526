use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{NewTodo, TodoDraft};

pub const TITLE_MAX_LEN: usize = 60;
pub const DESCRIPTION_MAX_LEN: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    Id,
    Title,
    Description,
    CompletedPercentage,
    ExpiryDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Required,
    TooLong,
    OutOfRange,
    NotFuture,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, code: ErrorCode, message: impl Into<String>) -> Self {
        Self { field, code, message: message.into() }
    }
}

pub fn is_valid_percentage(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Runs every rule against `draft` and collects all failures. `now` is the
/// instant the expiry date has to be strictly after.
pub fn validate(draft: &TodoDraft, now: DateTime<Utc>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match draft.title.as_deref() {
        None => errors.push(FieldError::new(Field::Title, ErrorCode::Required, "Title is required")),
        Some(title) if title.trim().is_empty() => {
            errors.push(FieldError::new(Field::Title, ErrorCode::Required, "Title cannot be empty"))
        }
        Some(title) => {
            let len = title.chars().count();
            if len > TITLE_MAX_LEN {
                errors.push(FieldError::new(
                    Field::Title,
                    ErrorCode::TooLong,
                    format!(
                        "Title cannot be longer than {TITLE_MAX_LEN} characters. Provided title length: {len}"
                    ),
                ));
            }
        }
    }

    // null description is stored as an empty one
    if let Some(description) = draft.description.as_deref() {
        let len = description.chars().count();
        if len > DESCRIPTION_MAX_LEN {
            errors.push(FieldError::new(
                Field::Description,
                ErrorCode::TooLong,
                format!(
                    "Description cannot be longer than {DESCRIPTION_MAX_LEN} characters. Provided description length: {len}"
                ),
            ));
        }
    }

    match draft.completed_percentage {
        None => errors.push(FieldError::new(
            Field::CompletedPercentage,
            ErrorCode::Required,
            "CompletedPercentage is required",
        )),
        Some(p) if !is_valid_percentage(p) => errors.push(FieldError::new(
            Field::CompletedPercentage,
            ErrorCode::OutOfRange,
            format!("Percentage must be a number between 0.0 and 1.0. Provided percentage: {p}"),
        )),
        Some(_) => {}
    }

    match draft.expiry_date {
        None => errors.push(FieldError::new(Field::ExpiryDate, ErrorCode::Required, "Expiry date is required")),
        Some(expiry) if expiry <= now => errors.push(FieldError::new(
            Field::ExpiryDate,
            ErrorCode::NotFuture,
            format!(
                "Expiry date must be in the future. Provided date: {}",
                expiry.format("%Y-%m-%d %H:%M:%S")
            ),
        )),
        Some(_) => {}
    }

    errors
}

/// Validates and, when clean, turns the draft into something writable.
pub fn validated(draft: TodoDraft, now: DateTime<Utc>) -> Result<NewTodo, Vec<FieldError>> {
    let errors = validate(&draft, now);

    match (draft.title, draft.expiry_date, draft.completed_percentage) {
        (Some(title), Some(expiry_date), Some(completed_percentage)) if errors.is_empty() => {
            Ok(NewTodo {
                title,
                description: draft.description.unwrap_or_default(),
                expiry_date,
                completed_percentage,
            })
        }
        _ => Err(errors),
    }
}

pub fn id_required() -> FieldError {
    FieldError::new(Field::Id, ErrorCode::Required, "Id is required when updating a todo")
}
