pub mod routes;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::todos::Todo;

// DTOS

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub completed_percentage: f64,
    pub is_done: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            is_done: todo.is_done(),
            id: todo.id,
            title: todo.title,
            description: todo.description,
            expiry_date: todo.expiry_date,
            completed_percentage: todo.completed_percentage,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingQuery {
    pub time_frame: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

pub(crate) fn to_responses(todos: Vec<Todo>) -> Vec<TodoResponse> {
    todos.into_iter().map(TodoResponse::from).collect()
}
