use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{to_responses, IncomingQuery, RangeQuery, TodoResponse};
use crate::routes::error::ApiError;
use crate::routes::extract::ApiJson;
use crate::state::AppState;
use crate::todos::{TimeFrame, TodoDraft};
use crate::todos::service::ServiceError;

/// List every todo
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let todos = state.todos.get_all().await?;
    Ok(Json(to_responses(todos)))
}

/// Get a single todo by ID
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.todos.get_by_id(id).await? {
        Some(todo) => Ok(Json(TodoResponse::from(todo))),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Todos expiring today, tomorrow or during the rest of the current week.
/// A missing `timeFrame` means today.
pub async fn incoming(
    State(state): State<AppState>,
    Query(query): Query<IncomingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let frame = match query.time_frame.as_deref() {
        Some(name) => name.parse::<TimeFrame>().map_err(ServiceError::from)?,
        None => TimeFrame::default(),
    };

    let todos = state.todos.get_by_time_frame(frame).await?;
    Ok(Json(to_responses(todos)))
}

/// Todos expiring in `[start, end)`
pub async fn range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.todos.get_by_date_range(query.start, query.end).await?;
    Ok(Json(to_responses(todos)))
}

/// Create a new todo
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TodoDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos.create(payload).await?;
    let location = format!("/todo/{}", todo.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TodoResponse::from(todo)),
    ))
}

/// Replace an existing todo, the ID comes from the body
pub async fn update(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TodoDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let id = payload.id;

    match state.todos.update(payload).await? {
        Some(todo) => Ok(Json(TodoResponse::from(todo))),
        None => Err(ApiError::NotFound(id.unwrap_or_default())),
    }
}

/// Delete a todo
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.todos.delete(id).await? {
        return Err(ApiError::NotFound(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Set the completion percentage, the body is a bare number in [0, 1]
pub async fn change_percentage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(percentage): ApiJson<f64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.todos.set_completion_percentage(id, percentage).await? {
        Some(todo) => Ok(Json(TodoResponse::from(todo))),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Mark a todo as fully done
pub async fn mark_as_done(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.todos.mark_as_done(id).await? {
        Some(todo) => Ok(Json(TodoResponse::from(todo))),
        None => Err(ApiError::NotFound(id)),
    }
}
