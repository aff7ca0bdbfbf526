pub mod config;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod todos;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;
use crate::store::TodoStore;
use crate::todos::TodoService;

/// The full application router over `store`.
pub fn app(store: Arc<dyn TodoStore>) -> Router {
    let state = AppState { todos: TodoService::new(store) };
    routes::routes().with_state(state)
}
