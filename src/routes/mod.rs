use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
mod health;
pub mod todos;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let todo_router = Router::new()
        .route(
            "/",
            get(todos::routes::list)
                .post(todos::routes::create)
                .put(todos::routes::update),
        )
        .route("/incoming", get(todos::routes::incoming))
        .route("/range", get(todos::routes::range))
        .route(
            "/{id}",
            get(todos::routes::get).delete(todos::routes::delete),
        )
        .route("/{id}/change-percentage", patch(todos::routes::change_percentage))
        .route("/{id}/mark-as-done", patch(todos::routes::mark_as_done));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/todo", todo_router)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Todo API written in Rust"
}
