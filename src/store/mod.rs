pub mod memory;
pub mod queries;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, DatabaseConfig};
use crate::todos::{NewTodo, Todo};

pub use memory::MemoryTodoStore;
pub use queries::PgTodoStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("no todo ids left to assign")]
    IdsExhausted,
}

/// Persistence for todos. Every method is one atomic unit against the
/// backing engine; "no such id" is `None`/`false`, never an error.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Short engine name, reported by the health check.
    fn kind(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<Todo>, StoreError>;

    /// Todos with `start <= expiry_date < end`; a `None` bound is open.
    async fn list_expiring_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Todo>, StoreError>;

    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// Replaces every field of the todo with `id`.
    async fn replace(&self, id: i32, todo: NewTodo) -> Result<Option<Todo>, StoreError>;

    async fn set_completed_percentage(
        &self,
        id: i32,
        percentage: f64,
    ) -> Result<Option<Todo>, StoreError>;

    async fn remove(&self, id: i32) -> Result<bool, StoreError>;
}

/// Builds the store the configuration asks for. PostgreSQL stores are
/// migrated before they are handed out.
pub async fn connect(config: &Config) -> Result<Arc<dyn TodoStore>, StoreError> {
    let options = match &config.database {
        DatabaseConfig::InMemory => {
            tracing::warn!("no database configured, todos are kept in memory only");
            return Ok(Arc::new(MemoryTodoStore::new()));
        }
        DatabaseConfig::Postgres(options) => options.clone(),
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(Arc::new(PgTodoStore::new(pool)))
}
