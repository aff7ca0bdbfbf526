use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{StoreError, TodoStore};
use crate::todos::{NewTodo, Todo};

#[derive(Clone)]
pub struct PgTodoStore {
    db: PgPool,
}

impl PgTodoStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, expiry_date, completed_percentage
            FROM todos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(todos)
    }

    async fn find(&self, id: i32) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, expiry_date, completed_percentage
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(todo)
    }

    async fn list_expiring_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, expiry_date, completed_percentage
            FROM todos
            WHERE ($1::timestamptz IS NULL OR expiry_date >= $1)
              AND ($2::timestamptz IS NULL OR expiry_date < $2)
            ORDER BY expiry_date, id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(todos)
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, expiry_date, completed_percentage)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, expiry_date, completed_percentage
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.expiry_date)
        .bind(todo.completed_percentage)
        .fetch_one(&self.db)
        .await?;

        Ok(todo)
    }

    async fn replace(&self, id: i32, todo: NewTodo) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET
                title = $2,
                description = $3,
                expiry_date = $4,
                completed_percentage = $5
            WHERE id = $1
            RETURNING id, title, description, expiry_date, completed_percentage
            "#,
        )
        .bind(id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.expiry_date)
        .bind(todo.completed_percentage)
        .fetch_optional(&self.db)
        .await?;

        Ok(todo)
    }

    async fn set_completed_percentage(
        &self,
        id: i32,
        percentage: f64,
    ) -> Result<Option<Todo>, StoreError> {
        // single statement, so a concurrent delete just yields no row
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET completed_percentage = $2
            WHERE id = $1
            RETURNING id, title, description, expiry_date, completed_percentage
            "#,
        )
        .bind(id)
        .bind(percentage)
        .fetch_optional(&self.db)
        .await?;

        Ok(todo)
    }

    async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
