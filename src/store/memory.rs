use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::todos::{NewTodo, Todo};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Todo>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryTodoStore {
    table: RwLock<Table>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_expiring_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Todo>, StoreError> {
        let table = self.table.read().await;
        let mut todos: Vec<Todo> = table
            .rows
            .values()
            .filter(|t| start.map_or(true, |s| t.expiry_date >= s))
            .filter(|t| end.map_or(true, |e| t.expiry_date < e))
            .cloned()
            .collect();
        todos.sort_by_key(|t| (t.expiry_date, t.id));
        Ok(todos)
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut table = self.table.write().await;
        table.next_id = table.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let todo = todo.with_id(table.next_id);
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn replace(&self, id: i32, todo: NewTodo) -> Result<Option<Todo>, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = todo.with_id(id);
            row.clone()
        }))
    }

    async fn set_completed_percentage(
        &self,
        id: i32,
        percentage: f64,
    ) -> Result<Option<Todo>, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            row.completed_percentage = percentage;
            row.clone()
        }))
    }

    async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
