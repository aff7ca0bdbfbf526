use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::time_frame::{self, TimeFrame};
use super::validation::{self, FieldError};
use super::{Todo, TodoDraft};
use crate::store::{StoreError, TodoStore};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("Completed percentage must be between 0.0 and 1.0. Provided percentage: {0}")]
    OutOfRange(f64),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<time_frame::InvalidTimeFrame> for ServiceError {
    fn from(e: time_frame::InvalidTimeFrame) -> Self {
        ServiceError::InvalidArgument(e.to_string())
    }
}

/// Validation and persistence orchestration for todos. Missing ids come
/// back as `None`/`false`; errors are reserved for bad input and store
/// failures.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        Ok(self.store.ping().await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Todo>, ServiceError> {
        Ok(self.store.find(id).await?)
    }

    /// Todos expiring in `[start, end)`; either bound may be left open.
    pub async fn get_by_date_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.store.list_expiring_between(start, end).await?)
    }

    pub async fn get_by_time_frame(&self, frame: TimeFrame) -> Result<Vec<Todo>, ServiceError> {
        let (start, end) = time_frame::bounds(frame, Utc::now().date_naive());
        tracing::debug!(%frame, %start, %end, "resolved time frame");
        self.get_by_date_range(Some(start), Some(end)).await
    }

    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, ServiceError> {
        let todo = validation::validated(draft, Utc::now()).map_err(ServiceError::ValidationFailed)?;
        let created = self.store.insert(todo).await?;
        tracing::info!(id = created.id, "todo created");
        Ok(created)
    }

    /// Full replace of the todo named by `draft.id`. `Ok(None)` when that
    /// id does not exist; nothing is inserted in that case.
    pub async fn update(&self, draft: TodoDraft) -> Result<Option<Todo>, ServiceError> {
        let id = draft.id;
        let result = validation::validated(draft, Utc::now());

        let (id, todo) = match (id, result) {
            (Some(id), Ok(todo)) => (id, todo),
            (None, result) => {
                let mut errors = vec![validation::id_required()];
                errors.extend(result.err().unwrap_or_default());
                return Err(ServiceError::ValidationFailed(errors));
            }
            (Some(_), Err(errors)) => return Err(ServiceError::ValidationFailed(errors)),
        };

        let updated = self.store.replace(id, todo).await?;
        if updated.is_some() {
            tracing::info!(id, "todo updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let removed = self.store.remove(id).await?;
        if removed {
            tracing::info!(id, "todo deleted");
        }
        Ok(removed)
    }

    pub async fn set_completion_percentage(
        &self,
        id: i32,
        percentage: f64,
    ) -> Result<Option<Todo>, ServiceError> {
        if !validation::is_valid_percentage(percentage) {
            return Err(ServiceError::OutOfRange(percentage));
        }

        Ok(self.store.set_completed_percentage(id, percentage).await?)
    }

    pub async fn mark_as_done(&self, id: i32) -> Result<Option<Todo>, ServiceError> {
        self.set_completion_percentage(id, 1.0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTodoStore;
    use crate::todos::{ErrorCode, Field};
    use chrono::Duration;

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryTodoStore::new()))
    }

    fn valid_draft() -> TodoDraft {
        TodoDraft {
            id: None,
            title: Some("Valid Title".to_string()),
            description: Some("Valid Description".to_string()),
            expiry_date: Some(Utc::now() + Duration::days(1)),
            completed_percentage: Some(0.5),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_by_id() {
        let service = service();
        let created = service.create(valid_draft()).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.title, "Valid Title");
        assert_eq!(created.description, "Valid Description");
        assert_eq!(created.completed_percentage, 0.5);

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let service = service();
        let mut draft = valid_draft();
        draft.id = Some(42);

        let created = service.create(draft).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_todo() {
        let service = service();
        let mut draft = valid_draft();
        draft.title = Some(String::new());

        match service.create(draft).await {
            Err(ServiceError::ValidationFailed(errors)) => {
                assert!(errors.iter().any(|e| e.field == Field::Title && e.code == ErrorCode::Required));
            }
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        assert_eq!(service().get_by_id(9991).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_existing_todo() {
        let service = service();
        let created = service.create(valid_draft()).await.unwrap();

        let mut draft = valid_draft();
        draft.id = Some(created.id);
        draft.title = Some("Renamed".to_string());
        draft.description = None;

        let updated = service.update(draft).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_an_upsert() {
        let service = service();
        let mut draft = valid_draft();
        draft.id = Some(5);

        assert_eq!(service.update(draft).await.unwrap(), None);
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_without_id_reports_all_errors() {
        let service = service();
        let mut draft = valid_draft();
        draft.completed_percentage = Some(1.5);

        match service.update(draft).await {
            Err(ServiceError::ValidationFailed(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, Field::Id);
                assert_eq!(errors[1].code, ErrorCode::OutOfRange);
            }
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_succeeds_exactly_once() {
        let service = service();
        let created = service.create(valid_draft()).await.unwrap();

        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_completion_percentage_range() {
        let service = service();
        let created = service.create(valid_draft()).await.unwrap();

        for p in [-1.0, -0.5, 1.0001, 2.0, f64::NAN] {
            assert!(matches!(
                service.set_completion_percentage(created.id, p).await,
                Err(ServiceError::OutOfRange(_))
            ));
        }
        for p in [0.0, 0.3, 1.0] {
            let todo = service.set_completion_percentage(created.id, p).await.unwrap().unwrap();
            assert_eq!(todo.completed_percentage, p);
            assert_eq!(todo.is_done(), p >= 1.0);
        }
    }

    #[tokio::test]
    async fn test_out_of_range_wins_over_missing_id() {
        let service = service();
        assert!(matches!(
            service.set_completion_percentage(404, -0.5).await,
            Err(ServiceError::OutOfRange(_))
        ));
        assert_eq!(service.set_completion_percentage(404, 0.5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mark_as_done_matches_full_percentage() {
        let service = service();
        let a = service.create(valid_draft()).await.unwrap();
        let b = service.create(valid_draft()).await.unwrap();

        let done = service.mark_as_done(a.id).await.unwrap().unwrap();
        let full = service.set_completion_percentage(b.id, 1.0).await.unwrap().unwrap();

        assert!(done.is_done());
        assert_eq!(done.completed_percentage, full.completed_percentage);
        assert_eq!(service.mark_as_done(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_time_frames_filter_by_expiry() {
        let today = Utc::now().date_naive().and_time(chrono::NaiveTime::MIN).and_utc();

        // only future expiry dates pass validation, so seed through the store
        let store = Arc::new(MemoryTodoStore::new());
        let service = TodoService::new(store.clone());
        for (title, expiry) in [
            ("today", today + Duration::hours(23)),
            ("tomorrow", today + Duration::days(1) + Duration::hours(5)),
            ("next week", today + Duration::days(7)),
        ] {
            store
                .insert(crate::todos::NewTodo {
                    title: title.to_string(),
                    description: String::new(),
                    expiry_date: expiry,
                    completed_percentage: 0.0,
                })
                .await
                .unwrap();
        }

        let todays = service.get_by_time_frame(TimeFrame::Today).await.unwrap();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].title, "today");

        let tomorrows = service.get_by_time_frame(TimeFrame::Tomorrow).await.unwrap();
        assert_eq!(tomorrows.len(), 1);
        assert_eq!(tomorrows[0].title, "tomorrow");

        let week = service.get_by_time_frame(TimeFrame::CurrentWeek).await.unwrap();
        assert!(week.iter().all(|t| t.expiry_date < today + Duration::days(7)));
    }
}
