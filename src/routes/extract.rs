use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use super::error::ApiError;

/// `Json` body extractor whose rejections answer with the API's own
/// 400 `{"error": ...}` shape instead of axum's plain-text 4xx.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
