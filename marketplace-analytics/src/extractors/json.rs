use crate::error::AppError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// 統一JSON Extractor
/// ボディをデシリアライズし、validator による検証まで行う。
/// 失敗時は axum 既定のテキストではなく `ErrorResponse` 形式で返す
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(path = %path, error = %rejection.body_text(), "Rejected JSON body");
                AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
            })?;

        value.validate().map_err(|errors| {
            tracing::warn!(path = %path, error = %errors, "Request body validation failed");
            AppError::ValidationFailure(errors)
        })?;

        Ok(ValidatedJson(value))
    }
}
