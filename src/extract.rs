use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};

use crate::{error::AppError, validation::parse_path_id};

/// `axum::Json` whose rejections render as [`AppError`] bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// The `tripId` path segment, checked to be a uuid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for TripId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_path_id(&raw).map(Self)
    }
}
