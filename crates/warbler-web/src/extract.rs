use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use crate::error::AppError;

/// Numeric `{id}` path segment. Anything that does not parse as an id names
/// no user or message, so it gets the 404 page.
pub struct Id(pub i64);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), "Unusable id: {}", rejection);
                Err(AppError::NotFound)
            }
        }
    }
}
