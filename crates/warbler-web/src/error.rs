use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use warbler_db::DbError;

use crate::views;

/// Failures a handler cannot turn into a redirect.
///
/// Authorization failures are not errors: handlers flash and redirect instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("spawn_blocking join error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Internal(_) => {
                tracing::error!("Internal Server Error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let page = views::layout(
            status.canonical_reason().unwrap_or("Error"),
            None,
            &[],
            &views::errors::error_page(status),
        );
        (status, Html(page)).into_response()
    }
}
