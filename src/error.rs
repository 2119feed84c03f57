use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{protocol::MessageResponse, store::StoreError, validation::ValidationError};

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Comment not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    /// Details are logged, never sent to the client.
    #[error("Internal Server Error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            err => Self::Storage(err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Storage(err) = self {
            tracing::error!("Storage failure: {err:#}");
        }
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self))
    }
}
