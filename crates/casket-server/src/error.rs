use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use casket_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Methods accepted on `/data/` paths, as sent in the `allow` header.
pub const ALLOWED_METHODS: &str = "GET, PUT, DELETE";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request path does not name anything that could exist.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported method: {0}")]
    MethodNotAllowed(Method),

    #[error("object exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::ObjectNotFound(_) | StoreError::RepositoryNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Store(StoreError::ObjectAlreadyExists(_)) => StatusCode::CONFLICT,
            Self::Store(StoreError::LockPoisoned(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();
        if let Self::MethodNotAllowed(_) = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
