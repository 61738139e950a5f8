use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use casket_store::ObjectResponse;
use serde::Serialize;
use serde_json::json;

use crate::error::{ServerError, ServerResult};
use crate::request::object_request;
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    let stats = state.service.storage().stats()?;
    Ok(Json(json!({
        "name": "casket-server",
        "version": env!("CARGO_PKG_VERSION"),
        "repositories": stats.repositories,
        "objects": stats.objects,
        "bytes": stats.bytes,
    })))
}

/// Handles every `/data/...` request: PUT writes, GET reads, DELETE deletes.
pub async fn object_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Response> {
    let request = object_request(&method, uri.path(), || {
        body.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ServerError::PayloadTooLarge {
                    limit: state.max_object_size,
                }
            } else {
                ServerError::BadRequest(rejection.body_text())
            }
        })
    })?;

    let response = match state.service.execute(request)? {
        ObjectResponse::Written(written) => (StatusCode::CREATED, Json(written)).into_response(),
        ObjectResponse::Data(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            data,
        )
            .into_response(),
        ObjectResponse::Deleted => StatusCode::OK.into_response(),
    };
    Ok(response)
}
