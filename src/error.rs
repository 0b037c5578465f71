use std::any::Any;

use axum::{
    Json,
    extract::{Request, State, rejection::JsonRejection},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::ErrorBody;
use crate::handler::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Bookmark not found";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";
pub const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized request")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("bookmark not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Detail of an unexpected failure, carried on the response so the boundary
/// can decide how much of it the client gets to see.
#[derive(Debug, Clone)]
pub struct FailureDetail {
    pub message: String,
    pub chain: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(UNAUTHORIZED_MESSAGE))).into_response()
            }
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, Json(ErrorBody::new(&msg))).into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, Json(ErrorBody::new(NOT_FOUND_MESSAGE))).into_response(),
            ApiError::Internal(err) => {
                let detail = FailureDetail {
                    message: err.to_string(),
                    chain: crate::unpack_error(&*err),
                };
                server_error(detail)
            }
        }
    }
}

fn server_error(detail: FailureDetail) -> Response {
    let mut response =
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(SERVER_ERROR_MESSAGE))).into_response();
    response.extensions_mut().insert(detail);
    response
}

/// Turns a handler panic into the same 500 shape as any other failure.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    server_error(FailureDetail {
        chain: message.clone(),
        message,
    })
}

/// Logs unexpected failures and, outside production, swaps the generic 500
/// body for one that carries the error detail.
pub async fn error_boundary(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    let Some(detail) = response.extensions().get::<FailureDetail>().cloned() else {
        return response;
    };

    tracing::error!(%method, %path, error = %detail.chain, "request failed");

    if state.environment.is_production() {
        return response;
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": detail.message,
            "error": detail.chain,
        })),
    )
        .into_response()
}
