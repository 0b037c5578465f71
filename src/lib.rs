use axum::{Router, http::Method, middleware};
use std::error::Error;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handler::AppState;

pub mod api;
pub mod auth;
pub mod bookmark;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod sanitize;

/// Builds the full application: bookmark routes behind the bearer token
/// check, with the error boundary, request tracing and CORS around them.
pub fn router(state: AppState) -> Router {
    with_layers(bookmark::routes(), state)
}

/// Wraps `routes` in the same stack [`router`] uses.
pub fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .merge(routes)
        .fallback(handler::fallback)
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), error::error_boundary))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
