use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::ErrorBody;
use crate::auth::AuthGate;
use crate::config::Environment;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthGate>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(db: Database, auth: AuthGate, environment: Environment) -> Self {
        AppState {
            db: Arc::new(db),
            auth: Arc::new(auth),
            environment,
        }
    }
}

pub async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found"))).into_response()
}
