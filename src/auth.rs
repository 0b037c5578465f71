use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;
use crate::handler::AppState;

/// Why a request was turned away. Recorded in the audit log instead of the
/// tokens themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingHeader,
    MalformedHeader,
    TokenMismatch,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MissingHeader => "missing_header",
            Rejection::MalformedHeader => "malformed_header",
            Rejection::TokenMismatch => "token_mismatch",
        }
    }
}

/// Shared-secret bearer token check.
pub struct AuthGate {
    token: SecretString,
}

impl AuthGate {
    pub fn new(token: &str) -> Self {
        AuthGate {
            token: SecretString::from(token.to_owned()),
        }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        let value = headers.get(AUTHORIZATION).ok_or(Rejection::MissingHeader)?;
        let value = value.to_str().map_err(|_| Rejection::MalformedHeader)?;
        let presented = value.strip_prefix("Bearer ").ok_or(Rejection::MalformedHeader)?;

        if presented == self.token.expose_secret() {
            Ok(())
        } else {
            Err(Rejection::TokenMismatch)
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").field("token", &"[REDACTED]").finish()
    }
}

pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Err(reason) = state.auth.authorize(request.headers()) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = reason.as_str(),
            "unauthorized request"
        );
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
