use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::routes::AppState;

const ADMIN_KEY_HEADER: &str = "x-admin-key";
const UNAUTHORIZED_BODY: &str = "Unauthorized: invalid or missing admin key.";

// Endpoints reachable without the admin key.
const PUBLIC_PREFIXES: &[&str] = &["/api/pool/status", "/api/weather/current", "/health"];

pub fn is_public_path(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    PUBLIC_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !key_matches(provided, &state.config.admin_api_key) {
        tracing::warn!("Rejected request to {} without valid admin key", request.uri().path());
        return (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response();
    }

    next.run(request).await
}

fn key_matches(provided: Option<&str>, expected: &str) -> bool {
    match provided {
        Some(key) if !key.is_empty() => key == expected,
        _ => false,
    }
}
