use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use mebel_utils::MebelError;
use std::time::Duration;

use super::ApiError;

/// Answers with 408 once a request has run for longer than `limit`.
pub async fn timeout_middleware(
    State(limit): State<Duration>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%path, limit_secs = limit.as_secs_f64(), "Request timed out");
            ApiError(MebelError::timeout(limit.as_secs())).into_response()
        }
    }
}
