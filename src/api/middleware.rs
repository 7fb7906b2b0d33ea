use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_cookies::Cookies;

use super::{
    error::ApiError,
    session::{Session, SESSION_COOKIE},
};
use crate::state::Collections;

/// Makes sure seed data exists before any `/api` handler reads.
pub async fn seed_middleware(
    Extension(collections): Extension<Collections>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = collections.ensure_seed().await {
        tracing::Span::current().record("action", "ensure_seed_failed");
        return ApiError::from(e).into_response();
    }
    next.run(request).await
}

/// Attaches a [`Session`] when the request carries a valid session cookie.
/// Requests without one pass through unchanged.
pub async fn session_middleware(
    Extension(collections): Extension<Collections>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        if let Some(session) = Session::from_cookie(cookie.value(), &collections).await {
            tracing::Span::current().record("staff_id", session.staff.id.as_str());
            request.extensions_mut().insert(session);
        }
    }
    next.run(request).await
}
