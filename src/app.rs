use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, HeaderValue, Method, Request, Response},
    routing::{get, put},
    Extension, Router,
};
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

use crate::{api, state::Collections};

async fn health_check() -> &'static str {
    "OK"
}

/// One span per request, named "METHOD /matched/path". Handlers fill in the
/// empty fields as they learn what the request did.
fn make_request_span(request: &Request<Body>) -> Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str())
        .unwrap_or_else(|| request.uri().path());
    let span_name = format!("{} {}", request.method(), path);

    let client_ip = request
        .headers()
        .get("x-forwarded-for")
        .or_else(|| request.headers().get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        "otel.name" = span_name,
        client_ip = client_ip,
        method = ?request.method(),
        uri = ?request.uri(),
        collection = tracing::field::Empty,
        action = tracing::field::Empty,
        record_id = tracing::field::Empty,
        staff_id = tracing::field::Empty,
        store = tracing::field::Empty,
        business_event = tracing::field::Empty,
        error = tracing::field::Empty,
        status = tracing::field::Empty,
        latency = tracing::field::Empty,
    )
}

/// The full HTTP surface minus `/metrics`, which the server binary adds
/// because the Prometheus recorder is process-global.
pub fn build_router(collections: Collections, cors_origin: HeaderValue) -> Router {
    let api_routes = Router::new()
        .route("/staff", get(api::reference::list_staff))
        .route("/dogs", get(api::reference::list_dogs))
        .route(
            "/meet-and-greets",
            get(api::meet_and_greets::list_meet_and_greets)
                .post(api::meet_and_greets::create_meet_and_greet),
        )
        .route(
            "/meet-and-greets/:id",
            put(api::meet_and_greets::update_meet_and_greet),
        )
        .route(
            "/engagements",
            get(api::engagements::list_engagements).post(api::engagements::create_engagement),
        )
        .route(
            "/observations",
            get(api::observations::list_observations).post(api::observations::create_observation),
        )
        .route(
            "/shift-reports",
            get(api::shift_reports::list_shift_reports)
                .post(api::shift_reports::create_shift_report),
        )
        .route("/dashboard", get(api::dashboard::get_dashboard))
        .route(
            "/session",
            get(api::session::get_session)
                .post(api::session::sign_in)
                .delete(api::session::sign_out),
        )
        .route("/session/store", put(api::session::switch_store))
        .route_layer(axum::middleware::from_fn(api::middleware::session_middleware))
        .route_layer(axum::middleware::from_fn(api::middleware::seed_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(Extension(collections))
        .layer(CookieManagerLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_request(|_request: &Request<Body>, _span: &Span| {})
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", tracing::field::display(response.status()));
                    span.record("latency", tracing::field::debug(latency));
                    tracing::info!("request completed");
                }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
}
