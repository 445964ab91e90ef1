//! Router setup: routes, fallback and middleware.

use std::any::Any;

use axum::error_handling::HandleErrorLayer;
use axum::extract::OriginalUri;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;

/// Creates the full application router.
pub fn app(state: AppState) -> Router {
    with_layers(routes::routes(), state)
}

/// Wraps `router` with the 404 fallback, tracing, panic recovery and the
/// optional request timeout, then attaches `state`.
pub fn with_layers(router: Router<AppState>, state: AppState) -> Router {
    let router = router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    let router = match state.request_timeout {
        Some(timeout) => router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(timeout)),
        ),
        None => router,
    };

    router.with_state(state)
}

async fn not_found(uri: OriginalUri) -> ApiError {
    ApiError::not_found(format!("Not found: {}", uri.0.path()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::internal(format!("handler panicked: {detail}")).into_response()
}

async fn handle_timeout_error(_err: tower::BoxError) -> ApiError {
    ApiError::ServiceUnavailable {
        message: "Request timed out".to_string(),
    }
}
