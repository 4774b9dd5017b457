//! HTTP surface of the customer auth API
//!
//! Only `/api/auth/*` is routed; everything else falls through to 404.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod extract;


pub use auth::auth_routes;
pub use extract::JsonBody;

/// Upper bound on a single request, bcrypt included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application router
///
/// Layers run top to bottom on the way in. The request id is assigned
/// before tracing starts so every span carries it, and is copied onto the
/// response on the way out.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api/auth", auth_routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors)
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}
