//! Authentication routes
//!
//! Provides endpoints for customer registration and login.

use super::extract::JsonBody;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use pillpath_shared::types::{JwtResponse, LoginRequest, MessageResponse, RegisterRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new customer
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.customers().register(req).await?;
    Ok(Json(message))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Json<JwtResponse>> {
    let token = state.customers().login(req).await?;
    Ok(Json(token))
}
