//! User account handlers: register, login, list, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};

use pantry_core::{CoreError, LoginRequest, MessageResponse, RegisterRequest, User};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let new_user = body.validate()?;
    let user = state.db.users().create(&new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/login
///
/// Unknown username and wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    let credentials = body
        .validate()
        .map_err(|_| ApiError::bad_request("Missing username or password"))?;

    match state.db.users().authenticate(&credentials).await? {
        Some(user) => {
            info!(id = user.id, username = %user.username, "User logged in");
            Ok(Json(user))
        }
        None => {
            warn!(username = %credentials.username, "Rejected login");
            Err(CoreError::InvalidCredentials.into())
        }
    }
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.db.users().list().await?))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.users().delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
