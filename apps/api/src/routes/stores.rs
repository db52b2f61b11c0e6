use axum::extract::State;
use axum::Json;

use pantry_core::Store;

use crate::error::ApiError;
use crate::AppState;

/// GET /api/stores
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>, ApiError> {
    Ok(Json(state.db.stores().list().await?))
}
