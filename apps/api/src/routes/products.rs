//! Catalog handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use pantry_core::{CreateProductRequest, MessageResponse, Product, ProductListing};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductListing>>, ApiError> {
    Ok(Json(state.db.products().list().await?))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = body.validate()?;
    let created = state.db.products().create(&product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.products().delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
