//! # pantry-api: REST Server for Pantry
//!
//! Axum routes over [`pantry_db::Database`].
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CorsLayer (any origin) ─► TraceLayer ─► DefaultBodyLimit              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  /api/* router ─► handler (routes::*)                                  │
//! │       │            │                                                    │
//! │       │            ├── ApiJson / ApiPath / ApiQuery (400 on rejection)  │
//! │       │            ├── request.validate()  (pantry-core)                │
//! │       │            └── state.db.<repo>()   (pantry-db)                  │
//! │       ▼                                                                 │
//! │  JSON body, or {"error": "..."} via ApiError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pantry_db::Database;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ApiConfig,
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    let api = Router::new()
        // Health
        .route("/health", get(routes::health::health))
        // Users
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login))
        .route("/users", get(routes::users::list_users))
        .route("/users/{id}", delete(routes::users::delete_user))
        // Catalog
        .route(
            "/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route("/products/{id}", delete(routes::products::delete_product))
        .route("/stores", get(routes::stores::list_stores))
        // Shopping lists
        .route(
            "/shopping-lists",
            get(routes::shopping_lists::list_shopping_lists)
                .post(routes::shopping_lists::create_shopping_list),
        )
        .route(
            "/shopping-lists/{list_id}/items",
            post(routes::shopping_lists::add_item),
        )
        .route(
            "/shopping-lists/{list_id}/items/{item_id}",
            put(routes::shopping_lists::update_item),
        );

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
