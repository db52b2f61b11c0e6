//! # Store Repository
//!
//! Stores are read-only through the API; rows come from the `seed` binary.

use sqlx::SqlitePool;
use tracing::debug;

use pantry_core::Store;

use crate::error::DbResult;

/// A store row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub store_type: String,
    pub image: Option<String>,
}

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists all stores ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, name, address, latitude, longitude, type, image
            FROM stores
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = stores.len(), "Listed stores");
        Ok(stores)
    }

    /// Inserts a store.
    pub async fn insert(&self, store: &NewStore) -> DbResult<Store> {
        let result = sqlx::query(
            r#"
            INSERT INTO stores (name, address, latitude, longitude, type, image)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&store.name)
        .bind(&store.address)
        .bind(store.latitude)
        .bind(store.longitude)
        .bind(&store.store_type)
        .bind(&store.image)
        .execute(&self.pool)
        .await?;

        Ok(Store {
            id: result.last_insert_rowid(),
            name: store.name.clone(),
            address: store.address.clone(),
            latitude: store.latitude,
            longitude: store.longitude,
            store_type: store.store_type.clone(),
            image: store.image.clone(),
        })
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
