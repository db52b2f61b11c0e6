//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! Listing joins each product to its store so the catalog shows where an
//! item is stocked. It is an inner join: a product whose `store_id` matches
//! no store row is left out of the listing, though it still exists.

use sqlx::SqlitePool;
use tracing::{debug, info};

use pantry_core::{NewProduct, Product, ProductListing};

use crate::error::{DbError, DbResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let catalog = repo.list().await?;
/// let milk = repo.create(&new_product).await?;
/// repo.delete(milk.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the catalog with store names, ordered by product id.
    pub async fn list(&self) -> DbResult<Vec<ProductListing>> {
        let products = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT
                p.id,
                p.name,
                p.category,
                p.price,
                p.store_id,
                p.location,
                p.aisle,
                p.shelf,
                s.name AS store_name
            FROM products p
            JOIN stores s ON s.id = p.store_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by id.
    #[cfg(test)]
    pub(crate) async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price, store_id, location, aisle, shelf
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product. `store_id` is stored as given.
    pub async fn create(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, store_id = product.store_id, "Creating product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, category, price, store_id, location, aisle, shelf)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.store_id)
        .bind(&product.location)
        .bind(&product.aisle)
        .bind(&product.shelf)
        .execute(&self.pool)
        .await?;

        let created = Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            store_id: product.store_id,
            location: product.location.clone(),
            aisle: product.aisle.clone(),
            shelf: product.shelf.clone(),
        };

        info!(id = created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// Deletes a product by id.
    ///
    /// List items that referenced it keep their `product_id`.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        info!(id, "Product deleted");
        Ok(())
    }

    /// Counts catalog rows.
    #[cfg(test)]
    pub(crate) async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::seed::demo_stores;

    fn milk(store_id: i64) -> NewProduct {
        NewProduct {
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            price: 2.5,
            store_id,
            location: "Dairy Section".to_string(),
            aisle: "D1".to_string(),
            shelf: "S1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_with_store_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.stores().insert(&demo_stores()[0]).await.unwrap();

        let created = db.products().create(&milk(store.id)).await.unwrap();
        assert_eq!(created.price, 2.5);

        let listed = db.products().list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].store_name, "SuperFresh Market");
    }

    #[tokio::test]
    async fn test_product_with_unknown_store_is_stored_but_unlisted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.products().create(&milk(999)).await.unwrap();

        assert!(db.products().list().await.unwrap().is_empty());
        assert_eq!(db.products().count().await.unwrap(), 1);
        assert_eq!(
            db.products().get_by_id(created.id).await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let created = db.products().create(&milk(1)).await.unwrap();

        db.products().delete(created.id).await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 0);

        match db.products().delete(created.id).await {
            Err(DbError::NotFound { entity, .. }) => assert_eq!(entity, "Product"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
