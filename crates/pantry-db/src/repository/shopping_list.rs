//! # Shopping List Repository
//!
//! Lists and their items.
//!
//! ## Loading a User's Lists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Query 1: SELECT ... FROM shopping_lists WHERE user_id = ?             │
//! │  Query 2: SELECT ... FROM shopping_list_items                          │
//! │           WHERE list_id IN (SELECT id FROM shopping_lists              │
//! │                             WHERE user_id = ?)                         │
//! │                                                                         │
//! │  Items are grouped by list_id and attached in memory, so the cost is   │
//! │  two queries no matter how many lists the user has.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Item Addressing
//! An item is always addressed as `(list_id, item_id)`. An item id that
//! exists under a different list is treated as not found.
//!
//! ## Transactions
//! Creating a list with items, adding an item, and updating an item each
//! run in one transaction. A failure part-way leaves nothing behind.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use pantry_core::{ItemUpdate, NewListItem, NewShoppingList, ShoppingList, ShoppingListItem};

use crate::error::{DbError, DbResult};
use crate::repository::begin_write;

const LIST_ENTITY: &str = "Shopping list";
const ITEM_ENTITY: &str = "Shopping list item";

/// Repository for shopping list database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ShoppingListRepository::new(pool);
///
/// let list = repo.create(&new_list).await?;
/// let item = repo.add_item(list.id, &new_item).await?;
/// let item = repo.update_item(list.id, item.id, ItemUpdate::Purchased(true)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ShoppingListRepository {
    pool: SqlitePool,
}

impl ShoppingListRepository {
    /// Creates a new ShoppingListRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShoppingListRepository { pool }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Returns every list owned by `user_id`, each with its items.
    ///
    /// Lists and items are both ordered by id. An unknown user simply has
    /// no lists.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<ShoppingList>> {
        let mut lists = sqlx::query_as::<_, ShoppingList>(
            r#"
            SELECT id, user_id, name, created_at
            FROM shopping_lists
            WHERE user_id = ?1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        if lists.is_empty() {
            debug!(user_id, "User has no shopping lists");
            return Ok(lists);
        }

        let items = sqlx::query_as::<_, ShoppingListItem>(
            r#"
            SELECT id, list_id, product_id, name, category, quantity, purchased
            FROM shopping_list_items
            WHERE list_id IN (SELECT id FROM shopping_lists WHERE user_id = ?1)
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_list: HashMap<i64, Vec<ShoppingListItem>> = HashMap::new();
        for item in items {
            by_list.entry(item.list_id).or_default().push(item);
        }

        for list in &mut lists {
            list.items = by_list.remove(&list.id).unwrap_or_default();
        }

        debug!(user_id, lists = lists.len(), "Loaded shopping lists");
        Ok(lists)
    }

    /// Creates a list and its initial items in one transaction.
    ///
    /// The owner id is not checked against `users`.
    pub async fn create(&self, new_list: &NewShoppingList) -> DbResult<ShoppingList> {
        debug!(
            user_id = new_list.user_id,
            items = new_list.items.len(),
            "Creating shopping list"
        );

        let created_at = Utc::now();
        let mut tx = begin_write(&self.pool).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO shopping_lists (user_id, name, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(new_list.user_id)
        .bind(&new_list.name)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let list_id = result.last_insert_rowid();

        let mut items = Vec::with_capacity(new_list.items.len());
        for item in &new_list.items {
            items.push(insert_item(&mut tx, list_id, item).await?);
        }

        tx.commit().await?;

        info!(id = list_id, items = items.len(), "Shopping list created");

        Ok(ShoppingList {
            id: list_id,
            user_id: new_list.user_id,
            name: new_list.name.clone(),
            created_at: Some(created_at),
            items,
        })
    }

    /// Checks whether a list exists.
    pub async fn exists(&self, list_id: i64) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shopping_lists WHERE id = ?1)")
                .bind(list_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Appends an item to an existing list.
    ///
    /// ## Returns
    /// * `Ok(ShoppingListItem)` - The stored item, `purchased = false`
    /// * `Err(DbError::NotFound)` - No list with that id
    pub async fn add_item(&self, list_id: i64, item: &NewListItem) -> DbResult<ShoppingListItem> {
        let mut tx = begin_write(&self.pool).await?;

        let list_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shopping_lists WHERE id = ?1)")
                .bind(list_id)
                .fetch_one(&mut *tx)
                .await?;
        if !list_exists {
            return Err(DbError::not_found(LIST_ENTITY, list_id));
        }

        let created = insert_item(&mut tx, list_id, item).await?;
        tx.commit().await?;

        info!(list_id, id = created.id, "Item added to shopping list");
        Ok(created)
    }

    /// Checks whether `item_id` exists under `list_id`.
    pub async fn item_exists(&self, list_id: i64, item_id: i64) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM shopping_list_items WHERE id = ?1 AND list_id = ?2)",
        )
        .bind(item_id)
        .bind(list_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Gets one item scoped to its list.
    #[cfg(test)]
    pub(crate) async fn get_item(&self, list_id: i64, item_id: i64) -> DbResult<Option<ShoppingListItem>> {
        let mut conn = self.pool.acquire().await?;
        fetch_item(&mut conn, list_id, item_id).await
    }

    /// Applies a partial update and returns the item as stored afterwards.
    ///
    /// Fields not named by `update` keep their values.
    pub async fn update_item(
        &self,
        list_id: i64,
        item_id: i64,
        update: ItemUpdate,
    ) -> DbResult<ShoppingListItem> {
        debug!(list_id, item_id, ?update, "Updating shopping list item");

        let mut tx = begin_write(&self.pool).await?;

        let result = match update {
            ItemUpdate::Quantity(quantity) => {
                sqlx::query(
                    "UPDATE shopping_list_items SET quantity = ?1 WHERE id = ?2 AND list_id = ?3",
                )
                .bind(quantity)
                .bind(item_id)
                .bind(list_id)
                .execute(&mut *tx)
                .await?
            }
            ItemUpdate::Purchased(purchased) => {
                sqlx::query(
                    "UPDATE shopping_list_items SET purchased = ?1 WHERE id = ?2 AND list_id = ?3",
                )
                .bind(purchased)
                .bind(item_id)
                .bind(list_id)
                .execute(&mut *tx)
                .await?
            }
            ItemUpdate::QuantityAndPurchased {
                quantity,
                purchased,
            } => {
                sqlx::query(
                    r#"
                    UPDATE shopping_list_items
                    SET quantity = ?1, purchased = ?2
                    WHERE id = ?3 AND list_id = ?4
                    "#,
                )
                .bind(quantity)
                .bind(purchased)
                .bind(item_id)
                .bind(list_id)
                .execute(&mut *tx)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ITEM_ENTITY, item_id));
        }

        let item = fetch_item(&mut tx, list_id, item_id)
            .await?
            .ok_or_else(|| DbError::not_found(ITEM_ENTITY, item_id))?;

        tx.commit().await?;

        info!(list_id, id = item_id, "Shopping list item updated");
        Ok(item)
    }
}

// =============================================================================
// Connection-level helpers (usable inside a transaction)
// =============================================================================

async fn insert_item(
    conn: &mut SqliteConnection,
    list_id: i64,
    item: &NewListItem,
) -> DbResult<ShoppingListItem> {
    let result = sqlx::query(
        r#"
        INSERT INTO shopping_list_items (list_id, product_id, name, category, quantity, purchased)
        VALUES (?1, ?2, ?3, ?4, ?5, 0)
        "#,
    )
    .bind(list_id)
    .bind(item.product_id)
    .bind(&item.name)
    .bind(&item.category)
    .bind(item.quantity)
    .execute(&mut *conn)
    .await?;

    Ok(ShoppingListItem {
        id: result.last_insert_rowid(),
        list_id,
        product_id: item.product_id,
        name: item.name.clone(),
        category: item.category.clone(),
        quantity: item.quantity,
        purchased: false,
    })
}

async fn fetch_item(
    conn: &mut SqliteConnection,
    list_id: i64,
    item_id: i64,
) -> DbResult<Option<ShoppingListItem>> {
    let item = sqlx::query_as::<_, ShoppingListItem>(
        r#"
        SELECT id, list_id, product_id, name, category, quantity, purchased
        FROM shopping_list_items
        WHERE id = ?1 AND list_id = ?2
        "#,
    )
    .bind(item_id)
    .bind(list_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn item(name: &str, category: &str, quantity: i64) -> NewListItem {
        NewListItem {
            product_id: None,
            name: name.to_string(),
            category: category.to_string(),
            quantity,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_with_items() {
        let db = db().await;
        let list = db
            .shopping_lists()
            .create(&NewShoppingList {
                user_id: 1,
                name: "Weekly".to_string(),
                items: vec![item("Milk", "Dairy", 2), item("Bread", "Bakery", 1)],
            })
            .await
            .unwrap();

        assert!(list.created_at.is_some());
        assert_eq!(list.items.len(), 2);
        assert!(list.items.iter().all(|i| i.list_id == list.id && !i.purchased));

        let loaded = db.shopping_lists().list_for_user(1).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].items, list.items);
        assert_eq!(loaded[0].name, "Weekly");
    }

    #[tokio::test]
    async fn test_items_grouped_per_list() {
        let db = db().await;
        let repo = db.shopping_lists();

        let a = repo
            .create(&NewShoppingList {
                user_id: 1,
                name: "A".to_string(),
                items: vec![item("Milk", "Dairy", 1)],
            })
            .await
            .unwrap();
        let b = repo
            .create(&NewShoppingList {
                user_id: 1,
                name: "B".to_string(),
                items: vec![],
            })
            .await
            .unwrap();
        repo.create(&NewShoppingList {
            user_id: 2,
            name: "Someone else's".to_string(),
            items: vec![item("Soap", "Household", 1)],
        })
        .await
        .unwrap();
        repo.add_item(b.id, &item("Eggs", "Dairy", 12)).await.unwrap();

        let lists = repo.list_for_user(1).await.unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].id, a.id);
        assert_eq!(lists[0].items.len(), 1);
        assert_eq!(lists[1].items.len(), 1);
        assert_eq!(lists[1].items[0].name, "Eggs");

        assert!(repo.list_for_user(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_to_missing_list() {
        let db = db().await;
        match db.shopping_lists().add_item(999, &item("Milk", "Dairy", 1)).await {
            Err(DbError::NotFound { entity, .. }) => assert_eq!(entity, "Shopping list"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_item_variants() {
        let db = db().await;
        let repo = db.shopping_lists();
        let list = repo
            .create(&NewShoppingList {
                user_id: 1,
                name: "Weekly".to_string(),
                items: vec![item("Milk", "Dairy", 2)],
            })
            .await
            .unwrap();
        let item_id = list.items[0].id;

        let updated = repo
            .update_item(list.id, item_id, ItemUpdate::Purchased(true))
            .await
            .unwrap();
        assert!(updated.purchased);
        assert_eq!(updated.quantity, 2);

        let updated = repo
            .update_item(list.id, item_id, ItemUpdate::Quantity(5))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 5);
        assert!(updated.purchased);

        let updated = repo
            .update_item(
                list.id,
                item_id,
                ItemUpdate::QuantityAndPurchased {
                    quantity: 3,
                    purchased: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert!(!updated.purchased);
        assert_eq!(repo.get_item(list.id, item_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_item_scoped_to_its_list() {
        let db = db().await;
        let repo = db.shopping_lists();
        let first = repo
            .create(&NewShoppingList {
                user_id: 1,
                name: "First".to_string(),
                items: vec![item("Milk", "Dairy", 1)],
            })
            .await
            .unwrap();
        let second = repo
            .create(&NewShoppingList {
                user_id: 1,
                name: "Second".to_string(),
                items: vec![],
            })
            .await
            .unwrap();
        let item_id = first.items[0].id;

        assert!(repo.item_exists(first.id, item_id).await.unwrap());
        assert!(!repo.item_exists(second.id, item_id).await.unwrap());
        assert!(matches!(
            repo.update_item(second.id, item_id, ItemUpdate::Purchased(true))
                .await,
            Err(DbError::NotFound { .. })
        ));

        let untouched = repo.get_item(first.id, item_id).await.unwrap().unwrap();
        assert!(!untouched.purchased);
    }
}
