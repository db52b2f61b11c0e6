//! # Seed Data
//!
//! Demo rows for a fresh database.
//!
//! - Demo users are inserted by [`ensure_demo_users`] on every startup,
//!   each only if its username is absent. They take ids 1 and 2 on a fresh
//!   database.
//! - Demo stores and products are inserted by the `seed` binary only.

use sqlx::SqlitePool;
use tracing::{debug, info};

use pantry_core::{NewProduct, Role};

use crate::error::DbResult;
use crate::password::hash_password;
use crate::repository::begin_write;
use crate::repository::store::NewStore;

/// A seed account; the plaintext password is hashed at insert time.
#[derive(Debug, Clone, Copy)]
pub struct DemoUser {
    pub username: &'static str,
    pub password: &'static str,
    pub email: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub role: Role,
}

/// Accounts present on every database.
pub const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "muser",
        password: "muser",
        email: "mockuser@example.com",
        first_name: "Mock",
        last_name: "User",
        role: Role::User,
    },
    DemoUser {
        username: "mvc",
        password: "mvc",
        email: "mockadmin@example.com",
        first_name: "Mock",
        last_name: "Admin",
        role: Role::Admin,
    },
];

/// Inserts each demo user whose username is not taken yet.
///
/// Returns how many were inserted. Runs in one transaction.
pub async fn ensure_demo_users(pool: &SqlitePool) -> DbResult<usize> {
    let mut tx = begin_write(pool).await?;
    let mut inserted = 0;

    for user in DEMO_USERS {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)")
                .bind(user.username)
                .fetch_one(&mut *tx)
                .await?;

        if exists {
            debug!(username = user.username, "Demo user already present");
            continue;
        }

        let hash = hash_password(user.password)?;

        sqlx::query(
            r#"
            INSERT INTO users (username, password, email, first_name, last_name, role)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user.username)
        .bind(hash)
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.role)
        .execute(&mut *tx)
        .await?;

        inserted += 1;
    }

    tx.commit().await?;

    if inserted > 0 {
        info!(inserted, "Seeded demo users");
    }

    Ok(inserted)
}

/// Demo store locations.
pub fn demo_stores() -> Vec<NewStore> {
    vec![
        NewStore {
            name: "SuperFresh Market".to_string(),
            address: "123 Main St, New York, NY 10001".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
            store_type: "supermarket".to_string(),
            image: Some("/placeholder.svg".to_string()),
        },
        NewStore {
            name: "MediCare Pharmacy".to_string(),
            address: "456 Park Ave, New York, NY 10002".to_string(),
            latitude: 40.7141,
            longitude: -74.0059,
            store_type: "pharmacy".to_string(),
            image: Some("/placeholder.svg".to_string()),
        },
        NewStore {
            name: "GreenGrocer".to_string(),
            address: "789 Broadway, New York, NY 10003".to_string(),
            latitude: 40.7135,
            longitude: -74.0046,
            store_type: "grocery".to_string(),
            image: Some("/placeholder.svg".to_string()),
        },
    ]
}

/// Demo catalog. `store_index` is the position in [`demo_stores`].
pub fn demo_products() -> Vec<(usize, NewProduct)> {
    let product = |name: &str, category: &str, price: f64, location: &str, aisle: &str, shelf: &str| {
        NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price,
            store_id: 0,
            location: location.to_string(),
            aisle: aisle.to_string(),
            shelf: shelf.to_string(),
        }
    };

    vec![
        (0, product("Organic Bananas", "Produce", 1.99, "Produce Section", "A1", "S2")),
        (0, product("Whole Grain Bread", "Bakery", 3.49, "Bakery Section", "B3", "S1")),
        (1, product("Ibuprofen", "Medicine", 8.99, "Pain Relief Section", "C2", "S4")),
        (1, product("Vitamin C Tablets", "Vitamins", 12.99, "Vitamin Section", "D1", "S3")),
        (2, product("Organic Apples", "Produce", 4.99, "Produce Section", "A2", "S1")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_demo_users_seeded_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Database::new already seeded; a second pass inserts nothing.
        let inserted = ensure_demo_users(db.pool()).await.unwrap();
        assert_eq!(inserted, 0);

        let users = db.users().list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].username, "muser");
        assert_eq!(users[0].role, Role::User);
        assert_eq!(users[1].username, "mvc");
        assert_eq!(users[1].role, Role::Admin);
    }

    #[test]
    fn test_demo_products_reference_demo_stores() {
        let stores = demo_stores();
        assert!(demo_products()
            .iter()
            .all(|(store_index, _)| *store_index < stores.len()));
    }
}
