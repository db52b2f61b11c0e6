//! # Domain Types
//!
//! Entities returned by the Pantry API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  ShoppingList   │   │ ShoppingListItem│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  user_id        │◄──│  list_id        │       │
//! │  │  username       │   │  name           │   │  product_id?  ──┼──┐    │
//! │  │  role           │   │  created_at     │   │  quantity       │  │    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘  │    │
//! │                                                                    │    │
//! │  ┌─────────────────┐   ┌─────────────────┐                         │    │
//! │  │     Store       │◄──│    Product      │◄────────────────────────┘    │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  name, address  │   │  store_id       │                              │
//! │  │  lat / long     │   │  aisle, shelf   │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase keys (`firstName`, `storeId`, ...),
//! which is what the web frontend consumes. Ids are SQLite integer rowids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// Account role. New registrations are always `User`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Column value as stored in `users.role`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A user profile. The password hash never leaves the database layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

// =============================================================================
// Store
// =============================================================================

/// A physical store location. Stores are seed data; the API only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// "supermarket", "pharmacy", "grocery", ...
    #[serde(rename = "type")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub store_type: String,
    pub image: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product stocked at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Not checked against `stores` on insert.
    pub store_id: i64,
    pub location: String,
    pub aisle: String,
    pub shelf: String,
}

/// A product joined with the name of its store, as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub store_id: i64,
    pub location: String,
    pub aisle: String,
    pub shelf: String,
    pub store_name: String,
}

// =============================================================================
// Shopping List
// =============================================================================

/// A user's shopping list together with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<ShoppingListItem>,
}

/// A line on a shopping list.
///
/// `name` and `category` are denormalized so an item does not need a catalog
/// product behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: i64,
    pub list_id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub purchased: bool,
}

// =============================================================================
// Responses
// =============================================================================

/// Confirmation body for deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// `GET /api/health` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    pub version: String,
    /// Whether `SELECT 1` succeeded
    pub database: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: 3,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "L".to_string(),
            role: Role::User,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "username": "alice",
                "email": "a@x.com",
                "firstName": "A",
                "lastName": "L",
                "role": "user"
            })
        );
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_store_type_key() {
        let store = Store {
            id: 1,
            name: "GreenGrocer".to_string(),
            address: "789 Broadway".to_string(),
            latitude: 40.7135,
            longitude: -74.0046,
            store_type: "grocery".to_string(),
            image: None,
        };

        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(value["type"], "grocery");
        assert!(value["image"].is_null());
    }

    #[test]
    fn test_list_without_timestamp_serializes_null() {
        let list = ShoppingList {
            id: 1,
            user_id: 1,
            name: "Weekly".to_string(),
            created_at: None,
            items: vec![],
        };

        let value = serde_json::to_value(&list).unwrap();
        assert!(value["createdAt"].is_null());
        assert_eq!(value["items"], json!([]));
        assert_eq!(value["userId"], 1);
    }
}
