//! # Request Models
//!
//! Bodies accepted by the REST API and the validated models built from them.
//!
//! ## Why Option Everywhere?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON body ──serde──► RegisterRequest { username: Option<String>, .. } │
//! │                              │                                          │
//! │                              ▼ validate()                               │
//! │                       NewUser { username: String, .. }                  │
//! │                                                                         │
//! │  A missing key must become a 400 naming the field, not a serde         │
//! │  rejection, so every body field is optional at the wire level and      │
//! │  required-ness is decided here.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{validate_price, validate_quantity, RequiredFields, ValidationResult};
use crate::error::ValidationError;
use crate::DEFAULT_ITEM_QUANTITY;

// =============================================================================
// Users
// =============================================================================

/// `POST /api/register` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A validated registration. The password is still plaintext here.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl RegisterRequest {
    pub fn validate(self) -> ValidationResult<NewUser> {
        let mut required = RequiredFields::default();
        let username = required.text("username", self.username);
        let password = required.text("password", self.password);
        let email = required.text("email", self.email);
        let first_name = required.text("firstName", self.first_name);
        let last_name = required.text("lastName", self.last_name);
        required.finish()?;

        Ok(NewUser {
            username,
            password,
            email,
            first_name,
            last_name,
        })
    }
}

/// `POST /api/login` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated login input.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginRequest {
    pub fn validate(self) -> ValidationResult<Credentials> {
        let mut required = RequiredFields::default();
        let username = required.text("username", self.username);
        let password = required.text("password", self.password);
        required.finish()?;

        Ok(Credentials { username, password })
    }
}

// =============================================================================
// Products
// =============================================================================

/// `POST /api/products` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub store_id: Option<i64>,
    pub location: Option<String>,
    pub aisle: Option<String>,
    pub shelf: Option<String>,
}

/// A validated product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub store_id: i64,
    pub location: String,
    pub aisle: String,
    pub shelf: String,
}

impl CreateProductRequest {
    pub fn validate(self) -> ValidationResult<NewProduct> {
        let mut required = RequiredFields::default();
        let name = required.text("name", self.name);
        let category = required.text("category", self.category);
        let price = required.value("price", self.price);
        let store_id = required.value("storeId", self.store_id);
        let location = required.text("location", self.location);
        let aisle = required.text("aisle", self.aisle);
        let shelf = required.text("shelf", self.shelf);
        required.finish()?;

        validate_price(price)?;

        Ok(NewProduct {
            name,
            category,
            price,
            store_id,
            location,
            aisle,
            shelf,
        })
    }
}

// =============================================================================
// Shopping Lists
// =============================================================================

/// One item, either inline in `POST /api/shopping-lists` or the body of
/// `POST /api/shopping-lists/{listId}/items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
}

/// A validated item. `purchased` always starts out false.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListItem {
    pub product_id: Option<i64>,
    pub name: String,
    pub category: String,
    pub quantity: i64,
}

impl ListItemRequest {
    pub fn validate(self) -> ValidationResult<NewListItem> {
        self.validate_as("")
    }

    /// Validates with field names prefixed, e.g. `items[2].name`.
    fn validate_as(self, prefix: &str) -> ValidationResult<NewListItem> {
        let mut required = RequiredFields::default();
        let name = required.text(&format!("{prefix}name"), self.name);
        let category = required.text(&format!("{prefix}category"), self.category);
        required.finish()?;

        let quantity = self.quantity.unwrap_or(DEFAULT_ITEM_QUANTITY);
        validate_quantity(quantity)?;

        Ok(NewListItem {
            product_id: self.product_id,
            name,
            category,
            quantity,
        })
    }
}

/// `POST /api/shopping-lists` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateShoppingListRequest {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub items: Option<Vec<ListItemRequest>>,
}

/// A validated list with its initial items, written in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShoppingList {
    pub user_id: i64,
    pub name: String,
    pub items: Vec<NewListItem>,
}

impl CreateShoppingListRequest {
    pub fn validate(self) -> ValidationResult<NewShoppingList> {
        let mut required = RequiredFields::default();
        let user_id = required.value("userId", self.user_id);
        let name = required.text("name", self.name);
        required.finish()?;

        let items = self
            .items
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(idx, item)| item.validate_as(&format!("items[{idx}].")))
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(NewShoppingList {
            user_id,
            name,
            items,
        })
    }
}

/// `PUT /api/shopping-lists/{listId}/items/{itemId}` body.
///
/// An explicit JSON `null` is treated the same as an absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateListItemRequest {
    pub quantity: Option<i64>,
    pub purchased: Option<bool>,
}

/// The fields a partial item update touches.
///
/// Each variant maps to one fixed UPDATE statement in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUpdate {
    Quantity(i64),
    Purchased(bool),
    QuantityAndPurchased { quantity: i64, purchased: bool },
}

impl UpdateListItemRequest {
    pub fn validate(self) -> ValidationResult<ItemUpdate> {
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }

        match (self.quantity, self.purchased) {
            (Some(quantity), Some(purchased)) => Ok(ItemUpdate::QuantityAndPurchased {
                quantity,
                purchased,
            }),
            (Some(quantity), None) => Ok(ItemUpdate::Quantity(quantity)),
            (None, Some(purchased)) => Ok(ItemUpdate::Purchased(purchased)),
            (None, None) => Err(ValidationError::NothingToUpdate),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_requires_all_fields() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "username": "alice",
            "password": "pw1",
            "email": "a@x.com"
        }))
        .unwrap();

        let err = request.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields {
                fields: vec!["firstName".to_string(), "lastName".to_string()],
            }
        );
    }

    #[test]
    fn test_register_valid() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "username": "alice",
            "password": "pw1",
            "email": "a@x.com",
            "firstName": "A",
            "lastName": "L"
        }))
        .unwrap();

        let user = request.validate().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.first_name, "A");
        assert!(!format!("{user:?}").contains("pw1"));
    }

    #[test]
    fn test_login_blank_password_is_missing() {
        let request = LoginRequest {
            username: Some("muser".to_string()),
            password: Some(String::new()),
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::MissingFields { .. })
        ));
    }

    #[test]
    fn test_product_negative_price_rejected() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "name": "Milk",
            "category": "Dairy",
            "price": -2.5,
            "storeId": 1,
            "location": "Dairy Section",
            "aisle": "D1",
            "shelf": "S1"
        }))
        .unwrap();

        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::Negative {
                field: "price".to_string()
            }
        );
    }

    #[test]
    fn test_list_item_defaults_quantity() {
        let item = ListItemRequest {
            name: Some("Milk".to_string()),
            category: Some("Dairy".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(item.quantity, 1);
        assert_eq!(item.product_id, None);
    }

    #[test]
    fn test_inline_item_errors_name_their_position() {
        let request: CreateShoppingListRequest = serde_json::from_value(json!({
            "userId": 1,
            "name": "Groceries",
            "items": [
                {"name": "Milk", "category": "Dairy"},
                {"name": "Bread"}
            ]
        }))
        .unwrap();

        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::MissingFields {
                fields: vec!["items[1].category".to_string()],
            }
        );
    }

    #[test]
    fn test_list_without_items() {
        let request: CreateShoppingListRequest =
            serde_json::from_value(json!({"userId": 1, "name": "Empty"})).unwrap();

        let list = request.validate().unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_update_variants() {
        let only_purchased: UpdateListItemRequest =
            serde_json::from_value(json!({"purchased": true})).unwrap();
        assert_eq!(only_purchased.validate(), Ok(ItemUpdate::Purchased(true)));

        let both: UpdateListItemRequest =
            serde_json::from_value(json!({"quantity": 4, "purchased": false})).unwrap();
        assert_eq!(
            both.validate(),
            Ok(ItemUpdate::QuantityAndPurchased {
                quantity: 4,
                purchased: false
            })
        );

        let empty: UpdateListItemRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.validate(), Err(ValidationError::NothingToUpdate));

        let nulls: UpdateListItemRequest =
            serde_json::from_value(json!({"quantity": null, "purchased": null})).unwrap();
        assert_eq!(nulls.validate(), Err(ValidationError::NothingToUpdate));
    }

    #[test]
    fn test_update_rejects_zero_quantity() {
        let request = UpdateListItemRequest {
            quantity: Some(0),
            purchased: None,
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
