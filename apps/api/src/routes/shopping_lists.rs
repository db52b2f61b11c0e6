//! # Shopping List Handlers
//!
//! ## Check Order
//! ```text
//! POST /api/shopping-lists/{listId}/items
//!   path id ─► list exists? (404) ─► body parses? (400) ─► fields valid? (400)
//!
//! PUT /api/shopping-lists/{listId}/items/{itemId}
//!   path ids ─► valid JSON? (400) ─► an object? (400) ─► fields typed? (400)
//!            ─► item under list? (404)
//!            ─► any field given / quantity in range? (400) ─► update
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use pantry_core::{
    CreateShoppingListRequest, ListItemRequest, ShoppingList, ShoppingListItem,
    UpdateListItemRequest, ValidationError,
};
use pantry_db::DbError;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

/// Query string of `GET /api/shopping-lists`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsQuery {
    pub user_id: Option<i64>,
}

/// GET /api/shopping-lists?userId=
pub async fn list_shopping_lists(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListsQuery>,
) -> Result<Json<Vec<ShoppingList>>, ApiError> {
    let user_id = query.user_id.ok_or_else(|| ValidationError::Required {
        field: "User ID".to_string(),
    })?;

    Ok(Json(state.db.shopping_lists().list_for_user(user_id).await?))
}

/// POST /api/shopping-lists
pub async fn create_shopping_list(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateShoppingListRequest>,
) -> Result<(StatusCode, Json<ShoppingList>), ApiError> {
    let new_list = body.validate()?;
    let list = state.db.shopping_lists().create(&new_list).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// POST /api/shopping-lists/{listId}/items
pub async fn add_item(
    State(state): State<AppState>,
    ApiPath(list_id): ApiPath<i64>,
    body: Result<ApiJson<ListItemRequest>, ApiError>,
) -> Result<(StatusCode, Json<ShoppingListItem>), ApiError> {
    let lists = state.db.shopping_lists();

    if !lists.exists(list_id).await? {
        return Err(DbError::not_found("Shopping list", list_id).into());
    }

    let ApiJson(body) = body?;
    let item = body.validate()?;

    let created = lists.add_item(list_id, &item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/shopping-lists/{listId}/items/{itemId}
pub async fn update_item(
    State(state): State<AppState>,
    ApiPath((list_id, item_id)): ApiPath<(i64, i64)>,
    body: Result<ApiJson<Value>, ApiError>,
) -> Result<Json<ShoppingListItem>, ApiError> {
    let ApiJson(body) = body?;
    let update = parse_item_update(body)?.validate();

    let lists = state.db.shopping_lists();
    if !lists.item_exists(list_id, item_id).await? {
        return Err(ApiError::not_found("Item not found in the specified list"));
    }

    match lists.update_item(list_id, item_id, update?).await {
        Ok(item) => Ok(Json(item)),
        Err(DbError::NotFound { .. }) => Err(ApiError::not_found("Item not found after update")),
        Err(e) => Err(e.into()),
    }
}

/// Decodes an update body in two steps so a JSON value that is not an object
/// gets its own message, while a wrongly typed field keeps the decode error.
fn parse_item_update(body: Value) -> Result<UpdateListItemRequest, ApiError> {
    if !body.is_object() {
        return Err(ApiError::bad_request("No data provided"));
    }

    serde_json::from_value(body).map_err(|e| {
        ApiError::bad_request(format!(
            "Failed to deserialize the JSON body into the target type: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_item_update() {
        let request = parse_item_update(json!({"quantity": 2})).unwrap();
        assert_eq!(request.quantity, Some(2));
        assert_eq!(request.purchased, None);

        for not_object in [json!("purchased"), json!([1, 2]), json!(null), json!(5)] {
            let err = parse_item_update(not_object).unwrap_err();
            assert_eq!(err.message, "No data provided");
        }

        let err = parse_item_update(json!({"quantity": "two"})).unwrap_err();
        assert!(err.message.starts_with("Failed to deserialize"));
        assert!(err.message.contains("invalid type"));
    }
}
