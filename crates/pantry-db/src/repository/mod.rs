//! # Repository Module
//!
//! Database repository implementations for Pantry.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.shopping_lists().add_item(list_id, &item)            │
//! │       ▼                                                                 │
//! │  ShoppingListRepository                                                │
//! │  ├── list_for_user(&self, user_id)                                     │
//! │  ├── create(&self, list)                                               │
//! │  ├── add_item(&self, list_id, item)                                    │
//! │  └── update_item(&self, list_id, item_id, update)                      │
//! │       │                                                                 │
//! │       │  SQL (query_as + bind, never string-built values)              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`] - Registration, login, deletion
//! - [`ProductRepository`] - Catalog listing, create, delete
//! - [`StoreRepository`] - Store listing and seeding
//! - [`ShoppingListRepository`] - Lists and their items
//!
//! ## Write Transactions
//! Every transaction that writes starts with `BEGIN IMMEDIATE` via
//! [`begin_write`]. In WAL mode a deferred transaction that has already read
//! cannot be upgraded to a writer after another connection commits; SQLite
//! returns `SQLITE_BUSY` without consulting the busy timeout.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbResult;

pub mod product;
pub mod shopping_list;
pub mod store;
pub mod user;

pub use product::ProductRepository;
pub use shopping_list::ShoppingListRepository;
pub use store::{NewStore, StoreRepository};
pub use user::UserRepository;

/// Opens a transaction holding SQLite's write lock from the start.
pub(crate) async fn begin_write(pool: &SqlitePool) -> DbResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
