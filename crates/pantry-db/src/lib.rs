//! # pantry-db: Database Layer for Pantry
//!
//! SQLite storage for users, stores, products and shopping lists, using
//! sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Pantry Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (pantry-api)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pantry-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  + seed.rs   │  │   │
//! │  │   │               │    │ UserRepo       │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │   │ 001_initial  │  │   │
//! │  │   │               │    │ StoreRepo      │   │ demo users   │  │   │
//! │  │   │               │    │ ShoppingList.. │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  database.db (single SQLite file)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migration
//! - [`seed`] - Demo users, stores and products
//! - [`password`] - argon2 password hashing
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pantry_db::{Database, DbConfig};
//!
//! // Opens the file, migrates, seeds demo users
//! let db = Database::new(DbConfig::new("database.db")).await?;
//!
//! let catalog = db.products().list().await?;
//! let lists = db.shopping_lists().list_for_user(1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::shopping_list::ShoppingListRepository;
pub use repository::store::{NewStore, StoreRepository};
pub use repository::user::UserRepository;
