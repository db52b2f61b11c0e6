//! # pantry-core: Domain Types for Pantry
//!
//! Types, request models and validation rules for the Pantry shopping-list
//! backend, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pantry Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Login ──► Shopping Lists ──► Catalog ──► Stores              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pantry-api (axum)                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pantry-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ requests  │  │ validation│                  │   │
//! │  │   │   User    │  │ Register  │  │ required  │                  │   │
//! │  │   │  Product  │  │ ItemUpdate│  │ quantity  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pantry-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities returned by the API (User, Product, ShoppingList, ...)
//! - [`requests`] - Request bodies and their validated counterparts
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use pantry_core::requests::{ItemUpdate, UpdateListItemRequest};
//!
//! let request = UpdateListItemRequest { quantity: None, purchased: Some(true) };
//! assert_eq!(request.validate().unwrap(), ItemUpdate::Purchased(true));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod requests;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use requests::*;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity given to a list item when the request omits one.
pub const DEFAULT_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity of a single list item.
///
/// Catches typos like 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
