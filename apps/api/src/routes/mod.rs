//! Route handlers, one module per resource.
//!
//! - [`users`] - register, login, list, delete
//! - [`products`] - catalog list, create, delete
//! - [`stores`] - store list
//! - [`shopping_lists`] - lists and items
//! - [`health`] - liveness and database check

pub mod health;
pub mod products;
pub mod shopping_lists;
pub mod stores;
pub mod users;
