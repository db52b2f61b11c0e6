//! # Request Validation
//!
//! Checks applied after a body has been parsed as JSON and before anything
//! is written.
//!
//! ```text
//!   axum extractor        malformed JSON, wrong JSON types        (pantry-api)
//!        │
//!        ▼
//!   this module           blank or absent fields, quantity 1..=999,
//!        │                price finite and not negative
//!        ▼
//!   SQLite schema         NOT NULL, UNIQUE(username), UNIQUE(email)
//! ```
//!
//! ## Usage
//! ```rust
//! use pantry_core::validation::{validate_quantity, RequiredFields};
//!
//! let mut required = RequiredFields::default();
//! let name = required.text("name", Some("Milk".to_string()));
//! required.finish().unwrap();
//! assert_eq!(name, "Milk");
//!
//! assert!(validate_quantity(2).is_ok());
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Required Fields
// =============================================================================

/// Collects every missing field of a request before failing.
///
/// Values are taken out as they are checked; a missing value yields a
/// placeholder that must not be used unless [`RequiredFields::finish`]
/// returned `Ok`.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<String>,
}

impl RequiredFields {
    /// Takes a required text field. Blank strings count as missing.
    pub fn text(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.missing.push(field.to_string());
                String::new()
            }
        }
    }

    /// Takes a required non-text field.
    pub fn value<T: Default>(&mut self, field: &str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.missing.push(field.to_string());
            T::default()
        })
    }

    /// Fails with [`ValidationError::MissingFields`] if anything was missing.
    pub fn finish(self) -> ValidationResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                fields: self.missing,
            })
        }
    }
}

// =============================================================================
// Quantity and Price
// =============================================================================

/// Quantity of a list item: `1..=MAX_ITEM_QUANTITY`.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if (1..=MAX_ITEM_QUANTITY).contains(&qty) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "quantity".into(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        })
    }
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (free items), negatives are not
///
/// ## Example
/// ```rust
/// use pantry_core::validation::validate_price;
///
/// assert!(validate_price(1.99).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
