//! # Domain Types
//!
//! Inventory rows shared by the store and the inventory shell.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │◄──│  product_id     │   │  id (rowid)     │       │
//! │  │  name           │   │  quantity       │   │  username       │       │
//! │  │  quantity       │   │  total_cents    │   │  password_hash  │       │
//! │  │  price_cents    │   │  date (UTC)     │   │  (never emitted)│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  NewProduct       - validated input for an insert                       │
//! │  SaleSummaryLine  - a sale joined to its product name                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` values. A sale keeps
//! its row when its product is deleted; `product_id` then becomes `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_price_cents, validate_product_name, validate_stock_quantity};

// =============================================================================
// Product
// =============================================================================

/// A product held in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Display name, also used in the sales summary.
    pub name: String,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Unit price in cents.
    pub price_cents: i64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the quantity is strictly below `threshold`.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }

    /// Checks a sale of `quantity` units against this product and returns
    /// the sale total.
    ///
    /// ## User Workflow
    /// ```text
    /// Record Sale: product 3, quantity 4
    ///      │
    ///      ▼
    /// check_sale(4)
    ///      │
    ///      ├── qty <= 0?          → Validation(MustBePositive)
    ///      ├── qty > on hand?     → InsufficientStock
    ///      └── OK                 → total = qty × price
    /// ```
    pub fn check_sale(&self, quantity: i64) -> CoreResult<Money> {
        crate::validation::validate_sale_quantity(quantity)?;

        if quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: self.id,
                available: self.quantity,
                requested: quantity,
            });
        }

        self.price()
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| {
                CoreError::Validation(crate::ValidationError::OutOfRange {
                    field: "sale total".to_string(),
                    min: 0,
                    max: i64::MAX,
                })
            })
    }
}

/// Input for a product insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price_cents: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, quantity: i64, price: Money) -> Self {
        NewProduct {
            name: name.into(),
            quantity,
            price_cents: price.cents(),
        }
    }

    /// Runs the field validators. The name is checked after trimming.
    pub fn validate(&self) -> CoreResult<()> {
        validate_product_name(&self.name)?;
        validate_stock_quantity(self.quantity)?;
        validate_price_cents(self.price_cents)?;
        Ok(())
    }
}

// =============================================================================
// User
// =============================================================================

/// An inventory operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,

    /// Argon2 PHC string. Never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Price is frozen into `total_price_cents` at sale time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// `None` once the product has been deleted.
    pub product_id: Option<i64>,

    pub quantity: i64,
    pub total_price_cents: i64,
    pub date: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// One row of the sales summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummaryLine {
    pub sale_id: i64,

    /// `None` when the product was deleted after the sale.
    pub product_name: Option<String>,

    pub quantity: i64,
    pub total_price_cents: i64,
    pub date: DateTime<Utc>,
}

impl SaleSummaryLine {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Product name for display.
    pub fn display_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or("(deleted product)")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn widget(quantity: i64, price_cents: i64) -> Product {
        Product {
            id: 3,
            name: "Widget".to_string(),
            quantity,
            price_cents,
        }
    }

    #[test]
    fn test_check_sale_computes_total() {
        let product = widget(10, 250);
        assert_eq!(product.check_sale(4).unwrap(), Money::from_cents(1_000));
        // Selling the entire stock is allowed
        assert_eq!(product.check_sale(10).unwrap(), Money::from_cents(2_500));
    }

    #[test]
    fn test_check_sale_rejects_over_stock() {
        let product = widget(3, 250);
        match product.check_sale(5) {
            Err(CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            }) => {
                assert_eq!(product_id, 3);
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn test_check_sale_rejects_non_positive_quantity() {
        let product = widget(3, 250);
        assert!(matches!(
            product.check_sale(0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(product.check_sale(-1).is_err());
    }

    #[test]
    fn test_low_stock_is_strict() {
        assert!(widget(4, 1).is_low_stock(5));
        assert!(!widget(5, 1).is_low_stock(5));
    }

    #[test]
    fn test_new_product_validation() {
        assert!(NewProduct::new("Pen", 10, Money::from_cents(99)).validate().is_ok());
        assert!(NewProduct::new("Free sample", 0, Money::zero()).validate().is_ok());
        assert!(NewProduct::new("   ", 10, Money::from_cents(99)).validate().is_err());
        assert!(NewProduct::new("Pen", -1, Money::from_cents(99)).validate().is_err());
        assert!(NewProduct::new("Pen", 1, Money::from_cents(-1)).validate().is_err());
    }

    #[test]
    fn test_user_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_summary_line_names_deleted_products() {
        let line = SaleSummaryLine {
            sale_id: 1,
            product_name: None,
            quantity: 2,
            total_price_cents: 500,
            date: Utc::now(),
        };
        assert_eq!(line.display_name(), "(deleted product)");
        assert_eq!(line.total(), Money::from_cents(500));
    }
}
