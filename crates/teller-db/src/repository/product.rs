//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD (delete is a hard delete; past sales keep their rows)
//! - Low stock report
//!
//! ## Low Stock Report
//! ```text
//! threshold = 5
//!
//!  id │ name        │ quantity
//! ────┼─────────────┼─────────
//!   1 │ Stapler     │    12
//!   2 │ Toner       │     4   ← reported
//!   3 │ Paper A4    │     5
//!   4 │ Pens (box)  │     0   ← reported
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use teller_core::validation::{validate_price_cents, validate_stock_quantity};
use teller_core::{NewProduct, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product after validating it.
    ///
    /// The name is stored trimmed.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned id
    /// * `Err(DbError::Core)` - Validation failed, nothing written
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        product.validate()?;

        let name = product.name.trim();
        debug!(name = %name, quantity = product.quantity, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, quantity, price_cents)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name)
        .bind(product.quantity)
        .bind(product.price_cents)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            quantity: product.quantity,
            price_cents: product.price_cents,
        })
    }

    /// Sets the stock level and price of a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, quantity: i64, price_cents: i64) -> DbResult<()> {
        validate_stock_quantity(quantity)?;
        validate_price_cents(price_cents)?;

        debug!(id, quantity, price_cents, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                quantity = ?2,
                price_cents = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(price_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Sales that referenced it keep their rows with `product_id = NULL`.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists every product, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products whose quantity is strictly below `threshold`, ordered
    /// by id.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            WHERE quantity < ?1
            ORDER BY id
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        debug!(threshold, count = products.len(), "Low stock report");
        Ok(products)
    }

    /// Counts total products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
