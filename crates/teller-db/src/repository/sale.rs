//! # Sale Repository
//!
//! Database operations for sales.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record(product_id, qty)                           │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │   ├── SELECT product            → missing?      NotFound, ROLLBACK     │
//! │   ├── product.check_sale(qty)   → qty <= 0?     Validation, ROLLBACK   │
//! │   │                             → qty > stock?  InsufficientStock      │
//! │   ├── UPDATE products SET quantity = quantity - qty                    │
//! │   └── INSERT INTO sales (total = qty × price at this moment)           │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Either both writes happen or neither does.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use teller_core::{CoreError, Product, Sale, SaleSummaryLine};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale of `quantity` units and decrements stock.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - Sale stored, stock decremented
    /// * `Err(DbError::NotFound)` - No such product
    /// * `Err(DbError::Core(InsufficientStock))` - Not enough on hand
    /// * `Err(DbError::Core(Validation))` - Quantity not positive
    ///
    /// Stock is unchanged on every error.
    pub async fn record(&self, product_id: i64, quantity: i64) -> DbResult<Sale> {
        debug!(product_id, quantity, "Recording sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", product_id))?;

        let total = product.check_sale(quantity)?;

        // The guard repeats the stock check inside the write
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(CoreError::InsufficientStock {
                product_id,
                available: product.quantity,
                requested: quantity,
            }
            .into());
        }

        let date = Utc::now();
        let inserted = sqlx::query(
            r#"
            INSERT INTO sales (product_id, quantity, total_price_cents, date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(total.cents())
        .bind(date)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            product_id,
            quantity,
            total = %total,
            "Sale recorded"
        );

        Ok(Sale {
            id: inserted.last_insert_rowid(),
            product_id: Some(product_id),
            quantity,
            total_price_cents: total.cents(),
            date,
        })
    }

    /// Lists every sale, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, total_price_cents, date
            FROM sales
            ORDER BY date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Sales joined to their product names, oldest first.
    ///
    /// Sales of deleted products are included with `product_name = None`.
    pub async fn summary(&self) -> DbResult<Vec<SaleSummaryLine>> {
        let lines = sqlx::query_as::<_, SaleSummaryLine>(
            r#"
            SELECT
                s.id AS sale_id,
                p.name AS product_name,
                s.quantity,
                s.total_price_cents,
                s.date
            FROM sales s
            LEFT JOIN products p ON p.id = s.product_id
            ORDER BY s.date, s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use teller_core::{CoreError, Money, NewProduct, Product};

    async fn db_with_widget(quantity: i64, cents: i64) -> (Database, Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let widget = db
            .products()
            .insert(&NewProduct::new("Widget", quantity, Money::from_cents(cents)))
            .await
            .unwrap();
        (db, widget)
    }

    async fn stock_of(db: &Database, id: i64) -> i64 {
        db.products().get_by_id(id).await.unwrap().unwrap().quantity
    }

    #[tokio::test]
    async fn test_record_decrements_stock_and_prices_sale() {
        let (db, widget) = db_with_widget(10, 250).await;

        let sale = db.sales().record(widget.id, 4).await.unwrap();
        assert_eq!(sale.product_id, Some(widget.id));
        assert_eq!(sale.quantity, 4);
        assert_eq!(sale.total(), Money::from_cents(1_000));
        assert_eq!(stock_of(&db, widget.id).await, 6);

        // Selling the rest empties the stock
        db.sales().record(widget.id, 6).await.unwrap();
        assert_eq!(stock_of(&db, widget.id).await, 0);
        assert_eq!(db.sales().list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_record_over_stock_leaves_stock_unchanged() {
        let (db, widget) = db_with_widget(3, 250).await;

        let err = db.sales().record(widget.id, 5).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            })
        ));
        assert_eq!(stock_of(&db, widget.id).await, 3);
        assert!(db.sales().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_rejects_bad_quantity_and_unknown_product() {
        let (db, widget) = db_with_widget(3, 250).await;

        assert!(matches!(
            db.sales().record(widget.id, 0).await,
            Err(DbError::Core(CoreError::Validation(_)))
        ));
        assert!(matches!(
            db.sales().record(widget.id + 100, 1).await,
            Err(DbError::NotFound { .. })
        ));
        assert_eq!(stock_of(&db, widget.id).await, 3);
    }

    #[tokio::test]
    async fn test_price_change_does_not_rewrite_past_sales() {
        let (db, widget) = db_with_widget(10, 100).await;

        db.sales().record(widget.id, 2).await.unwrap();
        db.products().update(widget.id, 8, 500).await.unwrap();
        db.sales().record(widget.id, 1).await.unwrap();

        let totals: Vec<i64> = db
            .sales()
            .list()
            .await
            .unwrap()
            .iter()
            .map(|s| s.total_price_cents)
            .collect();
        assert_eq!(totals, vec![200, 500]);
    }

    #[tokio::test]
    async fn test_summary_joins_product_names() {
        let (db, widget) = db_with_widget(10, 250).await;
        let gadget = db
            .products()
            .insert(&NewProduct::new("Gadget", 5, Money::from_cents(1_000)))
            .await
            .unwrap();

        db.sales().record(widget.id, 1).await.unwrap();
        db.sales().record(gadget.id, 2).await.unwrap();

        let summary = db.sales().summary().await.unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].display_name(), "Widget");
        assert_eq!(summary[1].display_name(), "Gadget");
        assert_eq!(summary[1].total(), Money::from_cents(2_000));
    }

    #[tokio::test]
    async fn test_sales_survive_product_deletion() {
        let (db, widget) = db_with_widget(10, 250).await;
        db.sales().record(widget.id, 1).await.unwrap();

        db.products().delete(widget.id).await.unwrap();

        let sales = db.sales().list().await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product_id, None);

        let summary = db.sales().summary().await.unwrap();
        assert_eq!(summary[0].product_name, None);
        assert_eq!(summary[0].display_name(), "(deleted product)");
    }
}
