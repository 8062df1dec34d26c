use chrono::NaiveDateTime;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::{
        purchase::{NewPurchase, Purchase},
        sale::DATE_FORMAT,
    },
};

/// Restocking store
#[derive(Clone)]
pub struct PurchaseStore {
    pool: DbPool,
}

impl PurchaseStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All purchases, newest first
    pub async fn list(&self) -> Result<Vec<Purchase>> {
        let purchases =
            sqlx::query_as::<_, Purchase>("SELECT * FROM purchases ORDER BY date DESC, id DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(purchases)
    }

    pub async fn create(&self, purchase: &NewPurchase, at: NaiveDateTime) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchases (product, quantity, unit_price, total, date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&purchase.product)
        .bind(purchase.quantity)
        .bind(purchase.unit_price)
        .bind(purchase.total())
        .bind(at.format(DATE_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.last_insert_rowid())
    }
}
