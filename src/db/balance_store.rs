use chrono::NaiveDate;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::balance::Balance,
};

/// Aggregates over the sales and purchases tables
#[derive(Clone)]
pub struct BalanceStore {
    pool: DbPool,
}

impl BalanceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Day and month totals around `today`, recomputed on every call
    pub async fn balance(&self, today: NaiveDate) -> Result<Balance> {
        let day = today.format("%Y-%m-%d").to_string();
        let month = today.format("%Y-%m").to_string();

        Ok(Balance {
            sales_day: self.sum("sales", &day).await?,
            sales_month: self.sum("sales", &month).await?,
            purchases_day: self.sum("purchases", &day).await?,
            purchases_month: self.sum("purchases", &month).await?,
            day,
        })
    }

    /// TOTAL() yields 0.0 rather than NULL on an empty selection
    async fn sum(&self, table: &'static str, prefix: &str) -> Result<f64> {
        let query = format!("SELECT TOTAL(total) FROM {} WHERE date LIKE ?", table);
        let (sum,): (f64,) = sqlx::query_as(&query)
            .bind(format!("{}%", prefix))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(sum)
    }
}
