use chrono::NaiveDateTime;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::sale::{DATE_FORMAT, NewSale, Sale, SaleListing, SaleUpdate},
};

/// Sale store for database operations
#[derive(Clone)]
pub struct SaleStore {
    pool: DbPool,
}

impl SaleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All sales, newest first
    pub async fn list(&self) -> Result<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY date DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(sales)
    }

    /// Sales whose product or date contains `needle`, newest first.
    /// An empty needle returns every sale.
    pub async fn search(&self, needle: &str) -> Result<SaleListing> {
        if needle.is_empty() {
            return Ok(SaleListing::new(self.list().await?));
        }

        let pattern = format!("%{}%", needle);
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT * FROM sales
            WHERE product LIKE ? OR date LIKE ?
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(SaleListing::new(sales))
    }

    /// Get a sale by ID
    pub async fn get(&self, id: i64) -> Result<Sale> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound)?;

        Ok(sale)
    }

    /// Record a sale stamped with `at`
    pub async fn create(&self, sale: &NewSale, at: NaiveDateTime) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sales (product, quantity, unit_price, total, date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sale.product)
        .bind(sale.quantity)
        .bind(sale.unit_price)
        .bind(sale.total())
        .bind(at.format(DATE_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite every field of a sale, recomputing its total
    pub async fn update(&self, id: i64, sale: &SaleUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET product = ?, quantity = ?, unit_price = ?, total = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&sale.product)
        .bind(sale.quantity)
        .bind(sale.unit_price)
        .bind(sale.total())
        .bind(&sale.date)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Delete a sale by ID; deleting a missing sale is not an error
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
