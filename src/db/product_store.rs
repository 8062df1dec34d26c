use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::product::Product,
};

/// Product catalog store
#[derive(Clone)]
pub struct ProductStore {
    pool: DbPool,
}

impl ProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All products ordered by name
    pub async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT id, name FROM products ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(products)
    }

    /// Product names only, for the sale and restocking forms
    pub async fn names(&self) -> Result<Vec<String>> {
        Ok(self.list().await?.into_iter().map(|p| p.name).collect())
    }

    /// Add a product. A taken name yields `AppError::AlreadyExists`.
    pub async fn add(&self, name: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO products (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_insert(e, format!("product '{}'", name)))?;

        Ok(result.last_insert_rowid())
    }

    /// Rename a product. Sales and purchases keep the old name.
    pub async fn rename(&self, id: i64, name: &str) -> Result<()> {
        let result = sqlx::query("UPDATE products SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_insert(e, format!("product '{}'", name)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Delete a product by ID, leaving historical records untouched
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
