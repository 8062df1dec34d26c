use serde::Serialize;
use sqlx::FromRow;

/// Catalog entry. Sales and purchases refer to it by name only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
}
