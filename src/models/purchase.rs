use serde::Serialize;
use sqlx::FromRow;

/// Database restocking model, the cost-side mirror of `Sale`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Purchase {
    pub id: i64,
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl NewPurchase {
    pub fn total(&self) -> f64 {
        super::sale::line_total(self.quantity, self.unit_price)
    }
}
