use serde::Serialize;
use sqlx::FromRow;

/// Stored timestamp layout, also used for date-prefix matching.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Database sale model
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sale {
    pub id: i64,
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total: f64,
    pub date: String,
}

/// A validated sale, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl NewSale {
    pub fn total(&self) -> f64 {
        line_total(self.quantity, self.unit_price)
    }
}

/// Validated edit of an existing sale; the date comes from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleUpdate {
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub date: String,
}

impl SaleUpdate {
    pub fn total(&self) -> f64 {
        line_total(self.quantity, self.unit_price)
    }
}

/// Filtered sale listing with the sum of the displayed totals.
#[derive(Debug, Serialize)]
pub struct SaleListing {
    pub sales: Vec<Sale>,
    pub total: f64,
}

impl SaleListing {
    pub fn new(sales: Vec<Sale>) -> Self {
        let total = sales.iter().map(|s| s.total).sum();
        Self { sales, total }
    }
}

pub fn line_total(quantity: i64, unit_price: f64) -> f64 {
    quantity as f64 * unit_price
}
