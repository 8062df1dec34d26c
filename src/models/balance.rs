use serde::Serialize;

/// Revenue and cost for today and for the current month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Balance {
    pub day: String,
    pub sales_day: f64,
    pub purchases_day: f64,
    pub sales_month: f64,
    pub purchases_month: f64,
}

impl Balance {
    pub fn profit_day(&self) -> f64 {
        self.sales_day - self.purchases_day
    }

    pub fn profit_month(&self) -> f64 {
        self.sales_month - self.purchases_month
    }
}
