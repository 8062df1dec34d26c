use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use super::{
    purchase::NewPurchase,
    sale::{DATE_FORMAT, NewSale, SaleUpdate, line_total},
};

/// Rejected form input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("product name is required")]
    EmptyProduct,

    #[error("quantity '{0}' is not a whole number")]
    InvalidQuantity(String),

    #[error("quantity must not be negative")]
    NegativeQuantity,

    #[error("price '{0}' is not a number")]
    InvalidPrice(String),

    #[error("price must not be negative")]
    NegativePrice,

    #[error("date '{0}' is not a valid date and time")]
    InvalidDate(String),

    #[error("quantity times price is too large")]
    AmountTooLarge,
}

/// Upper bound on `quantity * unit_price`; stays exact as an `f64` and
/// leaves room to sum many lines in an `i64`.
pub const MAX_LINE_TOTAL: f64 = 1e15;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub recherche: String,
}

#[derive(Debug, Deserialize)]
pub struct SaleForm {
    #[serde(rename = "produit")]
    pub product: String,
    #[serde(rename = "quantite")]
    pub quantity: String,
    #[serde(rename = "prix_unitaire")]
    pub unit_price: String,
}

impl SaleForm {
    pub fn validate(&self) -> Result<NewSale, InputError> {
        let quantity = parse_quantity(&self.quantity)?;
        let unit_price = parse_price(&self.unit_price)?;
        check_line_total(quantity, unit_price)?;
        Ok(NewSale {
            product: parse_product(&self.product)?,
            quantity,
            unit_price,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EditSaleForm {
    #[serde(rename = "produit")]
    pub product: String,
    #[serde(rename = "quantite")]
    pub quantity: String,
    #[serde(rename = "prix_unitaire")]
    pub unit_price: String,
    pub date: String,
}

impl EditSaleForm {
    pub fn validate(&self) -> Result<SaleUpdate, InputError> {
        let quantity = parse_quantity(&self.quantity)?;
        let unit_price = parse_price(&self.unit_price)?;
        check_line_total(quantity, unit_price)?;
        Ok(SaleUpdate {
            product: parse_product(&self.product)?,
            quantity,
            unit_price,
            date: parse_date(&self.date)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PurchaseForm {
    #[serde(rename = "produit")]
    pub product: String,
    #[serde(rename = "quantite")]
    pub quantity: String,
    #[serde(rename = "prix_achat_unitaire")]
    pub unit_price: String,
}

impl PurchaseForm {
    pub fn validate(&self) -> Result<NewPurchase, InputError> {
        let quantity = parse_quantity(&self.quantity)?;
        let unit_price = parse_price(&self.unit_price)?;
        check_line_total(quantity, unit_price)?;
        Ok(NewPurchase {
            product: parse_product(&self.product)?,
            quantity,
            unit_price,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(rename = "nom", default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn parse_product(raw: &str) -> Result<String, InputError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(InputError::EmptyProduct);
    }
    Ok(name.to_string())
}

fn parse_quantity(raw: &str) -> Result<i64, InputError> {
    let quantity: i64 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidQuantity(raw.to_string()))?;
    if quantity < 0 {
        return Err(InputError::NegativeQuantity);
    }
    Ok(quantity)
}

fn parse_price(raw: &str) -> Result<f64, InputError> {
    // Accept a decimal comma as typed on French keyboards
    let price: f64 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| InputError::InvalidPrice(raw.to_string()))?;
    if !price.is_finite() {
        return Err(InputError::InvalidPrice(raw.to_string()));
    }
    if price < 0.0 {
        return Err(InputError::NegativePrice);
    }
    Ok(price)
}

fn check_line_total(quantity: i64, unit_price: f64) -> Result<(), InputError> {
    let total = line_total(quantity, unit_price);
    if !total.is_finite() || total > MAX_LINE_TOTAL {
        return Err(InputError::AmountTooLarge);
    }
    Ok(())
}

/// Normalizes the accepted date layouts to the stored one.
fn parse_date(raw: &str) -> Result<String, InputError> {
    const LAYOUTS: [&str; 4] = [
        DATE_FORMAT,
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    let trimmed = raw.trim();
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .ok_or_else(|| InputError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale_form(quantity: &str, price: &str) -> SaleForm {
        SaleForm {
            product: " Savon ".into(),
            quantity: quantity.into(),
            unit_price: price.into(),
        }
    }

    #[test]
    fn valid_sale_form() {
        let sale = sale_form("3", "500").validate().unwrap();
        assert_eq!(sale.product, "Savon");
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.unit_price, 500.0);
    }

    #[test]
    fn decimal_comma_is_accepted() {
        let sale = sale_form("2", "12,5").validate().unwrap();
        assert_eq!(sale.unit_price, 12.5);
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert_eq!(
            sale_form("abc", "500").validate(),
            Err(InputError::InvalidQuantity("abc".into()))
        );
        assert_eq!(
            sale_form("1", "cher").validate(),
            Err(InputError::InvalidPrice("cher".into()))
        );
        assert_eq!(
            sale_form("1.5", "10").validate(),
            Err(InputError::InvalidQuantity("1.5".into()))
        );
        assert!(matches!(
            sale_form("1", "NaN").validate(),
            Err(InputError::InvalidPrice(_))
        ));
    }

    #[test]
    fn negative_values_are_rejected() {
        assert_eq!(
            sale_form("-1", "10").validate(),
            Err(InputError::NegativeQuantity)
        );
        assert_eq!(
            sale_form("1", "-10").validate(),
            Err(InputError::NegativePrice)
        );
    }

    #[test]
    fn oversized_line_totals_are_rejected() {
        assert_eq!(
            sale_form("9000000000", "1000000000").validate(),
            Err(InputError::AmountTooLarge)
        );
        assert_eq!(
            sale_form("2", "1e308").validate(),
            Err(InputError::AmountTooLarge)
        );
        let purchase = PurchaseForm {
            product: "Riz".into(),
            quantity: "9223372036854775807".into(),
            unit_price: "2".into(),
        };
        assert_eq!(purchase.validate(), Err(InputError::AmountTooLarge));

        // Huge quantities are fine while the line stays small
        assert!(sale_form("9223372036854775807", "0").validate().is_ok());
        assert!(sale_form("1000", "1000000000000").validate().is_ok());
    }

    #[test]
    fn empty_product_is_rejected() {
        let form = SaleForm {
            product: "   ".into(),
            quantity: "1".into(),
            unit_price: "1".into(),
        };
        assert_eq!(form.validate(), Err(InputError::EmptyProduct));
    }

    #[test]
    fn edit_dates_are_normalized() {
        assert_eq!(parse_date("2024-05-01T09:30").unwrap(), "2024-05-01 09:30:00");
        assert_eq!(parse_date("2024-05-01 09:30").unwrap(), "2024-05-01 09:30:00");
        assert_eq!(
            parse_date("2024-05-01 09:30:15").unwrap(),
            "2024-05-01 09:30:15"
        );
        assert!(matches!(
            parse_date("hier"),
            Err(InputError::InvalidDate(_))
        ));
    }
}
