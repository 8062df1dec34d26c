//! Sales report exporters.
//!
//! Both builders are pure functions of the sales rows; handlers fetch the
//! rows and stream the bytes back.

pub mod pdf;
pub mod xlsx;

use thiserror::Error;

pub use pdf::{PDF_FILENAME, render_sales_pdf};
pub use xlsx::{XLSX_FILENAME, render_sales_xlsx};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF layout failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("spreadsheet serialization failed: {0}")]
    Spreadsheet(String),

    #[error("amount too large for the report")]
    AmountOutOfRange,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whole units with a space as thousands separator, e.g. `1 500`.
/// Fractions are dropped, not rounded.
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Unit prices keep their cents when they have any
pub fn format_price(value: f64) -> String {
    if value.fract() == 0.0 {
        format_amount(value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1500), "1 500");
        assert_eq!(format_amount(1234567), "1 234 567");
        assert_eq!(format_amount(-25000), "-25 000");
    }

    #[test]
    fn prices_keep_cents_only_when_present() {
        assert_eq!(format_price(500.0), "500");
        assert_eq!(format_price(12.5), "12.50");
    }
}
