use std::io::Cursor;

use super::ExportError;
use crate::models::sale::Sale;

pub const XLSX_FILENAME: &str = "ventes.xlsx";
pub const SHEET_NAME: &str = "Ventes";

const COLUMNS: [&str; 6] = ["id", "produit", "quantite", "prix_unitaire", "total", "date"];

/// Single-sheet workbook with every sale column, rows in the given order
pub fn render_sales_xlsx(sales: &[Sale]) -> Result<Vec<u8>, ExportError> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(SHEET_NAME)
        .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.get_cell_mut((col as u32 + 1, 1u32)).set_value(*name);
    }

    for (i, sale) in sales.iter().enumerate() {
        let row = i as u32 + 2;
        sheet.get_cell_mut((1u32, row)).set_value_number(sale.id as f64);
        sheet.get_cell_mut((2u32, row)).set_value(sale.product.as_str());
        sheet.get_cell_mut((3u32, row)).set_value_number(sale.quantity as f64);
        sheet.get_cell_mut((4u32, row)).set_value_number(sale.unit_price);
        sheet.get_cell_mut((5u32, row)).set_value_number(sale.total);
        sheet.get_cell_mut((6u32, row)).set_value(sale.date.as_str());
    }

    let mut buffer = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer)
        .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_holds_one_row_per_sale() {
        let sales = vec![
            Sale {
                id: 7,
                product: "Savon".into(),
                quantity: 3,
                unit_price: 500.0,
                total: 1500.0,
                date: "2024-05-02 10:00:00".into(),
            },
            Sale {
                id: 3,
                product: "Riz".into(),
                quantity: 1,
                unit_price: 800.0,
                total: 800.0,
                date: "2024-05-01 09:00:00".into(),
            },
        ];

        let bytes = render_sales_xlsx(&sales).unwrap();
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
        let sheet = book.get_sheet_by_name(SHEET_NAME).unwrap();

        assert_eq!(sheet.get_value((1u32, 1u32)), "id");
        assert_eq!(sheet.get_value((6u32, 1u32)), "date");
        assert_eq!(sheet.get_value((1u32, 2u32)), "7");
        assert_eq!(sheet.get_value((2u32, 2u32)), "Savon");
        assert_eq!(sheet.get_value((5u32, 2u32)), "1500");
        assert_eq!(sheet.get_value((2u32, 3u32)), "Riz");
        assert_eq!(sheet.get_value((1u32, 4u32)), "");
    }
}
