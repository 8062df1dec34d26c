use lopdf::{
    Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};

use super::{ExportError, format_amount, format_price};
use crate::models::sale::Sale;

pub const PDF_FILENAME: &str = "Bilan_ventes.pdf";

const TITLE: &str = "Bilan des Ventes";
const HEADER: [&str; 5] = ["Date", "Produit", "Quantité", "Prix unitaire", "Total (FCFA)"];

// A4 in points
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 56.69;

const FONT_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 18.0;
const ROW_HEIGHT: f32 = 16.0;
const CELL_PADDING: f32 = 3.0;
// Column proportions in cm: 3.5, 6, 3, 3.5, 3.5
const COLUMN_WEIGHTS: [f32; 5] = [3.5, 6.0, 3.0, 3.5, 3.5];

/// Text matrix of the report: header, one row per sale, then the total row
pub fn sales_table(sales: &[Sale]) -> Result<Vec<[String; 5]>, ExportError> {
    let mut table = vec![HEADER.map(String::from)];
    table.extend(body_rows(sales)?);
    Ok(table)
}

fn body_rows(sales: &[Sale]) -> Result<Vec<[String; 5]>, ExportError> {
    let mut rows = Vec::with_capacity(sales.len() + 1);
    let mut grand_total: i64 = 0;
    for sale in sales {
        let total = whole_units(sale.total).ok_or(ExportError::AmountOutOfRange)?;
        grand_total = grand_total
            .checked_add(total)
            .ok_or(ExportError::AmountOutOfRange)?;
        rows.push([
            sale.date.clone(),
            sale.product.clone(),
            sale.quantity.to_string(),
            format_price(sale.unit_price),
            format_amount(total),
        ]);
    }

    rows.push([
        String::new(),
        String::new(),
        String::new(),
        "Total :".to_string(),
        format_amount(grand_total),
    ]);
    Ok(rows)
}

/// Truncated to whole units; `None` when the value has no `i64` counterpart
fn whole_units(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63
    (value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64)
        .then(|| value as i64)
}

/// Lay the sales table out on as many A4 pages as needed.
/// The header row is repeated at the top of every page.
pub fn render_sales_pdf(sales: &[Sale]) -> Result<Vec<u8>, ExportError> {
    let header = HEADER.map(String::from);
    let body = body_rows(sales)?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let widths = column_widths();
    let table_top_first = PAGE_HEIGHT - MARGIN - TITLE_SIZE - 30.0;
    let table_top_next = PAGE_HEIGHT - MARGIN;

    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut remaining = body.as_slice();
    let mut first = true;
    loop {
        let top = if first { table_top_first } else { table_top_next };
        // One slot goes to the repeated header
        let capacity = (((top - MARGIN) / ROW_HEIGHT) as usize).saturating_sub(1).max(1);
        let take = capacity.min(remaining.len());
        let (chunk, rest) = remaining.split_at(take);

        let mut ops = Vec::new();
        if first {
            title_ops(&mut ops);
        }
        table_ops(&mut ops, top, &widths, &header, chunk);

        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);

        remaining = rest;
        first = false;
        if remaining.is_empty() {
            break;
        }
    }

    let count = page_ids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn column_widths() -> [f32; 5] {
    let available = PAGE_WIDTH - 2.0 * MARGIN;
    let sum: f32 = COLUMN_WEIGHTS.iter().sum();
    COLUMN_WEIGHTS.map(|w| w / sum * available)
}

fn title_ops(ops: &mut Vec<Operation>) {
    let width = approx_text_width(TITLE, TITLE_SIZE);
    let x = (PAGE_WIDTH - width) / 2.0;
    let y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;

    // #1E90FF
    ops.push(Operation::new(
        "rg",
        vec![(30.0_f32 / 255.0).into(), (144.0_f32 / 255.0).into(), 1.0_f32.into()],
    ));
    text_ops(ops, TITLE, x, y, TITLE_SIZE);
    ops.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));
}

fn table_ops(
    ops: &mut Vec<Operation>,
    top: f32,
    widths: &[f32; 5],
    header: &[String; 5],
    rows: &[[String; 5]],
) {
    let left = MARGIN;
    let table_width: f32 = widths.iter().sum();
    let row_count = rows.len() + 1;
    let bottom = top - row_count as f32 * ROW_HEIGHT;

    // Header background, light blue
    ops.push(Operation::new(
        "rg",
        vec![
            (173.0_f32 / 255.0).into(),
            (216.0_f32 / 255.0).into(),
            (230.0_f32 / 255.0).into(),
        ],
    ));
    ops.push(Operation::new(
        "re",
        vec![left.into(), (top - ROW_HEIGHT).into(), table_width.into(), ROW_HEIGHT.into()],
    ));
    ops.push(Operation::new("f", vec![]));

    // Header text in white, body in black
    ops.push(Operation::new("rg", vec![1.into(), 1.into(), 1.into()]));
    row_text_ops(ops, left, top, widths, header);
    ops.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));
    for (i, row) in rows.iter().enumerate() {
        row_text_ops(ops, left, top - (i + 1) as f32 * ROW_HEIGHT, widths, row);
    }

    // Inner grid
    ops.push(Operation::new("RG", vec![0.into(), 0.into(), 0.into()]));
    ops.push(Operation::new("w", vec![0.5_f32.into()]));
    for i in 1..row_count {
        let y = top - i as f32 * ROW_HEIGHT;
        line_ops(ops, left, y, left + table_width, y);
    }
    let mut x = left;
    for width in &widths[..widths.len() - 1] {
        x += width;
        line_ops(ops, x, top, x, bottom);
    }

    // Outer box
    ops.push(Operation::new("w", vec![1.into()]));
    ops.push(Operation::new(
        "re",
        vec![left.into(), bottom.into(), table_width.into(), (top - bottom).into()],
    ));
    ops.push(Operation::new("S", vec![]));
}

fn row_text_ops(
    ops: &mut Vec<Operation>,
    left: f32,
    row_top: f32,
    widths: &[f32; 5],
    cells: &[String; 5],
) {
    let baseline = row_top - ROW_HEIGHT + (ROW_HEIGHT - FONT_SIZE) / 2.0 + 1.5;
    let mut x = left;
    for (cell, width) in cells.iter().zip(widths) {
        let text = fit_to_width(cell, width - 2.0 * CELL_PADDING, FONT_SIZE);
        let text_width = approx_text_width(&text, FONT_SIZE);
        let cell_x = x + ((width - text_width) / 2.0).max(CELL_PADDING);
        text_ops(ops, &text, cell_x, baseline, FONT_SIZE);
        x += width;
    }
}

fn text_ops(ops: &mut Vec<Operation>, text: &str, x: f32, y: f32, size: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn line_ops(ops: &mut Vec<Operation>, x1: f32, y1: f32, x2: f32, y2: f32) {
    ops.push(Operation::new("m", vec![x1.into(), y1.into()]));
    ops.push(Operation::new("l", vec![x2.into(), y2.into()]));
    ops.push(Operation::new("S", vec![]));
}

/// Average Times-Roman glyph is about half an em wide
fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn fit_to_width(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * 0.5)).floor().max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('.');
    cut
}

/// Latin-1 maps straight onto WinAnsi for the accented letters used here;
/// anything else degrades to `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: i64, product: &str, quantity: i64, unit_price: f64) -> Sale {
        Sale {
            id,
            product: product.into(),
            quantity,
            unit_price,
            total: quantity as f64 * unit_price,
            date: format!("2024-05-{:02} 10:00:00", (id % 28) + 1),
        }
    }

    #[test]
    fn empty_table_has_header_and_zero_total() {
        let table = sales_table(&[]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0][2], "Quantité");
        assert_eq!(table[1][3], "Total :");
        assert_eq!(table[1][4], "0");
    }

    #[test]
    fn total_row_sums_whole_units() {
        let table =
            sales_table(&[sale(1, "Savon", 3, 500.0), sale(2, "Riz", 2, 1250.75)]).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table[1][1], "Savon");
        assert_eq!(table[1][4], "1 500");
        assert_eq!(table[2][3], "1250.75");
        assert_eq!(table[2][4], "2 501");
        assert_eq!(table[3][4], "4 001");
    }

    #[test]
    fn overflowing_grand_total_is_an_error() {
        let sales = [
            sale(1, "Or", 9_000_000_000, 1_000_000_000.0),
            sale(2, "Or", 9_000_000_000, 1_000_000_000.0),
        ];
        assert!(matches!(
            render_sales_pdf(&sales),
            Err(ExportError::AmountOutOfRange)
        ));

        let mut broken = sale(3, "Riz", 1, 1.0);
        broken.total = f64::INFINITY;
        assert!(matches!(
            sales_table(&[broken]),
            Err(ExportError::AmountOutOfRange)
        ));
    }

    #[test]
    fn empty_export_is_a_valid_single_page_pdf() {
        let bytes = render_sales_pdf(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn long_exports_paginate() {
        let sales: Vec<Sale> = (1..=120).map(|i| sale(i, "Savon", 1, 100.0)).collect();
        let doc = Document::load_mem(&render_sales_pdf(&sales).unwrap()).unwrap();
        assert!(doc.get_pages().len() >= 3);
    }

    #[test]
    fn accented_text_is_win_ansi_encoded() {
        assert_eq!(win_ansi("Quantité"), b"Quantit\xe9".to_vec());
        assert_eq!(win_ansi("€"), b"?".to_vec());
    }
}
