//! Pure mapping from catalog buckets to sheet rows, ranges and row groups.
//!
//! Row 1 of every tab is the header. Flat buckets fill rows `2..=n+1`.
//! Grouped buckets write, per subcategory, a label row followed by its
//! products; the products form a collapsible row group below the label.

use laone_core::{CategoryBucket, Product};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::types::ValueRange;

/// Header row: name, image, retail, from 5k, from 15k, from 100k.
pub const HEADER: [&str; 6] = [
    "Наименование",
    "Изображение",
    "Цена: розница",
    "Цена: от 5 т.р.",
    "Цена: от 15 т.р.",
    "Цена: от 100 т.р.",
];

pub const COLUMN_COUNT: usize = HEADER.len();

const FIRST_COLUMN: char = 'A';
const LAST_COLUMN: char = 'F';

/// Zero-based, end-exclusive row span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub start: usize,
    pub end: usize,
}

/// Everything needed to create and fill one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct TabLayout {
    pub title: String,
    /// Rows below the header: products plus subcategory label rows.
    pub body_rows: usize,
    pub values: Vec<ValueRange>,
    pub groups: Vec<RowSpan>,
}

impl TabLayout {
    /// Grid height including the header row.
    #[must_use]
    pub fn grid_rows(&self) -> usize {
        self.body_rows + 1
    }
}

/// Number of body rows a bucket occupies.
#[must_use]
pub fn body_row_count(bucket: &CategoryBucket) -> usize {
    match bucket {
        CategoryBucket::Flat(products) => products.len(),
        CategoryBucket::Grouped(groups) => groups.iter().map(|(_, p)| p.len() + 1).sum(),
    }
}

/// Lays out one catalog entry as a tab titled `title`.
#[must_use]
pub fn layout_tab(title: &str, bucket: &CategoryBucket) -> TabLayout {
    let mut values = vec![ValueRange {
        range: a1_range(title, FIRST_COLUMN, 1, LAST_COLUMN, 1),
        values: vec![HEADER.iter().map(|h| Value::from(*h)).collect()],
    }];
    let mut groups = Vec::new();

    match bucket {
        CategoryBucket::Flat(products) => {
            if !products.is_empty() {
                values.push(product_block(title, 2, products));
            }
        }
        CategoryBucket::Grouped(subcategories) => {
            let mut label_row = 2;
            for (subcategory, products) in subcategories.iter() {
                values.push(ValueRange {
                    range: a1_range(title, FIRST_COLUMN, label_row, FIRST_COLUMN, label_row),
                    values: vec![vec![Value::from(subcategory)]],
                });
                if !products.is_empty() {
                    values.push(product_block(title, label_row + 1, products));
                    // The label sits at zero-based index `label_row - 1`, so
                    // its products span `label_row..label_row + n`.
                    groups.push(RowSpan {
                        start: label_row,
                        end: label_row + products.len(),
                    });
                }
                label_row += products.len() + 1;
            }
        }
    }

    TabLayout {
        title: title.to_owned(),
        body_rows: body_row_count(bucket),
        values,
        groups,
    }
}

fn product_block(title: &str, first_row: usize, products: &[Product]) -> ValueRange {
    ValueRange {
        range: a1_range(
            title,
            FIRST_COLUMN,
            first_row,
            LAST_COLUMN,
            first_row + products.len() - 1,
        ),
        values: products.iter().map(product_row).collect(),
    }
}

/// Cells for one product: name, image formula, then the four prices.
#[must_use]
pub fn product_row(product: &Product) -> Vec<Value> {
    let mut row = Vec::with_capacity(COLUMN_COUNT);
    row.push(Value::from(product.name.as_str()));
    row.push(Value::from(
        product.image.as_deref().map(image_formula).unwrap_or_default(),
    ));
    row.extend(product.price_tiers().into_iter().map(price_cell));
    row
}

/// `=IMAGE("url")`, with embedded quotes doubled.
#[must_use]
pub fn image_formula(url: &str) -> String {
    format!("=IMAGE(\"{}\")", url.replace('"', "\"\""))
}

/// Minor units as a major-unit number, e.g. `1050` → `10.5`.
///
/// Sent as a JSON number so Sheets stores a number under any spreadsheet
/// locale; the column's `0.0#` pattern takes care of display.
#[must_use]
pub fn price_cell(minor_units: i64) -> Value {
    Decimal::new(minor_units, 2)
        .to_f64()
        .map_or(Value::Null, Value::from)
}

/// A1 range on sheet `title`, e.g. `'Брови'!A2:F5`.
#[must_use]
pub fn a1_range(title: &str, from_col: char, from_row: usize, to_col: char, to_row: usize) -> String {
    format!(
        "{}!{from_col}{from_row}:{to_col}{to_row}",
        quote_sheet_name(title)
    )
}

/// Single-quotes a sheet name for A1 notation, doubling embedded quotes.
#[must_use]
pub fn quote_sheet_name(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
