//! Builders for the `batchUpdate` requests a tab needs.

use crate::layout::{RowSpan, COLUMN_COUNT};
use crate::types::{
    CellData, CellFormat, Dimension, DimensionGroup, DimensionProperties, DimensionRange,
    GridProperties, GridRange, NumberFormat, NumberFormatType, Request, SheetProperties,
    WrapStrategy,
};

/// Sheet id Google assigns to the default tab of a new spreadsheet.
pub const DEFAULT_SHEET_ID: i64 = 0;

const NAME_COLUMN_PX: u32 = 100;
const IMAGE_COLUMN_PX: u32 = 200;
const BODY_ROW_PX: u32 = 200;
const PRICE_PATTERN: &str = "0.0#";
/// Prices start at column C.
const FIRST_PRICE_COLUMN: usize = 2;

#[must_use]
pub fn add_sheet(title: &str, grid_rows: usize) -> Request {
    Request::AddSheet {
        properties: SheetProperties {
            title: title.to_owned(),
            grid_properties: GridProperties {
                row_count: grid_rows,
                column_count: COLUMN_COUNT,
            },
        },
    }
}

/// Column widths, body row heights, word wrap and the price number format.
#[must_use]
pub fn format_tab(sheet_id: i64, body_rows: usize) -> Vec<Request> {
    vec![
        resize(sheet_id, Dimension::Columns, 0, 1, NAME_COLUMN_PX),
        resize(sheet_id, Dimension::Columns, 1, 2, IMAGE_COLUMN_PX),
        resize(sheet_id, Dimension::Rows, 1, body_rows + 1, BODY_ROW_PX),
        Request::RepeatCell {
            range: GridRange {
                sheet_id,
                start_column_index: None,
            },
            cell: CellData {
                user_entered_format: CellFormat {
                    wrap_strategy: Some(WrapStrategy::Wrap),
                    ..CellFormat::default()
                },
            },
            fields: "userEnteredFormat.wrapStrategy".to_owned(),
        },
        Request::RepeatCell {
            range: GridRange {
                sheet_id,
                start_column_index: Some(FIRST_PRICE_COLUMN),
            },
            cell: CellData {
                user_entered_format: CellFormat {
                    number_format: Some(NumberFormat {
                        kind: NumberFormatType::Number,
                        pattern: PRICE_PATTERN.to_owned(),
                    }),
                    ..CellFormat::default()
                },
            },
            fields: "userEnteredFormat.numberFormat".to_owned(),
        },
    ]
}

fn resize(sheet_id: i64, dimension: Dimension, start: usize, end: usize, px: u32) -> Request {
    Request::UpdateDimensionProperties {
        range: DimensionRange {
            sheet_id,
            dimension,
            start_index: start,
            end_index: end,
        },
        properties: DimensionProperties { pixel_size: px },
        fields: "pixelSize".to_owned(),
    }
}

fn row_range(sheet_id: i64, span: RowSpan) -> DimensionRange {
    DimensionRange {
        sheet_id,
        dimension: Dimension::Rows,
        start_index: span.start,
        end_index: span.end,
    }
}

/// One `addDimensionGroup` per span.
#[must_use]
pub fn add_row_groups(sheet_id: i64, spans: &[RowSpan]) -> Vec<Request> {
    spans
        .iter()
        .map(|&span| Request::AddDimensionGroup {
            range: row_range(sheet_id, span),
        })
        .collect()
}

/// Collapses groups created by [`add_row_groups`]; must run in a later batch.
#[must_use]
pub fn collapse_row_groups(sheet_id: i64, spans: &[RowSpan]) -> Vec<Request> {
    spans
        .iter()
        .map(|&span| Request::UpdateDimensionGroup {
            dimension_group: DimensionGroup {
                range: row_range(sheet_id, span),
                collapsed: true,
                depth: 1,
            },
            fields: "collapsed".to_owned(),
        })
        .collect()
}

#[must_use]
pub fn delete_sheet(sheet_id: i64) -> Request {
    Request::DeleteSheet { sheet_id }
}
