//! Google Sheets v4 request and response shapes.
//!
//! Only the subset the publisher sends is modelled. Requests serialize to the
//! single-key objects `batchUpdate` expects, e.g. `{"addSheet": {...}}`.
//! Replies to requests other than `addSheet` come back as empty objects.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// spreadsheets.create
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CreateSpreadsheetRequest<'a> {
    pub properties: SpreadsheetProperties<'a>,
}

#[derive(Debug, Serialize)]
pub struct SpreadsheetProperties<'a> {
    pub title: &'a str,
    pub locale: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpreadsheetResponse {
    pub spreadsheet_id: String,
}

// ---------------------------------------------------------------------------
// spreadsheets.batchUpdate
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BatchUpdateRequest<'a> {
    pub requests: &'a [Request],
}

/// One entry of a `batchUpdate` request list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    AddSheet {
        properties: SheetProperties,
    },
    UpdateDimensionProperties {
        range: DimensionRange,
        properties: DimensionProperties,
        fields: String,
    },
    RepeatCell {
        range: GridRange,
        cell: CellData,
        fields: String,
    },
    AddDimensionGroup {
        range: DimensionRange,
    },
    UpdateDimensionGroup {
        dimension_group: DimensionGroup,
        fields: String,
    },
    DeleteSheet {
        sheet_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub title: String,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    pub row_count: usize,
    pub column_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dimension {
    Rows,
    Columns,
}

/// Zero-based, end-exclusive span of rows or columns on one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionProperties {
    pub pixel_size: u32,
}

/// Cell range; unset bounds extend to the sheet edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_strategy: Option<WrapStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WrapStrategy {
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFormat {
    #[serde(rename = "type")]
    pub kind: NumberFormatType,
    pub pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberFormatType {
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionGroup {
    pub range: DimensionRange,
    pub collapsed: bool,
    pub depth: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl BatchUpdateResponse {
    /// Sheet id assigned by the first `addSheet` reply, if any.
    #[must_use]
    pub fn added_sheet_id(&self) -> Option<i64> {
        self.replies
            .iter()
            .find_map(|r| r.add_sheet.as_ref())
            .map(|a| a.properties.sheet_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Deserialize)]
pub struct AddSheetReply {
    pub properties: AddedSheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedSheetProperties {
    pub sheet_id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// spreadsheets.values.batchUpdate
// ---------------------------------------------------------------------------

/// Cell values for one A1 range, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRange {
    pub range: String,
    pub values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateValuesRequest<'a> {
    pub value_input_option: &'static str,
    pub data: &'a [ValueRange],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateValuesResponse {
    #[serde(default)]
    pub total_updated_cells: u64,
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

/// Google's standard error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
