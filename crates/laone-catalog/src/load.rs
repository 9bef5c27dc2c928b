//! Typed parsing of the two exports from strings or files.

use std::path::Path;

use laone_core::{Catalog, CategoryRules};

use crate::error::CatalogError;
use crate::merge::merge;
use crate::types::{RawAssortmentEntry, RawStockEntry, StocksDocument};

/// Parses the assortment export (a top-level JSON array).
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] if the document does not match the
/// expected shape.
pub fn parse_assortment(json: &str) -> Result<Vec<RawAssortmentEntry>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Deserialize {
        context: "assortment document".to_owned(),
        source,
    })
}

/// Parses the stocks export and returns its `rows`.
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] if the document does not match the
/// expected shape.
pub fn parse_stocks(json: &str) -> Result<Vec<RawStockEntry>, CatalogError> {
    let doc: StocksDocument =
        serde_json::from_str(json).map_err(|source| CatalogError::Deserialize {
            context: "stocks document".to_owned(),
            source,
        })?;
    Ok(doc.rows)
}

fn read_utf8(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses the assortment export at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read as UTF-8, or
/// [`CatalogError::Deserialize`] if its content is malformed.
pub fn load_assortment(path: &Path) -> Result<Vec<RawAssortmentEntry>, CatalogError> {
    let text = read_utf8(path)?;
    parse_assortment(&text).map_err(|e| with_path_context(e, path))
}

/// Reads and parses the stocks export at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read as UTF-8, or
/// [`CatalogError::Deserialize`] if its content is malformed.
pub fn load_stocks(path: &Path) -> Result<Vec<RawStockEntry>, CatalogError> {
    let text = read_utf8(path)?;
    parse_stocks(&text).map_err(|e| with_path_context(e, path))
}

/// Loads both exports and merges them.
///
/// # Errors
///
/// Propagates any load or [`merge`] error.
pub fn merge_files(
    assortment_path: &Path,
    stocks_path: &Path,
    rules: &CategoryRules,
) -> Result<Catalog, CatalogError> {
    let assortment = load_assortment(assortment_path)?;
    let stocks = load_stocks(stocks_path)?;
    tracing::info!(
        assortment_entries = assortment.len(),
        stock_rows = stocks.len(),
        "loaded catalog exports"
    );
    merge(&assortment, &stocks, rules)
}

fn with_path_context(err: CatalogError, path: &Path) -> CatalogError {
    match err {
        CatalogError::Deserialize { context, source } => CatalogError::Deserialize {
            context: format!("{context} at {}", path.display()),
            source,
        },
        other => other,
    }
}
