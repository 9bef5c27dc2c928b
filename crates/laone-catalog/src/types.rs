//! Raw shapes of the two catalog exports.
//!
//! Only the fields the merge reads are modelled; everything else in the
//! exports (ids, meta blocks, stock quantities, currency objects) is ignored
//! by serde.
//!
//! ### Assortment
//! A top-level JSON array. Each entry carries `salePrices`, an ordered list of
//! price-type objects whose `value` is an integer in kopecks. Position, not the
//! price-type name, identifies the tier.
//!
//! ### Stocks
//! An object with a `rows` array. `image` is omitted entirely for products
//! without a picture. `folder.pathName` is a `/`-separated folder path and
//! `folder.name` the leaf folder name; see [`crate::classify`] for how depth
//! maps to category and subcategory.

use serde::Deserialize;

/// One entry from the assortment export.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssortmentEntry {
    pub external_code: String,
    #[serde(default)]
    pub sale_prices: Vec<SalePrice>,
}

/// A single price tier. Extra keys (`currency`, `priceType`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SalePrice {
    pub value: i64,
}

/// Top-level stocks export: `{ "rows": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct StocksDocument {
    pub rows: Vec<RawStockEntry>,
}

/// One row from the stocks export.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStockEntry {
    pub external_code: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<StockImage>,
    pub folder: Folder,
}

impl RawStockEntry {
    /// Miniature download URL, if the row has an image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|img| img.miniature.download_href.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockImage {
    pub miniature: Miniature,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Miniature {
    pub download_href: String,
}

/// Folder placement: full parent path (segments split by `/`) and leaf name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub path_name: String,
    pub name: String,
}
