use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or merging the catalog exports.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A stock row references an external code absent from the assortment.
    #[error("no assortment entry for external code \"{external_code}\"")]
    MissingAssortment { external_code: String },

    /// An assortment entry has fewer than the four required price tiers.
    #[error("assortment entry \"{external_code}\" has {found} price tiers, expected at least 4")]
    MalformedPriceTiers { external_code: String, found: usize },

    /// A stock row's folder path cannot be classified.
    #[error("cannot classify folder \"{path_name}\" for \"{external_code}\": {reason}")]
    MalformedFolder {
        external_code: String,
        path_name: String,
        reason: String,
    },

    /// A product landed in a category that already holds the other bucket shape.
    #[error("product \"{external_code}\" conflicts with existing bucket: {source}")]
    ShapeConflict {
        external_code: String,
        #[source]
        source: laone_core::catalog::ShapeConflict,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
