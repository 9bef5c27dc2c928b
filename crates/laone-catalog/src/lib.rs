pub mod classify;
pub mod error;
pub mod load;
pub mod merge;
pub mod types;

pub use classify::{classify_folder, Placement};
pub use error::CatalogError;
pub use load::{load_assortment, load_stocks, merge_files, parse_assortment, parse_stocks};
pub use merge::merge;
pub use types::{RawAssortmentEntry, RawStockEntry};
