//! Join of the stocks and assortment exports into a [`Catalog`].

use std::collections::HashMap;

use laone_core::{Catalog, CategoryRules, Product};

use crate::classify::{classify_folder, Placement};
use crate::error::CatalogError;
use crate::types::{RawAssortmentEntry, RawStockEntry};

/// Merges stock rows with their assortment pricing into a category-partitioned
/// catalog.
///
/// Rows are processed in input order, so every bucket preserves stock order.
/// When several assortment entries share an external code the first one wins.
/// The merge is all-or-nothing: the first bad row aborts it.
///
/// # Errors
///
/// - [`CatalogError::MissingAssortment`] if a stock row has no assortment match.
/// - [`CatalogError::MalformedFolder`] if a folder descriptor cannot be classified.
/// - [`CatalogError::MalformedPriceTiers`] if the matched entry has fewer than four prices.
/// - [`CatalogError::ShapeConflict`] if a synthetic split key collides with the grouped category.
pub fn merge(
    assortment: &[RawAssortmentEntry],
    stocks: &[RawStockEntry],
    rules: &CategoryRules,
) -> Result<Catalog, CatalogError> {
    let index = index_by_external_code(assortment);
    let mut catalog = Catalog::new();

    for row in stocks {
        let entry = index.get(row.external_code.as_str()).ok_or_else(|| {
            CatalogError::MissingAssortment {
                external_code: row.external_code.clone(),
            }
        })?;

        let placement =
            classify_folder(&row.folder).map_err(|e| CatalogError::MalformedFolder {
                external_code: row.external_code.clone(),
                path_name: row.folder.path_name.clone(),
                reason: e.to_string(),
            })?;
        if placement.depth > 3 {
            tracing::debug!(
                external_code = %row.external_code,
                path = %row.folder.path_name,
                "folder deeper than three levels, extra segments ignored"
            );
        }

        let product = build_product(row, entry)?;
        place(&mut catalog, rules, placement, product).map_err(|source| {
            CatalogError::ShapeConflict {
                external_code: row.external_code.clone(),
                source,
            }
        })?;
    }

    tracing::debug!(
        categories = catalog.len(),
        products = catalog.product_count(),
        "catalog merged"
    );
    Ok(catalog)
}

/// First assortment entry per external code.
fn index_by_external_code(entries: &[RawAssortmentEntry]) -> HashMap<&str, &RawAssortmentEntry> {
    let mut index = HashMap::with_capacity(entries.len());
    for entry in entries {
        index.entry(entry.external_code.as_str()).or_insert(entry);
    }
    index
}

fn build_product(row: &RawStockEntry, entry: &RawAssortmentEntry) -> Result<Product, CatalogError> {
    let [retail, from_5k, from_15k, from_100k, ..] = entry.sale_prices.as_slice() else {
        return Err(CatalogError::MalformedPriceTiers {
            external_code: entry.external_code.clone(),
            found: entry.sale_prices.len(),
        });
    };

    Ok(Product {
        name: row.name.clone(),
        image: row.image_url().map(str::to_owned),
        retail_price: retail.value,
        price_from_5k: from_5k.value,
        price_from_15k: from_15k.value,
        price_from_100k: from_100k.value,
    })
}

fn place(
    catalog: &mut Catalog,
    rules: &CategoryRules,
    placement: Placement<'_>,
    product: Product,
) -> Result<(), laone_core::catalog::ShapeConflict> {
    let Placement {
        category,
        subcategory,
        ..
    } = placement;

    if category == rules.split_category() {
        catalog.push_flat(&rules.split_key(subcategory), product)
    } else if category == rules.grouped_category() {
        catalog.push_grouped(category, subcategory, product)
    } else {
        catalog.push_flat(category, product)
    }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
