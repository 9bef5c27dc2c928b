//! Normalized catalog produced by the merge and consumed by the publisher.
//!
//! Category and subcategory maps keep insertion order: the first product seen
//! for a label fixes that label's position. The JSON form mirrors the shape
//! downstream tooling expects: flat categories are arrays, the grouped
//! category is an object of arrays.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A single merged product. Prices are minor currency units, unscaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    /// Miniature download URL, `None` when the stock row has no image.
    pub image: Option<String>,
    pub retail_price: i64,
    pub price_from_5k: i64,
    pub price_from_15k: i64,
    pub price_from_100k: i64,
}

impl Product {
    /// The four price tiers in fixed order: retail, from 5k, from 15k, from 100k.
    #[must_use]
    pub fn price_tiers(&self) -> [i64; 4] {
        [
            self.retail_price,
            self.price_from_5k,
            self.price_from_15k,
            self.price_from_100k,
        ]
    }
}

/// The two categories that get structural treatment instead of a flat list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    split_category: String,
    grouped_category: String,
}

impl CategoryRules {
    pub const DEFAULT_SPLIT_CATEGORY: &'static str = "Ресницы";
    pub const DEFAULT_GROUPED_CATEGORY: &'static str = "Расходные материалы";

    #[must_use]
    pub fn new(split_category: impl Into<String>, grouped_category: impl Into<String>) -> Self {
        Self {
            split_category: split_category.into(),
            grouped_category: grouped_category.into(),
        }
    }

    /// Category whose subcategories each become a top-level `"{category}_{subcategory}"` entry.
    #[must_use]
    pub fn split_category(&self) -> &str {
        &self.split_category
    }

    /// Category kept as one entry with products nested by subcategory.
    #[must_use]
    pub fn grouped_category(&self) -> &str {
        &self.grouped_category
    }

    /// Top-level key for a product in the split category.
    #[must_use]
    pub fn split_key(&self, subcategory: &str) -> String {
        format!("{}_{subcategory}", self.split_category)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPLIT_CATEGORY, Self::DEFAULT_GROUPED_CATEGORY)
    }
}

/// Raised when a product is pushed into a category that already holds the
/// other bucket shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("category \"{category}\" already holds a {existing} bucket")]
pub struct ShapeConflict {
    pub category: String,
    pub existing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let idx = if let Some(&i) = self.index.get(key) {
            i
        } else {
            self.entries.push((key.to_owned(), make()));
            let i = self.entries.len() - 1;
            self.index.insert(key.to_owned(), i);
            i
        };
        &mut self.entries[idx].1
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Subcategory label to products, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubcategoryMap(OrderedMap<Vec<Product>>);

impl SubcategoryMap {
    #[must_use]
    pub fn get(&self, subcategory: &str) -> Option<&[Product]> {
        self.0.get(subcategory).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Product])> {
        self.0.iter().map(|(k, v)| (k, v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }

    fn push(&mut self, subcategory: &str, product: Product) {
        self.0.get_or_insert_with(subcategory, Vec::new).push(product);
    }
}

/// Products stored under one top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryBucket {
    Flat(Vec<Product>),
    Grouped(SubcategoryMap),
}

impl CategoryBucket {
    /// Total number of products in the bucket, across subcategories.
    #[must_use]
    pub fn product_count(&self) -> usize {
        match self {
            Self::Flat(products) => products.len(),
            Self::Grouped(groups) => groups.iter().map(|(_, p)| p.len()).sum(),
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::Grouped(_) => "grouped",
        }
    }
}

/// Category-partitioned product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog(OrderedMap<CategoryBucket>);

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `product` to the flat list under `category`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeConflict`] if `category` already holds a grouped bucket.
    pub fn push_flat(&mut self, category: &str, product: Product) -> Result<(), ShapeConflict> {
        match self
            .0
            .get_or_insert_with(category, || CategoryBucket::Flat(Vec::new()))
        {
            CategoryBucket::Flat(products) => {
                products.push(product);
                Ok(())
            }
            other @ CategoryBucket::Grouped(_) => Err(ShapeConflict {
                category: category.to_owned(),
                existing: other.shape(),
            }),
        }
    }

    /// Appends `product` under `category` / `subcategory`, creating either level if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeConflict`] if `category` already holds a flat bucket.
    pub fn push_grouped(
        &mut self,
        category: &str,
        subcategory: &str,
        product: Product,
    ) -> Result<(), ShapeConflict> {
        match self.0.get_or_insert_with(category, || {
            CategoryBucket::Grouped(SubcategoryMap::default())
        }) {
            CategoryBucket::Grouped(groups) => {
                groups.push(subcategory, product);
                Ok(())
            }
            other @ CategoryBucket::Flat(_) => Err(ShapeConflict {
                category: category.to_owned(),
                existing: other.shape(),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryBucket> {
        self.0.get(category)
    }

    /// Categories in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryBucket)> {
        self.0.iter()
    }

    /// Number of top-level categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }

    /// Total number of products across every bucket.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.iter().map(|(_, b)| b.product_count()).sum()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
