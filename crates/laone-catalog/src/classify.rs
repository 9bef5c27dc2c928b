//! Category placement derived from a stock row's folder descriptor.
//!
//! Depth conventions of the source system:
//!
//! | `pathName` segments | category        | subcategory     |
//! |---------------------|-----------------|-----------------|
//! | 1                   | `folder.name`   | `""`            |
//! | 2                   | segment 1       | `folder.name`   |
//! | 3 or more           | segment 1       | segment 2       |
//!
//! Segments past the third are ignored.

use thiserror::Error;

use crate::types::Folder;

/// Where a product belongs, borrowed from its folder descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub category: &'a str,
    /// Empty when the folder depth carries no subcategory.
    pub subcategory: &'a str,
    /// Number of `/`-separated segments in `pathName`.
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UnclassifiableFolder(pub &'static str);

/// Classifies a folder descriptor into category and subcategory.
///
/// # Errors
///
/// Returns [`UnclassifiableFolder`] when `pathName` is empty or the segment
/// chosen as the category is empty.
pub fn classify_folder(folder: &Folder) -> Result<Placement<'_>, UnclassifiableFolder> {
    if folder.path_name.is_empty() {
        return Err(UnclassifiableFolder("folder path is empty"));
    }

    let segments: Vec<&str> = folder.path_name.split('/').collect();
    let depth = segments.len();

    let (category, subcategory) = match depth {
        1 => (folder.name.as_str(), ""),
        2 => (segments[1], folder.name.as_str()),
        _ => (segments[1], segments[2]),
    };

    if category.is_empty() {
        return Err(UnclassifiableFolder("category segment is empty"));
    }

    Ok(Placement {
        category,
        subcategory,
        depth,
    })
}
