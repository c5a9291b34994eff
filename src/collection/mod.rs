//! Postman collection input and output.
//!
//! - [`model`]: lenient read model shared by every pipeline
//! - [`scaffold`]: builds a collection file from a declarative endpoint catalog

pub mod model;
pub mod scaffold;

pub use model::{
    Collection, CollectionInfo, Description, Item, Request, RequestBody, RequestUrl, Response,
    UrlParts, normalize_path_params,
};
pub use scaffold::{Catalog, CatalogCategory, CatalogEndpoint, Scaffolder};

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::types::{Result, ScribeError};

/// Load a collection file.
///
/// A missing file is reported as [`ScribeError::CollectionNotFound`] before any
/// parsing; malformed JSON propagates as [`ScribeError::Json`].
pub fn load(path: &Path) -> Result<Collection> {
    if !path.exists() {
        return Err(ScribeError::CollectionNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let collection = Collection::from_json(&text)?;
    debug!(
        "Loaded collection {} ({} top-level items)",
        path.display(),
        collection.item.len()
    );

    Ok(collection)
}
