// src/source/mod.rs
pub mod catalog;
pub mod models;

use crate::extractors::{PriceExtractor, RecordSet};
use crate::utils::error::SourceError;
use std::fs;
use std::path::Path;

pub use catalog::PriceCatalog;
pub use models::PriceDocument;

/// Reads and parses the input document. The whole file is read at once and must be UTF-8 JSON.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<PriceDocument, SourceError> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {}", raw.len(), path.display());

    serde_json::from_str(&raw).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the document at `path` and returns its raw price listing.
pub fn read_listing<P: AsRef<Path>>(path: P) -> Result<String, SourceError> {
    let path = path.as_ref();
    let document = load_document(path)?;

    match document.text {
        Some(text) => Ok(text),
        None => {
            tracing::warn!("Input {} has no \"text\" field, treating it as empty", path.display());
            Ok(String::new())
        }
    }
}

/// Loads the document at `path` and extracts its price records.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<RecordSet, SourceError> {
    let listing = read_listing(path)?;
    Ok(PriceExtractor::new().extract(&listing))
}
