// src/source/catalog.rs
use crate::extractors::{LineNote, PriceExtractor, RecordSet};
use crate::source::read_listing;
use crate::utils::error::SourceError;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The raw listing as read from disk, with the records extracted from it.
#[derive(Debug)]
struct Loaded {
    listing: String,
    records: Arc<RecordSet>,
}

/// Load-once access to the record set behind one input file.
///
/// The first successful call reads and extracts the file; every later call
/// shares the same immutable `Arc<RecordSet>`, and the scan trace is built
/// from the same cached text. A failed load is not cached, so the next call
/// tries again. `invalidate` drops the cached set.
#[derive(Debug)]
pub struct PriceCatalog {
    path: PathBuf,
    loaded: OnceCell<Loaded>,
}

impl PriceCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            loaded: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn load(&self) -> Result<&Loaded, SourceError> {
        self.loaded.get_or_try_init(|| {
            tracing::info!("Loading price records from {}", self.path.display());
            let listing = read_listing(&self.path)?;
            let records = PriceExtractor::new().extract(&listing);
            tracing::info!(
                "Loaded {} records ({} years, {} sizes)",
                records.len(),
                records.years().len(),
                records.sizes().len()
            );
            Ok(Loaded {
                listing,
                records: Arc::new(records),
            })
        })
    }

    pub fn records(&self) -> Result<Arc<RecordSet>, SourceError> {
        self.load().map(|loaded| Arc::clone(&loaded.records))
    }

    /// Line-by-line trace of the scan over the cached listing.
    pub fn scan_trace(&self) -> Result<Vec<LineNote>, SourceError> {
        self.load().map(|loaded| PriceExtractor::new().annotate(&loaded.listing))
    }

    /// Cache-bust: the next `records()` call reloads from disk.
    pub fn invalidate(&mut self) {
        if self.loaded.take().is_some() {
            tracing::info!("Dropped cached records for {}", self.path.display());
        }
    }
}
