// src/extractors/mod.rs
pub mod price;
pub mod record;

// Re-export key extraction types for convenience
pub use price::{extract, LineNote, LineToken, PriceExtractor, ScanState, TokenKind};
pub use record::{PriceRecord, RecordSet};
