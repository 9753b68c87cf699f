// src/lib.rs
//! Extracts cable price records from a free-form listing and derives the
//! tables and change statistics a price dashboard displays.

pub mod analysis;
pub mod dashboard;
pub mod extractors;
pub mod source;
pub mod utils;

pub use analysis::{change_stats, filter, pivot, ChangeStats, PricePivot, Selection, Trend};
pub use dashboard::{Dashboard, TextReport};
pub use extractors::{extract, PriceExtractor, PriceRecord, RecordSet};
pub use source::PriceCatalog;
pub use utils::error::{AppError, SourceError, StatsError};
