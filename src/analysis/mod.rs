// src/analysis/mod.rs
//! Pure views over a loaded `RecordSet`: selection filtering, the size × year
//! pivot, and per-size change statistics.

pub mod pivot;
pub mod stats;

use crate::extractors::{PriceRecord, RecordSet};
use serde::Serialize;
use std::collections::BTreeSet;

pub use pivot::{pivot, PricePivot};
pub use stats::{change_stats, ChangeStats, Trend};

/// Number of sizes pre-selected when the caller does not choose any.
pub const DEFAULT_SIZE_COUNT: usize = 5;

/// The years and sizes the user is currently looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub years: BTreeSet<u32>,
    pub sizes: BTreeSet<String>,
}

impl Selection {
    pub fn new<Y, S>(years: Y, sizes: S) -> Self
    where
        Y: IntoIterator<Item = u32>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            years: years.into_iter().collect(),
            sizes: sizes.into_iter().map(Into::into).collect(),
        }
    }

    /// Every year and every size in the record set.
    pub fn all(records: &RecordSet) -> Self {
        Self::new(records.years(), records.sizes())
    }

    /// Initial selection: every year, and the first few sizes in sorted order.
    pub fn default_for(records: &RecordSet) -> Self {
        let sizes = records.sizes().into_iter().take(DEFAULT_SIZE_COUNT);
        Self::new(records.years(), sizes)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.sizes.is_empty()
    }

    /// Selected years and sizes that do not occur in `records`.
    pub fn unknown_in(&self, records: &RecordSet) -> (Vec<u32>, Vec<String>) {
        let known_years: BTreeSet<u32> = records.years().into_iter().collect();
        let known_sizes: BTreeSet<String> = records.sizes().into_iter().collect();
        let years = self.years.difference(&known_years).copied().collect();
        let sizes = self.sizes.difference(&known_sizes).cloned().collect();
        (years, sizes)
    }

    pub fn contains(&self, record: &PriceRecord) -> bool {
        self.years.contains(&record.year) && self.sizes.contains(&record.size)
    }
}

/// Keeps the records whose year is in `years` and whose size is in `sizes`, in their original order.
/// An empty `years` or `sizes` selects nothing.
pub fn filter(records: &RecordSet, years: &BTreeSet<u32>, sizes: &BTreeSet<String>) -> RecordSet {
    let kept = records
        .iter()
        .filter(|r| years.contains(&r.year) && sizes.contains(&r.size))
        .cloned()
        .collect();
    RecordSet::from_ordered(kept)
}

/// [`filter`] driven by a [`Selection`].
pub fn filter_selection(records: &RecordSet, selection: &Selection) -> RecordSet {
    filter(records, &selection.years, &selection.sizes)
}
