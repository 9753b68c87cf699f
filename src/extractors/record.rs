// src/extractors/record.rs
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

// --- Data Structures ---

/// One price observation: a cable size priced in a given year, in currency units per meter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PriceRecord {
    pub year: u32,
    pub size: String, // Cross-section token, e.g. "2.5SQ"
    pub price: u64,
}

impl PriceRecord {
    pub fn new(year: u32, size: impl Into<String>, price: u64) -> Self {
        Self { year, size: size.into(), price }
    }
}

/// The ordered, deduplicated collection of every record found in the input.
///
/// Records are sorted by year, then by size compared as a string. Records that
/// share a year and size keep the order in which they were scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<PriceRecord>,
}

impl RecordSet {
    /// Builds a record set from raw scanner output: drops exact duplicate
    /// triples (first occurrence wins) and then sorts.
    pub fn from_records(mut records: Vec<PriceRecord>) -> Self {
        let scanned = records.len();
        let mut seen = HashSet::with_capacity(records.len());
        records.retain(|r| seen.insert(r.clone()));

        // sort_by is stable, ties on (year, size) stay in scan order
        records.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.size.cmp(&b.size)));

        tracing::debug!(
            "Built record set: {} records kept, {} duplicates dropped",
            records.len(),
            scanned - records.len()
        );
        Self { records }
    }

    /// Wraps records that are already in record-set order (e.g. a filtered subsequence).
    pub(crate) fn from_ordered(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct sizes present, in string order.
    pub fn sizes(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.size.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
