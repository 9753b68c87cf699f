// src/analysis/pivot.rs
use crate::extractors::RecordSet;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Size × year price grid. Only pairs present in the input have a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PricePivot {
    years: Vec<u32>,
    rows: BTreeMap<String, BTreeMap<u32, u64>>,
}

impl PricePivot {
    /// Column headers, ascending.
    pub fn years(&self) -> &[u32] {
        &self.years
    }

    /// Row keys in string order.
    pub fn sizes(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn row(&self, size: &str) -> Option<&BTreeMap<u32, u64>> {
        self.rows.get(size)
    }

    pub fn get(&self, size: &str, year: u32) -> Option<u64> {
        self.rows.get(size).and_then(|row| row.get(&year)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reshapes records into a size × year grid.
///
/// When several records land on the same cell, the one that comes last in
/// record-set order wins.
pub fn pivot(records: &RecordSet) -> PricePivot {
    let mut years = BTreeSet::new();
    let mut rows: BTreeMap<String, BTreeMap<u32, u64>> = BTreeMap::new();
    let mut collisions = 0usize;

    for record in records {
        years.insert(record.year);
        let row = rows.entry(record.size.clone()).or_default();
        if row.insert(record.year, record.price).is_some() {
            collisions += 1;
        }
    }

    if collisions > 0 {
        tracing::debug!("Pivot resolved {} cell collisions, last record kept", collisions);
    }

    PricePivot {
        years: years.into_iter().collect(),
        rows,
    }
}
