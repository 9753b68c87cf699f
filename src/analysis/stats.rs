// src/analysis/stats.rs
use crate::extractors::{PriceRecord, RecordSet};
use crate::utils::error::StatsError;
use serde::Serialize;

/// Direction of a change rate. Zero counts as falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
}

impl Trend {
    pub fn of(pct: f64) -> Self {
        if pct > 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        }
    }
}

/// Price change for one size between its earliest and latest year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeStats {
    pub size: String,
    pub first_year: u32,
    pub last_year: u32,
    pub first_price: u64,
    pub last_price: u64,
    pub total_change_pct: f64,
    pub avg_annual_change_pct: f64, // compound annual growth rate
}

impl ChangeStats {
    pub fn total_trend(&self) -> Trend {
        Trend::of(self.total_change_pct)
    }

    pub fn annual_trend(&self) -> Trend {
        Trend::of(self.avg_annual_change_pct)
    }
}

/// Computes total and compound-annual change for `size`.
///
/// `Ok(None)` means there is not enough history: fewer than two distinct years.
/// The base price is the first record of the earliest year, the final price the
/// last record of the latest year.
pub fn change_stats(records: &RecordSet, size: &str) -> Result<Option<ChangeStats>, StatsError> {
    let mut history: Vec<&PriceRecord> = records.iter().filter(|r| r.size == size).collect();
    history.sort_by_key(|r| r.year); // stable

    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) if last.year > first.year => (*first, *last),
        _ => return Ok(None),
    };

    if first.price == 0 {
        return Err(StatsError::ZeroBasePrice { size: size.to_string() });
    }

    let p0 = first.price as f64;
    let p1 = last.price as f64;
    let span = f64::from(last.year - first.year);

    let total_change_pct = (p1 - p0) / p0 * 100.0;
    let avg_annual_change_pct = ((p1 / p0).powf(1.0 / span) - 1.0) * 100.0;

    if !total_change_pct.is_finite() || !avg_annual_change_pct.is_finite() {
        return Err(StatsError::NonFinite { size: size.to_string() });
    }

    Ok(Some(ChangeStats {
        size: size.to_string(),
        first_year: first.year,
        last_year: last.year,
        first_price: first.price,
        last_price: last.price,
        total_change_pct,
        avg_annual_change_pct,
    }))
}
