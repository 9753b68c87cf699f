// src/dashboard/mod.rs
//! View model handed to whatever draws the charts and tables.

pub mod text;

use crate::analysis::{self, ChangeStats, PricePivot, Selection};
use crate::extractors::RecordSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use text::TextReport;

/// Currency unit of every price in the listing.
pub const PRICE_UNIT: &str = "KRW/m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    pub year: u32,
    pub price: u64,
}

/// One line on the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub size: String,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatsOutcome {
    Available { stats: ChangeStats },
    /// Fewer than two distinct years in the selection
    NotAvailable,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeSummary {
    pub size: String,
    pub outcome: StatsOutcome,
}

/// Everything the presentation layer needs for one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub unit: &'static str,
    pub selection: Selection,
    pub records: RecordSet,
    pub series: Vec<TrendSeries>,
    pub summaries: Vec<SizeSummary>,
    pub pivot: PricePivot,
}

impl Dashboard {
    /// Builds every view for `selection`. Statistics are computed on the
    /// filtered records, so they cover only the selected years.
    pub fn build(records: &RecordSet, selection: &Selection) -> Self {
        let filtered = analysis::filter_selection(records, selection);

        let series = selection
            .sizes
            .iter()
            .map(|size| TrendSeries {
                size: size.clone(),
                points: filtered
                    .iter()
                    .filter(|r| &r.size == size)
                    .map(|r| PricePoint { year: r.year, price: r.price })
                    .collect(),
            })
            .collect();

        let summaries = selection
            .sizes
            .iter()
            .map(|size| {
                let outcome = match analysis::change_stats(&filtered, size) {
                    Ok(Some(stats)) => StatsOutcome::Available { stats },
                    Ok(None) => StatsOutcome::NotAvailable,
                    Err(e) => {
                        tracing::warn!("Skipping change rate for {}: {}", size, e);
                        StatsOutcome::Failed { reason: e.to_string() }
                    }
                };
                SizeSummary { size: size.clone(), outcome }
            })
            .collect();

        let pivot = analysis::pivot(&filtered);
        tracing::debug!(
            "Built dashboard: {} of {} records selected",
            filtered.len(),
            records.len()
        );

        Self {
            generated_at: Utc::now(),
            unit: PRICE_UNIT,
            selection: selection.clone(),
            records: filtered,
            series,
            summaries,
            pivot,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::PriceRecord;

    fn sample() -> RecordSet {
        RecordSet::from_records(vec![
            PriceRecord::new(2020, "2.5SQ", 1000),
            PriceRecord::new(2021, "2.5SQ", 1100),
            PriceRecord::new(2023, "2.5SQ", 1300),
            PriceRecord::new(2020, "4SQ", 1500),
        ])
    }

    #[test]
    fn test_series_and_stats_follow_selection() {
        let records = sample();
        let sel = Selection::new([2020, 2021], ["2.5SQ", "4SQ"]);
        let dash = Dashboard::build(&records, &sel);

        assert_eq!(dash.series.len(), 2);
        assert_eq!(
            dash.series[0].points,
            vec![PricePoint { year: 2020, price: 1000 }, PricePoint { year: 2021, price: 1100 }]
        );

        // 2023 is not selected, so the change runs 2020 -> 2021 only
        match &dash.summaries[0].outcome {
            StatsOutcome::Available { stats } => {
                assert_eq!(stats.last_year, 2021);
                assert!((stats.total_change_pct - 10.0).abs() < 1e-9);
            }
            other => panic!("expected stats, got {:?}", other),
        }
        assert_eq!(dash.summaries[1].outcome, StatsOutcome::NotAvailable);
        assert_eq!(dash.pivot.get("4SQ", 2020), Some(1500));
    }

    #[test]
    fn test_empty_selection_has_no_data() {
        let records = sample();
        let dash = Dashboard::build(&records, &Selection::new(Vec::<u32>::new(), ["2.5SQ"]));
        assert!(!dash.has_data());
        assert!(dash.pivot.is_empty());
        assert!(dash.series[0].points.is_empty());
    }

    #[test]
    fn test_failed_stats_stay_local() {
        let records = RecordSet::from_records(vec![
            PriceRecord::new(2020, "4SQ", 0),
            PriceRecord::new(2021, "4SQ", 100),
            PriceRecord::new(2020, "6SQ", 200),
            PriceRecord::new(2021, "6SQ", 300),
        ]);
        let dash = Dashboard::build(&records, &Selection::all(&records));
        assert!(matches!(dash.summaries[0].outcome, StatsOutcome::Failed { .. }));
        assert!(matches!(dash.summaries[1].outcome, StatsOutcome::Available { .. }));
    }

    #[test]
    fn test_json_shape() {
        let records = sample();
        let dash = Dashboard::build(&records, &Selection::all(&records));
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["unit"], "KRW/m");
        assert_eq!(json["records"][0]["size"], "2.5SQ");
        assert_eq!(json["summaries"][0]["outcome"]["status"], "available");
        assert_eq!(json["summaries"][1]["outcome"]["status"], "not_available");
        assert_eq!(json["pivot"]["rows"]["2.5SQ"]["2023"], 1300);
    }
}
