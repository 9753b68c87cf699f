// src/dashboard/text.rs
use crate::analysis::Trend;
use crate::dashboard::{Dashboard, StatsOutcome};
use std::fmt;

/// Plain-text rendering of a [`Dashboard`] for terminal output.
pub struct TextReport<'a>(pub &'a Dashboard);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.0;

        writeln!(f, "Cable price analysis (prices in {})", dash.unit)?;
        writeln!(
            f,
            "Years: {} | Sizes: {}",
            join(dash.selection.years.iter()),
            join(dash.selection.sizes.iter())
        )?;

        if !dash.has_data() {
            writeln!(f)?;
            return writeln!(f, "No data for the current selection.");
        }

        // 1. Trend series
        writeln!(f)?;
        writeln!(f, "Price trend")?;
        for series in &dash.series {
            if series.points.is_empty() {
                writeln!(f, "  {}: no data", series.size)?;
                continue;
            }
            let points: Vec<String> = series
                .points
                .iter()
                .map(|p| format!("{} {}", p.year, group_digits(&p.price.to_string())))
                .collect();
            writeln!(f, "  {}: {}", series.size, points.join(" | "))?;
        }

        // 2. Change rates
        writeln!(f)?;
        writeln!(f, "Change rates")?;
        let label_width = dash.summaries.iter().map(|s| s.size.len()).max().unwrap_or(0);
        for summary in &dash.summaries {
            write!(f, "  {:<width$}  ", summary.size, width = label_width)?;
            match &summary.outcome {
                StatsOutcome::Available { stats } => writeln!(
                    f,
                    "total {}% ({})  annual {}% ({})  [{}-{}]",
                    format_pct(stats.total_change_pct),
                    trend_word(stats.total_trend()),
                    format_pct(stats.avg_annual_change_pct),
                    trend_word(stats.annual_trend()),
                    stats.first_year,
                    stats.last_year
                )?,
                StatsOutcome::NotAvailable => writeln!(f, "not available")?,
                StatsOutcome::Failed { reason } => writeln!(f, "error: {}", reason)?,
            }
        }

        // 3. Pivot table
        writeln!(f)?;
        writeln!(f, "Price table")?;
        let pivot = &dash.pivot;
        let size_width = pivot.sizes().map(str::len).max().unwrap_or(0).max("size".len());
        let cells: Vec<(&str, Vec<String>)> = pivot
            .sizes()
            .map(|size| {
                let row = pivot
                    .years()
                    .iter()
                    .map(|&year| {
                        pivot
                            .get(size, year)
                            .map(|price| group_digits(&price.to_string()))
                            .unwrap_or_else(|| "-".to_string())
                    })
                    .collect();
                (size, row)
            })
            .collect();
        let col_widths: Vec<usize> = pivot
            .years()
            .iter()
            .enumerate()
            .map(|(i, year)| {
                cells
                    .iter()
                    .map(|(_, row)| row[i].len())
                    .max()
                    .unwrap_or(0)
                    .max(year.to_string().len())
            })
            .collect();

        write!(f, "  {:<width$}", "size", width = size_width)?;
        for (year, width) in pivot.years().iter().zip(&col_widths) {
            write!(f, "  {:>width$}", year, width = *width)?;
        }
        writeln!(f)?;
        for (size, row) in &cells {
            write!(f, "  {:<width$}", size, width = size_width)?;
            for (cell, width) in row.iter().zip(&col_widths) {
                write!(f, "  {:>width$}", cell, width = *width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    let parts: Vec<String> = items.map(|i| i.to_string()).collect();
    if parts.is_empty() {
        "(none)".to_string()
    } else {
        parts.join(", ")
    }
}

fn trend_word(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "up",
        Trend::Falling => "down",
    }
}

/// Inserts thousands separators into a run of ASCII digits.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals with thousands separators, e.g. `1,234.57` or `-25.00`.
fn format_pct(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(int_part), frac_part)
}
