// src/utils/scan_debug.rs
use crate::extractors::LineNote;
use std::fmt::Write;

/// Renders a line-by-line trace of the scan: which recognizer claimed each line
/// and the record it produced, if any.
pub fn render_scan_trace(notes: &[LineNote]) -> String {
    let width = notes.last().map(|n| n.line_number.to_string().len()).unwrap_or(1);
    let mut out = String::new();

    for note in notes {
        let kind = note.kind.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
        // Writing into a String cannot fail
        let _ = write!(out, "{:>width$} | {:<5} | {}", note.line_number, kind, note.text, width = width);
        if let Some(record) = &note.record {
            let _ = write!(out, "  => {} {} {}", record.year, record.size, record.price);
        }
        out.push('\n');
    }

    out
}
