// src/extractors/price.rs

// --- Imports ---
use crate::extractors::record::{PriceRecord, RecordSet};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

// --- Line Recognizers (Lazy Static) ---
// Tried in this order on every line. The first pattern found anywhere in the
// line claims the whole line, later recognizers never see it.
static RECOGNIZERS: Lazy<Vec<Recognizer>> = Lazy::new(|| {
    vec![
        // "2020년" - year header
        Recognizer::new(TokenKind::Year, r"(\d{4})년", read_year),
        // "2.5SQ", "16SQ" - cable cross-section
        Recognizer::new(TokenKind::Size, r"(\d+(?:\.\d+)?SQ)", read_size),
        // "1,300" or "1300" - price; grouped form is tried first so the separators are kept together
        Recognizer::new(TokenKind::Price, r"(\d{1,3}(?:,\d{3})+|\d+)", read_price),
    ]
});

// --- Tokens ---

/// Which recognizer claimed a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Year,
    Size,
    Price,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Year => "year",
            TokenKind::Size => "size",
            TokenKind::Price => "price",
        };
        f.write_str(name)
    }
}

/// The value read off a claimed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    Year(u32),
    Size(String),
    Price(u64),
}

struct Recognizer {
    kind: TokenKind,
    pattern: Regex,
    read: fn(&Captures) -> Option<LineToken>,
}

impl Recognizer {
    fn new(kind: TokenKind, pattern: &str, read: fn(&Captures) -> Option<LineToken>) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("Failed to compile line recognizer"),
            read,
        }
    }
}

// Zero code points of the decimal digit runs the listings are known to use.
// `\d` matches any Unicode decimal digit; digits outside these runs make the token unreadable.
const DIGIT_ZEROS: [char; 5] = [
    '0',        // ASCII
    '\u{FF10}', // full-width
    '\u{0660}', // Arabic-Indic
    '\u{06F0}', // extended Arabic-Indic
    '\u{0966}', // Devanagari
];

fn ascii_digit(c: char) -> Option<char> {
    DIGIT_ZEROS.iter().find_map(|&zero| {
        let offset = (c as u32).checked_sub(zero as u32)?;
        (offset < 10).then(|| char::from(b'0' + offset as u8))
    })
}

/// Rewrites a number as ASCII, dropping `,` separators. `None` if any digit cannot be folded.
fn fold_digits(token: &str) -> Option<String> {
    token.chars().filter(|&c| c != ',').map(ascii_digit).collect()
}

fn read_year(caps: &Captures) -> Option<LineToken> {
    fold_digits(&caps[1])?.parse().ok().map(LineToken::Year)
}

fn read_size(caps: &Captures) -> Option<LineToken> {
    // "２.５SQ" and "2.5SQ" name the same size
    let number = caps[1].strip_suffix("SQ")?;
    let mut size = number
        .split('.')
        .map(fold_digits)
        .collect::<Option<Vec<_>>>()?
        .join(".");
    size.push_str("SQ");
    Some(LineToken::Size(size))
}

fn read_price(caps: &Captures) -> Option<LineToken> {
    // Values too large for u64 are treated like any other unreadable line
    fold_digits(&caps[1])?.parse().ok().map(LineToken::Price)
}

/// Runs the recognizer chain over one line.
///
/// Returns `None` when no recognizer matches. A line can be claimed but still
/// carry no token (an out-of-range price, or digits that cannot be folded to
/// ASCII), in which case it is consumed and ignored.
pub fn classify_line(line: &str) -> Option<(TokenKind, Option<LineToken>)> {
    RECOGNIZERS.iter().find_map(|rec| {
        rec.pattern
            .captures(line)
            .map(|caps| (rec.kind, (rec.read)(&caps)))
    })
}

// --- Scanner State ---

/// Rolling context of the scan.
///
/// Grammar rule: a year line sets `year`, a size line sets `size`, and neither
/// is ever cleared. Every later price line attaches to whatever pair is
/// current, until another year or size line replaces one half of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub year: Option<u32>,
    pub size: Option<String>,
}

impl ScanState {
    /// Folds one token into the state, returning a record when a price line completes one.
    pub fn apply(&mut self, token: LineToken) -> Option<PriceRecord> {
        match token {
            LineToken::Year(year) => {
                self.year = Some(year);
                None
            }
            LineToken::Size(size) => {
                self.size = Some(size);
                None
            }
            // Zero is a placeholder in the listings, not a price
            LineToken::Price(0) => None,
            LineToken::Price(price) => {
                let year = self.year?;
                let size = self.size.as_ref()?;
                Some(PriceRecord::new(year, size.clone(), price))
            }
        }
    }
}

/// How a single input line was handled, for the `--debug` trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNote {
    pub line_number: usize, // 1-based
    pub text: String,
    pub kind: Option<TokenKind>,
    pub record: Option<PriceRecord>,
}

// --- Main Extractor Structure ---
#[derive(Debug, Default)]
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Scans the raw listing line by line and returns the deduplicated, sorted records.
    /// Never fails: lines that are not understood are skipped.
    pub fn extract(&self, raw_text: &str) -> RecordSet {
        let mut state = ScanState::default();
        let mut records = Vec::new();
        let mut lines = 0usize;

        for line in raw_text.lines() {
            lines += 1;
            if let Some((_, Some(token))) = classify_line(line) {
                if let Some(record) = state.apply(token) {
                    tracing::trace!("Line {}: {:?}", lines, record);
                    records.push(record);
                }
            }
        }

        tracing::debug!("Scanned {} lines, {} price lines attached to a year and size", lines, records.len());
        RecordSet::from_records(records)
    }

    /// Same scan as [`extract`](Self::extract), but reports what happened on every line.
    pub fn annotate(&self, raw_text: &str) -> Vec<LineNote> {
        let mut state = ScanState::default();

        raw_text
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                let classified = classify_line(line);
                let kind = classified.as_ref().map(|(kind, _)| *kind);
                let record = classified
                    .and_then(|(_, token)| token)
                    .and_then(|token| state.apply(token));
                LineNote {
                    line_number: idx + 1,
                    text: line.to_string(),
                    kind,
                    record,
                }
            })
            .collect()
    }
}

/// Shorthand for `PriceExtractor::new().extract(raw_text)`.
pub fn extract(raw_text: &str) -> RecordSet {
    PriceExtractor::new().extract(raw_text)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_listing() {
        let text = "2020년\n2.5SQ\n1,000\n2023년\n2.5SQ\n1,300\n";
        let records = extract(text);
        assert_eq!(
            records.as_slice(),
            &[
                PriceRecord::new(2020, "2.5SQ", 1000),
                PriceRecord::new(2023, "2.5SQ", 1300),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("\n\n  \n").is_empty());
    }

    #[test]
    fn test_price_before_context_is_dropped() {
        let text = "1,000\n2020년\n500\n4SQ\n700";
        let records = extract(text);
        // "1,000" has neither year nor size, "500" has no size yet
        assert_eq!(records.as_slice(), &[PriceRecord::new(2020, "4SQ", 700)]);
    }

    #[test]
    fn test_zero_price_is_dropped() {
        let records = extract("2020년\n4SQ\n0\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_duplicate_lines_collapse() {
        let records = extract("2020년\n4SQ\n1,500\n1,500\n");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_state_persists_across_prices() {
        let text = "2021년\n6SQ\n2,100\n2,200\n10SQ\n3,900\n2022년\n4,100";
        let records = extract(text);
        assert_eq!(
            records.as_slice(),
            &[
                PriceRecord::new(2021, "10SQ", 3900),
                PriceRecord::new(2021, "6SQ", 2100),
                PriceRecord::new(2021, "6SQ", 2200),
                // size carried over into the new year
                PriceRecord::new(2022, "10SQ", 4100),
            ]
        );
    }

    #[test]
    fn test_first_recognizer_claims_line() {
        // Year wins over size and price on the same line
        assert_eq!(
            classify_line("2020년 2.5SQ 1,000원"),
            Some((TokenKind::Year, Some(LineToken::Year(2020))))
        );
        // Size wins over price
        assert_eq!(
            classify_line("규격 16SQ 3,000"),
            Some((TokenKind::Size, Some(LineToken::Size("16SQ".to_string()))))
        );
        assert_eq!(classify_line("단가: 12,345,678원"), Some((TokenKind::Price, Some(LineToken::Price(12_345_678)))));
        assert_eq!(classify_line("전선 가격표"), None);
    }

    #[test]
    fn test_ungrouped_price_keeps_whole_digit_run() {
        // Deliberately the whole run: a leading-triple-only match would read 123 here
        assert_eq!(classify_line("12345"), Some((TokenKind::Price, Some(LineToken::Price(12345)))));
    }

    #[test]
    fn test_overflowing_price_is_consumed_without_token() {
        assert_eq!(classify_line("99999999999999999999999"), Some((TokenKind::Price, None)));
    }

    #[test]
    fn test_every_size_is_a_cross_section_token() {
        let text = "2020년\n1.5SQ\n800\n2.5 SQ\n900\n35SQ\n9,000";
        let size_re = Regex::new(r"^[0-9]+(?:\.[0-9]+)?SQ$").unwrap();
        let records = extract(text);
        assert!(!records.is_empty());
        for r in &records {
            assert!(size_re.is_match(&r.size), "bad size token {}", r.size);
            assert!(r.price > 0);
        }
    }

    #[test]
    fn test_full_width_digits() {
        let text = "２０２０년\n2.5SQ\n１,０００\n２０２３년\n２.５SQ\n1,300\n";
        let records = extract(text);
        assert_eq!(
            records.as_slice(),
            &[
                PriceRecord::new(2020, "2.5SQ", 1000),
                PriceRecord::new(2023, "2.5SQ", 1300),
            ]
        );
    }

    #[test]
    fn test_fold_digits() {
        assert_eq!(fold_digits("１２,３４５").as_deref(), Some("12345"));
        assert_eq!(fold_digits("٢٠٢٠").as_deref(), Some("2020"));
        assert_eq!(fold_digits("1,000").as_deref(), Some("1000"));
        assert_eq!(
            classify_line("２.５SQ"),
            Some((TokenKind::Size, Some(LineToken::Size("2.5SQ".to_string()))))
        );
        // Bengali digits are recognized by the pattern but not folded
        assert_eq!(fold_digits("২০২০"), None);
        assert_eq!(classify_line("২০২০"), Some((TokenKind::Price, None)));
    }

    #[test]
    fn test_annotate_matches_extract() {
        let text = "가격표\n2020년\n2.5SQ\n0\n1,000";
        let notes = PriceExtractor::new().annotate(text);
        assert_eq!(notes.len(), 5);
        assert_eq!(notes[0].kind, None);
        assert_eq!(notes[1].kind, Some(TokenKind::Year));
        assert_eq!(notes[2].kind, Some(TokenKind::Size));
        assert_eq!(notes[3].kind, Some(TokenKind::Price));
        assert_eq!(notes[3].record, None);
        assert_eq!(notes[4].line_number, 5);
        assert_eq!(notes[4].record, Some(PriceRecord::new(2020, "2.5SQ", 1000)));
    }
}
