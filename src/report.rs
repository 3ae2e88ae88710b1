//! Lenient extraction of benchmark records from free-form report text.
//!
//! The micro-benchmarks print their results as a loosely formatted table:
//!
//! ```text
//! === Scalar AXPY Micro-benchmark ===
//! Size    Time(ms)    GFLOPS      Bandwidth(GB/s)
//! ----    --------    -------     ---------------
//! 1024    0.532       7.12        45.3
//! ```
//!
//! That layout is not a stable contract, so parsing is deliberately lenient:
//! a row that fails to parse is dropped and counted, never fatal. Lines are
//! first classified into a tagged kind, then a two-state machine scans for
//! tables; both halves are testable on their own.

use crate::schema::BenchmarkRecord;

/// Column labels that mark a results-table header. A header line must name
/// the size column and one of the time columns (`Time_ms` is the snapshot
/// spelling, accepted so re-parsed artifacts classify the same way).
const SIZE_LABEL: &str = "Size";
const TIME_LABELS: [&str; 2] = ["Time(ms)", "Time_ms"];

/// Token that opens a `=== section ===` banner, ending any open table.
const SECTION_DELIMITER: &str = "===";

/// Tagged classification of a single report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Names both the size and time columns; opens a results table.
    Header,
    /// A run of dashes under the header; skipped, no state change.
    Separator,
    /// A `===`-prefixed banner; closes any open table.
    SectionEnd,
    /// Whitespace only.
    Blank,
    /// Anything else; a data candidate when inside a table.
    Candidate,
}

pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(SECTION_DELIMITER) {
        return LineKind::SectionEnd;
    }
    if line.contains(SIZE_LABEL) && TIME_LABELS.iter().any(|l| line.contains(l)) {
        return LineKind::Header;
    }
    if trimmed.chars().all(|c| c == '-' || c.is_whitespace()) {
        return LineKind::Separator;
    }
    LineKind::Candidate
}

/// Result of one parse call: the records recovered plus a count of data
/// candidates that were dropped, so leniency stays observable.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<BenchmarkRecord>,
    pub dropped: usize,
}

/// Extract every record from `text`, in order of appearance.
///
/// Never fails: unrecognizable input yields an empty outcome, and a bad row
/// only bumps `dropped`. Multiple tables in one report are all scanned; each
/// header re-opens the table state.
pub fn parse_report(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut in_table = false;

    for line in text.lines() {
        match classify(line) {
            LineKind::Header => in_table = true,
            LineKind::SectionEnd => in_table = false,
            LineKind::Separator | LineKind::Blank => {}
            LineKind::Candidate => {
                if in_table {
                    match parse_row(line) {
                        Some(record) => outcome.records.push(record),
                        None => outcome.dropped += 1,
                    }
                }
            }
        }
    }

    outcome
}

/// Parse one data row: at least four whitespace-separated tokens, in the
/// order size, time, GFLOPS, bandwidth. Extra tokens are ignored.
fn parse_row(line: &str) -> Option<BenchmarkRecord> {
    let mut tokens = line.split_whitespace();
    let size: u64 = tokens.next()?.parse().ok()?;
    if size == 0 {
        return None;
    }
    let time_ms: f64 = tokens.next()?.parse().ok()?;
    let gflops: f64 = tokens.next()?.parse().ok()?;
    let bandwidth_gb_s: f64 = tokens.next()?.parse().ok()?;
    Some(BenchmarkRecord {
        size,
        time_ms,
        gflops,
        bandwidth_gb_s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
=== Scalar AXPY Micro-benchmark ===
Size\tTime(ms)\tGFLOPS\t\tBandwidth(GB/s)
----\t--------\t-------\t\t---------------
1024\t0.532\t\t7.12\t\t45.3
4096\t2.100\t\t7.80\t\t46.1

=== Detailed Analysis (size=1048576) ===
Single iteration time: 1.2 ms
";

    #[test]
    fn classifies_line_kinds() {
        assert_eq!(classify("Size\tTime(ms)\tGFLOPS"), LineKind::Header);
        assert_eq!(classify("Size,Time_ms,GFLOPS,Bandwidth_GB_s"), LineKind::Header);
        assert_eq!(classify("----\t--------"), LineKind::Separator);
        assert_eq!(classify("=== Scalar AXPY ==="), LineKind::SectionEnd);
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("1024 0.5 7.1 45.3"), LineKind::Candidate);
    }

    #[test]
    fn no_header_means_no_records() {
        let outcome = parse_report("random text\n1024 0.5 7.1 45.3\nmore text\n");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.dropped, 0);
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(parse_report("").records.is_empty());
    }

    #[test]
    fn extracts_single_row() {
        let text = "Size Time(ms) GFLOPS Bandwidth(GB/s)\n1024 0.532 7.12 45.3\n";
        let outcome = parse_report(text);
        assert_eq!(outcome.records.len(), 1);
        let r = &outcome.records[0];
        assert_eq!(r.size, 1024);
        assert_eq!(r.time_ms, 0.532);
        assert_eq!(r.gflops, 7.12);
        assert_eq!(r.bandwidth_gb_s, 45.3);
    }

    #[test]
    fn table_ends_at_section_banner() {
        let outcome = parse_report(REPORT);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.dropped, 0);
        assert_eq!(outcome.records[0].size, 1024);
        assert_eq!(outcome.records[1].size, 4096);
    }

    #[test]
    fn bad_rows_are_dropped_and_counted() {
        let text = "Size Time(ms) GFLOPS Bandwidth(GB/s)\n\
                    1024 0.5\n\
                    abc 0.5 7.1 45.3\n\
                    0 0.5 7.1 45.3\n\
                    2048 1.0 7.5 46.0\n";
        let outcome = parse_report(text);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].size, 2048);
        assert_eq!(outcome.dropped, 3);
    }

    #[test]
    fn reenters_table_on_second_header() {
        let text = "Size Time(ms) GFLOPS Bandwidth(GB/s)\n\
                    1024 0.5 7.1 45.3\n\
                    === end ===\n\
                    ignored 1 2 3\n\
                    Size Time(ms) GFLOPS Bandwidth(GB/s)\n\
                    2048 1.0 7.5 46.0\n";
        let outcome = parse_report(text);
        let sizes: Vec<u64> = outcome.records.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![1024, 2048]);
        assert_eq!(outcome.dropped, 0);
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let text = "Size Time(ms) GFLOPS Bandwidth(GB/s)\n1024 0.5 7.1 45.3 trailing junk\n";
        let outcome = parse_report(text);
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn preserves_order_of_appearance() {
        let text = "Size Time(ms) GFLOPS Bandwidth(GB/s)\n\
                    4096 2.0 7.8 46.1\n\
                    1024 0.5 7.1 45.3\n";
        let outcome = parse_report(text);
        let sizes: Vec<u64> = outcome.records.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![4096, 1024]);
    }
}
