//! Drives the configured benchmarks through a `BenchRunner`, parses what
//! they print, and persists one snapshot per implementation.
//!
//! The sweep is partial-failure tolerant by construction: a missing binary,
//! a nonzero exit, a timeout, or a failed save skips that one implementation
//! and the sweep moves on. Only "nothing succeeded at all" is escalated, and
//! that decision belongs to the caller.

use std::collections::BTreeMap;

use crate::report;
use crate::runner::{BenchRunner, ExecOutcome};
use crate::store::ResultStore;

/// One benchmark to run: the executable name and the implementation name
/// its results are stored under.
#[derive(Debug, Clone)]
pub struct BenchTarget {
    pub id: String,
    pub name: String,
}

impl BenchTarget {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The benchmarks a stock sweep runs, in order.
pub fn default_targets() -> Vec<BenchTarget> {
    vec![
        BenchTarget::new("bench_scalar", "scalar"),
        BenchTarget::new("bench_autovec", "autovec"),
        BenchTarget::new("bench_neon", "neon"),
        BenchTarget::new("bench_accelerate", "accelerate"),
    ]
}

/// What happened to each benchmark over one sweep.
#[derive(Debug, Default)]
pub struct SweepSummary {
    /// Captured report text, keyed by benchmark id. Succeeded entries only.
    pub captured: BTreeMap<String, String>,
    /// Implementations that produced nothing usable, with the reason.
    pub skipped: Vec<(String, String)>,
}

impl SweepSummary {
    /// True when not a single benchmark produced usable data; the one
    /// condition the caller should treat as fatal.
    pub fn all_failed(&self) -> bool {
        self.captured.is_empty()
    }
}

pub struct Orchestrator<'a, R: BenchRunner> {
    runner: &'a R,
    store: &'a ResultStore,
}

impl<'a, R: BenchRunner> Orchestrator<'a, R> {
    pub fn new(runner: &'a R, store: &'a ResultStore) -> Self {
        Self { runner, store }
    }

    /// Run every target to completion, strictly in order.
    pub fn run_all(&self, targets: &[BenchTarget]) -> SweepSummary {
        let mut summary = SweepSummary::default();

        for target in targets {
            eprintln!("Running {}...", target.id);
            match self.runner.execute(&target.id) {
                ExecOutcome::NotFound => {
                    eprintln!("  {} not found, skipping", target.id);
                    summary
                        .skipped
                        .push((target.name.clone(), "executable not found".to_string()));
                }
                ExecOutcome::Error(msg) => {
                    eprintln!("  {} failed: {msg}", target.id);
                    summary.skipped.push((target.name.clone(), msg));
                }
                ExecOutcome::Completed(out) if !out.success() => {
                    eprintln!(
                        "  {} exited with status {}: {}",
                        target.id,
                        out.status,
                        out.stderr.trim()
                    );
                    summary.skipped.push((
                        target.name.clone(),
                        format!("exit status {}", out.status),
                    ));
                }
                ExecOutcome::Completed(out) => {
                    let parsed = report::parse_report(&out.stdout);
                    if parsed.dropped > 0 {
                        eprintln!(
                            "  {}: dropped {} unparseable row(s)",
                            target.name, parsed.dropped
                        );
                    }
                    match self.store.save(&target.name, &parsed.records) {
                        Ok(path) => {
                            eprintln!(
                                "  {} record(s) saved to {}",
                                parsed.records.len(),
                                path.display()
                            );
                            summary.captured.insert(target.id.clone(), out.stdout);
                        }
                        Err(e) => {
                            eprintln!("  could not save {}: {e}", target.name);
                            summary.skipped.push((target.name.clone(), e.to_string()));
                        }
                    }
                }
            }
        }

        summary
    }
}
