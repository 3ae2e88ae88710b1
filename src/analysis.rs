//! Cross-implementation comparison of persisted sweep results.
//!
//! Implementations are swept over their own size domains, which need not
//! match. Rather than demanding identical sweeps, the baseline's time curve
//! is resampled at each other implementation's observed sizes by piecewise
//! linear interpolation, clamped at the baseline's boundaries (no
//! extrapolation). When no baseline comparison is possible the analysis
//! degrades to a per-element cost series instead of failing.

use crate::error::AnalysisError;
use crate::schema::{DerivedSeries, ImplementationDataset, ImplementationSeries};
use crate::store::ResultStore;

/// Piecewise linear interpolation of `ys` over ascending `xs`, clamped to
/// the boundary values outside `[xs[0], xs[last]]`.
pub fn interp_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }

    // First index with xs[i] >= x; the clamps above guarantee 0 < i < len.
    let i = xs.partition_point(|&v| v < x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

pub struct Analyzer {
    baseline: String,
}

impl Analyzer {
    pub fn new(baseline: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
        }
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Load every snapshot the store knows about and analyze it.
    ///
    /// A snapshot that fails to load is skipped with a warning; it costs
    /// only its own series, never the whole analysis.
    pub fn analyze_store(
        &self,
        store: &ResultStore,
    ) -> Result<Vec<ImplementationSeries>, AnalysisError> {
        let names = store.list().map_err(|e| {
            eprintln!("could not list snapshots: {e}");
            AnalysisError::NoData
        })?;

        let mut datasets = Vec::new();
        for name in names {
            match store.load(&name) {
                Ok(records) => datasets.push(ImplementationDataset::new(name, records)),
                Err(e) => eprintln!("skipping {name}: {e}"),
            }
        }
        self.analyze(&datasets)
    }

    /// Compute the four logical series for every usable dataset.
    ///
    /// Datasets with no records are dropped. With a baseline and at least
    /// one other dataset, every non-baseline implementation gets a speedup
    /// series over its own sizes; otherwise each dataset gets a per-element
    /// cost series.
    pub fn analyze(
        &self,
        datasets: &[ImplementationDataset],
    ) -> Result<Vec<ImplementationSeries>, AnalysisError> {
        let usable: Vec<&ImplementationDataset> =
            datasets.iter().filter(|d| !d.is_empty()).collect();
        if usable.is_empty() {
            return Err(AnalysisError::NoData);
        }

        let baseline = usable.iter().find(|d| d.name == self.baseline);
        let comparable = baseline.is_some() && usable.len() > 1;

        let mut out = Vec::with_capacity(usable.len());
        for dataset in &usable {
            let mut series = ImplementationSeries::from_dataset(dataset);
            series.derived = if comparable {
                let baseline = baseline.unwrap();
                if dataset.name == baseline.name {
                    None
                } else {
                    Some(DerivedSeries::Speedup {
                        baseline: baseline.name.clone(),
                        values: speedup_over(baseline, dataset),
                    })
                }
            } else {
                Some(per_element_ns(dataset))
            };
            out.push(series);
        }
        Ok(out)
    }
}

/// Speedup of `other` relative to `baseline`, evaluated at `other`'s sizes.
///
/// The baseline samples are sorted by size before interpolation; the report
/// order is not trusted to be monotone.
fn speedup_over(baseline: &ImplementationDataset, other: &ImplementationDataset) -> Vec<f64> {
    let mut samples: Vec<(f64, f64)> = baseline
        .records
        .iter()
        .map(|r| (r.size as f64, r.time_ms))
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    let xs: Vec<f64> = samples.iter().map(|s| s.0).collect();
    let ys: Vec<f64> = samples.iter().map(|s| s.1).collect();

    other
        .records
        .iter()
        .map(|r| interp_clamped(&xs, &ys, r.size as f64) / r.time_ms)
        .collect()
}

fn per_element_ns(dataset: &ImplementationDataset) -> DerivedSeries {
    DerivedSeries::PerElementNs {
        values: dataset
            .records
            .iter()
            .map(|r| r.time_ms * 1e6 / r.size as f64)
            .collect(),
    }
}
