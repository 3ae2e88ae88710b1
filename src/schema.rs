use serde::{Deserialize, Serialize};

/// One row of a benchmark results table: a problem size and the metrics
/// measured at that size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub size: u64,
    pub time_ms: f64,
    pub gflops: f64,
    pub bandwidth_gb_s: f64,
}

/// All records captured for one benchmarked implementation, in the order
/// they appeared in the source report.
///
/// A dataset is written once per sweep and replaced wholesale on the next
/// run; records are never mutated or merged across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationDataset {
    pub name: String,
    pub records: Vec<BenchmarkRecord>,
}

impl ImplementationDataset {
    pub fn new(name: impl Into<String>, records: Vec<BenchmarkRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The comparative panel computed for one implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedSeries {
    /// Ratio of the baseline's interpolated time to this implementation's
    /// time, evaluated at this implementation's own sizes.
    Speedup { baseline: String, values: Vec<f64> },
    /// Nanoseconds per element; the fallback when no cross-implementation
    /// comparison is possible.
    PerElementNs { values: Vec<f64> },
}

/// The four logical series for one implementation, all over its own size
/// domain, ready for the rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationSeries {
    pub name: String,
    pub sizes: Vec<u64>,
    pub time_ms: Vec<f64>,
    pub gflops: Vec<f64>,
    pub bandwidth_gb_s: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedSeries>,
}

impl ImplementationSeries {
    pub fn from_dataset(dataset: &ImplementationDataset) -> Self {
        Self {
            name: dataset.name.clone(),
            sizes: dataset.records.iter().map(|r| r.size).collect(),
            time_ms: dataset.records.iter().map(|r| r.time_ms).collect(),
            gflops: dataset.records.iter().map(|r| r.gflops).collect(),
            bandwidth_gb_s: dataset.records.iter().map(|r| r.bandwidth_gb_s).collect(),
            derived: None,
        }
    }
}
