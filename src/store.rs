//! CSV snapshot persistence, one file per implementation.
//!
//! Snapshots live under an explicitly configured results directory as
//! `<name>_results.csv` with the header `Size,Time_ms,GFLOPS,Bandwidth_GB_s`.
//! Each save replaces the whole snapshot: the rows are staged to a temp file
//! in the same directory and atomically renamed over the old one, so a failed
//! or interrupted save leaves the previous valid snapshot intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::schema::BenchmarkRecord;

pub const SNAPSHOT_HEADER: &str = "Size,Time_ms,GFLOPS,Bandwidth_GB_s";
const SNAPSHOT_SUFFIX: &str = "_results.csv";

#[derive(Debug, Clone)]
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.results_dir.join(format!("{name}{SNAPSHOT_SUFFIX}"))
    }

    /// Persist a full snapshot for `name`, replacing any previous one.
    pub fn save(&self, name: &str, records: &[BenchmarkRecord]) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.results_dir).map_err(|e| StoreError::io(name, e))?;

        // Stage in the destination directory so the final rename cannot
        // cross a filesystem boundary.
        let mut staged =
            NamedTempFile::new_in(&self.results_dir).map_err(|e| StoreError::io(name, e))?;
        writeln!(staged, "{SNAPSHOT_HEADER}").map_err(|e| StoreError::io(name, e))?;
        for r in records {
            writeln!(staged, "{},{},{},{}", r.size, r.time_ms, r.gflops, r.bandwidth_gb_s)
                .map_err(|e| StoreError::io(name, e))?;
        }
        staged.flush().map_err(|e| StoreError::io(name, e))?;

        let dest = self.snapshot_path(name);
        staged
            .persist(&dest)
            .map_err(|e| StoreError::io(name, e.error))?;
        Ok(dest)
    }

    /// Load the last saved snapshot for `name`.
    pub fn load(&self, name: &str) -> Result<Vec<BenchmarkRecord>, StoreError> {
        let path = self.snapshot_path(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(StoreError::io(name, e)),
        };

        let mut records = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if idx == 0 || line.trim().is_empty() {
                continue;
            }
            let record = parse_snapshot_row(line).ok_or(StoreError::Malformed {
                name: name.to_string(),
                line: idx + 1,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Names of every implementation with a snapshot on disk, sorted.
    ///
    /// A missing results directory is the same as an empty one.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.results_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io("<results dir>", e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io("<results dir>", e))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(SNAPSHOT_SUFFIX) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn parse_snapshot_row(line: &str) -> Option<BenchmarkRecord> {
    let mut fields = line.split(',');
    let size: u64 = fields.next()?.trim().parse().ok()?;
    let time_ms: f64 = fields.next()?.trim().parse().ok()?;
    let gflops: f64 = fields.next()?.trim().parse().ok()?;
    let bandwidth_gb_s: f64 = fields.next()?.trim().parse().ok()?;
    Some(BenchmarkRecord {
        size,
        time_ms,
        gflops,
        bandwidth_gb_s,
    })
}
