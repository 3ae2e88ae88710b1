//! Rendering seam for the analysis output.
//!
//! Turning series into pixels is delegated to whatever chart backend the
//! deployment has; the pipeline only promises a set of numeric series per
//! implementation. The shipped implementation writes those series as one
//! chart-spec JSON document that a plotting frontend can consume directly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::schema::ImplementationSeries;

pub trait Renderer {
    /// Produce one combined artifact summarizing every implementation's
    /// series, returning the path written.
    fn render(&self, series: &[ImplementationSeries], out: &Path) -> io::Result<PathBuf>;
}

#[derive(Debug, Serialize)]
struct ChartSpec<'a> {
    title: &'static str,
    panels: [&'static str; 4],
    implementations: &'a [ImplementationSeries],
}

/// Writes the full series set as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonChartWriter;

impl Renderer for JsonChartWriter {
    fn render(&self, series: &[ImplementationSeries], out: &Path) -> io::Result<PathBuf> {
        let spec = ChartSpec {
            title: "Vector kernel performance comparison",
            panels: [
                "time_ms vs size",
                "gflops vs size",
                "bandwidth_gb_s vs size",
                "speedup or per-element vs size",
            ],
            implementations: series,
        };
        let json = serde_json::to_string_pretty(&spec).map_err(io::Error::other)?;
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out, json)?;
        Ok(out.to_path_buf())
    }
}
