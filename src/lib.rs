//! Sweep runner and cross-implementation analyzer for the vector kernel
//! micro-benchmarks.
//!
//! The pipeline has two temporally disjoint phases. The write phase runs
//! each benchmark binary, parses its report text into records, and persists
//! one CSV snapshot per implementation. The read phase loads those
//! snapshots, aligns their size domains by interpolation, derives speedup
//! (or per-element cost) series, and hands everything to a renderer.

pub mod analysis;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod report;
pub mod runner;
pub mod schema;
pub mod store;
