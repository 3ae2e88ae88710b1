//! Full write-phase-then-read-phase pipeline against a scripted runner:
//! no real executables, no chart backend.

use std::path::Path;

use tempfile::tempdir;

use veclab_bench::analysis::Analyzer;
use veclab_bench::orchestrator::{BenchTarget, Orchestrator};
use veclab_bench::render::{JsonChartWriter, Renderer};
use veclab_bench::runner::{BenchRunner, ExecOutcome, ExecOutput};
use veclab_bench::schema::DerivedSeries;
use veclab_bench::store::ResultStore;

struct ScriptedRunner;

impl BenchRunner for ScriptedRunner {
    fn execute(&self, id: &str) -> ExecOutcome {
        let table = |rows: &str| {
            format!(
                "=== Micro-benchmark ===\n\
                 Size\tTime(ms)\tGFLOPS\tBandwidth(GB/s)\n\
                 ----\t--------\t------\t---------------\n\
                 {rows}\
                 === done ===\n"
            )
        };
        match id {
            "bench_scalar" => ExecOutcome::Completed(ExecOutput {
                status: 0,
                stdout: table("1000\t10.0\t0.2\t1.2\n10000\t100.0\t0.2\t1.2\n"),
                stderr: String::new(),
            }),
            "bench_neon" => ExecOutcome::Completed(ExecOutput {
                status: 0,
                stdout: table("1000\t2.5\t0.8\t4.8\n10000\t25.0\t0.8\t4.8\n"),
                stderr: String::new(),
            }),
            "bench_autovec" => ExecOutcome::Completed(ExecOutput {
                status: 1,
                stdout: String::new(),
                stderr: "illegal instruction".to_string(),
            }),
            _ => ExecOutcome::NotFound,
        }
    }
}

fn targets() -> Vec<BenchTarget> {
    vec![
        BenchTarget::new("bench_scalar", "scalar"),
        BenchTarget::new("bench_autovec", "autovec"),
        BenchTarget::new("bench_neon", "neon"),
        BenchTarget::new("bench_accelerate", "accelerate"),
    ]
}

#[test]
fn sweep_then_analyze_then_render() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path().join("results"));

    // Write phase: two of four benchmarks succeed.
    let summary = Orchestrator::new(&ScriptedRunner, &store).run_all(&targets());
    assert_eq!(summary.captured.len(), 2);
    assert_eq!(summary.skipped.len(), 2);
    assert!(!summary.all_failed());

    // Read phase: the store is the only channel between the phases.
    let series = Analyzer::new("scalar").analyze_store(&store).unwrap();
    assert_eq!(series.len(), 2);

    let neon = series.iter().find(|s| s.name == "neon").unwrap();
    assert_eq!(neon.sizes, vec![1000, 10000]);
    match neon.derived.as_ref().unwrap() {
        DerivedSeries::Speedup { baseline, values } => {
            assert_eq!(baseline, "scalar");
            assert_eq!(values, &[4.0, 4.0]);
        }
        other => panic!("expected speedup, got {other:?}"),
    }

    let scalar = series.iter().find(|s| s.name == "scalar").unwrap();
    assert!(scalar.derived.is_none());
    assert_eq!(scalar.time_ms, vec![10.0, 100.0]);

    // Rendering: one combined artifact for everything.
    let out = dir.path().join("results").join("performance_comparison.json");
    let written = JsonChartWriter.render(&series, &out).unwrap();
    assert!(written.exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(json["implementations"].as_array().unwrap().len(), 2);
}

#[test]
fn rerunning_the_sweep_replaces_snapshots_wholesale() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path().join("results"));
    let orchestrator = Orchestrator::new(&ScriptedRunner, &store);

    orchestrator.run_all(&targets());
    let first = store.load("scalar").unwrap();
    orchestrator.run_all(&targets());
    let second = store.load("scalar").unwrap();

    // Same scripted output both times; crucially not appended.
    assert_eq!(first.len(), second.len());
    assert_snapshot_file_count(dir.path().join("results"), 2);
}

fn assert_snapshot_file_count(results_dir: impl AsRef<Path>, expected: usize) {
    let count = std::fs::read_dir(results_dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with("_results.csv"))
        .count();
    assert_eq!(count, expected);
}
