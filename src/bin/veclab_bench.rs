use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use veclab_bench::analysis::Analyzer;
use veclab_bench::orchestrator::{default_targets, Orchestrator, SweepSummary};
use veclab_bench::render::{JsonChartWriter, Renderer};
use veclab_bench::runner::ProcessRunner;
use veclab_bench::store::ResultStore;

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full sweep, then analyze and render the results.
    Run,

    /// Run the benchmarks and persist snapshots, without analysis.
    Sweep,

    /// Analyze previously persisted snapshots and render the comparison.
    Analyze,
}

#[derive(Parser, Debug)]
#[command(name = "veclab-bench")]
#[command(about = "Runs the vector kernel micro-benchmarks and compares implementations")]
struct Args {
    /// Directory holding the compiled benchmark binaries.
    #[arg(long, default_value = "build", global = true)]
    build_dir: PathBuf,

    /// Directory snapshots are written to and read from.
    #[arg(long, default_value = "results", global = true)]
    results_dir: PathBuf,

    /// Implementation used as the speedup reference.
    #[arg(long, default_value = "scalar", global = true)]
    baseline: String,

    /// Per-benchmark wall-clock limit in seconds.
    #[arg(long, default_value_t = 300, global = true)]
    timeout_secs: u64,

    /// Where to write the combined chart spec. Defaults to
    /// performance_comparison.json inside the results directory.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

fn sweep(args: &Args, store: &ResultStore) -> Result<SweepSummary, ExitCode> {
    if !args.build_dir.is_dir() {
        eprintln!(
            "Build directory {} not found. Build the benchmarks first (e.g. cmake + make).",
            args.build_dir.display()
        );
        return Err(ExitCode::from(1));
    }

    let runner = ProcessRunner::new(&args.build_dir, Duration::from_secs(args.timeout_secs));
    let summary = Orchestrator::new(&runner, store).run_all(&default_targets());

    for (name, reason) in &summary.skipped {
        eprintln!("Skipped {name}: {reason}");
    }
    if summary.all_failed() {
        eprintln!("No benchmarks were successfully run.");
        return Err(ExitCode::from(1));
    }
    eprintln!(
        "{} of {} benchmark(s) succeeded; snapshots in {}",
        summary.captured.len(),
        summary.captured.len() + summary.skipped.len(),
        store.results_dir().display()
    );
    Ok(summary)
}

fn analyze(args: &Args, store: &ResultStore) -> ExitCode {
    let analyzer = Analyzer::new(&args.baseline);
    let series = match analyzer.analyze_store(store) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            return ExitCode::from(1);
        }
    };

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.results_dir.join("performance_comparison.json"));
    match JsonChartWriter.render(&series, &out) {
        Ok(path) => {
            eprintln!("Comparison written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Could not write {}: {e}", out.display());
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let store = ResultStore::new(&args.results_dir);

    match args.cmd {
        Command::Run => match sweep(&args, &store) {
            Ok(_) => analyze(&args, &store),
            Err(code) => code,
        },
        Command::Sweep => match sweep(&args, &store) {
            Ok(_) => ExitCode::SUCCESS,
            Err(code) => code,
        },
        Command::Analyze => analyze(&args, &store),
    }
}
