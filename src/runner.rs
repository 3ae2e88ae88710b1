//! Process execution for benchmark binaries.
//!
//! The pipeline only needs three outcomes from a run: the binary was not
//! there, it ran and failed, or it ran and we have its output. `BenchRunner`
//! is the seam that keeps the rest of the pipeline testable without real
//! executables; `ProcessRunner` is the shipped implementation.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Captured output of a completed benchmark process.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// The three outcomes the orchestrator must distinguish.
#[derive(Debug)]
pub enum ExecOutcome {
    /// The process ran to completion (any exit status).
    Completed(ExecOutput),
    /// No executable for this benchmark id.
    NotFound,
    /// Spawn failure, wait failure, or deadline expiry.
    Error(String),
}

pub trait BenchRunner {
    fn execute(&self, id: &str) -> ExecOutcome;
}

/// Runs benchmark binaries out of a build directory, one at a time, each
/// under a bounded wait so a hung benchmark cannot stall the whole sweep.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    build_dir: PathBuf,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(build_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            build_dir: build_dir.into(),
            timeout,
        }
    }

    pub fn build_dir(&self) -> &std::path::Path {
        &self.build_dir
    }
}

impl BenchRunner for ProcessRunner {
    fn execute(&self, id: &str) -> ExecOutcome {
        let path = self.build_dir.join(id);
        if !path.exists() {
            return ExecOutcome::NotFound;
        }

        let child = Command::new(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ExecOutcome::NotFound,
            Err(e) => return ExecOutcome::Error(format!("failed to spawn {id}: {e}")),
        };

        wait_bounded(child, id, self.timeout)
    }
}

/// Wait for `child` up to `timeout`, draining stdio on threads so a chatty
/// process cannot deadlock on a full pipe.
fn wait_bounded(mut child: Child, id: &str, timeout: Duration) -> ExecOutcome {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return ExecOutcome::Error(format!(
                        "{id} exceeded the {}s deadline and was killed",
                        timeout.as_secs()
                    ));
                }
                thread::sleep(Duration::from_millis(20));
            }
            Err(e) => {
                let _ = child.kill();
                return ExecOutcome::Error(format!("failed waiting on {id}: {e}"));
            }
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    ExecOutcome::Completed(ExecOutput {
        status: status.code().unwrap_or(-1),
        stdout,
        stderr,
    })
}

fn drain(pipe: Option<impl Read>) -> String {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut buf);
    }
    buf
}
