#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use binary_trees::{AllocatorKind, BenchConfig, BenchError, Report, Scheduler};

const UPDATE_ENV: &str = "BINARY_TREES_UPDATE_SNAPSHOTS";

fn snapshot_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "snapshots"]
        .iter()
        .collect::<PathBuf>()
        .join(format!("{name}.txt"))
}

/// Compare a rendered report against `tests/snapshots/<name>.txt`
///
/// Reports the first diverging line; set `BINARY_TREES_UPDATE_SNAPSHOTS`
/// to rewrite the stored copy instead.
pub fn assert_report_snapshot(name: &str, report: &Report) {
    let path = snapshot_path(name);
    let actual = report.render();

    if std::env::var_os(UPDATE_ENV).is_some() {
        fs::write(&path, &actual).expect("write snapshot");
        return;
    }

    let stored = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("snapshot {} unreadable: {err}", path.display()));
    let stored: Vec<&str> = stored.lines().map(|line| line.trim_end_matches('\r')).collect();
    let rendered: Vec<&str> = actual.lines().collect();

    for (row, (want, got)) in stored.iter().zip(&rendered).enumerate() {
        assert_eq!(
            want,
            got,
            "report line {} differs from {} (set {UPDATE_ENV}=1 to regenerate)",
            row + 1,
            path.display()
        );
    }
    assert_eq!(
        stored.len(),
        rendered.len(),
        "report has {} lines, snapshot {} has {}",
        rendered.len(),
        path.display(),
        stored.len()
    );
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .build()
        .expect("runtime builds")
}

/// Run a whole benchmark on a fresh multi-threaded runtime
pub fn run_blocking(scheduler: &Scheduler) -> Report {
    runtime()
        .block_on(scheduler.run())
        .expect("run succeeds")
}

/// Run a benchmark that is expected to fail, returning the runtime so the
/// caller can keep observing the pool afterwards
pub fn run_failing(scheduler: &Scheduler) -> (BenchError, tokio::runtime::Runtime) {
    let runtime = runtime();
    let err = runtime
        .block_on(scheduler.run())
        .expect_err("run is aborted");
    (err, runtime)
}

pub fn config(size: u32, allocator: AllocatorKind, jobs: usize) -> BenchConfig {
    BenchConfig::new(size, allocator)
        .with_parallelism(jobs)
        .expect("jobs is non-zero")
}
