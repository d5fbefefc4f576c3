//! Shared integration-test harness for running the `govdocs` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables that would leak the caller's settings into a run.
const ISOLATED_ENV: [&str; 7] = [
    "GOVDOCS_CONTENT_DIR",
    "GOVDOCS_CONFIG",
    "GOVDOCS_COLOR",
    "GOVDOCS_LOG_FORMAT",
    "GOVDOCS_LOG_LEVEL",
    "GOVDOCS_BIND",
    "GOVDOCS_METRICS_PORT",
];

/// Returns the absolute path to a file under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// The fixture content directory.
pub fn fixture_content() -> PathBuf {
    fixture_path("content")
}

/// Runs `govdocs` with `args` in `dir` and waits for it to exit.
#[allow(clippy::missing_panics_doc)]
pub fn run_in(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_govdocs"));
    cmd.args(args).current_dir(dir).env("NO_COLOR", "1");
    for var in ISOLATED_ENV {
        cmd.env_remove(var);
    }
    cmd.output().expect("failed to run govdocs")
}

/// Runs `govdocs` with `args` against the fixture content directory.
pub fn run_with_fixtures(args: &[&str]) -> Output {
    let content = fixture_content();
    let mut full = vec!["--content-dir", content.to_str().expect("non-UTF-8 path")];
    full.extend_from_slice(args);
    let cwd = tempfile::tempdir().expect("failed to create temp dir");
    run_in(cwd.path(), &full)
}

/// Lossy stdout of a finished run.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished run.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
