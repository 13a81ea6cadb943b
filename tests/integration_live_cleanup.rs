//! Integration tests for live-mode script file cleanup.
//!
//! Live execution writes the rendered plan to a temporary script file and
//! must delete it on every exit path. These tests stand in a fake
//! interpreter on the PATH that records the script path it was handed, then
//! assert the file is gone once the run returns. Unix only: the stand-in is
//! a shell script.
#![cfg(unix)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tuneup_engine::{
    cancel_pair, ElevationProbe, ExecOptions, ExecutionMode, Executor, RunOutcome,
};

/// Serializes PATH mutation across tests in this binary.
static PATH_LOCK: Mutex<()> = Mutex::new(());

struct AlwaysElevated;

impl ElevationProbe for AlwaysElevated {
    fn is_elevated(&self) -> bool {
        true
    }

    fn relaunch_elevated(&self) -> std::io::Result<()> {
        unreachable!("an elevated process never relaunches")
    }
}

/// Restores the original PATH when dropped.
struct PathGuard {
    original: std::ffi::OsString,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        std::env::set_var("PATH", &self.original);
    }
}

/// Install a fake `powershell` into a fresh directory prepended to PATH.
///
/// The interpreter writes the script path it receives (the `-File`
/// argument) into `capture`, runs `body`, and exits 0.
fn install_fake_interpreter(dir: &Path, capture: &Path, body: &str) -> PathGuard {
    use std::os::unix::fs::PermissionsExt;

    let lock = PATH_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let interpreter = dir.join("powershell");
    let script = format!("#!/bin/sh\necho \"$5\" > '{}'\n{body}\n", capture.display());
    std::fs::write(&interpreter, script).unwrap();
    std::fs::set_permissions(&interpreter, std::fs::Permissions::from_mode(0o755)).unwrap();

    let original = std::env::var_os("PATH").unwrap_or_default();
    let mut prepended = dir.as_os_str().to_os_string();
    prepended.push(":");
    prepended.push(&original);
    std::env::set_var("PATH", prepended);

    PathGuard {
        original,
        _lock: lock,
    }
}

fn empty_plan() -> tuneup_engine::Plan {
    tuneup_engine::Plan::build(&tuneup_engine::Selection::new())
}

fn live_options() -> ExecOptions {
    ExecOptions {
        mode: Some(ExecutionMode::Live),
        ..ExecOptions::default()
    }
}

fn captured_script_path(capture: &Path) -> String {
    std::fs::read_to_string(capture)
        .expect("fake interpreter should have recorded the script path")
        .trim()
        .to_string()
}

#[tokio::test]
async fn test_script_file_is_removed_after_completed_run() {
    let dir = tempfile::tempdir().unwrap();
    let capture = dir.path().join("captured.txt");
    let _path = install_fake_interpreter(dir.path(), &capture, "echo run complete");

    let executor = Executor::with_probe(Box::new(AlwaysElevated));
    let result = executor
        .execute(&empty_plan(), live_options(), |_| {}, |_| {})
        .await
        .unwrap();
    assert!(result.is_success());

    let script_path = captured_script_path(&capture);
    assert!(script_path.contains("tuneup-plan-"), "unexpected path: {script_path}");
    assert!(
        !Path::new(&script_path).exists(),
        "script file should be deleted after the run: {script_path}"
    );
}

#[tokio::test]
async fn test_script_file_is_removed_after_cancelled_run() {
    let dir = tempfile::tempdir().unwrap();
    let capture = dir.path().join("captured.txt");
    // The fake interpreter hangs so the run is still in flight when the
    // cancel arrives.
    let _path = install_fake_interpreter(dir.path(), &capture, "sleep 30");

    let (handle, token) = cancel_pair();
    let options = ExecOptions {
        cancel: Some(token),
        ..live_options()
    };

    let executor = Executor::with_probe(Box::new(AlwaysElevated));
    let plan = empty_plan();
    let run = executor.execute(&plan, options, |_| {}, |_| {});

    let result = tokio::select! {
        out = run => out.unwrap(),
        _ = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            handle.cancel();
            std::future::pending::<()>().await;
        } => unreachable!(),
    };
    assert_eq!(result.outcome, RunOutcome::Cancelled);

    let script_path = captured_script_path(&capture);
    assert!(
        !Path::new(&script_path).exists(),
        "script file should be deleted after a cancelled run: {script_path}"
    );
}
