//! Live execution: spawn a real interpreter over the generated script.

use super::{probe, ExecOptions};
use crate::progress::{estimate, EstimatorOptions};
use crate::{OutputEvent, ProgressEvent, Plan, RunResult};
use futures::future::join_all;
use std::io::Write as _;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Execute a plan against the host.
///
/// The plan is serialized to a process-private temporary script, a single
/// interpreter process runs it non-interactively, and its stdout/stderr are
/// forwarded line-by-line as they arrive. A synthetic progress estimator
/// races the child over the full 0–100 range since the script emits no
/// native percentage. Failures are converted to a terminal
/// [`crate::RunOutcome::Failed`], never propagated, and the script file is
/// deleted on every exit path.
pub(crate) async fn run<O, P>(
    plan: &Plan,
    opts: &ExecOptions,
    on_output: &O,
    on_progress: &P,
) -> RunResult
where
    O: Fn(OutputEvent) + Send + Sync,
    P: Fn(ProgressEvent) + Send + Sync,
{
    let Some(interpreter) = probe::interpreter_path() else {
        return RunResult::failed("PowerShell interpreter not found on PATH");
    };

    // Script artifact: owned by this run, deleted when the guard drops.
    let mut script_file = match tempfile::Builder::new()
        .prefix("tuneup-plan-")
        .suffix(".ps1")
        .tempfile()
    {
        Ok(file) => file,
        Err(e) => return RunResult::failed(format!("failed to create script file: {e}")),
    };
    if let Err(e) = script_file.write_all(plan.render_script().as_bytes()) {
        return RunResult::failed(format!("failed to write script file: {e}"));
    }
    debug!(path = %script_file.path().display(), "wrote plan script");

    let mut child = match Command::new(&interpreter)
        .arg("-NoProfile")
        .arg("-ExecutionPolicy")
        .arg("Bypass")
        .arg("-File")
        .arg(script_file.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return RunResult::failed(format!("failed to spawn interpreter: {e}")),
    };

    // Line pumps feed a single channel so the caller sees one ordered
    // sequence per stream.
    let (tx, mut rx) = mpsc::channel::<OutputEvent>(64);
    let mut pumps = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        pumps.push(tokio::spawn(pump_lines(stdout, tx.clone(), false)));
    }
    if let Some(stderr) = child.stderr.take() {
        pumps.push(tokio::spawn(pump_lines(stderr, tx.clone(), true)));
    }
    drop(tx);

    let alive = Arc::new(AtomicBool::new(true));

    let wait = async {
        let status = child.wait().await;
        alive.store(false, Ordering::Relaxed);
        status
    };

    let forward = async {
        while let Some(event) = rx.recv().await {
            on_output(event);
        }
        let _ = join_all(pumps).await;
    };

    let estimator = {
        let alive = alive.clone();
        estimate(
            move || alive.load(Ordering::Relaxed),
            0.0,
            100.0,
            EstimatorOptions::default(),
            |event| on_progress(event),
        )
    };

    let combined = async { tokio::join!(wait, forward, estimator) };

    let (status, _, _) = match &opts.cancel {
        Some(token) => tokio::select! {
            out = combined => out,
            _ = token.cancelled() => {
                // Dropping the child kills it (kill_on_drop); the script
                // guard still deletes the temp file on our way out.
                warn!("live run cancelled, killing interpreter");
                return RunResult::cancelled();
            }
        },
        None => combined.await,
    };

    match status {
        Ok(status) => {
            let code = status.code();
            if status.success() {
                RunResult::success(code)
            } else {
                RunResult {
                    outcome: crate::RunOutcome::Failed(format!(
                        "script exited with status {status}"
                    )),
                    exit_code: code,
                }
            }
        }
        Err(e) => RunResult::failed(format!("waiting for interpreter: {e}")),
    }
}

/// Forward lines from one child stream into the event channel.
async fn pump_lines<R>(stream: R, tx: mpsc::Sender<OutputEvent>, is_error: bool)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let event = if is_error {
            OutputEvent::error_line(line)
        } else {
            OutputEvent::line(line)
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
}
