//! Multi-phase repair runner.
//!
//! System-integrity tools run for minutes and print human-oriented text
//! with no machine-readable percentage, so each phase is raced against the
//! synthetic [`estimate`](crate::estimate) over its own disjoint sub-range
//! of the progress bar. Two sequential tools therefore display as one
//! continuous 0–100 progression, with each hand-off landing exactly on the
//! phase boundary.

use crate::progress::{estimate, EstimatorOptions};
use crate::{ProgressEvent, RunResult};
use futures::future::join_all;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

/// One repair phase: an external command owning a progress sub-range.
#[derive(Debug, Clone, Copy)]
pub struct RepairPhase {
    /// Human-readable phase name, prefixed onto forwarded output lines.
    pub label: &'static str,
    /// The command the host shell runs for this phase.
    pub command: &'static str,
    /// Lower bound of this phase's progress sub-range.
    pub lower: f64,
    /// Width of this phase's progress sub-range.
    pub span: f64,
}

/// The standard two-phase repair catalog: a system file check over
/// `[0, 50)`, then a component-store repair over `[50, 100]`.
pub fn default_phases() -> [RepairPhase; 2] {
    [
        RepairPhase {
            label: "System File Checker",
            command: "sfc /scannow",
            lower: 0.0,
            span: 50.0,
        },
        RepairPhase {
            label: "Component Store Repair",
            command: "DISM /Online /Cleanup-Image /RestoreHealth",
            lower: 50.0,
            span: 50.0,
        },
    ]
}

/// Run repair phases sequentially, stopping at the first failure.
///
/// Each phase's stdout/stderr lines are forwarded through `on_status`
/// prefixed with the phase label, and the estimator emits progress within
/// the phase's sub-range, ending exactly on its upper bound when the tool
/// exits.
pub async fn run_repair<S, P>(
    phases: &[RepairPhase],
    opts: EstimatorOptions,
    on_status: S,
    on_progress: P,
) -> RunResult
where
    S: Fn(String) + Send + Sync,
    P: Fn(ProgressEvent) + Send + Sync,
{
    for phase in phases {
        let result = run_phase(phase, opts.clone(), &on_status, &on_progress).await;
        if !result.is_success() {
            return result;
        }
    }
    RunResult::success(Some(0))
}

async fn run_phase<S, P>(
    phase: &RepairPhase,
    opts: EstimatorOptions,
    on_status: &S,
    on_progress: &P,
) -> RunResult
where
    S: Fn(String) + Send + Sync,
    P: Fn(ProgressEvent) + Send + Sync,
{
    on_status(format!("Starting {}...", phase.label));
    debug!(phase = phase.label, command = phase.command, "starting repair phase");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(phase.command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(phase.command);
        c
    };

    let mut child = match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return RunResult::failed(format!("failed to start {}: {e}", phase.label));
        }
    };

    let (tx, mut rx) = mpsc::channel::<(String, bool)>(64);
    let mut pumps = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        let tx = tx.clone();
        pumps.push(tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send((line, false)).await.is_err() {
                    break;
                }
            }
        }));
    }
    if let Some(stderr) = child.stderr.take() {
        let tx = tx.clone();
        pumps.push(tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send((line, true)).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let alive = Arc::new(AtomicBool::new(true));

    let wait = async {
        let status = child.wait().await;
        alive.store(false, Ordering::Relaxed);
        status
    };

    let forward = async {
        while let Some((line, is_error)) = rx.recv().await {
            if line.trim().is_empty() {
                continue;
            }
            if is_error {
                on_status(format!("{} error: {line}", phase.label));
            } else {
                on_status(format!("{}: {line}", phase.label));
            }
        }
        let _ = join_all(pumps).await;
    };

    let estimator = {
        let alive = alive.clone();
        estimate(
            move || alive.load(Ordering::Relaxed),
            phase.lower,
            phase.span,
            opts,
            |event| on_progress(event),
        )
    };

    let (status, _, _) = tokio::join!(wait, forward, estimator);

    match status {
        Ok(status) if status.success() => RunResult::success(status.code()),
        Ok(status) => RunResult {
            outcome: crate::RunOutcome::Failed(format!(
                "{} exited with status {status}",
                phase.label
            )),
            exit_code: status.code(),
        },
        Err(e) => RunResult::failed(format!("waiting for {}: {e}", phase.label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn fast_opts() -> EstimatorOptions {
        EstimatorOptions {
            poll_interval: Duration::from_millis(1),
            step: 0.05,
        }
    }

    const ECHO_PHASES: [RepairPhase; 2] = [
        RepairPhase {
            label: "Phase One",
            command: "echo scanning",
            lower: 0.0,
            span: 50.0,
        },
        RepairPhase {
            label: "Phase Two",
            command: "echo restoring",
            lower: 50.0,
            span: 50.0,
        },
    ];

    #[tokio::test]
    async fn test_phases_run_to_completion_with_exact_handoff() {
        let statuses = Arc::new(Mutex::new(Vec::new()));
        let progress = Arc::new(Mutex::new(Vec::new()));
        let s = statuses.clone();
        let p = progress.clone();

        let result = run_repair(
            &ECHO_PHASES,
            fast_opts(),
            move |line| s.lock().unwrap().push(line),
            move |event| p.lock().unwrap().push(event.percent),
        )
        .await;

        assert!(result.is_success());

        let statuses = statuses.lock().unwrap();
        assert!(statuses.iter().any(|l| l.contains("Starting Phase One")));
        assert!(statuses.iter().any(|l| l.contains("Phase One: scanning")));
        assert!(statuses.iter().any(|l| l.contains("Phase Two: restoring")));

        let progress = progress.lock().unwrap();
        // One continuous bar: monotonic overall, hitting exactly 50 at the
        // phase boundary and exactly 100 at the end.
        for pair in progress.windows(2) {
            assert!(pair[0] <= pair[1], "progress went backwards: {pair:?}");
        }
        assert!(progress.contains(&50.0));
        assert_eq!(*progress.last().unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_failing_phase_stops_the_sequence() {
        let phases = [
            RepairPhase {
                label: "Broken",
                command: "exit 3",
                lower: 0.0,
                span: 50.0,
            },
            RepairPhase {
                label: "Never Reached",
                command: "echo nope",
                lower: 50.0,
                span: 50.0,
            },
        ];

        let statuses = Arc::new(Mutex::new(Vec::new()));
        let s = statuses.clone();
        let result = run_repair(&phases, fast_opts(), move |line| {
            s.lock().unwrap().push(line)
        }, |_| {})
        .await;

        assert!(!result.is_success());
        let statuses = statuses.lock().unwrap();
        assert!(!statuses.iter().any(|l| l.contains("Never Reached")));
    }

    #[test]
    fn test_default_phases_cover_the_full_bar() {
        let phases = default_phases();
        assert_eq!(phases[0].lower, 0.0);
        assert_eq!(phases[0].lower + phases[0].span, phases[1].lower);
        assert_eq!(phases[1].lower + phases[1].span, 100.0);
    }
}
