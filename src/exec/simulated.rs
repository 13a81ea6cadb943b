//! Simulated execution: deterministic timed replay of a plan.

use super::ExecOptions;
use crate::{OpKind, OutputEvent, ProgressEvent, Plan, RunResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Replay a plan without touching the host.
///
/// Operations are iterated in order; output lines are derived from each
/// operation's human label, never its raw command text, so a simulated
/// trace leaks no host-specific syntax. A fixed delay per emitted line
/// approximates the pacing of a real run, pause operations contribute a
/// longer delay and no line, and progress advances by exact per-operation
/// steps ending at 100. Simulation always terminates with success.
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
    debug!(operations = plan.operations().len(), "replaying plan in simulated mode");

    // Plans are never empty (banner bracketing), so this division is safe.
    let total = plan.operations().len() as f64;

    for (index, op) in plan.operations().iter().enumerate() {
        match op.kind {
            OpKind::Pause => {
                if wait(opts.pause_delay(), opts).await {
                    return RunResult::cancelled();
                }
            }
            OpKind::Banner => {
                on_output(OutputEvent::line(format!("> {}...", op.label)));
                if wait(opts.line_delay(), opts).await {
                    return RunResult::cancelled();
                }
            }
            OpKind::Command => {
                on_output(OutputEvent::line(format!("> {}...", op.label)));
                if wait(opts.line_delay(), opts).await {
                    return RunResult::cancelled();
                }
                on_output(OutputEvent::line(format!("{} done.", op.label)));
            }
        }

        on_progress(ProgressEvent {
            percent: (index + 1) as f64 / total * 100.0,
        });
    }

    RunResult::success(Some(0))
}

/// Sleep for the given delay, returning `true` if the run was cancelled.
async fn wait(delay: Duration, opts: &ExecOptions) -> bool {
    match &opts.cancel {
        Some(token) => tokio::select! {
            _ = sleep(delay) => false,
            _ = token.cancelled() => true,
        },
        None => {
            sleep(delay).await;
            false
        }
    }
}
