//! Plan execution.
//!
//! The executor consumes a [`Plan`] and drives it to a terminal
//! [`RunResult`], streaming [`OutputEvent`]s and [`ProgressEvent`]s to the
//! caller's sinks along the way. Execution is polymorphic over two modes
//! behind one contract: live mode spawns a real interpreter process, while
//! simulated mode replays the plan as deterministic timed output without
//! touching the host. The mode is decided once per run from host
//! capabilities (or an explicit override) and never mixed.
//!
//! # Example
//!
//! ```rust,no_run
//! use tuneup_engine::{ExecOptions, Executor, Plan, Selection, Tweak};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut selection = Selection::new();
//!     selection.enable(Tweak::DisableTelemetry);
//!     let plan = Plan::build(&selection);
//!
//!     let executor = Executor::new();
//!     let result = executor
//!         .execute(
//!             &plan,
//!             ExecOptions::default(),
//!             |out| println!("{}", out.text),
//!             |progress| println!("{:.0}%", progress.percent),
//!         )
//!         .await;
//!
//!     match result {
//!         Ok(run) => println!("{:?}", run.outcome),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

mod live;
mod probe;
mod simulated;

pub use probe::{detect_mode, ExecutionMode};

use crate::elevation::{check_and_maybe_relaunch, ElevationProbe, ElevationStatus, HostElevation};
use crate::{CancelToken, OutputEvent, ProgressEvent, Plan, RunResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Options controlling one execution run.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Force an execution mode instead of probing the host.
    ///
    /// Mostly useful for tests and previews; `None` (the default) probes
    /// host capabilities via [`detect_mode`].
    pub mode: Option<ExecutionMode>,

    /// Delay after each simulated output line. `None` uses 200ms, the
    /// pacing of a real run.
    pub line_delay: Option<Duration>,

    /// Delay contributed by simulated pause operations. `None` uses 500ms.
    pub pause_delay: Option<Duration>,

    /// Cancellation token observed at the run's suspension points.
    pub cancel: Option<CancelToken>,
}

impl ExecOptions {
    pub(crate) fn line_delay(&self) -> Duration {
        self.line_delay.unwrap_or(Duration::from_millis(200))
    }

    pub(crate) fn pause_delay(&self) -> Duration {
        self.pause_delay.unwrap_or(Duration::from_millis(500))
    }
}

/// Errors that reject a run before it starts.
///
/// Failures *during* a run never surface here; they become a terminal
/// [`crate::RunOutcome::Failed`] so the orchestration session itself cannot
/// crash from a single failed operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecError {
    /// Another run is active on this executor. Runs are rejected, not
    /// queued; wait for the terminal result before issuing another.
    #[error("an execution run is already active")]
    RunActive,
}

/// Drives plans to completion, one run at a time.
///
/// The privilege probe is injected at construction so hosts and tests can
/// substitute their own; [`Executor::new`] uses the real
/// [`HostElevation`] probe.
pub struct Executor {
    elevation: Box<dyn ElevationProbe>,
    active: AtomicBool,
}

impl Executor {
    /// Executor with the real host privilege probe.
    pub fn new() -> Self {
        Self::with_probe(Box::new(HostElevation))
    }

    /// Executor with a custom privilege probe.
    pub fn with_probe(elevation: Box<dyn ElevationProbe>) -> Self {
        Self {
            elevation,
            active: AtomicBool::new(false),
        }
    }

    /// Execute a plan, streaming output and progress to the given sinks.
    ///
    /// The sinks may be invoked from background tasks; callers that feed a
    /// single-threaded UI are responsible for marshaling back to it.
    /// Exactly one terminal [`RunResult`] is produced per accepted run.
    ///
    /// Live mode checks elevation first and aborts with
    /// [`crate::RunOutcome::ElevationRequired`] when the process lacks
    /// rights (after requesting an elevated relaunch); simulated mode
    /// bypasses the check since it never touches the host.
    pub async fn execute<O, P>(
        &self,
        plan: &Plan,
        opts: ExecOptions,
        on_output: O,
        on_progress: P,
    ) -> Result<RunResult, ExecError>
    where
        O: Fn(OutputEvent) + Send + Sync,
        P: Fn(ProgressEvent) + Send + Sync,
    {
        self.active
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ExecError::RunActive)?;
        let _guard = ActiveGuard(&self.active);

        let mode = opts.mode.unwrap_or_else(detect_mode);
        debug!(?mode, operations = plan.operations().len(), "starting run");

        if mode == ExecutionMode::Live {
            if let ElevationStatus::RelaunchRequested =
                check_and_maybe_relaunch(self.elevation.as_ref())
            {
                return Ok(RunResult::elevation_required());
            }
        }

        let result = match mode {
            ExecutionMode::Live => live::run(plan, &opts, &on_output, &on_progress).await,
            ExecutionMode::Simulated => {
                simulated::run(plan, &opts, &on_output, &on_progress).await
            }
        };

        debug!(outcome = ?result.outcome, "run finished");
        Ok(result)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the active flag when a run ends on any path.
struct ActiveGuard<'a>(&'a AtomicBool);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RunOutcome, Selection};

    struct NeverElevated;

    impl ElevationProbe for NeverElevated {
        fn is_elevated(&self) -> bool {
            false
        }
        fn relaunch_elevated(&self) -> std::io::Result<()> {
            Err(std::io::Error::other("no prompt in tests"))
        }
    }

    #[tokio::test]
    async fn test_live_mode_without_elevation_aborts() {
        let executor = Executor::with_probe(Box::new(NeverElevated));
        let plan = Plan::build(&Selection::new());

        let result = executor
            .execute(
                &plan,
                ExecOptions {
                    mode: Some(ExecutionMode::Live),
                    ..Default::default()
                },
                |_| {},
                |_| {},
            )
            .await
            .unwrap();

        assert_eq!(result.outcome, RunOutcome::ElevationRequired);
    }

    #[tokio::test]
    async fn test_simulated_mode_bypasses_elevation() {
        // The probe would deny; simulated runs must never consult it.
        let executor = Executor::with_probe(Box::new(NeverElevated));
        let plan = Plan::build(&Selection::new());

        let result = executor
            .execute(
                &plan,
                ExecOptions {
                    mode: Some(ExecutionMode::Simulated),
                    line_delay: Some(Duration::from_millis(1)),
                    pause_delay: Some(Duration::from_millis(1)),
                    ..Default::default()
                },
                |_| {},
                |_| {},
            )
            .await
            .unwrap();

        assert!(result.is_success());
    }

    #[test]
    fn test_exec_options_default_delays() {
        let opts = ExecOptions::default();
        assert_eq!(opts.line_delay(), Duration::from_millis(200));
        assert_eq!(opts.pause_delay(), Duration::from_millis(500));
    }
}
