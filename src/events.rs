//! Event and result types emitted during a run.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// One line of output from a run.
///
/// Events are emitted in strict order within a single stream; interleaving
/// between a live child's stdout and stderr is best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEvent {
    /// When the line was observed.
    pub timestamp: SystemTime,
    /// The line text, without a trailing newline.
    pub text: String,
    /// Whether the line came from the error stream.
    pub is_error: bool,
}

impl OutputEvent {
    /// A standard-output line observed now.
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            text: text.into(),
            is_error: false,
        }
    }

    /// An error-stream line observed now.
    pub fn error_line(text: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            text: text.into(),
            is_error: true,
        }
    }
}

/// A progress update in the 0–100 range.
///
/// Within a single run, percentages are monotonically non-decreasing, and
/// the terminal event of an estimator phase equals that phase's upper bound
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Absolute percentage, 0.0 through 100.0.
    pub percent: f64,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RunOutcome {
    /// The run completed; simulated runs always end here.
    Success,
    /// The run failed with a human-readable reason. Never retried
    /// automatically; retry is the caller re-issuing the action.
    Failed(String),
    /// Live execution requires elevation; an elevated relaunch was
    /// requested and this run did nothing. Not a failure.
    ElevationRequired,
    /// The run was cancelled mid-flight via a [`crate::CancelToken`].
    /// Distinct from `Failed`: partially applied changes are possible.
    Cancelled,
}

/// Terminal result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Exit code of the child process, when one ran to completion.
    pub exit_code: Option<i32>,
}

impl RunResult {
    /// A successful run with the given exit code.
    pub fn success(exit_code: Option<i32>) -> Self {
        Self {
            outcome: RunOutcome::Success,
            exit_code,
        }
    }

    /// A failed run with a human-readable reason and no exit code.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            outcome: RunOutcome::Failed(reason.into()),
            exit_code: None,
        }
    }

    /// A run aborted because elevation is required.
    pub fn elevation_required() -> Self {
        Self {
            outcome: RunOutcome::ElevationRequired,
            exit_code: None,
        }
    }

    /// A cancelled run.
    pub fn cancelled() -> Self {
        Self {
            outcome: RunOutcome::Cancelled,
            exit_code: None,
        }
    }

    /// Whether the run completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Success)
    }
}

/// Coarse status transitions reported by the installer pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InstallStatus {
    /// Fetching the installer binary.
    Downloading,
    /// Running the installer silently.
    Installing,
    /// The installer exited successfully.
    Installed,
}

impl InstallStatus {
    /// Human-readable description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Downloading => "Downloading",
            Self::Installing => "Installing",
            Self::Installed => "Installed",
        }
    }
}
