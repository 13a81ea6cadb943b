//! Host capability probing and execution-mode selection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// The script interpreter live execution depends on.
const INTERPRETER: &str = "powershell";

/// How a plan is executed. Decided once per run and never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Spawn a real interpreter process against the host.
    Live,
    /// Replay the plan as synthetic timed output; never touches the host.
    Simulated,
}

/// Locate the script interpreter on the PATH.
pub(crate) fn interpreter_path() -> Option<PathBuf> {
    which::which(INTERPRETER).ok()
}

/// Decide the execution mode from host capabilities.
///
/// Live execution needs a Windows host with the PowerShell interpreter on
/// the PATH; anything else falls back to simulated mode automatically,
/// without an error.
pub fn detect_mode() -> ExecutionMode {
    if cfg!(windows) && interpreter_path().is_some() {
        ExecutionMode::Live
    } else {
        debug!("host does not support live execution, falling back to simulated mode");
        ExecutionMode::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mode_never_panics() {
        // Mode depends on the host; both answers are valid, but on a
        // non-Windows host the fallback must always pick Simulated.
        let mode = detect_mode();
        if !cfg!(windows) {
            assert_eq!(mode, ExecutionMode::Simulated);
        } else {
            assert!(matches!(mode, ExecutionMode::Live | ExecutionMode::Simulated));
        }
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Live).unwrap(),
            "\"live\""
        );
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Simulated).unwrap(),
            "\"simulated\""
        );
    }
}
