//! Privilege checking and elevated relaunch.
//!
//! Live execution applies system-wide changes and requires an elevated
//! process. The guard checks the current privilege level and, when the
//! process is not elevated, asks the host to relaunch the same executable
//! with elevated rights. The current run then aborts without executing
//! anything. Simulated execution bypasses the guard entirely.

use tracing::{debug, warn};

/// Outcome of the elevation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationStatus {
    /// The process holds the required privilege; the run may proceed.
    Authorized,
    /// An elevated relaunch was requested (or refused by the user/host);
    /// the current run must abort without executing any operation.
    RelaunchRequested,
}

/// Host privilege probe, injected into the executor.
///
/// The default implementation is [`HostElevation`]; tests substitute a fake
/// to exercise both paths without touching the host.
pub trait ElevationProbe: Send + Sync {
    /// Whether the current process already holds elevated rights.
    fn is_elevated(&self) -> bool;

    /// Ask the host to start an elevated instance of the current executable.
    ///
    /// Returns `Ok(())` only once the elevated process has actually been
    /// spawned, so the caller never tears down its session on an unconfirmed
    /// relaunch. A refused prompt surfaces as an error.
    fn relaunch_elevated(&self) -> std::io::Result<()>;
}

/// Real host probe.
///
/// - Unix: effective uid 0.
/// - Windows: `net session` succeeds only in an elevated shell.
pub struct HostElevation;

impl ElevationProbe for HostElevation {
    fn is_elevated(&self) -> bool {
        #[cfg(unix)]
        {
            nix::unistd::geteuid().is_root()
        }
        #[cfg(windows)]
        {
            std::process::Command::new("net")
                .arg("session")
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .status()
                .map(|s| s.success())
                .unwrap_or(false)
        }
        #[cfg(not(any(unix, windows)))]
        {
            false
        }
    }

    fn relaunch_elevated(&self) -> std::io::Result<()> {
        let exe = std::env::current_exe()?;
        debug!(exe = %exe.display(), "requesting elevated relaunch");

        #[cfg(windows)]
        {
            std::process::Command::new("powershell")
                .arg("-NoProfile")
                .arg("-Command")
                .arg(format!(
                    "Start-Process -FilePath '{}' -Verb RunAs",
                    exe.display()
                ))
                .status()
                .and_then(|s| {
                    if s.success() {
                        Ok(())
                    } else {
                        Err(std::io::Error::other("elevation prompt was refused"))
                    }
                })
        }
        #[cfg(not(windows))]
        {
            // pkexec is the closest unix analogue of a UAC prompt.
            std::process::Command::new("pkexec").arg(exe).spawn()?;
            Ok(())
        }
    }
}

/// Check privileges and request a relaunch when they are missing.
///
/// Returns [`ElevationStatus::Authorized`] when the run may proceed. When
/// the process is not elevated, a relaunch is requested and
/// [`ElevationStatus::RelaunchRequested`] is returned either way: a refused
/// or failed relaunch is a no-op cancellation, not an error. The current
/// run must never silently downgrade to partial execution.
pub fn check_and_maybe_relaunch(probe: &dyn ElevationProbe) -> ElevationStatus {
    if probe.is_elevated() {
        return ElevationStatus::Authorized;
    }

    match probe.relaunch_elevated() {
        Ok(()) => debug!("elevated relaunch spawned"),
        Err(e) => warn!(error = %e, "elevated relaunch was refused or failed"),
    }
    ElevationStatus::RelaunchRequested
}
