//! Error types for installation operations.
//!
//! Each error variant includes an actionable fix suggestion to help users
//! resolve the issue.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while downloading or installing a program.
///
/// Each variant includes contextual information about what went wrong and
/// a `fix` field with an actionable suggestion for resolving the issue.
///
/// # Example
///
/// ```rust
/// use tuneup_engine::InstallError;
///
/// fn handle_error(error: InstallError) {
///     eprintln!("Installation failed: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// A network error occurred while downloading the installer.
    ///
    /// This typically indicates connectivity issues or a download URL
    /// returning a non-success HTTP status.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
        /// HTTP status code, if the server responded at all.
        status: Option<u16>,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The downloaded installer could not be started.
    #[error("Failed to start installer: {message}")]
    SpawnFailed {
        /// Description of the spawn failure.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The installer process ran but exited with a failure status.
    ///
    /// This is the most common error type, indicating that the silent
    /// installation did not complete.
    #[error("Installer failed: {message}")]
    InstallerFailed {
        /// Description of the failure.
        message: String,
        /// Exit code from the installer, if available.
        exit_code: Option<i32>,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Installation timed out.
    ///
    /// The installer did not complete within the configured timeout.
    #[error("Installation timed out after {duration:?}")]
    Timeout {
        /// How long the installation was allowed to run.
        duration: Duration,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// A filesystem error occurred while staging the installer.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The installation was cancelled before it completed.
    #[error("Installation cancelled")]
    Cancelled,
}

impl InstallError {
    /// Get an actionable suggestion for fixing this error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tuneup_engine::InstallError;
    /// use std::time::Duration;
    ///
    /// let error = InstallError::Timeout {
    ///     duration: Duration::from_secs(600),
    ///     fix: "Try again with a longer timeout or check network connectivity".to_string(),
    /// };
    /// assert!(error.fix_suggestion().contains("timeout"));
    /// ```
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::Network { fix, .. } => fix,
            Self::SpawnFailed { fix, .. } => fix,
            Self::InstallerFailed { fix, .. } => fix,
            Self::Timeout { fix, .. } => fix,
            Self::Io { fix, .. } => fix,
            Self::Cancelled => "Restart the installation when ready",
        }
    }
}
