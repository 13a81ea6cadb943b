//! Download-and-install pipeline.
//!
//! The pipeline moves a program through three observable stages:
//! downloading the installer, running it silently, and reporting it
//! installed. The downloaded installer is staged in a temporary file that
//! is removed after the run regardless of outcome.

use crate::cancel::CancelToken;
use crate::events::InstallStatus;
use crate::install::catalog::InstallableProgram;
use crate::install::errors::InstallError;
use std::io::Write as _;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

/// Options controlling a single installation run.
#[derive(Debug, Default)]
pub struct InstallOptions {
    /// Maximum time the installer is allowed to run.
    ///
    /// Defaults to 10 minutes.
    pub timeout: Option<Duration>,
    /// Run the installer with elevated privileges on Windows.
    ///
    /// Defaults to true. Ignored on other platforms.
    pub elevate: Option<bool>,
    /// Token that aborts the pipeline between stages when signalled.
    pub cancel: Option<CancelToken>,
}

impl InstallOptions {
    fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(Duration::from_secs(600))
    }

    fn elevate(&self) -> bool {
        self.elevate.unwrap_or(true)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|token| token.is_cancelled())
    }
}

/// Download a program's installer and run it silently.
///
/// `on_status` observes the pipeline stages in order: [`Downloading`],
/// then [`Installing`], then [`Installed`]. A failed download emits only
/// `Downloading`; a failed installer stops before `Installed`.
///
/// The staged installer file is deleted whether or not the run succeeds.
///
/// [`Downloading`]: InstallStatus::Downloading
/// [`Installing`]: InstallStatus::Installing
/// [`Installed`]: InstallStatus::Installed
///
/// # Example
///
/// ```rust,no_run
/// use tuneup_engine::install::{install, programs, InstallOptions};
///
/// # async fn example() -> Result<(), tuneup_engine::InstallError> {
/// let catalog = programs();
/// install(&catalog[0], InstallOptions::default(), |status| {
///     println!("{}", status.description());
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn install<F>(
    program: &InstallableProgram,
    options: InstallOptions,
    on_status: F,
) -> Result<(), InstallError>
where
    F: Fn(InstallStatus) + Send + Sync,
{
    if options.is_cancelled() {
        return Err(InstallError::Cancelled);
    }

    on_status(InstallStatus::Downloading);
    info!(program = %program.name, url = %program.download_url, "downloading installer");

    let bytes = download(program).await?;

    if options.is_cancelled() {
        return Err(InstallError::Cancelled);
    }

    let file = stage_installer(program, &bytes)?;
    drop(bytes);

    on_status(InstallStatus::Installing);
    info!(program = %program.name, "running silent installer");

    let result = run_installer(program, file.path(), &options).await;
    cleanup(file);

    result?;
    on_status(InstallStatus::Installed);
    info!(program = %program.name, "installation complete");
    Ok(())
}

async fn download(program: &InstallableProgram) -> Result<Vec<u8>, InstallError> {
    let response = reqwest::get(&program.download_url)
        .await
        .map_err(|e| InstallError::Network {
            message: format!("failed to download {}: {e}", program.name),
            status: e.status().map(|s| s.as_u16()),
            fix: "Check network connectivity and that the download URL is reachable".to_string(),
        })?;

    let response = response.error_for_status().map_err(|e| InstallError::Network {
        message: format!("download of {} was rejected: {e}", program.name),
        status: e.status().map(|s| s.as_u16()),
        fix: "The download URL may have moved; update the program catalog".to_string(),
    })?;

    let bytes = response.bytes().await.map_err(|e| InstallError::Network {
        message: format!("download of {} was interrupted: {e}", program.name),
        status: None,
        fix: "Check network connectivity and retry the installation".to_string(),
    })?;

    debug!(program = %program.name, size = bytes.len(), "download finished");
    Ok(bytes.to_vec())
}

fn stage_installer(
    program: &InstallableProgram,
    bytes: &[u8],
) -> Result<NamedTempFile, InstallError> {
    let prefix: String = program
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    let mut file = tempfile::Builder::new()
        .prefix(&format!("{prefix}-installer-"))
        .suffix(".exe")
        .tempfile()
        .map_err(|e| io_error("failed to create temporary installer file", e))?;

    file.write_all(bytes)
        .map_err(|e| io_error("failed to write installer to disk", e))?;
    file.flush()
        .map_err(|e| io_error("failed to flush installer to disk", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o755))
            .map_err(|e| io_error("failed to mark installer executable", e))?;
    }

    Ok(file)
}

fn io_error(message: &str, source: std::io::Error) -> InstallError {
    InstallError::Io {
        message: format!("{message}: {source}"),
        fix: "Check free disk space and temp directory permissions".to_string(),
    }
}

async fn run_installer(
    program: &InstallableProgram,
    installer: &Path,
    options: &InstallOptions,
) -> Result<(), InstallError> {
    let mut command = build_command(program, installer, options.elevate());
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let duration = options.timeout();
    let output = match timeout(duration, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(InstallError::SpawnFailed {
                message: format!("could not start installer for {}: {e}", program.name),
                fix: "Verify the installer downloaded correctly and retry".to_string(),
            });
        }
        Err(_) => {
            return Err(InstallError::Timeout {
                duration,
                fix: "Try again with a longer timeout or check that the installer is truly silent"
                    .to_string(),
            });
        }
    };

    if !output.status.success() {
        return Err(InstallError::InstallerFailed {
            message: format!(
                "installer for {} exited with status {}",
                program.name, output.status
            ),
            exit_code: output.status.code(),
            fix: "Check that the program is not already installed or mid-update".to_string(),
        });
    }

    Ok(())
}

fn build_command(program: &InstallableProgram, installer: &Path, elevate: bool) -> Command {
    if cfg!(windows) && elevate {
        // Start-Process with -Wait keeps the outer process alive until the
        // elevated installer finishes, so the timeout still applies.
        let mut command = Command::new("powershell");
        command
            .arg("-NoProfile")
            .arg("-Command")
            .arg(format!(
                "Start-Process -FilePath '{}' -ArgumentList '{}' -Verb RunAs -Wait",
                installer.display(),
                program.silent_args
            ));
        command
    } else {
        let mut command = Command::new(installer);
        command.args(program.silent_args.split_whitespace());
        command
    }
}

fn cleanup(file: NamedTempFile) {
    let path = file.path().to_path_buf();
    if let Err(e) = file.close() {
        debug!(path = %path.display(), error = %e, "failed to remove staged installer");
    } else {
        debug!(path = %path.display(), "removed staged installer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program(url: &str) -> InstallableProgram {
        InstallableProgram {
            name: "Sample Tool".to_string(),
            description: "A tool used in tests.".to_string(),
            download_url: url.to_string(),
            silent_args: "/S".to_string(),
        }
    }

    #[test]
    fn test_default_options() {
        let options = InstallOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(600));
        assert!(options.elevate());
        assert!(!options.is_cancelled());
    }

    #[test]
    fn test_staged_installer_uses_program_name_prefix() {
        let program = sample_program("https://example.invalid/setup.exe");
        let file = stage_installer(&program, b"not a real installer").unwrap();
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Sample-Tool-installer-"));
        assert!(name.ends_with(".exe"));
    }

    #[test]
    fn test_staged_installer_is_removed_on_cleanup() {
        let program = sample_program("https://example.invalid/setup.exe");
        let file = stage_installer(&program, b"payload").unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        cleanup(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unreachable_url_is_a_network_error() {
        let program = sample_program("http://127.0.0.1:1/setup.exe");
        let result = install(&program, InstallOptions::default(), |_| {}).await;
        assert!(matches!(result, Err(InstallError::Network { .. })));
    }

    #[tokio::test]
    async fn test_failed_download_never_reports_installing() {
        let program = sample_program("http://127.0.0.1:1/setup.exe");
        let statuses = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = statuses.clone();
        let result = install(&program, InstallOptions::default(), move |status| {
            seen.lock().unwrap().push(status);
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*statuses.lock().unwrap(), vec![InstallStatus::Downloading]);
    }

    #[tokio::test]
    async fn test_pre_cancelled_run_is_rejected_immediately() {
        let (handle, token) = crate::cancel::cancel_pair();
        handle.cancel();

        let program = sample_program("http://127.0.0.1:1/setup.exe");
        let options = InstallOptions {
            cancel: Some(token),
            ..Default::default()
        };
        let statuses = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = statuses.clone();
        let result = install(&program, options, move |status| {
            seen.lock().unwrap().push(status);
        })
        .await;

        assert!(matches!(result, Err(InstallError::Cancelled)));
        assert!(statuses.lock().unwrap().is_empty());
    }
}
