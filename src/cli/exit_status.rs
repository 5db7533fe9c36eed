use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, no error-severity issues
/// - `Failure` (1): Command completed but some files reported errors
/// - `Error` (2): Command failed (config error, unreadable table, missing directory)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, no error-severity issues.
    Success,
    /// Command completed but some files reported errors.
    Failure,
    /// Command failed and was aborted.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
