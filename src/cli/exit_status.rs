use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, output generated or up to date
/// - `Failure` (1): Command completed but found a problem (stale output, existing config)
/// - `Error` (2): Command failed (I/O error, invalid config, strict-mode or divergence error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Source lists generated, or the checked file matches the cc_builder files.
    Success,
    /// Generated file is stale or missing, or `init` found an existing config.
    Failure,
    /// Unreadable platform file, invalid config, strict-mode or divergence error.
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
