use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    /// A directory or file could not be created or written.
    #[error("Failed to {action} '{path}'. Original error: {source}")]
    FileSystemError {
        action: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The existing manifest could not be read or parsed.
    #[error("Cannot parse manifest '{path}': {reason}")]
    ManifestParseError { path: String, reason: String },

    /// The external command could not be spawned or awaited.
    #[error("Failed to execute '{command}'. Original error: {source}")]
    ProcessExecutionError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' did not finish within {timeout_secs}s and was killed.")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("Command '{command}' was cancelled.")]
    CommandCancelled { command: String },

    /// When the install command has executed but finished with an error.
    #[error(
        "Installing dependencies with {package_manager} failed ({status}) \
         while running '{command}': {message}"
    )]
    InstallationError {
        package_manager: String,
        command: String,
        status: String,
        message: String,
    },

    #[error("Setup failed with {} error(s):\n{}", .failures.len(), format_failures(.failures))]
    SetupFailed { failures: Vec<Error> },

    #[error("Invalid blueprint: {0}.")]
    BlueprintError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_failures(failures: &[Error]) -> String {
    failures.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n")
}

impl Error {
    /// Wraps an I/O error with the action and path that produced it.
    pub fn fs<P: AsRef<std::path::Path>>(
        action: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystemError {
            action: action.into(),
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("❌ {err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_failed_lists_every_failure() {
        let err = Error::SetupFailed {
            failures: vec![
                Error::fs(
                    "create directory",
                    "/tmp/x/src/models",
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ),
                Error::BlueprintError("bad path".into()),
            ],
        };
        let message = err.to_string();
        assert!(message.starts_with("Setup failed with 2 error(s):"));
        assert!(message.contains("  - Failed to create directory '/tmp/x/src/models'"));
        assert!(message.contains("  - Invalid blueprint: bad path."));
    }
}
