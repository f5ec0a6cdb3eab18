//! Error types for player_release operations.
//!
//! Every error carries an actionable message; [`ReleaseError::recovery_suggestions`]
//! adds operator hints for the common failures.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for player_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all player_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Version management errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Project settings errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Build pipeline errors
    #[error("Build error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Version management errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    /// Trailing segment is not a non-negative integer
    #[error("Malformed version '{version}': segment '{segment}' is not a number")]
    MalformedVersion {
        /// Full version string
        version: String,
        /// The offending segment
        segment: String,
    },

    /// Version string has no content
    #[error("Version string is empty")]
    Empty,
}

/// Project settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read or parsed
    #[error("Failed to load settings from {path}: {reason}")]
    LoadFailed {
        /// Settings file path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Settings file could not be written
    #[error("Failed to save settings to {path}: {reason}")]
    SaveFailed {
        /// Settings file path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Settings are internally inconsistent
    #[error("Invalid settings: {reason}")]
    Invalid {
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Version(VersionError::MalformedVersion { version, .. }) => vec![
                format!("Fix the version '{version}' in the settings file"),
                "Versions must be dot-separated numbers, e.g. 1.2.7".to_string(),
            ],
            ReleaseError::Settings(SettingsError::LoadFailed { path, .. }) => vec![
                format!("Check that {} is valid TOML", path.display()),
                "A [android.signing] table needs keystore_path, keystore_pass, key_alias_name and key_alias_pass".to_string(),
            ],
            ReleaseError::Cli(CliError::MissingArgument { argument }) if argument == "--engine" => vec![
                "Pass the engine executable with --engine or PLAYER_RELEASE_ENGINE".to_string(),
                "Use --dry-run to check settings without building".to_string(),
            ],
            ReleaseError::Bundler(crate::bundler::Error::BuildFailed { .. }) => vec![
                "Inspect the engine log for the failing step".to_string(),
                "Re-run the same command once the cause is fixed; builds are not retried automatically".to_string(),
            ],
            ReleaseError::Bundler(crate::bundler::Error::Fs { path, .. }) => vec![
                format!("Check permissions and free space for {}", path.display()),
                "Clearing and copying are safe to re-run".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if re-running the same command can succeed without edits
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ReleaseError::Version(_)
                | ReleaseError::Settings(SettingsError::Invalid { .. })
                | ReleaseError::Cli(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_version_is_not_recoverable() {
        let err = ReleaseError::from(VersionError::MalformedVersion {
            version: "1.2.x".into(),
            segment: "x".into(),
        });
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestions()[0].contains("1.2.x"));
    }

    #[test]
    fn build_failure_is_recoverable() {
        let err = ReleaseError::from(crate::bundler::Error::BuildFailed {
            target: "webgl".into(),
            reason: "exit status 1".into(),
        });
        assert!(err.is_recoverable());
        assert_eq!(err.recovery_suggestions().len(), 2);
    }
}
