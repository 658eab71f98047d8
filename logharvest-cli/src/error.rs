//! CLI-specific error types and exit code mapping

use logharvest_aggregator::AggregatorError;
use logharvest_core::error::LogharvestError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning              |
    /// |------|----------------------|
    /// | 0    | Success              |
    /// | 1    | General / command error |
    /// | 2    | Configuration error  |
    /// | 10   | IO error             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<LogharvestError> for CliError {
    fn from(e: LogharvestError) -> Self {
        match e {
            LogharvestError::Config(c) => Self::Config(c.to_string()),
            LogharvestError::Io(io) => Self::Io(io),
        }
    }
}

impl From<AggregatorError> for CliError {
    fn from(e: AggregatorError) -> Self {
        match e {
            AggregatorError::Core(core) => core.into(),
            other => Self::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
    }

    #[test]
    fn test_from_core_config_error_maps_to_config() {
        use logharvest_core::error::ConfigError;
        let core = LogharvestError::Config(ConfigError::InvalidValue {
            field: "aggregator.timezone".to_owned(),
            reason: "bad offset".to_owned(),
        });
        let cli_err: CliError = core.into();
        match cli_err {
            CliError::Config(msg) => assert!(msg.contains("aggregator.timezone")),
            _ => panic!("expected Config error variant"),
        }
    }

    #[test]
    fn test_from_core_io_error_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let cli_err: CliError = LogharvestError::from(io).into();
        assert_eq!(cli_err.exit_code(), 10);
    }

    #[test]
    fn test_from_aggregator_store_error_maps_to_command() {
        let err = AggregatorError::Store {
            path: PathBuf::from("/tmp/x.log"),
            reason: "disk full".to_owned(),
        };
        let cli_err: CliError = err.into();
        assert_eq!(cli_err.exit_code(), 1);
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = format!("{}", err);
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }
}
