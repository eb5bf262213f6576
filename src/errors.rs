/// Top-level command errors and their exit codes.
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can end a command invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments were parsed but are incomplete.
    #[error("{0}")]
    Usage(String),

    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing the result to stdout failed.
    #[error("Cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Return the CLI exit code for this error.
    ///
    /// Usage errors share clap's exit code 2.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Config(_) | Self::Api(ApiError::InvalidUrl { .. }) => 3,
            Self::Api(api) => match api.status() {
                Some(401 | 403) => 3,
                Some(404) => 4,
                _ => 1,
            },
            Self::Output(_) => 1,
        }
    }

    /// Machine-readable error code for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage_error",
            Self::Config(_) => "config_error",
            Self::Api(api) => match api {
                ApiError::Status {
                    status: 401 | 403, ..
                } => "permission_denied",
                ApiError::Status { status: 404, .. } => "not_found",
                ApiError::Status { .. } => "api_error",
                ApiError::Transport { .. } | ApiError::Client(_) => "transport_error",
                ApiError::Decode { .. } => "invalid_response",
                ApiError::InvalidUrl { .. } => "config_error",
            },
            Self::Output(_) => "output_error",
        }
    }
}
