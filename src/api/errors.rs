/// Errors from the Permissions REST API layer.
use serde::Deserialize;
use thiserror::Error;

/// Typed errors from the HTTP client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Request URL.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{}", status_message(*.status, .error_code.as_deref(), .message))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Service error code, e.g. `RESOURCE_DOES_NOT_EXIST`.
        error_code: Option<String>,
        /// Service message, or the raw response body when it carried none.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        /// Request URL.
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured host could not be turned into a request URL.
    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client itself could not be constructed.
    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

fn status_message(status: u16, error_code: Option<&str>, message: &str) -> String {
    match error_code {
        Some(code) => format!("{code}: {message} (HTTP {status})"),
        None if message.is_empty() => format!("Request failed with HTTP {status}"),
        None => format!("{message} (HTTP {status})"),
    }
}

/// Error body shape returned by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_code: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Build a `Status` error from a failed response's status and body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                error_code,
                message: Some(message),
            }) => Self::Status {
                status,
                error_code,
                message,
            },
            Ok(ErrorBody {
                error_code: Some(code),
                message: None,
            }) => Self::Status {
                status,
                error_code: Some(code),
                message: String::new(),
            },
            _ => Self::Status {
                status,
                error_code: None,
                message: body.trim().to_owned(),
            },
        }
    }

    /// HTTP status code, if the service answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
