use thiserror::Error;

use crate::constants::error_codes;

#[derive(Debug, Error)]
pub enum AppError {
    // Boundary client failures
    #[error("Network timeout while fetching data from: {url}")]
    Timeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    Network { url: String, message: String },

    #[error("API error ({status}) {code}: {message} (URL: {url})")]
    Http {
        status: u16,
        code: String,
        message: String,
        details: Option<serde_json::Value>,
        url: String,
    },

    #[error("API request failed ({status}): {message} (URL: {url})")]
    Unknown {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Failed to parse API response: {message} (URL: {url})")]
    Decode { message: String, url: String },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AppError {
    /// Create an error for unusable command line input
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a timeout error for the given URL
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create a network error carrying the transport message
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an error from a structured `{error: {code, message, details}}` body
    pub fn http(
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
        url: impl Into<String>,
    ) -> Self {
        Self::Http {
            status,
            code: code.into(),
            message: message.into(),
            details,
            url: url.into(),
        }
    }

    /// Create an error for a non-success status whose body could not be parsed
    pub fn unknown(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Unknown {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an error for a success body that did not match the expected shape
    pub fn decode(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Structured error code surfaced to controllers.
    ///
    /// Decode failures and local errors carry no code.
    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Timeout { .. } => Some(error_codes::TIMEOUT),
            AppError::Network { .. } => Some(error_codes::NETWORK_ERROR),
            AppError::Http { code, .. } => Some(code.as_str()),
            AppError::Unknown { .. } => Some(error_codes::UNKNOWN),
            _ => None,
        }
    }

    /// Short user-facing message, without URL decoration.
    pub fn message(&self) -> String {
        match self {
            AppError::Timeout { .. } => "Request timed out".to_string(),
            AppError::Network { message, .. } => message.clone(),
            AppError::Http { message, .. } => message.clone(),
            AppError::Unknown { message, .. } => message.clone(),
            AppError::Decode { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the failed response, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } | AppError::Unknown { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if error indicates data not found (business logic, not technical error)
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(error_codes::NOT_FOUND)
    }

    /// Check if error is worth retrying (network issues, timeouts, server errors)
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Timeout { .. } | AppError::Network { .. } => true,
            AppError::Http { status, .. } | AppError::Unknown { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Returns true when a stored error code describes a transient failure.
pub fn is_retryable_code(code: Option<&str>) -> bool {
    matches!(
        code,
        Some(error_codes::TIMEOUT) | Some(error_codes::NETWORK_ERROR) | Some(error_codes::UNKNOWN)
    )
}
