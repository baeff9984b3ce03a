use thiserror::Error;

/// Errors that can occur while talking to the recommendation service
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON or did not have the expected shape
    #[error("Malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with `success: false`; `error` is its reason, when given
    #[error("Server reported failure: {}", .error.as_deref().unwrap_or("no reason given"))]
    Api { error: Option<String> },

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Writing a downloaded document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three failure kinds a front end distinguishes, plus local validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Malformed,
    Application,
    Validation,
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Network(_) | ClientError::Io(_) => FailureKind::Network,
            ClientError::MalformedResponse { .. } => FailureKind::Malformed,
            ClientError::Api { .. } => FailureKind::Application,
            ClientError::Validation(_)
            | ClientError::BuilderError(_)
            | ClientError::ConfigError(_) => FailureKind::Validation,
        }
    }
}
