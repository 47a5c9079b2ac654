//! Error types for the RFP Analyzer.
//!
//! `AppError` is the caller-facing taxonomy: configuration, setup, search and
//! generation failures. Every fault raised by an external service is first
//! described as a `ServiceError` and then attached as the `source()` of the
//! category of the operation that issued the call.

use thiserror::Error;

/// Unified error type for the RFP Analyzer.
///
/// All fallible operations return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required setting is missing or invalid. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A service rejected the configured credential during client setup.
    #[error("Authentication error - check API keys and endpoints: {0}")]
    Auth(#[source] ServiceError),

    /// Client setup failed for any reason other than a rejected credential.
    #[error("Error initializing clients: {0}")]
    Init(#[source] ServiceError),

    /// The search call failed.
    #[error("Error during search: {0}")]
    Search(#[source] ServiceError),

    /// The generation call failed or produced no usable completion.
    #[error("Error generating LLM response: {0}")]
    Generation(#[source] ServiceError),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Build the setup error matching a probe failure.
    ///
    /// Rejected credentials map to `Auth`, everything else to `Init`.
    pub fn from_setup(err: ServiceError) -> Self {
        if err.is_auth() {
            AppError::Auth(err)
        } else {
            AppError::Init(err)
        }
    }

    /// The underlying service fault, if this error wraps one.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            AppError::Auth(e)
            | AppError::Init(e)
            | AppError::Search(e)
            | AppError::Generation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// A fault reported by, or on the way to, an external service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request did not complete within the transport timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The service could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service rejected the credential (HTTP 401/403).
    #[error("credential rejected ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The generation service answered without any completion text.
    #[error("response contained no completion text")]
    EmptyCompletion,

    /// The HTTP client itself could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl ServiceError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => ServiceError::Unauthorized { status, body },
            _ => ServiceError::Status { status, body },
        }
    }

    /// Whether this fault means the credential was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, ServiceError::Unauthorized { .. })
    }
}

/// Pass a success response through, or turn its status into a `ServiceError`.
///
/// The body text is kept for the error message.
pub async fn ensure_success(response: reqwest::Response) -> ServiceResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ServiceError::from_status(status.as_u16(), body))
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout(err.to_string())
        } else if err.is_connect() {
            ServiceError::Connect(err.to_string())
        } else if err.is_decode() {
            ServiceError::Malformed(err.to_string())
        } else if err.is_builder() {
            ServiceError::Client(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for results of a single service call.
pub type ServiceResult<T> = Result<T, ServiceError>;
