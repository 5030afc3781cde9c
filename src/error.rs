use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration errors
    ConfigMissingAppId,
    ConfigMissingSdkToken,
    ConfigInvalidTimeout,
    ConfigInvalidBaseUrl,

    // Network errors
    NetworkError,
    NetworkTimeout,

    // HTTP errors
    HttpBadRequest,
    HttpUnauthorized,
    HttpForbidden,
    HttpNotFound,
    HttpRateLimited,
    HttpServerError,
    HttpInvalidResponse,

    // Fetch errors
    FetchFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMissingAppId => "CONFIG_MISSING_APP_ID",
            ErrorCode::ConfigMissingSdkToken => "CONFIG_MISSING_SDK_TOKEN",
            ErrorCode::ConfigInvalidTimeout => "CONFIG_INVALID_TIMEOUT",
            ErrorCode::ConfigInvalidBaseUrl => "CONFIG_INVALID_BASE_URL",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::NetworkTimeout => "NETWORK_TIMEOUT",
            ErrorCode::HttpBadRequest => "HTTP_BAD_REQUEST",
            ErrorCode::HttpUnauthorized => "HTTP_UNAUTHORIZED",
            ErrorCode::HttpForbidden => "HTTP_FORBIDDEN",
            ErrorCode::HttpNotFound => "HTTP_NOT_FOUND",
            ErrorCode::HttpRateLimited => "HTTP_RATE_LIMITED",
            ErrorCode::HttpServerError => "HTTP_SERVER_ERROR",
            ErrorCode::HttpInvalidResponse => "HTTP_INVALID_RESPONSE",
            ErrorCode::FetchFailed => "FETCH_FAILED",
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError
                | ErrorCode::NetworkTimeout
                | ErrorCode::HttpRateLimited
                | ErrorCode::HttpServerError
                | ErrorCode::FetchFailed
        )
    }
}

/// Error type for all SDK operations.
///
/// Build-time errors (`is_invalid_configuration`) are returned
/// synchronously from the builder and never produce a partially
/// constructed client. Fetch-time errors (`is_fetch_failure`) are only
/// ever delivered through a [`FetchOutcome`](crate::FetchOutcome) or the
/// error callback, never across the async boundary as a panic.
#[derive(Error, Debug)]
#[error("[{code}] {message}")]
pub struct ConfigError {
    pub code: ErrorCode,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_configuration(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    pub fn fetch_failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    pub fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ConfigMissingAppId
                | ErrorCode::ConfigMissingSdkToken
                | ErrorCode::ConfigInvalidTimeout
                | ErrorCode::ConfigInvalidBaseUrl
        )
    }

    pub fn is_fetch_failure(&self) -> bool {
        !self.is_invalid_configuration()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
