use thiserror::Error;

/// Why a provider invocation failed.
///
/// Carried as the `cause` of [`TranslateError::ProviderFailure`]; keeps
/// timeouts and cancellations apart from backend rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("request cancelled by caller")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider misconfigured: {0}")]
    Misconfigured(String),

    #[error("internal provider error: {0}")]
    Internal(String),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::DeadlineExceeded)
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, ProviderError::Cancelled)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::DeadlineExceeded
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Outcome taxonomy of a dispatch call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported model: {model}")]
    UnsupportedModel { model: String },

    #[error("failed to translate with {model}: {cause}")]
    ProviderFailure { model: String, cause: ProviderError },
}

impl TranslateError {
    /// True when the caller can fix the request (HTTP 4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TranslateError::InvalidRequest(_) | TranslateError::UnsupportedModel { .. }
        )
    }

    /// Status code the handler layer reports for this error.
    pub fn status_hint(&self) -> u16 {
        match self {
            TranslateError::InvalidRequest(_) | TranslateError::UnsupportedModel { .. } => 400,
            TranslateError::ProviderFailure { cause, .. } => match cause {
                ProviderError::DeadlineExceeded => 504,
                ProviderError::Cancelled => 503,
                _ => 502,
            },
        }
    }
}

/// Service-level failures outside the translation path.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
