use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DirectApiError>;

/// Errors returned by the Direct API client
#[derive(Debug, Error)]
pub enum DirectApiError {
    /// The HTTP roundtrip itself failed (connection, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered, but the body is not valid JSON
    #[error("failed to decode response body (HTTP {status}): {source}; body: {body_preview}")]
    Decode {
        status: u16,
        body_preview: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API rejected the request with `error_code` and `error_str`
    #[error("API error {0}")]
    Api(#[from] ApiError),

    /// The OAuth token endpoint answered with an `error` field
    #[error("OAuth error: {error}")]
    OAuth {
        error: String,
        description: Option<String>,
    },

    /// The token endpoint answered with neither `access_token` nor `error`
    #[error("token response contained neither access_token nor error")]
    MissingAccessToken,

    /// Authorization code is empty or missing from the redirect
    #[error("invalid or missing authorization code")]
    InvalidAuthorizationCode,

    /// Client configuration is incomplete or the transport could not be built
    #[error("configuration error: {0}")]
    Config(String),

    /// Request envelope or typed response (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Browser could not be launched
    #[error("{0}")]
    BrowserLaunch(String),

    /// Local redirect receiver failed
    #[error("callback server error: {0}")]
    CallbackServer(String),
}

impl DirectApiError {
    /// Returns the application error if the remote rejected the call
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            DirectApiError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True for failures below the API layer (transport or undecodable body)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DirectApiError::Transport(_) | DirectApiError::Decode { .. }
        )
    }
}

/// Application-level error reported by the API in the response body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Value of `error_code`
    pub code: String,
    /// Value of `error_str`
    pub message: String,
    /// Value of `error_detail`, when present and non-empty
    pub detail: Option<String>,
}

/// Failure of the underlying HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("HTTP request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
