use oauth2::ClientSecret;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::normalize::TextNormalizer;

pub(crate) const AUTHORIZE_URL: &str = "https://oauth.yandex.ru/authorize";
pub(crate) const TOKEN_URL: &str = "https://oauth.yandex.ru/token";
pub(crate) const JSON_API_URL: &str = "https://api.direct.yandex.ru/v4/json/";
pub(crate) const SANDBOX_JSON_API_URL: &str = "https://api-sandbox.direct.yandex.ru/json-api/v4/";

const DEFAULT_RESPONSE_TYPE: &str = "code";
const DEFAULT_LOCALE: &str = "ru";

/// Target API environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live advertising accounts
    #[default]
    Production,
    /// Isolated test environment with the same API shape
    Sandbox,
}

/// Endpoint URLs used by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Browser redirect target for user consent
    pub authorize_url: String,
    /// OAuth token endpoint (form-encoded POST)
    pub token_url: String,
    /// JSON API endpoint (JSON POST)
    pub api_url: String,
}

impl Endpoints {
    /// Production OAuth and API endpoints
    pub fn production() -> Self {
        Self {
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            api_url: JSON_API_URL.to_string(),
        }
    }

    /// Production OAuth endpoints with the sandbox API endpoint
    pub fn sandbox() -> Self {
        Self {
            api_url: SANDBOX_JSON_API_URL.to_string(),
            ..Self::production()
        }
    }

    /// Endpoints for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Sandbox => Self::sandbox(),
        }
    }
}

/// HTTP transport knobs
///
/// Certificate verification is on by default and there is no overall timeout
/// unless one is set; only the connect phase is bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Maximum time to establish a connection (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Maximum time for the whole request, `None` for no limit (default: `None`)
    pub timeout: Option<Duration>,
    /// Verify server TLS certificates (default: true)
    ///
    /// Turning this off requires a TLS backend (`rustls-tls` or `native-tls`);
    /// without one, building the transport fails with a configuration error.
    pub verify_tls: bool,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: None,
            verify_tls: true,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Configuration for the Direct API client
///
/// Fixed for the lifetime of a [`DirectClient`](crate::DirectClient); the
/// endpoint set is chosen from the environment once, when the config is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth application id, also sent as `application_id` on every API call
    pub application_id: String,
    /// OAuth application secret, required for token exchange
    pub application_secret: Option<ClientSecret>,
    /// `response_type` for the authorize URL (default: "code")
    pub response_type: String,
    /// Language of API messages (default: "ru")
    pub locale: String,
    /// Selected environment (default: production)
    pub environment: Environment,
    /// Resolved endpoint URLs
    pub endpoints: Endpoints,
    /// Optional `redirect_uri` for the authorize URL
    pub redirect_uri: Option<String>,
    /// HTTP transport settings
    pub transport: TransportConfig,
    /// String re-encoding applied to every outgoing request envelope
    pub normalizer: TextNormalizer,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfigBuilder::default().build()
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Application id and secret, or a config error when either is missing
    pub(crate) fn credentials(&self) -> crate::Result<(&str, &ClientSecret)> {
        if self.application_id.is_empty() {
            return Err(crate::DirectApiError::Config(
                "application id is not set".to_string(),
            ));
        }
        match &self.application_secret {
            Some(secret) if !secret.secret().is_empty() => Ok((self.application_id.as_str(), secret)),
            _ => Err(crate::DirectApiError::Config(
                "application secret is not set".to_string(),
            )),
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    application_id: Option<String>,
    application_secret: Option<ClientSecret>,
    response_type: Option<String>,
    locale: Option<String>,
    environment: Environment,
    authorize_url: Option<String>,
    token_url: Option<String>,
    api_url: Option<String>,
    redirect_uri: Option<String>,
    transport: TransportConfig,
    normalizer: TextNormalizer,
}

impl ClientConfigBuilder {
    /// Set the OAuth application id
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Set the OAuth application secret
    pub fn application_secret(mut self, secret: impl Into<String>) -> Self {
        self.application_secret = Some(ClientSecret::new(secret.into()));
        self
    }

    /// Set the authorize `response_type`
    pub fn response_type(mut self, response_type: impl Into<String>) -> Self {
        self.response_type = Some(response_type.into());
        self
    }

    /// Set the response language; an empty value keeps the default
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Select the target environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Shorthand for selecting the sandbox or production environment
    pub fn sandbox(self, use_sandbox: bool) -> Self {
        self.environment(if use_sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        })
    }

    /// Override the authorize URL
    pub fn authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = Some(url.into());
        self
    }

    /// Override the token endpoint URL
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Override the JSON API endpoint URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the redirect URI passed on the authorize URL
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport.connect_timeout = timeout;
        self
    }

    /// Set the overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.transport.verify_tls = verify;
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport.user_agent = user_agent.into();
        self
    }

    /// Set the string normalizer applied to request envelopes
    pub fn normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Build the ClientConfig
    pub fn build(self) -> ClientConfig {
        let defaults = Endpoints::for_environment(self.environment);
        let endpoints = Endpoints {
            authorize_url: self.authorize_url.unwrap_or(defaults.authorize_url),
            token_url: self.token_url.unwrap_or(defaults.token_url),
            api_url: self.api_url.unwrap_or(defaults.api_url),
        };

        ClientConfig {
            application_id: self.application_id.unwrap_or_default(),
            application_secret: self.application_secret,
            response_type: self
                .response_type
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_RESPONSE_TYPE.to_string()),
            locale: self
                .locale
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            environment: self.environment,
            endpoints,
            redirect_uri: self.redirect_uri,
            transport: self.transport,
            normalizer: self.normalizer,
        }
    }
}

/// OAuth token set obtained from the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenSet {
    /// The access token sent as `token` on every API call
    pub access_token: String,
    /// Token type reported by the server, usually "bearer"
    pub token_type: Option<String>,
    /// Refresh token, when the application is allowed to refresh
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) when the access token expires, if reported
    pub expires_at: Option<u64>,
}

impl TokenSet {
    /// Check if the token is expired or will expire within 5 minutes
    ///
    /// Tokens without a reported lifetime are never considered expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_in() {
            Some(remaining) => remaining <= Duration::from_secs(300),
            None => false,
        }
    }

    /// Get the duration until the token expires
    ///
    /// Returns `Duration::ZERO` once the token is expired and `None` when the
    /// server did not report a lifetime.
    pub fn expires_in(&self) -> Option<Duration> {
        let expires_at = self.expires_at?;
        Some(Duration::from_secs(expires_at.saturating_sub(unix_now())))
    }
}

/// Raw token endpoint response, success and error fields side by side
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Convert into a token set, if an access token is present
    pub fn into_token_set(self) -> Option<TokenSet> {
        let access_token = self.access_token.filter(|token| !token.is_empty())?;
        Some(TokenSet {
            access_token,
            token_type: self.token_type,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.map(|secs| unix_now().saturating_add(secs)),
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
