mod shared;

pub use shared::generate_state;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use self::shared::*;
use crate::transport::Transport;
use crate::{ClientConfig, DirectApiError, Result, Session, TokenSet};

/// Blocking Yandex.Direct API client
///
/// Covers the two-step OAuth handshake (authorize URL, code exchange) and the
/// generic JSON API dispatcher. Every API method goes through [`call`].
/// Operations that touch the network take `&mut self` because they reset and
/// record the last error in the [`Session`]; share a client across threads
/// only behind a lock.
///
/// # Example
///
/// ```no_run
/// use direct_api::{ClientConfig, DirectClient, Method};
/// use serde_json::json;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::builder()
///         .application_id("app-id")
///         .application_secret("app-secret")
///         .build();
///     let mut client = DirectClient::new(config)?;
///
///     println!("Visit: {}", client.authorize_url(None));
///     let tokens = client.exchange_code("1234567")?;
///
///     client.set_token(tokens.access_token).set_login("client-login");
///     let campaigns = client.call(Method::GetCampaignsList, json!(["client-login"]))?;
///     println!("{}", campaigns);
///     Ok(())
/// }
/// ```
///
/// [`call`]: DirectClient::call
#[derive(Debug)]
pub struct DirectClient<T> {
    config: ClientConfig,
    transport: T,
    session: Session,
}

#[cfg(feature = "blocking")]
impl DirectClient<crate::HttpTransport> {
    /// Create a client backed by the reqwest blocking transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the transport settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = crate::HttpTransport::new(&config.transport)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> DirectClient<T> {
    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: Session::default(),
        }
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying HTTP transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current token, login and last error
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session, for callers that set or reset error fields directly
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Build the URL the user should visit to authorize the application
    ///
    /// A non-empty `state` is appended as the last query parameter and comes
    /// back unchanged on the redirect.
    pub fn authorize_url(&self, state: Option<&str>) -> String {
        build_authorize_url(&self.config, state)
    }

    /// Exchange an authorization code for an access token
    ///
    /// On success the access token is installed in the session. When the
    /// token endpoint answers with `error`, that value is stored as the
    /// session error (and `error_description` as the detail) and returned as
    /// [`DirectApiError::OAuth`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The application id or secret is missing, or the code is empty
    /// - The HTTP request fails or the body is not JSON
    /// - The token endpoint rejects the code
    pub fn exchange_code(&mut self, code: &str) -> Result<TokenSet> {
        self.session.clear_errors();
        if code.is_empty() {
            return Err(DirectApiError::InvalidAuthorizationCode);
        }
        let (client_id, secret) = self.owned_credentials()?;
        self.request_token(&build_token_form(code, &client_id, &secret))
    }

    /// Obtain a new access token with a refresh token
    ///
    /// Same bookkeeping as [`exchange_code`](Self::exchange_code).
    pub fn refresh_token(&mut self, refresh_token: &str) -> Result<TokenSet> {
        self.session.clear_errors();
        if refresh_token.is_empty() {
            return Err(DirectApiError::OAuth {
                error: "invalid_request".to_string(),
                description: Some("Refresh token is empty".to_string()),
            });
        }
        let (client_id, secret) = self.owned_credentials()?;
        self.request_token(&build_refresh_form(refresh_token, &client_id, &secret))
    }

    fn owned_credentials(&self) -> Result<(String, String)> {
        let (client_id, secret) = self.config.credentials()?;
        Ok((client_id.to_string(), secret.secret().clone()))
    }

    fn request_token(&mut self, form: &[(&str, &str)]) -> Result<TokenSet> {
        let url = &self.config.endpoints.token_url;
        debug!(url = %url, "requesting OAuth token");

        let response = self.transport.post_form(url, form)?;
        let token_response = decode_token_response(&response)?;

        if let Some(error) = token_response.error.clone().filter(|e| !e.is_empty()) {
            warn!(status = response.status, error = %error, "token endpoint rejected the request");
            self.session.set_error(error.clone());
            if let Some(description) = &token_response.error_description {
                self.session.set_error_detail(description.clone());
            }
            return Err(DirectApiError::OAuth {
                error,
                description: token_response.error_description,
            });
        }

        let tokens = token_response
            .into_token_set()
            .ok_or(DirectApiError::MissingAccessToken)?;
        self.session.set_token(tokens.access_token.clone());
        debug!("OAuth token obtained");
        Ok(tokens)
    }

    /// Install the access token used by subsequent calls
    ///
    /// No validation happens here; a bad token surfaces as an API error on
    /// the next call.
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.session.set_token(token);
        self
    }

    /// Select the sub-account subsequent calls act on behalf of
    pub fn set_login(&mut self, login: impl Into<String>) -> &mut Self {
        self.session.set_login(login);
        self
    }

    /// Reset the stored error code, title and detail
    pub fn clear_errors(&mut self) -> &mut Self {
        self.session.clear_errors();
        self
    }

    /// Invoke an API method
    ///
    /// Sends `{method, param, locale, login, application_id, token}` to the
    /// API endpoint and returns the decoded response verbatim. An
    /// `error_detail` that arrives without `error_code` + `error_str` is
    /// stored in the session but the call still succeeds.
    ///
    /// # Errors
    ///
    /// - [`DirectApiError::Transport`] if the HTTP roundtrip fails
    /// - [`DirectApiError::Decode`] if the body is not JSON
    /// - [`DirectApiError::Api`] if the response carries `error_code` and
    ///   `error_str`; the fields are also stored in the session
    pub fn call(&mut self, method: impl AsRef<str>, params: Value) -> Result<Value> {
        self.session.clear_errors();
        let method = method.as_ref();

        let body = RequestEnvelope::new(method, params, &self.config, &self.session)
            .to_body(&self.config)?;

        let url = &self.config.endpoints.api_url;
        debug!(method, url = %url, "calling API method");
        let response = self.transport.post_json(url, body)?;
        let decoded = decode_body(&response)?;

        match classify_response(decoded) {
            CallOutcome::Success { payload, detail } => {
                if let Some(detail) = detail {
                    debug!(method, detail = %detail, "API returned error_detail on success");
                    self.session.set_error_detail(detail);
                }
                Ok(payload)
            }
            CallOutcome::Failure(err) => {
                warn!(method, code = %err.code, message = %err.message, "API call failed");
                self.session.record_api_error(&err);
                Err(DirectApiError::Api(err))
            }
        }
    }

    /// Invoke an API method with an empty parameter object
    pub fn call_without_params(&mut self, method: impl AsRef<str>) -> Result<Value> {
        self.call(method, Value::Object(Default::default()))
    }

    /// Invoke an API method and deserialize the response
    pub fn call_as<R: DeserializeOwned>(
        &mut self,
        method: impl AsRef<str>,
        params: Value,
    ) -> Result<R> {
        let payload = self.call(method, params)?;
        Ok(serde_json::from_value(payload)?)
    }
}
