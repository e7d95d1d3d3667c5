use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::transport::HttpResponse;
use crate::types::TokenResponse;
use crate::{ApiError, ClientConfig, DirectApiError, Result, Session};

const BODY_PREVIEW_LEN: usize = 200;

/// JSON envelope posted to the API endpoint
#[derive(Debug, Serialize)]
pub(super) struct RequestEnvelope<'a> {
    pub method: &'a str,
    pub param: Value,
    pub locale: &'a str,
    pub login: Option<&'a str>,
    pub application_id: &'a str,
    pub token: Option<&'a str>,
}

impl<'a> RequestEnvelope<'a> {
    pub fn new(method: &'a str, param: Value, config: &'a ClientConfig, session: &'a Session) -> Self {
        Self {
            method,
            param,
            locale: &config.locale,
            login: session.login(),
            application_id: &config.application_id,
            token: session.token(),
        }
    }

    /// Serialize to JSON with every string leaf passed through the normalizer
    pub fn to_body(&self, config: &ClientConfig) -> Result<String> {
        let mut value = serde_json::to_value(self)?;
        config.normalizer.apply(&mut value);
        Ok(serde_json::to_string(&value)?)
    }
}

/// Classified API response
#[derive(Debug, PartialEq)]
pub(super) enum CallOutcome {
    /// Payload to hand back, plus an `error_detail` that came along with it
    Success { payload: Value, detail: Option<String> },
    /// `error_code` and `error_str` were both present
    Failure(ApiError),
}

/// Build the authorization URL
pub(super) fn build_authorize_url(config: &ClientConfig, state: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("response_type", &config.response_type)
        .append_pair("client_id", &config.application_id);
    if let Some(redirect_uri) = &config.redirect_uri {
        query.append_pair("redirect_uri", redirect_uri);
    }
    if let Some(state) = state.filter(|state| !state.is_empty()) {
        query.append_pair("state", state);
    }
    format!("{}?{}", config.endpoints.authorize_url, query.finish())
}

/// Build the authorization code exchange form
pub(super) fn build_token_form<'a>(
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ]
}

/// Build the refresh token form
pub(super) fn build_refresh_form<'a>(
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ]
}

/// Decode a response body as JSON, reporting the status and a body excerpt on failure
pub(super) fn decode_body(response: &HttpResponse) -> Result<Value> {
    serde_json::from_slice(&response.body).map_err(|source| DirectApiError::Decode {
        status: response.status,
        body_preview: body_preview(&response.body),
        source,
    })
}

/// Parse a token endpoint body; JSON of the wrong shape is a decode failure too
pub(super) fn decode_token_response(response: &HttpResponse) -> Result<TokenResponse> {
    let decoded = decode_body(response)?;
    serde_json::from_value(decoded).map_err(|source| DirectApiError::Decode {
        status: response.status,
        body_preview: body_preview(&response.body),
        source,
    })
}

/// Split a decoded API response into success or application failure
///
/// `error_detail` is captured whenever it is present and non-empty, but only
/// the pair `error_code` + `error_str` turns the call into a failure.
pub(super) fn classify_response(value: Value) -> CallOutcome {
    let Value::Object(map) = &value else {
        return CallOutcome::Success {
            payload: value,
            detail: None,
        };
    };

    let code = map.get("error_code").filter(|v| !v.is_null()).map(scalar_text);
    let message = map.get("error_str").filter(|v| !v.is_null()).map(scalar_text);
    let detail = map.get("error_detail").filter(|v| !is_blank(v)).map(scalar_text);

    match (code, message) {
        (Some(code), Some(message)) => CallOutcome::Failure(ApiError {
            code,
            message,
            detail,
        }),
        _ => CallOutcome::Success {
            payload: value,
            detail,
        },
    }
}

/// Generate a random URL-safe state token for the authorize URL
pub fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    base64::Engine::encode(
        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        &random_bytes,
    )
}

/// Text form of a scalar field; error codes arrive as numbers or strings
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Emptiness as the API's error fields use it: null, false, 0, "", "0", [] and {}
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > BODY_PREVIEW_LEN {
        let cut: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        format!("{}... ({} bytes total)", cut, body.len())
    } else {
        text.into_owned()
    }
}
