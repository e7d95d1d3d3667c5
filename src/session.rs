use oauth2::AccessToken;

use crate::ApiError;

/// Mutable per-client state: credentials in use and the last reported error
///
/// The error fields mirror the most recent remote failure (API `error_code`,
/// `error_str`, `error_detail`, or the OAuth `error`). They are cleared at the
/// start of every token exchange and API call. Transport and decode failures
/// are only returned, never recorded here.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AccessToken>,
    login: Option<String>,
    error: Option<String>,
    error_str: Option<String>,
    error_detail: Option<String>,
}

impl Session {
    /// Current access token
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.secret().as_str())
    }

    /// Replace the access token
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(AccessToken::new(token.into()));
        self
    }

    /// Sub-account the API calls act on behalf of
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// Replace the active login
    pub fn set_login(&mut self, login: impl Into<String>) -> &mut Self {
        self.login = Some(login.into());
        self
    }

    /// Last error code (`error_code`, or the OAuth `error` field)
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.error = Some(error.into());
        self
    }

    /// Last error title (`error_str`)
    pub fn error_str(&self) -> Option<&str> {
        self.error_str.as_deref()
    }

    pub fn set_error_str(&mut self, error_str: impl Into<String>) -> &mut Self {
        self.error_str = Some(error_str.into());
        self
    }

    /// Last error detail (`error_detail`, or the OAuth `error_description`)
    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    pub fn set_error_detail(&mut self, error_detail: impl Into<String>) -> &mut Self {
        self.error_detail = Some(error_detail.into());
        self
    }

    /// True if any error field is set
    pub fn has_error(&self) -> bool {
        self.error.is_some() || self.error_str.is_some() || self.error_detail.is_some()
    }

    /// Reset code, title and detail
    pub fn clear_errors(&mut self) -> &mut Self {
        self.error = None;
        self.error_str = None;
        self.error_detail = None;
        self
    }

    pub(crate) fn record_api_error(&mut self, err: &ApiError) {
        self.set_error(err.code.clone()).set_error_str(err.message.clone());
        if let Some(detail) = &err.detail {
            self.set_error_detail(detail.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_chain_and_clear_resets_errors_only() {
        let mut session = Session::default();
        session
            .set_token("tok")
            .set_login("agency-client")
            .set_error("53")
            .set_error_str("bad token")
            .set_error_detail("expired");
        assert!(session.has_error());

        session.clear_errors();

        assert!(!session.has_error());
        assert_eq!(session.error(), None);
        assert_eq!(session.error_str(), None);
        assert_eq!(session.error_detail(), None);
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.login(), Some("agency-client"));
    }

    #[test]
    fn token_is_not_debug_printed() {
        let mut session = Session::default();
        session.set_token("very-secret-token");
        assert!(!format!("{:?}", session).contains("very-secret-token"));
    }

    #[test]
    fn record_api_error_skips_missing_detail() {
        let mut session = Session::default();
        session.record_api_error(&ApiError {
            code: "53".to_string(),
            message: "bad token".to_string(),
            detail: None,
        });
        assert_eq!(session.error(), Some("53"));
        assert_eq!(session.error_str(), Some("bad token"));
        assert_eq!(session.error_detail(), None);
    }
}
