use crate::TransportError;

/// Raw HTTP response handed back by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, returned for every status
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from a status and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Minimal blocking HTTP capability used by the client
///
/// Implementations must return the body for non-2xx statuses as well: the
/// token endpoint reports failures as JSON with a 400 status, and the API
/// encodes its errors in the body.
pub trait Transport {
    /// POST an `application/x-www-form-urlencoded` body
    fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError>;

    /// POST a pre-serialized JSON body
    fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        (**self).post_form(url, fields)
    }

    fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        (**self).post_json(url, body)
    }
}

#[cfg(feature = "blocking")]
pub use self::blocking::HttpTransport;

#[cfg(feature = "blocking")]
mod blocking {
    use reqwest::blocking::{Client, Response};
    use reqwest::header::CONTENT_TYPE;
    use tracing::debug;

    use super::{HttpResponse, Transport};
    use crate::{DirectApiError, Result, TransportConfig, TransportError};

    /// [`Transport`] backed by `reqwest`'s blocking client
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        /// Build a transport from the given settings
        ///
        /// # Errors
        ///
        /// Returns a configuration error if the TLS backend cannot be initialized
        pub fn new(config: &TransportConfig) -> Result<Self> {
            let builder = Client::builder()
                .connect_timeout(config.connect_timeout)
                .timeout(config.timeout)
                .user_agent(config.user_agent.clone());

            #[cfg(any(feature = "rustls-tls", feature = "native-tls"))]
            let builder = builder.danger_accept_invalid_certs(!config.verify_tls);

            #[cfg(not(any(feature = "rustls-tls", feature = "native-tls")))]
            if !config.verify_tls {
                return Err(DirectApiError::Config(
                    "verify_tls = false needs the rustls-tls or native-tls feature".to_string(),
                ));
            }

            let client = builder.build().map_err(|e| {
                DirectApiError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

            Ok(Self { client })
        }

        fn read(response: Response) -> std::result::Result<HttpResponse, TransportError> {
            let status = response.status().as_u16();
            let body = response.bytes()?.to_vec();
            debug!(status, bytes = body.len(), "received HTTP response");
            Ok(HttpResponse { status, body })
        }
    }

    impl Transport for HttpTransport {
        fn post_form(
            &self,
            url: &str,
            fields: &[(&str, &str)],
        ) -> std::result::Result<HttpResponse, TransportError> {
            let response = self.client.post(url).form(fields).send()?;
            Self::read(response)
        }

        fn post_json(
            &self,
            url: &str,
            body: String,
        ) -> std::result::Result<HttpResponse, TransportError> {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(body)
                .send()?;
            Self::read(response)
        }
    }
}
