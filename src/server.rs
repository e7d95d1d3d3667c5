use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::{DirectApiError, Result};

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

struct ServerState {
    tx: Mutex<Option<oneshot::Sender<Result<CallbackData>>>>,
    expected_state: String,
}

impl ServerState {
    async fn deliver(&self, result: Result<CallbackData>) {
        if let Some(tx) = self.tx.lock().await.take() {
            let _ = tx.send(result);
        }
    }
}

/// Authorization code delivered to the redirect URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackData {
    pub code: String,
    pub state: String,
}

/// Build the `/callback` router and the receiver that resolves on the first redirect
///
/// Use this to mount the redirect handler into an existing axum application.
/// An empty `expected_state` disables the state check.
pub fn callback_router(
    expected_state: &str,
) -> (Router, oneshot::Receiver<Result<CallbackData>>) {
    let (tx, rx) = oneshot::channel();

    let state = Arc::new(ServerState {
        tx: Mutex::new(Some(tx)),
        expected_state: expected_state.to_string(),
    });

    let router = Router::new()
        .route("/callback", get(handle_callback))
        .with_state(state);

    (router, rx)
}

/// Run a local OAuth redirect receiver
///
/// Listens on `127.0.0.1:port` for the redirect from the authorize page and
/// resolves with the authorization code once it arrives. The application's
/// redirect URI must point at `http://127.0.0.1:<port>/callback` (or
/// `localhost`).
///
/// **Note:** This feature requires tokio and is only available when the
/// `callback-server` feature is enabled.
///
/// # Errors
///
/// Returns an error if:
/// - The server fails to bind
/// - The redirect carries an OAuth `error`
/// - The state token doesn't match
/// - The redirect carries no code
///
/// # Example
///
/// ```no_run
/// use direct_api::{generate_state, run_callback_server, ClientConfig, DirectClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::builder()
///     .application_id("app-id")
///     .application_secret("app-secret")
///     .redirect_uri("http://127.0.0.1:8765/callback")
///     .build();
/// let mut client = DirectClient::new(config)?;
/// let state = generate_state();
///
/// println!("Visit: {}", client.authorize_url(Some(&state)));
/// let runtime = tokio::runtime::Runtime::new()?;
/// let callback = runtime.block_on(run_callback_server(8765, &state))?;
///
/// let tokens = client.exchange_code(&callback.code)?;
/// println!("Token expires in: {:?}", tokens.expires_in());
/// # Ok(())
/// # }
/// ```
pub async fn run_callback_server(port: u16, expected_state: &str) -> Result<CallbackData> {
    let (app, rx) = callback_router(expected_state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        DirectApiError::CallbackServer(format!("Failed to bind to {}: {}", addr, e))
    })?;
    debug!(addr = %addr, "waiting for OAuth redirect");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        let shutdown = async {
            let _ = shutdown_rx.await;
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            warn!(error = %e, "callback server stopped with an error");
        }
    });

    let result = match rx.await {
        Ok(result) => result,
        Err(_) => Err(DirectApiError::CallbackServer(
            "Server shut down unexpectedly".to_string(),
        )),
    };

    let _ = shutdown_tx.send(());
    let _ = server.await;
    result
}

async fn handle_callback(
    Query(params): Query<CallbackQuery>,
    State(state): State<Arc<ServerState>>,
) -> Html<String> {
    if let Some(error) = params.error {
        warn!(error = %error, "authorization was declined");
        let message = params
            .error_description
            .clone()
            .unwrap_or_else(|| error.clone());
        state
            .deliver(Err(DirectApiError::OAuth {
                error,
                description: params.error_description,
            }))
            .await;
        return failure_page(&message);
    }

    let received_state = params.state.unwrap_or_default();
    if !state.expected_state.is_empty() && received_state != state.expected_state {
        state
            .deliver(Err(DirectApiError::OAuth {
                error: "state_mismatch".to_string(),
                description: Some("State mismatch - possible CSRF attack".to_string()),
            }))
            .await;
        return failure_page("Security validation failed. Please try again.");
    }

    match params.code.filter(|code| !code.is_empty()) {
        Some(code) => {
            state
                .deliver(Ok(CallbackData {
                    code,
                    state: received_state,
                }))
                .await;
            Html(
                r#"
                <html>
                    <head><title>Authorization Successful</title></head>
                    <body>
                        <h1>Authorization Successful!</h1>
                        <p>You can close this window and return to the application.</p>
                    </body>
                </html>
                "#
                .to_string(),
            )
        }
        None => {
            state
                .deliver(Err(DirectApiError::InvalidAuthorizationCode))
                .await;
            failure_page("No authorization code received.")
        }
    }
}

fn failure_page(message: &str) -> Html<String> {
    Html(format!(
        r#"
        <html>
            <head><title>Authorization Failed</title></head>
            <body>
                <h1>Authorization Failed</h1>
                <p>{}</p>
                <p>You can close this window.</p>
            </body>
        </html>
        "#,
        html_escape(message)
    ))
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
