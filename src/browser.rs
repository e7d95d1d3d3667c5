use crate::{DirectApiError, Result};

/// Open a URL in the user's default web browser
///
/// Sends the user to the Yandex OAuth consent page. Without a redirect URI
/// configured for the application, Yandex shows a confirmation code on that
/// page which the user pastes back into [`DirectClient::exchange_code`].
///
/// [`DirectClient::exchange_code`]: crate::DirectClient::exchange_code
///
/// # Errors
///
/// Returns [`DirectApiError::BrowserLaunch`] if no browser could be started;
/// print the URL instead in that case.
///
/// # Example
///
/// ```no_run
/// use direct_api::{generate_state, open_browser, ClientConfig, DirectClient};
/// use std::io;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::builder()
///     .application_id("app-id")
///     .application_secret("app-secret")
///     .build();
/// let mut client = DirectClient::new(config)?;
///
/// let url = client.authorize_url(Some(&generate_state()));
/// if open_browser(&url).is_err() {
///     println!("Open this page and allow access: {}", url);
/// }
///
/// let mut code = String::new();
/// io::stdin().read_line(&mut code)?;
/// client.exchange_code(code.trim())?;
/// # Ok(())
/// # }
/// ```
pub fn open_browser(url: &str) -> Result<()> {
    webbrowser::open(url)
        .map_err(|e| DirectApiError::BrowserLaunch(format!("Failed to open browser: {}", e)))
}
