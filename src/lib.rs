//! # direct-api
//!
//! A Rust client for the Yandex.Direct JSON API (v4) with OAuth 2.0 authorization.
//!
//! The client covers the two-step OAuth handshake and a single generic
//! dispatcher for API methods. Every remote method (campaigns, banners,
//! prices, reports, clients, reference data) is invoked by name through
//! [`DirectClient::call`]; [`Method`] lists the known names.
//!
//! ## Features
//!
//! - **Blocking API** (default): synchronous requests, no async runtime required
//! - **Typed errors**: transport failures, undecodable bodies and API rejections are distinct
//! - **Pluggable transport**: implement [`Transport`] to bring your own HTTP client
//! - **Sandbox support**: switch the API endpoint with one config flag
//! - **Browser Integration**: open the authorize URL in the default browser (default)
//! - **Callback Server**: local redirect receiver for the authorization code (optional, requires tokio)
//!
//! ## Quick Start
//!
//! ```no_run
//! use direct_api::{ClientConfig, DirectClient, Method};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .application_id("app-id")
//!         .application_secret("app-secret")
//!         .sandbox(true)
//!         .build();
//!     let mut client = DirectClient::new(config)?;
//!
//!     println!("Visit: {}", client.authorize_url(Some("my-state")));
//!     // The user authorizes and is redirected back with ?code=...
//!     let tokens = client.exchange_code("1234567")?;
//!     println!("Token expires in: {:?}", tokens.expires_in());
//!
//!     client.set_login("client-login");
//!     match client.call(Method::GetBalance, json!([12345])) {
//!         Ok(balance) => println!("{}", balance),
//!         Err(e) => match e.as_api_error() {
//!             Some(api) => println!("rejected: {} ({})", api.message, api.code),
//!             None => return Err(e.into()),
//!         },
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod method;
mod normalize;
mod session;
mod transport;
mod types;

#[cfg(feature = "browser")]
mod browser;

#[cfg(feature = "callback-server")]
mod server;

// Public API exports
pub use client::{generate_state, DirectClient};
pub use error::{ApiError, DirectApiError, Result, TransportError};
pub use method::{Method, UnknownMethod};
pub use normalize::TextNormalizer;
pub use session::Session;
pub use transport::{HttpResponse, Transport};
pub use types::{
    ClientConfig, ClientConfigBuilder, Endpoints, Environment, TokenSet, TransportConfig,
};

#[cfg(feature = "blocking")]
pub use transport::HttpTransport;

#[cfg(feature = "browser")]
pub use browser::open_browser;

#[cfg(feature = "callback-server")]
pub use server::{callback_router, run_callback_server, CallbackData};
