//! Authorize against Yandex OAuth and call the sandbox API (synchronous)
//!
//! Reads the application credentials from `DIRECT_APP_ID` and
//! `DIRECT_APP_SECRET`, opens the authorize page, exchanges the pasted code
//! and lists the account's campaigns.
//!
//! Run with: RUST_LOG=direct_api=debug cargo run --example authorize_and_call

use direct_api::{generate_state, open_browser, ClientConfig, DirectClient, Method};
use serde_json::json;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Yandex.Direct - Authorize and Call (Sync) ===\n");

    let config = ClientConfig::builder()
        .application_id(std::env::var("DIRECT_APP_ID")?)
        .application_secret(std::env::var("DIRECT_APP_SECRET")?)
        .sandbox(true)
        .build();
    let mut client = DirectClient::new(config)?;

    let state = generate_state();
    let url = client.authorize_url(Some(&state));

    println!("🌐 Opening browser for authorization...");
    match open_browser(&url) {
        Ok(_) => println!("✅ Browser opened! Please authorize in your browser."),
        Err(e) => {
            println!("⚠️  Could not open browser: {}", e);
            println!("Please manually visit: {}", url);
        }
    }

    print!("Paste the confirmation code: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();

    println!("\n🔄 Exchanging code for a token...");
    let tokens = client.exchange_code(code)?;
    println!("✅ Got token, expires in: {:?}", tokens.expires_in());

    print!("Login of the account to act on: ");
    io::stdout().flush()?;
    let mut login = String::new();
    io::stdin().read_line(&mut login)?;
    let login = login.trim().to_string();
    client.set_login(login.clone());

    match client.call(Method::GetCampaignsList, json!([login])) {
        Ok(campaigns) => println!("\n📋 Campaigns:\n{:#}", campaigns),
        Err(e) => match e.as_api_error() {
            Some(api) => {
                println!("\n❌ API rejected the call: {} (code {})", api.message, api.code);
                if let Some(detail) = &api.detail {
                    println!("   {}", detail);
                }
            }
            None => return Err(e.into()),
        },
    }

    Ok(())
}
