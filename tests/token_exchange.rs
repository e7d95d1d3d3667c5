mod common;

use common::{test_config, Recorded, ScriptedTransport, TOKEN_URL};
use direct_api::{ClientConfig, DirectApiError, DirectClient, TransportError};
use serde_json::json;

#[test]
fn authorize_url_with_and_without_state() {
    let transport = ScriptedTransport::new();
    let client = DirectClient::with_transport(test_config(), &transport);

    let plain = client.authorize_url(None);
    assert_eq!(
        plain,
        "https://oauth.yandex.ru/authorize?response_type=code&client_id=app-id"
    );

    let with_state = client.authorize_url(Some("abc"));
    assert_eq!(with_state, format!("{}&state=abc", plain));
    assert!(transport.requests().is_empty());
}

#[test]
fn exchange_posts_form_and_installs_token() {
    let transport = ScriptedTransport::new();
    transport.reply_json(json!({
        "access_token": "tok123",
        "token_type": "bearer",
        "expires_in": 31536000
    }));
    let mut client = DirectClient::with_transport(test_config(), &transport);
    client.session_mut().set_error("old").set_error_detail("old detail");

    let tokens = client.exchange_code("1234567").unwrap();

    assert_eq!(tokens.access_token, "tok123");
    assert_eq!(tokens.token_type.as_deref(), Some("bearer"));
    assert!(!tokens.is_expired());
    assert_eq!(client.session().token(), Some("tok123"));
    assert!(!client.session().has_error());

    let request = transport.last_request();
    assert!(matches!(&request, Recorded::Form { url, .. } if url == TOKEN_URL));
    assert_eq!(request.form_field("grant_type").as_deref(), Some("authorization_code"));
    assert_eq!(request.form_field("code").as_deref(), Some("1234567"));
    assert_eq!(request.form_field("client_id").as_deref(), Some("app-id"));
    assert_eq!(request.form_field("client_secret").as_deref(), Some("app-secret"));
}

#[test]
fn exchanged_token_is_used_by_next_call() {
    let transport = ScriptedTransport::new();
    transport
        .reply_json(json!({"access_token": "tok123"}))
        .reply_json(json!({"data": []}));
    let mut client = DirectClient::with_transport(test_config(), &transport);

    client.exchange_code("1234567").unwrap();
    client.call("GetClientsList", json!({})).unwrap();

    assert_eq!(transport.last_request().json_body()["token"], "tok123");
}

#[test]
fn oauth_error_is_returned_and_recorded() {
    let transport = ScriptedTransport::new();
    transport.reply(
        400,
        json!({"error": "invalid_grant", "error_description": "Code has expired"}).to_string(),
    );
    let mut client = DirectClient::with_transport(test_config(), &transport);

    let err = client.exchange_code("7654321").unwrap_err();

    match err {
        DirectApiError::OAuth { error, description } => {
            assert_eq!(error, "invalid_grant");
            assert_eq!(description.as_deref(), Some("Code has expired"));
        }
        other => panic!("expected OAuth error, got {:?}", other),
    }
    assert_eq!(client.session().error(), Some("invalid_grant"));
    assert_eq!(client.session().error_detail(), Some("Code has expired"));
    assert_eq!(client.session().token(), None);
}

#[test]
fn failed_exchange_keeps_previous_token() {
    let transport = ScriptedTransport::new();
    transport.reply_json(json!({"error": "invalid_grant"}));
    let mut client = DirectClient::with_transport(test_config(), &transport);
    client.set_token("existing");

    assert!(client.exchange_code("1234567").is_err());

    assert_eq!(client.session().token(), Some("existing"));
}

#[test]
fn oversized_lifetime_does_not_overflow() {
    let transport = ScriptedTransport::new();
    transport.reply_json(json!({"access_token": "tok", "expires_in": u64::MAX}));
    let mut client = DirectClient::with_transport(test_config(), &transport);

    let tokens = client.exchange_code("1234567").unwrap();

    assert_eq!(tokens.access_token, "tok");
    assert_eq!(tokens.expires_at, Some(u64::MAX));
    assert!(!tokens.is_expired());
    assert_eq!(client.session().token(), Some("tok"));
}

#[test]
fn wrongly_shaped_token_body_is_a_decode_error() {
    let transport = ScriptedTransport::new();
    transport
        .reply_json(json!({"access_token": "tok", "expires_in": "a year"}))
        .reply_json(json!(["access_token"]));
    let mut client = DirectClient::with_transport(test_config(), &transport);

    let err = client.exchange_code("1234567").unwrap_err();
    assert!(matches!(err, DirectApiError::Decode { status: 200, ref body_preview, .. } if body_preview.contains("a year")));
    assert!(err.is_transport());

    let err = client.exchange_code("1234567").unwrap_err();
    assert!(matches!(err, DirectApiError::Decode { .. }));
    assert_eq!(client.session().token(), None);
}

#[test]
fn response_without_token_or_error_is_rejected() {
    let transport = ScriptedTransport::new();
    transport.reply_json(json!({"token_type": "bearer"}));
    let mut client = DirectClient::with_transport(test_config(), &transport);

    let err = client.exchange_code("1234567").unwrap_err();

    assert!(matches!(err, DirectApiError::MissingAccessToken));
}

#[test]
fn missing_credentials_fail_before_any_request() {
    let config = ClientConfig::builder().application_id("app-id").build();
    let transport = ScriptedTransport::new();
    let mut client = DirectClient::with_transport(config, &transport);

    let err = client.exchange_code("1234567").unwrap_err();

    assert!(matches!(err, DirectApiError::Config(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn empty_code_is_rejected() {
    let transport = ScriptedTransport::new();
    let mut client = DirectClient::with_transport(test_config(), &transport);

    assert!(matches!(
        client.exchange_code(""),
        Err(DirectApiError::InvalidAuthorizationCode)
    ));
    assert!(transport.requests().is_empty());
}

#[test]
fn transport_failure_during_exchange_propagates() {
    let transport = ScriptedTransport::new();
    transport.fail(TransportError::Timeout("deadline elapsed".to_string()));
    let mut client = DirectClient::with_transport(test_config(), &transport);

    let err = client.exchange_code("1234567").unwrap_err();

    assert!(matches!(
        err,
        DirectApiError::Transport(TransportError::Timeout(_))
    ));
    assert!(!client.session().has_error());
}

#[test]
fn refresh_uses_refresh_grant() {
    let transport = ScriptedTransport::new();
    transport.reply_json(json!({
        "access_token": "fresh",
        "refresh_token": "next-refresh",
        "expires_in": 3600
    }));
    let mut client = DirectClient::with_transport(test_config(), &transport);

    let tokens = client.refresh_token("refresh-1").unwrap();

    assert_eq!(tokens.access_token, "fresh");
    assert_eq!(tokens.refresh_token.as_deref(), Some("next-refresh"));
    assert_eq!(client.session().token(), Some("fresh"));

    let request = transport.last_request();
    assert_eq!(request.form_field("grant_type").as_deref(), Some("refresh_token"));
    assert_eq!(request.form_field("refresh_token").as_deref(), Some("refresh-1"));
}

#[test]
fn empty_refresh_token_is_rejected() {
    let transport = ScriptedTransport::new();
    let mut client = DirectClient::with_transport(test_config(), &transport);

    assert!(matches!(
        client.refresh_token(""),
        Err(DirectApiError::OAuth { .. })
    ));
    assert!(transport.requests().is_empty());
}
