//! Scripted in-memory transport shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use direct_api::{ClientConfig, HttpResponse, Transport, TransportError};
use serde_json::Value;

pub const API_URL: &str = "https://api.test/json/";
pub const TOKEN_URL: &str = "https://oauth.test/token";

/// A request captured by [`ScriptedTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Form { url: String, fields: Vec<(String, String)> },
    Json { url: String, body: String },
}

impl Recorded {
    pub fn json_body(&self) -> Value {
        match self {
            Recorded::Json { body, .. } => serde_json::from_str(body).expect("JSON request body"),
            other => panic!("expected JSON request, got {:?}", other),
        }
    }

    pub fn form_field(&self, name: &str) -> Option<String> {
        match self {
            Recorded::Form { fields, .. } => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            other => panic!("expected form request, got {:?}", other),
        }
    }
}

/// Transport answering from a queue of canned responses
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, body: Value) -> &Self {
        self.reply(200, body.to_string())
    }

    pub fn reply(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("at least one request")
    }

    fn next(&self) -> Result<HttpResponse, TransportError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
    }
}

impl Transport for ScriptedTransport {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(Recorded::Form {
            url: url.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        self.next()
    }

    fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(Recorded::Json {
            url: url.to_string(),
            body,
        });
        self.next()
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::builder()
        .application_id("app-id")
        .application_secret("app-secret")
        .api_url(API_URL)
        .token_url(TOKEN_URL)
        .build()
}
