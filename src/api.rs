//! Blocking REST client for the Hull Insight API.
//!
//! All traffic is JSON over HTTPS under a configurable base URL. Requests
//! carry a bearer token once a session exists. Error policy follows the
//! web console it replaces: a 401 from any authenticated endpoint means
//! the session is gone ([`HullError::SessionExpired`], the caller clears
//! the session and returns to the entry screen); every other failure is a
//! plain [`HullError::Api`]/[`HullError::Network`] carrying the server
//! message where one was provided, surfaced to the user as a toast.
//!
//! The client is deliberately synchronous. Screen handlers run on the UI
//! thread and await nothing, so two list requests can never be in flight
//! at once and "last response wins" is the same thing as "last request
//! wins".

use crate::config::AppConfig;
use crate::error::{HullError, Result};
use crate::session::AuthData;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use ureq::{http, Agent, Body};

const USER_AGENT: &str = concat!("hullinsight/", env!("CARGO_PKG_VERSION"));

/// Paginated list envelope returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Value>,
}

/// One page of list results, normalized from either the paginated
/// envelope or a bare JSON array (the roles endpoint returns the latter).
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<Value>,
    pub total_count: u64,
}

impl Page {
    /// Normalize a list response body into a page.
    pub fn from_value(body: Value) -> Result<Self> {
        match body {
            Value::Array(items) => Ok(Self {
                total_count: items.len() as u64,
                items,
            }),
            Value::Object(_) => {
                let page: Paginated = serde_json::from_value(body)?;
                Ok(Self {
                    items: page.results,
                    total_count: page.count,
                })
            }
            other => Err(HullError::Api(format!(
                "Unexpected list response shape: {other}"
            ))),
        }
    }
}

/// HTTP verbs used by the REST-style endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Blocking client with the base URL and current bearer token baked in.
#[derive(Debug)]
pub struct ApiClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from the app config and any existing session.
    pub fn new(config: &AppConfig, auth: Option<&AuthData>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: config.effective_base_url(),
            token: auth.map(|a| a.access.clone()),
        }
    }

    /// Install the token after a login.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the token (logout, or a 401 observed by the caller).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET an endpoint, returning the parsed JSON body.
    pub fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::Get, endpoint, None)
    }

    /// POST a JSON body to an endpoint.
    pub fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.request(Method::Post, endpoint, Some(body))
    }

    /// PUT a JSON body to an endpoint.
    pub fn put(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.request(Method::Put, endpoint, Some(body))
    }

    /// DELETE an endpoint.
    pub fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::Delete, endpoint, None)
    }

    /// GET a list endpoint with `page` (1-based on the wire) and optional
    /// `search` query parameters, normalized into a [`Page`].
    pub fn get_page(&self, endpoint: &str, page: u32, search: &str) -> Result<Page> {
        let mut req = self.agent.get(&self.url(endpoint)).header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        for (key, value) in page_query(page, search) {
            req = req.query(key, value);
        }
        let response = req.call().map_err(|e| HullError::Network(e.to_string()))?;
        Page::from_value(read_body(response)?)
    }

    /// Log in with the credentials the console collected. Unauthenticated
    /// by design; on success the caller persists the returned record and
    /// installs the token.
    pub fn login(&self, loginname: &str, password: &str) -> Result<AuthData> {
        let body = serde_json::json!({
            "loginname": loginname,
            "password": password,
        });
        let response = self
            .agent
            .post(&self.url("api/auth/token/"))
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| HullError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| HullError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(HullError::LoginFailed(extract_message(&text, status)));
        }

        let auth: AuthData = serde_json::from_str(&text)
            .map_err(|_| HullError::LoginFailed("Malformed login response".to_string()))?;
        Ok(auth)
    }

    /// Tell the server the user is gone. Failures here are reported but
    /// never block the local logout.
    pub fn logout(&self, user_id: Option<u64>) -> Result<Value> {
        let body = serde_json::json!({ "user_id": user_id });
        self.post("api/auth/logout/", &body)
    }

    fn request(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url(endpoint);
        let bearer = self.token.as_ref().map(|t| format!("Bearer {t}"));

        let result = match (method, body) {
            (Method::Get, _) => {
                let mut req = self.agent.get(&url).header("User-Agent", USER_AGENT);
                if let Some(b) = &bearer {
                    req = req.header("Authorization", b);
                }
                req.call()
            }
            (Method::Delete, _) => {
                let mut req = self.agent.delete(&url).header("User-Agent", USER_AGENT);
                if let Some(b) = &bearer {
                    req = req.header("Authorization", b);
                }
                req.call()
            }
            (Method::Post, payload) => {
                let mut req = self
                    .agent
                    .post(&url)
                    .header("User-Agent", USER_AGENT)
                    .header("Content-Type", "application/json");
                if let Some(b) = &bearer {
                    req = req.header("Authorization", b);
                }
                req.send_json(payload.unwrap_or(&Value::Null))
            }
            (Method::Put, payload) => {
                let mut req = self
                    .agent
                    .put(&url)
                    .header("User-Agent", USER_AGENT)
                    .header("Content-Type", "application/json");
                if let Some(b) = &bearer {
                    req = req.header("Authorization", b);
                }
                req.send_json(payload.unwrap_or(&Value::Null))
            }
        };

        let response = result.map_err(|e| HullError::Network(e.to_string()))?;
        read_body(response)
    }
}

/// Apply the shared response policy: 401 ends the session, any other
/// non-2xx surfaces the server message, an empty body reads as null.
fn read_body(response: http::Response<Body>) -> Result<Value> {
    let status = response.status().as_u16();
    let text = response
        .into_body()
        .read_to_string()
        .map_err(|e| HullError::Network(e.to_string()))?;

    if status == 401 {
        return Err(HullError::SessionExpired);
    }
    if !(200..300).contains(&status) {
        return Err(HullError::Api(extract_message(&text, status)));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(HullError::from)
}

/// Query pairs for a list fetch; encoding is the HTTP client's job.
fn page_query(page: u32, search: &str) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("page", page.to_string())];
    if !search.is_empty() {
        pairs.push(("search", search.to_string()));
    }
    pairs
}

/// Pull a human-readable message out of an error body, falling back to a
/// generic status line. Servers answer with either `{"message": ...}`,
/// `{"detail": ...}` or field-keyed validation maps.
fn extract_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
        // Field-keyed validation errors: report the first one verbatim.
        if let Some(map) = value.as_object() {
            for (field, errors) in map {
                let msg = match errors {
                    Value::String(s) => Some(s.clone()),
                    Value::Array(items) => items.first().and_then(|v| v.as_str()).map(String::from),
                    _ => None,
                };
                if let Some(msg) = msg {
                    return format!("{field}: {msg}");
                }
            }
        }
    }
    format!("Request failed with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_paginated_envelope() {
        let body = serde_json::json!({
            "count": 42,
            "next": "http://x/?page=2",
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        });
        let page = Page::from_value(body).unwrap();
        assert_eq!(page.total_count, 42);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_page_from_bare_array() {
        let body = serde_json::json!([{"id": 1}, {"id": 2}, {"id": 3}]);
        let page = Page::from_value(body).unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_page_rejects_scalars() {
        assert!(Page::from_value(Value::String("nope".to_string())).is_err());
    }

    #[test]
    fn test_extract_message_prefers_message_key() {
        let body = r#"{"message": "Unit already exists"}"#;
        assert_eq!(extract_message(body, 400), "Unit already exists");
    }

    #[test]
    fn test_extract_message_falls_back_to_detail() {
        let body = r#"{"detail": "Not found."}"#;
        assert_eq!(extract_message(body, 404), "Not found.");
    }

    #[test]
    fn test_extract_message_reports_field_errors() {
        let body = r#"{"code": ["This field must be unique."]}"#;
        assert_eq!(extract_message(body, 400), "code: This field must be unique.");
    }

    #[test]
    fn test_extract_message_generic_fallback() {
        assert_eq!(
            extract_message("<html>oops</html>", 502),
            "Request failed with status 502"
        );
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = AppConfig {
            base_url: "https://api.example.com".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config, None);
        assert_eq!(
            client.url("/master/units/"),
            "https://api.example.com/master/units/"
        );
        assert_eq!(
            client.url("master/units/"),
            "https://api.example.com/master/units/"
        );
    }

    #[test]
    fn test_page_query_is_one_based_with_optional_search() {
        assert_eq!(page_query(1, ""), [("page", "1".to_string())]);
        assert_eq!(
            page_query(3, "INS Vikrant"),
            [
                ("page", "3".to_string()),
                ("search", "INS Vikrant".to_string())
            ]
        );
    }
}
