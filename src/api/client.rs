use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use crate::config::{ApiSettings, Session};
use crate::error::{GinumError, Result};

/// List payloads arrive bare, wrapped once in `data`, or wrapped twice.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
    Nested { data: Inner<T> },
}

#[derive(Deserialize)]
struct Inner<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

/// Decode a list response regardless of which envelope the endpoint uses.
pub fn normalize_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    match serde_json::from_str::<ListEnvelope<T>>(body) {
        Ok(ListEnvelope::Bare(items))
        | Ok(ListEnvelope::Wrapped { data: items })
        | Ok(ListEnvelope::Nested {
            data: Inner { data: items },
        }) => Ok(items),
        Err(_) => Err(GinumError::InvalidResponse(format!(
            "expected a list, got: {}",
            excerpt(body)
        ))),
    }
}

/// Decode a single object, unwrapping a `data` envelope if present.
pub fn normalize_object<T: DeserializeOwned>(body: &str) -> Result<T> {
    match serde_json::from_str::<ObjectEnvelope<T>>(body) {
        Ok(ObjectEnvelope::Wrapped { data }) | Ok(ObjectEnvelope::Bare(data)) => Ok(data),
        Err(_) => Err(GinumError::InvalidResponse(excerpt(body))),
    }
}

/// Pull the human-readable message out of an error response body.
pub fn server_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match &value {
            serde_json::Value::String(s) if !s.is_empty() => return s.clone(),
            serde_json::Value::Object(map) => {
                for key in ["error", "message"] {
                    if let Some(serde_json::Value::String(s)) = map.get(key) {
                        if !s.is_empty() {
                            return s.clone();
                        }
                    }
                }
            }
            _ => {}
        }
    }
    if trimmed.is_empty() {
        format!("Request failed with status {status}")
    } else {
        trimmed.to_string()
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > 120 {
        let cut: String = trimmed.chars().take(120).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

fn map_transport(err: ureq::Error) -> GinumError {
    match err {
        ureq::Error::Timeout(_) => GinumError::Timeout,
        other => GinumError::Transport(other.to_string()),
    }
}

/// Blocking REST client for the Ginum backend.
///
/// Every request carries the session's bearer token when there is one and is
/// bounded by the configured timeout. Non-2xx responses become errors here so
/// callers only ever see decoded payloads.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, session: Session) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        match self.session.token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    fn read(&self, method: &str, url: &str, mut response: Response<Body>) -> Result<String> {
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(map_transport)?;
        debug!(method, url, status, "response");

        if status == 401 {
            warn!(url, "unauthorized");
            return Err(GinumError::Unauthorized);
        }
        if !(200..300).contains(&status) {
            let message = server_message(status, &body);
            if status >= 500 {
                warn!(url, status, %message, "server error");
            }
            return Err(GinumError::Server { status, message });
        }
        Ok(body)
    }

    pub(crate) fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .authorize(self.agent.get(&url))
            .call()
            .map_err(map_transport)?;
        self.read("GET", &url, response)
    }

    pub(crate) fn post_text<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.url(path);
        let payload = serde_json::to_string(body)?;
        debug!(%url, bytes = payload.len(), "POST");
        let response = self
            .authorize(self.agent.post(&url))
            .header("Content-Type", "application/json")
            .send(payload)
            .map_err(map_transport)?;
        self.read("POST", &url, response)
    }

    pub fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        normalize_list(&self.get_text(path)?)
    }

    pub fn get_object<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        normalize_object(&self.get_text(path)?)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        normalize_object(&self.post_text(path, body)?)
    }

    /// POST where only success matters; the body, if any, is returned raw.
    pub fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        let text = self.post_text(path, body)?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}
