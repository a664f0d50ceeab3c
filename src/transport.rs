//! HTTP transport to the active backend.
//!
//! Keeps request construction, timeouts and body handling in one place so the
//! adapter only deals with descriptors and responses. Bodies are read as text:
//! backends answer with `204`, empty bodies or plain JSON depending on the
//! route, and each operation decides how strict to be about them.

use crate::{
    APP_USER_AGENT,
    backend::{BackendConfig, BackendRequest},
    error::{Error, Result},
};
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use tracing::{Instrument, debug, error, info_span};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the configured timeouts.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Send one request and collect status and body.
    /// # Errors
    /// Returns [`Error::Transport`] if the request cannot be sent or the body cannot be read.
    pub async fn send(&self, request: &BackendRequest) -> Result<BackendResponse> {
        let url = request.url.to_string();

        let span = info_span!(
            "backend.request",
            http.method = %request.method,
            url = %url
        );

        async {
            let mut builder = self
                .client
                .request(request.method.clone(), request.url.clone())
                .header(header::ACCEPT, "application/json")
                .header(header::CACHE_CONTROL, "no-store");
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|e| {
                error!("request failed: {}", e);
                Error::from(e)
            })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| {
                error!("failed to read response body: {}", e);
                Error::from(e)
            })?;

            debug!("backend answered {}", status);

            Ok::<_, Error>(BackendResponse { url, status, body })
        }
        .instrument(span)
        .await
    }
}

/// Status and raw body of one backend answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl BackendResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `204` or a blank body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.body.trim().is_empty()
    }

    /// Parse the body, treating an empty answer as `null`.
    /// # Errors
    /// Returns [`Error::Transport`] if a non-empty body is not JSON.
    pub fn json(&self) -> Result<Value> {
        if self.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Parse the body, treating an empty or malformed answer as `null`.
    #[must_use]
    pub fn json_or_null(&self) -> Value {
        self.json().unwrap_or(Value::Null)
    }

    /// Backend-provided error text, if the body carries one.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let body = self.json_or_null();
        body.get("errors")
            .and_then(|v| v.get(0))
            .or_else(|| body.get("message"))
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }
}
