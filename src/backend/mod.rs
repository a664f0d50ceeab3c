//! Backend descriptors.
//!
//! The two supported backends agree on what a user is but not on how to talk
//! about one. Each [`Descriptor`] implementation owns every wire difference:
//! URL shape, HTTP verb, body field names and the duplicate-check protocol.
//!
//! Flow Overview:
//! - Parse the backend kind and base URL into a [`BackendConfig`].
//! - Ask the config for its descriptor (`tabular::TabularStore` or `rest::RestService`).
//! - The adapter asks the descriptor for requests and sends them through the transport.

pub mod rest;
pub mod tabular;

use crate::{
    error::Result,
    record::{NewUser, RecordHandle, SearchCriteria, UserChanges},
    transport::BackendResponse,
};
use anyhow::anyhow;
use reqwest::Method;
use serde_json::Value;
use std::{fmt, str::FromStr, time::Duration};
use url::Url;

pub const DEFAULT_TABULAR_URL: &str = "http://localhost:3000/usersDataManagement";
pub const DEFAULT_REST_URL: &str = "http://localhost:8080/users";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Tabular,
    Rest,
}

impl BackendKind {
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Tabular => DEFAULT_TABULAR_URL,
            Self::Rest => DEFAULT_REST_URL,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => f.write_str("tabular"),
            Self::Rest => f.write_str("rest"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "tabular" | "json-server" => Ok(Self::Tabular),
            "rest" => Ok(Self::Rest),
            other => Err(anyhow!(
                "invalid backend {other}: expected tabular, json-server or rest"
            )),
        }
    }
}

/// Process-wide backend selection, fixed once and handed to the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Build a config, falling back to the kind's default base URL.
    /// # Errors
    /// Returns an error if the base URL cannot be parsed, is not http(s) or has no host.
    pub fn new(kind: BackendKind, base_url: Option<&str>) -> anyhow::Result<Self> {
        let raw = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| kind.default_base_url());

        let url = Url::parse(raw)?;

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(anyhow!(
                "Error parsing URL: unsupported scheme {scheme}"
            ));
        }

        if url.host().is_none() || url.cannot_be_a_base() {
            return Err(anyhow!("Error parsing URL: no host specified"));
        }

        Ok(Self {
            kind,
            base_url: url,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Descriptor for the configured backend.
    #[must_use]
    pub fn descriptor(&self) -> Box<dyn Descriptor> {
        match self.kind {
            BackendKind::Tabular => Box::new(tabular::TabularStore::new(self.base_url.clone())),
            BackendKind::Rest => Box::new(rest::RestService::new(self.base_url.clone())),
        }
    }
}

/// One request to a backend, fully built by a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

impl BackendRequest {
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    #[must_use]
    pub fn delete(url: Url) -> Self {
        Self {
            method: Method::DELETE,
            url,
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(method: Method, url: Url, body: Value) -> Self {
        Self {
            method,
            url,
            body: Some(body),
        }
    }
}

/// Capability set of one backend variant.
pub trait Descriptor: fmt::Debug + Send + Sync {
    fn kind(&self) -> BackendKind;

    fn base(&self) -> &Url;

    /// Query returning the records for one business key, most relevant first.
    fn find_url(&self, business_key: &str) -> Url;

    fn search_url(&self, criteria: &SearchCriteria) -> Url;

    fn duplicate_check_request(&self, business_key: &str) -> BackendRequest;

    /// Interpret the duplicate-check answer: `Ok(true)` when the key is taken.
    /// # Errors
    /// Returns an error when the answer does not follow the backend's protocol.
    fn is_duplicate(&self, response: &BackendResponse) -> Result<bool>;

    fn create_body(&self, fields: &NewUser) -> Value;

    fn update_request(&self, handle: &RecordHandle, changes: &UserChanges) -> BackendRequest;

    fn delete_url(&self, handle: &RecordHandle) -> Url;

    /// Whether a 404 on an exact search means "no matches" rather than a failure.
    fn search_not_found_is_empty(&self) -> bool {
        false
    }

    fn create_request(&self, fields: &NewUser) -> BackendRequest {
        BackendRequest::with_body(Method::POST, self.base().clone(), self.create_body(fields))
    }
}

/// Base URL with extra path segments, each percent-encoded.
pub(crate) fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Base URL with extra query pairs appended.
pub(crate) fn with_query(base: &Url, pairs: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("tabular".parse::<BackendKind>().unwrap(), BackendKind::Tabular);
        assert_eq!("JSON-Server".parse::<BackendKind>().unwrap(), BackendKind::Tabular);
        assert_eq!(" rest ".parse::<BackendKind>().unwrap(), BackendKind::Rest);

        let err = "graphql".parse::<BackendKind>().unwrap_err();
        assert!(err.to_string().contains("invalid backend graphql"));
    }

    #[test]
    fn config_defaults_base_url_per_kind() {
        let tabular = BackendConfig::new(BackendKind::Tabular, None).unwrap();
        assert_eq!(tabular.base_url.as_str(), DEFAULT_TABULAR_URL);

        let rest = BackendConfig::new(BackendKind::Rest, Some("  ")).unwrap();
        assert_eq!(rest.base_url.as_str(), DEFAULT_REST_URL);
        assert_eq!(rest.timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn config_rejects_non_http_urls() {
        let err = BackendConfig::new(BackendKind::Rest, Some("ftp://host/users")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme ftp"));

        assert!(BackendConfig::new(BackendKind::Rest, Some("not a url")).is_err());
    }

    #[test]
    fn config_selects_matching_descriptor() {
        let config = BackendConfig::new(BackendKind::Rest, Some("http://api.test/users")).unwrap();
        let descriptor = config.descriptor();
        assert_eq!(descriptor.kind(), BackendKind::Rest);
        assert_eq!(descriptor.base().as_str(), "http://api.test/users");

        let config = BackendConfig::new(BackendKind::Tabular, None)
            .unwrap()
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.descriptor().kind(), BackendKind::Tabular);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn segments_are_encoded_and_trailing_slash_dropped() {
        let base = Url::parse("http://api.test/users/").unwrap();
        assert_eq!(
            with_segments(&base, &["by-userid", "a b/c"]).as_str(),
            "http://api.test/users/by-userid/a%20b%2Fc"
        );
    }

    #[test]
    fn query_pairs_are_encoded() {
        let base = Url::parse("http://api.test/users").unwrap();
        assert_eq!(with_query(&base, &[]).as_str(), "http://api.test/users");
        assert_eq!(
            with_query(&base, &[("userID", "a&b"), ("userName", "Al Ice")]).as_str(),
            "http://api.test/users?userID=a%26b&userName=Al+Ice"
        );
    }
}
