//! REST service descriptor.
//!
//! - Lookups: `GET {base}?userID=..` returning zero or more users.
//! - Existence: `GET {base}/by-userid/{userID}`, 200 = taken, 404 = free.
//! - Updates: full `PUT {base}/{id}` with `password` for the secret.
//! - No soft-delete flag.

use super::{BackendKind, BackendRequest, Descriptor, with_query, with_segments};
use crate::{
    error::{Error, Result},
    record::{NewUser, RecordHandle, SearchCriteria, UserChanges},
    transport::BackendResponse,
};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};
use url::Url;

const EXISTENCE_SEGMENT: &str = "by-userid";

#[derive(Debug, Clone)]
pub struct RestService {
    base: Url,
}

impl RestService {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Descriptor for RestService {
    fn kind(&self) -> BackendKind {
        BackendKind::Rest
    }

    fn base(&self) -> &Url {
        &self.base
    }

    fn find_url(&self, business_key: &str) -> Url {
        with_query(&self.base, &[("userID", business_key)])
    }

    fn search_url(&self, criteria: &SearchCriteria) -> Url {
        if criteria.all_mode {
            return self.base.clone();
        }

        let mut pairs = Vec::with_capacity(2);
        if !criteria.business_key().is_empty() {
            pairs.push(("userID", criteria.business_key()));
        }
        if !criteria.display_name().is_empty() {
            pairs.push(("userName", criteria.display_name()));
        }
        with_query(&self.base, &pairs)
    }

    fn duplicate_check_request(&self, business_key: &str) -> BackendRequest {
        BackendRequest::get(with_segments(
            &self.base,
            &[EXISTENCE_SEGMENT, business_key],
        ))
    }

    fn is_duplicate(&self, response: &BackendResponse) -> Result<bool> {
        match response.status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Error::backend(
                &response.url,
                status,
                "duplicate check failed",
            )),
        }
    }

    fn create_body(&self, fields: &NewUser) -> Value {
        json!({
            "userID": fields.business_key,
            "userName": fields.display_name,
            "password": fields.secret.expose_secret(),
            "accountCreate": fields.created_at,
        })
    }

    fn update_request(&self, handle: &RecordHandle, changes: &UserChanges) -> BackendRequest {
        let mut body = Map::new();
        body.insert("userID".to_string(), json!(changes.business_key));
        body.insert("userName".to_string(), json!(changes.display_name));
        if let Some(secret) = &changes.secret {
            body.insert("password".to_string(), json!(secret.expose_secret()));
        }

        BackendRequest::with_body(
            Method::PUT,
            with_segments(&self.base, &[&handle.to_string()]),
            Value::Object(body),
        )
    }

    fn delete_url(&self, handle: &RecordHandle) -> Url {
        with_segments(&self.base, &[&handle.to_string()])
    }

    fn search_not_found_is_empty(&self) -> bool {
        true
    }
}
