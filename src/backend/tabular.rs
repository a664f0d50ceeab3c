//! Tabular store (json-server style) descriptor.
//!
//! - Lookups are list queries: `?userID=..&_sort=id&_order=desc&_limit=1`.
//! - Duplicate check reuses the lookup; any returned row means the key is taken.
//! - Updates are partial `PATCH {base}/{id}` with `userPW` for the secret.
//! - New rows carry `deleteFlg: 0`.
//! - No server-side display name filter: the adapter filters after the fact.

use super::{BackendKind, BackendRequest, Descriptor, with_query, with_segments};
use crate::{
    error::{Error, Result},
    normalize::normalize_many,
    record::{NewUser, RecordHandle, SearchCriteria, UserChanges},
    transport::BackendResponse,
};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};
use url::Url;

#[derive(Debug, Clone)]
pub struct TabularStore {
    base: Url,
}

impl TabularStore {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Descriptor for TabularStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Tabular
    }

    fn base(&self) -> &Url {
        &self.base
    }

    fn find_url(&self, business_key: &str) -> Url {
        with_query(
            &self.base,
            &[
                ("userID", business_key),
                ("_sort", "id"),
                ("_order", "desc"),
                ("_limit", "1"),
            ],
        )
    }

    fn search_url(&self, criteria: &SearchCriteria) -> Url {
        if criteria.all_mode {
            return self.base.clone();
        }
        self.find_url(criteria.business_key())
    }

    fn duplicate_check_request(&self, business_key: &str) -> BackendRequest {
        BackendRequest::get(self.find_url(business_key))
    }

    fn is_duplicate(&self, response: &BackendResponse) -> Result<bool> {
        if !response.is_success() {
            return Err(Error::backend(
                &response.url,
                response.status,
                "duplicate check failed",
            ));
        }

        Ok(!normalize_many(&response.json()?).is_empty())
    }

    fn create_body(&self, fields: &NewUser) -> Value {
        json!({
            "userID": fields.business_key,
            "userName": fields.display_name,
            "userPW": fields.secret.expose_secret(),
            "accountCreate": fields.created_at,
            "deleteFlg": 0,
        })
    }

    fn update_request(&self, handle: &RecordHandle, changes: &UserChanges) -> BackendRequest {
        let mut body = Map::new();
        body.insert("userID".to_string(), json!(changes.business_key));
        body.insert("userName".to_string(), json!(changes.display_name));
        if let Some(secret) = &changes.secret {
            body.insert("userPW".to_string(), json!(secret.expose_secret()));
        }

        BackendRequest::with_body(
            Method::PATCH,
            with_segments(&self.base, &[&handle.to_string()]),
            Value::Object(body),
        )
    }

    fn delete_url(&self, handle: &RecordHandle) -> Url {
        with_segments(&self.base, &[&handle.to_string()])
    }
}
