//! Identity resolution: business key to backend record handle.

use crate::{
    backend::{BackendRequest, Descriptor},
    error::{Error, Result},
    normalize::normalize_many,
    record::{CanonicalRecord, RecordHandle},
    transport::HttpTransport,
};
use tracing::{debug, instrument, warn};

/// Looks a user up by business key through the active descriptor's find query.
#[derive(Debug, Clone, Copy)]
pub struct IdentityResolver<'a> {
    descriptor: &'a dyn Descriptor,
    transport: &'a HttpTransport,
}

impl<'a> IdentityResolver<'a> {
    #[must_use]
    pub fn new(descriptor: &'a dyn Descriptor, transport: &'a HttpTransport) -> Self {
        Self {
            descriptor,
            transport,
        }
    }

    /// First record whose business key equals `business_key`.
    ///
    /// Rows for other keys are skipped, since not every backend honours the
    /// query filter. A non-success status, an empty body and a malformed body
    /// all read as "no record".
    /// # Errors
    /// Returns [`Error::Transport`] if the request itself fails.
    #[instrument(skip(self))]
    pub async fn lookup(&self, business_key: &str) -> Result<Option<CanonicalRecord>> {
        let request = BackendRequest::get(self.descriptor.find_url(business_key));
        let response = self.transport.send(&request).await?;

        if !response.is_success() {
            warn!("lookup answered {}, treating as not found", response.status);
            return Ok(None);
        }

        let record = normalize_many(&response.json_or_null())
            .into_iter()
            .find(|record| record.business_key == business_key);

        debug!("lookup matched: {}", record.is_some());

        Ok(record)
    }

    /// Handle of the newest record for `business_key`.
    /// # Errors
    /// Returns [`Error::NotFound`] if nothing matches, [`Error::Transport`] if the request fails.
    pub async fn resolve_handle(&self, business_key: &str) -> Result<RecordHandle> {
        self.lookup(business_key)
            .await?
            .map(|record| record.handle)
            .ok_or_else(|| Error::NotFound(business_key.to_string()))
    }

    /// `handle` unless it is missing or unset (`0`), otherwise a fresh resolution.
    /// # Errors
    /// Same as [`Self::resolve_handle`].
    pub async fn handle_or_resolve(
        &self,
        handle: Option<RecordHandle>,
        business_key: &str,
    ) -> Result<RecordHandle> {
        match handle.filter(|handle| !handle.is_unset()) {
            Some(handle) => Ok(handle),
            None => self.resolve_handle(business_key).await,
        }
    }
}
