//! Uniform user operations over the configured backend.
//!
//! Each operation is a short, strictly sequential exchange: resolve the
//! handle (when the caller lacks it) then mutate, or check for duplicates then
//! create. Nothing is cached between calls; every call starts from the backend.

pub mod resolver;
pub mod validation;

use self::resolver::IdentityResolver;
use crate::{
    backend::{BackendConfig, BackendKind, BackendRequest, Descriptor},
    error::{Error, Result},
    normalize::normalize_many,
    record::{CanonicalRecord, NewUser, RecordHandle, SearchCriteria, UserChanges},
    transport::HttpTransport,
};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Debug)]
pub struct UserAdapter {
    descriptor: Box<dyn Descriptor>,
    transport: HttpTransport,
}

impl UserAdapter {
    /// Adapter bound to the backend described by `config`.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self::with_descriptor(
            config.descriptor(),
            HttpTransport::new(config)?,
        ))
    }

    #[must_use]
    pub fn with_descriptor(descriptor: Box<dyn Descriptor>, transport: HttpTransport) -> Self {
        Self {
            descriptor,
            transport,
        }
    }

    #[must_use]
    pub fn kind(&self) -> BackendKind {
        self.descriptor.kind()
    }

    #[must_use]
    pub fn resolver(&self) -> IdentityResolver<'_> {
        IdentityResolver::new(self.descriptor.as_ref(), &self.transport)
    }

    /// Zero or one user for `business_key`.
    ///
    /// Backend failures, empty and unreadable answers all come back as `None`,
    /// so a missing user and an unreachable backend look the same here.
    #[instrument(skip(self))]
    pub async fn find_one(&self, business_key: &str) -> Option<CanonicalRecord> {
        let business_key = business_key.trim();
        if business_key.is_empty() {
            return None;
        }

        match self.resolver().lookup(business_key).await {
            Ok(record) => record,
            Err(e) => {
                warn!("find failed, reporting not found: {}", e);
                None
            }
        }
    }

    /// Users matching `criteria`, or every user in all-mode.
    /// # Errors
    /// Returns [`Error::Validation`] for out-of-bounds criteria (no request is sent),
    /// [`Error::Backend`] for unexpected statuses and [`Error::Transport`] for
    /// network or JSON failures.
    #[instrument(skip(self))]
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<CanonicalRecord>> {
        validation::search_criteria(criteria)?;

        let request = BackendRequest::get(self.descriptor.search_url(criteria));
        let response = self.transport.send(&request).await?;

        if !response.is_success() {
            if response.status == StatusCode::NOT_FOUND
                && !criteria.all_mode
                && self.descriptor.search_not_found_is_empty()
            {
                return Ok(Vec::new());
            }

            warn!("search answered {}", response.status);

            return Err(Error::backend(
                &response.url,
                response.status,
                response
                    .error_message()
                    .unwrap_or_else(|| "search failed".to_string()),
            ));
        }

        let mut records = normalize_many(&response.json()?);

        // Query filters are a hint only; some backends list everything.
        if !criteria.all_mode {
            let business_key = criteria.business_key();
            let display_name = criteria.display_name();
            records.retain(|record| {
                record.business_key == business_key && record.display_name == display_name
            });
        }

        Ok(records)
    }

    /// Register a user after validating the fields and checking the key is free.
    /// # Errors
    /// Returns [`Error::Validation`] before any request, [`Error::Conflict`] when the
    /// key is taken (found by the check or reported by the backend), [`Error::Backend`]
    /// when the check or the create call fails with another status.
    #[instrument(skip(self, new_user), fields(user_id = %new_user.business_key))]
    pub async fn create(&self, new_user: &NewUser) -> Result<CanonicalRecord> {
        let fields = validation::new_user(new_user)?;

        let check = self
            .descriptor
            .duplicate_check_request(&fields.business_key);
        let response = self.transport.send(&check).await?;
        if self.descriptor.is_duplicate(&response)? {
            return Err(Error::duplicate_user(&fields.business_key));
        }

        let response = self
            .transport
            .send(&self.descriptor.create_request(&fields))
            .await?;

        if response.status == StatusCode::CONFLICT {
            return Err(Error::duplicate_user(&fields.business_key));
        }

        if !response.is_success() {
            return Err(Error::backend(
                &response.url,
                response.status,
                "failed to create user",
            ));
        }

        let record = normalize_many(&response.json_or_null())
            .into_iter()
            .next()
            .filter(|record| !record.business_key.is_empty())
            .unwrap_or_else(|| fields.to_record());

        info!("created user {}", record.business_key);

        Ok(record)
    }

    /// Apply `changes` to the user currently known as `current_business_key`.
    ///
    /// Without a `handle` the record is resolved by the current key first, which
    /// may differ from `changes.business_key` when renaming.
    /// # Errors
    /// Returns [`Error::Validation`] for empty fields, [`Error::NotFound`] when the
    /// current key resolves to nothing, [`Error::Conflict`] when the new key is taken
    /// and [`Error::Backend`] for other failures.
    #[instrument(skip(self, changes), fields(new_user_id = %changes.business_key))]
    pub async fn update(
        &self,
        current_business_key: &str,
        handle: Option<RecordHandle>,
        changes: &UserChanges,
    ) -> Result<()> {
        let changes = validation::user_changes(changes)?;
        let handle = self.handle_for(current_business_key, handle).await?;

        let request = self.descriptor.update_request(&handle, &changes);
        let response = self.transport.send(&request).await?;

        if response.status == StatusCode::CONFLICT {
            return Err(Error::duplicate_user(&changes.business_key));
        }

        if !response.is_success() {
            return Err(Error::backend(
                &response.url,
                response.status,
                "failed to update user",
            ));
        }

        info!("updated user {} (handle {})", changes.business_key, handle);

        Ok(())
    }

    /// Remove the user known as `current_business_key`.
    ///
    /// Whether this is a hard delete or a flag flip is up to the backend.
    /// # Errors
    /// Returns [`Error::NotFound`] when the key resolves to nothing (no delete is sent)
    /// and [`Error::Backend`] for any non-success answer.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        current_business_key: &str,
        handle: Option<RecordHandle>,
    ) -> Result<()> {
        let handle = self.handle_for(current_business_key, handle).await?;

        let url = self.descriptor.delete_url(&handle);
        let response = self.transport.send(&BackendRequest::delete(url)).await?;

        if !response.is_success() {
            return Err(Error::backend(
                &response.url,
                response.status,
                "failed to delete user",
            ));
        }

        info!("deleted user {} (handle {})", current_business_key, handle);

        Ok(())
    }

    async fn handle_for(
        &self,
        current_business_key: &str,
        handle: Option<RecordHandle>,
    ) -> Result<RecordHandle> {
        let current_business_key = current_business_key.trim();
        let handle = handle.filter(|handle| !handle.is_unset());
        if handle.is_none() && current_business_key.is_empty() {
            return Err(Error::validation("current userID is required"));
        }

        self.resolver()
            .handle_or_resolve(handle, current_business_key)
            .await
    }
}

/// Search result in the `{records, error}` shape callers render directly.
#[derive(Debug, Default, Serialize)]
pub struct SearchOutcome {
    pub records: Vec<CanonicalRecord>,
    pub error: Option<String>,
}

impl From<Result<Vec<CanonicalRecord>>> for SearchOutcome {
    fn from(result: Result<Vec<CanonicalRecord>>) -> Self {
        match result {
            Ok(records) => Self {
                records,
                error: None,
            },
            Err(e) => Self {
                records: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}
