use crate::{adapter::UserAdapter, backend::BackendConfig};
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub backend: BackendConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(backend: BackendConfig) -> Self {
        Self { backend }
    }

    /// Adapter for the configured backend.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn adapter(&self) -> Result<UserAdapter> {
        Ok(UserAdapter::new(&self.backend)?)
    }
}
