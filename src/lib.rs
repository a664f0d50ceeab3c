//! # Userbridge (uniform user management over two backends)
//!
//! `userbridge` exposes five user-management operations (find-one, search,
//! create, update, delete) while persistence lives in one of two remote
//! backends that disagree on URL shape, field names and duplicate detection.
//!
//! ## Backends
//!
//! - **Tabular Store** (json-server style): filtered list queries sorted by
//!   `id` descending, `PATCH` for updates, `userPW` on the wire and a
//!   `deleteFlg` soft-delete marker.
//! - **REST Service**: `?userID=` queries, a `/by-userid/{userID}` existence
//!   endpoint (200 = exists, 404 = free), `PUT` for updates and `password` on
//!   the wire.
//!
//! Every wire difference lives in a [`backend::Descriptor`] implementation. The
//! active variant is chosen once through [`backend::BackendConfig`] and handed
//! to [`adapter::UserAdapter::new`].
//!
//! ## Identity
//!
//! Callers address users by business key (`userID`). Update and delete need the
//! backend's record handle (`id`); when the caller does not hold it, the
//! [`adapter::resolver::IdentityResolver`] looks it up first.
//!
//! Responses are never trusted to follow a schema: [`normalize`] turns any JSON
//! into [`record::CanonicalRecord`] values without failing.

pub mod adapter;
pub mod backend;
pub mod cli;
pub mod error;
pub mod normalize;
pub mod record;
pub mod transport;

pub use self::error::Error;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
