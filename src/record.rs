//! Canonical user record and the field sets callers submit.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Backend-assigned identity used to address a record on update and delete.
///
/// The REST service hands out numeric ids; the tabular store may use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordHandle {
    Number(i64),
    Text(String),
}

impl RecordHandle {
    /// `0` or an empty id, which backends never assign.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Number(id) => *id == 0,
            Self::Text(id) => id.is_empty(),
        }
    }
}

impl Default for RecordHandle {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for RecordHandle {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("record handle must not be empty".to_string());
        }
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number))
    }
}

impl From<i64> for RecordHandle {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

/// Normalized user as every caller sees it, whichever backend answered.
///
/// The secret is kept only so it can be written back; it is never serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub handle: RecordHandle,
    pub business_key: String,
    pub display_name: String,
    #[serde(skip)]
    pub secret: SecretString,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_flag: Option<i64>,
}

impl PartialEq for CanonicalRecord {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
            && self.business_key == other.business_key
            && self.display_name == other.display_name
            && self.secret.expose_secret() == other.secret.expose_secret()
            && self.created_at == other.created_at
            && self.deleted_flag == other.deleted_flag
    }
}

/// Fields required to register a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub business_key: String,
    pub display_name: String,
    pub secret: SecretString,
    pub created_at: String,
}

impl NewUser {
    pub fn new(
        business_key: impl Into<String>,
        display_name: impl Into<String>,
        secret: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            business_key: business_key.into(),
            display_name: display_name.into(),
            secret: SecretString::from(secret.into()),
            created_at: created_at.into(),
        }
    }

    /// Record for a freshly created user whose backend answer carried no body.
    #[must_use]
    pub fn to_record(&self) -> CanonicalRecord {
        CanonicalRecord {
            handle: RecordHandle::default(),
            business_key: self.business_key.clone(),
            display_name: self.display_name.clone(),
            secret: self.secret.clone(),
            created_at: self.created_at.clone(),
            deleted_flag: None,
        }
    }
}

/// New values for an existing user. `business_key` may differ from the key used
/// to locate the record, which renames the user.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub business_key: String,
    pub display_name: String,
    pub secret: Option<SecretString>,
}

impl UserChanges {
    pub fn new(business_key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            business_key: business_key.into(),
            display_name: display_name.into(),
            secret: None,
        }
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(SecretString::from(secret.into()));
        self
    }
}

/// Search input. With `all_mode` set the other fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub all_mode: bool,
    pub business_key: Option<String>,
    pub display_name: Option<String>,
}

impl SearchCriteria {
    #[must_use]
    pub fn all() -> Self {
        Self {
            all_mode: true,
            ..Self::default()
        }
    }

    pub fn exact(business_key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            all_mode: false,
            business_key: Some(business_key.into()),
            display_name: Some(display_name.into()),
        }
    }

    /// Trimmed business key, empty when absent.
    #[must_use]
    pub fn business_key(&self) -> &str {
        self.business_key.as_deref().map_or("", str::trim)
    }

    /// Trimmed display name, empty when absent.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().map_or("", str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handle_parses_numbers_and_text() {
        assert_eq!("42".parse::<RecordHandle>(), Ok(RecordHandle::Number(42)));
        assert_eq!(
            " a1b2 ".parse::<RecordHandle>(),
            Ok(RecordHandle::Text("a1b2".to_string()))
        );
        assert!("  ".parse::<RecordHandle>().is_err());
    }

    #[test]
    fn zero_and_empty_handles_are_unset() {
        assert!(RecordHandle::default().is_unset());
        assert!(RecordHandle::Text(String::new()).is_unset());
        assert!(!RecordHandle::Number(42).is_unset());
        assert!(!RecordHandle::Text("a1b2".to_string()).is_unset());
    }

    #[test]
    fn handle_displays_raw_value() {
        assert_eq!(RecordHandle::Number(7).to_string(), "7");
        assert_eq!(RecordHandle::Text("x9".to_string()).to_string(), "x9");
        assert_eq!(RecordHandle::default(), RecordHandle::Number(0));
    }

    #[test]
    fn record_serializes_without_secret() {
        let record = NewUser::new("alice01", "Alice", "s3cret", "2025-10-12").to_record();
        let value = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(
            value,
            json!({
                "handle": 0,
                "businessKey": "alice01",
                "displayName": "Alice",
                "createdAt": "2025-10-12",
            })
        );
    }

    #[test]
    fn record_debug_redacts_secret() {
        let record = NewUser::new("alice01", "Alice", "s3cret", "2025-10-12").to_record();
        assert!(!format!("{record:?}").contains("s3cret"));
    }

    #[test]
    fn criteria_accessors_trim() {
        let criteria = SearchCriteria::exact("  alice01 ", " Alice ");
        assert_eq!(criteria.business_key(), "alice01");
        assert_eq!(criteria.display_name(), "Alice");
        assert_eq!(SearchCriteria::all().business_key(), "");
    }
}
