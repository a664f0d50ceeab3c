//! Field normalizer.
//!
//! Backend answers are not schema-validated, so both functions are total: any
//! JSON value maps to records, with empty strings and `0` standing in for
//! whatever is missing or mistyped.

use crate::record::{CanonicalRecord, RecordHandle};
use secrecy::SecretString;
use serde_json::Value;

const HANDLE_FIELD: &str = "id";
const BUSINESS_KEY_FIELDS: [&str; 2] = ["userID", "userId"];
const DISPLAY_NAME_FIELDS: [&str; 1] = ["userName"];
const SECRET_FIELDS: [&str; 2] = ["userPW", "password"];
const CREATED_AT_FIELDS: [&str; 2] = ["accountCreate", "createdAt"];
const DELETED_FLAG_FIELD: &str = "deleteFlg";

/// Normalize one raw backend object.
#[must_use]
pub fn normalize_one(raw: &Value) -> CanonicalRecord {
    CanonicalRecord {
        handle: handle(raw.get(HANDLE_FIELD)),
        business_key: first_string(raw, &BUSINESS_KEY_FIELDS),
        display_name: first_string(raw, &DISPLAY_NAME_FIELDS),
        secret: SecretString::from(first_string(raw, &SECRET_FIELDS)),
        created_at: first_string(raw, &CREATED_AT_FIELDS),
        deleted_flag: raw.get(DELETED_FLAG_FIELD).and_then(Value::as_i64),
    }
}

/// Normalize a backend answer that may be a list, a single object or nothing.
#[must_use]
pub fn normalize_many(raw: &Value) -> Vec<CanonicalRecord> {
    match raw {
        Value::Array(items) => items.iter().map(normalize_one).collect(),
        Value::Object(_) => vec![normalize_one(raw)],
        _ => Vec::new(),
    }
}

fn first_string(raw: &Value, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| raw.get(*name).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn handle(raw: Option<&Value>) -> RecordHandle {
    match raw {
        Some(Value::Number(id)) => id.as_i64().map(RecordHandle::Number).unwrap_or_default(),
        Some(Value::String(id)) if !id.is_empty() => RecordHandle::Text(id.clone()),
        _ => RecordHandle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde_json::json;

    #[test]
    fn business_key_accepts_either_spelling() {
        assert_eq!(
            normalize_one(&json!({"userID": "alice01"})).business_key,
            "alice01"
        );
        assert_eq!(
            normalize_one(&json!({"userId": "alice01"})).business_key,
            "alice01"
        );
    }

    #[test]
    fn first_spelling_wins_when_both_present() {
        let record = normalize_one(&json!({
            "userID": "primary",
            "userId": "secondary",
            "userPW": "pw-one",
            "password": "pw-two",
            "accountCreate": "2025-10-12",
            "createdAt": "2024-01-01",
        }));
        assert_eq!(record.business_key, "primary");
        assert_eq!(record.secret.expose_secret(), "pw-one");
        assert_eq!(record.created_at, "2025-10-12");
    }

    #[test]
    fn empty_primary_falls_through_to_alternate() {
        let record = normalize_one(&json!({"userID": "", "userId": "bob99"}));
        assert_eq!(record.business_key, "bob99");
    }

    #[test]
    fn rest_shape_normalizes() {
        let record = normalize_one(&json!({
            "id": 42,
            "userName": "Bob",
            "userID": "bob99",
            "password": "hunter2",
            "accountCreate": "2025-10-12",
        }));
        assert_eq!(record.handle, RecordHandle::Number(42));
        assert_eq!(record.display_name, "Bob");
        assert_eq!(record.secret.expose_secret(), "hunter2");
        assert_eq!(record.deleted_flag, None);
    }

    #[test]
    fn tabular_shape_keeps_string_handle_and_flag() {
        let record = normalize_one(&json!({
            "id": "7f3a",
            "userID": "alice01",
            "userName": "Alice",
            "userPW": "pass",
            "accountCreate": "2025-10-12",
            "deleteFlg": 0,
        }));
        assert_eq!(record.handle, RecordHandle::Text("7f3a".to_string()));
        assert_eq!(record.deleted_flag, Some(0));
    }

    #[test]
    fn malformed_input_yields_defaults() {
        let record = normalize_one(&json!({
            "id": "",
            "userID": 12,
            "userName": null,
            "deleteFlg": "yes",
        }));
        assert_eq!(record, CanonicalRecord::default());

        assert_eq!(normalize_one(&json!("not an object")), CanonicalRecord::default());
        assert_eq!(normalize_one(&json!({"id": 1.5})).handle, RecordHandle::Number(0));
    }

    #[test]
    fn many_handles_null_object_and_array() {
        assert!(normalize_many(&Value::Null).is_empty());
        assert!(normalize_many(&json!("text")).is_empty());

        let a = json!({"id": 1, "userID": "alice01"});
        let b = json!({"id": 2, "userId": "bob99"});

        assert_eq!(normalize_many(&a), vec![normalize_one(&a)]);
        assert_eq!(
            normalize_many(&json!([a.clone(), b.clone()])),
            vec![normalize_one(&a), normalize_one(&b)]
        );
        assert!(normalize_many(&json!([])).is_empty());
    }
}
