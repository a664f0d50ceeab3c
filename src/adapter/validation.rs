//! Input checks run before any request is sent.

use crate::{
    error::{Error, Result},
    record::{NewUser, SearchCriteria, UserChanges},
};
use secrecy::{ExposeSecret, SecretString};
use std::ops::RangeInclusive;

pub const BUSINESS_KEY_LEN: RangeInclusive<usize> = 6..=19;
pub const DISPLAY_NAME_LEN: RangeInclusive<usize> = 2..=29;
pub const SECRET_LEN: RangeInclusive<usize> = 4..=50;

fn required(value: &str, label: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{label} is required")));
    }
    Ok(())
}

fn bounded(value: &str, label: &str, bounds: &RangeInclusive<usize>) -> Result<()> {
    if !bounds.contains(&value.chars().count()) {
        return Err(Error::validation(format!(
            "{label} must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )));
    }
    Ok(())
}

/// Trimmed copy of `fields`: all four present, then every length in bounds.
/// # Errors
/// Returns [`Error::Validation`] naming the first offending field.
pub fn new_user(fields: &NewUser) -> Result<NewUser> {
    let business_key = fields.business_key.trim();
    let display_name = fields.display_name.trim();
    let secret = fields.secret.expose_secret().trim();
    let created_at = fields.created_at.trim();

    required(business_key, "userID")?;
    required(display_name, "userName")?;
    required(secret, "password")?;
    required(created_at, "accountCreate")?;

    bounded(business_key, "userID", &BUSINESS_KEY_LEN)?;
    bounded(display_name, "userName", &DISPLAY_NAME_LEN)?;
    bounded(secret, "password", &SECRET_LEN)?;

    Ok(NewUser {
        business_key: business_key.to_string(),
        display_name: display_name.to_string(),
        secret: SecretString::from(secret.to_string()),
        created_at: created_at.to_string(),
    })
}

/// Exact searches need both keys within bounds; listing everything needs nothing.
/// # Errors
/// Returns [`Error::Validation`] naming the first offending field.
pub fn search_criteria(criteria: &SearchCriteria) -> Result<()> {
    if criteria.all_mode {
        return Ok(());
    }

    required(criteria.business_key(), "userID")?;
    required(criteria.display_name(), "userName")?;
    bounded(criteria.business_key(), "userID", &BUSINESS_KEY_LEN)?;
    bounded(criteria.display_name(), "userName", &DISPLAY_NAME_LEN)?;

    Ok(())
}

/// Trimmed copy of `changes`. Only presence is checked on update; an empty
/// secret means "keep the current one".
/// # Errors
/// Returns [`Error::Validation`] if the new userID or userName is empty.
pub fn user_changes(changes: &UserChanges) -> Result<UserChanges> {
    let business_key = changes.business_key.trim();
    let display_name = changes.display_name.trim();

    required(business_key, "userID")?;
    required(display_name, "userName")?;

    let secret = changes
        .secret
        .as_ref()
        .map(|secret| secret.expose_secret().trim())
        .filter(|secret| !secret.is_empty())
        .map(|secret| SecretString::from(secret.to_string()));

    Ok(UserChanges {
        business_key: business_key.to_string(),
        display_name: display_name.to_string(),
        secret,
    })
}
