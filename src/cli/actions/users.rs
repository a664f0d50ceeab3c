//! User actions: run one adapter operation and print its JSON result on stdout.
//!
//! Failures are returned as `{"errorCode": .., "message": ..}` so the binary's
//! error output carries the same code a route layer would answer with.

use crate::{
    adapter::SearchOutcome,
    cli::globals::GlobalArgs,
    error::Error,
    record::{NewUser, RecordHandle, SearchCriteria, UserChanges},
};
use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::json;

#[derive(Debug)]
pub struct FindArgs {
    pub globals: GlobalArgs,
    pub user_id: String,
}

#[derive(Debug)]
pub struct SearchArgs {
    pub globals: GlobalArgs,
    pub criteria: SearchCriteria,
}

#[derive(Debug)]
pub struct CreateArgs {
    pub globals: GlobalArgs,
    pub user: NewUser,
}

#[derive(Debug)]
pub struct UpdateArgs {
    pub globals: GlobalArgs,
    pub current_user_id: String,
    pub handle: Option<RecordHandle>,
    pub changes: UserChanges,
}

#[derive(Debug)]
pub struct DeleteArgs {
    pub globals: GlobalArgs,
    pub current_user_id: String,
    pub handle: Option<RecordHandle>,
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn failure(err: &Error) -> anyhow::Error {
    anyhow!(json!({
        "errorCode": err.status_code(),
        "message": err.to_string(),
    }))
}

/// # Errors
/// Returns an error if the adapter cannot be built.
pub async fn find(args: FindArgs) -> Result<()> {
    let adapter = args.globals.adapter()?;
    let record = adapter.find_one(&args.user_id).await;
    print(&record)
}

/// # Errors
/// Returns an error if the search fails; the outcome is printed either way.
pub async fn search(args: SearchArgs) -> Result<()> {
    let adapter = args.globals.adapter()?;
    let result = adapter.search(&args.criteria).await;
    let code = result.as_ref().err().map(Error::status_code);

    let outcome = SearchOutcome::from(result);
    print(&outcome)?;

    match (code, outcome.error) {
        (Some(code), Some(message)) => Err(anyhow!(json!({
            "errorCode": code,
            "message": message,
        }))),
        _ => Ok(()),
    }
}

/// # Errors
/// Returns an error carrying the adapter's error code if the user cannot be created.
pub async fn create(args: CreateArgs) -> Result<()> {
    let adapter = args.globals.adapter()?;
    let record = adapter.create(&args.user).await.map_err(|e| failure(&e))?;
    print(&record)
}

/// # Errors
/// Returns an error carrying the adapter's error code if the user cannot be updated.
pub async fn update(args: UpdateArgs) -> Result<()> {
    let adapter = args.globals.adapter()?;
    adapter
        .update(&args.current_user_id, args.handle, &args.changes)
        .await
        .map_err(|e| failure(&e))?;
    print(&json!({ "ok": true }))
}

/// # Errors
/// Returns an error carrying the adapter's error code if the user cannot be deleted.
pub async fn delete(args: DeleteArgs) -> Result<()> {
    let adapter = args.globals.adapter()?;
    adapter
        .delete(&args.current_user_id, args.handle)
        .await
        .map_err(|e| failure(&e))?;
    print(&json!({ "ok": true }))
}
