//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to one action per adapter operation, with the
//! backend configuration resolved once up front.

use crate::cli::{
    actions::{
        Action,
        users::{CreateArgs, DeleteArgs, FindArgs, SearchArgs, UpdateArgs},
    },
    commands::{backend, users},
    globals::GlobalArgs,
};
use crate::record::{NewUser, RecordHandle, SearchCriteria, UserChanges};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).with_context(|| format!("missing required argument: --{id}"))
}

/// `--handle`, with `0` meaning "resolve from the userID".
fn handle(matches: &ArgMatches) -> Result<Option<RecordHandle>> {
    let handle = string(matches, users::ARG_HANDLE)
        .map(|raw| raw.parse::<RecordHandle>().map_err(|e| anyhow!(e)))
        .transpose()?;

    Ok(handle.filter(|handle| !handle.is_unset()))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the backend configuration is invalid or arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::new(backend::config(matches)?);

    match matches.subcommand() {
        Some((users::CMD_FIND, sub_m)) => Ok(Action::Find(FindArgs {
            globals,
            user_id: required(sub_m, users::ARG_CURRENT_USER_ID)?,
        })),
        Some((users::CMD_SEARCH, sub_m)) => {
            let criteria = if sub_m.get_flag(users::ARG_ALL) {
                SearchCriteria::all()
            } else {
                SearchCriteria {
                    all_mode: false,
                    business_key: string(sub_m, users::ARG_USER_ID),
                    display_name: string(sub_m, users::ARG_USER_NAME),
                }
            };
            Ok(Action::Search(SearchArgs { globals, criteria }))
        }
        Some((users::CMD_CREATE, sub_m)) => Ok(Action::Create(CreateArgs {
            globals,
            user: NewUser::new(
                required(sub_m, users::ARG_USER_ID)?,
                required(sub_m, users::ARG_USER_NAME)?,
                required(sub_m, users::ARG_PASSWORD)?,
                required(sub_m, users::ARG_CREATED)?,
            ),
        })),
        Some((users::CMD_UPDATE, sub_m)) => {
            let current_user_id = required(sub_m, users::ARG_CURRENT_USER_ID)?;
            let new_user_id =
                string(sub_m, users::ARG_USER_ID).unwrap_or_else(|| current_user_id.clone());
            let mut changes = UserChanges::new(new_user_id, required(sub_m, users::ARG_USER_NAME)?);
            if let Some(password) = string(sub_m, users::ARG_PASSWORD) {
                changes = changes.with_secret(password);
            }
            Ok(Action::Update(UpdateArgs {
                globals,
                current_user_id,
                handle: handle(sub_m)?,
                changes,
            }))
        }
        Some((users::CMD_DELETE, sub_m)) => Ok(Action::Delete(DeleteArgs {
            globals,
            current_user_id: required(sub_m, users::ARG_CURRENT_USER_ID)?,
            handle: handle(sub_m)?,
        })),
        _ => Err(anyhow!("missing subcommand")),
    }
}
