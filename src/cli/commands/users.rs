use clap::{Arg, ArgAction, Command};

pub const CMD_FIND: &str = "find";
pub const CMD_SEARCH: &str = "search";
pub const CMD_CREATE: &str = "create";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";

pub const ARG_CURRENT_USER_ID: &str = "current-user-id";
pub const ARG_USER_ID: &str = "user-id";
pub const ARG_USER_NAME: &str = "user-name";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CREATED: &str = "created";
pub const ARG_HANDLE: &str = "handle";
pub const ARG_ALL: &str = "all";

fn current_user_id() -> Arg {
    Arg::new(ARG_CURRENT_USER_ID)
        .help("userID currently identifying the user")
        .value_name("USER_ID")
        .required(true)
}

fn handle() -> Arg {
    Arg::new(ARG_HANDLE)
        .long("handle")
        .help("Backend record id; resolved from the userID when omitted")
}

fn user_id() -> Arg {
    Arg::new(ARG_USER_ID)
        .short('u')
        .long("user-id")
        .help("userID (6-19 characters)")
}

fn user_name() -> Arg {
    Arg::new(ARG_USER_NAME)
        .short('n')
        .long("user-name")
        .help("Display name (2-29 characters)")
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long("password")
        .help("Password (4-50 characters)")
        .env("USERBRIDGE_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_FIND)
                .about("Show the user with the given userID")
                .arg(current_user_id()),
        )
        .subcommand(
            Command::new(CMD_SEARCH)
                .about("Search users by exact userID and name, or list all")
                .arg(
                    Arg::new(ARG_ALL)
                        .short('a')
                        .long("all")
                        .help("List every user")
                        .action(ArgAction::SetTrue),
                )
                .arg(user_id().required_unless_present(ARG_ALL))
                .arg(user_name().required_unless_present(ARG_ALL)),
        )
        .subcommand(
            Command::new(CMD_CREATE)
                .about("Register a new user")
                .arg(user_id().required(true))
                .arg(user_name().required(true))
                .arg(password().required(true))
                .arg(
                    Arg::new(ARG_CREATED)
                        .long("created")
                        .help("Account creation date, e.g. 2025-10-12")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Update (and optionally rename) a user")
                .arg(current_user_id())
                .arg(handle())
                .arg(user_id().help("New userID, defaults to the current one"))
                .arg(user_name().required(true))
                .arg(password().help("New password, keeps the current one when omitted")),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a user")
                .arg(current_user_id())
                .arg(handle()),
        )
}
