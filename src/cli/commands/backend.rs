use crate::backend::{BackendConfig, BackendKind};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_BACKEND: &str = "backend";
pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_BACKEND)
                .short('b')
                .long("backend")
                .help("Backend variant: tabular (json-server) or rest")
                .env("USERBRIDGE_BACKEND")
                .global(true)
                .default_value("tabular")
                .value_parser(|raw: &str| raw.parse::<BackendKind>().map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new(ARG_BASE_URL)
                .long("base-url")
                .help("Users collection URL, defaults to the backend's local address")
                .env("USERBRIDGE_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .env("USERBRIDGE_TIMEOUT")
                .global(true)
                .default_value("30")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

/// Backend configuration from validated matches.
/// # Errors
/// Returns an error if the base URL is invalid.
pub fn config(matches: &ArgMatches) -> Result<BackendConfig> {
    let kind = matches
        .get_one::<BackendKind>(ARG_BACKEND)
        .copied()
        .unwrap_or(BackendKind::Tabular);

    let base_url = matches.get_one::<String>(ARG_BASE_URL).map(String::as_str);

    let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(30);

    let config = BackendConfig::new(kind, base_url).context("invalid USERBRIDGE_BASE_URL")?;

    Ok(config.with_timeout(Duration::from_secs(timeout)))
}
