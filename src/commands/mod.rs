/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod add;
pub mod get;
pub mod list_permissions;
pub mod list_types;

#[cfg(test)]
pub(crate) mod testing;

use std::io::Write;

use crate::api::{HttpPermissionsClient, PermissionsApi};
use crate::cli::OutputCtx;
use crate::cli::output::StageTimer;
use crate::cli::args::Command;
use crate::config::{Config, Overrides};
use crate::errors::CliError;

/// Dispatch a parsed `Command` to its handler.
///
/// `connect` is only called for commands that talk to the service.
///
/// # Errors
///
/// Returns `CliError` on any command failure.
pub fn dispatch<A, F>(
    command: &Command,
    connect: F,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    A: PermissionsApi,
    F: FnOnce() -> Result<A, CliError>,
{
    match command {
        Command::ListTypes => list_types::run(ctx, out),
        Command::Get(args) => get::run(args, &connected(connect)?, ctx, out),
        Command::ListPermissions(args) => {
            list_permissions::run(args, &connected(connect)?, ctx, out)
        }
        Command::AddUser(args) => add::run_user(args, &connected(connect)?, ctx, out),
        Command::AddGroup(args) => add::run_group(args, &connected(connect)?, ctx, out),
    }
}

fn connected<A, F>(connect: F) -> Result<A, CliError>
where
    F: FnOnce() -> Result<A, CliError>,
{
    let _t_connect = StageTimer::start("connect");
    connect()
}

/// Resolve configuration and build the HTTP client.
///
/// # Errors
///
/// Returns `CliError::Config` for missing or unreadable settings and
/// `CliError::Api` if the host is not a usable URL.
pub fn connect(overrides: &Overrides) -> Result<HttpPermissionsClient, CliError> {
    let config = Config::load(overrides)?;
    let client = HttpPermissionsClient::new(&config.host, &config.token, config.timeout)?;
    tracing::debug!(?client, profile = %config.profile, "connected");
    Ok(client)
}
