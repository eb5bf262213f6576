/// `list-permissions` command: list the permission levels valid for an object type.
use std::io::Write;

use crate::api::PermissionsApi;
use crate::cli::OutputCtx;
use crate::cli::args::LevelsArgs;
use crate::cli::output::{StageTimer, write_permission_levels};
use crate::errors::CliError;

/// Run `dbperms list-permissions`.
///
/// # Errors
///
/// Returns `CliError` if the remote call fails or output cannot be written.
pub fn run(
    args: &LevelsArgs,
    api: &dyn PermissionsApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let object_type = args.object_type()?;

    let _t_levels = StageTimer::start("get_possible_permissions");
    let levels = api.get_possible_permissions(object_type, args.object_id())?;
    drop(_t_levels);

    write_permission_levels(&levels, ctx, out)?;
    Ok(())
}
