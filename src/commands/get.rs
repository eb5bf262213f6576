/// `get` command: show the permissions set on an object.
use std::io::Write;

use crate::api::PermissionsApi;
use crate::cli::OutputCtx;
use crate::cli::args::ObjectArgs;
use crate::cli::output::{StageTimer, write_permissions};
use crate::errors::CliError;

/// Run `dbperms get`.
///
/// # Errors
///
/// Returns `CliError` if the remote call fails or output cannot be written.
pub fn run(
    args: &ObjectArgs,
    api: &dyn PermissionsApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let object_type = args.object_type()?;
    let object_id = args.object_id()?;

    let _t_get = StageTimer::start("get_permissions");
    let perms = api.get_permissions(object_type, object_id)?;
    drop(_t_get);

    write_permissions(&perms, ctx, out)?;
    Ok(())
}
