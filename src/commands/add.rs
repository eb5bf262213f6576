/// `add-user` / `add-group` commands: grant a permission level on an object.
use std::io::Write;

use crate::api::PermissionsApi;
use crate::cli::OutputCtx;
use crate::cli::args::{AddGroupArgs, AddUserArgs, ObjectArgs};
use crate::cli::output::{StageTimer, write_permissions};
use crate::errors::CliError;
use crate::types::AccessControlRequest;

/// Run `dbperms add-user`.
///
/// # Errors
///
/// Returns `CliError` if the remote call fails or output cannot be written.
pub fn run_user(
    args: &AddUserArgs,
    api: &dyn PermissionsApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let grant = AccessControlRequest::user(&args.user_name, &args.permission_level);
    grant_one(&args.object, grant, api, ctx, out)
}

/// Run `dbperms add-group`.
///
/// # Errors
///
/// Returns `CliError` if the remote call fails or output cannot be written.
pub fn run_group(
    args: &AddGroupArgs,
    api: &dyn PermissionsApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let grant = AccessControlRequest::group(&args.group_name, &args.permission_level);
    grant_one(&args.object, grant, api, ctx, out)
}

fn grant_one(
    object: &ObjectArgs,
    grant: AccessControlRequest,
    api: &dyn PermissionsApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let object_type = object.object_type()?;
    let object_id = object.object_id()?;
    tracing::info!(
        %object_type,
        object_id,
        level = %grant.permission_level,
        "adding permission"
    );

    let _t_update = StageTimer::start("update_permissions");
    let updated = api.update_permissions(object_type, object_id, &[grant])?;
    drop(_t_update);

    write_permissions(&updated, ctx, out)?;
    Ok(())
}
