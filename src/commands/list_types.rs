/// `list-types` command: list the object types permissions can be managed on.
use std::io::Write;

use crate::cli::OutputCtx;
use crate::cli::output::write_object_types;
use crate::errors::CliError;
use crate::types::ObjectType;

/// Run `dbperms list-types`.
///
/// # Errors
///
/// Returns `CliError::Output` if output cannot be written.
pub fn run(ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CliError> {
    write_object_types(&ObjectType::ALL, ctx, out)?;
    Ok(())
}
