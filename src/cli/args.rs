/// CLI argument definitions via clap derive.
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::errors::CliError;
use crate::types::ObjectType;

/// dbperms: inspect and manage permissions on workspace objects.
#[derive(Debug, Parser)]
#[command(
    name = "dbperms",
    about = "Inspect and manage access-control permissions on workspace objects",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format. Auto-detects: table when TTY, json when piped.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Config profile to use (default: $DATABRICKS_CONFIG_PROFILE, then DEFAULT).
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Workspace URL, overriding $DATABRICKS_HOST and the config file.
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Log requests and timings to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// Pretty-printed JSON, exactly as returned by the service.
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Aligned table with headers (human-readable).
    Table,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the permissions set on an object.
    Get(ObjectArgs),
    /// List the permission levels valid for an object type.
    #[command(visible_alias = "list-permissions-types")]
    ListPermissions(LevelsArgs),
    /// List the object types permissions can be managed on.
    ListTypes,
    /// Grant a permission level on an object to a user.
    AddUser(AddUserArgs),
    /// Grant a permission level on an object to a group.
    AddGroup(AddGroupArgs),
}

/// An object, given either as `--object-type T --object-id ID` or as `T ID`.
#[derive(Debug, Args)]
pub struct ObjectArgs {
    /// Object type (positional form of --object-type).
    #[arg(
        value_name = "OBJECT_TYPE",
        value_parser = positional_object_type,
        required_unless_present = "object_type_flag"
    )]
    pub object_type_pos: Option<ObjectType>,

    /// Object identifier (positional form of --object-id).
    #[arg(value_name = "OBJECT_ID", required_unless_present = "object_id_flag")]
    pub object_id_pos: Option<String>,

    /// Object type.
    #[arg(
        long = "object-type",
        value_name = "OBJECT_TYPE",
        conflicts_with = "object_type_pos"
    )]
    pub object_type_flag: Option<ObjectType>,

    /// Object identifier, e.g. a cluster ID or a job ID.
    #[arg(long = "object-id", value_name = "OBJECT_ID", conflicts_with = "object_id_pos")]
    pub object_id_flag: Option<String>,
}

impl ObjectArgs {
    /// The object type from whichever form was given.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Usage` if neither form was given.
    pub fn object_type(&self) -> Result<ObjectType, CliError> {
        self.object_type_flag
            .or(self.object_type_pos)
            .ok_or_else(|| CliError::Usage("an object type is required".to_owned()))
    }

    /// The object id from whichever form was given.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Usage` if neither form was given.
    pub fn object_id(&self) -> Result<&str, CliError> {
        self.object_id_flag
            .as_deref()
            .or(self.object_id_pos.as_deref())
            .ok_or_else(|| CliError::Usage("an object id is required".to_owned()))
    }
}

/// Parse the leading positional as an object type.
///
/// With `--object-type` given, an id passed positionally lands here, so the
/// error points at `--object-id`.
fn positional_object_type(value: &str) -> Result<ObjectType, String> {
    ObjectType::from_str(value, false).map_err(|_| {
        format!(
            "not an object type (expected one of: {}); \
             when --object-type is given, pass the id with --object-id",
            ObjectType::ALL.map(ObjectType::as_path).join(", ")
        )
    })
}

/// Arguments for `dbperms list-permissions`: the object id is optional.
#[derive(Debug, Args)]
pub struct LevelsArgs {
    /// Object type (positional form of --object-type).
    #[arg(
        value_name = "OBJECT_TYPE",
        value_parser = positional_object_type,
        required_unless_present = "object_type_flag"
    )]
    pub object_type_pos: Option<ObjectType>,

    /// Object identifier (positional form of --object-id).
    #[arg(value_name = "OBJECT_ID")]
    pub object_id_pos: Option<String>,

    /// Object type.
    #[arg(
        long = "object-type",
        value_name = "OBJECT_TYPE",
        conflicts_with = "object_type_pos"
    )]
    pub object_type_flag: Option<ObjectType>,

    /// Object identifier, if levels depend on the specific object.
    #[arg(long = "object-id", value_name = "OBJECT_ID", conflicts_with = "object_id_pos")]
    pub object_id_flag: Option<String>,
}

impl LevelsArgs {
    /// The object type from whichever form was given.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Usage` if neither form was given.
    pub fn object_type(&self) -> Result<ObjectType, CliError> {
        self.object_type_flag
            .or(self.object_type_pos)
            .ok_or_else(|| CliError::Usage("an object type is required".to_owned()))
    }

    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        self.object_id_flag
            .as_deref()
            .or(self.object_id_pos.as_deref())
    }
}

/// Arguments for `dbperms add-user`.
#[derive(Debug, Args)]
pub struct AddUserArgs {
    #[command(flatten)]
    pub object: ObjectArgs,

    /// User name (usually an email address).
    #[arg(long, value_name = "USER")]
    pub user_name: String,

    /// Permission level to grant, e.g. CAN_MANAGE.
    #[arg(long, value_name = "LEVEL")]
    pub permission_level: String,
}

/// Arguments for `dbperms add-group`.
#[derive(Debug, Args)]
pub struct AddGroupArgs {
    #[command(flatten)]
    pub object: ObjectArgs,

    /// Group name.
    #[arg(long, value_name = "GROUP")]
    pub group_name: String,

    /// Permission level to grant, e.g. CAN_ATTACH_TO.
    #[arg(long, value_name = "LEVEL")]
    pub permission_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("dbperms").chain(args.iter().copied()))
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn get_accepts_named_flags() {
        let cli = parse(&[
            "get",
            "--object-type",
            "clusters",
            "--object-id",
            "1234-567890-kens4",
        ])
        .unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.object_type().unwrap(), ObjectType::Clusters);
        assert_eq!(args.object_id().unwrap(), "1234-567890-kens4");
    }

    #[test]
    fn get_accepts_positionals() {
        let cli = parse(&["get", "jobs", "42"]).unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.object_type().unwrap(), ObjectType::Jobs);
        assert_eq!(args.object_id().unwrap(), "42");
    }

    #[test]
    fn get_requires_an_object_id() {
        let err = parse(&["get", "--object-type", "jobs"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn both_forms_for_one_value_conflict() {
        let err = parse(&["get", "jobs", "42", "--object-type", "jobs"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn unknown_object_type_is_rejected() {
        let err = parse(&["get", "--object-type", "warehouses", "--object-id", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn positional_id_after_type_flag_points_at_object_id() {
        let err = parse(&["get", "--object-type", "clusters", "1234-567890-kens4"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        let message = err.to_string();
        assert!(message.contains("1234-567890-kens4"));
        assert!(message.contains("--object-id"));

        let err = parse(&["list-permissions", "--object-type", "jobs", "42"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn positional_type_accepts_singular_alias() {
        let cli = parse(&["get", "instance-pool", "pool-1"]).unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.object_type().unwrap(), ObjectType::InstancePools);
    }

    #[test]
    fn list_permissions_id_is_optional() {
        let cli = parse(&["list-permissions", "notebooks"]).unwrap();
        let Command::ListPermissions(args) = cli.command else {
            panic!("expected list-permissions");
        };
        assert_eq!(args.object_type().unwrap(), ObjectType::Notebooks);
        assert_eq!(args.object_id(), None);
    }

    #[test]
    fn list_permissions_types_alias() {
        let cli = parse(&[
            "list-permissions-types",
            "--object-type",
            "registered-models",
            "--object-id",
            "m1",
        ])
        .unwrap();
        let Command::ListPermissions(args) = cli.command else {
            panic!("expected list-permissions");
        };
        assert_eq!(args.object_type().unwrap(), ObjectType::RegisteredModels);
        assert_eq!(args.object_id(), Some("m1"));
    }

    #[test]
    fn add_group_parses_grant() {
        let cli = parse(&[
            "add-group",
            "clusters",
            "c1",
            "--group-name",
            "data-eng",
            "--permission-level",
            "CAN_RESTART",
        ])
        .unwrap();
        let Command::AddGroup(args) = cli.command else {
            panic!("expected add-group");
        };
        assert_eq!(args.group_name, "data-eng");
        assert_eq!(args.object.object_id().unwrap(), "c1");
    }

    #[test]
    fn json_flag_conflicts_with_explicit_output() {
        let err = parse(&["--json", "--output", "table", "list-types"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
