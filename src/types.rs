/// Shared serializable types: object types, permission views, error envelope.
///
/// Payloads from the Permissions REST API travel as raw `serde_json::Value`s.
/// The structs here are read-only views of them for table rendering.
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kinds of resources permissions can be managed on.
///
/// The canonical name is the REST path segment (plural).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectType {
    #[value(alias = "cluster")]
    Clusters,
    #[value(alias = "directory")]
    Directories,
    #[value(alias = "instance-pool")]
    InstancePools,
    #[value(alias = "job")]
    Jobs,
    #[value(alias = "notebook")]
    Notebooks,
    #[value(alias = "registered-model")]
    RegisteredModels,
}

impl ObjectType {
    /// Every supported object type, in display order.
    pub const ALL: [Self; 6] = [
        Self::Clusters,
        Self::Directories,
        Self::InstancePools,
        Self::Jobs,
        Self::Notebooks,
        Self::RegisteredModels,
    ];

    /// REST path segment for this object type.
    #[must_use]
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Clusters => "clusters",
            Self::Directories => "directories",
            Self::InstancePools => "instance-pools",
            Self::Jobs => "jobs",
            Self::Notebooks => "notebooks",
            Self::RegisteredModels => "registered-models",
        }
    }

    /// Singular form, as the service reports it in `object_type`.
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Clusters => "cluster",
            Self::Directories => "directory",
            Self::InstancePools => "instance-pool",
            Self::Jobs => "job",
            Self::Notebooks => "notebook",
            Self::RegisteredModels => "registered-model",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Table view of the permissions set on one object.
///
/// Every field is optional: the service's payload is printed as JSON exactly as
/// returned, and this view only feeds the table renderer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjectPermissions {
    /// Object path, e.g. `/clusters/1234-567890-kens4`.
    pub object_id: Option<String>,
    /// Singular object type as reported by the service.
    pub object_type: Option<String>,
    /// Ordered access-control entries.
    pub access_control_list: Option<Vec<AccessControlEntry>>,
}

impl ObjectPermissions {
    /// Decode the table view of a raw descriptor, if it has the expected shape.
    #[must_use]
    pub fn view(raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        Self::deserialize(raw).ok()
    }

    /// `"{object_type} {object_id}"`, skipping whichever part is absent.
    #[must_use]
    pub fn title(&self) -> String {
        [self.object_type.as_deref(), self.object_id.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn entries(&self) -> &[AccessControlEntry] {
        self.access_control_list.as_deref().unwrap_or_default()
    }
}

/// One principal and everything granted to it on an object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccessControlEntry {
    pub user_name: Option<String>,
    pub group_name: Option<String>,
    pub service_principal_name: Option<String>,
    pub all_permissions: Option<Vec<Permission>>,
}

impl AccessControlEntry {
    /// The principal this entry names, if any.
    #[must_use]
    pub fn principal(&self) -> Option<Principal<'_>> {
        if let Some(name) = &self.user_name {
            Some(Principal::User(name))
        } else if let Some(name) = &self.group_name {
            Some(Principal::Group(name))
        } else {
            self.service_principal_name
                .as_deref()
                .map(Principal::ServicePrincipal)
        }
    }

    #[must_use]
    pub fn grants(&self) -> &[Permission] {
        self.all_permissions.as_deref().unwrap_or_default()
    }
}

/// A user, group or service principal named in an ACL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal<'a> {
    User(&'a str),
    Group(&'a str),
    ServicePrincipal(&'a str),
}

impl<'a> Principal<'a> {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Group(_) => "group",
            Self::ServicePrincipal(_) => "service-principal",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::User(n) | Self::Group(n) | Self::ServicePrincipal(n) => *n,
        }
    }
}

/// A single grant within an ACL entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Permission {
    /// Level name, e.g. `CAN_MANAGE`.
    pub permission_level: Option<String>,
    /// Whether the grant comes from an ancestor rather than the object itself.
    pub inherited: Option<bool>,
    /// Ancestor paths the grant was inherited from.
    pub inherited_from_object: Option<Vec<String>>,
}

/// Table view of the permission levels valid for an object type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PermissionLevels {
    pub permission_levels: Option<Vec<PermissionLevel>>,
}

impl PermissionLevels {
    /// Decode the table view of a raw catalog, if it has the expected shape.
    #[must_use]
    pub fn view(raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        Self::deserialize(raw).ok()
    }

    #[must_use]
    pub fn levels(&self) -> &[PermissionLevel] {
        self.permission_levels.as_deref().unwrap_or_default()
    }
}

/// One catalog entry: a level and what it allows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PermissionLevel {
    pub permission_level: Option<String>,
    pub description: Option<String>,
}

/// A grant to add to an object's ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub permission_level: String,
}

impl AccessControlRequest {
    #[must_use]
    pub fn user(name: &str, level: &str) -> Self {
        Self {
            user_name: Some(name.to_owned()),
            group_name: None,
            permission_level: level.to_owned(),
        }
    }

    #[must_use]
    pub fn group(name: &str, level: &str) -> Self {
        Self {
            user_name: None,
            group_name: Some(name.to_owned()),
            permission_level: level.to_owned(),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `CliError`.
    #[must_use]
    pub fn from_cli_error(err: &crate::errors::CliError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
