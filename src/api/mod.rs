/// Permissions API: the collaborator trait and its HTTP implementation.
pub mod errors;
pub mod http;

pub use errors::ApiError;
pub use http::HttpPermissionsClient;

use serde_json::Value;

use crate::types::{AccessControlRequest, ObjectType};

/// Remote operations the commands depend on.
///
/// Commands receive this as `&dyn PermissionsApi` so tests can substitute a stub.
/// Payloads are returned as the JSON document the service sent.
pub trait PermissionsApi {
    /// Fetch the permissions currently set on an object.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the object does not exist, the caller lacks
    /// access, or the request fails.
    fn get_permissions(
        &self,
        object_type: ObjectType,
        object_id: &str,
    ) -> Result<Value, ApiError>;

    /// Fetch the permission levels valid for an object type.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any remote failure.
    fn get_possible_permissions(
        &self,
        object_type: ObjectType,
        object_id: Option<&str>,
    ) -> Result<Value, ApiError>;

    /// Add grants to an object's ACL, returning the updated permissions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any remote failure.
    fn update_permissions(
        &self,
        object_type: ObjectType,
        object_id: &str,
        access_control_list: &[AccessControlRequest],
    ) -> Result<Value, ApiError>;
}
