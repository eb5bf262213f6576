//! Stub `PermissionsApi` for command tests.
use std::cell::RefCell;

use serde_json::{Value, json};

use crate::api::{ApiError, PermissionsApi};
use crate::types::{AccessControlRequest, ObjectType};

/// A recorded call to the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetPermissions(ObjectType, String),
    GetPossiblePermissions(ObjectType, Option<String>),
    UpdatePermissions(ObjectType, String, Vec<AccessControlRequest>),
}

/// Returns canned payloads and records every call in order.
#[derive(Debug, Default)]
pub struct StubApi {
    pub permissions: Option<Value>,
    pub levels: Option<Value>,
    /// Status to fail every call with, if set.
    pub fail_with: Option<u16>,
    pub calls: RefCell<Vec<Call>>,
}

impl StubApi {
    pub fn with_permissions(mut self, permissions: Value) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_levels(mut self, levels: Value) -> Self {
        self.levels = Some(levels);
        self
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        match self.fail_with {
            Some(status) => Err(ApiError::Status {
                status,
                error_code: Some("RESOURCE_DOES_NOT_EXIST".to_owned()),
                message: "stubbed failure".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

impl PermissionsApi for StubApi {
    fn get_permissions(
        &self,
        object_type: ObjectType,
        object_id: &str,
    ) -> Result<Value, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::GetPermissions(object_type, object_id.to_owned()));
        self.check()?;
        Ok(self.permissions.clone().expect("stub has no permissions"))
    }

    fn get_possible_permissions(
        &self,
        object_type: ObjectType,
        object_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.calls.borrow_mut().push(Call::GetPossiblePermissions(
            object_type,
            object_id.map(str::to_owned),
        ));
        self.check()?;
        Ok(self.levels.clone().expect("stub has no levels"))
    }

    fn update_permissions(
        &self,
        object_type: ObjectType,
        object_id: &str,
        access_control_list: &[AccessControlRequest],
    ) -> Result<Value, ApiError> {
        self.calls.borrow_mut().push(Call::UpdatePermissions(
            object_type,
            object_id.to_owned(),
            access_control_list.to_vec(),
        ));
        self.check()?;
        Ok(self.permissions.clone().expect("stub has no permissions"))
    }
}

/// The cluster descriptor used throughout the command tests.
pub fn cluster_descriptor() -> Value {
    json!({
        "object_id": "/clusters/1234-567890-kens4",
        "object_type": "cluster",
        "access_control_list": [{
            "group_name": "admins",
            "all_permissions": [{
                "permission_level": "CAN_MANAGE",
                "inherited": true,
                "inherited_from_object": ["/clusters/"]
            }]
        }]
    })
}

/// Permission-level catalogs as the service returns them, per object type.
pub fn levels_for(object_type: ObjectType) -> Value {
    let levels = match object_type {
        ObjectType::Clusters => json!([
            ["CAN_MANAGE", "Can Manage permission on cluster"],
            ["CAN_RESTART", "Can Restart permission on cluster"],
            ["CAN_ATTACH_TO", "Can Attach To permission on cluster"]
        ]),
        ObjectType::Directories => json!([
            ["CAN_READ", "Can view and comment on notebooks in the directory"],
            ["CAN_RUN", "Can view, comment, attach/detach, and run commands in notebooks in the directory"],
            ["CAN_EDIT", "Can view, comment, attach/detach, run commands, and edit notebooks in the directory"],
            ["CAN_MANAGE", "Can view, comment, attach/detach, run commands, and edit notebooks in the folder, and can create, delete, and change permissions of items in the directory"]
        ]),
        ObjectType::InstancePools => json!([
            ["CAN_MANAGE", "Can Manage permission on a pool"],
            ["CAN_ATTACH_TO", "Can Attach To permission on a pool"]
        ]),
        ObjectType::Jobs => json!([
            ["IS_OWNER", "Is Owner permission on a job"],
            ["CAN_MANAGE_RUN", "Can Manage Run permission to trigger or cancel job runs"],
            ["CAN_VIEW", "Can View permission to view job run results"]
        ]),
        ObjectType::Notebooks => json!([
            ["CAN_READ", "Can view and comment on the notebook"],
            ["CAN_RUN", "Can view, comment, attach/detach, and run commands in the notebook"],
            ["CAN_EDIT", "Can view, comment, attach/detach, run commands, and edit the notebook"],
            ["CAN_MANAGE", "Can view, comment, attach/detach, run commands, edit, and change permissions of the notebook"]
        ]),
        ObjectType::RegisteredModels => json!([
            ["CAN_READ", "Can view the details of the registered model and its model versions, and use the model versions."],
            ["CAN_EDIT", "Can view and edit the details of a registered model and its model versions (except stage changes), and add new model versions."],
            ["CAN_MANAGE_STAGING_VERSIONS", "Can view and edit the details of a registered model and its model versions, add new model versions, and manage stage transitions between non-Production stages."],
            ["CAN_MANAGE_PRODUCTION_VERSIONS", "Can view and edit the details of a registered model and its model versions, add new model versions, and manage stage transitions between any stages."],
            ["CAN_MANAGE", "Can manage permissions on, view all details of, and perform all actions on the registered model and its model versions."]
        ]),
    };
    let entries: Vec<_> = levels
        .as_array()
        .expect("array")
        .iter()
        .map(|pair| json!({ "permission_level": pair[0], "description": pair[1] }))
        .collect();
    json!({ "permission_levels": entries })
}
