// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::{ErrorIntoInternal, InternalError};
use thiserror::Error;

use crate::{ConstraintViolationError, Role, RoleID, SaveChangesError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Role lifecycle as the identity framework's role-store contract sees it.
#[async_trait::async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn create_role(&self, role: &Role) -> Result<(), CreateRoleError>;

    async fn update_role(&self, role: &Role) -> Result<(), UpdateRoleError>;

    /// Succeeds only when exactly one row was affected.
    async fn delete_role(&self, role: &Role) -> Result<(), DeleteRoleError>;

    async fn get_role_by_id(&self, role_id: &RoleID) -> Result<Role, GetRoleByIdError>;

    /// Case-insensitive single-match lookup; zero matches and more than one
    /// match are both errors.
    async fn find_role_by_name(&self, role_name: &str) -> Result<Role, FindRoleByNameError>;

    fn role_id(&self, role: &Role) -> RoleID;

    fn role_name(&self, role: &Role) -> String;

    /// Identical to [`Self::role_name`]; no normalized form is stored.
    fn normalized_role_name(&self, role: &Role) -> String;

    /// Mutates the caller's copy and persists immediately.
    async fn set_role_name(&self, role: &mut Role, role_name: &str)
        -> Result<(), UpdateRoleError>;

    /// Deliberate no-op.
    fn set_normalized_role_name(&self, role: &mut Role, role_name: &str);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateRoleError {
    #[error(transparent)]
    Duplicate(ConstraintViolationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for CreateRoleError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Duplicate(e),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateRoleError {
    #[error(transparent)]
    Duplicate(ConstraintViolationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for UpdateRoleError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Duplicate(e),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteRoleError {
    #[error(transparent)]
    UnexpectedRowCount(DeleteRoleRowCountError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for DeleteRoleError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Internal(e.int_err()),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

#[derive(Error, Debug)]
#[error("Role '{role_id}' not deleted, affected rows: {affected}")]
pub struct DeleteRoleRowCountError {
    pub role_id: RoleID,
    pub affected: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetRoleByIdError {
    #[error(transparent)]
    NotFound(RoleNotFoundByIdError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Role not found by ID: '{role_id}'")]
pub struct RoleNotFoundByIdError {
    pub role_id: RoleID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindRoleByNameError {
    #[error(transparent)]
    NotFound(RoleNotFoundByNameError),

    #[error(transparent)]
    Ambiguous(AmbiguousRoleNameError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Role not found by name: '{role_name}'")]
pub struct RoleNotFoundByNameError {
    pub role_name: String,
}

#[derive(Error, Debug)]
#[error("Multiple roles ({matches}) match name '{role_name}' case-insensitively")]
pub struct AmbiguousRoleNameError {
    pub role_name: String,
    pub matches: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
