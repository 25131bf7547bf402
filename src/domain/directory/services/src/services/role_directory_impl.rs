// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use futures::TryStreamExt;
use idstore_directory::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct RoleDirectoryImpl {
    role_gateway: Arc<dyn PersistenceGateway<Role>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn RoleDirectory)]
impl RoleDirectoryImpl {
    fn new(role_gateway: Arc<dyn PersistenceGateway<Role>>) -> Self {
        Self { role_gateway }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl RoleDirectory for RoleDirectoryImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(role_id = %role.id))]
    async fn create_role(&self, role: &Role) -> Result<(), CreateRoleError> {
        self.role_gateway.add(role.clone());
        self.role_gateway.save_changes().await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(role_id = %role.id))]
    async fn update_role(&self, role: &Role) -> Result<(), UpdateRoleError> {
        self.role_gateway.mark_modified(role.clone());
        self.role_gateway.save_changes().await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(role_id = %role.id))]
    async fn delete_role(&self, role: &Role) -> Result<(), DeleteRoleError> {
        self.role_gateway.remove(role.clone());

        let affected = self.role_gateway.save_changes().await?;
        if affected != 1 {
            return Err(DeleteRoleError::UnexpectedRowCount(DeleteRoleRowCountError {
                role_id: role.id.clone(),
                affected,
            }));
        }

        Ok(())
    }

    async fn get_role_by_id(&self, role_id: &RoleID) -> Result<Role, GetRoleByIdError> {
        match self.role_gateway.find_by_id(role_id).await? {
            Some(role) => Ok(role),
            None => Err(GetRoleByIdError::NotFound(RoleNotFoundByIdError {
                role_id: role_id.clone(),
            })),
        }
    }

    async fn find_role_by_name(&self, role_name: &str) -> Result<Role, FindRoleByNameError> {
        let probe = role_name.to_string();
        let stream = self
            .role_gateway
            .query(Box::new(move |role: &Role| {
                role.name.eq_ignore_ascii_case(&probe)
            }))
            .await;

        let mut matches: Vec<Role> = stream.try_collect().await?;
        if matches.len() > 1 {
            return Err(FindRoleByNameError::Ambiguous(AmbiguousRoleNameError {
                role_name: role_name.to_string(),
                matches: matches.len(),
            }));
        }

        match matches.pop() {
            Some(role) => Ok(role),
            None => Err(FindRoleByNameError::NotFound(RoleNotFoundByNameError {
                role_name: role_name.to_string(),
            })),
        }
    }

    fn role_id(&self, role: &Role) -> RoleID {
        role.id.clone()
    }

    fn role_name(&self, role: &Role) -> String {
        role.name.clone()
    }

    fn normalized_role_name(&self, role: &Role) -> String {
        role.name.clone()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(role_id = %role.id))]
    async fn set_role_name(
        &self,
        role: &mut Role,
        role_name: &str,
    ) -> Result<(), UpdateRoleError> {
        role.name = role_name.to_string();
        self.role_gateway.mark_modified(role.clone());
        self.role_gateway.save_changes().await?;
        Ok(())
    }

    fn set_normalized_role_name(&self, _role: &mut Role, _role_name: &str) {
        // The normalized form is never stored separately.
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
