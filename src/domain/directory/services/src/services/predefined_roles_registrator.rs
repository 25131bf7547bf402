// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use idstore_directory::*;
use internal_error::{InternalError, ResultIntoInternal};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Ensures the configured role names exist before the identity framework
/// starts serving role-management flows. Idempotent.
pub struct PredefinedRolesRegistrator {
    config: Arc<PredefinedRolesConfig>,
    role_directory: Arc<dyn RoleDirectory>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
impl PredefinedRolesRegistrator {
    fn new(config: Arc<PredefinedRolesConfig>, role_directory: Arc<dyn RoleDirectory>) -> Self {
        Self {
            config,
            role_directory,
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn ensure_predefined_roles(&self) -> Result<(), InternalError> {
        for role_config in &self.config.predefined {
            match self
                .role_directory
                .find_role_by_name(&role_config.name)
                .await
            {
                Ok(_) => {}
                Err(FindRoleByNameError::NotFound(_)) => {
                    tracing::debug!(role_name = %role_config.name, "Creating predefined role");

                    let role = Role::new(role_config.name.clone());
                    self.role_directory.create_role(&role).await.int_err()?;
                }
                Err(FindRoleByNameError::Ambiguous(e)) => {
                    // Duplicates already exist in the store; seeding another
                    // copy would only make the ambiguity worse.
                    tracing::warn!(error = %e, "Skipping predefined role with ambiguous name");
                }
                Err(FindRoleByNameError::Internal(e)) => return Err(e),
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
