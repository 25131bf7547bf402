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
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct AccountDirectoryImpl {
    account_gateway: Arc<dyn PersistenceGateway<Account>>,
    role_gateway: Arc<dyn PersistenceGateway<Role>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn AccountDirectory)]
impl AccountDirectoryImpl {
    fn new(
        account_gateway: Arc<dyn PersistenceGateway<Account>>,
        role_gateway: Arc<dyn PersistenceGateway<Role>>,
    ) -> Self {
        Self {
            account_gateway,
            role_gateway,
        }
    }

    // Membership operations match the role name exactly and take the first
    // hit, unlike the case-insensitive single-match of find_role_by_name.
    async fn first_role_by_exact_name(
        &self,
        role_name: &str,
    ) -> Result<Option<Role>, InternalError> {
        let role_name = role_name.to_string();
        let mut stream = self
            .role_gateway
            .query(Box::new(move |role: &Role| role.name == role_name))
            .await;
        stream.try_next().await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AccountDirectory for AccountDirectoryImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn create_account(&self, account: &Account) -> Result<(), CreateAccountError> {
        self.account_gateway.add(account.clone());
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn update_account(&self, account: &Account) -> Result<(), UpdateAccountError> {
        self.account_gateway.mark_modified(account.clone());
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn delete_account(&self, account: &Account) -> Result<(), DeleteAccountError> {
        self.account_gateway.remove(account.clone());

        let affected = self.account_gateway.save_changes().await?;
        if affected != 1 {
            return Err(DeleteAccountError::UnexpectedRowCount(
                DeleteAccountRowCountError {
                    account_id: account.id.clone(),
                    affected,
                },
            ));
        }

        Ok(())
    }

    async fn get_account_by_id(
        &self,
        account_id: &AccountID,
    ) -> Result<Account, GetAccountByIdError> {
        match self.account_gateway.find_by_id(account_id).await? {
            Some(account) => Ok(account),
            None => Err(GetAccountByIdError::NotFound(AccountNotFoundByIdError {
                account_id: account_id.clone(),
            })),
        }
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Account, FindAccountByEmailError> {
        let probe = email.to_string();
        let stream = self
            .account_gateway
            .query(Box::new(move |account: &Account| {
                account.email.eq_ignore_ascii_case(&probe)
            }))
            .await;

        let mut matches: Vec<Account> = stream.try_collect().await?;
        if matches.len() > 1 {
            return Err(FindAccountByEmailError::Ambiguous(
                AmbiguousAccountEmailError {
                    email: email.to_string(),
                    matches: matches.len(),
                },
            ));
        }

        match matches.pop() {
            Some(account) => Ok(account),
            None => Err(FindAccountByEmailError::NotFound(
                AccountNotFoundByEmailError {
                    email: email.to_string(),
                },
            )),
        }
    }

    fn account_id(&self, account: &Account) -> AccountID {
        account.id.clone()
    }

    fn display_name(&self, account: &Account) -> String {
        account.email.clone()
    }

    fn normalized_display_name(&self, account: &Account) -> String {
        account.email.clone()
    }

    fn set_user_name(
        &self,
        _account: &mut Account,
        _user_name: &str,
    ) -> Result<(), UnsupportedOperationError> {
        Err(UnsupportedOperationError {
            operation: "set_user_name",
        })
    }

    fn normalized_user_name(
        &self,
        _account: &Account,
    ) -> Result<String, UnsupportedOperationError> {
        Err(UnsupportedOperationError {
            operation: "normalized_user_name",
        })
    }

    fn set_password_hash(&self, account: &mut Account, password_hash: Option<String>) {
        // In-memory mutation only: the caller batches this with the next
        // update_account call.
        account.password_hash = password_hash;
    }

    fn password_hash(&self, account: &Account) -> Option<String> {
        account.password_hash.clone()
    }

    fn has_password(&self, account: &Account) -> bool {
        account
            .password_hash
            .as_deref()
            .is_some_and(|hash| !hash.trim().is_empty())
    }

    fn email(&self, account: &Account) -> String {
        account.email.clone()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn set_email(
        &self,
        account: &mut Account,
        email: &str,
    ) -> Result<(), UpdateAccountError> {
        account.email = email.to_string();
        self.account_gateway.mark_modified(account.clone());
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    fn email_confirmed(&self, account: &Account) -> bool {
        account.email_confirmed.unwrap_or(false)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id, confirmed))]
    async fn set_email_confirmed(
        &self,
        account: &mut Account,
        confirmed: bool,
    ) -> Result<(), UpdateAccountError> {
        account.email_confirmed = Some(confirmed);
        self.account_gateway.mark_modified(account.clone());
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    fn normalized_email(&self, account: &Account) -> String {
        account.email.clone()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn set_normalized_email(
        &self,
        account: &Account,
        email: &str,
    ) -> Result<(), SetNormalizedEmailError> {
        // Works on a freshly fetched copy: the caller's instance stays as-is.
        let Some(mut fetched) = self.account_gateway.find_by_id(&account.id).await? else {
            return Err(SetNormalizedEmailError::NotFound(AccountNotFoundByIdError {
                account_id: account.id.clone(),
            }));
        };

        fetched.email = email.to_string();
        self.account_gateway.mark_modified(fetched);
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id, role_name))]
    async fn add_to_role(
        &self,
        account: &mut Account,
        role_name: &str,
    ) -> Result<(), AddToRoleError> {
        let Some(role) = self.first_role_by_exact_name(role_name).await? else {
            return Err(AddToRoleError::RoleNotFound(RoleNotFoundByNameError {
                role_name: role_name.to_string(),
            }));
        };

        account.role_id = Some(role.id);
        self.account_gateway.mark_modified(account.clone());
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn remove_from_role(
        &self,
        account: &mut Account,
        _role_name: &str,
    ) -> Result<(), UpdateAccountError> {
        account.role_id = None;
        self.account_gateway.mark_modified(account.clone());
        self.account_gateway.save_changes().await?;
        Ok(())
    }

    async fn roles_of_account(&self, account: &Account) -> Result<Vec<String>, InternalError> {
        let Some(role_id) = account.role_id.clone() else {
            return Ok(Vec::new());
        };

        let stream = self
            .role_gateway
            .query(Box::new(move |role: &Role| role.id == role_id))
            .await;

        let roles: Vec<Role> = stream.try_collect().await?;
        Ok(roles.into_iter().map(|role| role.name).collect())
    }

    async fn is_in_role(
        &self,
        account: &Account,
        role_name: &str,
    ) -> Result<bool, IsInRoleError> {
        let Some(role) = self.first_role_by_exact_name(role_name).await? else {
            return Err(IsInRoleError::RoleNotFound(RoleNotFoundByNameError {
                role_name: role_name.to_string(),
            }));
        };

        Ok(account.role_id.as_ref() == Some(&role.id))
    }

    async fn accounts_in_role(
        &self,
        role_name: &str,
    ) -> Result<Vec<Account>, AccountsInRoleError> {
        let Some(role) = self.first_role_by_exact_name(role_name).await? else {
            return Err(AccountsInRoleError::RoleNotFound(RoleNotFoundByNameError {
                role_name: role_name.to_string(),
            }));
        };

        let role_id = role.id;
        let stream = self
            .account_gateway
            .query(Box::new(move |account: &Account| {
                account.role_id.as_ref() == Some(&role_id)
            }))
            .await;

        let accounts = stream.try_collect().await?;
        Ok(accounts)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
