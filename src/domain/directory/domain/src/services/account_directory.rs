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

use crate::{
    Account,
    AccountID,
    ConstraintViolationError,
    RoleNotFoundByNameError,
    SaveChangesError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Account lifecycle, credentials, email identity, and role membership, as
/// the identity framework's user-store contract sees them.
///
/// The directory is a stateless facade: every persisting call stages exactly
/// one mutation on the gateway and commits it before returning.
#[async_trait::async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn create_account(&self, account: &Account) -> Result<(), CreateAccountError>;

    async fn update_account(&self, account: &Account) -> Result<(), UpdateAccountError>;

    /// Succeeds only when exactly one row was affected, covering both
    /// "already deleted" and "deleted more than expected".
    async fn delete_account(&self, account: &Account) -> Result<(), DeleteAccountError>;

    async fn get_account_by_id(
        &self,
        account_id: &AccountID,
    ) -> Result<Account, GetAccountByIdError>;

    /// Case-insensitive single-match lookup. Two accounts sharing an email
    /// case-insensitively are an ambiguity error, never silently resolved.
    async fn find_account_by_email(&self, email: &str)
        -> Result<Account, FindAccountByEmailError>;

    fn account_id(&self, account: &Account) -> AccountID;

    /// The display name is the email; there is no separate field.
    fn display_name(&self, account: &Account) -> String;

    /// Normalization is a pass-through, identical to [`Self::display_name`].
    fn normalized_display_name(&self, account: &Account) -> String;

    /// Accounts have no username distinct from email; always fails.
    fn set_user_name(
        &self,
        account: &mut Account,
        user_name: &str,
    ) -> Result<(), UnsupportedOperationError>;

    /// Accounts have no username distinct from email; always fails.
    fn normalized_user_name(&self, account: &Account)
        -> Result<String, UnsupportedOperationError>;

    /// Mutates the caller's in-memory account only. The stored row does not
    /// change until a subsequent [`Self::update_account`] call: callers
    /// batch the hash change with the save that follows.
    fn set_password_hash(&self, account: &mut Account, password_hash: Option<String>);

    fn password_hash(&self, account: &Account) -> Option<String>;

    /// True iff a hash is present and non-whitespace.
    fn has_password(&self, account: &Account) -> bool;

    fn email(&self, account: &Account) -> String;

    /// Unlike [`Self::set_password_hash`], persists immediately.
    async fn set_email(&self, account: &mut Account, email: &str)
        -> Result<(), UpdateAccountError>;

    /// Absent and `false` are equivalent.
    fn email_confirmed(&self, account: &Account) -> bool;

    async fn set_email_confirmed(
        &self,
        account: &mut Account,
        confirmed: bool,
    ) -> Result<(), UpdateAccountError>;

    /// Identical to [`Self::email`]; no normalized form is stored.
    fn normalized_email(&self, account: &Account) -> String;

    /// Re-fetches the account by id and persists the email change on the
    /// fetched copy. The caller's instance is deliberately left untouched.
    async fn set_normalized_email(
        &self,
        account: &Account,
        email: &str,
    ) -> Result<(), SetNormalizedEmailError>;

    /// Looks the role up by exact name (first match) and points the account
    /// at it. A missing role is a [`RoleNotFoundByNameError`], not a crash.
    async fn add_to_role(
        &self,
        account: &mut Account,
        role_name: &str,
    ) -> Result<(), AddToRoleError>;

    /// Clears the role reference and persists. Does not verify the account
    /// was actually in the named role.
    async fn remove_from_role(
        &self,
        account: &mut Account,
        role_name: &str,
    ) -> Result<(), UpdateAccountError>;

    /// At most one element. A dangling role reference yields an empty list.
    async fn roles_of_account(&self, account: &Account) -> Result<Vec<String>, InternalError>;

    /// Exact-name role lookup; a missing role is an error, not `false`.
    async fn is_in_role(&self, account: &Account, role_name: &str)
        -> Result<bool, IsInRoleError>;

    /// All accounts whose role reference equals the named role's id.
    async fn accounts_in_role(&self, role_name: &str)
        -> Result<Vec<Account>, AccountsInRoleError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateAccountError {
    #[error(transparent)]
    Duplicate(ConstraintViolationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for CreateAccountError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Duplicate(e),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateAccountError {
    #[error(transparent)]
    Duplicate(ConstraintViolationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for UpdateAccountError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Duplicate(e),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteAccountError {
    #[error(transparent)]
    UnexpectedRowCount(DeleteAccountRowCountError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for DeleteAccountError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Internal(e.int_err()),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

#[derive(Error, Debug)]
#[error("Account '{account_id}' not deleted, affected rows: {affected}")]
pub struct DeleteAccountRowCountError {
    pub account_id: AccountID,
    pub affected: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetAccountByIdError {
    #[error(transparent)]
    NotFound(AccountNotFoundByIdError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Account not found by ID: '{account_id}'")]
pub struct AccountNotFoundByIdError {
    pub account_id: AccountID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindAccountByEmailError {
    #[error(transparent)]
    NotFound(AccountNotFoundByEmailError),

    #[error(transparent)]
    Ambiguous(AmbiguousAccountEmailError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Account not found by email: '{email}'")]
pub struct AccountNotFoundByEmailError {
    pub email: String,
}

#[derive(Error, Debug)]
#[error("Multiple accounts ({matches}) match email '{email}' case-insensitively")]
pub struct AmbiguousAccountEmailError {
    pub email: String,
    pub matches: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetNormalizedEmailError {
    #[error(transparent)]
    NotFound(AccountNotFoundByIdError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for SetNormalizedEmailError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Internal(e.int_err()),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum AddToRoleError {
    #[error(transparent)]
    RoleNotFound(RoleNotFoundByNameError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<SaveChangesError> for AddToRoleError {
    fn from(e: SaveChangesError) -> Self {
        match e {
            SaveChangesError::ConstraintViolation(e) => Self::Internal(e.int_err()),
            SaveChangesError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum IsInRoleError {
    #[error(transparent)]
    RoleNotFound(RoleNotFoundByNameError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum AccountsInRoleError {
    #[error(transparent)]
    RoleNotFound(RoleNotFoundByNameError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
#[error("Operation '{operation}' is not supported: accounts are identified by email")]
pub struct UnsupportedOperationError {
    pub operation: &'static str,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
