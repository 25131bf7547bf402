// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::Catalog;
use idstore_directory::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_account_then_get_by_id(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    // Fresh accounts come with a generated id
    let account = Account::new("bob@example.com");
    assert!(!account.id.as_str().is_empty());

    account_directory.create_account(&account).await.unwrap();

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored, account);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_account_duplicate_id_fails(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    let twin = Account::test("account-1", "other@example.com");
    let result = account_directory.create_account(&twin).await;
    assert!(matches!(result, Err(CreateAccountError::Duplicate(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_get_account_by_id_not_found(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let result = account_directory
        .get_account_by_id(&AccountID::new("i-dont-exist"))
        .await;
    assert!(matches!(result, Err(GetAccountByIdError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_account_by_email_is_case_insensitive(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let account = Account::test("account-1", "Bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    let found_upper = account_directory
        .find_account_by_email("BOB@EXAMPLE.COM")
        .await
        .unwrap();
    let found_lower = account_directory
        .find_account_by_email("bob@example.com")
        .await
        .unwrap();

    assert_eq!(found_upper.id, account.id);
    assert_eq!(found_lower.id, account.id);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_account_by_email_not_found(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let result = account_directory
        .find_account_by_email("ghost@example.com")
        .await;
    assert!(matches!(result, Err(FindAccountByEmailError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_account_by_email_ambiguous(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    account_directory
        .create_account(&Account::test("account-1", "Bob@example.com"))
        .await
        .unwrap();
    account_directory
        .create_account(&Account::test("account-2", "bob@EXAMPLE.com"))
        .await
        .unwrap();

    let result = account_directory
        .find_account_by_email("bob@example.com")
        .await;
    match result {
        Err(FindAccountByEmailError::Ambiguous(e)) => assert_eq!(e.matches, 2),
        _ => panic!("expected ambiguous email lookup to fail"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_update_account_persists_changes(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    account.email = "robert@example.com".to_string();
    account_directory.update_account(&account).await.unwrap();

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.email, "robert@example.com");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_delete_account(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let account = Account::test("account-1", "bob@example.com");

    // Not stored yet: zero rows affected is a failure, not a silent success
    let result = account_directory.delete_account(&account).await;
    match result {
        Err(DeleteAccountError::UnexpectedRowCount(e)) => assert_eq!(e.affected, 0),
        _ => panic!("expected delete of an absent account to fail"),
    }

    account_directory.create_account(&account).await.unwrap();
    account_directory.delete_account(&account).await.unwrap();

    let result = account_directory.get_account_by_id(&account.id).await;
    assert!(matches!(result, Err(GetAccountByIdError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_password_hash_does_not_persist_by_itself(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    account_directory.set_password_hash(&mut account, Some("hash-1".to_string()));
    assert_eq!(
        account_directory.password_hash(&account),
        Some("hash-1".to_string())
    );

    // The stored row is untouched until an explicit update
    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.password_hash, None);

    account_directory.update_account(&account).await.unwrap();

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.password_hash, Some("hash-1".to_string()));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_has_password(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    assert!(!account_directory.has_password(&account));

    account_directory.set_password_hash(&mut account, Some("   ".to_string()));
    assert!(!account_directory.has_password(&account));

    account_directory.set_password_hash(&mut account, Some("hash-1".to_string()));
    assert!(account_directory.has_password(&account));

    account_directory.set_password_hash(&mut account, None);
    assert!(!account_directory.has_password(&account));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_email_persists_immediately(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    account_directory
        .set_email(&mut account, "robert@example.com")
        .await
        .unwrap();

    assert_eq!(account.email, "robert@example.com");

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.email, "robert@example.com");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_email_confirmed_flag(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    // Absent and false are equivalent
    assert!(!account_directory.email_confirmed(&account));

    account_directory
        .set_email_confirmed(&mut account, true)
        .await
        .unwrap();
    assert!(account_directory.email_confirmed(&account));

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.email_confirmed, Some(true));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_normalized_email_updates_store_not_caller(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    account_directory
        .set_normalized_email(&account, "robert@example.com")
        .await
        .unwrap();

    // The caller's instance keeps the old email; only the store changed
    assert_eq!(account.email, "bob@example.com");

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.email, "robert@example.com");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_normalized_email_for_missing_account_fails(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let ghost = Account::test("ghost", "ghost@example.com");
    let result = account_directory
        .set_normalized_email(&ghost, "new@example.com")
        .await;
    assert!(matches!(result, Err(SetNormalizedEmailError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_accessors_mirror_email(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let account = Account::test("account-1", "bob@example.com");

    assert_eq!(
        account_directory.account_id(&account),
        AccountID::new("account-1")
    );
    assert_eq!(account_directory.display_name(&account), "bob@example.com");
    assert_eq!(
        account_directory.normalized_display_name(&account),
        "bob@example.com"
    );
    assert_eq!(account_directory.email(&account), "bob@example.com");
    assert_eq!(
        account_directory.normalized_email(&account),
        "bob@example.com"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_user_name_operations_unsupported(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");

    let result = account_directory.set_user_name(&mut account, "bobby");
    assert!(result.is_err());

    let result = account_directory.normalized_user_name(&account);
    assert!(result.is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_add_to_role_and_membership(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    role_directory
        .create_role(&Role::test("role-admin", "Admin"))
        .await
        .unwrap();
    role_directory
        .create_role(&Role::test("role-viewer", "Viewer"))
        .await
        .unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    account_directory
        .add_to_role(&mut account, "Admin")
        .await
        .unwrap();

    let roles = account_directory.roles_of_account(&account).await.unwrap();
    assert_eq!(roles, vec!["Admin".to_string()]);

    assert!(account_directory
        .is_in_role(&account, "Admin")
        .await
        .unwrap());
    assert!(!account_directory
        .is_in_role(&account, "Viewer")
        .await
        .unwrap());

    // The assignment also survives a round-trip through the store
    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.role_id, Some(RoleID::new("role-admin")));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_add_to_role_missing_role_fails(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    let result = account_directory.add_to_role(&mut account, "Ghost").await;
    assert!(matches!(result, Err(AddToRoleError::RoleNotFound(_))));
    assert_eq!(account.role_id, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_membership_role_lookup_is_exact_match(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    role_directory
        .create_role(&Role::test("role-admin", "Admin"))
        .await
        .unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();

    // Unlike find_role_by_name, membership operations do not case-fold
    let result = account_directory.add_to_role(&mut account, "admin").await;
    assert!(matches!(result, Err(AddToRoleError::RoleNotFound(_))));

    let result = account_directory.is_in_role(&account, "ADMIN").await;
    assert!(matches!(result, Err(IsInRoleError::RoleNotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_is_in_role_missing_role_fails(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let account = Account::test("account-1", "bob@example.com");
    let result = account_directory.is_in_role(&account, "Ghost").await;
    assert!(matches!(result, Err(IsInRoleError::RoleNotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_remove_from_role(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    role_directory
        .create_role(&Role::test("role-admin", "Admin"))
        .await
        .unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();
    account_directory
        .add_to_role(&mut account, "Admin")
        .await
        .unwrap();

    // Removal does not verify the account was in the named role
    account_directory
        .remove_from_role(&mut account, "Admin")
        .await
        .unwrap();

    let roles = account_directory.roles_of_account(&account).await.unwrap();
    assert!(roles.is_empty());

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.role_id, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_accounts_in_role_end_to_end(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    role_directory
        .create_role(&Role::test("role-editor", "Editor"))
        .await
        .unwrap();

    let mut account = Account::test("account-1", "a@b.com");
    account_directory.create_account(&account).await.unwrap();
    account_directory
        .add_to_role(&mut account, "Editor")
        .await
        .unwrap();

    let members = account_directory.accounts_in_role("Editor").await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].email, "a@b.com");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_accounts_in_role_missing_role_fails(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();

    let result = account_directory.accounts_in_role("Ghost").await;
    assert!(matches!(result, Err(AccountsInRoleError::RoleNotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_roles_of_account_with_dangling_reference(catalog: &Catalog) {
    let account_directory = catalog.get_one::<dyn AccountDirectory>().unwrap();
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let role = Role::test("role-admin", "Admin");
    role_directory.create_role(&role).await.unwrap();

    let mut account = Account::test("account-1", "bob@example.com");
    account_directory.create_account(&account).await.unwrap();
    account_directory
        .add_to_role(&mut account, "Admin")
        .await
        .unwrap();

    // Deleting the role does not clear the account's reference
    role_directory.delete_role(&role).await.unwrap();

    let stored = account_directory
        .get_account_by_id(&account.id)
        .await
        .unwrap();
    assert_eq!(stored.role_id, Some(RoleID::new("role-admin")));

    let roles = account_directory.roles_of_account(&stored).await.unwrap();
    assert!(roles.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
