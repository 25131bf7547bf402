// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use futures::TryStreamExt;
use idstore_directory::*;
use idstore_directory_inmem::InMemoryPersistenceGateway;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_staged_mutations_invisible_until_commit() {
    let gateway = InMemoryPersistenceGateway::new();
    let accounts: &dyn PersistenceGateway<Account> = &gateway;

    let account = Account::test("account-1", "bob@example.com");
    accounts.add(account.clone());

    assert_eq!(accounts.find_by_id(&account.id).await.unwrap(), None);

    let affected = accounts.save_changes().await.unwrap();
    assert_eq!(affected, 1);

    assert_eq!(
        accounts.find_by_id(&account.id).await.unwrap(),
        Some(account)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_insert_duplicate_id_fails_without_partial_commit() {
    let gateway = InMemoryPersistenceGateway::new();
    let accounts: &dyn PersistenceGateway<Account> = &gateway;

    let first = Account::test("account-1", "bob@example.com");
    accounts.add(first.clone());
    accounts.save_changes().await.unwrap();

    // One good insert and one duplicate staged together: the commit fails
    // and neither becomes visible
    let second = Account::test("account-2", "alice@example.com");
    accounts.add(second.clone());
    accounts.add(Account::test("account-1", "imposter@example.com"));

    let result = accounts.save_changes().await;
    assert!(matches!(
        result,
        Err(SaveChangesError::ConstraintViolation(_))
    ));

    assert_eq!(accounts.find_by_id(&second.id).await.unwrap(), None);
    assert_eq!(
        accounts.find_by_id(&first.id).await.unwrap(),
        Some(first),
        "the committed row must survive the failed commit untouched"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_remove_missing_row_counts_zero_affected() {
    let gateway = InMemoryPersistenceGateway::new();
    let accounts: &dyn PersistenceGateway<Account> = &gateway;

    accounts.remove(Account::test("ghost", "ghost@example.com"));

    let affected = accounts.save_changes().await.unwrap();
    assert_eq!(affected, 0);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_missing_row_is_an_error() {
    let gateway = InMemoryPersistenceGateway::new();
    let accounts: &dyn PersistenceGateway<Account> = &gateway;

    accounts.mark_modified(Account::test("ghost", "ghost@example.com"));

    let result = accounts.save_changes().await;
    assert!(matches!(result, Err(SaveChangesError::Internal(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_query_filters_committed_rows() {
    let gateway = InMemoryPersistenceGateway::new();
    let accounts: &dyn PersistenceGateway<Account> = &gateway;

    accounts.add(Account::test("account-1", "bob@example.com"));
    accounts.add(Account::test("account-2", "alice@example.com"));
    accounts.add(Account::test("account-3", "bob@other.org"));
    accounts.save_changes().await.unwrap();

    let stream = accounts
        .query(Box::new(|account: &Account| {
            account.email.starts_with("bob@")
        }))
        .await;

    let mut emails: Vec<String> = stream
        .map_ok(|account| account.email)
        .try_collect()
        .await
        .unwrap();
    emails.sort();

    assert_eq!(emails, vec!["bob@example.com", "bob@other.org"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_account_and_role_tables_commit_independently() {
    let gateway = InMemoryPersistenceGateway::new();
    let accounts: &dyn PersistenceGateway<Account> = &gateway;
    let roles: &dyn PersistenceGateway<Role> = &gateway;

    let account = Account::test("account-1", "bob@example.com");
    accounts.add(account.clone());

    // Committing the roles table does not flush staged account mutations
    let affected = roles.save_changes().await.unwrap();
    assert_eq!(affected, 0);
    assert_eq!(accounts.find_by_id(&account.id).await.unwrap(), None);

    let affected = accounts.save_changes().await.unwrap();
    assert_eq!(affected, 1);

    roles.add(Role::test("role-admin", "Admin"));
    let affected = roles.save_changes().await.unwrap();
    assert_eq!(affected, 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
