// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::{Catalog, CatalogBuilder};
use idstore_directory_inmem::InMemoryPersistenceGateway;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_account_then_get_by_id() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_create_account_then_get_by_id(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_account_duplicate_id_fails() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_create_account_duplicate_id_fails(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_account_by_id_not_found() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_get_account_by_id_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_account_by_email_is_case_insensitive() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_find_account_by_email_is_case_insensitive(&harness.catalog)
        .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_account_by_email_not_found() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_find_account_by_email_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_account_by_email_ambiguous() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_find_account_by_email_ambiguous(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_account_persists_changes() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_update_account_persists_changes(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_account() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_delete_account(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_password_hash_does_not_persist_by_itself() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_set_password_hash_does_not_persist_by_itself(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_has_password() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_has_password(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_email_persists_immediately() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_set_email_persists_immediately(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_email_confirmed_flag() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_email_confirmed_flag(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_normalized_email_updates_store_not_caller() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_set_normalized_email_updates_store_not_caller(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_normalized_email_for_missing_account_fails() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_set_normalized_email_for_missing_account_fails(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_accessors_mirror_email() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_accessors_mirror_email(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_user_name_operations_unsupported() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_user_name_operations_unsupported(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_add_to_role_and_membership() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_add_to_role_and_membership(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_add_to_role_missing_role_fails() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_add_to_role_missing_role_fails(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_membership_role_lookup_is_exact_match() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_membership_role_lookup_is_exact_match(&harness.catalog)
        .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_is_in_role_missing_role_fails() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_is_in_role_missing_role_fails(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_remove_from_role() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_remove_from_role(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_accounts_in_role_end_to_end() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_accounts_in_role_end_to_end(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_accounts_in_role_missing_role_fails() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_accounts_in_role_missing_role_fails(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_roles_of_account_with_dangling_reference() {
    let harness = InmemAccountDirectoryHarness::new();
    idstore_directory_repo_tests::test_roles_of_account_with_dangling_reference(&harness.catalog)
        .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InmemAccountDirectoryHarness {
    catalog: Catalog,
}

impl InmemAccountDirectoryHarness {
    pub fn new() -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add::<InMemoryPersistenceGateway>();
        idstore_directory_services::register_dependencies(&mut catalog_builder);

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
