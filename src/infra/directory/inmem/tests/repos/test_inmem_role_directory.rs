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
async fn test_create_role_then_get_by_id() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_create_role_then_get_by_id(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_role_by_id_not_found() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_get_role_by_id_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_role_by_name_is_case_insensitive() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_find_role_by_name_is_case_insensitive(&harness.catalog)
        .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_role_by_name_not_found() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_find_role_by_name_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_role_by_name_ambiguous() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_find_role_by_name_ambiguous(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_role_persists_changes() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_update_role_persists_changes(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_role_name_persists_immediately() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_set_role_name_persists_immediately(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_normalized_role_name_is_noop() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_set_normalized_role_name_is_noop(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_role_accessors() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_role_accessors(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_role() {
    let harness = InmemRoleDirectoryHarness::new();
    idstore_directory_repo_tests::test_delete_role(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InmemRoleDirectoryHarness {
    catalog: Catalog,
}

impl InmemRoleDirectoryHarness {
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
