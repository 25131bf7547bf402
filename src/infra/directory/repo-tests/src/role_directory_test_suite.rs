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

pub async fn test_create_role_then_get_by_id(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let role = Role::test("role-admin", "Admin");
    role_directory.create_role(&role).await.unwrap();

    let stored = role_directory.get_role_by_id(&role.id).await.unwrap();
    assert_eq!(stored, role);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_get_role_by_id_not_found(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let result = role_directory
        .get_role_by_id(&RoleID::new("i-dont-exist"))
        .await;
    assert!(matches!(result, Err(GetRoleByIdError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_role_by_name_is_case_insensitive(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let role = Role::test("role-admin", "Admin");
    role_directory.create_role(&role).await.unwrap();

    let found_upper = role_directory.find_role_by_name("ADMIN").await.unwrap();
    let found_lower = role_directory.find_role_by_name("admin").await.unwrap();

    assert_eq!(found_upper.id, role.id);
    assert_eq!(found_lower.id, role.id);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_role_by_name_not_found(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let result = role_directory.find_role_by_name("Ghost").await;
    assert!(matches!(result, Err(FindRoleByNameError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_role_by_name_ambiguous(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    role_directory
        .create_role(&Role::test("role-1", "Admin"))
        .await
        .unwrap();
    role_directory
        .create_role(&Role::test("role-2", "ADMIN"))
        .await
        .unwrap();

    let result = role_directory.find_role_by_name("admin").await;
    match result {
        Err(FindRoleByNameError::Ambiguous(e)) => assert_eq!(e.matches, 2),
        _ => panic!("expected ambiguous role lookup to fail"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_update_role_persists_changes(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let mut role = Role::test("role-admin", "Admin");
    role_directory.create_role(&role).await.unwrap();

    role.name = "Administrator".to_string();
    role_directory.update_role(&role).await.unwrap();

    let stored = role_directory.get_role_by_id(&role.id).await.unwrap();
    assert_eq!(stored.name, "Administrator");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_role_name_persists_immediately(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let mut role = Role::test("role-admin", "Admin");
    role_directory.create_role(&role).await.unwrap();

    role_directory
        .set_role_name(&mut role, "Administrator")
        .await
        .unwrap();

    assert_eq!(role.name, "Administrator");

    let stored = role_directory.get_role_by_id(&role.id).await.unwrap();
    assert_eq!(stored.name, "Administrator");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_normalized_role_name_is_noop(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let mut role = Role::test("role-admin", "Admin");
    role_directory.create_role(&role).await.unwrap();

    role_directory.set_normalized_role_name(&mut role, "ADMIN");

    assert_eq!(role.name, "Admin");

    let stored = role_directory.get_role_by_id(&role.id).await.unwrap();
    assert_eq!(stored.name, "Admin");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_role_accessors(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let role = Role::test("role-admin", "Admin");

    assert_eq!(role_directory.role_id(&role), RoleID::new("role-admin"));
    assert_eq!(role_directory.role_name(&role), "Admin");
    assert_eq!(role_directory.normalized_role_name(&role), "Admin");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_delete_role(catalog: &Catalog) {
    let role_directory = catalog.get_one::<dyn RoleDirectory>().unwrap();

    let role = Role::test("role-admin", "Admin");

    // Not stored yet: zero rows affected is a failure
    let result = role_directory.delete_role(&role).await;
    match result {
        Err(DeleteRoleError::UnexpectedRowCount(e)) => assert_eq!(e.affected, 0),
        _ => panic!("expected delete of an absent role to fail"),
    }

    role_directory.create_role(&role).await.unwrap();
    role_directory.delete_role(&role).await.unwrap();

    let result = role_directory.get_role_by_id(&role.id).await;
    assert!(matches!(result, Err(GetRoleByIdError::NotFound(_))));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
