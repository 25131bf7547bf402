// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{AccountID, RoleID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The email doubles as both display name and login identifier: accounts
/// carry no separate username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountID,
    pub email: String,
    /// Opaque hash blob produced by the caller. `None` means no password set.
    pub password_hash: Option<String>,
    /// Absent and `false` are treated identically as "not confirmed".
    pub email_confirmed: Option<bool>,
    /// At most one role per account. May dangle after the role is deleted.
    pub role_id: Option<RoleID>,
}

impl Account {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: AccountID::new_generated(),
            email: email.into(),
            password_hash: None,
            email_confirmed: None,
            role_id: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(any(feature = "testing", test))]
impl Account {
    pub fn test(id: &str, email: &str) -> Self {
        Self {
            id: AccountID::new(id),
            email: email.to_string(),
            password_hash: None,
            email_confirmed: None,
            role_id: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
