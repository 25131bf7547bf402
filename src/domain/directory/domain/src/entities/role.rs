// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::RoleID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Role names are unique by case-insensitive comparison. The store does not
/// enforce this at write time; lookups check it and report ambiguity instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleID,
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoleID::new_generated(),
            name: name.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(any(feature = "testing", test))]
impl Role {
    pub fn test(id: &str, name: &str) -> Self {
        Self {
            id: RoleID::new(id),
            name: name.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
