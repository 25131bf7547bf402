// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Role names that should exist in the store before the identity framework
/// starts serving requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PredefinedRolesConfig {
    #[serde(default)]
    pub predefined: Vec<RoleConfig>,
}

impl PredefinedRolesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(name: impl Into<String>) -> Self {
        Self {
            predefined: vec![RoleConfig { name: name.into() }],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RoleConfig {
    pub name: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
