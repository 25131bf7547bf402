// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod account;
mod ids;
mod predefined_roles_config;
mod role;

pub use account::*;
pub use ids::*;
pub use predefined_roles_config::*;
pub use role::*;
