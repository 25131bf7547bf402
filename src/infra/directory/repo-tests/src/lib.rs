// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod account_directory_test_suite;
mod role_directory_test_suite;

pub use account_directory_test_suite::*;
pub use role_directory_test_suite::*;
