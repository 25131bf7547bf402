// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;
use std::hash::Hash;
use std::pin::Pin;

use futures::Stream;
use internal_error::InternalError;
use thiserror::Error;

use crate::{Account, AccountID, Role, RoleID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Anything the gateway can persist: a row type with a primary key.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Display + Send + Sync + 'static;

    const KIND: &'static str;

    fn entity_id(&self) -> &Self::Id;
}

impl Entity for Account {
    type Id = AccountID;

    const KIND: &'static str = "account";

    fn entity_id(&self) -> &AccountID {
        &self.id
    }
}

impl Entity for Role {
    type Id = RoleID;

    const KIND: &'static str = "role";

    fn entity_id(&self) -> &RoleID {
        &self.id
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type EntityStream<'a, E> = Pin<Box<dyn Stream<Item = Result<E, InternalError>> + Send + 'a>>;

pub type EntityPredicate<E> = Box<dyn Fn(&E) -> bool + Send>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Transactional store seam the directories are built over. Mutations are
/// staged and become visible only on [`PersistenceGateway::save_changes`].
///
/// Cancellation is by dropping the returned future: a `save_changes` future
/// dropped before it resolves must leave the committed state untouched, which
/// the store guarantees through its own atomicity.
#[async_trait::async_trait]
pub trait PersistenceGateway<E: Entity>: Send + Sync {
    /// Stages an insert.
    fn add(&self, entity: E);

    /// Stages an update of an existing row, replacing it wholesale.
    fn mark_modified(&self, entity: E);

    /// Stages a removal. Removing an absent row is not an error, it just
    /// does not count as an affected row on commit.
    fn remove(&self, entity: E);

    /// Commits all staged mutations in one transaction and returns the
    /// number of affected rows.
    async fn save_changes(&self) -> Result<usize, SaveChangesError>;

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, InternalError>;

    /// Lazy scan of committed rows matching the predicate.
    async fn query(&self, predicate: EntityPredicate<E>) -> EntityStream<'_, E>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveChangesError {
    #[error(transparent)]
    ConstraintViolation(ConstraintViolationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Storage constraint violated for {entity_kind} '{key}'")]
pub struct ConstraintViolationError {
    pub entity_kind: &'static str,
    pub key: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
