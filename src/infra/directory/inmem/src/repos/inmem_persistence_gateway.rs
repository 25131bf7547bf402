// Copyright idstore contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dill::*;
use internal_error::InternalError;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Holds the accounts and roles tables behind one lock and plays the role of
/// the shared transactional store: mutations are staged per table and become
/// visible only when `save_changes` commits them.
pub struct InMemoryPersistenceGateway {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    accounts: Table<Account>,
    roles: Table<Role>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

enum StagedOp<E> {
    Insert(E),
    Update(E),
    Remove(E),
}

struct Table<E: Entity> {
    rows: HashMap<E::Id, E>,
    staged: Vec<StagedOp<E>>,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            staged: Vec::new(),
        }
    }
}

impl<E: Entity> Table<E> {
    fn stage(&mut self, op: StagedOp<E>) {
        self.staged.push(op);
    }

    /// Applies staged operations to a scratch copy and swaps it in on
    /// success, so a failed or abandoned commit leaves nothing half-applied.
    fn commit(&mut self) -> Result<usize, SaveChangesError> {
        let mut next = self.rows.clone();
        let mut affected = 0;

        for op in self.staged.drain(..) {
            match op {
                StagedOp::Insert(entity) => {
                    let id = entity.entity_id().clone();
                    if next.contains_key(&id) {
                        return Err(SaveChangesError::ConstraintViolation(
                            ConstraintViolationError {
                                entity_kind: E::KIND,
                                key: id.to_string(),
                            },
                        ));
                    }
                    next.insert(id, entity);
                    affected += 1;
                }
                StagedOp::Update(entity) => {
                    let id = entity.entity_id().clone();
                    if !next.contains_key(&id) {
                        InternalError::bail::<()>(format!(
                            "Update affected 0 rows for {} '{id}'",
                            E::KIND
                        ))?;
                    }
                    next.insert(id, entity);
                    affected += 1;
                }
                StagedOp::Remove(entity) => {
                    if next.remove(entity.entity_id()).is_some() {
                        affected += 1;
                    }
                }
            }
        }

        self.rows = next;
        Ok(affected)
    }

    fn get(&self, id: &E::Id) -> Option<E> {
        self.rows.get(id).cloned()
    }

    fn select(&self, predicate: &EntityPredicate<E>) -> Vec<E> {
        self.rows
            .values()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn PersistenceGateway<Account>)]
#[interface(dyn PersistenceGateway<Role>)]
#[scope(Singleton)]
impl InMemoryPersistenceGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl PersistenceGateway<Account> for InMemoryPersistenceGateway {
    fn add(&self, entity: Account) {
        let mut guard = self.state.lock().unwrap();
        guard.accounts.stage(StagedOp::Insert(entity));
    }

    fn mark_modified(&self, entity: Account) {
        let mut guard = self.state.lock().unwrap();
        guard.accounts.stage(StagedOp::Update(entity));
    }

    fn remove(&self, entity: Account) {
        let mut guard = self.state.lock().unwrap();
        guard.accounts.stage(StagedOp::Remove(entity));
    }

    async fn save_changes(&self) -> Result<usize, SaveChangesError> {
        let mut guard = self.state.lock().unwrap();
        guard.accounts.commit()
    }

    async fn find_by_id(&self, id: &AccountID) -> Result<Option<Account>, InternalError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.accounts.get(id))
    }

    async fn query(&self, predicate: EntityPredicate<Account>) -> EntityStream<'_, Account> {
        let matches: Vec<_> = {
            let guard = self.state.lock().unwrap();
            guard.accounts.select(&predicate).into_iter().map(Ok).collect()
        };
        Box::pin(futures::stream::iter(matches))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl PersistenceGateway<Role> for InMemoryPersistenceGateway {
    fn add(&self, entity: Role) {
        let mut guard = self.state.lock().unwrap();
        guard.roles.stage(StagedOp::Insert(entity));
    }

    fn mark_modified(&self, entity: Role) {
        let mut guard = self.state.lock().unwrap();
        guard.roles.stage(StagedOp::Update(entity));
    }

    fn remove(&self, entity: Role) {
        let mut guard = self.state.lock().unwrap();
        guard.roles.stage(StagedOp::Remove(entity));
    }

    async fn save_changes(&self) -> Result<usize, SaveChangesError> {
        let mut guard = self.state.lock().unwrap();
        guard.roles.commit()
    }

    async fn find_by_id(&self, id: &RoleID) -> Result<Option<Role>, InternalError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.roles.get(id))
    }

    async fn query(&self, predicate: EntityPredicate<Role>) -> EntityStream<'_, Role> {
        let matches: Vec<_> = {
            let guard = self.state.lock().unwrap();
            guard.roles.select(&predicate).into_iter().map(Ok).collect()
        };
        Box::pin(futures::stream::iter(matches))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
