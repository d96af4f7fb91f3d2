//! Process-local repositories.
//!
//! Rows live behind a tokio `RwLock`, so writes are serialized the way a
//! database transaction would serialize them. Identifiers are assigned
//! sequentially from 1. Saving or deleting a row that vanished after it was
//! loaded reports [`RepositoryError::Conflict`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{Repository, RepositoryError, UserRepository};
use crate::domain::{Advice, Resource, User};

/// Rows that carry a uniqueness constraint.
pub trait UniqueKey: Resource {
    /// Constrained field name and its normalized value.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

impl UniqueKey for Advice {}

impl UniqueKey for User {
    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("email", self.email().to_ascii_lowercase()))
    }
}

struct Table<E: Resource> {
    next_id: i64,
    rows: BTreeMap<E::Id, E>,
}

impl<E: Resource> Default for Table<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// In-memory store for one resource kind.
pub struct InMemoryRepository<E: Resource> {
    table: RwLock<Table<E>>,
    available: AtomicBool,
}

/// In-memory advice store.
pub type InMemoryAdviceRepository = InMemoryRepository<Advice>;
/// In-memory user store with email uniqueness.
pub type InMemoryUserRepository = InMemoryRepository<User>;

impl<E: Resource> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl<E: Resource> InMemoryRepository<E> {
    /// Simulate the store going away or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Every stored row in identifier order.
    pub async fn snapshot(&self) -> Vec<E> {
        self.table.read().await.rows.values().cloned().collect()
    }

    fn ensure_available(&self) -> Result<(), RepositoryError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::connection(format!(
                "{} store is offline",
                E::KIND
            )))
        }
    }
}

fn vanished<E: Resource>(id: E::Id) -> RepositoryError {
    RepositoryError::conflict(format!("{} {id} no longer exists", E::KIND))
}

#[async_trait]
impl<E: UniqueKey> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        self.ensure_available()?;
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, entity: E) -> Result<E, RepositoryError> {
        self.ensure_available()?;
        let mut table = self.table.write().await;
        if let Some((field, value)) = entity.unique_key() {
            let taken = table.rows.values().any(|row| {
                row.id() != entity.id()
                    && row.unique_key().is_some_and(|(_, other)| other == value)
            });
            if taken {
                return Err(RepositoryError::unique_violation(field));
            }
        }
        let id = match entity.id() {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(id) => return Err(vanished::<E>(id)),
            None => {
                let id = E::Id::from(table.next_id);
                table.next_id += 1;
                id
            }
        };
        let stored = entity.with_id(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: E::Id) -> Result<(), RepositoryError> {
        self.ensure_available()?;
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| vanished::<E>(id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.ensure_available()?;
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|user| user.email().eq_ignore_ascii_case(email))
            .cloned())
    }
}
