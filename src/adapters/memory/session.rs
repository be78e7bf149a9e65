//! In-memory session repository.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{RepositoryError, SessionId, Timestamp};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

use super::SessionMap;

/// Process-local session store over a lock-guarded map.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; a poisoned lock means a
/// writer already panicked and the store is unrecoverable.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: SessionMap,
}

impl InMemorySessionRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Handle to the underlying map, for pairing an attachment repository
    /// with this store.
    pub(crate) fn map(&self) -> SessionMap {
        Arc::clone(&self.sessions)
    }

    /// Number of stored sessions (for test assertions).
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .len()
    }

    /// True if a session with the given id is stored (for test assertions).
    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .contains_key(id)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &SessionId) -> Result<Session, RepositoryError> {
        self.sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self
            .sessions
            .write()
            .expect("InMemorySessionRepository: lock poisoned");
        if sessions.contains_key(session.id()) {
            return Err(RepositoryError::backend(format!(
                "session id already taken: {}",
                session.id()
            )));
        }
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self
            .sessions
            .write()
            .expect("InMemorySessionRepository: lock poisoned");
        if !sessions.contains_key(session.id()) {
            return Err(RepositoryError::NotFound);
        }
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn find_before(&self, cutoff: Timestamp) -> Result<Vec<Session>, RepositoryError> {
        Ok(self
            .sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .values()
            .filter(|s| s.expired_by(&cutoff))
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[SessionId]) -> Result<u64, RepositoryError> {
        let mut sessions = self
            .sessions
            .write()
            .expect("InMemorySessionRepository: lock poisoned");
        let mut removed = 0;
        for id in ids {
            if sessions.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
