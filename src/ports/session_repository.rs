//! Session repository port.
//!
//! Defines the contract for persisting and retrieving sessions. The cleanup
//! job relies on `find_before` + `delete_many` being served by the same
//! backend so a batch delete covers exactly the ids the query returned.

use async_trait::async_trait;

use crate::domain::foundation::{RepositoryError, SessionId, Timestamp};
use crate::domain::session::Session;

/// Repository port for session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch a session by id.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if no session has this id
    /// - `RepositoryError::Backend` on persistence failure
    async fn get(&self, id: &SessionId) -> Result<Session, RepositoryError>;

    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Backend` if the id is already taken or on
    ///   persistence failure
    async fn save(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Replace an existing session.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the session doesn't exist
    async fn update(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Find all sessions created before the given cutoff.
    async fn find_before(&self, cutoff: Timestamp) -> Result<Vec<Session>, RepositoryError>;

    /// Delete the given sessions in one batch. Ids that don't exist are
    /// skipped; returns the number of records actually removed.
    async fn delete_many(&self, ids: &[SessionId]) -> Result<u64, RepositoryError>;
}
