use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use uuid::Uuid;

use crate::models::SessionRecord;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// A v4 collision should be effectively impossible, but the registry
    /// still refuses to silently replace a live session.
    #[error("session token {0} is already registered")]
    DuplicateToken(Uuid),
}

/// Process-scoped store of active sessions, keyed by session token.
///
/// Created once at startup and shared through `AppState`. All mutation goes
/// through these methods; callers get snapshots back, never references into
/// the map. No method awaits while holding the lock.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its session token.
    pub fn register(&self, record: SessionRecord) -> Result<(), RegistryError> {
        let token = record.session_token();
        let mut sessions = self.sessions.write().unwrap();
        if sessions.contains_key(&token) {
            return Err(RegistryError::DuplicateToken(token));
        }
        sessions.insert(token, record);
        tracing::info!(%token, "session registered");
        Ok(())
    }

    /// Returns a snapshot of the record for this token, if registered.
    pub fn lookup(&self, token: &Uuid) -> Option<SessionRecord> {
        self.sessions.read().unwrap().get(token).cloned()
    }

    /// Removes the record for this token. Removing an absent token is a
    /// no-op, not an error.
    pub fn remove(&self, token: &Uuid) {
        if self.sessions.write().unwrap().remove(token).is_some() {
            tracing::info!(%token, "session removed");
        }
    }

    /// Applies the spawn transition to the stored record and returns the
    /// updated snapshot. `None` if the token is not registered.
    pub fn mark_spawned(&self, token: &Uuid) -> Option<SessionRecord> {
        let mut sessions = self.sessions.write().unwrap();
        let record = sessions.get_mut(token)?;
        if record.on_spawn() {
            tracing::info!(%token, player = record.player().as_str(), "player spawned");
        }
        Some(record.clone())
    }

    /// Ends a session: marks it inactive, then evicts it. Returns the final
    /// snapshot, or `None` if the token was not registered (still a no-op,
    /// matching `remove`).
    pub fn end(&self, token: &Uuid) -> Option<SessionRecord> {
        let mut sessions = self.sessions.write().unwrap();
        let mut record = sessions.remove(token)?;
        record.end();
        tracing::info!(%token, player = record.player().as_str(), "session ended");
        Some(record)
    }

    /// Lists snapshots of every registered session.
    pub fn all(&self) -> Vec<SessionRecord> {
        self.sessions.read().unwrap().values().cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap()
            .values()
            .filter(|record| record.is_active())
            .count()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, ServerSessionId};

    fn record() -> SessionRecord {
        SessionRecord::new(PlayerId::new("player-1"), ServerSessionId::new("srv-1"))
    }

    #[test]
    fn register_then_lookup_returns_snapshot() {
        let registry = SessionRegistry::new();
        let record = record();
        let token = record.session_token();
        registry.register(record).unwrap();

        let found = registry.lookup(&token).unwrap();
        assert_eq!(found.session_token(), token);
        assert!(found.is_active());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_token_is_rejected() {
        let registry = SessionRegistry::new();
        let record = record();
        let copy = record.clone();
        registry.register(record).unwrap();

        let err = registry.register(copy).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateToken(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_of_unknown_token_is_none() {
        let registry = SessionRegistry::new();
        assert!(registry.lookup(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = SessionRegistry::new();
        let record = record();
        let token = record.session_token();
        registry.register(record).unwrap();

        registry.remove(&token);
        assert!(registry.lookup(&token).is_none());
        // Absent token: no-op, no panic.
        registry.remove(&token);
        assert!(registry.is_empty());
    }

    #[test]
    fn mark_spawned_updates_stored_record() {
        let registry = SessionRegistry::new();
        let record = record();
        let token = record.session_token();
        registry.register(record).unwrap();

        let spawned = registry.mark_spawned(&token).unwrap();
        assert!(spawned.spawn_time().is_some());

        // Second spawn keeps the original timestamp.
        let again = registry.mark_spawned(&token).unwrap();
        assert_eq!(again.spawn_time(), spawned.spawn_time());
    }

    #[test]
    fn end_marks_inactive_and_evicts() {
        let registry = SessionRegistry::new();
        let record = record();
        let token = record.session_token();
        registry.register(record).unwrap();

        let ended = registry.end(&token).unwrap();
        assert!(!ended.is_active());
        assert!(registry.lookup(&token).is_none());
        assert!(registry.end(&token).is_none());
    }

    #[test]
    fn active_count_excludes_nothing_until_sessions_end() {
        let registry = SessionRegistry::new();
        let a = record();
        let b = record();
        let token = a.session_token();
        registry.register(a).unwrap();
        registry.register(b).unwrap();
        assert_eq!(registry.active_count(), 2);

        registry.end(&token);
        assert_eq!(registry.active_count(), 1);
    }
}
