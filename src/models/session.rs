use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle for a player identity issued by the game server.
/// The gateway never resolves it, only carries it for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque handle for the game-server session context a player belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerSessionId(String);

impl ServerSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One player's active connection session.
///
/// Fields are private so the lifecycle invariants hold: `join_time` and
/// `session_token` never change, `spawn_time` is set at most once, and
/// `active` only ever goes from `true` to `false`.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    player: PlayerId,
    server_session: ServerSessionId,
    join_time: DateTime<Utc>,
    spawn_time: Option<DateTime<Utc>>,
    active: bool,
    session_token: Uuid,
}

impl SessionRecord {
    /// Creates a record for a player that just joined: join time is now,
    /// no spawn yet, and a freshly generated session token.
    pub fn new(player: PlayerId, server_session: ServerSessionId) -> Self {
        Self {
            player,
            server_session,
            join_time: Utc::now(),
            spawn_time: None,
            active: true,
            session_token: Uuid::new_v4(),
        }
    }

    /// Records the in-world spawn event. The first call sets the spawn
    /// timestamp; later calls are ignored. Returns whether this call
    /// performed the transition.
    pub fn on_spawn(&mut self) -> bool {
        if self.spawn_time.is_some() {
            return false;
        }
        self.spawn_time = Some(Utc::now());
        true
    }

    /// Marks the session as ended. Idempotent; returns whether this call
    /// performed the transition.
    pub fn end(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn server_session(&self) -> &ServerSessionId {
        &self.server_session
    }

    pub fn join_time(&self) -> DateTime<Utc> {
        self.join_time
    }

    pub fn spawn_time(&self) -> Option<DateTime<Utc>> {
        self.spawn_time
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session_token(&self) -> Uuid {
        self.session_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord::new(
            PlayerId::new("STEAM_0:1:12345"),
            ServerSessionId::new("srv-1"),
        )
    }

    #[test]
    fn new_record_is_active_and_unspawned() {
        let record = record();
        assert!(record.is_active());
        assert!(record.spawn_time().is_none());
        assert!(!record.session_token().is_nil());
    }

    #[test]
    fn tokens_are_unique_across_records() {
        let tokens: std::collections::HashSet<Uuid> =
            (0..100).map(|_| record().session_token()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn spawn_sets_timestamp_after_join() {
        let mut record = record();
        assert!(record.on_spawn());
        let spawn = record.spawn_time().unwrap();
        assert!(record.join_time() <= spawn);
    }

    #[test]
    fn second_spawn_is_ignored() {
        let mut record = record();
        assert!(record.on_spawn());
        let first = record.spawn_time();
        assert!(!record.on_spawn());
        assert_eq!(record.spawn_time(), first);
    }

    #[test]
    fn end_is_monotonic() {
        let mut record = record();
        assert!(record.end());
        assert!(!record.is_active());
        assert!(!record.end());
        assert!(!record.is_active());
    }

    #[test]
    fn token_is_stable_across_transitions() {
        let mut record = record();
        let token = record.session_token();
        record.on_spawn();
        record.end();
        assert_eq!(record.session_token(), token);
    }
}
