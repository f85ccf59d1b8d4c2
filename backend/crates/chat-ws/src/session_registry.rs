use crate::ConnectionId;

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

/// Session id to the connections currently bound to it.
/// Entries exist only while non-empty.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, HashSet<ConnectionId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the connection was already present.
    pub fn insert(&mut self, session_id: Uuid, connection_id: ConnectionId) -> bool {
        self.sessions
            .entry(session_id)
            .or_default()
            .insert(connection_id)
    }

    /// Returns false if the connection was not present.
    pub fn remove(&mut self, session_id: Uuid, connection_id: ConnectionId) -> bool {
        let Some(members) = self.sessions.get_mut(&session_id) else {
            return false;
        };

        let removed = members.remove(&connection_id);
        if members.is_empty() {
            self.sessions.remove(&session_id);
        }
        removed
    }

    /// Snapshot of a session's members; empty for an unknown session.
    pub fn members(&self, session_id: Uuid) -> Vec<ConnectionId> {
        self.sessions
            .get(&session_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, session_id: Uuid, connection_id: ConnectionId) -> bool {
        self.sessions
            .get(&session_id)
            .is_some_and(|members| members.contains(&connection_id))
    }

    pub fn session_size(&self, session_id: Uuid) -> usize {
        self.sessions.get(&session_id).map_or(0, HashSet::len)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
