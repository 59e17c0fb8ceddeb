//! In-memory session store.
//!
//! Sessions live only for the duration of a conversation and are keyed by
//! chat id. There is deliberately no persistence: a restart simply asks
//! users to `/start` again.

use crate::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared map of active sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<i64, Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session, if any.
    pub async fn get(&self, chat_id: i64) -> Option<Session> {
        self.sessions.lock().await.get(&chat_id).cloned()
    }

    /// Create or overwrite the session with a fresh pre-greeting one.
    ///
    /// Idempotent: resetting an absent session and resetting an active one
    /// leave the store in the same state.
    pub async fn reset(&self, chat_id: i64) -> Session {
        let session = Session::new(chat_id);
        self.sessions
            .lock()
            .await
            .insert(chat_id, session.clone());
        session
    }

    /// Remove the session. Absence afterwards means "not in conversation".
    pub async fn remove(&self, chat_id: i64) {
        self.sessions.lock().await.remove(&chat_id);
    }

    /// Mutate the session in place, returning the updated snapshot.
    ///
    /// Returns `None` when there is no session for the chat (e.g. removed by
    /// a concurrent `/cancel`).
    pub async fn update<F>(&self, chat_id: i64, f: F) -> Option<Session>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&chat_id)?;
        f(session);
        Some(session.clone())
    }
}
