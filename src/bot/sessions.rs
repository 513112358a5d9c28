//! Per-user form sessions.
//!
//! Each Discord user has at most one open [`FormSession`]. The store hands out shared
//! handles so a command can release the map while it works on one user's session.

use crate::{
    core::session::FormSession,
    errors::{Error, Result},
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, trace};

/// Handle to one user's session.
pub type SharedSession = Arc<Mutex<FormSession>>;

/// Open sessions keyed by Discord user ID.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SharedSession>>>,
}

impl SessionStore {
    /// Opens a session for a user, replacing any previous one.
    pub async fn open(&self, user_id: &str, session: FormSession) -> SharedSession {
        let shared = Arc::new(Mutex::new(session));
        let mut sessions = self.inner.write().await;
        if sessions
            .insert(user_id.to_string(), Arc::clone(&shared))
            .is_some()
        {
            info!("Replaced existing session for user {}", user_id);
        }
        trace!("{} open sessions", sessions.len());
        shared
    }

    /// The session of a user who has logged in.
    pub async fn get(&self, user_id: &str) -> Result<SharedSession> {
        self.inner
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or(Error::NotLoggedIn)
    }

    /// Number of open sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether no sessions are open.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
