//! Single source of truth for the session.
//!
//! The store owns the `Session` and is the only place it is mutated.
//! State lives inside a `tokio::sync::watch` channel: `snapshot()` is a
//! cheap synchronous read (usable from request interceptors), every
//! mutation is atomic with respect to readers, and subscribers observe
//! each change in order.
//!
//! Every mutation except `set_loading` is mirrored to the session file so
//! a restart resumes the session without re-login. Persistence failures
//! are logged, never surfaced to the mutating caller.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::User;

use super::session::{Session, SessionFile};

pub struct SessionStore {
    state: watch::Sender<Session>,
    file: Option<SessionFile>,
}

impl SessionStore {
    /// Create a store backed by the given session file.
    /// The store starts loading until `restore` has run.
    pub fn new(file: SessionFile) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            state,
            file: Some(file),
        }
    }

    /// Create a store with no durable backing. Used by tests and
    /// ephemeral sessions.
    pub fn in_memory() -> Self {
        let (state, _) = watch::channel(Session::default());
        Self { state, file: None }
    }

    /// Current session snapshot. Synchronous, no side effects.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Watch for session changes. The receiver yields the full snapshot
    /// after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Hydrate from the session file. Returns true when a persisted
    /// session was restored. Always settles the loading flag, including
    /// when nothing was stored or the file was unreadable.
    pub fn restore(&self) -> bool {
        let restored = match self.file.as_ref().map(|f| f.load()) {
            Some(Ok(Some(session))) => {
                debug!(
                    authenticated = session.is_authenticated(),
                    "Restored session from disk"
                );
                self.state.send_replace(session);
                true
            }
            Some(Ok(None)) => false,
            Some(Err(e)) => {
                warn!(error = %e, "Failed to restore session, starting logged out");
                false
            }
            None => false,
        };
        self.set_loading(false);
        restored
    }

    /// Establish a fully authenticated session.
    pub fn login(&self, user: User, access_token: String, refresh_token: String) {
        self.state.send_modify(|s| {
            s.user = Some(user);
            s.access_token = Some(access_token);
            s.refresh_token = Some(refresh_token);
        });
        self.persist();
    }

    /// Overwrite both tokens, leaving the user untouched. Used after a
    /// refresh rotates the pair.
    pub fn set_tokens(&self, access_token: String, refresh_token: String) {
        self.state.send_modify(|s| {
            s.access_token = Some(access_token);
            s.refresh_token = Some(refresh_token);
        });
        self.persist();
    }

    /// Replace the user only, e.g. after a profile edit. Callers must
    /// ensure a session exists.
    pub fn set_user(&self, user: User) {
        self.state.send_modify(|s| {
            s.user = Some(user);
        });
        self.persist();
    }

    /// Clear the session. Idempotent: calling it while logged out leaves
    /// the session unchanged.
    pub fn logout(&self) {
        self.state.send_modify(|s| {
            s.user = None;
            s.access_token = None;
            s.refresh_token = None;
        });
        if let Some(file) = &self.file {
            if let Err(e) = file.clear() {
                warn!(error = %e, "Failed to remove session file");
            }
        }
    }

    /// Toggle the startup loading flag. Not persisted.
    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| {
            s.is_loading = loading;
        });
    }

    fn persist(&self) {
        if let Some(file) = &self.file {
            if let Err(e) = file.save(&self.snapshot()) {
                warn!(error = %e, "Failed to persist session");
            }
        }
    }
}
