use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Session file name in the state directory
const SESSION_FILE: &str = "session.json";

/// The process-wide authentication state.
///
/// `user` and `access_token` are set and cleared together; `refresh_token`
/// may outlive the access token it was issued with. `is_loading` is true
/// until the initial restore from disk has completed and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            access_token: None,
            refresh_token: None,
            is_loading: true,
        }
    }
}

impl Session {
    /// True iff both the user and the access token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }
}

/// On-disk shape of a session. The loading flag deliberately has no field
/// here; a restored session always starts settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Durable storage for the session under the application state directory.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            path: state_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the persisted session, if any. A missing file is not an error;
    /// an unreadable or unparsable one is.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let persisted: PersistedSession = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;
        Ok(Some(Session {
            user: persisted.user,
            access_token: persisted.access_token,
            refresh_token: persisted.refresh_token,
            is_loading: false,
        }))
    }

    /// Save the session to disk with restricted permissions (0600).
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let persisted = PersistedSession {
            user: session.user.clone(),
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        };
        let contents =
            serde_json::to_string_pretty(&persisted).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Remove the persisted session. Safe to call when nothing is stored.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}
