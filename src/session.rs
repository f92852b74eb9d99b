//! Authenticated session state, injected into the client and controllers.
//!
//! Only the access token and the selected professional survive a restart; the
//! user, roles and permissions are refreshed by the next login.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::job_board::Professional;
use crate::domain::types::RecordId;
use crate::domain::user::{Permission, Role, User};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted session data: {0}")]
    Corrupted(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub professional: Option<Professional>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_role(&self, code: &str) -> bool {
        self.roles.iter().any(|role| role.code == code)
    }
}

/// The part of a [`Session`] written to durable storage.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub professional: Option<Professional>,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            professional: session.professional.clone(),
        }
    }
}

impl From<PersistedSession> for Session {
    fn from(persisted: PersistedSession) -> Self {
        Self {
            token: persisted.token,
            professional: persisted.professional,
            ..Self::default()
        }
    }
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<PersistedSession, SessionError>;
    fn save(&self, session: &PersistedSession) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Stores the persisted session as a JSON file.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<PersistedSession, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(PersistedSession::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    stored: Mutex<Option<PersistedSession>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<PersistedSession, SessionError> {
        let stored = self.stored.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(stored.clone().unwrap_or_default())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError> {
        *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Shared handle to the current session.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle(Arc<RwLock<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(RwLock::new(session)))
    }

    /// Builds a handle from whatever the store persisted.
    pub fn restore(store: &dyn SessionStore) -> Result<Self, SessionError> {
        Ok(Self::new(store.load()?.into()))
    }

    pub fn snapshot(&self) -> Session {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn token(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn professional_id(&self) -> Option<RecordId> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .professional
            .as_ref()
            .and_then(|p| p.id)
    }

    pub fn replace(&self, session: Session) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    pub fn clear(&self) {
        self.replace(Session::default());
    }
}
