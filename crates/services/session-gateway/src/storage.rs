//! Session persistence between runs.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use domain::Session;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Where the gateway keeps the session across restarts.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Stored session, if any. Unreadable data counts as none.
    async fn load(&self) -> io::Result<Option<Session>>;

    async fn save(&self, session: &Session) -> io::Result<()>;

    /// Remove the stored session; succeeds when nothing is stored
    async fn clear(&self) -> io::Result<()>;
}

/// JSON file storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn load(&self) -> io::Result<Option<Session>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), "Ignoring unreadable session file: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session).map_err(io::Error::other)?;

        // Holds the refresh token: owner-only on unix
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
        }
        file.write_all(&json).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    session: Mutex<Option<Session>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `session`
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self) -> io::Result<Option<Session>> {
        Ok(self.slot().clone())
    }

    async fn save(&self, session: &Session) -> io::Result<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> io::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
