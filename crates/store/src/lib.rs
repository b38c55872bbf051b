//! Session persistence.
//!
//! Stores the whole [`GameSession`] snapshot as pretty-printed JSON after each
//! committed transition, and restores it at startup. A missing, unreadable or
//! invalid file is never fatal: [`SessionStore::load_or_default`] falls back
//! to a fresh, not-started session.

pub mod error;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use madani_core::{GameSession, SessionSnapshot, SNAPSHOT_VERSION};

pub use error::StoreError;

/// Serialize a session to the on-disk JSON form.
pub fn encode_session(session: &GameSession) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&session.snapshot())?)
}

/// Parse and validate the on-disk JSON form.
pub fn decode_session(json: &str) -> Result<GameSession, StoreError> {
    let snapshot: SessionSnapshot = serde_json::from_str(json)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StoreError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(GameSession::from_snapshot(snapshot)?)
}

/// File-backed snapshot store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the session, replacing any previous file atomically.
    pub fn save(&self, session: &GameSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = encode_session(session)?;

        // Write to temp file, then rename over the target.
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;

        log::debug!("saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }

    /// Read the stored session. `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<GameSession>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        decode_session(&json).map(Some)
    }

    /// Read the stored session, falling back to a fresh one on any failure.
    pub fn load_or_default(&self) -> GameSession {
        match self.load() {
            Ok(Some(session)) => {
                log::info!(
                    "restored session from {:?} ({} rounds)",
                    self.path,
                    session.rounds().len()
                );
                session
            }
            Ok(None) => {
                log::info!("no saved session at {:?}, starting fresh", self.path);
                GameSession::new()
            }
            Err(e) => {
                log::warn!(
                    "failed to load saved session from {:?}: {}; starting fresh",
                    self.path,
                    e
                );
                GameSession::new()
            }
        }
    }
}
