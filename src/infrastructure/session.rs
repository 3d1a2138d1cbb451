//! Session file housekeeping.
//!
//! The client library owns the session contents; this module only removes
//! the file (and its journal) on request or once it is too old.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::domain::{AppError, Result};

/// Outcome of an explicit session clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// No session file existed.
    NotFound,
    /// Session and journal were removed.
    Cleared,
}

/// Handle to the on-disk session file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
    ttl: Duration,
}

impl SessionFile {
    #[must_use]
    pub fn new(path: PathBuf, ttl_days: u32) -> Self {
        Self {
            path,
            ttl: Duration::days(i64::from(ttl_days)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the journal sqlite keeps next to the session.
    #[must_use]
    pub fn journal_path(&self) -> PathBuf {
        self.path.with_extension("session-journal")
    }

    /// Creates the session directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create session directory", e))?;
        }
        Ok(())
    }

    /// Whether the session exists and is older than the TTL at `now`.
    ///
    /// # Errors
    /// Returns error if the file metadata cannot be read.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| AppError::io("Failed to read session metadata", e))?;

        Ok(expired(DateTime::<Utc>::from(modified), now, self.ttl))
    }

    /// Removes the session if it has outlived its TTL.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    /// Returns error if the files cannot be inspected or removed.
    pub fn cleanup_if_expired(&self) -> Result<bool> {
        if !self.is_expired_at(Utc::now())? {
            return Ok(false);
        }

        tracing::info!(
            path = %self.path.display(),
            "Removing expired session file (older than {} days)",
            self.ttl.num_days()
        );
        self.remove_files()?;
        Ok(true)
    }

    /// Removes the session unconditionally.
    ///
    /// # Errors
    /// Returns error if the files cannot be removed.
    pub fn clear(&self) -> Result<ClearOutcome> {
        if !self.path.exists() {
            return Ok(ClearOutcome::NotFound);
        }

        self.remove_files()?;
        tracing::info!(path = %self.path.display(), "Session cleared");
        Ok(ClearOutcome::Cleared)
    }

    fn remove_files(&self) -> Result<()> {
        for path in [self.path.clone(), self.journal_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::io(
                        format!("Failed to remove {}", path.display()),
                        e,
                    ))
                }
            }
        }
        Ok(())
    }
}

fn expired(modified: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - modified > ttl
}
