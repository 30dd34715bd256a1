// ABOUTME: File-backed persistent store for trip watches serialized as a JSON array
// ABOUTME: Whole-file read-modify-write with appends serialized behind a single writer lock
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Trip-watch persistence.
//!
//! The store is a single JSON array file, read and fully rewritten on every
//! mutation. A lock serializes every access within the process, so a
//! confirmation landing mid-poll cannot observe or produce a torn file.
//! Cross-process access is not guarded.

use crate::errors::{AppError, AppResult};
use crate::models::TripWatch;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// File-backed trip-watch store shared by the dialog engine and the poller
pub struct WatchStore {
    path: PathBuf,
    access: Mutex<()>,
}

impl WatchStore {
    /// Create a store over the given file path; the file itself is created
    /// lazily on first access
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            access: Mutex::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every persisted watch.
    ///
    /// A missing file is created as an empty store and yields the empty set.
    ///
    /// # Errors
    ///
    /// Returns a store error if the file exists but does not parse as a JSON
    /// array of watches, or an I/O error if it cannot be read or created.
    pub async fn load(&self) -> AppResult<Vec<TripWatch>> {
        let _guard = self.access.lock().await;
        self.read_unlocked().await
    }

    /// Append one watch: load the entire store, push, overwrite.
    ///
    /// # Errors
    ///
    /// Returns an error if the current content cannot be loaded or the
    /// rewritten file cannot be persisted.
    pub async fn append(&self, watch: TripWatch) -> AppResult<()> {
        let _guard = self.access.lock().await;
        let mut watches = self.read_unlocked().await?;
        watches.push(watch);
        let body = serde_json::to_vec(&watches)?;
        tokio::fs::write(&self.path, body).await?;
        debug!(
            watches = watches.len(),
            path = %self.path.display(),
            "trip-watch store rewritten"
        );
        Ok(())
    }

    async fn read_unlocked(&self) -> AppResult<Vec<TripWatch>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tokio::fs::write(&self.path, b"[]").await?;
                debug!(path = %self.path.display(), "created empty trip-watch store");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        // A blank file counts as empty rather than corrupt
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            AppError::store(format!(
                "corrupt watch store at {}: {err}",
                self.path.display()
            ))
        })
    }
}
