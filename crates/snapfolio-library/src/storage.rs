// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The storage directory: one flat directory holding the image copies.
//
// No manifest or sidecar files are kept; the directory listing is the
// source of truth the in-memory library is rebuilt from.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use snapfolio_core::error::{Result, SnapfolioError};

use crate::naming::compare_names;

/// Handle to the flat directory that stores image copies.
#[derive(Debug, Clone)]
pub struct StorageDirectory {
    root: PathBuf,
}

impl StorageDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory and any missing parents.  A no-op when it already
    /// exists; safe to race with other callers.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn ensure_ready(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| SnapfolioError::storage(&self.root, e))
    }

    /// Absolute paths of every regular file, in listing order
    /// (see [`compare_names`]).
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn list(&self) -> Result<Vec<PathBuf>> {
        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(|e| SnapfolioError::storage(&self.root, e))?;

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| SnapfolioError::storage(&self.root, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| SnapfolioError::storage(entry.path(), e))?;
            if !file_type.is_file() {
                debug!(path = %entry.path().display(), "skipping non-file entry");
                continue;
            }
            // The lossy name is only a sort key; the real path is kept as is.
            let key = entry.file_name().to_string_lossy().into_owned();
            files.push((key, entry.path()));
        }

        files.sort_by(|(a, _), (b, _)| compare_names(a, b));
        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    /// Copy `source` into the directory as `file_name`.
    ///
    /// The destination is created with create-new semantics, so an existing
    /// file is reported as [`SnapfolioError::Collision`] and never
    /// overwritten.  A partially written destination is removed on failure.
    #[instrument(skip(self), fields(source = %source.display()))]
    pub async fn copy_in(&self, source: &Path, file_name: &str) -> Result<PathBuf> {
        let dest = self.root.join(file_name);

        let mut reader = File::open(source)
            .await
            .map_err(|e| SnapfolioError::storage(source, e))?;

        let mut writer = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(SnapfolioError::Collision(dest));
            }
            Err(e) => return Err(SnapfolioError::storage(&dest, e)),
        };

        let copied = async {
            let bytes = tokio::io::copy(&mut reader, &mut writer).await?;
            writer.flush().await?;
            writer.sync_all().await?;
            Ok::<u64, std::io::Error>(bytes)
        }
        .await;

        match copied {
            Ok(bytes) => {
                debug!(dest = %dest.display(), bytes, "copy complete");
                Ok(dest)
            }
            Err(e) => {
                drop(writer);
                if let Err(cleanup) = fs::remove_file(&dest).await {
                    warn!(dest = %dest.display(), error = %cleanup, "could not remove partial copy");
                }
                Err(SnapfolioError::storage(&dest, e))
            }
        }
    }

    /// Remove a file.  Returns `false` when it was already gone.
    #[instrument(skip(self))]
    pub async fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SnapfolioError::storage(path, e)),
        }
    }
}
