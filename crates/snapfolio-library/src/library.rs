// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image library manager: keeps the in-memory image list and the storage
// directory in step.
//
// State is published through a `watch` channel.  Every mutation is applied in
// a single `send_modify` after its filesystem step has succeeded, so readers
// never observe a half-finished add or delete.  Racing operations resolve
// last-writer-wins; nothing reconciles them.

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use snapfolio_core::AppConfig;
use snapfolio_core::error::{Result, SnapfolioError};
use snapfolio_core::types::{ImageEntry, source_path};

use crate::naming::{NameAllocator, parse_tag};
use crate::storage::StorageDirectory;
use crate::upload::{ImageUploader, UploadConfig};

/// Everything the manager needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    pub storage_dir: PathBuf,
    pub image_extension: String,
    pub upload: UploadConfig,
}

impl LibraryConfig {
    pub fn from_app_config(config: &AppConfig, data_dir: &Path) -> Self {
        Self {
            storage_dir: config.images_dir(data_dir),
            image_extension: config.image_extension.clone(),
            upload: UploadConfig::from_app_config(config),
        }
    }
}

/// Snapshot of the library as the UI sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageLibraryState {
    /// Stored images in insertion order.
    pub entries: Vec<ImageEntry>,
    /// Whether the directory has been listed at least once.
    pub loaded: bool,
}

impl ImageLibraryState {
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path() == path)
    }
}

/// Owns the storage directory and the observable image list.
#[derive(Debug)]
pub struct ImageLibrary {
    storage: StorageDirectory,
    names: NameAllocator,
    uploader: ImageUploader,
    state: watch::Sender<ImageLibraryState>,
}

impl ImageLibrary {
    pub fn new(config: LibraryConfig) -> Result<Self> {
        let uploader = ImageUploader::new(config.upload)?;
        let (state, _) = watch::channel(ImageLibraryState::default());
        Ok(Self {
            storage: StorageDirectory::new(config.storage_dir),
            names: NameAllocator::new(config.image_extension),
            uploader,
            state,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        self.storage.root()
    }

    /// Current state.
    pub fn snapshot(&self) -> ImageLibraryState {
        self.state.borrow().clone()
    }

    /// Current entries only.
    pub fn entries(&self) -> Vec<ImageEntry> {
        self.state.borrow().entries.clone()
    }

    /// Receiver notified after every published mutation.
    pub fn subscribe(&self) -> watch::Receiver<ImageLibraryState> {
        self.state.subscribe()
    }

    /// Make sure the storage directory exists.
    pub async fn ensure_storage_ready(&self) -> Result<()> {
        self.storage.ensure_ready().await
    }

    /// Re-read the storage directory and replace the state wholesale.
    #[instrument(skip(self), fields(dir = %self.storage.root().display()))]
    pub async fn load_library(&self) -> Result<Vec<ImageEntry>> {
        self.ensure_storage_ready().await?;
        let entries: Vec<ImageEntry> = self
            .storage
            .list()
            .await?
            .into_iter()
            .map(ImageEntry::new)
            .collect();

        for tag in entries.iter().filter_map(|e| parse_tag(&e.file_name())) {
            self.names.observe(tag);
        }

        info!(count = entries.len(), "library loaded");
        self.state.send_replace(ImageLibraryState {
            entries: entries.clone(),
            loaded: true,
        });
        Ok(entries)
    }

    /// Copy the image at `source_uri` into storage under a fresh name and
    /// append it to the state.
    ///
    /// On any failure neither the state nor the directory gains an entry.
    #[instrument(skip(self))]
    pub async fn add_image(&self, source_uri: &str) -> Result<ImageEntry> {
        self.ensure_storage_ready().await?;
        let source = source_path(source_uri);
        let file_name = self.names.next_name();

        let dest = self.storage.copy_in(&source, &file_name).await?;
        let entry = ImageEntry::new(dest);

        self.state.send_modify(|s| s.entries.push(entry.clone()));
        info!(entry = %entry, "image added");
        Ok(entry)
    }

    /// Delete a tracked image from disk and state.
    ///
    /// An untracked path is [`SnapfolioError::NotFound`] and changes nothing.
    /// A tracked path whose file is already gone is dropped from the state.
    #[instrument(skip(self))]
    pub async fn delete_image(&self, path: &Path) -> Result<()> {
        if !self.state.borrow().contains(path) {
            return Err(SnapfolioError::NotFound(path.to_path_buf()));
        }

        if !self.storage.remove(path).await? {
            warn!(path = %path.display(), "file already missing, dropping entry");
        }

        self.state.send_modify(|s| s.entries.retain(|e| e.path() != path));
        info!(path = %path.display(), "image deleted");
        Ok(())
    }

    /// Send the file at `path` to the configured upload endpoint.
    pub async fn upload_image(&self, path: &Path) -> Result<()> {
        self.uploader.upload(path).await
    }
}
