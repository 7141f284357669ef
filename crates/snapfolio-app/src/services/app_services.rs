// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: the application context that owns the image
// library, the document exporter and the platform bridge, and the single
// sink every UI action reports its outcome to.
//
// Fixed values (storage path, upload endpoint, print document) are decided
// here at construction and handed down; nothing reads them from globals.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use snapfolio_bridge::{BridgeDirs, DocumentExporter, PlatformBridge, platform_bridge};
use snapfolio_core::error::{Result, SnapfolioError};
use snapfolio_core::human_errors::{HumanError, Severity, humanize_error};
use snapfolio_core::types::{ImageEntry, PickerOptions, PrintDocument};
use snapfolio_core::AppConfig;
use snapfolio_core::config::CONFIG_FILE;
use snapfolio_library::{ImageLibrary, LibraryConfig};
use tracing::{error, info, warn};

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    library: Arc<ImageLibrary>,
    exporter: DocumentExporter<dyn PlatformBridge>,
    bridge: Arc<dyn PlatformBridge>,
    config: Arc<Mutex<AppConfig>>,
    data_dir: PathBuf,
    last_error: Arc<Mutex<Option<HumanError>>>,
}

impl AppServices {
    /// Initialise all services in the regular data directory.
    pub fn init() -> Result<Self> {
        let svc = Self::with_data_dir(data_dir::data_dir())?;
        svc.write_default_config();
        Ok(svc)
    }

    /// Initialise in a scratch directory after `init` failed.
    pub fn fallback() -> Result<Self> {
        Self::with_data_dir(data_dir::fallback_data_dir())
    }

    /// Load config from `dir` and wire up the bridge for this platform.
    ///
    /// Fails when `dir` or the images directory inside it cannot be created.
    pub fn with_data_dir(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir).map_err(|e| SnapfolioError::storage(&dir, e))?;
        let config = AppConfig::load_or_default(&dir);
        let bridge = platform_bridge(
            BridgeDirs {
                exports: dir.join("exports"),
                shared: dir.join("shared"),
            },
            config.paper_size,
        );
        let svc = Self::with_bridge(dir, config, bridge)?;

        let images = svc.images_dir();
        std::fs::create_dir_all(images).map_err(|e| SnapfolioError::storage(images, e))?;
        Ok(svc)
    }

    /// Assemble the services around an explicit bridge.
    pub fn with_bridge(
        data_dir: PathBuf,
        config: AppConfig,
        bridge: Arc<dyn PlatformBridge>,
    ) -> Result<Self> {
        info!(
            path = %data_dir.display(),
            platform = bridge.platform_name(),
            "initialising app services"
        );

        let library = ImageLibrary::new(LibraryConfig::from_app_config(&config, &data_dir))?;
        let exporter = DocumentExporter::new(Arc::clone(&bridge), PrintDocument::builtin());

        Ok(Self {
            library: Arc::new(library),
            exporter,
            bridge,
            config: Arc::new(Mutex::new(config)),
            data_dir,
            last_error: Arc::new(Mutex::new(None)),
        })
    }

    // -- Image library -------------------------------------------------------

    /// Current library entries.
    pub fn images(&self) -> Vec<ImageEntry> {
        self.library.entries()
    }

    /// Re-read the storage directory.
    pub async fn load_images(&self) -> Result<Vec<ImageEntry>> {
        self.library.load_library().await
    }

    /// Ask the picker for an image and copy it into the library.
    ///
    /// Returns `Ok(None)` when the user cancelled the picker.
    pub async fn pick_and_add_image(&self) -> Result<Option<ImageEntry>> {
        let Some(uri) = self.bridge.pick_image(&PickerOptions::default())? else {
            info!("image picker cancelled");
            return Ok(None);
        };
        self.library.add_image(&uri).await.map(Some)
    }

    /// Delete an image.  An image that is already gone counts as deleted.
    pub async fn delete_image(&self, path: &Path) -> Result<()> {
        match self.library.delete_image(path).await {
            Err(SnapfolioError::NotFound(path)) => {
                info!(path = %path.display(), "image already removed");
                Ok(())
            }
            other => other,
        }
    }

    /// Upload an image to the configured endpoint.
    pub async fn upload_image(&self, path: &Path) -> Result<()> {
        self.library.upload_image(path).await
    }

    // -- Document export -----------------------------------------------------

    /// Open the print dialog for the bundled document.
    pub fn print_document(&self) -> Result<()> {
        self.exporter.render_print_preview()
    }

    /// Export the bundled document to PDF and share it.
    pub fn print_to_file(&self) -> Result<PathBuf> {
        self.exporter.export_to_pdf_and_share()
    }

    // -- Error sink ----------------------------------------------------------

    /// Single destination for the outcome of every UI action.
    ///
    /// Failures are logged and kept as the latest user-facing error; benign
    /// ones (cancelled dialogs) only at warn level.  Nothing is retried.
    pub fn report<T>(&self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let human = humanize_error(&e);
                if human.severity == Severity::Benign {
                    warn!(action, error = %e, "action did not complete");
                } else {
                    error!(action, error = %e, "action failed");
                }
                *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(human);
                None
            }
        }
    }

    /// Take the latest reported error, clearing it.
    pub fn take_last_error(&self) -> Option<HumanError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    // -- Config persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist the config.  Takes effect on next start, since the library and
    /// exporter were built from the old values.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        config.save(&self.data_dir)?;
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        Ok(())
    }

    /// Leave an editable config.json behind on first start.
    fn write_default_config(&self) {
        if self.data_dir.join(CONFIG_FILE).exists() {
            return;
        }
        if let Err(e) = self.save_config(&self.config()) {
            warn!(error = %e, "could not write default config");
        }
    }

    /// Storage directory of the image library.
    pub fn images_dir(&self) -> &Path {
        self.library.storage_dir()
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.library, &other.library)
    }
}
