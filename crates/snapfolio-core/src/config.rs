// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SnapfolioError};

/// File name of the persisted config inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image storage directory, relative to the data directory.
    pub images_subdir: String,
    /// Extension given to stored image copies (without the dot).
    pub image_extension: String,
    /// Endpoint receiving multipart image uploads.
    pub upload_url: String,
    /// Multipart field name the file is attached under.
    pub upload_field: String,
    /// Paper size for PDF export.
    pub paper_size: crate::PaperSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            images_subdir: "upload/images".into(),
            image_extension: "jpg".into(),
            upload_url: "http://10.0.0.28:3000/upload".into(),
            upload_field: "avatar".into(),
            paper_size: crate::PaperSize::A4,
        }
    }
}

impl AppConfig {
    /// Absolute storage directory for the given data directory.
    pub fn images_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.images_subdir)
    }

    /// Check the values that would otherwise fail much later.
    pub fn validate(&self) -> Result<()> {
        if self.images_subdir.trim().is_empty() {
            return Err(SnapfolioError::Config("images_subdir must not be empty".into()));
        }
        if Path::new(&self.images_subdir).is_absolute() {
            return Err(SnapfolioError::Config(format!(
                "images_subdir must be relative, got '{}'",
                self.images_subdir
            )));
        }
        if self.image_extension.is_empty() || self.image_extension.contains(['.', '/']) {
            return Err(SnapfolioError::Config(format!(
                "invalid image_extension '{}'",
                self.image_extension
            )));
        }
        if !(self.upload_url.starts_with("http://") || self.upload_url.starts_with("https://")) {
            return Err(SnapfolioError::Config(format!(
                "upload_url must be http(s), got '{}'",
                self.upload_url
            )));
        }
        if self.upload_field.is_empty() {
            return Err(SnapfolioError::Config("upload_field must not be empty".into()));
        }
        Ok(())
    }

    /// Load `config.json` from the data directory, falling back to defaults
    /// when it is missing, unreadable or invalid.
    pub fn load_or_default(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no config file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&data) {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    warn!(error = %e, "config rejected, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Persist as pretty JSON into the data directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(data_dir.join(CONFIG_FILE), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            upload_url: "https://example.test/upload".into(),
            ..AppConfig::default()
        };
        config.save(dir.path()).expect("save");

        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.upload_url, "https://example.test/upload");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"upload_field":"photo"}"#)
            .expect("write");

        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.upload_field, "photo");
        assert_eq!(loaded.images_subdir, "upload/images");
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").expect("write");
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn absolute_subdir_is_rejected() {
        let config = AppConfig {
            images_subdir: "/etc".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(SnapfolioError::Config(_))));
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let config = AppConfig {
            image_extension: ".jpg".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
