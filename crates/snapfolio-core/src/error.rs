// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Snapfolio.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Snapfolio operations.
#[derive(Debug, Error)]
pub enum SnapfolioError {
    // -- Image library --
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image not tracked by the library: {}", .0.display())]
    NotFound(PathBuf),

    #[error("destination already exists: {}", .0.display())]
    Collision(PathBuf),

    // -- Upload --
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("upload rejected with HTTP status {status}")]
    UploadStatus { status: u16 },

    // -- Document export --
    #[error("export failed: {0}")]
    Export(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl SnapfolioError {
    /// Wrap an I/O failure with the path it happened on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Whether this is one of the upload failures.
    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload(_) | Self::UploadStatus { .. })
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SnapfolioError>;
