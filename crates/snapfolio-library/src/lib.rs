// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snapfolio Library: the local image library (storage directory, filename
// allocation, observable state) and the one-shot image uploader.

pub mod library;
pub mod naming;
pub mod storage;
pub mod upload;

#[cfg(test)]
mod mock_endpoint;

pub use library::{ImageLibrary, ImageLibraryState, LibraryConfig};
pub use storage::StorageDirectory;
pub use upload::{ImageUploader, UploadConfig, UploadRequest};
