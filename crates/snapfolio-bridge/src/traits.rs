// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The screen needs four things from the host platform: an image picker, a
// print dialog, print-to-file, and a share sheet.  Platforms that lack one
// return `SnapfolioError::PlatformUnavailable`.

use std::path::{Path, PathBuf};

use snapfolio_core::error::Result;
use snapfolio_core::types::{PickerOptions, ShareOptions};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativePrint + NativeImagePicker + NativeShare + Send + Sync {
    /// Human-readable platform name (e.g. "iOS 17", "Desktop").
    fn platform_name(&self) -> &str;
}

/// Printing of HTML documents.
pub trait NativePrint {
    /// Present the OS print dialog for `html`.
    /// Returns Ok(()) once the dialog was shown and dismissed with a print.
    fn show_print_dialog(&self, html: &str) -> Result<()>;

    /// Render `html` to a PDF at a location the platform chooses and return
    /// that location.
    fn print_to_file(&self, html: &str) -> Result<PathBuf>;
}

/// Pick images from the device library.
pub trait NativeImagePicker {
    /// Show the picker.  Returns the chosen image's URI, or None if the user
    /// cancelled.
    fn pick_image(&self, options: &PickerOptions) -> Result<Option<String>>;
}

/// Share content via the OS share sheet.
pub trait NativeShare {
    /// Offer the file at `path` to other apps.
    fn share_file(&self, path: &Path, options: &ShareOptions) -> Result<()>;
}
