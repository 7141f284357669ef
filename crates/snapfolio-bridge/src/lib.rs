// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snapfolio: native platform bridge abstractions and the document exporter
// built on top of them.
//
// The traits describe what the screen needs from the host (picker, print
// dialog, print-to-file, share sheet).  `platform_bridge` returns the
// implementation for the current target.

pub mod desktop;
pub mod export;
pub mod traits;

use std::path::PathBuf;
use std::sync::Arc;

use snapfolio_core::PaperSize;

pub use desktop::DesktopBridge;
pub use export::DocumentExporter;
pub use traits::{NativeImagePicker, NativePrint, NativeShare, PlatformBridge};

/// Directories a bridge may write into.
#[derive(Debug, Clone)]
pub struct BridgeDirs {
    /// Print-to-file output.
    pub exports: PathBuf,
    /// Shared file drop.
    pub shared: PathBuf,
}

/// Bridge implementation for the target operating system.
pub fn platform_bridge(dirs: BridgeDirs, paper_size: PaperSize) -> Arc<dyn PlatformBridge> {
    let bridge = DesktopBridge::new(dirs.exports, dirs.shared, paper_size);
    tracing::info!(platform = bridge.platform_name(), "platform bridge ready");
    Arc::new(bridge)
}
