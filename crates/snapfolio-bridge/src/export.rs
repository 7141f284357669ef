// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document exporter: print the fixed document, or turn it into a PDF and
// hand that to the share sheet.
//
// Every collaborator failure is reported as `SnapfolioError::Export`.  Those
// are expected outcomes (the user may simply cancel) and callers should not
// treat them as fatal.

use std::path::PathBuf;
use std::sync::Arc;

use snapfolio_core::PrintDocument;
use snapfolio_core::error::{Result, SnapfolioError};
use snapfolio_core::types::ShareOptions;
use tracing::{info, instrument, warn};

use crate::traits::{NativePrint, NativeShare};

/// Drives the print and share collaborators for one fixed document.
pub struct DocumentExporter<B: NativePrint + NativeShare + ?Sized> {
    bridge: Arc<B>,
    document: PrintDocument,
}

impl<B: NativePrint + NativeShare + ?Sized> Clone for DocumentExporter<B> {
    fn clone(&self) -> Self {
        Self {
            bridge: Arc::clone(&self.bridge),
            document: self.document,
        }
    }
}

impl<B: NativePrint + NativeShare + ?Sized> DocumentExporter<B> {
    pub fn new(bridge: Arc<B>, document: PrintDocument) -> Self {
        Self { bridge, document }
    }

    /// Show the document in the platform print dialog.
    #[instrument(skip(self))]
    pub fn render_print_preview(&self) -> Result<()> {
        self.bridge
            .show_print_dialog(self.document.html())
            .map_err(export_error("print dialog"))?;
        info!("print dialog completed");
        Ok(())
    }

    /// Print the document to a PDF file, then share that file.
    ///
    /// The share step only runs once the PDF exists.  Returns the PDF path.
    #[instrument(skip(self))]
    pub fn export_to_pdf_and_share(&self) -> Result<PathBuf> {
        let path = self
            .bridge
            .print_to_file(self.document.html())
            .map_err(export_error("print to file"))?;
        info!(path = %path.display(), "PDF saved");

        self.bridge
            .share_file(&path, &ShareOptions::pdf())
            .map_err(export_error("share"))?;
        info!(path = %path.display(), "PDF shared");
        Ok(path)
    }
}

fn export_error(step: &'static str) -> impl FnOnce(SnapfolioError) -> SnapfolioError {
    move |e| {
        warn!(step, error = %e, "export step failed");
        SnapfolioError::Export(format!("{step}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use super::*;

    /// Records every collaborator call; each step can be told to fail.
    #[derive(Default)]
    struct RecordingBridge {
        fail_dialog: bool,
        fail_print_to_file: bool,
        fail_share: bool,
        calls: Mutex<Vec<String>>,
        shared: Mutex<Vec<(PathBuf, ShareOptions)>>,
    }

    impl RecordingBridge {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    impl NativePrint for RecordingBridge {
        fn show_print_dialog(&self, html: &str) -> Result<()> {
            self.calls.lock().expect("calls lock").push("dialog".into());
            assert!(html.contains("<html>"));
            if self.fail_dialog {
                return Err(SnapfolioError::Bridge("user cancelled".into()));
            }
            Ok(())
        }

        fn print_to_file(&self, _html: &str) -> Result<PathBuf> {
            self.calls.lock().expect("calls lock").push("print_to_file".into());
            if self.fail_print_to_file {
                return Err(SnapfolioError::PlatformUnavailable);
            }
            Ok(PathBuf::from("/tmp/print/document.pdf"))
        }
    }

    impl NativeShare for RecordingBridge {
        fn share_file(&self, path: &Path, options: &ShareOptions) -> Result<()> {
            self.calls.lock().expect("calls lock").push("share".into());
            self.shared
                .lock()
                .expect("shared lock")
                .push((path.to_path_buf(), options.clone()));
            if self.fail_share {
                return Err(SnapfolioError::Bridge("share sheet dismissed".into()));
            }
            Ok(())
        }
    }

    fn exporter(bridge: RecordingBridge) -> (Arc<RecordingBridge>, DocumentExporter<RecordingBridge>) {
        let bridge = Arc::new(bridge);
        let exporter = DocumentExporter::new(Arc::clone(&bridge), PrintDocument::builtin());
        (bridge, exporter)
    }

    #[test]
    fn export_shares_the_printed_file_as_pdf() {
        let (bridge, exporter) = exporter(RecordingBridge::default());

        let path = exporter.export_to_pdf_and_share().expect("export");
        assert_eq!(path, PathBuf::from("/tmp/print/document.pdf"));
        assert_eq!(bridge.calls(), vec!["print_to_file", "share"]);

        let shared = bridge.shared.lock().expect("shared lock");
        assert_eq!(shared[0].0, path);
        assert_eq!(shared[0].1.uti, ".pdf");
        assert_eq!(shared[0].1.mime_type, "application/pdf");
    }

    #[test]
    fn failed_print_to_file_skips_share() {
        let (bridge, exporter) = exporter(RecordingBridge {
            fail_print_to_file: true,
            ..RecordingBridge::default()
        });

        let err = exporter.export_to_pdf_and_share().unwrap_err();
        assert!(matches!(err, SnapfolioError::Export(_)));
        assert_eq!(bridge.calls(), vec!["print_to_file"]);
    }

    #[test]
    fn failed_share_is_export_error() {
        let (bridge, exporter) = exporter(RecordingBridge {
            fail_share: true,
            ..RecordingBridge::default()
        });

        let err = exporter.export_to_pdf_and_share().unwrap_err();
        assert!(matches!(err, SnapfolioError::Export(ref m) if m.starts_with("share")));
        assert_eq!(bridge.calls(), vec!["print_to_file", "share"]);
    }

    #[test]
    fn print_preview_passes_the_document() {
        let (bridge, exporter) = exporter(RecordingBridge::default());
        exporter.render_print_preview().expect("preview");
        assert_eq!(bridge.calls(), vec!["dialog"]);
    }

    #[test]
    fn cancelled_print_preview_is_export_error() {
        let (_bridge, exporter) = exporter(RecordingBridge {
            fail_dialog: true,
            ..RecordingBridge::default()
        });
        let err = exporter.render_print_preview().unwrap_err();
        assert!(matches!(err, SnapfolioError::Export(_)));
    }
}
