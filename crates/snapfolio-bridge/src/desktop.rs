// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge: native file dialog for picking, printpdf for print-to-file,
// and a share directory standing in for the share sheet.  There is no OS
// print dialog to drive, so `show_print_dialog` is unavailable.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use snapfolio_core::PaperSize;
use snapfolio_core::error::{Result, SnapfolioError};
use snapfolio_core::types::{MediaKind, PickerOptions, ShareOptions, file_uri};
use snapfolio_document::PdfWriter;
use tracing::{info, instrument, warn};

use crate::traits::*;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm"];

/// Bridge used on desktop and in CI.
pub struct DesktopBridge {
    /// Where print-to-file PDFs are written.
    export_dir: PathBuf,
    /// Where shared files are copied to.
    share_dir: PathBuf,
    paper_size: PaperSize,
}

impl DesktopBridge {
    pub fn new(
        export_dir: impl Into<PathBuf>,
        share_dir: impl Into<PathBuf>,
        paper_size: PaperSize,
    ) -> Self {
        Self {
            export_dir: export_dir.into(),
            share_dir: share_dir.into(),
            paper_size,
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn share_dir(&self) -> &Path {
        &self.share_dir
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativePrint for DesktopBridge {
    fn show_print_dialog(&self, _html: &str) -> Result<()> {
        warn!("NativePrint::show_print_dialog has no desktop implementation");
        Err(SnapfolioError::PlatformUnavailable)
    }

    #[instrument(skip(self, html), fields(dir = %self.export_dir.display()))]
    fn print_to_file(&self, html: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| SnapfolioError::storage(&self.export_dir, e))?;

        let bytes = PdfWriter::new(self.paper_size).render_html(html)?;
        let tag = Utc::now().timestamp_millis();
        let (path, mut file) = create_unique(&self.export_dir, "document", tag, "pdf")?;

        if let Err(e) = file.write_all(&bytes).and_then(|()| file.sync_all()) {
            drop(file);
            if let Err(cleanup) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %cleanup, "could not remove partial PDF");
            }
            return Err(SnapfolioError::storage(&path, e));
        }

        info!(path = %path.display(), bytes = bytes.len(), "PDF written");
        Ok(path)
    }
}

impl NativeImagePicker for DesktopBridge {
    fn pick_image(&self, options: &PickerOptions) -> Result<Option<String>> {
        let extensions: Vec<&str> = match options.media {
            MediaKind::Images => IMAGE_EXTENSIONS.to_vec(),
            MediaKind::Videos => VIDEO_EXTENSIONS.to_vec(),
            MediaKind::All => IMAGE_EXTENSIONS.iter().chain(VIDEO_EXTENSIONS).copied().collect(),
        };

        // Cropping and quality are picker-side editing features the file
        // dialog does not offer.
        let picked = rfd::FileDialog::new()
            .set_title("Choose an image")
            .add_filter("Images", extensions.as_slice())
            .pick_file();

        Ok(picked.map(|path| file_uri(&path)))
    }
}

impl NativeShare for DesktopBridge {
    #[instrument(skip(self), fields(dir = %self.share_dir.display()))]
    fn share_file(&self, path: &Path, options: &ShareOptions) -> Result<()> {
        std::fs::create_dir_all(&self.share_dir)
            .map_err(|e| SnapfolioError::storage(&self.share_dir, e))?;

        let name = path
            .file_name()
            .ok_or_else(|| SnapfolioError::Bridge(format!("nothing to share at {}", path.display())))?;
        let dest = self.share_dir.join(name);
        std::fs::copy(path, &dest).map_err(|e| SnapfolioError::storage(path, e))?;

        info!(
            dest = %dest.display(),
            uti = %options.uti,
            mime = %options.mime_type,
            "file shared"
        );
        Ok(())
    }
}

/// Create `<dir>/<stem>-<tag>.<ext>`, or the first free `<stem>-<tag>-<n>.<ext>`.
///
/// Each candidate is opened create-new, so a name is claimed atomically and
/// an existing file is never overwritten.
fn create_unique(dir: &Path, stem: &str, tag: i64, ext: &str) -> Result<(PathBuf, File)> {
    let mut n = 0u32;
    loop {
        let candidate = if n == 0 {
            dir.join(format!("{stem}-{tag}.{ext}"))
        } else {
            dir.join(format!("{stem}-{tag}-{n}.{ext}"))
        };
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(SnapfolioError::storage(&candidate, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapfolio_core::PrintDocument;

    fn bridge(root: &Path) -> DesktopBridge {
        DesktopBridge::new(root.join("exports"), root.join("shared"), PaperSize::A4)
    }

    #[test]
    fn print_to_file_writes_a_pdf() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let bridge = bridge(tmp.path());

        let path = bridge
            .print_to_file(PrintDocument::builtin().html())
            .expect("print to file");
        assert!(path.starts_with(bridge.export_dir()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(std::fs::read(&path).expect("read").starts_with(b"%PDF"));
    }

    #[test]
    fn consecutive_exports_do_not_overwrite() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let bridge = bridge(tmp.path());

        let a = bridge.print_to_file("<p>a</p>").expect("first");
        let b = bridge.print_to_file("<p>b</p>").expect("second");
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn taken_export_name_is_skipped_not_overwritten() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let taken = tmp.path().join("document-42.pdf");
        std::fs::write(&taken, b"earlier export").expect("write");

        let (path, _file) = create_unique(tmp.path(), "document", 42, "pdf").expect("create");
        assert_eq!(path, tmp.path().join("document-42-1.pdf"));
        assert_eq!(std::fs::read(&taken).expect("read"), b"earlier export");

        let (next, _file) = create_unique(tmp.path(), "document", 42, "pdf").expect("create");
        assert_eq!(next, tmp.path().join("document-42-2.pdf"));
    }

    #[test]
    fn export_into_unwritable_dir_is_storage_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let blocker = tmp.path().join("exports");
        std::fs::write(&blocker, b"not a dir").expect("write");

        let bridge = DesktopBridge::new(&blocker, tmp.path().join("shared"), PaperSize::A4);
        let err = bridge.print_to_file("<p>x</p>").unwrap_err();
        assert!(matches!(err, SnapfolioError::Storage { .. }));
    }

    #[test]
    fn share_copies_into_share_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let bridge = bridge(tmp.path());
        let pdf = bridge.print_to_file("<p>x</p>").expect("print to file");

        bridge.share_file(&pdf, &ShareOptions::pdf()).expect("share");
        let shared = bridge.share_dir().join(pdf.file_name().expect("name"));
        assert_eq!(std::fs::read(&shared).expect("read"), std::fs::read(&pdf).expect("read"));
    }

    #[test]
    fn sharing_a_missing_file_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let bridge = bridge(tmp.path());
        let err = bridge
            .share_file(&tmp.path().join("missing.pdf"), &ShareOptions::pdf())
            .unwrap_err();
        assert!(matches!(err, SnapfolioError::Storage { .. }));
    }

    #[test]
    fn print_dialog_is_unavailable() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = bridge(tmp.path()).show_print_dialog("<p>x</p>").unwrap_err();
        assert!(matches!(err, SnapfolioError::PlatformUnavailable));
    }
}
