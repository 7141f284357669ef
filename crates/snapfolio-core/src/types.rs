// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the image library and the document exporter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A stored image, identified by its absolute path inside the storage
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageEntry(PathBuf);

impl ImageEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name component, e.g. `1760600000123.jpg`.
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ImageEntry {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for ImageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolve a picker result (plain path or `file://` URI) to a filesystem path.
///
/// The host part of a `file://` URI is not interpreted: `file://tmp/a.jpg`
/// resolves to `/tmp/a.jpg`.  A drive-letter remainder (`file:///C:/a.jpg`
/// or `file://C:\a.jpg`) resolves to `C:/a.jpg` and `C:\a.jpg`.
pub fn source_path(uri: &str) -> PathBuf {
    let Some(rest) = uri.strip_prefix("file://") else {
        return PathBuf::from(uri);
    };
    if has_drive_prefix(rest) {
        return PathBuf::from(rest);
    }
    match rest.strip_prefix('/') {
        Some(after) if has_drive_prefix(after) => PathBuf::from(after),
        Some(_) => PathBuf::from(rest),
        None => PathBuf::from(format!("/{rest}")),
    }
}

/// Build the `file://` URI a picker hands back for `path`.
///
/// Backslashes become `/` and a drive-letter path gets the extra leading
/// slash, so `C:\a.jpg` is `file:///C:/a.jpg`.
pub fn file_uri(path: &Path) -> String {
    let text = path.to_string_lossy();
    if has_drive_prefix(&text) {
        format!("file:///{}", text.replace('\\', "/"))
    } else {
        format!("file://{text}")
    }
}

/// `C:` style prefix.
fn has_drive_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Media filter requested from the image picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Images,
    Videos,
    All,
}

/// Options handed to the platform image picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerOptions {
    pub media: MediaKind,
    /// Let the user crop before confirming.
    pub allows_editing: bool,
    /// Crop aspect ratio (width, height).
    pub aspect: (u32, u32),
    /// Compression quality, 0.0 to 1.0.
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media: MediaKind::Images,
            allows_editing: true,
            aspect: (4, 3),
            quality: 1.0,
        }
    }
}

/// Hints passed to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOptions {
    /// Uniform type identifier hint (iOS); a file-extension style hint elsewhere.
    pub uti: String,
    pub mime_type: String,
}

impl ShareOptions {
    pub fn pdf() -> Self {
        Self {
            uti: ".pdf".into(),
            mime_type: "application/pdf".into(),
        }
    }
}

/// Standard paper sizes for PDF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
        }
    }
}

/// The HTML document shipped with the app for printing and PDF export.
const BUILTIN_HTML: &str = r#"<html>
  <head>
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, minimum-scale=1.0, user-scalable=no" />
  </head>
  <body style="text-align: center;">
    <h1 style="font-size: 50px; font-family: Helvetica Neue; font-weight: normal;">
      Hello from Snapfolio!
    </h1>
    <img
      src="https://www.rust-lang.org/static/images/rust-logo-blk.svg"
      style="width: 90vw;" />
    <p style="font-size: 16px; font-family: Helvetica Neue; font-weight: normal;">Lorem, ipsum dolor sit amet consectetur adipisicing elit. Ab ut nobis totam, hic magnam quibusdam? Animi consequatur dignissimos soluta, pariatur blanditiis voluptatem dicta in quod provident aspernatur beatae temporibus maiores!</p>
  </body>
</html>
"#;

/// An immutable HTML document handed to the print collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintDocument {
    html: &'static str,
}

impl PrintDocument {
    pub const fn new(html: &'static str) -> Self {
        Self { html }
    }

    /// The document bundled with the app.
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_HTML)
    }

    pub fn html(&self) -> &'static str {
        self.html
    }
}

impl Default for PrintDocument {
    fn default() -> Self {
        Self::builtin()
    }
}
