// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot multipart upload of a stored image.
//
// A single POST per call: no retry, no chunking, no progress and no timeout.
// Success is HTTP 200 exactly; 201, 204 and every other status are failures.

use std::path::Path;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use snapfolio_core::AppConfig;
use snapfolio_core::error::{Result, SnapfolioError};

/// Where and how images are uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    pub url: String,
    /// Multipart field the file is attached under.
    pub field_name: String,
}

impl UploadConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            url: config.upload_url.clone(),
            field_name: config.upload_field.clone(),
        }
    }
}

/// A file read from disk and ready to be sent.  Lives only for one upload.
#[derive(Debug)]
pub struct UploadRequest {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SnapfolioError::storage(path, e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());
        let mime_type = mime_for(path);
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    fn into_part(self) -> Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime_type)
            .map_err(|e| SnapfolioError::Upload(format!("invalid part: {e}")))
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// HTTP client bound to one upload endpoint.
#[derive(Debug, Clone)]
pub struct ImageUploader {
    client: reqwest::Client,
    config: UploadConfig,
}

impl ImageUploader {
    pub fn new(config: UploadConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("snapfolio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SnapfolioError::Upload(format!("client setup: {e}")))?;
        Ok(Self { client, config })
    }

    /// Read `path` and POST it as a single multipart file part.
    #[instrument(skip(self), fields(url = %self.config.url))]
    pub async fn upload(&self, path: &Path) -> Result<()> {
        let request = UploadRequest::read(path).await?;
        debug!(
            file = %request.file_name,
            bytes = request.bytes.len(),
            mime = request.mime_type,
            "prepared upload"
        );

        let form = Form::new().part(self.config.field_name.clone(), request.into_part()?);

        let response = self
            .client
            .post(&self.config.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SnapfolioError::Upload(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "upload rejected");
            return Err(SnapfolioError::UploadStatus {
                status: status.as_u16(),
            });
        }

        info!("upload accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_endpoint::MockEndpoint;

    fn uploader(url: String) -> ImageUploader {
        ImageUploader::new(UploadConfig {
            url,
            field_name: "avatar".into(),
        })
        .expect("client")
    }

    fn image_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("1760600000123.jpg");
        std::fs::write(&path, b"\xFF\xD8\xFFfake-jpeg").expect("write");
        path
    }

    #[tokio::test]
    async fn status_200_is_success() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let endpoint = MockEndpoint::start("200 OK").await;

        uploader(endpoint.url()).upload(&image_file(tmp.path())).await.expect("upload");

        let request = endpoint.request().await;
        assert!(request.starts_with("POST /upload HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data"));
        assert!(request.contains(r#"name="avatar""#));
        assert!(request.contains(r#"filename="1760600000123.jpg""#));
        assert!(request.contains("image/jpeg"));
        assert!(request.contains("fake-jpeg"));
    }

    #[tokio::test]
    async fn status_201_is_failure() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let endpoint = MockEndpoint::start("201 Created").await;

        let err = uploader(endpoint.url())
            .upload(&image_file(tmp.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, SnapfolioError::UploadStatus { status: 201 }));
        assert!(err.is_upload());
    }

    #[tokio::test]
    async fn server_error_is_failure() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let endpoint = MockEndpoint::start("500 Internal Server Error").await;

        let err = uploader(endpoint.url())
            .upload(&image_file(tmp.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, SnapfolioError::UploadStatus { status: 500 }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_upload_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let url = MockEndpoint::closed_url().await;

        let err = uploader(url).upload(&image_file(tmp.path())).await.unwrap_err();
        assert!(matches!(err, SnapfolioError::Upload(_)));
    }

    #[tokio::test]
    async fn missing_file_is_storage_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = uploader("http://127.0.0.1:9/upload".into())
            .upload(&tmp.path().join("gone.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, SnapfolioError::Storage { .. }));
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a")), "application/octet-stream");
    }
}
