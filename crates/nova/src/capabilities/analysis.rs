use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use super::utils::decode_checked;
use crate::errors::CapabilityResult;
use crate::transport::AuthenticatedTransport;

pub const PDF_PATH: &str = "/analyze-pdf";
pub const IMAGE_PATH: &str = "/analyze-image";

/// A single file to upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new<S: Into<String>>(file_name: S, mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> CapabilityResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(display_name(path), mime_type_for(path), bytes))
    }

    fn into_part(self) -> CapabilityResult<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime_type)?)
    }
}

/// The file name shown to the user for an uploaded path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Extracted PDF text. `text` is never truncated here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PdfAnalysis {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// OCR output for an image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// PDF text extraction and image OCR
pub struct AnalysisClient {
    transport: Arc<AuthenticatedTransport>,
}

impl AnalysisClient {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    pub async fn analyze_pdf(&self, upload: Upload) -> CapabilityResult<PdfAnalysis> {
        self.upload(PDF_PATH, "file", upload).await
    }

    pub async fn analyze_image(&self, upload: Upload) -> CapabilityResult<ImageAnalysis> {
        self.upload(IMAGE_PATH, "image", upload).await
    }

    async fn upload<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        field: &'static str,
        upload: Upload,
    ) -> CapabilityResult<T> {
        let form = Form::new().part(field, upload.into_part()?);
        let request = self.transport.post(path).multipart(form);
        let response = self.transport.call(request).await?;
        decode_checked(response).await
    }
}
