use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// MIME types the upload endpoint accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A resume file ready to be posted as the `resume` multipart field.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl ResumeFile {
    /// Builds a resume file from a name and its bytes, rejecting unsupported types.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Result<Self, ClientError> {
        let file_name = file_name.into();
        let mime_type = infer_mime_type(&file_name)
            .ok_or_else(|| ClientError::UnsupportedFile(file_name.clone()))?;
        Ok(Self {
            file_name,
            mime_type,
            content: content.into(),
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        // Check the type before touching the disk.
        infer_mime_type(&file_name).ok_or_else(|| ClientError::UnsupportedFile(file_name.clone()))?;
        let content = tokio::fs::read(path).await?;
        Self::new(file_name, content)
    }

    /// Picks the single resume out of a drop or picker selection.
    /// Exactly one candidate is accepted; anything else is rejected as a whole.
    pub async fn select(candidates: &[impl AsRef<Path>]) -> Result<Self, ClientError> {
        match candidates {
            [only] => Self::from_path(only.as_ref()).await,
            _ => Err(ClientError::TooManyFiles(candidates.len())),
        }
    }
}

/// Returns the accepted MIME type for `file_name`, or `None` if the extension is not a
/// PDF, DOC or DOCX document.
pub fn infer_mime_type(file_name: &str) -> Option<String> {
    mime_guess::from_path(file_name)
        .iter()
        .map(|m| m.essence_str().to_string())
        .find(|m| ACCEPTED_MIME_TYPES.contains(&m.as_str()))
}

/// Body of a successful `POST /uploadResume`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub message: Option<String>,
}
