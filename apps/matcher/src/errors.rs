use thiserror::Error;

/// Client-level error type.
/// Every step turns these into the text of its error view via `user_message`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No session found. Please upload your resume first.")]
    MissingSession,

    #[error("{}", offline_message(.during_transfer))]
    Offline { during_transfer: bool },

    #[error("Unsupported file type: {0}. Please upload a PDF, DOC or DOCX file.")]
    UnsupportedFile(String),

    #[error("Please provide exactly one resume file (got {0}).")]
    TooManyFiles(usize),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {}): {}", .status, .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("{0} is not one of the key contacts for this company.")]
    UnknownContact(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn offline_message(during_transfer: &bool) -> &'static str {
    if *during_transfer {
        "Lost internet connection during upload. Please try again."
    } else {
        "No internet connection. Please check your network and try again."
    }
}

impl ClientError {
    /// Text shown in a step's error view.
    ///
    /// Server-provided messages win when present and non-empty. Transport, decode and
    /// storage failures fall back to the step's `default`. Local validation errors carry
    /// their own wording.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            ClientError::Api { .. } => default.to_string(),
            ClientError::Transport(e) => {
                tracing::error!("Request failed: {e}");
                default.to_string()
            }
            ClientError::Decode(e) => {
                tracing::error!("Unexpected response body: {e}");
                default.to_string()
            }
            ClientError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                default.to_string()
            }
            ClientError::Io(e) => {
                tracing::error!("I/O error: {e}");
                default.to_string()
            }
            ClientError::MissingSession
            | ClientError::Offline { .. }
            | ClientError::UnsupportedFile(_)
            | ClientError::TooManyFiles(_)
            | ClientError::Rejected(_)
            | ClientError::InvalidRoute(_)
            | ClientError::UnknownContact(_) => self.to_string(),
        }
    }
}
