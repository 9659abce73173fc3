use tracing::{debug, error, info};

use crate::errors::ClientError;
use crate::models::upload::{ResumeFile, UploadResponse};
use crate::routes::{Route, ScheduledTransition};
use crate::state::ClientContext;

pub const DEFAULT_ERROR: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading { file_name: String },
    Success { file_name: String },
    Error { message: String },
}

/// The resume upload screen. The only step that runs without a session.
pub struct UploadStep {
    ctx: ClientContext,
    status: UploadStatus,
}

impl UploadStep {
    pub fn new(ctx: ClientContext) -> Self {
        Self {
            ctx,
            status: UploadStatus::Idle,
        }
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    /// Uploads `file` and, on success, stores the new session and schedules the move to
    /// preferences after the configured display delay.
    ///
    /// On failure the status carries the message and `None` is returned; calling `submit`
    /// again retries. A failed upload leaves any earlier session in place.
    pub async fn submit(&mut self, file: ResumeFile) -> Option<ScheduledTransition> {
        self.status = UploadStatus::Uploading {
            file_name: file.file_name.clone(),
        };

        match self.upload(&file).await {
            Ok(response) => {
                info!(
                    "Resume '{}' uploaded as '{}': {}",
                    file.file_name,
                    response.filename,
                    response.message.as_deref().unwrap_or("ok")
                );
                debug!("Extracted resume text: {} chars", response.resume_text.len());
                self.status = UploadStatus::Success {
                    file_name: file.file_name,
                };
                Some(ScheduledTransition::new(
                    Route::Preferences,
                    self.ctx.redirect_delay,
                ))
            }
            Err(e) => {
                error!("Upload failed: {e}");
                self.status = UploadStatus::Error {
                    message: e.user_message(DEFAULT_ERROR),
                };
                None
            }
        }
    }

    /// Records a selection that was rejected before any request was made, such as an
    /// unsupported type or more than one file.
    pub fn reject(&mut self, err: &ClientError) {
        self.status = UploadStatus::Error {
            message: err.user_message(DEFAULT_ERROR),
        };
    }

    async fn upload(&self, file: &ResumeFile) -> Result<UploadResponse, ClientError> {
        if !self.ctx.network.is_online().await {
            return Err(ClientError::Offline {
                during_transfer: false,
            });
        }

        let response = match self.ctx.api.upload_resume(file).await {
            Ok(response) => response,
            Err(ClientError::Transport(e)) => {
                if !self.ctx.network.is_online().await {
                    return Err(ClientError::Offline {
                        during_transfer: true,
                    });
                }
                return Err(ClientError::Transport(e));
            }
            Err(e) => return Err(e),
        };

        if response.session_id.is_empty() {
            return Err(ClientError::Rejected(DEFAULT_ERROR.to_string()));
        }

        self.ctx.store.set_session_id(&response.session_id)?;
        Ok(response)
    }
}
