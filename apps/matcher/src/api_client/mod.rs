//! API client: the single point of entry for all calls to the matching service.
//!
//! ARCHITECTURAL RULE: steps never build HTTP requests themselves. They talk to the
//! service through `MatchApi`, which `ClientContext` carries as `Arc<dyn MatchApi>`.
//!
//! No retries and no request timeout: a failed call is terminal for that attempt.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::matches::MatchesResponse;
use crate::models::outreach::{OutreachRequest, OutreachResponse};
use crate::models::preferences::{PreferencesRequest, PreferencesResponse};
use crate::models::upload::{ResumeFile, UploadResponse};

const UPLOAD_PATH: &str = "/uploadResume";
const PREFERENCES_PATH: &str = "/submitPreferences";
const MATCHES_PATH: &str = "/api/matches";
const OUTREACH_PATH: &str = "/api/outreach";
/// Multipart field name the upload endpoint reads the resume from.
pub const RESUME_FIELD: &str = "resume";

/// The remote calls the client flow depends on. Implement this to swap the transport
/// without touching the steps.
#[async_trait]
pub trait MatchApi: Send + Sync {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadResponse, ClientError>;

    async fn submit_preferences(
        &self,
        request: &PreferencesRequest,
    ) -> Result<PreferencesResponse, ClientError>;

    async fn fetch_matches(&self, session_id: &str) -> Result<MatchesResponse, ClientError>;

    async fn fetch_outreach(&self, request: &OutreachRequest)
        -> Result<OutreachResponse, ClientError>;
}

/// Shape of error bodies. Every field is optional; anything unparsable means "no message".
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP implementation of `MatchApi` over `reqwest`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MatchApi for ApiClient {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadResponse, ClientError> {
        let part = multipart::Part::bytes(file.content.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = multipart::Form::new().part(RESUME_FIELD, part);

        debug!(
            "Uploading {} ({} bytes, {})",
            file.file_name,
            file.content.len(),
            file.mime_type
        );

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }

    async fn submit_preferences(
        &self,
        request: &PreferencesRequest,
    ) -> Result<PreferencesResponse, ClientError> {
        let response = self
            .client
            .post(self.url(PREFERENCES_PATH))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }

    async fn fetch_matches(&self, session_id: &str) -> Result<MatchesResponse, ClientError> {
        let response = self
            .client
            .get(self.url(MATCHES_PATH))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("session_id", session_id)])
            .send()
            .await?;

        read_json(response).await
    }

    async fn fetch_outreach(
        &self,
        request: &OutreachRequest,
    ) -> Result<OutreachResponse, ClientError> {
        let response = self
            .client
            .post(self.url(OUTREACH_PATH))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Decodes a 2xx body as `T`; turns anything else into `ClientError::Api` carrying the
/// body's `message` when one can be parsed.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = parse_error_message(&body);
        warn!("API returned {status}: {}", message.as_deref().unwrap_or("<no message>"));
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}
