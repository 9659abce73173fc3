use tracing::{error, info, warn};

use crate::clipboard::CopyIndicator;
use crate::errors::ClientError;
use crate::mail::{mailto_url, subject_for};
use crate::models::outreach::{Contact, OutreachPackage, OutreachRequest};
use crate::routes::{decode_company, Route};
use crate::state::ClientContext;
use crate::steps::Entry;

pub const DEFAULT_ERROR: &str = "Failed to fetch outreach package";
pub const GENERATION_FAILED: &str = "Failed to generate outreach package";

#[derive(Debug, Clone, PartialEq)]
pub enum OutreachState {
    Loading,
    Ready,
    Failed(String),
}

/// The outreach screen for one company: an editable cover letter plus contacts.
pub struct OutreachStep {
    ctx: ClientContext,
    session_id: String,
    /// Company as decoded from the route, or the raw segment if it failed to decode.
    requested_company: Result<String, String>,
    state: OutreachState,
    company_name: String,
    contacts: Vec<Contact>,
    cover_letter: String,
    copy_indicator: CopyIndicator,
}

impl OutreachStep {
    /// Enters the step from the raw (percent-encoded) route segment.
    pub fn enter(ctx: ClientContext, company_segment: &str) -> Entry<Self> {
        let Some(session_id) = ctx.session_id() else {
            info!("No session stored; redirecting to upload");
            return Entry::Redirect(Route::Upload);
        };
        let requested_company =
            decode_company(company_segment).map_err(|_| company_segment.to_string());
        Entry::Ready(Self {
            ctx,
            session_id,
            requested_company,
            state: OutreachState::Loading,
            company_name: String::new(),
            contacts: Vec::new(),
            cover_letter: String::new(),
            copy_indicator: CopyIndicator::default(),
        })
    }

    pub fn state(&self) -> &OutreachState {
        &self.state
    }

    /// The company name decoded from the route, if it decoded cleanly.
    pub fn requested_company(&self) -> Option<&str> {
        self.requested_company.as_deref().ok()
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn cover_letter(&self) -> &str {
        &self.cover_letter
    }

    /// Fetches the outreach package. Calling it again after a failure retries.
    pub async fn load(&mut self) {
        self.state = OutreachState::Loading;
        match self.fetch().await {
            Ok(package) => {
                info!(
                    "Outreach package for {} with {} contacts",
                    package.company_name,
                    package.contacts.len()
                );
                self.company_name = package.company_name;
                self.contacts = package.contacts;
                self.cover_letter = package.cover_letter;
                self.state = OutreachState::Ready;
            }
            Err(e) => {
                error!("Failed to fetch outreach package: {e}");
                self.state = OutreachState::Failed(e.user_message(DEFAULT_ERROR));
            }
        }
    }

    async fn fetch(&self) -> Result<OutreachPackage, ClientError> {
        let company_name = self
            .requested_company
            .clone()
            .map_err(|segment| {
                ClientError::InvalidRoute(format!("malformed company segment '{segment}'"))
            })?;
        let request = OutreachRequest {
            session_id: self.session_id.clone(),
            company_name,
        };

        let response = self.ctx.api.fetch_outreach(&request).await?;
        match response.outreach_package {
            Some(package) if response.success => Ok(package),
            _ => Err(ClientError::Rejected(GENERATION_FAILED.to_string())),
        }
    }

    /// Replaces the cover letter with the user's edit. Never sent back to the server.
    pub fn edit_cover_letter(&mut self, text: impl Into<String>) {
        self.cover_letter = text.into();
    }

    /// Copies the current letter. The indicator only turns on when the write succeeds.
    pub fn copy_cover_letter(&mut self) -> Result<(), ClientError> {
        match self.ctx.clipboard.write_text(&self.cover_letter) {
            Ok(()) => {
                self.copy_indicator.mark_copied();
                Ok(())
            }
            Err(e) => {
                warn!("Failed to copy text: {e}");
                Err(e)
            }
        }
    }

    pub fn copy_label(&self) -> &'static str {
        self.copy_indicator.label()
    }

    /// `mailto:` link for `email` carrying the current, possibly edited, letter.
    pub fn compose_url(&self, email: &str) -> String {
        mailto_url(email, &subject_for(&self.company_name), &self.cover_letter)
    }

    /// The listed contact with this address. Addresses compare case-insensitively.
    pub fn contact(&self, email: &str) -> Option<&Contact> {
        self.contacts
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email.trim()))
    }

    /// Opens a mail draft to one of the package's contacts.
    pub fn compose_email(&self, email: &str) -> Result<(), ClientError> {
        let contact = self
            .contact(email)
            .ok_or_else(|| ClientError::UnknownContact(email.to_string()))?;
        self.ctx.mail.open(&self.compose_url(&contact.email))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clipboard::{RecordingClipboard, COPIED_LABEL, COPY_LABEL};
    use crate::models::outreach::OutreachResponse;
    use crate::steps::testing::{api_error, Harness};

    fn package(company: &str) -> OutreachResponse {
        OutreachResponse {
            success: true,
            outreach_package: Some(OutreachPackage {
                company_name: company.to_string(),
                contacts: vec![Contact {
                    name: "Ada".to_string(),
                    role: "CTO".to_string(),
                    email: "ada@acme.co".to_string(),
                }],
                cover_letter: "Dear Ada,".to_string(),
            }),
        }
    }

    fn ready(h: &Harness, segment: &str) -> OutreachStep {
        match OutreachStep::enter(h.ctx.clone(), segment) {
            Entry::Ready(step) => step,
            Entry::Redirect(route) => panic!("unexpected redirect to {route}"),
        }
    }

    async fn loaded(h: &Harness) -> OutreachStep {
        h.api
            .outreach
            .lock()
            .unwrap()
            .push_back(Ok(package("Acme & Co")));
        let mut step = ready(h, "Acme%20%26%20Co");
        step.load().await;
        step
    }

    #[test]
    fn test_redirects_without_session() {
        let h = Harness::new(None);
        assert!(OutreachStep::enter(h.ctx.clone(), "Acme").is_redirect());
        assert_eq!(h.api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_route_segment_is_decoded_before_query() {
        let h = Harness::new(Some("abc"));
        let step = loaded(&h).await;

        let sent = h.api.outreach_requests.lock().unwrap()[0].clone();
        assert_eq!(sent.session_id, "abc");
        assert_eq!(sent.company_name, "Acme & Co");
        assert_eq!(step.state(), &OutreachState::Ready);
        assert_eq!(step.company_name(), "Acme & Co");
        assert_eq!(step.contacts()[0].name, "Ada");
        assert_eq!(step.cover_letter(), "Dear Ada,");
    }

    #[tokio::test]
    async fn test_link_from_matches_decodes_to_same_company() {
        let h = Harness::new(Some("abc"));
        h.api
            .outreach
            .lock()
            .unwrap()
            .push_back(Ok(package("Zoë/Labs 100%")));
        let route = Route::Outreach("Zoë/Labs 100%".to_string());
        let segment = route.path().trim_start_matches("/apply/").to_string();
        let mut step = ready(&h, &segment);
        step.load().await;

        assert_eq!(step.requested_company(), Some("Zoë/Labs 100%"));
        assert_eq!(
            h.api.outreach_requests.lock().unwrap()[0].company_name,
            "Zoë/Labs 100%"
        );
    }

    #[tokio::test]
    async fn test_unsuccessful_generation_is_an_error() {
        let h = Harness::new(Some("abc"));
        h.api.outreach.lock().unwrap().push_back(Ok(OutreachResponse {
            success: false,
            outreach_package: None,
        }));
        let mut step = ready(&h, "Acme");
        step.load().await;

        assert_eq!(
            step.state(),
            &OutreachState::Failed(GENERATION_FAILED.to_string())
        );
    }

    #[tokio::test]
    async fn test_error_message_or_default() {
        let h = Harness::new(Some("abc"));
        {
            let mut queue = h.api.outreach.lock().unwrap();
            queue.push_back(Err(api_error(500, Some("X"))));
            queue.push_back(Err(api_error(500, None)));
        }
        let mut step = ready(&h, "Acme");

        step.load().await;
        assert_eq!(step.state(), &OutreachState::Failed("X".to_string()));
        step.load().await;
        assert_eq!(
            step.state(),
            &OutreachState::Failed(DEFAULT_ERROR.to_string())
        );
    }

    #[tokio::test]
    async fn test_malformed_segment_fails_without_request() {
        let h = Harness::new(Some("abc"));
        let mut step = ready(&h, "%FF");
        step.load().await;

        assert!(matches!(step.state(), OutreachState::Failed(msg) if msg.starts_with("Invalid route")));
        assert_eq!(h.api.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_indicator_ignores_edits() {
        let h = Harness::new(Some("abc"));
        let mut step = loaded(&h).await;
        assert_eq!(step.copy_label(), COPY_LABEL);

        step.copy_cover_letter().unwrap();
        assert_eq!(h.clipboard.last().as_deref(), Some("Dear Ada,"));
        assert_eq!(step.copy_label(), COPIED_LABEL);

        tokio::time::advance(Duration::from_millis(1000)).await;
        step.edit_cover_letter("Dear Ada, edited");
        assert_eq!(step.copy_label(), COPIED_LABEL);

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert_eq!(step.copy_label(), COPY_LABEL);
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_indicator_off() {
        let h = Harness::with_clipboard(Some("abc"), RecordingClipboard::failing());
        let mut step = loaded(&h).await;

        assert!(step.copy_cover_letter().is_err());
        assert_eq!(step.copy_label(), COPY_LABEL);
    }

    #[tokio::test]
    async fn test_compose_uses_edited_letter_and_company_subject() {
        let h = Harness::new(Some("abc"));
        let mut step = loaded(&h).await;
        step.edit_cover_letter("Hi Ada & team");

        step.compose_email("ada@acme.co").unwrap();
        let opened = h.mail.opened.lock().unwrap();
        assert_eq!(
            opened.as_slice(),
            ["mailto:ada@acme.co?subject=Application%20for%20position%20at%20Acme%20%26%20Co&body=Hi%20Ada%20%26%20team"]
        );
    }

    #[tokio::test]
    async fn test_compose_only_reaches_listed_contacts() {
        let h = Harness::new(Some("abc"));
        let step = loaded(&h).await;

        let err = step.compose_email("someone@else.io").unwrap_err();
        assert!(matches!(err, ClientError::UnknownContact(_)));
        assert!(h.mail.opened.lock().unwrap().is_empty());

        step.compose_email("ADA@acme.co").unwrap();
        let opened = h.mail.opened.lock().unwrap();
        assert!(opened[0].starts_with("mailto:ada@acme.co?subject="));
    }
}
