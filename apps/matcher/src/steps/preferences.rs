use tracing::{error, info};

use crate::errors::ClientError;
use crate::models::preferences::{
    CompanyStage, Industry, Preferences, PreferencesRequest, Role, WorkLocation,
};
use crate::routes::Route;
use crate::state::ClientContext;
use crate::steps::Entry;

pub const DEFAULT_ERROR: &str = "Failed to submit preferences";
pub const SUBMIT_LABEL: &str = "Find My Matches";
/// Shown while the submit request is in flight.
pub const SUBMITTING_LABEL: &str = "Finding Matches...";

/// The preference form. Holds the four selection sets until they are submitted.
pub struct PreferencesStep {
    ctx: ClientContext,
    selection: Preferences,
    error: Option<String>,
}

impl PreferencesStep {
    pub fn enter(ctx: ClientContext) -> Entry<Self> {
        if ctx.session_id().is_none() {
            info!("No session stored; redirecting to upload");
            return Entry::Redirect(Route::Upload);
        }
        Entry::Ready(Self {
            ctx,
            selection: Preferences::default(),
            error: None,
        })
    }

    pub fn selection(&self) -> &Preferences {
        &self.selection
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_role(&mut self, role: Role) -> bool {
        self.selection.toggle_role(role)
    }

    pub fn toggle_industry(&mut self, industry: Industry) -> bool {
        self.selection.toggle_industry(industry)
    }

    pub fn toggle_location(&mut self, location: WorkLocation) -> bool {
        self.selection.toggle_location(location)
    }

    pub fn toggle_stage(&mut self, stage: CompanyStage) -> bool {
        self.selection.toggle_stage(stage)
    }

    /// Sends the current selection. On success the normalized echo is cached and the
    /// matches route is returned; on failure the error is kept and the selection is left
    /// untouched so the form can be resubmitted.
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;

        match self.send().await {
            Ok(()) => Some(Route::Matches),
            Err(e) => {
                error!("Submitting preferences failed: {e}");
                self.error = Some(e.user_message(DEFAULT_ERROR));
                None
            }
        }
    }

    async fn send(&self) -> Result<(), ClientError> {
        let session_id = self.ctx.session_id().ok_or(ClientError::MissingSession)?;
        let request = PreferencesRequest::new(&session_id, &self.selection);

        let response = self.ctx.api.submit_preferences(&request).await?;
        self.ctx.store.set_preferences(&response.preferences)?;
        info!(
            "Preferences saved: {}",
            response.message.as_deref().unwrap_or("ok")
        );
        Ok(())
    }
}
