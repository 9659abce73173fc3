use tracing::{debug, error};

use crate::models::matches::{score_percent, JobMatch};
use crate::routes::Route;
use crate::state::ClientContext;
use crate::steps::Entry;

pub const DEFAULT_ERROR: &str = "Failed to fetch matches";

#[derive(Debug, Clone, PartialEq)]
pub enum MatchesState {
    Loading,
    Loaded(Vec<JobMatch>),
    Failed(String),
}

/// One row of the matches view. Percentages are for display; `job` keeps the raw scores.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch<'a> {
    pub rank: usize,
    pub job: &'a JobMatch,
    pub percent: i64,
    pub experience_percent: i64,
    pub technical_percent: i64,
    pub growth_percent: i64,
    pub industry_percent: i64,
    pub outreach: Route,
}

impl<'a> RankedMatch<'a> {
    fn new(index: usize, job: &'a JobMatch) -> Self {
        let reasons = &job.match_reasons;
        Self {
            rank: index + 1,
            job,
            percent: score_percent(job.final_score),
            experience_percent: score_percent(reasons.experience_match),
            technical_percent: score_percent(reasons.technical_match),
            growth_percent: score_percent(reasons.growth_match),
            industry_percent: score_percent(reasons.industry_match),
            outreach: Route::Outreach(job.company_name.clone()),
        }
    }
}

pub struct MatchesStep {
    ctx: ClientContext,
    session_id: String,
    state: MatchesState,
}

impl MatchesStep {
    pub fn enter(ctx: ClientContext) -> Entry<Self> {
        match ctx.session_id() {
            Some(session_id) => Entry::Ready(Self {
                ctx,
                session_id,
                state: MatchesState::Loading,
            }),
            None => Entry::Redirect(Route::Upload),
        }
    }

    pub fn state(&self) -> &MatchesState {
        &self.state
    }

    /// Fetches the ranked list. Calling it again after a failure is the retry path.
    pub async fn load(&mut self) {
        self.state = MatchesState::Loading;
        self.state = match self.ctx.api.fetch_matches(&self.session_id).await {
            Ok(response) => {
                debug!(
                    "Fetched {} matches (reported count {})",
                    response.matches.matches.len(),
                    response.count
                );
                MatchesState::Loaded(response.matches.matches)
            }
            Err(e) => {
                error!("Failed to fetch matches: {e}");
                MatchesState::Failed(e.user_message(DEFAULT_ERROR))
            }
        };
    }

    /// Matches in server order with 1-based ranks. Empty unless loaded.
    pub fn ranked(&self) -> Vec<RankedMatch<'_>> {
        match &self.state {
            MatchesState::Loaded(jobs) => jobs
                .iter()
                .enumerate()
                .map(|(i, job)| RankedMatch::new(i, job))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Back to the preference form. Cached preferences stay as they are.
    pub fn adjust_preferences(&self) -> Route {
        Route::Preferences
    }
}
