//! Client-side routes between steps and the delayed transition used after upload.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::ClientError;

const OUTREACH_PREFIX: &str = "/apply/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Upload,
    Preferences,
    Matches,
    /// Outreach for one company, keyed by the decoded company name.
    Outreach(String),
}

impl Route {
    /// Path form of the route. The company name is percent-encoded as a single segment.
    pub fn path(&self) -> String {
        match self {
            Route::Upload => "/".to_string(),
            Route::Preferences => "/preferences".to_string(),
            Route::Matches => "/matches".to_string(),
            Route::Outreach(company) => {
                format!("{OUTREACH_PREFIX}{}", urlencoding::encode(company))
            }
        }
    }

    /// The CLI invocation that opens this route.
    pub fn command_hint(&self) -> String {
        match self {
            Route::Upload => "matcher upload <FILE>".to_string(),
            Route::Preferences => "matcher preferences".to_string(),
            Route::Matches => "matcher matches".to_string(),
            Route::Outreach(company) => {
                format!("matcher outreach {}", urlencoding::encode(company))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decodes an outreach route segment back to the company name.
pub fn decode_company(segment: &str) -> Result<String, ClientError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| ClientError::InvalidRoute(format!("malformed company segment '{segment}'")))
}

// ────────────────────────────────────────────────────────────────────────────
// ScheduledTransition
// ────────────────────────────────────────────────────────────────────────────

/// A navigation that fires after a fixed delay unless cancelled first.
///
/// Driven by `tokio::time`, so tests can pause the clock instead of sleeping.
#[derive(Debug)]
pub struct ScheduledTransition {
    target: Route,
    deadline: Instant,
    token: CancellationToken,
}

impl ScheduledTransition {
    pub fn new(target: Route, delay: Duration) -> Self {
        debug!("Scheduling transition to {target} in {}ms", delay.as_millis());
        Self {
            target,
            deadline: Instant::now() + delay,
            token: CancellationToken::new(),
        }
    }

    pub fn target(&self) -> &Route {
        &self.target
    }

    /// A handle that cancels this transition from elsewhere.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Resolves to the target once the delay elapses, or `None` if cancelled before then.
    pub async fn wait(self) -> Option<Route> {
        let ScheduledTransition {
            target,
            deadline,
            token,
        } = self;
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Transition to {target} cancelled");
                None
            }
            _ = tokio::time::sleep_until(deadline) => Some(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Upload.path(), "/");
        assert_eq!(Route::Preferences.path(), "/preferences");
        assert_eq!(Route::Matches.path(), "/matches");
        assert_eq!(
            Route::Outreach("Acme & Co".to_string()).path(),
            "/apply/Acme%20%26%20Co"
        );
    }

    #[test]
    fn test_outreach_company_survives_encode_decode() {
        for company in ["Acme & Co", "Zoë/Labs", "100% Ventures?", "plain"] {
            let path = Route::Outreach(company.to_string()).path();
            let segment = path.strip_prefix(OUTREACH_PREFIX).unwrap();
            assert!(!segment.contains('/'));
            assert_eq!(decode_company(segment).unwrap(), company);
        }
    }

    #[test]
    fn test_malformed_segment_is_rejected() {
        // %FF is not valid UTF-8 once decoded.
        assert!(matches!(
            decode_company("%FF"),
            Err(ClientError::InvalidRoute(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_fires_after_delay() {
        let start = Instant::now();
        let transition = ScheduledTransition::new(Route::Preferences, Duration::from_millis(1500));

        assert_eq!(transition.wait().await, Some(Route::Preferences));
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_does_not_fire_early() {
        let transition = ScheduledTransition::new(Route::Preferences, Duration::from_millis(1500));
        let handle = tokio::spawn(transition.wait());

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(!handle.is_finished());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(handle.await.unwrap(), Some(Route::Preferences));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_transition_resolves_to_none() {
        let transition = ScheduledTransition::new(Route::Preferences, Duration::from_millis(1500));
        let cancel = transition.cancel_handle();
        let handle = tokio::spawn(transition.wait());

        tokio::time::sleep(Duration::from_millis(500)).await;
        cancel.cancel();
        assert_eq!(handle.await.unwrap(), None);
    }
}
