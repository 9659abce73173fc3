use std::sync::Arc;
use std::time::Duration;

use crate::api_client::MatchApi;
use crate::clipboard::Clipboard;
use crate::mail::MailLauncher;
use crate::network::NetworkStatus;
use crate::storage::SessionStore;

/// Shared client state injected into every step constructor.
///
/// Nothing in the steps reaches for globals: the persisted session, the API transport and
/// the platform integrations all come through here, so tests swap them for doubles.
#[derive(Clone)]
pub struct ClientContext {
    pub api: Arc<dyn MatchApi>,
    pub store: Arc<dyn SessionStore>,
    pub network: Arc<dyn NetworkStatus>,
    pub clipboard: Arc<dyn Clipboard>,
    pub mail: Arc<dyn MailLauncher>,
    /// Display delay between a successful upload and the move to preferences.
    pub redirect_delay: Duration,
}

impl ClientContext {
    /// The current session token, if one is stored and non-empty.
    pub fn session_id(&self) -> Option<String> {
        self.store.session_id()
    }
}
