//! The four screens of the client flow: upload, preferences, matches, outreach.
//!
//! Every step after upload is entered through an `enter` constructor that checks for a
//! stored session and yields `Entry::Redirect(Route::Upload)` when there is none.

pub mod matches;
pub mod outreach;
pub mod preferences;
pub mod upload;

use crate::routes::Route;

/// Result of entering a step.
#[derive(Debug)]
pub enum Entry<T> {
    Ready(T),
    Redirect(Route),
}

#[cfg(test)]
impl<T> Entry<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Entry::Redirect(_))
    }
}
