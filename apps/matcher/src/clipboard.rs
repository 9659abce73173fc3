//! Clipboard access and the transient "Copied!" indicator of the outreach step.

use std::io::Write;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::time::Instant;

use crate::errors::ClientError;

/// How long the copy indicator stays on after a copy.
pub const COPY_INDICATOR_DURATION: Duration = Duration::from_millis(2000);
pub const COPY_LABEL: &str = "Copy Text";
pub const COPIED_LABEL: &str = "Copied!";

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClientError>;
}

/// Sets the system clipboard through the terminal with an OSC 52 escape sequence.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClientError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Tracks the "Copied!" label. Every successful copy turns it on and clears it
/// `COPY_INDICATOR_DURATION` later, even if a later copy turned it back on in between.
/// Edits to the copied text do not affect it.
#[derive(Debug, Clone, Default)]
pub struct CopyIndicator {
    /// Copies whose clear has not fired yet, oldest first.
    pending: Vec<Instant>,
}

impl CopyIndicator {
    pub fn mark_copied(&mut self) {
        let now = Instant::now();
        self.pending.retain(|at| *at + COPY_INDICATOR_DURATION > now);
        self.pending.push(now);
    }

    /// On while the latest copy is newer than every clear that has already fired.
    pub fn is_active(&self) -> bool {
        let Some(last) = self.pending.last() else {
            return false;
        };
        let now = Instant::now();
        self.pending
            .iter()
            .map(|at| *at + COPY_INDICATOR_DURATION)
            .filter(|clear| *clear <= now)
            .max()
            .map_or(true, |cleared| *last > cleared)
    }

    pub fn label(&self) -> &'static str {
        if self.is_active() {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }
}

#[cfg(test)]
pub struct RecordingClipboard {
    pub fail: bool,
    pub writes: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingClipboard {
    pub fn new() -> Self {
        Self {
            fail: false,
            writes: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn last(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClientError> {
        if self.fail {
            return Err(ClientError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "clipboard unavailable",
            )));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
