//! Mail-compose links for outreach contacts.

use std::process::Command;

use tracing::info;

use crate::errors::ClientError;

pub fn subject_for(company: &str) -> String {
    format!("Application for position at {company}")
}

/// `mailto:` link with a percent-encoded subject and body.
pub fn mailto_url(email: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{email}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

/// Hands a `mailto:` URL to whatever handles it on this platform.
pub trait MailLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), ClientError>;
}

/// Opens URLs with the platform opener (`open`, `xdg-open`, or `cmd /C start`).
pub struct SystemMailLauncher;

impl MailLauncher for SystemMailLauncher {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        info!("Opening mail client");
        let status = opener_command(url).status()?;
        if !status.success() {
            return Err(ClientError::Rejected(format!(
                "Mail handler exited with {status}"
            )));
        }
        Ok(())
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingLauncher {
    pub opened: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MailLauncher for RecordingLauncher {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_format() {
        assert_eq!(subject_for("Acme"), "Application for position at Acme");
    }

    #[test]
    fn test_mailto_encodes_subject_and_body() {
        let url = mailto_url(
            "ada@acme.co",
            &subject_for("Acme & Co"),
            "Dear Ada,\nI'd love to join.",
        );
        assert_eq!(
            url,
            "mailto:ada@acme.co?subject=Application%20for%20position%20at%20Acme%20%26%20Co\
             &body=Dear%20Ada%2C%0AI%27d%20love%20to%20join."
        );
    }
}
