//! Plain-text views of each step for the terminal.

use std::fmt::Write as _;

use crate::models::preferences::{CompanyStage, Industry, Preferences, Role, WorkLocation};
use crate::routes::Route;
use crate::steps::matches::{MatchesState, MatchesStep};
use crate::steps::outreach::{OutreachState, OutreachStep};
use crate::steps::preferences::{PreferencesStep, SUBMIT_LABEL};
use crate::steps::upload::UploadStatus;

pub fn upload_status(status: &UploadStatus) -> String {
    match status {
        UploadStatus::Idle => {
            "Drag & drop your resume, or pass its path. Supported formats: PDF, DOC, DOCX"
                .to_string()
        }
        UploadStatus::Uploading { file_name } => {
            format!("Uploading {file_name}... This may take a moment")
        }
        UploadStatus::Success { file_name } => format!(
            "{file_name}\nUpload complete! You'll be redirected to customize your preferences shortly."
        ),
        UploadStatus::Error { message } => format!("Error: {message}"),
    }
}

fn option_line<T: Copy + PartialEq>(
    title: &str,
    options: &[T],
    selected: &[T],
    label: impl Fn(T) -> &'static str,
    value: impl Fn(T) -> &'static str,
) -> String {
    let mut out = format!("{title}\n");
    for &opt in options {
        let mark = if selected.contains(&opt) { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {} ({})", label(opt), value(opt));
    }
    out
}

/// All four option lists with the current selection marked.
pub fn preference_options(selection: &Preferences) -> String {
    [
        option_line(
            "Desired Roles",
            &Role::ALL,
            selection.roles(),
            Role::label,
            Role::wire_value,
        ),
        option_line(
            "Industries",
            &Industry::ALL,
            selection.industries(),
            Industry::label,
            Industry::wire_value,
        ),
        option_line(
            "Work Location",
            &WorkLocation::ALL,
            selection.locations(),
            WorkLocation::label,
            WorkLocation::wire_value,
        ),
        option_line(
            "Company Stage",
            &CompanyStage::ALL,
            selection.company_stages(),
            CompanyStage::label,
            CompanyStage::wire_value,
        ),
    ]
    .join("\n")
}

pub fn preferences(step: &PreferencesStep) -> String {
    let mut out = preference_options(step.selection());
    let _ = writeln!(out, "\n[{SUBMIT_LABEL}]");
    if let Some(error) = step.error() {
        let _ = writeln!(out, "Error: {error}");
    }
    out
}

pub fn matches(step: &MatchesStep) -> String {
    match step.state() {
        MatchesState::Loading => "Loading your matches...".to_string(),
        MatchesState::Failed(message) => {
            format!("Error: {message}\nTry again: matcher matches")
        }
        MatchesState::Loaded(_) => {
            let ranked = step.ranked();
            let mut out = format!(
                "Your Top Startup Matches\nWe've found {} matches based on your profile and preferences\n",
                ranked.len()
            );
            for row in &ranked {
                let _ = write!(
                    out,
                    "\n#{} {} ({}%)\n   {}\n   Experience: {}%  Technical: {}%  Growth: {}%  Industry: {}%\n",
                    row.rank,
                    row.job.company_name,
                    row.percent,
                    row.job.company_description,
                    row.experience_percent,
                    row.technical_percent,
                    row.growth_percent,
                    row.industry_percent,
                );
                if !row.job.match_reasons.reasoning.is_empty() {
                    let _ = writeln!(out, "   {}", row.job.match_reasons.reasoning);
                }
                let _ = writeln!(
                    out,
                    "   Connect & Apply: {} ({})",
                    row.outreach,
                    row.outreach.command_hint()
                );
            }
            let _ = write!(
                out,
                "\nAdjust your preferences: {}",
                step.adjust_preferences().command_hint()
            );
            out
        }
    }
}

pub fn outreach(step: &OutreachStep) -> String {
    match step.state() {
        OutreachState::Loading => "Generating your outreach package...".to_string(),
        OutreachState::Failed(message) => format!("Error: {message}"),
        OutreachState::Ready => {
            let mut out = format!(
                "Outreach for {}\n\nCover Letter [{}]\n{}\n\nKey Contacts\n",
                step.company_name(),
                step.copy_label(),
                step.cover_letter()
            );
            if step.contacts().is_empty() {
                out.push_str("  (none found)\n");
            }
            for contact in step.contacts() {
                let _ = writeln!(
                    out,
                    "  {} ({}) <{}>\n    email: {} --email {}",
                    contact.name,
                    contact.role,
                    contact.email,
                    Route::Outreach(step.company_name().to_string()).command_hint(),
                    contact.email
                );
            }
            out
        }
    }
}
