mod api_client;
mod clipboard;
mod config;
mod errors;
mod mail;
mod models;
mod network;
mod render;
mod routes;
mod state;
mod steps;
mod storage;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::clipboard::Osc52Clipboard;
use crate::config::Config;
use crate::errors::ClientError;
use crate::mail::SystemMailLauncher;
use crate::models::preferences::{CompanyStage, Industry, Role, WorkLocation};
use crate::models::upload::ResumeFile;
use crate::network::{DnsProbe, FixedStatus, NetworkStatus};
use crate::routes::Route;
use crate::state::ClientContext;
use crate::steps::matches::{MatchesState, MatchesStep};
use crate::steps::outreach::{OutreachState, OutreachStep};
use crate::steps::preferences::PreferencesStep;
use crate::steps::upload::UploadStep;
use crate::steps::Entry;
use crate::storage::FileSessionStore;

#[derive(Parser)]
#[command(name = "matcher")]
#[command(about = "Startup job matcher - upload a resume, set preferences, get matches and outreach", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a resume (PDF, DOC or DOCX) and start a new session
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Choose job preferences and submit them
    Preferences {
        /// Toggle a desired role (repeatable)
        #[arg(long = "role")]
        roles: Vec<Role>,
        /// Toggle an industry (repeatable)
        #[arg(long = "industry")]
        industries: Vec<Industry>,
        /// Toggle a work location (repeatable)
        #[arg(long = "location")]
        locations: Vec<WorkLocation>,
        /// Toggle a company stage (repeatable)
        #[arg(long = "stage")]
        stages: Vec<CompanyStage>,
        /// Show the available options and the cached preferences without submitting
        #[arg(long)]
        list: bool,
    },
    /// Show your ranked matches
    Matches,
    /// Generate the outreach package for a company from the matches list
    Outreach {
        /// Company name, URL-encoded as printed by `matcher matches`
        company: String,
        /// Use this file's contents as the edited cover letter
        #[arg(long)]
        letter_file: Option<PathBuf>,
        /// Copy the cover letter to the clipboard
        #[arg(long)]
        copy: bool,
        /// Open a mail draft to this contact
        #[arg(long)]
        email: Option<String>,
    },
    /// Show the stored session and cached preferences
    Session,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging on stderr so views stay clean on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let ctx = build_context(&config)?;

    match cli.command {
        Commands::Upload { files } => run_upload(ctx, &files).await,
        Commands::Preferences {
            roles,
            industries,
            locations,
            stages,
            list,
        } => {
            let Some(mut step) = enter(PreferencesStep::enter(ctx.clone())) else {
                return Ok(ExitCode::SUCCESS);
            };
            for role in roles {
                step.toggle_role(role);
            }
            for industry in industries {
                step.toggle_industry(industry);
            }
            for location in locations {
                step.toggle_location(location);
            }
            for stage in stages {
                step.toggle_stage(stage);
            }
            if list {
                println!("{}", render::preference_options(step.selection()));
                if let Some(cached) = ctx.store.preferences() {
                    println!("Cached preferences: {}", serde_json::to_string_pretty(&cached)?);
                }
                return Ok(ExitCode::SUCCESS);
            }
            println!("{}", steps::preferences::SUBMITTING_LABEL);
            match step.submit().await {
                Some(next) => {
                    println!("{}", render::preferences(&step));
                    println!("Preferences saved. Next: {}", next.command_hint());
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("{}", render::preferences(&step));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Matches => {
            let Some(mut step) = enter(MatchesStep::enter(ctx)) else {
                return Ok(ExitCode::SUCCESS);
            };
            step.load().await;
            println!("{}", render::matches(&step));
            Ok(match step.state() {
                MatchesState::Failed(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Commands::Outreach {
            company,
            letter_file,
            copy,
            email,
        } => run_outreach(ctx, &company, letter_file, copy, email).await,
        Commands::Session => {
            let state = ctx.store.load()?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_context(config: &Config) -> Result<ClientContext> {
    let api = ApiClient::new(config.api_base_url.clone())
        .context("Failed to build HTTP client")?;
    info!("API base URL: {}", api.base_url());

    let network: Arc<dyn NetworkStatus> = match DnsProbe::from_base_url(&config.api_base_url) {
        Some(probe) => {
            debug!("Connectivity probe target: {}", probe.host_port());
            Arc::new(probe)
        }
        None => {
            warn!("Cannot derive a host from the API base URL; connectivity probe disabled");
            Arc::new(FixedStatus(true))
        }
    };

    let store = FileSessionStore::new(config.state_path.clone());
    info!("Session state file: {}", store.path().display());

    Ok(ClientContext {
        api: Arc::new(api),
        store: Arc::new(store),
        network,
        clipboard: Arc::new(Osc52Clipboard),
        mail: Arc::new(SystemMailLauncher),
        redirect_delay: config.redirect_delay,
    })
}

/// Unwraps a step entry, reporting redirects the way the terminal shows navigation.
fn enter<T>(entry: Entry<T>) -> Option<T> {
    match entry {
        Entry::Ready(step) => Some(step),
        Entry::Redirect(route) => {
            println!("No session found. Start here: {}", route.command_hint());
            None
        }
    }
}

async fn run_upload(ctx: ClientContext, files: &[PathBuf]) -> Result<ExitCode> {
    let mut step = UploadStep::new(ctx);

    let file = match ResumeFile::select(files).await {
        Ok(file) => file,
        Err(e) => {
            step.reject(&e);
            println!("{}", render::upload_status(step.status()));
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", render::upload_status(&steps::upload::UploadStatus::Uploading {
        file_name: file.file_name.clone(),
    }));
    let Some(transition) = step.submit(file).await else {
        println!("{}", render::upload_status(step.status()));
        return Ok(ExitCode::FAILURE);
    };
    println!("{}", render::upload_status(step.status()));
    println!("Continuing to {} shortly...", transition.target());

    let cancel = transition.cancel_handle();
    let next = tokio::select! {
        next = transition.wait() => next,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            None
        }
    };
    if let Some(route) = next {
        println!("Next: {}", route.command_hint());
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_outreach(
    ctx: ClientContext,
    company: &str,
    letter_file: Option<PathBuf>,
    copy: bool,
    email: Option<String>,
) -> Result<ExitCode> {
    let Some(mut step) = enter(OutreachStep::enter(ctx, company)) else {
        return Ok(ExitCode::SUCCESS);
    };
    step.load().await;
    if let OutreachState::Failed(_) = step.state() {
        println!("{}", render::outreach(&step));
        println!(
            "Try again: {}",
            Route::Outreach(step.requested_company().unwrap_or(company).to_string())
                .command_hint()
        );
        return Ok(ExitCode::FAILURE);
    }

    if let Some(path) = letter_file {
        let edited = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read cover letter from {}", path.display()))?;
        step.edit_cover_letter(edited);
    }

    let mut status = ExitCode::SUCCESS;
    if copy && step.copy_cover_letter().is_err() {
        status = ExitCode::FAILURE;
    }

    println!("{}", render::outreach(&step));

    if let Some(address) = email {
        match step.compose_email(&address) {
            Ok(()) => println!("{}", step.compose_url(&address)),
            Err(e @ ClientError::UnknownContact(_)) => {
                println!("Error: {e}");
                status = ExitCode::FAILURE;
            }
            Err(e) => {
                warn!("Could not open the mail handler: {e}");
                println!("{}", step.compose_url(&address));
                status = ExitCode::FAILURE;
            }
        }
    }

    Ok(status)
}
