// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cardserv: Card Services console
//
// Entry point.  Initialises logging, loads settings, opens the client and
// dispatches the chosen subcommand.

mod report;
mod workflow;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use cardserv_client::{CardServicesClient, CardTypeChoice, ClientConfig};
use cardserv_core::config::Settings;
use cardserv_core::error::{CardServicesError, Result};
use cardserv_core::human_errors::{Severity, humanize_error};
use cardserv_core::types::JobId;

use workflow::RunOptions;

#[derive(Parser)]
#[command(name = "cardserv")]
#[command(about = "Card Services client console")]
struct Cli {
    /// Settings file (JSON).  Environment variables override it.
    #[arg(long, default_value = "cardserv.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one card request against the first organization, profile and destination
    Run {
        /// Card type to print (defaults to the profile's first option)
        #[arg(long)]
        card_type: Option<String>,
        /// Render the card image only; nothing is printed
        #[arg(long)]
        render_only: bool,
        /// Poll the job until it finishes
        #[arg(long)]
        wait: bool,
    },
    /// List organizations with their units, locations, devices and profiles
    Orgs,
    /// Show a job and its card-read results
    Job {
        /// Job unique id
        id: String,
    },
    /// List recently submitted jobs
    Recent {
        #[arg(long, default_value_t = 100)]
        limit: u32,
        /// Look-back window in hours
        #[arg(long, default_value_t = 24)]
        hours: u64,
    },
    /// Poll a job until it reaches a final status
    Wait {
        /// Job unique id
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("cardserv starting");

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            let _ = report_error(&mut io::stderr().lock(), &err);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::load(Some(&cli.config))?;
    let client = CardServicesClient::new(ClientConfig::from_settings(&settings)?)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Run {
        card_type: None,
        render_only: false,
        wait: false,
    }) {
        Commands::Run {
            card_type,
            render_only,
            wait,
        } => {
            let options = RunOptions {
                card_type: card_type.map_or(CardTypeChoice::First, CardTypeChoice::Named),
                render_only,
                wait,
            };
            workflow::run(&client, &settings, &options, &mut out).await?;
        }
        Commands::Orgs => workflow::list_hierarchy(&client, &mut out).await?,
        Commands::Job { id } => workflow::show_job(&client, &JobId::new(id), &mut out).await?,
        Commands::Recent { limit, hours } => {
            let period = Duration::from_secs(hours.saturating_mul(60 * 60));
            workflow::recent(&client, limit, period, &mut out).await?;
        }
        Commands::Wait { id } => {
            workflow::wait_for_job(&client, &settings, &JobId::new(id), &mut out).await?
        }
    }
    out.flush()?;
    Ok(())
}

fn report_error(out: &mut impl Write, err: &CardServicesError) -> io::Result<()> {
    let human = humanize_error(err);
    let label = match human.severity {
        Severity::Transient => "Temporary problem",
        Severity::ActionRequired => "Action needed",
        Severity::Permanent => "Error",
    };
    writeln!(out, "{label}: {}", human.message)?;
    if err.is_remote() {
        writeln!(out, "  Card Services reported: {err}")?;
    }
    writeln!(out, "  {}", human.suggestion)?;
    if human.retriable {
        writeln!(out, "  Running the command again may succeed.")?;
    }
    Ok(())
}
