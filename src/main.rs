//! calmove - move every calendar event from one Google account to another.
//!
//! Authorizes both accounts through the OAuth authorization-code flow,
//! lists all events on the source calendar, then copies each one to the
//! destination and deletes it from the source. Per-event failures are
//! retried with a flat policy and reported at the end; the run itself
//! still completes.

mod app_config;
mod auth;
mod google;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use calmove_core::{migrate, RetryPolicy};
use google::GoogleCalendar;

#[derive(Parser)]
#[command(name = "calmove")]
#[command(about = "Move every calendar event from one Google account to another")]
struct Cli {
    /// OAuth client credentials file
    #[arg(long, default_value = "credentials.json")]
    credentials: PathBuf,

    /// Calendar to migrate, on both accounts
    #[arg(long, default_value = "primary")]
    calendar: String,

    /// Local port for the OAuth callback
    #[arg(long, default_value_t = 42069)]
    port: u16,

    /// Attempts per create/delete call before giving up on an event
    #[arg(long, default_value_t = calmove_core::migrate::DEFAULT_ATTEMPTS)]
    attempts: u32,

    /// Delay between retry attempts (e.g. "5s")
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    retry_delay: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let creds = app_config::load(&cli.credentials)?;
    let http = reqwest::Client::new();

    println!("Please authorize with the account that you want to move events *from*.");
    let source_session = auth::authorize(&creds, &http, cli.port).await?;
    let source = GoogleCalendar::new(source_session.access_token, cli.calendar.clone());
    let source_email = source
        .account_email()
        .await
        .context("Failed to look up the source account")?;
    println!("Authorized {source_email}.\n");

    println!("Please authorize with the account that you want to move events *to*.");
    let dest_session = auth::authorize(&creds, &http, cli.port).await?;
    let dest = GoogleCalendar::new(dest_session.access_token, cli.calendar.clone());
    let dest_email = dest
        .account_email()
        .await
        .context("Failed to look up the destination account")?;
    println!("Authorized {dest_email}.\n");

    let spinner = report::create_spinner("Fetching events from the source calendar".to_string());
    let events = source.list_events().await;
    spinner.finish_and_clear();
    let events = events.context("Failed to list events on the source calendar")?;

    println!("Found {} events.", events.len());

    let policy = RetryPolicy::new(cli.attempts, cli.retry_delay);
    let bar = report::create_progress_bar(events.len() as u64);
    let result = migrate(&events, &source, &dest, policy, |done, _total| {
        bar.set_position(done as u64);
    })
    .await;
    bar.finish();

    report::print_summary(&result, events.len());

    // Per-event failures were reported above; the run itself still counts
    // as complete.
    Ok(())
}
