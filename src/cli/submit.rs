//! Submit command - pick files and reserve upload slots for them

use crate::cli::hooks::CliHooks;
use crate::cli::style::{check, cross, hyperlink_url, spinner_style, Stream, Stylize};
use anstream::{eprintln, println};
use indicatif::ProgressBar;
use media_flow::auth::get_auth;
use media_flow::config::Config;
use media_flow::error::{Error, Result};
use media_flow::picker::{MediaSource, PathSource};
use media_flow::reservation::{create_reservation_service, ReservationOutcome, SpawnDispatcher};
use media_flow::submit::SubmissionCoordinator;
use media_flow::types::{PickedMediaItem, PostingOutcome, UploadSlot};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

/// Run the submit command
pub async fn run_submit(config: &Config, files: Vec<PathBuf>, dry_run: bool) -> Result<()> {
    let items = PathSource::new(files, config.max_items).pick()?;

    if dry_run {
        return report_dry_run(config, &items);
    }

    let account = config.account.clone().ok_or_else(|| {
        Error::Config("no account configured. Set MFLOW_ACCOUNT or pass --account".to_string())
    })?;
    let auth = get_auth()?;
    let service = Arc::from(create_reservation_service(config)?);
    let (dispatcher, mut outcomes) = SpawnDispatcher::on_current_runtime(service)?;

    let hooks = Arc::new(CliHooks);
    let mut coordinator = SubmissionCoordinator::new(
        auth.connection(account),
        Arc::new(dispatcher),
        hooks.clone(),
        hooks,
    );

    coordinator.record_selection(items)?;
    let request_id = coordinator.advance_to_review()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Reserving upload slots...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    let outcome = wait_for_outcome(&mut outcomes, request_id).await;
    spinner.finish_and_clear();

    match outcome?.result {
        Ok(slots) => {
            report_slots(coordinator.items(), &slots);
            coordinator.complete_posting(PostingOutcome::Posted)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", cross(), "Reservation failed".error());
            coordinator.complete_posting(PostingOutcome::Dismissed)?;
            Err(e)
        }
    }
}

async fn wait_for_outcome(
    outcomes: &mut UnboundedReceiver<ReservationOutcome>,
    request_id: Uuid,
) -> Result<ReservationOutcome> {
    while let Some(outcome) = outcomes.recv().await {
        if outcome.request_id == request_id {
            return Ok(outcome);
        }
    }
    Err(Error::Internal(
        "reservation task ended without reporting".to_string(),
    ))
}

fn report_slots(items: &[PickedMediaItem], slots: &[UploadSlot]) {
    println!();
    for (item, slot) in items.iter().zip(slots) {
        println!("{} {}", check(), item.location.display().emphasis());
        println!("    put {}", slot.put_url.as_str().muted());
        println!(
            "    get {}",
            hyperlink_url(Stream::Stdout, slot.get_url.as_str())
        );
    }
    println!();
    println!(
        "Reserved {} upload slot{}",
        slots.len().accent(),
        if slots.len() == 1 { "" } else { "s" }
    );
}

fn report_dry_run(config: &Config, items: &[PickedMediaItem]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::EmptySelection);
    }

    println!("{}", "Dry run - no slots will be reserved".muted());
    let endpoint = config
        .endpoint
        .as_ref()
        .map_or_else(|| "(no endpoint configured)".to_string(), ToString::to_string);
    println!(
        "Would reserve {} upload slot{} at {}:",
        items.len().accent(),
        if items.len() == 1 { "" } else { "s" },
        endpoint.accent()
    );
    for item in items {
        println!("  - {} ({})", item.location.display(), item.kind);
    }
    Ok(())
}
