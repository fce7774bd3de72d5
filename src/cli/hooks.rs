//! CLI hooks: the terminal plays both posting stage and navigation host

use crate::cli::style::{arrow, bullet, Stylize};
use anstream::println;
use media_flow::submit::{NavigationHost, PostingStage};
use media_flow::types::{PickedMediaItem, ReturnReason};
use uuid::Uuid;

/// Prints flow events to stdout
pub struct CliHooks;

impl PostingStage for CliHooks {
    fn present(&self, request_id: Uuid, items: &[PickedMediaItem]) {
        println!(
            "{} {} {}",
            "Reviewing".emphasis(),
            items.len().accent(),
            if items.len() == 1 { "item" } else { "items" }
        );
        for item in items {
            println!(
                "  {} {} {}",
                bullet(),
                item.location.display().accent(),
                format!("({})", item.kind).muted()
            );
        }
        println!("  {}", format!("request {request_id}").muted());
    }
}

impl NavigationHost for CliHooks {
    fn return_to_feed(&self, reason: ReturnReason) {
        let label = match reason {
            ReturnReason::Cancelled => "cancelled",
            ReturnReason::Posted => "done",
            ReturnReason::Dismissed => "dismissed",
        };
        println!("{} {}", arrow(), format!("Back to feed ({label})").muted());
    }
}
