//! Collaborator traits the coordinator reports to
//!
//! These let different interfaces (CLI, GUI shell, etc.) react to the flow
//! without the coordinator knowing how they render anything.

use crate::types::{PickedMediaItem, ReturnReason};
use uuid::Uuid;

/// Receives the frozen selection when the flow enters review
///
/// The reservation outcome for `request_id` arrives separately, through
/// whatever channel the dispatcher was built with.
pub trait PostingStage: Send + Sync {
    /// Called once, right after the reservation request was dispatched
    fn present(&self, request_id: Uuid, items: &[PickedMediaItem]);
}

/// Owner of the screen the flow was opened from
pub trait NavigationHost: Send + Sync {
    /// Called when the flow hands control back to the feed
    fn return_to_feed(&self, reason: ReturnReason);
}

/// No-op hooks for testing or headless use
pub struct NoopHooks;

impl PostingStage for NoopHooks {
    fn present(&self, _request_id: Uuid, _items: &[PickedMediaItem]) {}
}

impl NavigationHost for NoopHooks {
    fn return_to_feed(&self, _reason: ReturnReason) {}
}
