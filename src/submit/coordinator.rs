//! Submission coordinator
//!
//! Holds the picked items and the current stage. All operations are
//! synchronous; the only asynchronous effect (the slot reservation) is handed
//! to a [`ReservationDispatcher`] and never awaited here.

use crate::error::{Error, Result};
use crate::reservation::ReservationDispatcher;
use crate::submit::hooks::{NavigationHost, PostingStage};
use crate::types::{
    ConnectionHandle, PickedMediaItem, PostingOutcome, ReservationRequest, ReturnReason,
};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Phase of the submission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    /// Selection can still change
    Picking,
    /// Upload slots requested, selection frozen
    Reviewing,
    /// Posting stage reported back, items released
    Finished,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Picking => write!(f, "picking"),
            Self::Reviewing => write!(f, "reviewing"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// Drives one media submission flow
///
/// A coordinator is single-use past `Picking`: once it has entered review,
/// starting over means building a new one.
pub struct SubmissionCoordinator {
    stage: SubmissionStage,
    items: Vec<PickedMediaItem>,
    pending_request: Option<Uuid>,
    connection: ConnectionHandle,
    dispatcher: Arc<dyn ReservationDispatcher>,
    posting: Arc<dyn PostingStage>,
    navigation: Arc<dyn NavigationHost>,
}

impl SubmissionCoordinator {
    /// Create a coordinator in the `Picking` stage with no items
    pub fn new(
        connection: ConnectionHandle,
        dispatcher: Arc<dyn ReservationDispatcher>,
        posting: Arc<dyn PostingStage>,
        navigation: Arc<dyn NavigationHost>,
    ) -> Self {
        Self {
            stage: SubmissionStage::Picking,
            items: Vec::new(),
            pending_request: None,
            connection,
            dispatcher,
            posting,
            navigation,
        }
    }

    /// Current stage
    pub const fn stage(&self) -> SubmissionStage {
        self.stage
    }

    /// Items currently held, in pick order
    pub fn items(&self) -> &[PickedMediaItem] {
        &self.items
    }

    /// Correlation id of the dispatched reservation, once in review
    pub const fn pending_request(&self) -> Option<Uuid> {
        self.pending_request
    }

    /// Replace the current selection
    ///
    /// Only allowed while picking. An empty selection is accepted.
    pub fn record_selection(&mut self, items: Vec<PickedMediaItem>) -> Result<()> {
        self.ensure_stage(SubmissionStage::Picking, "change the selection")?;
        debug!(item_count = items.len(), "selection recorded");
        self.items = items;
        Ok(())
    }

    /// Freeze the selection and request one upload slot per item
    ///
    /// Returns the reservation's correlation id as soon as the request is
    /// handed off. The outcome goes to the posting stage, not back here.
    pub fn advance_to_review(&mut self) -> Result<Uuid> {
        self.ensure_stage(SubmissionStage::Picking, "advance to review")?;
        let item_count = NonZeroUsize::new(self.items.len()).ok_or(Error::EmptySelection)?;

        let request = ReservationRequest::new(self.connection.clone(), item_count);
        let request_id = request.id;

        self.stage = SubmissionStage::Reviewing;
        self.pending_request = Some(request_id);

        info!(%request_id, item_count = item_count.get(), "requesting upload slots");
        self.dispatcher.dispatch(request);
        self.posting.present(request_id, &self.items);

        Ok(request_id)
    }

    /// Abandon the selection and go back to the feed
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_stage(SubmissionStage::Picking, "cancel")?;
        debug!(dropped = self.items.len(), "selection cancelled");
        self.items.clear();
        self.navigation.return_to_feed(ReturnReason::Cancelled);
        Ok(())
    }

    /// Completion hook for the posting stage
    ///
    /// Ends the flow and releases the items to the caller.
    pub fn complete_posting(&mut self, outcome: PostingOutcome) -> Result<Vec<PickedMediaItem>> {
        self.ensure_stage(SubmissionStage::Reviewing, "complete posting")?;
        self.stage = SubmissionStage::Finished;
        debug!(?outcome, request_id = ?self.pending_request, "posting finished");
        let released = std::mem::take(&mut self.items);
        self.navigation.return_to_feed(outcome.into());
        Ok(released)
    }

    fn ensure_stage(&self, expected: SubmissionStage, operation: &'static str) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                stage: self.stage,
            })
        }
    }
}

impl fmt::Debug for SubmissionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionCoordinator")
            .field("stage", &self.stage)
            .field("items", &self.items.len())
            .field("pending_request", &self.pending_request)
            .finish_non_exhaustive()
    }
}
