//! Upload slot reservation
//!
//! Provides the service interface for reserving upload destinations and the
//! dispatcher that runs reservations off the caller's path.

mod dispatch;
mod factory;
mod http;

pub use dispatch::SpawnDispatcher;
pub use factory::create_reservation_service;
pub use http::{HttpReservationService, RetryPolicy};

use crate::error::Result;
use crate::types::{ConnectionHandle, ReservationRequest, UploadSlot};
use async_trait::async_trait;
use std::num::NonZeroUsize;
use uuid::Uuid;

/// Service that allocates upload destinations for a batch of media
///
/// Implementations own their transport and retry behaviour. A successful
/// call returns exactly `count` slots.
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Reserve `count` upload slots for `connection`
    async fn reserve_upload_urls(
        &self,
        request_id: Uuid,
        connection: &ConnectionHandle,
        count: NonZeroUsize,
    ) -> Result<Vec<UploadSlot>>;
}

/// Hands a reservation request off without waiting for it
pub trait ReservationDispatcher: Send + Sync {
    /// Start the reservation; must return without blocking
    fn dispatch(&self, request: ReservationRequest);
}

/// Result of a dispatched reservation, delivered to the posting stage
#[derive(Debug)]
pub struct ReservationOutcome {
    /// Correlation id of the request
    pub request_id: Uuid,
    /// Reserved slots, or why there are none
    pub result: Result<Vec<UploadSlot>>,
}
