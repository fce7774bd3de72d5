//! Fire-and-forget reservation dispatch on a tokio runtime

use crate::error::{Error, Result};
use crate::reservation::{ReservationDispatcher, ReservationOutcome, ReservationService};
use crate::types::ReservationRequest;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Runs each reservation on its own task and forwards the outcome
///
/// Outcomes go to the receiver returned by [`SpawnDispatcher::new`], which
/// belongs to the posting stage. Nothing is reported back to the caller of
/// [`ReservationDispatcher::dispatch`].
pub struct SpawnDispatcher {
    service: Arc<dyn ReservationService>,
    outcomes: mpsc::UnboundedSender<ReservationOutcome>,
    runtime: Handle,
}

impl SpawnDispatcher {
    /// Create a dispatcher that spawns onto `runtime`
    pub fn new(
        service: Arc<dyn ReservationService>,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<ReservationOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        (
            Self {
                service,
                outcomes,
                runtime,
            },
            receiver,
        )
    }

    /// Create a dispatcher bound to the runtime the caller is running on
    pub fn on_current_runtime(
        service: Arc<dyn ReservationService>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ReservationOutcome>)> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::Internal(format!("no tokio runtime available: {e}")))?;
        Ok(Self::new(service, runtime))
    }
}

impl SpawnDispatcher {
    /// Spawn the reservation for `request` and return the forwarding task
    ///
    /// The service call runs on an inner task so a panicking service still
    /// produces an outcome.
    pub fn spawn_reservation(&self, request: ReservationRequest) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let outcomes = self.outcomes.clone();
        let runtime = self.runtime.clone();

        self.runtime.spawn(async move {
            let request_id = request.id;
            let call = runtime.spawn(async move {
                service
                    .reserve_upload_urls(request.id, &request.connection, request.item_count)
                    .await
            });
            let result = match call.await {
                Ok(result) => result,
                Err(e) => Err(Error::Internal(format!("reservation task panicked: {e}"))),
            };

            match &result {
                Ok(slots) => debug!(%request_id, slots = slots.len(), "upload slots reserved"),
                Err(e) => warn!(%request_id, error = %e, "upload slot reservation failed"),
            }

            if outcomes
                .send(ReservationOutcome { request_id, result })
                .is_err()
            {
                debug!(%request_id, "posting stage gone, reservation outcome dropped");
            }
        })
    }
}

impl ReservationDispatcher for SpawnDispatcher {
    fn dispatch(&self, request: ReservationRequest) {
        drop(self.spawn_reservation(request));
    }
}
