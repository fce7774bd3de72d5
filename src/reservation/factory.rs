//! Reservation service factory
//!
//! Creates the reservation service based on configuration.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::reservation::{HttpReservationService, ReservationService, RetryPolicy};
use std::time::Duration;

/// Create a reservation service from configuration
pub fn create_reservation_service(config: &Config) -> Result<Box<dyn ReservationService>> {
    let endpoint = config.endpoint.clone().ok_or_else(|| {
        Error::Config(
            "no reservation endpoint configured. Set MFLOW_ENDPOINT or pass --endpoint".to_string(),
        )
    })?;

    let retry = RetryPolicy {
        max_attempts: config.max_attempts.max(1),
        initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        max_backoff: Duration::from_millis(config.max_backoff_ms),
    };

    Ok(Box::new(HttpReservationService::new(
        endpoint,
        Duration::from_secs(config.request_timeout_secs),
        retry,
    )?))
}
