//! HTTP reservation service implementation

use crate::error::{Error, Result};
use crate::reservation::ReservationService;
use crate::types::{ConnectionHandle, UploadSlot};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

const RESERVATIONS_PATH: &str = "v1/uploads/reservations";

/// Retry schedule for transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based), doubling each time
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

#[derive(Debug, Serialize)]
struct ReserveBody<'a> {
    request_id: Uuid,
    account: &'a str,
    count: usize,
}

#[derive(Debug, Deserialize)]
struct ReserveResponse {
    slots: Vec<UploadSlot>,
}

/// Reservation service speaking JSON over HTTP
pub struct HttpReservationService {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl HttpReservationService {
    /// Create a new HTTP reservation service rooted at `endpoint`
    pub fn new(endpoint: Url, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("media-flow/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: with_trailing_slash(endpoint),
            retry,
        })
    }

    /// Base URL requests are sent to
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send_once(
        &self,
        url: &Url,
        request_id: Uuid,
        connection: &ConnectionHandle,
        count: NonZeroUsize,
    ) -> Result<Vec<UploadSlot>> {
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&connection.token)
            .json(&ReserveBody {
                request_id,
                account: &connection.account,
                count: count.get(),
            })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Error::ServiceUnavailable(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Reservation(format!("HTTP {status}: {}", body.trim())));
        }

        let body: ReserveResponse = response.json().await?;
        Ok(body.slots)
    }
}

#[async_trait]
impl ReservationService for HttpReservationService {
    async fn reserve_upload_urls(
        &self,
        request_id: Uuid,
        connection: &ConnectionHandle,
        count: NonZeroUsize,
    ) -> Result<Vec<UploadSlot>> {
        let url = self.endpoint.join(RESERVATIONS_PATH)?;
        let mut attempt = 1;

        let slots = loop {
            match self.send_once(&url, request_id, connection, count).await {
                Ok(slots) => break slots,
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff_after(attempt);
                    warn!(
                        %request_id,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "reservation attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        if slots.len() != count.get() {
            return Err(Error::Reservation(format!(
                "expected {} slots, service returned {}",
                count,
                slots.len()
            )));
        }

        debug!(%request_id, attempt, "reservation accepted");
        Ok(slots)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
