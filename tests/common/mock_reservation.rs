//! Mock collaborators for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use media_flow::error::{Error, Result};
use media_flow::reservation::{ReservationDispatcher, ReservationService};
use media_flow::submit::{NavigationHost, PostingStage};
use media_flow::types::{
    ConnectionHandle, PickedMediaItem, ReservationRequest, ReturnReason, UploadSlot,
};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use uuid::Uuid;

use super::fixtures::make_slot;

/// Call record for `reserve_upload_urls`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveCall {
    pub request_id: Uuid,
    pub account: String,
    pub count: usize,
}

/// Simple mock reservation service
///
/// Features:
/// - Returns one predictable slot per requested item
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockReservationService {
    reserve_calls: Mutex<Vec<ReserveCall>>,
    error_on_reserve: Mutex<Option<String>>,
}

impl MockReservationService {
    pub fn new() -> Self {
        Self {
            reserve_calls: Mutex::new(Vec::new()),
            error_on_reserve: Mutex::new(None),
        }
    }

    /// Make `reserve_upload_urls` return an error
    pub fn fail_reserve(&self, msg: &str) {
        *self.error_on_reserve.lock().unwrap() = Some(msg.to_string());
    }

    /// Get all `reserve_upload_urls` calls
    pub fn get_reserve_calls(&self) -> Vec<ReserveCall> {
        self.reserve_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReservationService for MockReservationService {
    async fn reserve_upload_urls(
        &self,
        request_id: Uuid,
        connection: &ConnectionHandle,
        count: NonZeroUsize,
    ) -> Result<Vec<UploadSlot>> {
        self.reserve_calls.lock().unwrap().push(ReserveCall {
            request_id,
            account: connection.account.clone(),
            count: count.get(),
        });

        if let Some(msg) = self.error_on_reserve.lock().unwrap().as_ref() {
            return Err(Error::Reservation(msg.clone()));
        }

        Ok((0..count.get()).map(make_slot).collect())
    }
}

/// Dispatcher that only records what it was handed
#[derive(Default)]
pub struct RecordingDispatcher {
    requests: Mutex<Vec<ReservationRequest>>,
}

impl RecordingDispatcher {
    pub fn requests(&self) -> Vec<ReservationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn assert_single_request(&self, count: usize) {
        let requests = self.requests();
        assert_eq!(
            requests.len(),
            1,
            "Expected exactly one reservation request but got: {requests:?}"
        );
        assert_eq!(requests[0].item_count.get(), count);
    }
}

impl ReservationDispatcher for RecordingDispatcher {
    fn dispatch(&self, request: ReservationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// Posting stage + navigation host that record every call
#[derive(Default)]
pub struct RecordingHooks {
    presented: Mutex<Vec<(Uuid, Vec<PickedMediaItem>)>>,
    returns: Mutex<Vec<ReturnReason>>,
}

impl RecordingHooks {
    pub fn presented(&self) -> Vec<(Uuid, Vec<PickedMediaItem>)> {
        self.presented.lock().unwrap().clone()
    }

    pub fn returns(&self) -> Vec<ReturnReason> {
        self.returns.lock().unwrap().clone()
    }
}

impl PostingStage for RecordingHooks {
    fn present(&self, request_id: Uuid, items: &[PickedMediaItem]) {
        self.presented
            .lock()
            .unwrap()
            .push((request_id, items.to_vec()));
    }
}

impl NavigationHost for RecordingHooks {
    fn return_to_feed(&self, reason: ReturnReason) {
        self.returns.lock().unwrap().push(reason);
    }
}
