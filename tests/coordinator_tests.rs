//! Submission flow tests against mock collaborators

mod common;

use common::fixtures::{make_image, make_images, make_video, test_connection};
use common::mock_reservation::{MockReservationService, RecordingDispatcher, RecordingHooks};
use media_flow::error::Error;
use media_flow::reservation::SpawnDispatcher;
use media_flow::submit::{SubmissionCoordinator, SubmissionStage};
use media_flow::types::{PostingOutcome, ReturnReason};
use std::sync::Arc;

struct Harness {
    coordinator: SubmissionCoordinator,
    dispatcher: Arc<RecordingDispatcher>,
    hooks: Arc<RecordingHooks>,
}

fn harness() -> Harness {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let hooks = Arc::new(RecordingHooks::default());
    let coordinator = SubmissionCoordinator::new(
        test_connection(),
        dispatcher.clone(),
        hooks.clone(),
        hooks.clone(),
    );
    Harness {
        coordinator,
        dispatcher,
        hooks,
    }
}

#[test]
fn test_three_items_reach_review_with_one_request() {
    let mut h = harness();
    let (a, b, c) = (make_image("a"), make_video("b"), make_image("c"));
    let selection = vec![a, b, c];

    h.coordinator.record_selection(selection.clone()).unwrap();
    h.coordinator.advance_to_review().unwrap();

    assert_eq!(h.coordinator.stage(), SubmissionStage::Reviewing);
    assert_eq!(h.coordinator.items(), selection.as_slice());
    h.dispatcher.assert_single_request(3);
}

#[test]
fn test_items_unchanged_after_review_for_various_sizes() {
    for n in [1, 2, 5, 10] {
        let mut h = harness();
        let selection = make_images(n);

        h.coordinator.record_selection(selection.clone()).unwrap();
        h.coordinator.advance_to_review().unwrap();

        assert_eq!(h.coordinator.stage(), SubmissionStage::Reviewing);
        assert_eq!(h.coordinator.items(), selection.as_slice());
        h.dispatcher.assert_single_request(n);
    }
}

#[test]
fn test_advance_on_empty_selection_fails() {
    let mut h = harness();
    h.coordinator.record_selection(vec![]).unwrap();

    let err = h.coordinator.advance_to_review().unwrap_err();

    assert!(matches!(err, Error::EmptySelection));
    assert_eq!(h.coordinator.stage(), SubmissionStage::Picking);
    assert!(h.dispatcher.requests().is_empty());
    assert!(h.hooks.presented().is_empty());
}

#[test]
fn test_second_advance_rejected_without_second_request() {
    let mut h = harness();
    h.coordinator.record_selection(make_images(2)).unwrap();
    let first = h.coordinator.advance_to_review().unwrap();

    let err = h.coordinator.advance_to_review().unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidState {
            stage: SubmissionStage::Reviewing,
            ..
        }
    ));
    h.dispatcher.assert_single_request(2);
    assert_eq!(h.coordinator.pending_request(), Some(first));
}

#[test]
fn test_cancel_from_picking_resets_and_returns_to_feed() {
    let mut h = harness();
    h.coordinator.record_selection(make_images(4)).unwrap();

    h.coordinator.cancel().unwrap();

    assert_eq!(h.coordinator.stage(), SubmissionStage::Picking);
    assert!(h.coordinator.items().is_empty());
    assert_eq!(h.hooks.returns(), vec![ReturnReason::Cancelled]);

    // The same instance is usable again after a cancel
    h.coordinator.record_selection(make_images(1)).unwrap();
    h.coordinator.advance_to_review().unwrap();
    h.dispatcher.assert_single_request(1);
}

#[test]
fn test_cancel_from_review_rejected() {
    let mut h = harness();
    h.coordinator.record_selection(make_images(2)).unwrap();
    h.coordinator.advance_to_review().unwrap();

    let err = h.coordinator.cancel().unwrap_err();

    assert!(matches!(err, Error::InvalidState { .. }));
    assert_eq!(h.coordinator.stage(), SubmissionStage::Reviewing);
    assert_eq!(h.coordinator.items().len(), 2);
    assert!(h.hooks.returns().is_empty());
}

#[test]
fn test_record_selection_during_review_rejected() {
    let mut h = harness();
    let selection = make_images(2);
    h.coordinator.record_selection(selection.clone()).unwrap();
    h.coordinator.advance_to_review().unwrap();

    let err = h.coordinator.record_selection(make_images(5)).unwrap_err();

    assert!(matches!(err, Error::InvalidState { .. }));
    assert_eq!(h.coordinator.items(), selection.as_slice());
}

#[test]
fn test_posting_stage_sees_frozen_items_and_request_id() {
    let mut h = harness();
    let selection = make_images(3);
    h.coordinator.record_selection(selection.clone()).unwrap();

    let request_id = h.coordinator.advance_to_review().unwrap();

    let presented = h.hooks.presented();
    assert_eq!(presented.len(), 1);
    assert_eq!(presented[0].0, request_id);
    assert_eq!(presented[0].1, selection);
    assert_eq!(h.dispatcher.requests()[0].id, request_id);
}

#[test]
fn test_complete_posting_releases_items() {
    let mut h = harness();
    let selection = make_images(2);
    h.coordinator.record_selection(selection.clone()).unwrap();
    h.coordinator.advance_to_review().unwrap();

    let released = h.coordinator.complete_posting(PostingOutcome::Posted).unwrap();

    assert_eq!(released, selection);
    assert_eq!(h.coordinator.stage(), SubmissionStage::Finished);
    assert!(h.coordinator.items().is_empty());
    assert_eq!(h.hooks.returns(), vec![ReturnReason::Posted]);
}

#[test]
fn test_complete_posting_twice_rejected() {
    let mut h = harness();
    h.coordinator.record_selection(make_images(1)).unwrap();
    h.coordinator.advance_to_review().unwrap();
    h.coordinator
        .complete_posting(PostingOutcome::Dismissed)
        .unwrap();

    let err = h
        .coordinator
        .complete_posting(PostingOutcome::Posted)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidState {
            stage: SubmissionStage::Finished,
            ..
        }
    ));
    assert_eq!(h.hooks.returns(), vec![ReturnReason::Dismissed]);
}

#[tokio::test]
async fn test_spawned_reservation_reaches_posting_stage() {
    let service = Arc::new(MockReservationService::new());
    let (dispatcher, mut outcomes) = SpawnDispatcher::on_current_runtime(service.clone()).unwrap();
    let hooks = Arc::new(RecordingHooks::default());
    let mut coordinator = SubmissionCoordinator::new(
        test_connection(),
        Arc::new(dispatcher),
        hooks.clone(),
        hooks.clone(),
    );

    coordinator.record_selection(make_images(3)).unwrap();
    let request_id = coordinator.advance_to_review().unwrap();

    let outcome = outcomes.recv().await.unwrap();
    assert_eq!(outcome.request_id, request_id);
    assert_eq!(outcome.result.unwrap().len(), 3);

    let calls = service.get_reserve_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].count, 3);
    assert_eq!(calls[0].account, "tester");
    assert_eq!(calls[0].request_id, request_id);
}

#[tokio::test]
async fn test_spawned_reservation_failure_leaves_coordinator_in_review() {
    let service = Arc::new(MockReservationService::new());
    service.fail_reserve("quota exceeded");
    let (dispatcher, mut outcomes) = SpawnDispatcher::on_current_runtime(service.clone()).unwrap();
    let hooks = Arc::new(RecordingHooks::default());
    let mut coordinator = SubmissionCoordinator::new(
        test_connection(),
        Arc::new(dispatcher),
        hooks.clone(),
        hooks.clone(),
    );

    coordinator.record_selection(make_images(1)).unwrap();
    coordinator.advance_to_review().unwrap();

    let outcome = outcomes.recv().await.unwrap();
    assert!(matches!(outcome.result, Err(Error::Reservation(_))));
    assert_eq!(coordinator.stage(), SubmissionStage::Reviewing);

    coordinator
        .complete_posting(PostingOutcome::Dismissed)
        .unwrap();
    assert_eq!(hooks.returns(), vec![ReturnReason::Dismissed]);
}
