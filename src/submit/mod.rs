//! Media submission flow
//!
//! Moves a picked set of media through two stages:
//! 1. Picking - the selection can be replaced or abandoned
//! 2. Reviewing - upload slots have been requested, the selection is frozen
//!
//! The posting stage closes the flow via
//! [`SubmissionCoordinator::complete_posting`].

mod coordinator;
mod hooks;

pub use coordinator::{SubmissionCoordinator, SubmissionStage};
pub use hooks::{NavigationHost, NoopHooks, PostingStage};
