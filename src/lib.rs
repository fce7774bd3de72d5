//! media-flow - Media submission flow coordinator
//!
//! Sequences a picked set of media items through an upload-slot reservation
//! before handing them to a posting stage.
//!
//! The library is interface-agnostic: the `mflow` binary is one consumer,
//! a UI layer can drive [`submit::SubmissionCoordinator`] the same way.

pub mod auth;
pub mod config;
pub mod error;
pub mod picker;
pub mod reservation;
pub mod submit;
pub mod types;
