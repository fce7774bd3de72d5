//! CLI commands
//!
//! Command implementations for the `mflow` binary.

mod auth;
mod config;
mod hooks;
mod style;
mod submit;

pub use auth::{run_auth_setup, run_auth_test};
pub use config::{load_config, run_config};
pub use submit::run_submit;
