//! Cross-module tests for the die, the session and the history.
//!
//! - `determinism.rs`: same seed and same calls give the same states and outcomes
//! - `integration.rs`: full roll and session flows
//! - `helpers.rs`: resolver setup and run-until-outcome utilities

mod helpers;
mod integration;

pub use helpers::*;
