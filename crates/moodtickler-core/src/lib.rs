//! # MoodTickler Core
//!
//! A mood check-in toy: pick one of ten moods (or throw a physics die that
//! picks one of six) and get back a message, a joke and a playful action.
//!
//! ## Architecture
//!
//! - **Moods**: the fixed ten-entry catalog ([`mood`])
//! - **Dice**: a seeded rigid-body die that reports its face-up mood ([`dice`])
//! - **History**: recorded selections and the chart statistics ([`history`])
//! - **Session**: the host controller tying the three together ([`session`])
//!
//! Physics lives in the [`tumble`] crate, which knows nothing about moods.
//!
//! ## Usage
//!
//! ```
//! use moodtickler_core::{Mood, MoodSession, ResolverConfig};
//!
//! let mut session = MoodSession::new(ResolverConfig::default(), 7).unwrap();
//! let response = session.select(Mood::Curious, 1_710_000_000_000);
//! assert_eq!(response.emoji, "🤔");
//!
//! session.roll_die();
//! let outcome = (0..1000).find_map(|t| session.tick(t)).unwrap();
//! assert_eq!(session.selected(), Some(outcome.mood));
//! assert_eq!(session.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the physics substrate
pub use tumble;

pub mod config;
pub mod dice;
pub mod error;
pub mod history;
pub mod mood;
pub mod session;
pub mod timestamp;

#[cfg(test)]
mod tests;

pub use config::{LaunchConfig, ResolverConfig, FIXED_DT};
pub use error::MoodError;
pub use history::{MoodEntry, MoodHistory, MoodSlice, MoodStats};
pub use mood::{Mood, MoodData};
pub use session::MoodSession;
