//! The physics die.
//!
//! A unit cube is thrown onto the ground plane; once it comes to rest, the face
//! pointing up picks a mood.
//!
//! - [`face`]: face axes and face-up detection
//! - [`observer`]: poses and outcomes, and the [`DieObserver`] that receives them
//! - [`resolver`]: the [`DieResolver`] that owns the simulation and the roll state
//! - [`signal`]: edge detection for the host's reset counter

pub mod face;
pub mod observer;
pub mod resolver;
pub mod signal;

pub use face::{face_up, Face, FaceUp};
pub use observer::{DieObserver, OnOutcome, Outcome, Pose};
pub use resolver::{DieResolver, RollState};
pub use signal::ResetSignal;
