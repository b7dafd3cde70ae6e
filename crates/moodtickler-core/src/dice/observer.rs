//! What the resolver publishes: per-tick poses and per-roll outcomes.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::face::Face;
use crate::mood::Mood;

/// Render pose of the die. Consumers must not feed it back into the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation
    pub orientation: Quat,
}

/// The result of one roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// The mood on the upward face
    pub mood: Mood,
    /// The upward face
    pub face: Face,
    /// Upward alignment of that face at settle time
    pub alignment: f32,
    /// Resolver tick on which the outcome fired
    pub tick: u64,
    /// True when the settle timeout picked the face instead of the die
    pub forced: bool,
}

/// Receives resolver output.
///
/// `on_outcome` is called at most once per armed roll. `on_pose` is called
/// once per fixed tick and defaults to doing nothing.
pub trait DieObserver {
    /// A fixed tick finished; `pose` is the die's new pose.
    fn on_pose(&mut self, _pose: &Pose) {}

    /// The current roll resolved.
    fn on_outcome(&mut self, outcome: Outcome);
}

/// Discards everything.
impl DieObserver for () {
    fn on_outcome(&mut self, _outcome: Outcome) {}
}

/// Records every outcome in order.
impl DieObserver for Vec<Outcome> {
    fn on_outcome(&mut self, outcome: Outcome) {
        self.push(outcome);
    }
}

/// Keeps only the latest outcome until taken.
impl DieObserver for Option<Outcome> {
    fn on_outcome(&mut self, outcome: Outcome) {
        *self = Some(outcome);
    }
}

/// Adapts an outcome callback into an observer.
///
/// ```
/// use moodtickler_core::dice::{DieResolver, OnOutcome};
/// use moodtickler_core::ResolverConfig;
///
/// let mut moods = Vec::new();
/// let mut resolver = DieResolver::with_observer(
///     ResolverConfig::default(),
///     7,
///     OnOutcome::new(|outcome| moods.push(outcome.mood)),
/// )
/// .unwrap();
/// resolver.roll();
/// for _ in 0..1000 {
///     resolver.tick();
/// }
/// drop(resolver);
/// assert_eq!(moods.len(), 1);
/// ```
pub struct OnOutcome<F>(pub F);

impl<F: FnMut(Outcome)> OnOutcome<F> {
    /// Wrap `callback`. Closure argument types are inferred from here.
    #[must_use]
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F: FnMut(Outcome)> DieObserver for OnOutcome<F> {
    fn on_outcome(&mut self, outcome: Outcome) {
        (self.0)(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Outcome {
        Outcome {
            mood: Mood::Silly,
            face: Face::NegZ,
            alignment: 0.99,
            tick: 42,
            forced: false,
        }
    }

    #[test]
    fn vec_observer_records_in_order() {
        let mut seen: Vec<Outcome> = Vec::new();
        seen.on_outcome(sample());
        seen.on_outcome(Outcome { tick: 43, ..sample() });
        assert_eq!(seen.iter().map(|o| o.tick).collect::<Vec<_>>(), vec![42, 43]);
    }

    #[test]
    fn option_observer_keeps_latest() {
        let mut latest: Option<Outcome> = None;
        latest.on_outcome(sample());
        latest.on_outcome(Outcome { tick: 99, ..sample() });
        assert_eq!(latest.map(|o| o.tick), Some(99));
    }

    #[test]
    fn callback_observer_forwards() {
        let mut moods = Vec::new();
        {
            let mut observer = OnOutcome::new(|o| moods.push(o.mood));
            observer.on_outcome(sample());
        }
        assert_eq!(moods, vec![Mood::Silly]);
    }

    #[test]
    fn outcome_serializes_mood_label() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"mood\":\"silly\""));
    }
}
