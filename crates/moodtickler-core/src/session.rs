//! The host side: selecting moods, rolling the die, keeping history.
//!
//! A [`MoodSession`] is what a UI holds. Picking a mood (by hand or by die)
//! records it, returns the canned response and hides the die again by bumping
//! the reset counter the resolver watches.

use tracing::info;

use crate::config::ResolverConfig;
use crate::dice::{DieResolver, Outcome, Pose};
use crate::error::MoodError;
use crate::history::{MoodHistory, MoodStats};
use crate::mood::{Mood, MoodData};

/// Upper bound on fixed ticks run for a single frame.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

/// Selection state, history and the die, owned together.
pub struct MoodSession {
    resolver: DieResolver<Option<Outcome>>,
    history: MoodHistory,
    selected: Option<Mood>,
    reset_counter: u64,
}

impl MoodSession {
    /// Start a session with an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: ResolverConfig, seed: u64) -> Result<Self, MoodError> {
        Self::with_history(config, seed, MoodHistory::new())
    }

    /// Start a session from a previously stored history.
    ///
    /// The die starts hidden; it appears on the first [`roll_die`](Self::roll_die).
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn with_history(
        config: ResolverConfig,
        seed: u64,
        history: MoodHistory,
    ) -> Result<Self, MoodError> {
        let mut resolver = DieResolver::with_observer(config, seed, None)?;
        resolver.reset();
        Ok(Self {
            resolver,
            history,
            selected: None,
            reset_counter: 0,
        })
    }

    /// Pick a mood: record it, hide the die and return the response.
    pub fn select(&mut self, mood: Mood, timestamp_ms: u64) -> &'static MoodData {
        self.selected = Some(mood);
        self.history.record(mood, timestamp_ms);
        self.reset_counter += 1;
        self.resolver.observe_reset(self.reset_counter);
        info!(%mood, recorded = self.history.len(), "mood selected");
        mood.data()
    }

    /// Throw the die.
    pub fn roll_die(&mut self) {
        self.resolver.roll();
    }

    /// Run one fixed tick. A die outcome is selected immediately and returned.
    pub fn tick(&mut self, timestamp_ms: u64) -> Option<Outcome> {
        self.resolver.tick();
        self.take_outcome(timestamp_ms)
    }

    /// Consume a frame's worth of time. A die outcome is selected immediately and returned.
    pub fn advance(&mut self, frame_dt: f32, timestamp_ms: u64) -> Option<Outcome> {
        self.resolver.advance(frame_dt, MAX_TICKS_PER_FRAME);
        self.take_outcome(timestamp_ms)
    }

    fn take_outcome(&mut self, timestamp_ms: u64) -> Option<Outcome> {
        let outcome = self.resolver.observer_mut().take()?;
        self.select(outcome.mood, timestamp_ms);
        Some(outcome)
    }

    /// Forget all history and the current selection.
    pub fn reset_history(&mut self) {
        self.history.clear();
        self.selected = None;
        info!("mood history cleared");
    }

    /// The current selection.
    #[must_use]
    pub fn selected(&self) -> Option<Mood> {
        self.selected
    }

    /// Response for the current selection.
    #[must_use]
    pub fn response(&self) -> Option<&'static MoodData> {
        self.selected.map(Mood::data)
    }

    /// Recorded history.
    #[must_use]
    pub fn history(&self) -> &MoodHistory {
        &self.history
    }

    /// Statistics over the recorded history.
    #[must_use]
    pub fn stats(&self) -> MoodStats {
        self.history.stats()
    }

    /// Die pose for rendering.
    #[must_use]
    pub fn die_pose(&self) -> Pose {
        self.resolver.pose()
    }

    /// True while a die roll is in flight.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.resolver.state().is_rolling()
    }

    /// The die resolver.
    #[must_use]
    pub fn resolver(&self) -> &DieResolver<Option<Outcome>> {
        &self.resolver
    }

    /// Number of selections made since the session started.
    #[must_use]
    pub fn reset_counter(&self) -> u64 {
        self.reset_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> MoodSession {
        MoodSession::new(ResolverConfig::default(), 11).unwrap()
    }

    #[test]
    fn die_starts_hidden() {
        let mut session = session();
        assert!(!session.is_rolling());
        assert!(!session
            .resolver()
            .play_area()
            .contains(session.die_pose().position));
        for t in 0..300 {
            assert!(session.tick(t).is_none());
        }
        assert!(session.history().is_empty());
    }

    #[test]
    fn select_records_and_responds() {
        let mut session = session();
        let response = session.select(Mood::Confident, 1_000);
        assert_eq!(response.emoji, "😎");
        assert_eq!(session.selected(), Some(Mood::Confident));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.reset_counter(), 1);
        assert_eq!(session.response().map(|d| d.sound_clip), Some("tchaikovsky-1812"));
    }

    #[test]
    fn manual_selection_cancels_a_roll() {
        let mut session = session();
        session.roll_die();
        assert!(session.is_rolling());
        session.select(Mood::Anxious, 5);
        assert!(!session.is_rolling());
        for t in 0..1200 {
            assert!(session.tick(t).is_none());
        }
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn rolled_outcome_becomes_selection() {
        let mut session = session();
        session.roll_die();
        let mut rolled = None;
        for t in 0..1000 {
            if let Some(outcome) = session.tick(t) {
                rolled = Some(outcome);
                break;
            }
        }
        let outcome = rolled.expect("roll resolves within the settle timeout");
        assert_eq!(session.selected(), Some(outcome.mood));
        assert_eq!(session.history().len(), 1);
        assert!(Mood::DIE_FACES.contains(&outcome.mood));
        // Selecting hid the die again
        assert!(!session.is_rolling());
    }

    #[test]
    fn reset_history_clears_selection() {
        let mut session = session();
        session.select(Mood::Happy, 1);
        session.select(Mood::Sad, 2);
        session.reset_history();
        assert!(session.history().is_empty());
        assert_eq!(session.selected(), None);
        assert!(session.stats().is_empty());
    }

    #[test]
    fn restores_stored_history() {
        let stored = MoodHistory::from_json(r#"[{"mood":"silly","timestamp":3}]"#).unwrap();
        let mut session = MoodSession::with_history(ResolverConfig::default(), 1, stored).unwrap();
        session.select(Mood::Silly, 4);
        assert_eq!(session.stats().count(Mood::Silly), 2);
    }
}
