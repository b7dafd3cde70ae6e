//! Test helpers for building resolvers and running rolls to completion.

use crate::config::ResolverConfig;
use crate::dice::{DieObserver, DieResolver, Outcome, Pose};

/// Upper bound on ticks any roll may take to resolve.
pub const SETTLE_BUDGET: u32 = 1000;

/// A resolver with the default config.
pub fn default_resolver(seed: u64) -> DieResolver {
    DieResolver::new(ResolverConfig::default(), seed).unwrap()
}

/// Run `ticks` fixed ticks.
pub fn run_ticks<O: DieObserver>(resolver: &mut DieResolver<O>, ticks: u32) {
    for _ in 0..ticks {
        resolver.tick();
    }
}

/// Tick until a new outcome is recorded.
///
/// Returns the outcome and the number of ticks it took, or `None` if
/// `max_ticks` ran out first.
pub fn run_until_outcome(resolver: &mut DieResolver, max_ticks: u32) -> Option<(Outcome, u32)> {
    let before = resolver.observer().len();
    for tick in 1..=max_ticks {
        resolver.tick();
        if resolver.observer().len() > before {
            return resolver.observer().last().map(|outcome| (*outcome, tick));
        }
    }
    None
}

/// Throw the die and wait for it to resolve.
pub fn roll_and_settle(resolver: &mut DieResolver) -> (Outcome, u32) {
    resolver.roll();
    run_until_outcome(resolver, SETTLE_BUDGET).expect("roll resolves within the settle budget")
}

/// Observer that counts poses and keeps every outcome.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Poses seen, one per tick
    pub poses: Vec<Pose>,
    /// Outcomes seen
    pub outcomes: Vec<Outcome>,
}

impl DieObserver for Recorder {
    fn on_pose(&mut self, pose: &Pose) {
        self.poses.push(*pose);
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }
}
