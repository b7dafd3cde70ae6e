//! End-to-end tests for rolling the die and driving a session.
//!
//! - Every roll resolves, exactly once, within the settle budget
//! - Reset and re-roll interrupt a roll without emitting for it
//! - A session turns die outcomes into selections and history

use glam::Vec3;
use proptest::prelude::*;

use crate::config::{ResolverConfig, FIXED_DT};
use crate::dice::{face_up, DieResolver};
use crate::history::MoodHistory;
use crate::mood::Mood;
use crate::session::MoodSession;

use super::helpers::{
    default_resolver, roll_and_settle, run_ticks, run_until_outcome, Recorder, SETTLE_BUDGET,
};

// =============================================================================
// Rolling
// =============================================================================

#[test]
fn rolls_resolve_within_budget_across_seeds() {
    for seed in 0..24 {
        let mut resolver = default_resolver(seed);
        let (outcome, ticks) = roll_and_settle(&mut resolver);
        assert!(ticks <= SETTLE_BUDGET, "seed {seed} took {ticks} ticks");
        assert!(Mood::DIE_FACES.contains(&outcome.mood));
        assert_eq!(outcome.face.mood(), outcome.mood);
    }
}

#[test]
fn dice_come_to_rest_without_a_timeout() {
    let config = ResolverConfig {
        max_settle_ticks: None,
        ..Default::default()
    };
    let rest_height = config.die_half_size + config.rest_margin;

    for seed in 0..40 {
        let mut resolver = DieResolver::new(config.clone(), seed).unwrap();
        resolver.roll();

        let mut came_to_rest = None;
        for tick in 1..=SETTLE_BUDGET {
            resolver.tick();
            let slow = resolver.body().linear_speed() < config.settle_speed;
            if slow && resolver.world().height() < rest_height {
                came_to_rest = Some(tick);
                break;
            }
        }
        assert!(came_to_rest.is_some(), "seed {seed} never came to rest");

        let (outcome, _) = run_until_outcome(&mut resolver, SETTLE_BUDGET)
            .or_else(|| resolver.observer().last().map(|o| (*o, 0)))
            .unwrap_or_else(|| panic!("seed {seed} came to rest without a face"));
        assert!(!outcome.forced);
        assert!(outcome.alignment > config.confidence);
    }
}

#[test]
fn natural_outcomes_rest_on_a_face() {
    for seed in 0..12 {
        let mut resolver = default_resolver(seed);
        let (outcome, _) = roll_and_settle(&mut resolver);
        if outcome.forced {
            continue;
        }
        assert!(outcome.alignment > 0.9);
        assert!(resolver.world().height() < 0.6);
        let up = face_up(resolver.pose().orientation, Vec3::Y);
        assert_eq!(up.face, outcome.face);
    }
}

#[test]
fn one_outcome_per_roll() {
    let mut resolver = default_resolver(17);
    let _ = roll_and_settle(&mut resolver);
    run_ticks(&mut resolver, 600);
    assert_eq!(resolver.observer().len(), 1);

    let _ = roll_and_settle(&mut resolver);
    run_ticks(&mut resolver, 600);
    assert_eq!(resolver.observer().len(), 2);
}

#[test]
fn rolling_again_replaces_the_first_launch() {
    let mut interrupted = default_resolver(5);
    interrupted.roll();
    run_ticks(&mut interrupted, 30);
    interrupted.roll();

    let mut back_to_back = default_resolver(5);
    back_to_back.roll();
    back_to_back.roll();

    let (a, b) = (interrupted.body(), back_to_back.body());
    assert_eq!(a.position, b.position);
    assert_eq!(a.linear_velocity, b.linear_velocity);
    assert_eq!(a.angular_velocity, b.angular_velocity);
    assert_eq!(interrupted.state(), back_to_back.state());

    // The abandoned roll never reports
    assert!(run_until_outcome(&mut interrupted, SETTLE_BUDGET).is_some());
    run_ticks(&mut interrupted, 300);
    assert_eq!(interrupted.observer().len(), 1);
}

#[test]
fn reset_mid_roll_emits_nothing() {
    let mut resolver = default_resolver(21);
    resolver.roll();
    run_ticks(&mut resolver, 15);
    resolver.reset();
    run_ticks(&mut resolver, 1500);
    assert!(resolver.observer().is_empty());

    let _ = roll_and_settle(&mut resolver);
    assert_eq!(resolver.observer().len(), 1);
}

#[test]
fn observer_sees_one_pose_per_tick() {
    let mut resolver =
        DieResolver::with_observer(ResolverConfig::default(), 4, Recorder::default()).unwrap();
    resolver.roll();
    run_ticks(&mut resolver, 250);

    let recorder = resolver.into_observer();
    assert_eq!(recorder.poses.len(), 250);
    assert!(recorder.outcomes.len() <= 1);
    assert!(recorder.poses.iter().all(|pose| pose.position.y > 0.0));
}

#[test]
fn variable_frames_match_fixed_ticks() {
    let mut fixed = default_resolver(64);
    let mut framed = default_resolver(64);
    fixed.roll();
    framed.roll();

    run_ticks(&mut fixed, 120);
    // 60 frames at 30 fps is 120 fixed ticks
    for _ in 0..60 {
        framed.advance(FIXED_DT * 2.0, 8);
    }
    assert_eq!(framed.tick_count(), fixed.tick_count());
    assert_eq!(framed.state_hash(), fixed.state_hash());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_seed_resolves_once(seed in any::<u64>()) {
        let mut resolver = default_resolver(seed);
        resolver.roll();
        let resolved = run_until_outcome(&mut resolver, SETTLE_BUDGET);
        prop_assert!(resolved.is_some());
        prop_assert!(!resolver.is_armed());
        run_ticks(&mut resolver, 120);
        prop_assert_eq!(resolver.observer().len(), 1);
    }
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn session_mixes_manual_and_rolled_moods() {
    let mut session = MoodSession::new(ResolverConfig::default(), 2024).unwrap();
    session.select(Mood::Peaceful, 100);

    session.roll_die();
    let mut rolled = None;
    for frame in 0..2000_u64 {
        if let Some(outcome) = session.advance(FIXED_DT * 2.0, 200 + frame) {
            rolled = Some(outcome);
            break;
        }
    }
    let rolled = rolled.expect("die resolves");

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history.entries()[0].mood, Mood::Peaceful);
    assert_eq!(history.entries()[1].mood, rolled.mood);
    assert_eq!(session.selected(), Some(rolled.mood));
    assert_eq!(session.reset_counter(), 2);

    let stats = session.stats();
    assert_eq!(stats.total(), 2);
    let slices = stats.slices();
    assert_eq!(slices[0].mood, Mood::Peaceful);
}

#[test]
fn session_history_survives_storage() {
    let mut session = MoodSession::new(ResolverConfig::default(), 1).unwrap();
    session.select(Mood::Excited, 10);
    session.select(Mood::Excited, 20);
    session.select(Mood::Tired, 30);

    let json = session.history().to_json().unwrap();
    let restored = MoodHistory::from_json(&json).unwrap();
    let session = MoodSession::with_history(ResolverConfig::default(), 1, restored).unwrap();
    let stats = session.stats();
    assert_eq!(stats.most_common(), Some(Mood::Excited));
    assert_eq!(stats.slices()[1].percent(), 33);
}

#[test]
fn session_hides_die_after_outcome() {
    let mut session = MoodSession::new(ResolverConfig::default(), 3).unwrap();
    session.roll_die();
    let outcome = (0..u64::from(SETTLE_BUDGET)).find_map(|t| session.tick(t));
    assert!(outcome.is_some());
    assert!(!session
        .resolver()
        .play_area()
        .contains(session.die_pose().position));
    for t in 0..600 {
        assert!(session.tick(t).is_none());
    }
}
