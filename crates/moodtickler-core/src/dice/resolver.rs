//! The die resolver: throws the die, watches it settle, reports the face.
//!
//! # Tick Order
//!
//! Each fixed tick:
//! 1. The physics world advances by one step
//! 2. The new pose goes to the observer
//! 3. If a roll is armed, settle detection runs; a confident face-up
//!    emits exactly one [`Outcome`] and disarms the roll
//!
//! # Determinism
//!
//! All randomness (launch velocities and timeout picks) comes from a
//! `ChaCha8Rng` seeded at construction. The same seed and the same sequence
//! of calls reproduce the same outcomes bit for bit.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info, trace, warn};

use glam::Vec3;
use tumble::{hash_world, Bounds, GroundPlane, PhysicsWorld, RigidBody};

use super::face::{face_up, Face};
use super::observer::{DieObserver, Outcome, Pose};
use super::signal::ResetSignal;
use crate::config::ResolverConfig;
use crate::error::MoodError;

/// Whether an outcome is still owed for the current roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollState {
    /// True until the current roll reports its outcome
    pub armed: bool,
    /// Ticks since the roll started; `None` while parked after a reset
    pub elapsed_ticks: Option<u32>,
}

impl RollState {
    fn rolling() -> Self {
        Self {
            armed: true,
            elapsed_ticks: Some(0),
        }
    }

    fn parked() -> Self {
        Self {
            armed: true,
            elapsed_ticks: None,
        }
    }

    /// True while a roll is in flight and owes an outcome.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.armed && self.elapsed_ticks.is_some()
    }
}

/// Physics-driven die that turns a throw into a [`Mood`](crate::Mood).
///
/// The resolver owns its physics world outright; hosts drive it with
/// [`tick`](Self::tick), [`step`](Self::step) or [`advance`](Self::advance)
/// and drop it when done.
///
/// # Example
///
/// ```
/// use moodtickler_core::dice::DieResolver;
/// use moodtickler_core::{Mood, ResolverConfig};
///
/// // A fresh resolver drops the die straight down from the spawn point.
/// let mut resolver = DieResolver::new(ResolverConfig::default(), 42).unwrap();
/// for _ in 0..600 {
///     resolver.tick();
/// }
/// assert_eq!(resolver.observer()[0].mood, Mood::Happy);
/// ```
pub struct DieResolver<O: DieObserver = Vec<Outcome>> {
    config: ResolverConfig,
    world: PhysicsWorld,
    play_area: Bounds,
    state: RollState,
    reset_signal: ResetSignal,
    /// Unconsumed frame time for [`advance`](Self::advance)
    accumulator: f32,
    rng: ChaCha8Rng,
    seed: u64,
    observer: O,
}

impl DieResolver<Vec<Outcome>> {
    /// Create a resolver that records outcomes in a `Vec`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: ResolverConfig, seed: u64) -> Result<Self, MoodError> {
        Self::with_observer(config, seed, Vec::new())
    }
}

impl<O: DieObserver> DieResolver<O> {
    /// Create a resolver reporting to `observer`.
    ///
    /// The die starts at the spawn point with no velocity and an armed roll,
    /// so the first ticks drop it straight down.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn with_observer(config: ResolverConfig, seed: u64, observer: O) -> Result<Self, MoodError> {
        config.validate()?;

        let body = RigidBody::cube(config.die_mass, config.die_half_size).with_position(config.spawn);
        let ground = GroundPlane::from_rotation(GroundPlane::floor_rotation(), 0.0);
        let world = PhysicsWorld::new(config.world.clone(), ground, body)?;
        let play_area = config.play_area();

        debug!(seed, "die resolver created");

        Ok(Self {
            config,
            world,
            play_area,
            state: RollState::rolling(),
            reset_signal: ResetSignal::default(),
            accumulator: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            observer,
        })
    }

    /// Throw the die.
    ///
    /// Moves the die back to the spawn point and launches it with a random
    /// velocity and spin. A roll still in flight is abandoned without an outcome.
    pub fn roll(&mut self) {
        let launch = &self.config.launch;
        let linear = Vec3::new(
            (self.rng.gen::<f32>() - 0.5) * launch.lateral_speed,
            launch.upward_speed,
            (self.rng.gen::<f32>() - 0.5) * launch.lateral_speed,
        );
        let angular = Vec3::new(
            self.rng.gen::<f32>() * launch.max_spin,
            self.rng.gen::<f32>() * launch.max_spin,
            self.rng.gen::<f32>() * launch.max_spin,
        );

        if self.state.is_rolling() {
            debug!(
                elapsed_ticks = self.state.elapsed_ticks,
                "roll abandoned by a new roll"
            );
        }

        let body = self.world.body_mut();
        body.position = self.config.spawn;
        body.linear_velocity = linear;
        body.angular_velocity = angular;
        self.state = RollState::rolling();

        debug!(?linear, ?angular, "die rolled");
    }

    /// Hide the die and stop the current roll.
    ///
    /// The die is parked outside the play area at rest. It stays armed, but no
    /// outcome can fire until the next [`roll`](Self::roll).
    pub fn reset(&mut self) {
        self.world.body_mut().teleport(self.config.parked);
        self.state = RollState::parked();
        debug!(parked = ?self.config.parked, "die reset");
    }

    /// Feed the host's reset counter; performs a reset whenever it changes.
    ///
    /// Returns true if a reset happened.
    pub fn observe_reset(&mut self, signal: u64) -> bool {
        let changed = self.reset_signal.observe(signal);
        if changed {
            self.reset();
        }
        changed
    }

    /// Advance by one fixed tick.
    pub fn tick(&mut self) {
        self.step(self.config.fixed_dt);
    }

    /// Advance the physics by `dt`, publish the pose and run settle detection.
    pub fn step(&mut self, dt: f32) {
        self.world.step(dt);
        let pose = self.pose();
        self.observer.on_pose(&pose);
        self.detect_settle();
    }

    /// Consume host frame time in whole fixed ticks; returns how many ran.
    ///
    /// Leftover time carries over to the next call. At most `max_ticks` run
    /// per call and the remaining backlog is dropped, so a long stall does not
    /// turn into a burst of catch-up work. With `max_ticks == 0` nothing runs
    /// and the frame time is banked for the next call.
    pub fn advance(&mut self, frame_dt: f32, max_ticks: u32) -> u32 {
        if !(frame_dt.is_finite() && frame_dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_dt;

        let mut ticks = 0;
        while self.accumulator >= self.config.fixed_dt && ticks < max_ticks {
            self.accumulator -= self.config.fixed_dt;
            self.tick();
            ticks += 1;
        }
        if max_ticks > 0 && ticks == max_ticks && self.accumulator >= self.config.fixed_dt {
            trace!(backlog = self.accumulator, "dropping frame backlog");
            self.accumulator = 0.0;
        }
        ticks
    }

    fn detect_settle(&mut self) {
        if !self.state.armed {
            return;
        }
        let Some(elapsed) = self.state.elapsed_ticks else {
            // Parked: nothing to resolve until the next roll
            return;
        };
        let elapsed = elapsed.saturating_add(1);
        self.state.elapsed_ticks = Some(elapsed);

        if self.is_settled() {
            let up = face_up(self.world.body().orientation, self.world.ground().normal());
            if up.alignment > self.config.confidence {
                self.emit(up.face, up.alignment, false);
                return;
            }
            trace!(
                face = ?up.face,
                alignment = up.alignment,
                "settled without a clear face, waiting"
            );
        }

        if let Some(limit) = self.config.max_settle_ticks {
            if elapsed >= limit {
                let face = Face::ALL[self.rng.gen_range(0..Face::ALL.len())];
                let alignment = face.alignment(
                    self.world.body().orientation,
                    self.world.ground().normal(),
                );
                warn!(elapsed, ?face, "die did not settle in time, forcing an outcome");
                self.emit(face, alignment, true);
            }
        }
    }

    fn emit(&mut self, face: Face, alignment: f32, forced: bool) {
        // Zeroed so residual jitter cannot wake the die back up
        self.world.body_mut().stop();
        self.state.armed = false;

        let outcome = Outcome {
            mood: face.mood(),
            face,
            alignment,
            tick: self.world.tick(),
            forced,
        };
        info!(
            mood = %outcome.mood,
            ?face,
            alignment,
            forced,
            tick = outcome.tick,
            "die settled"
        );
        self.observer.on_outcome(outcome);
    }

    /// True when the die is slow, low and inside the play area.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let body = self.world.body();
        body.linear_speed() < self.config.settle_speed
            && self.world.height() < self.config.die_half_size + self.config.rest_margin
            && self.play_area.contains(body.position)
    }

    /// Current render pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        let body = self.world.body();
        Pose {
            position: body.position,
            orientation: body.orientation,
        }
    }

    /// Current roll state.
    #[must_use]
    pub fn state(&self) -> RollState {
        self.state
    }

    /// True while an outcome is owed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    /// The die body.
    #[must_use]
    pub fn body(&self) -> &RigidBody {
        self.world.body()
    }

    /// The underlying physics world.
    #[must_use]
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// The region in which outcomes may resolve.
    #[must_use]
    pub fn play_area(&self) -> &Bounds {
        &self.play_area
    }

    /// Fixed ticks run so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.world.tick()
    }

    /// The configuration this resolver was built with.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The RNG seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer (e.g. to drain recorded outcomes).
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the resolver, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Deterministic hash of physics and roll state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_world(&self.world).hash(&mut hasher);
        self.state.armed.hash(&mut hasher);
        self.state.elapsed_ticks.hash(&mut hasher);
        self.reset_signal.last().hash(&mut hasher);
        hasher.finish()
    }
}
