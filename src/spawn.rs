//! Particle factory and spawn patterns.
//!
//! The factory turns a position, a [`ParticleType`] and an optional initial
//! velocity into a ready-to-simulate [`Particle`], and provides the three
//! spawn patterns the sandbox uses:
//!
//! | Pattern | Positions | Velocities |
//! |---------|-----------|------------|
//! | [`create_random_particle`](ParticleFactory::create_random_particle) | uniform in bounds | uniform in `[-50, 50)` per axis |
//! | [`create_explosion`](ParticleFactory::create_explosion) | all at the center | evenly spread angles, speed `[50, 150)` |
//! | [`create_orbital_system`](ParticleFactory::create_orbital_system) | evenly spaced on a ring | tangential, speed `[50, 80)` |
//!
//! Randomness comes from the RNG the factory is built with, so tests can use
//! [`ParticleFactory::seeded`] and get the same particles every run:
//!
//! ```ignore
//! let mut factory = ParticleFactory::seeded(7);
//! let burst = factory.create_explosion(Vec2::new(400.0, 300.0), 20, ParticleType::Light);
//! for p in burst {
//!     engine.add_particle(p);
//! }
//! ```

use crate::config::Bounds;
use crate::particle::{Particle, ParticleId, ParticleType, VerletState};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

/// Speed range of explosion particles.
pub const EXPLOSION_SPEED: (f32, f32) = (50.0, 150.0);
/// Speed range of orbital ring particles.
pub const ORBITAL_SPEED: (f32, f32) = (50.0, 80.0);
/// Half-width of the per-axis velocity range of random particles.
pub const RANDOM_VELOCITY_HALF_RANGE: f32 = 50.0;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Issue the next process-wide particle id.
pub fn next_particle_id() -> ParticleId {
    ParticleId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Builds particles with type-dependent properties and initial motion.
///
/// The random source is injected; every factory shares the process-wide id
/// counter, so ids stay unique no matter how many factories or engines exist.
#[derive(Debug, Clone)]
pub struct ParticleFactory<R: Rng = SmallRng> {
    rng: R,
}

impl ParticleFactory<SmallRng> {
    /// Deterministic factory for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Factory seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl Default for ParticleFactory<SmallRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> ParticleFactory<R> {
    /// Wrap an arbitrary random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Mutable access to the underlying random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // ========== Core constructor ==========

    /// Create a particle of `kind` at `position`.
    ///
    /// With an initial velocity, the position history is offset so that the
    /// first integration step reproduces it. Without one the particle starts
    /// at rest.
    pub fn create_particle(
        &mut self,
        position: Vec2,
        kind: ParticleType,
        initial_velocity: Option<Vec2>,
    ) -> Particle {
        let state = match initial_velocity {
            Some(velocity) => VerletState::moving(position, velocity),
            None => VerletState::at_rest(position),
        };
        Particle::new(kind, state)
    }

    // ========== Spawn patterns ==========

    /// A particle anywhere inside `bounds` with a random velocity.
    pub fn create_random_particle(&mut self, bounds: Bounds, kind: ParticleType) -> Particle {
        let position = Vec2::new(
            self.rng.gen::<f32>() * bounds.width,
            self.rng.gen::<f32>() * bounds.height,
        );
        let velocity = Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * RANDOM_VELOCITY_HALF_RANGE * 2.0,
            (self.rng.gen::<f32>() - 0.5) * RANDOM_VELOCITY_HALF_RANGE * 2.0,
        );
        self.create_particle(position, kind, Some(velocity))
    }

    /// `count` particles at `center` flying outward at evenly spaced angles.
    pub fn create_explosion(
        &mut self,
        center: Vec2,
        count: usize,
        kind: ParticleType,
    ) -> Vec<Particle> {
        (0..count)
            .map(|i| {
                let angle = ring_angle(i, count);
                let speed = self.random_range(EXPLOSION_SPEED.0, EXPLOSION_SPEED.1);
                let velocity = Vec2::from_angle(angle) * speed;
                self.create_particle(center, kind, Some(velocity))
            })
            .collect()
    }

    /// `count` particles on a ring of `radius` around `center`, all moving
    /// tangentially in the same rotational sense. Each particle's type is
    /// drawn uniformly from [`ParticleType::ALL`].
    pub fn create_orbital_system(
        &mut self,
        center: Vec2,
        count: usize,
        radius: f32,
    ) -> Vec<Particle> {
        (0..count)
            .map(|i| {
                let angle = ring_angle(i, count);
                let radial = Vec2::from_angle(angle);
                let position = center + radial * radius;
                let speed = self.random_range(ORBITAL_SPEED.0, ORBITAL_SPEED.1);
                // (-sin, cos): radial rotated a quarter turn
                let velocity = radial.perp() * speed;
                let kind = self.random_type();
                self.create_particle(position, kind, Some(velocity))
            })
            .collect()
    }

    // ========== Random primitives ==========

    /// Random f32 in `[min, max)`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.gen::<f32>() * (max - min)
    }

    /// Uniformly chosen particle type.
    pub fn random_type(&mut self) -> ParticleType {
        ParticleType::ALL[self.rng.gen_range(0..ParticleType::ALL.len())]
    }
}

/// Angle of slot `index` when `count` slots are spread around a full circle.
#[inline]
fn ring_angle(index: usize, count: usize) -> f32 {
    index as f32 / count as f32 * TAU
}
