//! The Verlet integration engine.
//!
//! [`VerletEngine`] owns the live particles and the current force fields.
//! Each call to [`update`](VerletEngine::update) runs one fixed pipeline:
//!
//! 1. clamp the frame time to 16 ms and convert to seconds
//! 2. clear accelerations
//! 3. global gravity
//! 4. force fields
//! 5. pairwise interaction
//! 6. Verlet integration (with damping folded into the position)
//! 7. trail sampling
//! 8. boundary collisions
//! 9. aging
//! 10. culling of expired particles
//!
//! Later stages read what earlier ones wrote during the same tick, so the
//! order is part of the engine's contract.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = VerletEngine::new(PhysicsConfig::default(), Bounds::new(800.0, 600.0));
//! let mut factory = ParticleFactory::seeded(1);
//! for _ in 0..50 {
//!     engine.add_particle(factory.create_random_particle(engine.bounds(), ParticleType::Normal));
//! }
//!
//! // Once per animation frame:
//! engine.clear_force_fields();
//! engine.add_force_field(ForceField::attract(pointer, 50.0, 200.0));
//! engine.update(frame_ms);
//! draw(engine.particles());
//! ```

use crate::config::{Bounds, ConfigPatch, PhysicsConfig};
use crate::field::ForceField;
use crate::particle::{Axis, Particle, ParticleId};
use crate::vector;
use glam::Vec2;
use tracing::{debug, trace, warn};

/// Longest frame time, in milliseconds, a single tick will integrate.
pub const MAX_STEP_MS: f32 = 16.0;
/// Gravity config value to acceleration scale.
pub const GRAVITY_SCALE: f32 = 100.0;
/// Particles further apart than this do not interact.
pub const INTERACTION_RANGE: f32 = 200.0;
/// Added to the squared distance in the pairwise force.
pub const INTERACTION_SOFTENING: f32 = 100.0;
/// Fraction of the incoming displacement kept after a wall bounce.
pub const RESTITUTION: f32 = 0.8;

/// Owns the particle set and force fields and advances them in time.
///
/// The engine keeps its own copy of [`PhysicsConfig`] and [`Bounds`]; hosts
/// change them through [`update_config`](Self::update_config) and
/// [`set_bounds`](Self::set_bounds). `update` takes `&mut self`, so a tick
/// can never overlap with another tick or with reads of the snapshots.
#[derive(Clone, Debug)]
pub struct VerletEngine {
    particles: Vec<Particle>,
    fields: Vec<ForceField>,
    config: PhysicsConfig,
    bounds: Bounds,
    ticks: u64,
}

impl VerletEngine {
    /// Create an empty engine.
    pub fn new(config: PhysicsConfig, bounds: Bounds) -> Self {
        Self {
            particles: Vec::new(),
            fields: Vec::new(),
            config,
            bounds,
            ticks: 0,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: PhysicsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the simulation rectangle.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Add initial particles.
    pub fn with_particles<I>(mut self, particles: I) -> Self
    where
        I: IntoIterator<Item = Particle>,
    {
        self.particles.extend(particles);
        self
    }

    // ========== Particles ==========

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn add_particles<I>(&mut self, particles: I)
    where
        I: IntoIterator<Item = Particle>,
    {
        self.particles.extend(particles);
    }

    /// Drop the particle with `id`. Unknown ids are ignored.
    ///
    /// Returns whether a particle was removed.
    pub fn remove_particle(&mut self, id: ParticleId) -> bool {
        let before = self.particles.len();
        self.particles.retain(|p| p.id != id);
        self.particles.len() != before
    }

    pub fn clear_particles(&mut self) {
        self.particles.clear();
    }

    /// Live particles as of the end of the last tick.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    // ========== Force fields ==========

    pub fn add_force_field(&mut self, field: ForceField) {
        self.fields.push(field);
    }

    pub fn clear_force_fields(&mut self) {
        self.fields.clear();
    }

    pub fn force_fields(&self) -> &[ForceField] {
        &self.fields
    }

    // ========== Configuration ==========

    /// Merge `patch` into the held configuration. Particles are kept.
    pub fn update_config(&mut self, patch: &ConfigPatch) {
        self.config.apply(patch);
        debug!(?patch, "config updated");
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        debug!(width = bounds.width, height = bounds.height, "bounds changed");
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of ticks that actually advanced the simulation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ========== Stepping ==========

    /// Advance the simulation by one frame of `delta_ms` milliseconds.
    ///
    /// Frame times above [`MAX_STEP_MS`] are clamped. A zero, negative or
    /// non-finite frame time would turn every position into NaN, so such
    /// ticks are skipped.
    pub fn update(&mut self, delta_ms: f32) {
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            warn!(delta_ms, "skipping tick with unusable frame time");
            return;
        }
        let dt = delta_ms.min(MAX_STEP_MS) / 1000.0;

        self.clear_accelerations();
        self.apply_global_force();
        self.apply_force_fields();
        self.apply_pairwise_interaction();

        let config = self.config;
        let bounds = self.bounds;
        for particle in &mut self.particles {
            integrate(particle, dt, config.damping);
            let position = particle.position();
            particle.trail.push_bounded(position, config.trail_length);
            resolve_boundaries(particle, bounds);
            age(particle, dt);
        }

        self.cull();
        self.ticks += 1;
        trace!(
            tick = self.ticks,
            dt,
            particles = self.particles.len(),
            fields = self.fields.len(),
            "tick"
        );
    }

    fn clear_accelerations(&mut self) {
        for particle in &mut self.particles {
            particle.acceleration = Vec2::ZERO;
        }
    }

    fn apply_global_force(&mut self) {
        if self.config.gravity == 0.0 {
            return;
        }
        let pull = Vec2::new(0.0, self.config.gravity * GRAVITY_SCALE);
        for particle in &mut self.particles {
            particle.acceleration += pull;
        }
    }

    fn apply_force_fields(&mut self) {
        for field in &self.fields {
            for particle in &mut self.particles {
                if let Some(force) = field.force_at(particle.position()) {
                    particle.acceleration += force;
                }
            }
        }
    }

    fn apply_pairwise_interaction(&mut self) {
        let strength = self.config.interaction_strength;
        if strength == 0.0 {
            return;
        }
        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.particles.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if let Some(force) = pair_force(a, b, strength) {
                    a.acceleration += force;
                    b.acceleration -= force;
                }
            }
        }
    }

    fn cull(&mut self) {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        let removed = before - self.particles.len();
        if removed > 0 {
            debug!(removed, remaining = self.particles.len(), "culled expired particles");
        }
    }
}

impl Default for VerletEngine {
    fn default() -> Self {
        Self::new(PhysicsConfig::default(), Bounds::default())
    }
}

/// Softened attraction `a` feels toward `b`; `b` feels the negation.
///
/// `None` when the particles coincide or are out of range.
pub(crate) fn pair_force(a: &Particle, b: &Particle, strength: f32) -> Option<Vec2> {
    let offset = vector::subtract(b.position(), a.position());
    let distance = vector::magnitude(offset);
    if !(distance > 0.0 && distance < INTERACTION_RANGE) {
        return None;
    }
    let magnitude =
        strength * (a.mass * b.mass) / (distance * distance + INTERACTION_SOFTENING);
    Some(vector::scale(vector::normalize(offset), magnitude))
}

/// Position Verlet step: `x' = 2x - x_prev + a dt^2`.
///
/// The display velocity is read from the undamped step; damping is then
/// applied as a position correction.
fn integrate(particle: &mut Particle, dt: f32, damping: f32) {
    let dt2 = dt * dt;
    let position = particle.state.position();
    let previous = particle.state.previous_position();

    let mut next = position * 2.0 - previous + particle.acceleration * dt2;
    particle.velocity = vector::divide(next - position, dt);

    if damping > 0.0 {
        let damping_force = particle.velocity * -damping;
        next += damping_force * dt2;
    }

    particle.state.advance(next);
}

fn resolve_boundaries(particle: &mut Particle, bounds: Bounds) {
    let r = particle.radius;
    let position = particle.position();

    if position.x < r {
        particle.state.bounce(Axis::X, r, RESTITUTION);
    } else if position.x > bounds.width - r {
        particle.state.bounce(Axis::X, bounds.width - r, RESTITUTION);
    }

    if position.y < r {
        particle.state.bounce(Axis::Y, r, RESTITUTION);
    } else if position.y > bounds.height - r {
        particle.state.bounce(Axis::Y, bounds.height - r, RESTITUTION);
    }
}

fn age(particle: &mut Particle, dt: f32) {
    particle.grow_older(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ForceField;
    use crate::particle::{ParticleType, VerletState};

    fn still_config() -> PhysicsConfig {
        PhysicsConfig {
            gravity: 0.0,
            damping: 0.0,
            interaction_strength: 0.0,
            trail_length: 10,
            ..PhysicsConfig::default()
        }
    }

    fn particle_at(position: Vec2, step: Vec2) -> Particle {
        Particle::new(ParticleType::Normal, VerletState::moving(position, step))
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut engine = VerletEngine::new(still_config(), Bounds::new(1000.0, 1000.0));
        engine.add_particle(particle_at(Vec2::new(500.0, 500.0), Vec2::ZERO));
        engine.update_config(&ConfigPatch::new().gravity(1.0));

        // 100 ms frame integrates like a 16 ms one
        engine.update(100.0);
        let p = &engine.particles()[0];
        let expected = 100.0 * 0.016 * 0.016;
        assert!((p.position().y - 500.0 - expected).abs() < 1e-3);
    }

    #[test]
    fn test_unusable_delta_skips_tick() {
        let mut engine = VerletEngine::new(still_config(), Bounds::new(1000.0, 1000.0));
        engine.add_particle(particle_at(Vec2::new(500.0, 500.0), Vec2::new(1.0, 0.0)));
        engine.update(0.0);
        engine.update(-5.0);
        engine.update(f32::NAN);
        assert_eq!(engine.ticks(), 0);
        assert_eq!(engine.particles()[0].position(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut engine = VerletEngine::new(still_config(), Bounds::new(1000.0, 1000.0));
        engine.update_config(&ConfigPatch::new().gravity(0.5));
        engine.add_particle(particle_at(Vec2::new(500.0, 500.0), Vec2::ZERO));
        engine.update(16.0);
        assert_eq!(engine.particles()[0].acceleration(), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_field_acceleration() {
        let mut engine = VerletEngine::new(still_config(), Bounds::new(1000.0, 1000.0));
        engine.add_particle(particle_at(Vec2::new(600.0, 500.0), Vec2::ZERO));
        engine.add_force_field(ForceField::attract(Vec2::new(500.0, 500.0), 100.0, 200.0));
        engine.update(16.0);
        let a = engine.particles()[0].acceleration();
        assert!((a - Vec2::new(-50.0, 0.0)).length() < 1e-3);
        assert_eq!(engine.force_fields().len(), 1);

        engine.clear_force_fields();
        assert!(engine.force_fields().is_empty());
    }

    #[test]
    fn test_pair_force_softening_and_range() {
        let a = particle_at(Vec2::new(0.0, 0.0), Vec2::ZERO);
        let b = particle_at(Vec2::new(10.0, 0.0), Vec2::ZERO);
        let f = pair_force(&a, &b, 1.0).unwrap();
        // 1 * 1 * 1 / (100 + 100)
        assert!((f.x - 0.005).abs() < 1e-7);

        let far = particle_at(Vec2::new(250.0, 0.0), Vec2::ZERO);
        assert!(pair_force(&a, &far, 1.0).is_none());
        let same = particle_at(Vec2::new(0.0, 0.0), Vec2::ZERO);
        assert!(pair_force(&a, &same, 1.0).is_none());
    }

    #[test]
    fn test_remove_particle() {
        let mut engine = VerletEngine::default();
        let p = particle_at(Vec2::new(10.0, 10.0), Vec2::ZERO);
        let id = p.id;
        engine.add_particle(p);
        assert!(!engine.remove_particle(ParticleId(u64::MAX)));
        assert_eq!(engine.particle_count(), 1);
        assert!(engine.remove_particle(id));
        assert!(engine.particle(id).is_none());
    }

    #[test]
    fn test_update_config_keeps_particles() {
        let mut engine = VerletEngine::default();
        engine.add_particle(particle_at(Vec2::new(100.0, 100.0), Vec2::ZERO));
        engine.update_config(&ConfigPatch::new().damping(0.05));
        assert_eq!(engine.config().damping, 0.05);
        assert_eq!(engine.particle_count(), 1);
    }

    #[test]
    fn test_bounce_on_floor() {
        let mut engine = VerletEngine::new(still_config(), Bounds::new(100.0, 100.0));
        // radius 5, moving down 8 per step from y = 92
        engine.add_particle(particle_at(Vec2::new(50.0, 92.0), Vec2::new(0.0, 8.0)));
        engine.update(16.0);
        let p = &engine.particles()[0];
        assert_eq!(p.position().y, 95.0);
        assert!(p.state().implied_step().y < 0.0);
    }
}
