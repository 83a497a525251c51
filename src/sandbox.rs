//! Host-side controller tying the engine, the factory and a pointer together.
//!
//! [`Sandbox`] is what an interactive front end drives: it seeds the initial
//! population, keeps an attraction field glued to the pointer, spawns
//! explosions and orbital rings on gestures, and handles pause, reset and
//! presets. Drawing and input translation stay with the front end.
//!
//! ```ignore
//! let mut sandbox = Sandbox::new(PhysicsConfig::default(), Bounds::new(1200.0, 800.0), ParticleFactory::from_entropy());
//!
//! // Per animation frame
//! sandbox.set_pointer(cursor);
//! sandbox.frame(elapsed_ms);
//! renderer.draw(sandbox.engine().particles());
//!
//! // On shift+click
//! sandbox.explode_at_pointer();
//! ```

use crate::config::{Bounds, ConfigPatch, PhysicsConfig};
use crate::engine::VerletEngine;
use crate::error::ConfigError;
use crate::field::ForceField;
use crate::particle::ParticleType;
use crate::presets::{require_preset, Preset};
use crate::spawn::ParticleFactory;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

/// Radius of the field that follows the pointer.
pub const POINTER_FIELD_RADIUS: f32 = 200.0;
/// Particles per explosion gesture.
pub const EXPLOSION_COUNT: usize = 20;
/// Particles per orbital ring gesture.
pub const ORBITAL_COUNT: usize = 12;
/// Radius of the orbital ring gesture.
pub const ORBITAL_RADIUS: f32 = 80.0;

/// Interactive sandbox session.
#[derive(Debug)]
pub struct Sandbox<R: Rng = SmallRng> {
    engine: VerletEngine,
    factory: ParticleFactory<R>,
    pointer: Vec2,
    running: bool,
}

impl<R: Rng> Sandbox<R> {
    /// Start a session with `config.particle_count` random particles.
    pub fn new(config: PhysicsConfig, bounds: Bounds, factory: ParticleFactory<R>) -> Self {
        let mut sandbox = Self {
            engine: VerletEngine::new(config, bounds),
            factory,
            pointer: bounds.center(),
            running: true,
        };
        sandbox.populate();
        sandbox
    }

    pub fn engine(&self) -> &VerletEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut VerletEngine {
        &mut self.engine
    }

    pub fn factory_mut(&mut self) -> &mut ParticleFactory<R> {
        &mut self.factory
    }

    pub fn config(&self) -> &PhysicsConfig {
        self.engine.config()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.engine.set_bounds(bounds);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flip between running and paused; returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advance one animation frame. Does nothing while paused.
    pub fn frame(&mut self, delta_ms: f32) {
        if !self.running {
            return;
        }
        self.engine.clear_force_fields();
        let strength = self.engine.config().mouse_attraction;
        if strength > 0.0 {
            self.engine
                .add_force_field(ForceField::attract(self.pointer, strength, POINTER_FIELD_RADIUS));
        }
        self.engine.update(delta_ms);
    }

    /// Burst of light particles at the pointer.
    pub fn explode_at_pointer(&mut self) {
        let burst = self
            .factory
            .create_explosion(self.pointer, EXPLOSION_COUNT, ParticleType::Light);
        self.engine.add_particles(burst);
    }

    /// Ring of orbiting particles around the pointer.
    pub fn orbit_at_pointer(&mut self) {
        let ring = self
            .factory
            .create_orbital_system(self.pointer, ORBITAL_COUNT, ORBITAL_RADIUS);
        self.engine.add_particles(ring);
    }

    pub fn update_config(&mut self, patch: &ConfigPatch) {
        self.engine.update_config(patch);
    }

    /// Replace the population with a fresh one; config and bounds are kept.
    pub fn reset(&mut self) {
        let config = *self.engine.config();
        let bounds = self.engine.bounds();
        self.engine = VerletEngine::new(config, bounds);
        self.populate();
        debug!(particles = self.engine.particle_count(), "sandbox reset");
    }

    /// Apply a preset's configuration and reset.
    pub fn load_preset(&mut self, preset: &Preset) {
        self.engine.update_config(&ConfigPatch::from(preset.config()));
        debug!(preset = preset.name, "preset loaded");
        self.reset();
    }

    pub fn load_preset_named(&mut self, name: &str) -> Result<(), ConfigError> {
        let preset = require_preset(name)?;
        self.load_preset(preset);
        Ok(())
    }

    fn populate(&mut self) {
        let config = *self.engine.config();
        let bounds = self.engine.bounds();
        for _ in 0..config.particle_count {
            let particle = self
                .factory
                .create_random_particle(bounds, config.particle_type);
            self.engine.add_particle(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> Sandbox {
        Sandbox::new(
            PhysicsConfig::default(),
            Bounds::new(800.0, 600.0),
            ParticleFactory::seeded(21),
        )
    }

    #[test]
    fn test_new_seeds_population() {
        let s = sandbox();
        assert_eq!(s.engine().particle_count(), 40);
        assert_eq!(s.pointer(), Vec2::new(400.0, 300.0));
        assert!(s
            .engine()
            .particles()
            .iter()
            .all(|p| p.kind == ParticleType::Normal));
    }

    #[test]
    fn test_frame_installs_pointer_field() {
        let mut s = sandbox();
        s.set_pointer(Vec2::new(10.0, 20.0));
        s.frame(16.0);
        let fields = s.engine().force_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].position, Vec2::new(10.0, 20.0));
        assert_eq!(fields[0].strength, 50.0);
        assert_eq!(fields[0].radius, POINTER_FIELD_RADIUS);

        s.update_config(&ConfigPatch::new().mouse_attraction(0.0));
        s.frame(16.0);
        assert!(s.engine().force_fields().is_empty());
    }

    #[test]
    fn test_paused_frame_is_noop() {
        let mut s = sandbox();
        assert!(!s.toggle_running());
        s.frame(16.0);
        assert_eq!(s.engine().ticks(), 0);
        assert!(s.toggle_running());
        s.frame(16.0);
        assert_eq!(s.engine().ticks(), 1);
    }

    #[test]
    fn test_gestures_add_particles() {
        let mut s = sandbox();
        s.explode_at_pointer();
        assert_eq!(s.engine().particle_count(), 40 + EXPLOSION_COUNT);
        s.orbit_at_pointer();
        assert_eq!(s.engine().particle_count(), 40 + EXPLOSION_COUNT + ORBITAL_COUNT);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut s = sandbox();
        s.explode_at_pointer();
        s.frame(16.0);
        s.reset();
        assert_eq!(s.engine().particle_count(), 40);
        assert_eq!(s.engine().ticks(), 0);
    }

    #[test]
    fn test_load_preset() {
        let mut s = sandbox();
        s.load_preset_named("Heavy Matter").unwrap();
        assert_eq!(s.config().particle_count, 25);
        assert_eq!(s.engine().particle_count(), 25);
        assert!(s
            .engine()
            .particles()
            .iter()
            .all(|p| p.kind == ParticleType::Heavy));

        assert!(s.load_preset_named("Nope").is_err());
        assert_eq!(s.engine().particle_count(), 25);
    }
}
