//! # verlet-sandbox
//!
//! A 2D particle-physics sandbox core: point masses advanced with position
//! Verlet under gravity, damping, pointer-driven force fields and pairwise
//! attraction, with motion trails for rendering.
//!
//! Drawing, widgets and the animation loop belong to the host. This crate
//! provides the engine they drive, the factory they spawn particles with, and
//! flat snapshots they can upload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use verlet_sandbox::prelude::*;
//!
//! let bounds = Bounds::new(1200.0, 800.0);
//! let mut engine = VerletEngine::new(PhysicsConfig::default(), bounds);
//! let mut factory = ParticleFactory::seeded(42);
//!
//! for _ in 0..40 {
//!     engine.add_particle(factory.create_random_particle(bounds, ParticleType::Normal));
//! }
//! engine.add_particles(factory.create_explosion(bounds.center(), 20, ParticleType::Light));
//!
//! loop {
//!     engine.clear_force_fields();
//!     engine.add_force_field(ForceField::attract(pointer, 50.0, 200.0));
//!     engine.update(frame_ms);
//!     draw(engine.particles());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] stores its current and previous position in a
//! [`VerletState`]; the difference between them *is* its velocity. Mass,
//! radius, color and lifetime come from its [`ParticleType`]:
//!
//! | Type | Mass | Radius | Lifetime |
//! |------|------|--------|----------|
//! | Normal | 1.0 | 5 | infinite |
//! | Heavy | 3.0 | 8 | infinite |
//! | Light | 0.5 | 3 | 15 s |
//! | Charged | 1.5 | 6 | infinite |
//!
//! ### Forces
//!
//! | Source | Configured by |
//! |--------|---------------|
//! | Gravity | [`PhysicsConfig::gravity`] |
//! | Damping | [`PhysicsConfig::damping`] |
//! | Pairwise attraction | [`PhysicsConfig::interaction_strength`] |
//! | Force fields | [`ForceField`] added per frame |
//!
//! ### Threading
//!
//! The engine is single-writer: [`VerletEngine::update`] takes `&mut self`,
//! so a tick can never run concurrently with another tick or with a reader
//! holding [`VerletEngine::particles`]. The engine is `Send` and can be moved
//! between threads between ticks.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for config, bounds and culling,
//! `trace` per tick) and never installs a subscriber itself.

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod particle;
pub mod presets;
pub mod render;
pub mod sandbox;
pub mod spawn;
pub mod vector;

pub use config::{Bounds, ConfigPatch, PhysicsConfig};
pub use engine::VerletEngine;
pub use error::ConfigError;
pub use field::{FieldKind, ForceField};
pub use glam::{Vec2, Vec3};
pub use particle::{Particle, ParticleId, ParticleType, Trail, VerletState};
pub use presets::{Preset, PRESETS};
pub use render::RenderSnapshot;
pub use sandbox::Sandbox;
pub use spawn::ParticleFactory;
pub use vector::Vector2D;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use verlet_sandbox::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Bounds, ConfigPatch, PhysicsConfig};
    pub use crate::engine::VerletEngine;
    pub use crate::field::{FieldKind, ForceField};
    pub use crate::particle::{Particle, ParticleId, ParticleType, VerletState};
    pub use crate::presets::{preset, Preset, PRESETS};
    pub use crate::render::RenderSnapshot;
    pub use crate::sandbox::Sandbox;
    pub use crate::spawn::ParticleFactory;
    pub use crate::vector;
    pub use crate::{Vec2, Vec3};
}
