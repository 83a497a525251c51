//! Simulation-wide tunables and the simulation rectangle.
//!
//! Hosts own their UI state and push changes into the engine as a
//! [`ConfigPatch`]. The engine keeps its own [`PhysicsConfig`] copy and merges
//! patches into it field by field.
//!
//! Patches can come straight from a JSON UI message:
//!
//! ```ignore
//! let patch = ConfigPatch::from_json(r#"{"gravity": 0.2, "trailLength": 40}"#)?;
//! engine.update_config(&patch);
//! ```
//!
//! # Ranges
//!
//! | Field | Typical range |
//! |-------|---------------|
//! | `gravity` | 0 - 1 |
//! | `damping` | 0 - 0.1 |
//! | `interaction_strength` | 0 - 3 |
//! | `trail_length` | 0 - 100 |
//! | `mouse_attraction` | 0 - 200 |
//!
//! Values outside these ranges are accepted as-is. The only correction is that
//! negative counts in a patch are clamped to zero.

use crate::error::ConfigError;
use crate::particle::ParticleType;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation parameters read by the engine at the start of every tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// Downward acceleration scale (multiplied by 100 internally).
    pub gravity: f32,
    /// Velocity-proportional braking coefficient.
    pub damping: f32,
    /// Scale of the pairwise attraction between particles.
    pub interaction_strength: f32,
    /// Maximum number of trail samples kept per particle.
    pub trail_length: usize,
    /// Strength of the field a host attaches to its pointer.
    pub mouse_attraction: f32,
    /// How many particles a fresh population starts with.
    pub particle_count: usize,
    /// Type used for seeded populations.
    pub particle_type: ParticleType,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            damping: 0.02,
            interaction_strength: 0.5,
            trail_length: 30,
            mouse_attraction: 50.0,
            particle_count: 40,
            particle_type: ParticleType::Normal,
        }
    }
}

impl PhysicsConfig {
    /// A copy of this config with `patch` applied on top.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        let mut out = *self;
        out.apply(patch);
        out
    }

    /// Apply `patch` in place; fields the patch leaves out stay untouched.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(v) = patch.gravity {
            self.gravity = v;
        }
        if let Some(v) = patch.damping {
            self.damping = v;
        }
        if let Some(v) = patch.interaction_strength {
            self.interaction_strength = v;
        }
        if let Some(v) = patch.trail_length {
            self.trail_length = clamp_count(v);
        }
        if let Some(v) = patch.mouse_attraction {
            self.mouse_attraction = v;
        }
        if let Some(v) = patch.particle_count {
            self.particle_count = clamp_count(v);
        }
        if let Some(v) = patch.particle_type {
            self.particle_type = v;
        }
    }
}

fn clamp_count(v: i64) -> usize {
    usize::try_from(v.max(0)).unwrap_or(usize::MAX)
}

/// Partial update for [`PhysicsConfig`]. `None` means "leave as is".
///
/// Counts are signed so that out-of-range requests from a UI can be clamped
/// instead of rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_strength: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_attraction: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_type: Option<ParticleType>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a patch from a JSON object with camelCase keys.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn gravity(mut self, v: f32) -> Self {
        self.gravity = Some(v);
        self
    }

    pub fn damping(mut self, v: f32) -> Self {
        self.damping = Some(v);
        self
    }

    pub fn interaction_strength(mut self, v: f32) -> Self {
        self.interaction_strength = Some(v);
        self
    }

    pub fn trail_length(mut self, v: i64) -> Self {
        self.trail_length = Some(v);
        self
    }

    pub fn mouse_attraction(mut self, v: f32) -> Self {
        self.mouse_attraction = Some(v);
        self
    }

    pub fn particle_count(mut self, v: i64) -> Self {
        self.particle_count = Some(v);
        self
    }

    pub fn particle_type(mut self, v: ParticleType) -> Self {
        self.particle_type = Some(v);
        self
    }
}

impl From<PhysicsConfig> for ConfigPatch {
    /// A patch that overwrites every field.
    fn from(c: PhysicsConfig) -> Self {
        Self {
            gravity: Some(c.gravity),
            damping: Some(c.damping),
            interaction_strength: Some(c.interaction_strength),
            trail_length: Some(i64::try_from(c.trail_length).unwrap_or(i64::MAX)),
            mouse_attraction: Some(c.mouse_attraction),
            particle_count: Some(i64::try_from(c.particle_count).unwrap_or(i64::MAX)),
            particle_type: Some(c.particle_type),
        }
    }
}

/// The simulation rectangle, with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
