//! Circular force fields positioned by the host.
//!
//! Fields are frame-scoped: a host typically calls
//! [`VerletEngine::clear_force_fields`](crate::engine::VerletEngine::clear_force_fields)
//! and re-adds its fields (e.g. one following the pointer) before every tick.
//!
//! # Field Kinds
//!
//! | Kind | Effect inside `radius` |
//! |------|------------------------|
//! | [`FieldKind::Attract`] | pull toward the center |
//! | [`FieldKind::Repel`] | push away from the center |
//! | [`FieldKind::Orbital`] | weak pull plus a sideways swirl |
//!
//! All kinds fall off linearly from full `strength` at the center to zero at
//! the rim.

use crate::vector;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Fraction of the radial pull an orbital field keeps.
pub const ORBITAL_RADIAL_FACTOR: f32 = 0.3;
/// Scale of the perpendicular swirl an orbital field adds.
pub const ORBITAL_TANGENT_FACTOR: f32 = 0.5;

/// How a field pushes particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Attract,
    Repel,
    Orbital,
}

/// A circular zone of influence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceField {
    /// Center of the zone.
    pub position: Vec2,
    /// Signed force scale at the center.
    pub strength: f32,
    /// Zone radius; particles at or beyond it are unaffected.
    pub radius: f32,
    pub kind: FieldKind,
}

impl ForceField {
    pub fn new(kind: FieldKind, position: Vec2, strength: f32, radius: f32) -> Self {
        Self {
            position,
            strength,
            radius,
            kind,
        }
    }

    pub fn attract(position: Vec2, strength: f32, radius: f32) -> Self {
        Self::new(FieldKind::Attract, position, strength, radius)
    }

    pub fn repel(position: Vec2, strength: f32, radius: f32) -> Self {
        Self::new(FieldKind::Repel, position, strength, radius)
    }

    pub fn orbital(position: Vec2, strength: f32, radius: f32) -> Self {
        Self::new(FieldKind::Orbital, position, strength, radius)
    }

    /// Force this field exerts on a particle at `point`.
    ///
    /// Returns `None` outside the zone and exactly at the center, where the
    /// direction is undefined.
    pub fn force_at(&self, point: Vec2) -> Option<Vec2> {
        let to_center = vector::subtract(self.position, point);
        let distance = vector::magnitude(to_center);
        if !(distance > 0.0 && distance < self.radius) {
            return None;
        }

        let direction = vector::normalize(to_center);
        let mut strength = self.strength * (1.0 - distance / self.radius);
        let mut force = Vec2::ZERO;

        match self.kind {
            FieldKind::Attract => {}
            FieldKind::Repel => strength = -strength,
            FieldKind::Orbital => {
                let swirl = vector::rotate(direction, FRAC_PI_2);
                force = vector::scale(swirl, strength * ORBITAL_TANGENT_FACTOR);
                strength *= ORBITAL_RADIAL_FACTOR;
            }
        }

        Some(vector::add(force, vector::scale(direction, strength)))
    }
}
