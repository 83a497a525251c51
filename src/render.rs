//! Flat, uploadable snapshots of the simulation for renderers.
//!
//! The engine's particles hold trails in ring buffers and colors as vectors;
//! a GPU or canvas renderer wants tightly packed arrays instead. The types in
//! this module are `#[repr(C)]` and [`Pod`], so a capture can be handed to a
//! vertex buffer with [`bytemuck::cast_slice`].
//!
//! ```ignore
//! let snapshot = RenderSnapshot::capture(&engine);
//! queue.write_buffer(&instance_buffer, 0, snapshot.instance_bytes());
//! for range in &snapshot.trail_ranges {
//!     pass.draw(range.clone(), 0..1);
//! }
//! ```

use crate::engine::VerletEngine;
use crate::field::{FieldKind, ForceField};
use crate::particle::Particle;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::ops::Range;

/// Peak alpha of the newest trail sample.
pub const TRAIL_MAX_ALPHA: f32 = 0.5;

/// One particle, ready for instanced drawing.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    /// Display speed, for velocity-based coloring.
    pub speed: f32,
    /// RGB from the particle type, alpha from remaining life.
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        let pos = p.position();
        Self {
            position: [pos.x, pos.y],
            radius: p.radius,
            speed: p.velocity().length(),
            color: [p.color.x, p.color.y, p.color.z, p.life_fraction()],
        }
    }
}

/// One trail sample; older samples fade out.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 2],
    pub alpha: f32,
    _pad: f32,
}

/// A force field outline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FieldGlyph {
    pub position: [f32; 2],
    pub radius: f32,
    pub strength: f32,
    /// 0 = attract, 1 = repel, 2 = orbital.
    pub kind: u32,
    _pad: [u32; 3],
}

impl FieldGlyph {
    pub fn from_field(f: &ForceField) -> Self {
        Self {
            position: [f.position.x, f.position.y],
            radius: f.radius,
            strength: f.strength,
            kind: match f.kind {
                FieldKind::Attract => 0,
                FieldKind::Repel => 1,
                FieldKind::Orbital => 2,
            },
            _pad: [0; 3],
        }
    }
}

/// Trail samples of one particle, oldest first.
///
/// Alpha ramps linearly from 0 at the oldest sample toward
/// [`TRAIL_MAX_ALPHA`] at the newest.
pub fn trail_vertices(p: &Particle) -> impl Iterator<Item = TrailVertex> + '_ {
    let len = p.trail().len() as f32;
    p.trail().iter().enumerate().map(move |(i, point)| TrailVertex {
        position: [point.x, point.y],
        alpha: i as f32 / len * TRAIL_MAX_ALPHA,
        _pad: 0.0,
    })
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, Default)]
pub struct RenderSnapshot {
    pub instances: Vec<ParticleInstance>,
    pub trail_vertices: Vec<TrailVertex>,
    /// Slice of `trail_vertices` belonging to each instance, same order.
    pub trail_ranges: Vec<Range<u32>>,
    pub fields: Vec<FieldGlyph>,
}

impl RenderSnapshot {
    /// Copy the engine's state as of its last tick.
    pub fn capture(engine: &VerletEngine) -> Self {
        let particles = engine.particles();
        let mut snapshot = Self {
            instances: Vec::with_capacity(particles.len()),
            trail_vertices: Vec::new(),
            trail_ranges: Vec::with_capacity(particles.len()),
            fields: engine.force_fields().iter().map(FieldGlyph::from_field).collect(),
        };
        for p in particles {
            snapshot.instances.push(ParticleInstance::from_particle(p));
            let start = snapshot.trail_vertices.len() as u32;
            snapshot.trail_vertices.extend(trail_vertices(p));
            snapshot
                .trail_ranges
                .push(start..snapshot.trail_vertices.len() as u32);
        }
        snapshot
    }

    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn trail_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.trail_vertices)
    }

    pub fn field_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.fields)
    }
}

/// Hue in degrees for a particle moving at `speed`.
pub fn speed_hue(speed: f32) -> f32 {
    (speed * 2.0).rem_euclid(360.0)
}

/// Glow color for a particle moving at `speed` (70% saturation, 60% lightness).
pub fn speed_color(speed: f32) -> Vec3 {
    hsl_to_rgb(speed_hue(speed) / 360.0, 0.7, 0.6)
}

/// Convert HSL (all 0-1) to RGB.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bounds, PhysicsConfig};
    use crate::particle::ParticleType;
    use crate::spawn::ParticleFactory;
    use glam::Vec2;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(std::mem::size_of::<TrailVertex>(), 16);
        assert_eq!(std::mem::size_of::<FieldGlyph>(), 32);
    }

    #[test]
    fn test_capture_ranges_cover_trails() {
        let mut factory = ParticleFactory::seeded(2);
        let mut engine = VerletEngine::new(PhysicsConfig::default(), Bounds::new(500.0, 500.0));
        engine.add_particle(factory.create_particle(Vec2::new(100.0, 100.0), ParticleType::Normal, None));
        engine.add_particle(factory.create_particle(Vec2::new(300.0, 300.0), ParticleType::Light, None));
        engine.add_force_field(ForceField::repel(Vec2::new(250.0, 250.0), 10.0, 50.0));
        for _ in 0..5 {
            engine.update(16.0);
        }

        let snap = RenderSnapshot::capture(&engine);
        assert_eq!(snap.instances.len(), 2);
        assert_eq!(snap.trail_ranges, vec![0..5, 5..10]);
        assert_eq!(snap.fields[0].kind, 1);
        assert_eq!(snap.instance_bytes().len(), 64);
        assert_eq!(snap.trail_bytes().len(), 160);
        // Light particles fade with age
        assert!(snap.instances[1].color[3] < 1.0);
        assert_eq!(snap.instances[0].color[3], 1.0);
    }

    #[test]
    fn test_trail_alpha_ramp() {
        let mut factory = ParticleFactory::seeded(0);
        let mut engine = VerletEngine::default();
        engine.add_particle(factory.create_particle(Vec2::new(600.0, 400.0), ParticleType::Normal, None));
        for _ in 0..4 {
            engine.update(16.0);
        }
        let alphas: Vec<f32> = trail_vertices(&engine.particles()[0]).map(|v| v.alpha).collect();
        assert_eq!(alphas, vec![0.0, 0.125, 0.25, 0.375]);
    }

    #[test]
    fn test_speed_hue_wraps() {
        assert_eq!(speed_hue(10.0), 20.0);
        assert_eq!(speed_hue(190.0), 20.0);
        let red = speed_color(0.0);
        assert!(red.x > red.y && red.x > red.z);
    }
}
