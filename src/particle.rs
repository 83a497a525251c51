//! Particle records and the Verlet position history they carry.
//!
//! A particle never stores its velocity as integration state. Motion is
//! encoded by the pair of positions in [`VerletState`]; the `velocity` field
//! on [`Particle`] is a display value written once per tick for renderers.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::spawn::next_particle_id;

/// Relative slack when comparing accumulated age against a lifespan.
const LIFE_TOLERANCE: f64 = 1e-6;

/// Unique particle identity, issued once per process and never reused.
///
/// Ids can only be minted inside the crate, by the factory's counter or by
/// [`Particle::new`], so a live id never collides with one issued later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub(crate) u64);

impl ParticleId {
    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "particle_{}", self.0)
    }
}

/// Property bundle selector for spawned particles.
///
/// A type does not change the physics laws a particle obeys, only the mass,
/// radius, color and lifetime it is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleType {
    #[default]
    Normal,
    Heavy,
    Light,
    Charged,
}

/// Physical and visual properties resolved from a [`ParticleType`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypeProperties {
    pub mass: f32,
    pub radius: f32,
    /// Display color as `#rrggbb`.
    pub hex: &'static str,
    /// Total lifespan in seconds; `<= 0` means the particle never ages.
    pub max_life: f32,
}

impl TypeProperties {
    /// RGB color in 0-1 range.
    pub fn color(&self) -> Vec3 {
        hex_to_rgb(self.hex).unwrap_or(Vec3::ONE)
    }
}

impl ParticleType {
    /// All types, in table order.
    pub const ALL: [ParticleType; 4] = [
        ParticleType::Normal,
        ParticleType::Heavy,
        ParticleType::Light,
        ParticleType::Charged,
    ];

    /// Look up the fixed property table entry for this type.
    pub fn properties(self) -> TypeProperties {
        match self {
            ParticleType::Normal => TypeProperties {
                mass: 1.0,
                radius: 5.0,
                hex: "#a8e6cf",
                max_life: -1.0,
            },
            ParticleType::Heavy => TypeProperties {
                mass: 3.0,
                radius: 8.0,
                hex: "#ff6b6b",
                max_life: -1.0,
            },
            ParticleType::Light => TypeProperties {
                mass: 0.5,
                radius: 3.0,
                hex: "#4ecdc4",
                max_life: 15.0,
            },
            ParticleType::Charged => TypeProperties {
                mass: 1.5,
                radius: 6.0,
                hex: "#ffe66d",
                max_life: -1.0,
            },
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            ParticleType::Normal => "normal",
            ParticleType::Heavy => "heavy",
            ParticleType::Light => "light",
            ParticleType::Charged => "charged",
        }
    }
}

/// Parse a `#rrggbb` string into an RGB vector (0-1 per channel).
pub fn hex_to_rgb(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(digits.get(i..i + 2)?, 16)
            .ok()
            .map(|c| c as f32 / 255.0)
    };
    Some(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Current and previous position of a Verlet particle.
///
/// The implied per-step displacement is `position - previous_position`.
/// Only the engine's integration and boundary passes move the history, so
/// outside the crate this type is read-only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerletState {
    position: Vec2,
    previous_position: Vec2,
}

impl VerletState {
    /// A particle sitting still at `position`.
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
        }
    }

    /// A particle whose first integration step reproduces `velocity`.
    ///
    /// The history is offset by one whole velocity, matching how the
    /// engine reads back one step as `(new - old) / dt`.
    pub fn moving(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            previous_position: position - velocity,
        }
    }

    /// A particle moving at `velocity` units per second when stepped with a
    /// fixed `dt` (seconds).
    pub fn launched(position: Vec2, velocity: Vec2, dt: f32) -> Self {
        Self::moving(position, velocity * dt)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    /// Displacement covered during the last step.
    #[inline]
    pub fn implied_step(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Shift history: the current position becomes the previous one.
    #[inline]
    pub(crate) fn advance(&mut self, new_position: Vec2) {
        self.previous_position = self.position;
        self.position = new_position;
    }

    /// Clamp one axis to `wall` and mirror the history so the next step
    /// travels back with `restitution` of the incoming displacement.
    #[inline]
    pub(crate) fn bounce(&mut self, axis: Axis, wall: f32, restitution: f32) {
        match axis {
            Axis::X => {
                self.position.x = wall;
                self.previous_position.x =
                    self.position.x + (self.position.x - self.previous_position.x) * restitution;
            }
            Axis::Y => {
                self.position.y = wall;
                self.previous_position.y =
                    self.position.y + (self.position.y - self.previous_position.y) * restitution;
            }
        }
    }
}

/// Axis selector for per-axis boundary handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

/// Bounded history of past positions, newest at the back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    /// Append a sample, dropping the oldest ones beyond `capacity`.
    pub(crate) fn push_bounded(&mut self, point: Vec2, capacity: usize) {
        self.points.push_back(point);
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }
}

/// A simulated point mass.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Process-unique identity.
    pub id: ParticleId,
    pub kind: ParticleType,
    pub mass: f32,
    pub radius: f32,
    /// RGB color, 0-1 per channel.
    pub color: Vec3,
    /// Remaining lifespan in seconds, for display. Expiry is decided by `age`.
    pub life: f32,
    /// Total lifespan in seconds; `<= 0` means infinite.
    pub max_life: f32,
    /// Seconds survived so far.
    pub(crate) age: f64,
    pub(crate) state: VerletState,
    pub(crate) acceleration: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) trail: Trail,
}

impl Particle {
    /// Build a particle with the properties of `kind` and a fresh id.
    ///
    /// [`ParticleFactory`](crate::spawn::ParticleFactory) covers the usual
    /// spawn patterns; this is for hand-placed state such as
    /// [`VerletState::launched`].
    pub fn new(kind: ParticleType, state: VerletState) -> Self {
        Self::with_id(next_particle_id(), kind, state)
    }

    pub(crate) fn with_id(id: ParticleId, kind: ParticleType, state: VerletState) -> Self {
        let props = kind.properties();
        Self {
            id,
            kind,
            mass: props.mass,
            radius: props.radius,
            color: props.color(),
            life: props.max_life,
            max_life: props.max_life,
            age: 0.0,
            velocity: state.implied_step(),
            state,
            acceleration: Vec2::ZERO,
            trail: Trail::default(),
        }
    }

    /// Override the lifespan; `seconds <= 0` makes the particle immortal.
    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.life = seconds;
        self.max_life = seconds;
        self.age = 0.0;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.state.position()
    }

    #[inline]
    pub fn previous_position(&self) -> Vec2 {
        self.state.previous_position()
    }

    #[inline]
    pub fn state(&self) -> &VerletState {
        &self.state
    }

    /// Acceleration accumulated during the most recent tick.
    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Velocity derived during the most recent tick, for display only.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Whether the particle ages at all.
    #[inline]
    pub fn is_mortal(&self) -> bool {
        self.max_life > 0.0
    }

    /// Seconds this particle has been simulated.
    #[inline]
    pub fn age(&self) -> f64 {
        self.age
    }

    /// A mortal particle whose life has run out.
    ///
    /// Frame steps are `f32`, so an age summed over exactly `max_life`
    /// seconds can land a few ulps short; the relative tolerance absorbs that.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_mortal() && self.age >= f64::from(self.max_life) * (1.0 - LIFE_TOLERANCE)
    }

    /// Add `dt` seconds of age; immortal particles are left alone.
    pub(crate) fn grow_older(&mut self, dt: f32) {
        if self.is_mortal() {
            self.age += f64::from(dt);
            self.life = (f64::from(self.max_life) - self.age) as f32;
        }
    }

    /// Remaining life as a fraction in `[0, 1]`; immortal particles report 1.
    pub fn life_fraction(&self) -> f32 {
        if self.is_mortal() {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table() {
        let heavy = ParticleType::Heavy.properties();
        assert_eq!(heavy.mass, 3.0);
        assert_eq!(heavy.radius, 8.0);
        assert!(heavy.max_life <= 0.0);

        let light = ParticleType::Light.properties();
        assert_eq!(light.mass, 0.5);
        assert_eq!(light.max_life, 15.0);
    }

    #[test]
    fn test_hex_to_rgb() {
        let red = hex_to_rgb("#ff0000").unwrap();
        assert!((red.x - 1.0).abs() < 1e-6);
        assert_eq!(red.y, 0.0);
        assert!(hex_to_rgb("#12345").is_none());
        assert!(hex_to_rgb("#zzzzzz").is_none());
    }

    #[test]
    fn test_moving_state_encodes_velocity() {
        let s = VerletState::moving(Vec2::new(100.0, 100.0), Vec2::new(10.0, -2.0));
        assert_eq!(s.previous_position(), Vec2::new(90.0, 102.0));
        assert_eq!(s.implied_step(), Vec2::new(10.0, -2.0));
    }

    #[test]
    fn test_bounce_mirrors_history() {
        let mut s = VerletState::moving(Vec2::new(-1.0, 50.0), Vec2::new(-4.0, 0.0));
        s.bounce(Axis::X, 5.0, 0.8);
        assert_eq!(s.position().x, 5.0);
        // previous = 5 + (5 - 3) * 0.8
        assert!((s.previous_position().x - 6.6).abs() < 1e-5);
        assert!(s.implied_step().x < 0.0);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut trail = Trail::default();
        for i in 0..10 {
            trail.push_bounded(Vec2::splat(i as f32), 4);
        }
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.last(), Some(Vec2::splat(9.0)));
        assert_eq!(trail.iter().next(), Some(Vec2::splat(6.0)));

        trail.push_bounded(Vec2::ZERO, 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_lifetime_override() {
        let p = Particle::with_id(ParticleId(1), ParticleType::Normal, VerletState::at_rest(Vec2::ZERO));
        assert!(!p.is_mortal());
        assert!(!p.is_expired());

        let p = p.with_lifetime(2.0);
        assert!(p.is_mortal());
        assert_eq!(p.life_fraction(), 1.0);
    }

    #[test]
    fn test_aging_to_exact_lifetime_expires() {
        let mut p = Particle::with_id(ParticleId(2), ParticleType::Normal, VerletState::at_rest(Vec2::ZERO))
            .with_lifetime(0.8);
        for _ in 0..49 {
            p.grow_older(0.016);
        }
        assert!(!p.is_expired());
        p.grow_older(0.016);
        assert!(p.is_expired());
        assert!(p.life.abs() < 1e-5);

        let mut immortal = Particle::with_id(ParticleId(3), ParticleType::Heavy, VerletState::at_rest(Vec2::ZERO));
        immortal.grow_older(100.0);
        assert_eq!(immortal.age(), 0.0);
        assert!(!immortal.is_expired());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ParticleId(7).to_string(), "particle_7");
    }
}
