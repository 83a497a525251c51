//! Named tuning presets

use crate::config::PhysicsConfig;
use crate::error::ConfigError;
use crate::particle::ParticleType;

pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: fn() -> PhysicsConfig,
}

impl Preset {
    /// Build this preset's configuration.
    pub fn config(&self) -> PhysicsConfig {
        (self.config)()
    }
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "Gravitational Dance",
        description: "Particles attracted to touch with orbital motion",
        config: PhysicsConfig::default,
    },
    Preset {
        name: "Cosmic Storm",
        description: "High-energy particles with strong interactions",
        config: || PhysicsConfig {
            gravity: 0.0,
            damping: 0.001,
            interaction_strength: 2.0,
            trail_length: 50,
            mouse_attraction: 100.0,
            particle_count: 60,
            particle_type: ParticleType::Charged,
        },
    },
    Preset {
        name: "Gentle Flow",
        description: "Smooth, flowing particle motion",
        config: || PhysicsConfig {
            gravity: 0.05,
            damping: 0.05,
            interaction_strength: 0.2,
            trail_length: 60,
            mouse_attraction: 30.0,
            particle_count: 80,
            particle_type: ParticleType::Light,
        },
    },
    Preset {
        name: "Heavy Matter",
        description: "Dense particles with strong gravitational effects",
        config: || PhysicsConfig {
            gravity: 0.2,
            damping: 0.01,
            interaction_strength: 1.5,
            trail_length: 20,
            mouse_attraction: 80.0,
            particle_count: 25,
            particle_type: ParticleType::Heavy,
        },
    },
];

/// Find a preset by name, ignoring ASCII case.
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Like [`preset`], but reports unknown names as an error.
pub fn require_preset(name: &str) -> Result<&'static Preset, ConfigError> {
    preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        let storm = preset("cosmic storm").unwrap();
        assert_eq!(storm.config().particle_type, ParticleType::Charged);
        assert_eq!(storm.config().gravity, 0.0);
        assert!(preset("Nebula").is_none());
        assert!(require_preset("Nebula").is_err());
    }

    #[test]
    fn test_default_matches_first_preset() {
        assert_eq!(PRESETS[0].config(), PhysicsConfig::default());
    }

    #[test]
    fn test_preset_names_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
