//! # Presets Tour
//!
//! Loads every preset in turn, runs it for a few simulated seconds and
//! reports how the population evolved.
//!
//! Run with: `cargo run --example presets_tour`

use tracing_subscriber::EnvFilter;
use verlet_sandbox::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bounds = Bounds::new(1200.0, 800.0);
    let mut sandbox = Sandbox::new(PhysicsConfig::default(), bounds, ParticleFactory::seeded(3));

    for preset in PRESETS {
        sandbox.load_preset(preset);
        let start = sandbox.engine().particle_count();

        // ~5 seconds at 60 fps
        for _ in 0..300 {
            sandbox.frame(16.0);
        }

        let particles = sandbox.engine().particles();
        let centroid = particles.iter().map(|p| p.position()).sum::<Vec2>() / particles.len().max(1) as f32;
        println!("{} - {}", preset.name, preset.description);
        println!(
            "  particles {} -> {}, centroid ({:.0}, {:.0})",
            start,
            particles.len(),
            centroid.x,
            centroid.y
        );
    }
}
