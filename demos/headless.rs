//! # Headless Sandbox
//!
//! Runs the sandbox without a window, steering the pointer in a circle and
//! firing the explosion and orbital gestures now and then.
//!
//! Run with: `RUST_LOG=verlet_sandbox=debug cargo run --example headless`

use glam::Vec2;
use std::f32::consts::TAU;
use tracing_subscriber::EnvFilter;
use verlet_sandbox::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    let bounds = Bounds::new(1200.0, 800.0);
    let mut sandbox = Sandbox::new(PhysicsConfig::default(), bounds, ParticleFactory::seeded(7));

    println!("=== Headless Sandbox ===");
    println!("Frames: {}", frames);
    println!("Starting particles: {}", sandbox.engine().particle_count());
    println!();

    for frame in 0..frames {
        let angle = frame as f32 / 240.0 * TAU;
        sandbox.set_pointer(bounds.center() + Vec2::from_angle(angle) * 250.0);

        if frame % 120 == 60 {
            sandbox.explode_at_pointer();
        }
        if frame % 300 == 150 {
            sandbox.orbit_at_pointer();
        }

        sandbox.frame(16.0);

        if frame % 60 == 0 {
            let snapshot = RenderSnapshot::capture(sandbox.engine());
            let mean_speed = if snapshot.instances.is_empty() {
                0.0
            } else {
                snapshot.instances.iter().map(|i| i.speed).sum::<f32>() / snapshot.instances.len() as f32
            };
            println!(
                "frame {:4}  particles {:3}  trail verts {:5}  mean speed {:8.1}",
                frame,
                snapshot.instances.len(),
                snapshot.trail_vertices.len(),
                mean_speed
            );
        }
    }
}
