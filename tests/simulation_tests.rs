//! Integration tests for the particle simulator and exporter.
//!
//! These drive the public API over many ticks and random populations and
//! check the guarantees the renderer relies on.

use fluid_sdf::prelude::*;
use fluid_sdf::spawn::{SEED_RADIUS, SPAWN_DIRECTION};

// ============================================================================
// Helpers
// ============================================================================

/// Deterministic source: always the middle of the requested range.
struct Midpoint;

impl RandomSource for Midpoint {
    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        (min + max) * 0.5
    }
}

fn config(max: usize) -> SimulationConfig {
    SimulationConfig {
        max_particle_count: max,
        target_radius: 0.1,
        time_scale: 1.0,
        spawn_position: Vec3::new(0.0, 1.0, 0.0),
    }
}

fn still(position: Vec3, radius: f32, age: f32) -> Particle {
    Particle {
        position,
        velocity: Vec3::ZERO,
        radius,
        age,
    }
}

/// Random population including dead and zero-radius particles.
fn random_population(rng: &mut SeededRandom, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let position = Vec3::new(
                rng.random_range(-5.0, 5.0),
                rng.random_range(0.0, 5.0),
                rng.random_range(-5.0, 5.0),
            );
            let radius = match rng.random_range(0.0, 1.0) {
                r if r < 0.1 => 0.0,
                r if r < 0.2 => -r,
                r => r * 0.2,
            };
            still(position, radius, rng.random_range(0.0, 20.0))
        })
        .collect()
}

// ============================================================================
// Population sizing
// ============================================================================

#[test]
fn test_population_reaches_target_after_n_updates() {
    for n in [0, 1, 7, 64] {
        let mut sim = ParticleSimulator::new(config(n), SeededRandom::from_seed(n as u64));
        for _ in 0..n {
            sim.update(0.016, Vec3::ZERO);
        }
        assert_eq!(sim.len(), n);
        for _ in 0..50 {
            sim.update(0.016, Vec3::ZERO);
            assert_eq!(sim.len(), n);
        }
    }
}

#[test]
fn test_lowering_target_truncates_immediately() {
    let mut sim = ParticleSimulator::new(config(32), SeededRandom::from_seed(2));
    for _ in 0..32 {
        sim.update(0.016, Vec3::ZERO);
    }
    sim.config_mut().max_particle_count = 10;
    sim.update(0.016, Vec3::ZERO);
    assert_eq!(sim.len(), 10);
}

#[test]
fn test_raising_target_grows_one_per_update() {
    let mut sim = ParticleSimulator::new(config(4), SeededRandom::from_seed(3));
    for _ in 0..4 {
        sim.update(0.016, Vec3::ZERO);
    }
    sim.config_mut().max_particle_count = 10;
    sim.update(0.016, Vec3::ZERO);
    assert_eq!(sim.len(), 5);
}

#[test]
fn test_spawn_uses_injected_source() {
    let mut sim = ParticleSimulator::new(config(1), Midpoint);
    let p = sim.spawn();
    assert_eq!(p.position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(p.velocity, SPAWN_DIRECTION);
    assert_eq!(p.radius, SEED_RADIUS);
    assert_eq!(p.age, 5.0);
}

#[test]
fn test_spawned_particle_steps_in_same_update() {
    let mut sim = ParticleSimulator::new(config(1), Midpoint);
    assert!(sim.is_empty());

    sim.update(0.1, Vec3::ZERO);

    let p = sim.particles()[0];
    assert!((p.age - 5.1).abs() < 1e-6);
    assert!((p.radius - (SEED_RADIUS + 0.02)).abs() < 1e-6);
    assert_ne!(p.position, sim.config().spawn_position);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let mut sim = ParticleSimulator::new(config(20), SeededRandom::from_seed(seed));
        for _ in 0..200 {
            sim.update(0.05, Vec3::new(0.0, 1.0, 3.0));
        }
        sim.export()
    };
    assert_eq!(run(42), run(42));
}

// ============================================================================
// Radius lifecycle
// ============================================================================

#[test]
fn test_radius_grows_then_shrinks() {
    let mut sim = ParticleSimulator::new(config(1), Midpoint)
        .with_particles([still(Vec3::new(0.0, 1.0, 0.0), SEED_RADIUS, 0.0)]);

    let mut prev = sim.particles()[0];
    let mut saw_shrink = false;
    for _ in 0..200 {
        sim.update(0.1, Vec3::ZERO);
        let p = sim.particles()[0];
        if p.age < prev.age {
            // Respawned
            break;
        }
        if p.age < 10.0 {
            assert!(p.radius >= prev.radius, "growing radius decreased at age {}", p.age);
            assert!(p.radius <= 0.1);
        } else {
            assert!(p.radius < prev.radius, "shrinking radius did not decrease at age {}", p.age);
            saw_shrink = true;
        }
        prev = p;
    }
    assert!(saw_shrink);
}

#[test]
fn test_scenario_growth_tick() {
    let mut sim = ParticleSimulator::new(config(1), Midpoint)
        .with_particles([still(Vec3::new(0.0, 1.0, 0.0), 0.05, 0.0)]);

    sim.update(0.5, Vec3::ZERO);

    let p = sim.particles()[0];
    assert!((p.radius - 0.1).abs() < 1e-6);
    assert!((p.age - 0.5).abs() < 1e-6);
    // vy = -0.5 * 0.5 after gravity and damping; y = 1 + vy * 0.5
    assert!((p.velocity.y - -0.25).abs() < 1e-6);
    assert!((p.position.y - 0.875).abs() < 1e-6);
}

#[test]
fn test_scenario_threshold_tick_shrinks() {
    let mut sim = ParticleSimulator::new(config(1), Midpoint)
        .with_particles([still(Vec3::new(0.0, 1.0, 0.0), 0.1, 9.9)]);

    sim.update(0.2, Vec3::ZERO);

    let p = sim.particles()[0];
    assert!((p.age - 10.1).abs() < 1e-5);
    assert!((p.radius - 0.06).abs() < 1e-6);
}

#[test]
fn test_time_scale_applies_to_dt() {
    let mut cfg = config(1);
    cfg.time_scale = 2.0;
    let mut sim = ParticleSimulator::new(cfg, Midpoint)
        .with_particles([still(Vec3::new(0.0, 1.0, 0.0), 0.01, 0.0)]);

    sim.update(0.1, Vec3::ZERO);

    let p = sim.particles()[0];
    assert!((p.age - 0.2).abs() < 1e-6);
    assert!((p.radius - 0.05).abs() < 1e-6);
}

// ============================================================================
// Floor collision and respawn
// ============================================================================

#[test]
fn test_floor_clamp() {
    let mut falling = still(Vec3::new(0.0, 0.05, 0.0), 0.05, 1.0);
    falling.velocity = Vec3::new(0.5, -3.0, 0.0);
    let mut sim = ParticleSimulator::new(config(1), Midpoint).with_particles([falling]);

    sim.update(0.1, Vec3::ZERO);

    let p = sim.particles()[0];
    assert_eq!(p.position.y, 0.0);
    assert_eq!(p.velocity.y, 0.0);
    assert!(p.velocity.x > 0.0);
}

#[test]
fn test_particles_never_observed_dead() {
    let mut cfg = config(64);
    cfg.time_scale = 3.0;
    let mut sim = ParticleSimulator::new(cfg, SeededRandom::from_seed(8));
    for _ in 0..2000 {
        sim.update(0.05, Vec3::ZERO);
        assert!(sim.particles().iter().all(|p| p.radius > 0.0));
    }
}

#[test]
fn test_nonpositive_target_radius_keeps_respawning() {
    let mut cfg = config(4);
    cfg.target_radius = 0.0;
    let mut sim = ParticleSimulator::new(cfg, SeededRandom::from_seed(9));
    for _ in 0..20 {
        sim.update(0.016, Vec3::ZERO);
        // Growing particles clamp to zero and respawn; only ones past the growth phase shrink.
        assert!(sim
            .particles()
            .iter()
            .all(|p| p.radius > 0.0 && p.radius <= SEED_RADIUS));
    }
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_properties_over_random_populations() {
    let mut rng = SeededRandom::from_seed(1234);
    for round in 0..50 {
        let count = (round * 37) % (MAX_PARTICLES + 200);
        let particles = random_population(&mut rng, count);
        let camera = Vec3::new(
            rng.random_range(-10.0, 10.0),
            rng.random_range(-10.0, 10.0),
            rng.random_range(-10.0, 10.0),
        );

        let exported = ParticleExporter::export(&particles, camera);
        let positive: Vec<&Particle> = particles.iter().filter(|p| p.radius > 0.0).collect();

        assert!(exported.iter().all(|p| p.radius > 0.0));
        assert!(exported.len() <= MAX_PARTICLES);
        assert!(exported.len() <= positive.len());
        assert_eq!(exported.len(), positive.len().min(MAX_PARTICLES));

        let distances: Vec<f32> = exported
            .iter()
            .map(|p| p.position.distance_squared(camera))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        if positive.len() <= MAX_PARTICLES {
            let expected = positive.iter().map(|p| p.radius).fold(0.0f32, f32::max);
            assert_eq!(ParticleExporter::max_radius(&exported), expected);
        }
    }
}

#[test]
fn test_export_empty() {
    let exported = ParticleExporter::export(&[], Vec3::ZERO);
    assert!(exported.is_empty());
    assert_eq!(ParticleExporter::max_radius(&exported), 0.0);
}

#[test]
fn test_export_uses_camera_from_last_update() {
    let particles = [
        still(Vec3::new(-3.0, 0.0, 0.0), 0.1, 1.0),
        still(Vec3::new(3.0, 0.0, 0.0), 0.1, 1.0),
    ];
    let mut cfg = config(2);
    cfg.time_scale = 0.0;
    let mut sim = ParticleSimulator::new(cfg, Midpoint).with_particles(particles);

    sim.update(0.016, Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(sim.export()[0].position.x, 3.0);

    sim.update(0.016, Vec3::new(-10.0, 0.0, 0.0));
    assert_eq!(sim.export()[0].position.x, -3.0);
}

#[test]
fn test_export_is_independent_of_simulator() {
    let mut sim = ParticleSimulator::new(config(8), SeededRandom::from_seed(4));
    for _ in 0..8 {
        sim.update(0.1, Vec3::ZERO);
    }
    let snapshot = sim.export();
    let copy = snapshot.clone();
    sim.clear();
    for _ in 0..3 {
        sim.update(0.1, Vec3::ZERO);
    }
    assert_eq!(snapshot, copy);
}
