//! Interaction Tests - Tools Against Built Ships
//!
//! Every test builds a ship through the public builder and drives the
//! interaction API with a seeded random engine.

use std::sync::Arc;

use glam::Vec2;
use wreckyard_engine::builder::{build_ship, RasterLayer, ShipDefinition};
use wreckyard_engine::interaction::{GrippedMove, HeatBlasterAction, MAX_PINNED_POINTS};
use wreckyard_engine::material::palette::{self, STEEL_COLOR, WOOD_COLOR};
use wreckyard_engine::material::ColorKey;
use wreckyard_engine::ship::Ship;
use wreckyard_engine::{FlatOcean, GameRandom, PointIndex, SimulationParameters};

fn params() -> SimulationParameters {
    SimulationParameters {
        max_ephemeral_particles: 64,
        ..Default::default()
    }
}

fn ship_from_fn(width: u32, height: u32, f: impl FnMut(u32, u32) -> ColorKey) -> Ship {
    let definition = ShipDefinition::new("test", RasterLayer::from_fn(width, height, f));
    build_ship(&definition, Arc::new(palette::default_database()), &params()).unwrap()
}

fn solid(width: u32, height: u32) -> Ship {
    ship_from_fn(width, height, |_, _| STEEL_COLOR)
}

fn point_at(ship: &Ship, x: f32, y: f32) -> PointIndex {
    ship.nearest_point_at(Vec2::new(x, y), 0.1).unwrap()
}

// ============================================================================
// Moves
// ============================================================================

#[test]
fn test_move_keeps_component_shape() {
    let mut ship = solid(4, 3);
    let params = params();
    let component = ship.pick_connected_component_to_move(Vec2::new(0.0, 1.0), &params).unwrap();
    let a = point_at(&ship, -2.0, 0.0);
    let b = point_at(&ship, 1.0, 2.0);
    let before = ship.points().position(b) - ship.points().position(a);

    ship.move_by(component, Vec2::new(10.0, 5.0), Vec2::new(1.0, 0.0), &params);

    let after = ship.points().position(b) - ship.points().position(a);
    assert!((after - before).length() < 1e-5);
    assert_eq!(ship.points().velocity(a), Vec2::new(1.0, 0.0));
    assert_eq!(ship.points().static_force(a), Vec2::ZERO);
}

#[test]
fn test_every_particle_stays_in_world_after_moves() {
    let mut ship = solid(3, 3);
    let params = params();
    let bounds = params.world_bounds();
    let component = ship.pick_connected_component_to_move(Vec2::new(-0.5, 1.0), &params).unwrap();

    ship.move_by(component, Vec2::new(-1.0e5, 0.0), Vec2::ZERO, &params);
    ship.rotate_ship_by(1.3, Vec2::new(3000.0, 0.0), 0.1, &params);

    for p in ship.points().all_points() {
        assert!(bounds.contains(ship.points().position(p)), "{:?} left the world", p);
    }
}

#[test]
fn test_overlapping_grips_move_each_point_once() {
    let mut ship = solid(3, 1);
    let params = params();
    let target = point_at(&ship, -0.5, 0.0);
    let start = ship.points().position(target);
    let grips = [
        GrippedMove {
            center: start,
            radius: 0.5,
            offset: Vec2::new(0.0, 1.0),
            inertial_velocity: Vec2::ZERO,
        },
        GrippedMove {
            center: start + Vec2::new(0.2, 0.0),
            radius: 0.5,
            offset: Vec2::new(0.0, 1.0),
            inertial_velocity: Vec2::ZERO,
        },
    ];

    ship.move_gripped_by(&grips, &params);

    // Owned by the first grip at full strength, moved exactly once
    assert!(ship.points().position(target).distance(start + Vec2::new(0.0, 1.0)) < 1e-5);
    ship.end_move_gripped_by();
    assert!(ship.points().all_points().all(|p| ship.points().forces_receptivity(p) == 1.0));
}

// ============================================================================
// Destruction
// ============================================================================

#[test]
fn test_destroy_splits_a_bar() {
    let mut ship = solid(5, 1);
    let params = params();
    let mut rng = GameRandom::from_seed(21);
    let middle = point_at(&ship, -0.5, 0.0);

    assert!(ship.destroy_at(Vec2::new(-0.5, 0.0), 0.2, 0.0, &params, &mut rng));

    assert!(ship.points().is_detached(middle));
    // Two halves plus the detached particle
    assert_eq!(ship.connected_component_count(), 3);
    assert!(ship.points().live_ephemeral_count() >= params.debris_per_detached_point);
}

#[test]
fn test_saw_separates_metal_and_wood() {
    // Left half steel, right half wood
    let mut ship = ship_from_fn(4, 1, |x, _| if x < 2 { STEEL_COLOR } else { WOOD_COLOR });
    let params = params();
    let mut rng = GameRandom::from_seed(3);

    let metal = ship.saw_through(Vec2::new(-1.5, 1.0), Vec2::new(-1.5, -1.0), 0.0, &params, &mut rng);
    let wood = ship.saw_through(Vec2::new(0.5, 1.0), Vec2::new(0.5, -1.0), 0.0, &params, &mut rng);

    assert_eq!((metal.metal_springs, metal.non_metal_springs), (1, 0));
    assert_eq!((wood.metal_springs, wood.non_metal_springs), (0, 1));
    assert_eq!(ship.connected_component_count(), 3);
}

#[test]
fn test_saw_through_block_removes_triangles_of_cut_springs() {
    let mut ship = solid(3, 3);
    let params = params();
    let mut rng = GameRandom::from_seed(5);

    let outcome = ship.saw_through(Vec2::new(-0.9, 2.5), Vec2::new(-0.9, -0.5), 0.0, &params, &mut rng);

    assert!(outcome.total() > 0);
    for s in ship.springs().indices() {
        if ship.springs().is_deleted(s) {
            assert!(ship.springs().super_triangles(s).is_empty());
        }
    }
    for t in ship.triangles().indices() {
        if !ship.triangles().is_deleted(t) {
            for s in ship.triangles().sub_springs(t) {
                assert!(!ship.springs().is_deleted(s));
            }
        }
    }
}

// ============================================================================
// Thermal, pressure, water
// ============================================================================

#[test]
fn test_heat_then_extinguish() {
    let mut ship = solid(3, 3);
    let params = params();
    let center = point_at(&ship, -0.5, 1.0);
    let before = ship.points().temperature(center);

    assert!(ship.apply_heat_blaster_at(Vec2::new(-0.5, 1.0), HeatBlasterAction::Heat, 1.0, &params));
    let heated = ship.points().temperature(center);
    assert!(heated > before);

    assert!(ship.extinguish_fire_at(Vec2::new(-0.5, 1.0), 1.0, &params));
    assert!(ship.points().temperature(center) < heated);
}

#[test]
fn test_pressure_and_flood_target_non_hull_particles() {
    let mut ship = solid(3, 3);
    let params = params();
    let mut rng = GameRandom::from_seed(1);

    let target = ship.inject_pressure_at(Vec2::new(-0.45, 1.05), 1.0, &params).unwrap();
    assert_eq!(target, point_at(&ship, -0.5, 1.0));

    assert!(ship.flood_at(Vec2::new(-0.5, 1.0), 2.0, 0.0, &params, &mut rng));
    assert!(ship.points().water(target) > 0.0);
}

// ============================================================================
// Queued interactions
// ============================================================================

#[test]
fn test_queued_interactions_apply_once() {
    let mut ship = solid(3, 3);
    let params = params();
    let p = point_at(&ship, 0.5, 2.0);

    ship.pull(p, Vec2::new(5.0, 2.0), 0.5);
    ship.swirl_at(Vec2::new(-0.5, 1.0), 1.0);
    ship.draw_to(Vec2::new(-0.5, 1.0), 1.0);
    ship.apply_blast_at(Vec2::new(-0.5, 1.0), 1.0, 1.0, &params);
    assert_eq!(ship.queued_interaction_count(), 4);

    assert_eq!(ship.apply_queued_interactions(&params), 4);
    let force = ship.points().static_force(p);
    assert_ne!(force, Vec2::ZERO);
    assert_eq!(ship.points().velocity(p), Vec2::ZERO);

    assert_eq!(ship.apply_queued_interactions(&params), 0);
    assert_eq!(ship.points().static_force(p), force);
}

// ============================================================================
// Lightning, decay, snap, pins
// ============================================================================

#[test]
fn test_lightning_round_trip() {
    let mut ship = solid(6, 6);
    let params = params();
    let ocean = FlatOcean::new(-1.0);
    let mut rng = GameRandom::from_seed(77);

    let target = ship.find_suitable_lightning_target(&ocean, &mut rng).unwrap();
    assert!(target.y >= 3.0);
    assert!(ship.apply_lightning(target, 0.0, &params, &mut rng));
    // The whole 6x6 block lies inside the heat radius
    for p in ship.points().ship_points() {
        assert!(ship.points().temperature(p) > params.initial_temperature);
    }
}

#[test]
fn test_scrub_and_rot_keep_decay_in_unit_range() {
    let mut ship = solid(4, 4);
    let params = params();
    let ocean = FlatOcean::new(2.0);
    for _ in 0..50 {
        ship.rot_through(Vec2::new(-2.0, 0.0), Vec2::new(1.0, 3.0), &ocean, &params);
    }
    for p in ship.points().ship_points() {
        let decay = ship.points().decay(p);
        assert!((0.0..=1.0).contains(&decay));
    }
    for _ in 0..50 {
        ship.scrub_through(Vec2::new(-2.0, 0.0), Vec2::new(1.0, 3.0), &params);
    }
    for p in ship.points().ship_points() {
        assert!(ship.points().decay(p) <= 1.0);
    }
}

#[test]
fn test_thanos_snap_is_reproducible() {
    let params = params();
    let snap = |seed| {
        let mut ship = solid(6, 3);
        let mut rng = GameRandom::from_seed(seed);
        for frame in 0..10 {
            let reach = frame as f32 * 0.5;
            ship.apply_thanos_snap(0.0, -reach, reach, frame as f32, &params, &mut rng);
        }
        ship.points()
            .ship_points()
            .map(|p| ship.points().is_detached(p))
            .collect::<Vec<_>>()
    };
    assert_eq!(snap(13), snap(13));
}

#[test]
fn test_pins_are_capped() {
    let width = MAX_PINNED_POINTS as u32 + 3;
    let mut ship = solid(width, 1);
    let params = SimulationParameters {
        tool_search_radius: 0.2,
        ..params()
    };
    let x0 = -(width as f32) / 2.0;
    for i in 0..width {
        assert!(ship.toggle_pin_at(Vec2::new(x0 + i as f32, 0.0), &params));
    }
    assert_eq!(ship.pinned_points().count(), MAX_PINNED_POINTS);
    assert!(ship.pinned_points().all(|p| ship.points().is_pinned(p)));
}

#[test]
fn test_ephemeral_particles_expire() {
    let mut ship = solid(2, 2);
    let mut rng = GameRandom::from_seed(2);
    ship.spawn_air_bubble(Vec2::ZERO, 0.0, &mut rng).unwrap();
    ship.spawn_sparkle(Vec2::ZERO, Vec2::ZERO, 0.0, &mut rng).unwrap();
    assert_eq!(ship.points().live_ephemeral_count(), 2);
    assert_eq!(ship.update_ephemeral_particles(100.0), 2);
    assert_eq!(ship.points().live_ephemeral_count(), 0);
}
