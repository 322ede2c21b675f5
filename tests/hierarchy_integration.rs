//! Group hierarchy integration tests: composite motion with the group
//! origin as pivot, group-level animation, removal cascades, and resolved
//! placements in queries and snapshots.

use easel::Director;
use easel::animate::{glide_to, spin_for};
use easel::components::shape::Color;
use easel::error::Error;
use easel::motion;
use easel::resources::stage::{Stage, destroy};
use easel::shapes;
use easel::systems::collision::colliding;
use easel::systems::group::resolve_placement;
use easel::systems::snapshot::snapshot;

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn moving_the_group_carries_its_members() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let world = director.world_mut();
    let a = shapes::circle(world, Color::RED, 5.0, 110.0, 100.0).unwrap();
    let b = shapes::circle(world, Color::BLUE, 5.0, 90.0, 100.0).unwrap();
    let cluster = shapes::group(world, &[a, b], 100.0, 100.0).unwrap();

    motion::move_by(world, cluster, 50.0, -20.0).unwrap();

    let pos_a = resolve_placement(world, a).position;
    assert!(approx_eq(pos_a.x, 160.0));
    assert!(approx_eq(pos_a.y, 80.0));
    let pos_b = resolve_placement(world, b).position;
    assert!(approx_eq(pos_b.x, 140.0));
    assert!(approx_eq(pos_b.y, 80.0));
}

#[test]
fn rotating_the_group_pivots_members_around_its_origin() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let world = director.world_mut();
    let satellite = shapes::circle(world, Color::RED, 5.0, 150.0, 100.0).unwrap();
    let cluster = shapes::group(world, &[satellite], 100.0, 100.0).unwrap();

    // quarter turn clockwise: the +x offset swings to +y
    motion::turn_right(world, cluster, 90.0).unwrap();
    let pos = resolve_placement(world, satellite).position;
    assert!(approx_eq(pos.x, 100.0));
    assert!(approx_eq(pos.y, 150.0));
}

#[test]
fn scaling_the_group_stretches_member_offsets() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let world = director.world_mut();
    let satellite = shapes::circle(world, Color::RED, 5.0, 120.0, 100.0).unwrap();
    let cluster = shapes::group(world, &[satellite], 100.0, 100.0).unwrap();

    motion::set_scale(world, cluster, 2.0, 2.0).unwrap();
    let placement = resolve_placement(world, satellite);
    assert!(approx_eq(placement.position.x, 140.0));
    assert!(approx_eq(placement.position.y, 100.0));
    // member bounds scale with the group
    assert!(approx_eq(placement.scale.x, 2.0));
}

#[test]
fn gliding_the_group_animates_member_placements() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let member = shapes::circle(director.world_mut(), Color::RED, 5.0, 10.0, 0.0).unwrap();
    let cluster = shapes::group(director.world_mut(), &[member], 0.0, 0.0).unwrap();
    glide_to(director.world_mut(), cluster, 100.0, 0.0, 1.0).unwrap();

    director.run_frames(30).unwrap();
    assert_eq!(
        motion::get_x(director.world(), cluster).unwrap(),
        100.0
    );
    let pos = resolve_placement(director.world(), member).position;
    assert!(approx_eq(pos.x, 110.0));
}

#[test]
fn spinning_the_group_orbits_members() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let member = shapes::circle(director.world_mut(), Color::RED, 5.0, 50.0, 0.0).unwrap();
    let cluster = shapes::group(director.world_mut(), &[member], 0.0, 0.0).unwrap();
    spin_for(director.world_mut(), cluster, 90.0, 1.0).unwrap();

    director.run_frames(15).unwrap();
    // half the sweep: 45 degrees clockwise
    let pos = resolve_placement(director.world(), member).position;
    let expected = 50.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!((pos.x - expected).abs() < 0.1);
    assert!((pos.y - expected).abs() < 0.1);

    director.run_frames(15).unwrap();
    let pos = resolve_placement(director.world(), member).position;
    assert!((pos.x).abs() < 0.01);
    assert!((pos.y - 50.0).abs() < 0.01);
}

#[test]
fn collision_sees_group_composed_positions() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let world = director.world_mut();
    let member = shapes::rectangle(world, Color::RED, 20.0, 20.0, 0.0, 0.0).unwrap();
    let cluster = shapes::group(world, &[member], 0.0, 0.0).unwrap();
    let wall = shapes::rectangle(world, Color::BLUE, 20.0, 20.0, 200.0, 0.0).unwrap();
    assert!(!colliding(world, member, wall).unwrap());

    motion::go_to_xy(world, cluster, 195.0, 0.0).unwrap();
    assert!(colliding(world, member, wall).unwrap());
}

#[test]
fn destroying_the_group_removes_members_too() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let a = shapes::circle(director.world_mut(), Color::RED, 5.0, 10.0, 10.0).unwrap();
    let b = shapes::circle(director.world_mut(), Color::BLUE, 5.0, 20.0, 20.0).unwrap();
    let cluster = shapes::group(director.world_mut(), &[a, b], 0.0, 0.0).unwrap();
    assert_eq!(director.world().resource::<Stage>().len(), 3);

    destroy(director.world_mut(), cluster).unwrap();
    director.tick().unwrap();

    let stage = director.world().resource::<Stage>();
    assert!(stage.is_empty());
    assert!(matches!(
        motion::get_x(director.world(), a),
        Err(Error::NotStaged(_))
    ));
    assert!(matches!(
        motion::get_x(director.world(), b),
        Err(Error::NotStaged(_))
    ));
}

#[test]
fn snapshot_resolves_member_placements_in_roster_order() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let world = director.world_mut();
    let member = shapes::circle(world, Color::RED, 5.0, 130.0, 200.0).unwrap();
    let cluster = shapes::group(world, &[member], 100.0, 200.0).unwrap();
    motion::turn_right(world, cluster, 90.0).unwrap();

    let snap = snapshot(director.world());
    // member was staged before the group container
    assert_eq!(snap.entities.len(), 2);
    let view = &snap.entities[0];
    assert_eq!(view.id, member.to_bits());
    assert!(approx_eq(view.x, 100.0));
    assert!(approx_eq(view.y, 230.0));
    assert!(approx_eq(view.rotation, 90.0));
    assert!(view.shape.is_some());
    // the container itself has no shape to draw
    assert!(snap.entities[1].shape.is_none());
}
