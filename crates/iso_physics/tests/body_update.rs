//! Integration tests for the two-phase body update protocol
//!
//! Drives bodies through whole frames against a concrete entity state and
//! world integrator, the way an owning update loop would.

use approx::assert_relative_eq;
use iso_physics::prelude::*;

/// Entity whose anchor puts the physics box exactly at its iso position
fn centered_entity(x: f32, y: f32, z: f32) -> EntityState {
    let mut entity = EntityState::new(x, y, z, 32.0, 64.0);
    entity.anchor_x = 0.5;
    entity.anchor_y = 1.0;
    entity
}

/// World with no gravity and a `[0, 100]` box on every axis
fn boxed_world() -> IsoWorld {
    IsoWorld::new(
        Vec3::zeros(),
        BoundingCube::new(0.0, 0.0, 0.0, 100.0, 100.0, 100.0),
    )
}

fn assert_center_invariant(body: &Body) {
    assert_eq!(
        body.center,
        Point3::new(
            body.position.x + body.half_width_x,
            body.position.y + body.half_width_y,
            body.position.z + body.half_height,
        )
    );
}

#[test]
fn center_invariant_holds_at_every_observation_point() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(10.0, -5.0, 3.0);

    assert_center_invariant(&body);

    body.pre_update(&mut entity, &world, 16.0);
    assert_center_invariant(&body);

    body.post_update(&mut entity);
    assert_center_invariant(&body);

    body.set_size(7.0, 11.0, 13.0);
    assert_center_invariant(&body);

    body.reset(&mut entity, 20.0, 20.0, 20.0);
    assert_center_invariant(&body);
}

#[test]
fn phase_transitions_once_per_frame() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);

    assert_eq!(body.phase(), UpdatePhase::Idle);
    body.pre_update(&mut entity, &world, 16.0);
    assert_eq!(body.phase(), UpdatePhase::Pre);
    body.post_update(&mut entity);
    assert_eq!(body.phase(), UpdatePhase::Post);

    // next frame re-enters the pre phase
    body.pre_update(&mut entity, &world, 16.0);
    assert_eq!(body.phase(), UpdatePhase::Pre);
}

#[test]
fn repeated_post_update_is_a_pure_noop() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(40.0, 0.0, 0.0);

    body.pre_update(&mut entity, &world, 16.0);
    body.post_update(&mut entity);

    let body_after_one = body.clone();
    let entity_after_one = entity.clone();

    body.post_update(&mut entity);

    assert_eq!(body, body_after_one);
    assert_eq!(entity, entity_after_one);
}

#[test]
fn disabled_body_is_completely_skipped() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(40.0, 40.0, 40.0);
    body.touching = DirectionFlags::DOWN;
    body.enable = false;

    let body_before = body.clone();
    let entity_before = entity.clone();

    body.pre_update(&mut entity, &world, 16.0);
    body.post_update(&mut entity);

    assert_eq!(body, body_before);
    assert_eq!(entity, entity_before);
}

#[test]
fn world_bounds_clamp_bounce_and_block() {
    let entity = centered_entity(10.0, 10.0, 10.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.bounce = Vec3::new(0.5, 0.5, 0.5);
    body.position = Point3::new(-5.0, 10.0, 10.0);
    body.velocity.x = -20.0;

    body.check_world_bounds(&world);

    assert_eq!(body.position.x, 0.0);
    assert_eq!(body.velocity.x, 10.0);
    assert!(body.blocked.contains(DirectionFlags::BACK_X));
    assert!(body.on_wall());
}

#[test]
fn world_bounds_resolve_multiple_axes_in_one_call() {
    let entity = centered_entity(10.0, 10.0, 10.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.bounce = Vec3::new(1.0, 0.0, 1.0);
    body.position = Point3::new(-2.0, 10.0, -3.0);
    body.velocity = Vec3::new(-8.0, 0.0, -6.0);

    body.check_world_bounds(&world);

    assert_eq!(body.position.x, 0.0);
    assert_eq!(body.position.z, 0.0);
    assert_eq!(body.velocity.x, 8.0);
    assert_eq!(body.velocity.z, 6.0);
    assert!(body.blocked.contains(DirectionFlags::BACK_X));
    assert!(body.blocked.contains(DirectionFlags::DOWN));
    assert!(body.on_floor());
}

#[test]
fn world_bounds_respect_disabled_directions() {
    let entity = centered_entity(10.0, 10.0, 10.0);
    let mut world = boxed_world();
    world.check_collision.remove(DirectionFlags::BACK_X);
    let mut body = Body::new(&entity);
    body.position = Point3::new(-5.0, 10.0, 10.0);
    body.velocity.x = -20.0;

    body.check_world_bounds(&world);

    assert_eq!(body.position.x, -5.0);
    assert_eq!(body.velocity.x, -20.0);
    assert!(body.blocked.none());
}

#[test]
fn upper_bound_uses_the_body_extent() {
    let entity = centered_entity(10.0, 10.0, 10.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.set_size(16.0, 16.0, 48.0);
    body.position = Point3::new(95.0, 10.0, 10.0);
    body.velocity.x = 30.0;
    body.bounce.x = 1.0;

    body.check_world_bounds(&world);

    // clamped so the front face sits on the bound
    assert_eq!(body.position.x, 100.0 - body.width_x);
    assert_eq!(body.velocity.x, -30.0);
    assert!(body.blocked.contains(DirectionFlags::FRONT_X));
}

#[test]
fn full_frame_floor_bounce() {
    let mut entity = centered_entity(50.0, 50.0, 0.5);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.collide_world_bounds = true;
    body.bounce.z = 1.0;
    body.velocity.z = -20.0;

    // dt of 100 ms integrates a -2.0 step, crossing the floor
    body.pre_update(&mut entity, &world, 100.0);

    assert_eq!(body.position.z, 0.0);
    assert_eq!(body.velocity.z, 20.0);
    assert!(body.on_floor());
}

#[test]
fn delta_clamp_limits_what_reaches_the_entity() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.delta_max.x = 5.0;
    body.velocity.x = -120.0;

    // raw frame delta is -12; only -5 may reach the entity
    body.pre_update(&mut entity, &world, 100.0);
    assert_relative_eq!(body.delta_x(), -12.0);

    body.post_update(&mut entity);
    assert_relative_eq!(entity.iso_x, 45.0);
    assert_relative_eq!(entity.iso_y, 50.0);
}

#[test]
fn facing_prefers_the_dominant_axis() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(30.0, 10.0, 0.0);

    body.pre_update(&mut entity, &world, 100.0);
    body.post_update(&mut entity);

    assert_relative_eq!(body.delta_x(), 0.0); // committed as the new baseline
    assert_eq!(body.facing, Facing::ForwardX);
}

#[test]
fn facing_sign_selects_direction() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(0.0, -10.0, 0.0);

    body.pre_update(&mut entity, &world, 100.0);
    body.post_update(&mut entity);

    assert_eq!(body.facing, Facing::BackwardY);
}

#[test]
fn zero_motion_keeps_the_previous_facing() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(0.0, 0.0, 15.0);

    body.pre_update(&mut entity, &world, 100.0);
    body.post_update(&mut entity);
    assert_eq!(body.facing, Facing::Up);

    entity.fresh = false;
    body.velocity = Vec3::zeros();
    body.pre_update(&mut entity, &world, 100.0);
    body.post_update(&mut entity);
    assert_eq!(body.facing, Facing::Up);
}

#[test]
fn fresh_entity_suppresses_the_teleport_delta() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);

    // teleport the entity far away; the fresh flag marks it just placed
    entity.iso_x = 500.0;
    entity.fresh = true;
    body.velocity.x = 50.0;

    body.pre_update(&mut entity, &world, 100.0);

    // only the integration step registers, not the 450-unit jump
    assert_relative_eq!(body.delta_x(), 5.0);
}

#[test]
fn fresh_entity_without_motion_has_prev_equal_position() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.moves = false;

    entity.iso_x = 500.0;
    entity.fresh = true;
    body.pre_update(&mut entity, &world, 100.0);

    assert_eq!(body.prev, body.position);
}

#[test]
fn pre_update_snapshots_and_clears_contact_state() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);

    // what an external collision pass would have left behind
    body.touching = DirectionFlags::DOWN | DirectionFlags::FRONT_X;
    body.blocked = DirectionFlags::DOWN;
    body.embedded = true;

    body.pre_update(&mut entity, &world, 16.0);

    assert_eq!(
        body.was_touching,
        DirectionFlags::DOWN | DirectionFlags::FRONT_X
    );
    assert!(body.touching.none());
    assert!(body.blocked.none());
    assert!(!body.embedded);
}

#[test]
fn speed_and_travel_angle_follow_velocity() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(30.0, 40.0, 0.0);

    body.pre_update(&mut entity, &world, 100.0);

    assert_relative_eq!(body.speed, 50.0);
    assert_relative_eq!(body.angle, 40.0_f32.atan2(30.0));
}

#[test]
fn rotation_delta_is_written_back_to_the_entity() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.angular_velocity = 90.0;

    body.pre_update(&mut entity, &world, 1000.0);
    assert_relative_eq!(body.delta_r(), 90.0);

    body.post_update(&mut entity);
    assert_relative_eq!(entity.angle, 90.0);
}

#[test]
fn rotation_write_back_respects_allow_rotation() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.allow_rotation = false;
    body.angular_velocity = 90.0;

    body.pre_update(&mut entity, &world, 1000.0);
    body.post_update(&mut entity);

    assert_relative_eq!(entity.angle, 0.0);
}

#[test]
fn out_of_bounds_entity_receives_a_destruction_request() {
    let mut entity = centered_entity(1000.0, 1000.0, 1000.0);
    entity.out_of_bounds_kill = true;
    let world = boxed_world();
    let mut body = Body::new(&entity);

    body.pre_update(&mut entity, &world, 16.0);

    assert!(entity.destroy_requested);
}

#[test]
fn in_bounds_entity_is_left_alone() {
    let mut entity = centered_entity(50.0, 50.0, 10.0);
    entity.out_of_bounds_kill = true;
    let world = boxed_world();
    let mut body = Body::new(&entity);

    body.pre_update(&mut entity, &world, 16.0);

    assert!(!entity.destroy_requested);
}

#[test]
fn reset_rebases_all_derived_state() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.velocity = Vec3::new(40.0, 0.0, 0.0);
    body.pre_update(&mut entity, &world, 100.0);
    body.post_update(&mut entity);

    entity.angle = 30.0;
    body.reset(&mut entity, 10.0, 20.0, 30.0);

    assert_eq!(body.velocity, Vec3::zeros());
    assert_eq!(body.position, Point3::new(10.0, 20.0, 30.0));
    assert_eq!(body.prev, body.position);
    assert_relative_eq!(body.rotation, 30.0);
    assert_relative_eq!(body.delta_r(), 0.0);
    assert!(entity.position_dirty);
}

#[test]
fn scale_change_suppresses_the_resize_delta() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    // an off-center anchor makes the box position depend on the extents
    entity.anchor_x = 0.0;
    entity.fresh = false;
    let world = boxed_world();
    let mut body = Body::new(&entity);

    body.pre_update(&mut entity, &world, 16.0);
    body.post_update(&mut entity);

    // rescale the entity between frames
    entity.scale_x = 2.0;
    entity.width = 64.0;
    entity.height = 128.0;

    body.pre_update(&mut entity, &world, 16.0);

    // the resize repositioned the box, but no delta may leak from it
    assert_relative_eq!(body.delta_x(), 0.0);
    assert_relative_eq!(body.delta_y(), 0.0);
    assert_eq!(body.width_x, 32.0);
}

#[test]
fn immobile_body_ignores_integration() {
    let mut entity = centered_entity(50.0, 50.0, 50.0);
    let world = boxed_world();
    let mut body = Body::new(&entity);
    body.moves = false;
    body.velocity = Vec3::new(100.0, 100.0, 100.0);

    body.pre_update(&mut entity, &world, 100.0);
    body.post_update(&mut entity);

    assert_eq!(body.position, Point3::new(50.0, 50.0, 50.0));
    assert_relative_eq!(entity.iso_x, 50.0);
}
