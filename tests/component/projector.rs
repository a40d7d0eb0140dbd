use wgpu_3dgs_hotspots::{Camera, ScreenProjector, glam::*};

use crate::common::given;

/// At this depth one world unit along X spans 10 pixels with the default camera.
const DEPTH: f32 = 30.0;

fn projector(camera: &Camera) -> ScreenProjector<'_, Camera> {
    ScreenProjector::new(camera, given::VIEWPORT_SIZE)
}

fn center() -> Vec2 {
    given::VIEWPORT_SIZE / 2.0
}

#[test]
fn test_project_should_scale_by_depth() {
    let camera = given::camera();
    let point = projector(&camera).project(Vec3::new(0.5, 0.0, DEPTH));

    assert!(point.is_visible);
    assert!((point.distance_to(center()) - 5.0).abs() < 1e-2);
}

#[test]
fn test_hit_test_should_return_nearest_within_radius() {
    let camera = given::camera();
    let anchors = [
        Vec3::new(0.9, 0.0, DEPTH),
        Vec3::new(0.5, 0.0, DEPTH),
        Vec3::new(1.5, 0.0, DEPTH),
    ];

    let (hit, distance) = projector(&camera)
        .hit_test(center(), &anchors, 10.0)
        .expect("hit");

    assert_eq!(*hit, anchors[1]);
    assert!((distance - 5.0).abs() < 1e-2);
}

#[test]
fn test_hit_test_when_outside_radius_should_not_hit() {
    let camera = given::camera();
    let anchors = [Vec3::new(1.5, 0.0, DEPTH)];

    assert!(
        projector(&camera)
            .hit_test(center(), &anchors, 10.0)
            .is_none()
    );
    assert!(!projector(&camera).is_near_any(center(), &anchors, 10.0));
}

#[test]
fn test_hit_test_when_equal_distance_should_return_first() {
    let camera = given::camera();
    let anchors = [Vec3::new(0.0, 0.0, DEPTH), Vec3::new(0.0, 0.0, DEPTH)];

    let (hit, _) = projector(&camera)
        .hit_test(center(), &anchors, 10.0)
        .expect("hit");

    assert!(std::ptr::eq(hit, &anchors[0]));
}

#[test]
fn test_hit_test_when_behind_camera_should_not_hit() {
    let camera = given::camera();
    let anchors = [Vec3::new(0.0, 0.0, -DEPTH)];

    assert!(
        projector(&camera)
            .hit_test(center(), &anchors, 10.0)
            .is_none()
    );
}

#[test]
fn test_project_when_camera_turned_should_follow_camera() {
    let mut camera = given::camera();
    camera.pos = Vec3::new(10.0, 0.0, 0.0);
    camera.look_at(Vec3::new(10.0, 0.0, 5.0) + Vec3::X * 5.0);

    let point = projector(&camera).project(Vec3::new(15.0, 0.0, 5.0));

    assert!(point.is_visible);
    assert!(point.distance_to(center()) < 1e-2);
    assert!(!projector(&camera).project(Vec3::new(5.0, 0.0, -5.0)).is_visible);
}
