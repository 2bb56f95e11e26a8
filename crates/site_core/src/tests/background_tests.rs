use super::*;

use crate::host::HeadlessHost;

fn seeded_settings(count: usize) -> BackgroundSettings {
    BackgroundSettings {
        particle_count: count,
        seed: Some(42),
        ..BackgroundSettings::default()
    }
}

fn host() -> HeadlessHost {
    HeadlessHost::new(Viewport::new(1280.0, 720.0).with_pixel_ratio(2.0))
}

#[test]
fn generated_points_stay_inside_the_cube() {
    let mut rng = StdRng::seed_from_u64(7);
    let field = ParticleField::generate(5000, 1000.0, &mut rng);
    assert_eq!(field.len(), 5000);
    assert!(field
        .positions()
        .iter()
        .flatten()
        .all(|c| (-500.0..=500.0).contains(c)));
}

#[test]
fn seeded_fields_are_reproducible() {
    let a = ParticleField::generate(32, 1000.0, &mut StdRng::seed_from_u64(1));
    let b = ParticleField::generate(32, 1000.0, &mut StdRng::seed_from_u64(1));
    let c = ParticleField::generate(32, 1000.0, &mut StdRng::seed_from_u64(2));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn mount_attaches_exactly_one_surface() {
    let mut host = host();
    assert_eq!(host.attached_surfaces(), 0);

    let mut animator = BackgroundAnimator::mount(&mut host, &BackgroundSettings::default())
        .expect("mount");
    assert_eq!(host.attached_surfaces(), 1);
    assert_eq!(host.resize_listeners(), 1);
    assert_eq!(animator.particle_count(), 5000);
    assert_eq!(animator.camera().distance, 50.0);
    assert!((animator.camera().aspect - 1280.0 / 720.0).abs() < 1e-6);

    animator.unmount(&mut host);
}

#[test]
fn unmount_releases_surface_listener_and_frame_request() {
    let mut host = host();
    let mut animator =
        BackgroundAnimator::mount(&mut host, &seeded_settings(100)).expect("mount");
    assert_eq!(host.pending_frame_requests(), 1);

    animator.unmount(&mut host);
    assert!(!animator.is_mounted());
    assert_eq!(host.attached_surfaces(), 0);
    assert_eq!(host.resize_listeners(), 0);
    assert_eq!(host.pending_frame_requests(), 0);

    // Nothing keeps running after teardown.
    host.resize(Viewport::new(300.0, 300.0));
    host.refresh();
    assert!(!animator.pump(&mut host));
    assert_eq!(host.presented_frames(), 0);
    assert!((animator.camera().aspect - 1280.0 / 720.0).abs() < 1e-6);

    // Second unmount is a no-op.
    animator.unmount(&mut host);
}

#[test]
fn each_refresh_advances_time_and_rotation() {
    let mut host = host();
    let mut animator =
        BackgroundAnimator::mount(&mut host, &seeded_settings(200)).expect("mount");

    assert!(!animator.pump(&mut host), "no refresh fired yet");
    for _ in 0..3 {
        host.refresh();
        assert!(animator.pump(&mut host));
    }

    assert_eq!(animator.frames_rendered(), 3);
    assert_eq!(host.presented_frames(), 3);
    let time = animator.time();
    assert!((time - 0.0015).abs() < 1e-7);
    let (rx, ry) = animator.rotation();
    assert!((rx - time * 0.1).abs() < 1e-9);
    assert!((ry - time * 0.2).abs() < 1e-9);
    assert_eq!(host.pending_frame_requests(), 1, "next frame already requested");

    animator.unmount(&mut host);
}

#[test]
fn resize_updates_aspect_without_touching_the_field() {
    let mut host = host();
    let mut animator =
        BackgroundAnimator::mount(&mut host, &seeded_settings(500)).expect("mount");
    let field_before = animator.field().clone();
    let fov_before = animator.camera().fov_degrees;

    host.resize(Viewport::new(1000.0, 400.0));
    animator.pump(&mut host);

    assert!((animator.camera().aspect - 2.5).abs() < 1e-6);
    assert_eq!(animator.camera().fov_degrees, fov_before);
    assert_eq!(animator.particle_count(), 500);
    assert_eq!(animator.field(), &field_before);
    assert_eq!(animator.viewport(), Viewport::new(1000.0, 400.0));

    animator.unmount(&mut host);
}

#[test]
fn surface_failure_is_reported() {
    let mut host = HeadlessHost::without_graphics(Viewport::new(640.0, 480.0));
    let err = BackgroundAnimator::mount(&mut host, &BackgroundSettings::default())
        .err()
        .expect("mount must fail");
    assert_eq!(err.code(), shared::ErrorCode::SurfaceUnavailable);
    assert_eq!(host.resize_listeners(), 0);
    assert_eq!(host.pending_frame_requests(), 0);
}

#[test]
fn camera_culls_points_behind_or_outside_the_frustum() {
    let camera = Camera {
        fov_degrees: 90.0,
        aspect: 1.0,
        near: 0.1,
        far: 1000.0,
        distance: 50.0,
    };

    let (ndc, depth) = camera.project([0.0, 0.0, 0.0]).expect("origin is visible");
    assert_eq!(ndc, [0.0, 0.0]);
    assert_eq!(depth, 50.0);

    // Behind the camera.
    assert!(camera.project([0.0, 0.0, 60.0]).is_none());
    // Beyond the far plane.
    assert!(camera.project([0.0, 0.0, -1000.0]).is_none());
    // Outside the 90 degree cone.
    assert!(camera.project([60.0, 0.0, 0.0]).is_none());
}

#[test]
fn rendered_points_land_on_the_surface() {
    let mut host = host();
    let mut animator =
        BackgroundAnimator::mount(&mut host, &seeded_settings(2000)).expect("mount");
    host.refresh();
    assert!(animator.pump(&mut host));

    let frame = host.last_frame().expect("presented frame");
    assert!(!frame.points.is_empty());
    assert!(frame.points.len() <= 2000);
    assert_eq!(frame.color, [0x9c, 0xa3, 0xaf]);
    for point in &frame.points {
        assert!((0.0..=1280.0).contains(&point.x));
        assert!((0.0..=720.0).contains(&point.y));
        assert!(point.radius >= 0.5);
    }

    animator.unmount(&mut host);
}

#[test]
fn rotation_about_y_swaps_x_and_z() {
    let rotated = rotate([1.0, 0.0, 0.0], 0.0, std::f32::consts::FRAC_PI_2);
    assert!((rotated[0]).abs() < 1e-6);
    assert!((rotated[2] + 1.0).abs() < 1e-6);
}

#[test]
fn time_keeps_advancing_after_days_of_frames() {
    let mut host = host();
    let mut animator =
        BackgroundAnimator::mount(&mut host, &seeded_settings(2000)).expect("mount");

    // Roughly 116 hours of frames at 60 Hz.
    animator.time = 16384.0;
    animator.advance();
    let before = animator.time();
    let (rx_before, ry_before) = animator.rotation();
    for _ in 0..10 {
        animator.advance();
    }

    assert!((animator.time() - before - 0.005).abs() < 1e-9);
    let (rx, ry) = animator.rotation();
    assert!(rx > rx_before);
    assert!(ry > ry_before);

    let before_frame = animator.render();
    assert!(!before_frame.points.is_empty());
    animator.advance();
    assert_ne!(animator.render().points, before_frame.points);

    animator.unmount(&mut host);
}
