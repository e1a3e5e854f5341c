use gallery_core::*;
use glam::{Vec2, Vec3};

fn camera() -> Camera {
    Camera::from_config(&CameraConfig::default(), 1.0)
}

fn artifact_at(id: u64, index: usize, position: Vec3) -> HotspotMarker {
    let spot = Hotspot {
        position,
        title: None,
        kind: HotspotKind::Artifact(ArtifactInfo {
            title: format!("artifact {index}"),
            image: "/a.jpg".into(),
            description: String::new(),
            music_track: None,
            audio_description_track: None,
        }),
    };
    HotspotMarker::new(MarkerId(id), index, &spot)
}

#[test]
fn ray_sphere_hits_in_front_only() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, -Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_from_inside_reports_exit() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 4.0).unwrap();
    assert!((t - 4.0).abs() < 1e-5);
}

#[test]
fn center_of_screen_looks_down_negative_z() {
    let ray = Ray::from_camera(&camera(), Vec2::ZERO);
    assert!(ray.direction.abs_diff_eq(-Vec3::Z, 1e-4));
    assert!(ray.at(10.0).z < ray.origin.z);
}

#[test]
fn nearest_marker_wins() {
    let far = artifact_at(1, 0, Vec3::new(0.0, 0.0, -300.0));
    let near = artifact_at(2, 1, Vec3::new(0.0, 0.0, -100.0));
    let ray = Ray::from_camera(&camera(), Vec2::ZERO);
    let hits = pick_all(&ray, &[far.clone(), near.clone()]);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].marker, near.id);
    assert_eq!(pick(&ray, &[far, near]).map(|h| h.slot), Some(1));
}

#[test]
fn equal_distance_ties_break_by_registry_order() {
    let a = artifact_at(7, 0, Vec3::new(0.0, 0.0, -200.0));
    let b = artifact_at(3, 1, Vec3::new(0.0, 0.0, -200.0));
    let ray = Ray::from_camera(&camera(), Vec2::ZERO);
    let hit = pick(&ray, &[a, b]).unwrap();
    assert_eq!(hit.marker, MarkerId(7));
    assert_eq!(hit.slot, 0);
}

#[test]
fn no_markers_no_hit() {
    let ray = Ray::from_camera(&camera(), Vec2::ZERO);
    assert!(pick(&ray, &[]).is_none());
}

#[test]
fn hover_transitions() {
    let cam = camera();
    let markers = [artifact_at(1, 0, Vec3::new(0.0, 0.0, -100.0))];
    let mut picking = PickingController::new();

    let on = Vec2::ZERO;
    let off = Vec2::new(0.9, 0.9);
    assert_eq!(
        picking.pointer_moved(on, Vec2::new(400.0, 400.0), &cam, &markers),
        HoverChange::Entered(MarkerId(1))
    );
    assert_eq!(
        picking.pointer_moved(on, Vec2::new(400.0, 400.0), &cam, &markers),
        HoverChange::Unchanged
    );
    assert!(picking.click(&cam, &markers).is_some());
    assert_eq!(
        picking.pointer_moved(off, Vec2::new(760.0, 40.0), &cam, &markers),
        HoverChange::Exited(MarkerId(1))
    );
    assert!(picking.click(&cam, &markers).is_none());
    assert_eq!(picking.state().pointer_px, Vec2::new(760.0, 40.0));
}

#[test]
fn click_before_any_pointer_move_misses() {
    let markers = [artifact_at(1, 0, Vec3::new(0.0, 0.0, -100.0))];
    assert!(PickingController::new().click(&camera(), &markers).is_none());
}

#[test]
fn ndc_maps_corners() {
    let vp = Vec2::new(800.0, 600.0);
    assert_eq!(ndc_from_px(Vec2::ZERO, vp), Vec2::new(-1.0, 1.0));
    assert_eq!(ndc_from_px(vp, vp), Vec2::new(1.0, -1.0));
    assert_eq!(ndc_from_px(vp * 0.5, vp), Vec2::ZERO);
}

#[test]
fn navigation_pick_radius_covers_the_cone() {
    let spot = Hotspot {
        position: Vec3::ZERO,
        title: None,
        kind: HotspotKind::Navigation {
            target_room: RoomId::new("b"),
        },
    };
    let m = HotspotMarker::new(MarkerId(1), 0, &spot);
    assert_eq!(m.scale, [NAV_CONE_RADIUS, NAV_CONE_HEIGHT]);
    assert!(m.pick_radius() >= NAV_CONE_HEIGHT * 0.5);
    assert!(m.glow.is_none());
}

#[test]
fn orbit_drag_turns_and_damps() {
    let config = CameraConfig::default();
    let mut orbit = OrbitController::new(&config);
    let mut cam = Camera::from_config(&config, 1.0);
    orbit.apply(&mut cam);
    assert!(cam.eye.abs_diff_eq(Vec3::new(0.0, 0.0, config.eye_distance), 1e-5));

    orbit.begin_drag(Vec2::new(400.0, 400.0));
    orbit.drag_to(Vec2::new(300.0, 400.0), 800.0);
    assert!((orbit.drag_travel() - 100.0).abs() < 1e-4);
    assert!((orbit.end_drag() - 100.0).abs() < 1e-4);
    assert!(!orbit.is_dragging());

    // Damped: one frame applies only part of the pending turn.
    orbit.update(1.0 / 60.0);
    let first = orbit.theta();
    assert!(first > 0.0);
    for _ in 0..600 {
        orbit.update(1.0 / 60.0);
    }
    let settled = orbit.theta();
    assert!(settled > first);
    // Dragging left by an eighth of the height turns by TAU / 8.
    assert!((settled - std::f32::consts::TAU / 8.0).abs() < 1e-3);
}

#[test]
fn orbit_never_flips_over_the_pole() {
    let config = CameraConfig::default();
    let mut orbit = OrbitController::new(&config);
    orbit.begin_drag(Vec2::ZERO);
    orbit.drag_to(Vec2::new(0.0, 5000.0), 100.0);
    orbit.end_drag();
    for _ in 0..600 {
        orbit.update(1.0 / 60.0);
    }
    assert!(orbit.phi() > 0.0);
    assert!(orbit.phi() < std::f32::consts::PI);
}
