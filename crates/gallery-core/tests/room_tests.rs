mod common;

use common::*;
use gallery_core::*;

fn machine(policy: TransitionPolicy) -> (HotspotRegistry, PanoramaManager, RoomTransitions) {
    (registry(), PanoramaManager::new(), RoomTransitions::new(policy))
}

fn start(
    rooms: &mut RoomTransitions,
    reg: &HotspotRegistry,
    pano: &mut PanoramaManager,
    id: &str,
) -> LoadRequest {
    match rooms.navigate(&room(id), reg, pano).unwrap() {
        NavigateOutcome::Started { request, .. } => request,
        other => panic!("expected a started transition, got {other:?}"),
    }
}

#[test]
fn entering_a_room_populates_markers_from_registry() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");
    assert!(rooms.is_transitioning());
    assert!(rooms.markers().is_empty());
    assert_eq!(req.uri, "/assets/room1.jpg");

    let done = rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    assert!(matches!(done, LoadFinished::Entered { markers: 3, previous: None, .. }));
    assert_eq!(rooms.active_room(), Some(&room("room1")));
    assert!(!rooms.is_transitioning());

    let expected = reg.hotspots(&room("room1")).unwrap();
    assert_eq!(rooms.markers().len(), expected.len());
    for (m, h) in rooms.markers().iter().zip(expected) {
        assert_eq!(&m.hotspot, h);
    }
}

#[test]
fn markers_are_cleared_before_the_next_load_starts() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");
    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    assert_eq!(rooms.markers().len(), 3);

    match rooms.navigate(&room("room2"), &reg, &mut pano).unwrap() {
        NavigateOutcome::Started { cleared, request } => {
            assert_eq!(cleared, 3);
            assert_eq!(request.room, room("room2"));
        }
        other => panic!("unexpected {other:?}"),
    }
    // Nothing from room1 survives while room2 is loading.
    assert!(rooms.markers().is_empty());
    assert_eq!(rooms.active_room(), Some(&room("room1")));
    assert!(matches!(
        rooms.state().phase,
        TransitionPhase::Loading { ref target, .. } if target == &room("room2")
    ));
}

#[test]
fn marker_ids_are_never_reused() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");
    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    let first: Vec<MarkerId> = rooms.markers().iter().map(|m| m.id).collect();

    let req = start(&mut rooms, &reg, &mut pano, "room1");
    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    for m in rooms.markers() {
        assert!(!first.contains(&m.id));
    }
}

#[test]
fn unknown_target_leaves_state_untouched() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");
    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();

    let err = rooms.navigate(&room("attic"), &reg, &mut pano).unwrap_err();
    assert!(matches!(err, GalleryError::InvalidNavigationTarget(ref r) if r.as_str() == "attic"));
    assert_eq!(rooms.markers().len(), 3);
    assert!(!rooms.is_transitioning());
    assert!(!pano.is_loading());
}

#[test]
fn reject_policy_refuses_concurrent_navigation() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Reject);
    let req = start(&mut rooms, &reg, &mut pano, "room1");

    let err = rooms.navigate(&room("room2"), &reg, &mut pano).unwrap_err();
    assert!(matches!(err, GalleryError::ConcurrentTransitionRequest { .. }));
    // The in-flight load is still the one that counts.
    assert_eq!(pano.pending().map(|p| p.ticket), Some(req.ticket));
    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    assert_eq!(rooms.active_room(), Some(&room("room1")));
    assert!(rooms.take_queued().is_none());
}

#[test]
fn queue_policy_keeps_only_the_latest_request() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");

    let first = rooms.navigate(&room("room2"), &reg, &mut pano).unwrap();
    assert_eq!(first, NavigateOutcome::Queued { replaced: None });
    let second = rooms.navigate(&room("room3"), &reg, &mut pano).unwrap();
    assert_eq!(
        second,
        NavigateOutcome::Queued {
            replaced: Some(room("room2"))
        }
    );
    // Not available until the in-flight transition settles.
    assert!(rooms.take_queued().is_none());

    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    assert_eq!(rooms.take_queued(), Some(room("room3")));
    assert!(rooms.take_queued().is_none());
}

#[test]
fn stale_completion_is_ignored() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");

    let stale = LoadTicket(req.ticket.0 + 41);
    let out = rooms.load_finished(stale, Ok(()), &reg, &mut pano).unwrap();
    assert_eq!(out, LoadFinished::Stale);
    assert!(rooms.is_transitioning());
    assert!(rooms.markers().is_empty());

    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    // The same ticket a second time is stale too.
    let again = rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    assert_eq!(again, LoadFinished::Stale);
    assert_eq!(rooms.markers().len(), 3);
}

#[test]
fn failed_load_returns_to_idle_without_markers() {
    let (reg, mut pano, mut rooms) = machine(TransitionPolicy::Queue);
    let req = start(&mut rooms, &reg, &mut pano, "room1");
    rooms.load_finished(req.ticket, Ok(()), &reg, &mut pano).unwrap();
    let surface_before = pano.surface().cloned();

    let req = start(&mut rooms, &reg, &mut pano, "room2");
    let err = rooms
        .load_finished(req.ticket, Err("404".into()), &reg, &mut pano)
        .unwrap_err();
    match err {
        GalleryError::AssetLoadFailure { uri, reason } => {
            assert_eq!(uri, "/assets/room2.jpg");
            assert_eq!(reason, "404");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!rooms.is_transitioning());
    assert!(rooms.markers().is_empty());
    assert_eq!(rooms.active_room(), Some(&room("room1")));
    // Last good texture stays up.
    assert_eq!(pano.surface().cloned(), surface_before);
}

#[test]
fn surface_is_created_once_then_retextured() {
    let reg = registry();
    let mut pano = PanoramaManager::new();
    assert!(pano.surface().is_none());

    let r1 = pano.begin_load(reg.room(&room("room1")).unwrap());
    assert_eq!(pano.complete_load(r1.ticket, Ok(())).unwrap(), LoadOutcome::Created);
    let s = pano.surface().unwrap();
    assert_eq!(s.radius, SPHERE_RADIUS);
    assert_eq!((s.width_segments, s.height_segments), (60, 40));

    let r2 = pano.begin_load(reg.room(&room("room2")).unwrap());
    assert_eq!(pano.complete_load(r2.ticket, Ok(())).unwrap(), LoadOutcome::Replaced);
    let s = pano.surface().unwrap();
    assert_eq!(s.texture_uri, "/assets/room2.jpg");
    assert_eq!(s.texture_ticket, r2.ticket);
}

#[test]
fn superseded_load_cannot_overwrite_newer_one() {
    let reg = registry();
    let mut pano = PanoramaManager::new();
    let old = pano.begin_load(reg.room(&room("room1")).unwrap());
    let new = pano.begin_load(reg.room(&room("room2")).unwrap());
    assert!(new.ticket > old.ticket);

    assert_eq!(pano.complete_load(old.ticket, Ok(())).unwrap(), LoadOutcome::Stale);
    assert!(pano.surface().is_none());
    pano.complete_load(new.ticket, Ok(())).unwrap();
    assert_eq!(pano.surface().unwrap().room, room("room2"));
}

#[test]
fn inverted_sphere_faces_inward() {
    let mesh = inverted_sphere(SPHERE_RADIUS, 60, 40);
    assert_eq!(mesh.positions.len(), 61 * 41);
    assert_eq!(mesh.uvs.len(), mesh.positions.len());
    // Pole rows emit one triangle per quad, the rest two.
    assert_eq!(mesh.indices.len(), (60 * 40 * 2 - 2 * 60) * 3);

    for p in &mesh.positions {
        let r = glam::Vec3::from_array(*p).length();
        assert!((r - SPHERE_RADIUS).abs() < 1e-2);
    }
    // Every triangle's normal points toward the center.
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| glam::Vec3::from_array(mesh.positions[i as usize]));
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) <= 1e-3, "outward triangle at {centroid:?}");
    }
}
