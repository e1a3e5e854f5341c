use gallery_core::*;
use glam::Vec3;

fn markers() -> Vec<HotspotMarker> {
    let video = Hotspot {
        position: Vec3::new(0.0, 0.0, -200.0),
        title: None,
        kind: HotspotKind::Video {
            source: "/v.mp4".into(),
        },
    };
    let nav = Hotspot {
        position: Vec3::new(50.0, 0.0, -200.0),
        title: None,
        kind: HotspotKind::Navigation {
            target_room: RoomId::new("next"),
        },
    };
    vec![
        HotspotMarker::new(MarkerId(1), 0, &video),
        HotspotMarker::new(MarkerId(2), 1, &nav),
    ]
}

fn opacity(m: &HotspotMarker) -> f32 {
    m.glow.map(|g| g.opacity).unwrap_or(-1.0)
}

#[test]
fn glow_stays_within_bounds_while_hovered() {
    let anim = HoverAnimator::new(AnimationConfig::default());
    let mut ms = markers();
    for frame in 0..240 {
        let t = frame as f64 / 60.0;
        anim.frame(&mut ms, Some(MarkerId(1)), Vec3::ZERO, t);
        let o = opacity(&ms[0]);
        assert!((0.0..=GLOW_MAX_OPACITY).contains(&o), "opacity {o} at {t}");
    }
}

#[test]
fn glow_decays_to_zero_after_hover_ends() {
    let anim = HoverAnimator::new(AnimationConfig::default());
    let mut ms = markers();
    anim.frame(&mut ms, Some(MarkerId(1)), Vec3::ZERO, 0.0);
    let mut prev = opacity(&ms[0]);
    assert!(prev > 0.0);

    let frames = (GLOW_MAX_OPACITY / GLOW_DECAY_PER_FRAME).ceil() as usize + 1;
    for f in 1..=frames {
        anim.frame(&mut ms, None, Vec3::ZERO, f as f64 / 60.0);
        let o = opacity(&ms[0]);
        assert!(o <= prev);
        assert!(o >= 0.0);
        prev = o;
    }
    assert_eq!(prev, 0.0);
    anim.frame(&mut ms, None, Vec3::ZERO, 1.0);
    assert_eq!(opacity(&ms[0]), 0.0);
}

#[test]
fn navigation_markers_have_no_glow() {
    let anim = HoverAnimator::new(AnimationConfig::default());
    let mut ms = markers();
    anim.frame(&mut ms, Some(MarkerId(2)), Vec3::ZERO, 0.5);
    assert!(ms[1].glow.is_none());
    assert_eq!(opacity(&ms[0]), 0.0);
}

#[test]
fn sprite_size_tracks_distance() {
    let anim = HoverAnimator::new(AnimationConfig::default());
    let mut ms = markers();
    anim.layout(&mut ms, Vec3::ZERO, 0.0);
    // At t = 0 the pulse term is zero.
    let expected = SPRITE_SIZE * 200.0 * SPRITE_DISTANCE_SCALE;
    assert!((ms[0].scale[0] - expected).abs() < 1e-4);
    assert!((ms[0].scale[1] - expected).abs() < 1e-4);
    let glow = ms[0].glow.unwrap();
    assert!((glow.scale - 200.0 * GLOW_DISTANCE_SCALE).abs() < 1e-4);
}

#[test]
fn navigation_cone_bobs_and_shifts_colour() {
    let anim = HoverAnimator::new(AnimationConfig::default());
    let mut ms = markers();
    anim.layout(&mut ms, Vec3::ZERO, 0.0);
    assert_eq!(ms[1].position, ms[1].hotspot.position);
    let green = ms[1].color;

    let quarter = std::f64::consts::FRAC_PI_2 / NAV_BOB_RATE as f64;
    anim.layout(&mut ms, Vec3::ZERO, quarter);
    assert!((ms[1].position.y - NAV_BOB_AMPLITUDE).abs() < 1e-3);
    assert_ne!(ms[1].color, green);
}

#[test]
fn hsl_primaries() {
    let close = |a: [f32; 3], b: [f32; 3]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4);
    assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
    assert!(close(hsl_to_rgb(0.5, 0.0, 0.25), [0.25, 0.25, 0.25]));
}
