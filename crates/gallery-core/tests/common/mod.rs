// Shared fixtures for the engine integration tests.

#![allow(dead_code)]

use gallery_core::*;
use glam::{Vec2, Vec3};

pub const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);

/// Three rooms. Everything in room1 sits in front of the default camera
/// (looking down -Z) so it can be clicked without orbiting.
pub const GALLERY: &str = r#"{
  "initialRoom": "room1",
  "rooms": [
    {
      "id": "room1",
      "title": "Entrance Hall",
      "panorama": "/assets/room1.jpg",
      "ambientTrack": "/assets/background1.mp3",
      "hotspots": [
        { "type": "navigation", "position": { "x": 0, "y": 0, "z": -300 }, "targetRoom": "room2" },
        { "type": "artifact", "position": { "x": 100, "y": 0, "z": -300 },
          "title": "Bronze Vase", "image": "/assets/vase.jpg",
          "description": "Cast bronze, c. 1200.",
          "musicTrack": "/assets/vase.mp3",
          "audioDescription": "/assets/vase-described.mp3" },
        { "type": "video", "position": { "x": -100, "y": 0, "z": -300 }, "video": "/assets/intro.mp4" }
      ]
    },
    {
      "id": "room2",
      "panorama": "/assets/room2.jpg",
      "ambientTrack": "/assets/background2.mp3",
      "hotspots": [
        { "type": "navigation", "position": { "x": 0, "y": 0, "z": -300 }, "action": "room1", "title": "Back" },
        { "type": "artifact", "position": { "x": 0, "y": 0, "z": 300 },
          "title": "Tapestry", "image": "/assets/tapestry.jpg" }
      ]
    },
    {
      "id": "room3",
      "panorama": "/assets/room3.jpg",
      "ambientTrack": "/assets/background3.mp3"
    }
  ]
}"#;

pub fn room(id: &str) -> RoomId {
    RoomId::new(id)
}

pub fn registry() -> HotspotRegistry {
    let (registry, _) = GalleryManifest::from_json(GALLERY)
        .and_then(GalleryManifest::into_registry)
        .expect("fixture manifest is valid");
    registry
}

pub fn engine() -> GalleryEngine {
    GalleryEngine::from_manifest_json(GALLERY, VIEWPORT.x / VIEWPORT.y).expect("fixture engine")
}

/// Engine that has entered the initial room at `t = 0`.
pub fn started_engine() -> GalleryEngine {
    let mut e = engine();
    e.start();
    e.tick(0.0);
    complete_loads(&mut e, 0.0);
    e
}

/// Report every outstanding panorama request as loaded, then tick.
pub fn complete_loads(e: &mut GalleryEngine, now_sec: f64) -> usize {
    let requests = e.take_load_requests();
    let n = requests.len();
    for r in requests {
        e.push(EngineEvent::PanoramaLoaded(r.ticket));
    }
    e.tick(now_sec);
    n
}

/// Canvas pixel at which `world` appears for the engine's current camera.
pub fn px_toward(camera: &Camera, world: Vec3) -> Vec2 {
    let clip = camera.view_projection() * world.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * VIEWPORT.x,
        (1.0 - ndc.y) * 0.5 * VIEWPORT.y,
    )
}

/// Press and release on `px` without moving, then tick.
pub fn click_at(e: &mut GalleryEngine, px: Vec2, now_sec: f64) {
    e.push(EngineEvent::PointerMoved {
        px,
        viewport: VIEWPORT,
    });
    e.push(EngineEvent::PointerDown { px });
    e.push(EngineEvent::PointerUp { px });
    e.tick(now_sec);
}

/// Click the marker built from hotspot `index` of the active room.
pub fn click_hotspot(e: &mut GalleryEngine, index: usize, now_sec: f64) {
    let target = e
        .markers()
        .iter()
        .find(|m| m.index == index)
        .map(|m| m.position)
        .expect("marker present");
    let px = px_toward(e.camera(), target);
    click_at(e, px, now_sec);
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
