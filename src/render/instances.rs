// Per-instance data for the marker billboards. No GPU types in here.

use crate::constants::{ARTIFACT_TINT, GLOW_TINT, SPRITE_ALPHA, VIDEO_TINT};
use gallery_core::{HotspotKind, HotspotMarker};
use glam::Vec3;

pub const KIND_NAVIGATION: f32 = 0.0;
pub const KIND_SPRITE: f32 = 1.0;
pub const KIND_GLOW: f32 = 2.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    /// xyz world center, w shader kind
    pub center_kind: [f32; 4],
    /// xy billboard size, zw unused
    pub size: [f32; 4],
    pub color: [f32; 4],
}

impl MarkerInstance {
    fn new(center: Vec3, kind: f32, size: [f32; 2], rgb: [f32; 3], alpha: f32) -> Self {
        Self {
            center_kind: [center.x, center.y, center.z, kind],
            size: [size[0], size[1], 0.0, 0.0],
            color: [rgb[0], rgb[1], rgb[2], alpha],
        }
    }
}

/// Fill `out` back to front as seen from `eye`. Glows go right under their
/// sprite.
pub fn build_instances(markers: &[HotspotMarker], eye: Vec3, out: &mut Vec<MarkerInstance>) {
    out.clear();
    let mut order: Vec<&HotspotMarker> = markers.iter().collect();
    order.sort_by(|a, b| {
        eye.distance_squared(b.position)
            .total_cmp(&eye.distance_squared(a.position))
    });
    for m in order {
        let tint = match &m.hotspot.kind {
            HotspotKind::Navigation { .. } => {
                // Cone radius/height become a triangle of base 2r.
                out.push(MarkerInstance::new(
                    m.position,
                    KIND_NAVIGATION,
                    [m.scale[0] * 2.0, m.scale[1]],
                    m.color,
                    1.0,
                ));
                continue;
            }
            HotspotKind::Artifact(_) => ARTIFACT_TINT,
            HotspotKind::Video { .. } => VIDEO_TINT,
        };
        if let (Some(glow), Some(radius)) = (m.glow, m.glow_radius()) {
            if glow.opacity > 0.0 {
                out.push(MarkerInstance::new(
                    m.position,
                    KIND_GLOW,
                    [radius * 2.0, radius * 2.0],
                    GLOW_TINT,
                    glow.opacity,
                ));
            }
        }
        out.push(MarkerInstance::new(
            m.position,
            KIND_SPRITE,
            m.scale,
            tint,
            SPRITE_ALPHA,
        ));
    }
}
