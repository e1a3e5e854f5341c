use crate::constants::{GLOW_RADIUS, NAV_CONE_HEIGHT, NAV_CONE_RADIUS, SPRITE_AUTHORED_SCALE};
use crate::hotspot::Hotspot;
use glam::Vec3;

/// Identity of a live marker. Never reused, so a stale id from a torn-down
/// room can't alias a marker in the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowState {
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct HotspotMarker {
    pub id: MarkerId,
    /// Index of the source hotspot in the room's registry order.
    pub index: usize,
    pub hotspot: Hotspot,
    /// Rendered position; navigation cones bob around `hotspot.position`.
    pub position: Vec3,
    /// Billboard width/height, or cone radius/height for navigation markers.
    pub scale: [f32; 2],
    pub color: [f32; 3],
    pub glow: Option<GlowState>,
}

impl HotspotMarker {
    pub fn new(id: MarkerId, index: usize, hotspot: &Hotspot) -> Self {
        let (scale, glow) = if hotspot.is_navigation() {
            ([NAV_CONE_RADIUS, NAV_CONE_HEIGHT], None)
        } else {
            let glow = hotspot.has_glow().then_some(GlowState {
                opacity: 0.0,
                scale: 1.0,
            });
            ([SPRITE_AUTHORED_SCALE, SPRITE_AUTHORED_SCALE], glow)
        };
        Self {
            id,
            index,
            hotspot: hotspot.clone(),
            position: hotspot.position,
            scale,
            color: [1.0, 1.0, 1.0],
            glow,
        }
    }

    pub fn pick_radius(&self) -> f32 {
        if self.hotspot.is_navigation() {
            // Bounding sphere of the cone around its center.
            (self.scale[0] * self.scale[0] + 0.25 * self.scale[1] * self.scale[1]).sqrt()
        } else {
            0.5 * self.scale[0].max(self.scale[1])
        }
    }

    pub fn glow_radius(&self) -> Option<f32> {
        self.glow.map(|g| GLOW_RADIUS * g.scale)
    }
}
