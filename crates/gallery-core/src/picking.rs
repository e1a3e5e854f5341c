use crate::camera::Camera;
use crate::marker::{HotspotMarker, MarkerId};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn from_camera(camera: &Camera, ndc: Vec2) -> Self {
        Self {
            origin: camera.eye,
            direction: camera.ray_direction(ndc),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along a unit-direction ray to the first sphere hit in front of
/// the origin. A ray starting inside the sphere reports the exit point.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t = -b - sq;
    if t >= 0.0 {
        return Some(t);
    }
    let t_far = -b + sq;
    (t_far >= 0.0).then_some(t_far)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub marker: MarkerId,
    /// Position in the active marker list, which follows registry order.
    pub slot: usize,
    pub distance: f32,
}

/// All hits sorted nearest first; equal distances keep registry order.
pub fn pick_all(ray: &Ray, markers: &[HotspotMarker]) -> SmallVec<[PickHit; 8]> {
    let mut hits: SmallVec<[PickHit; 8]> = markers
        .iter()
        .enumerate()
        .filter_map(|(slot, m)| {
            ray_sphere(ray.origin, ray.direction, m.position, m.pick_radius()).map(|t| PickHit {
                marker: m.id,
                slot,
                distance: t,
            })
        })
        .collect();
    // Stable sort keeps the slot order for ties.
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

pub fn pick(ray: &Ray, markers: &[HotspotMarker]) -> Option<PickHit> {
    pick_all(ray, markers).into_iter().next()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverChange {
    Unchanged,
    Entered(MarkerId),
    Exited(MarkerId),
    Switched { from: MarkerId, to: MarkerId },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PickState {
    pub hovered: Option<MarkerId>,
    pub pointer_ndc: Option<Vec2>,
    pub pointer_px: Vec2,
}

#[derive(Debug, Default)]
pub struct PickingController {
    state: PickState,
}

impl PickingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PickState {
        &self.state
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.state.hovered
    }

    pub fn pointer_moved(
        &mut self,
        ndc: Vec2,
        px: Vec2,
        camera: &Camera,
        markers: &[HotspotMarker],
    ) -> HoverChange {
        self.state.pointer_ndc = Some(ndc);
        self.state.pointer_px = px;
        let hit = pick(&Ray::from_camera(camera, ndc), markers).map(|h| h.marker);
        self.set_hovered(hit)
    }

    pub fn click(&self, camera: &Camera, markers: &[HotspotMarker]) -> Option<PickHit> {
        let ndc = self.state.pointer_ndc?;
        pick(&Ray::from_camera(camera, ndc), markers)
    }

    pub fn clear_hover(&mut self) -> HoverChange {
        self.set_hovered(None)
    }

    fn set_hovered(&mut self, next: Option<MarkerId>) -> HoverChange {
        let prev = std::mem::replace(&mut self.state.hovered, next);
        match (prev, next) {
            (None, None) => HoverChange::Unchanged,
            (Some(a), Some(b)) if a == b => HoverChange::Unchanged,
            (None, Some(to)) => HoverChange::Entered(to),
            (Some(from), None) => HoverChange::Exited(from),
            (Some(from), Some(to)) => HoverChange::Switched { from, to },
        }
    }
}

/// Pixel position inside a viewport of `viewport` pixels to NDC (y up).
#[inline]
pub fn ndc_from_px(px: Vec2, viewport: Vec2) -> Vec2 {
    let w = viewport.x.max(1.0);
    let h = viewport.y.max(1.0);
    Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
}
