use crate::config::CameraConfig;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, config.eye_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fov_deg.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit direction from the eye through normalized device coordinates
    /// (`x`, `y` in -1..1, `y` up).
    pub fn ray_direction(&self, ndc: Vec2) -> Vec3 {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        (far - self.eye).normalize()
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.eye.distance(point)
    }
}

/// Drag-driven orbit with exponential damping.
///
/// Angles follow the usual spherical convention: `theta` around +Y starting at
/// +Z, `phi` measured from +Y.
#[derive(Clone, Debug)]
pub struct OrbitController {
    theta: f32,
    phi: f32,
    pending: Vec2, // (theta, phi) still to be applied
    radius: f32,
    rotate_speed: f32,
    damping: f32,
    drag: Option<DragTrack>,
}

#[derive(Clone, Copy, Debug)]
struct DragTrack {
    last_px: Vec2,
    travelled_px: f32,
}

impl OrbitController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            theta: 0.0,
            phi: PI / 2.0,
            pending: Vec2::ZERO,
            radius: config.eye_distance,
            rotate_speed: config.rotate_speed,
            damping: config.damping.clamp(0.0, 1.0),
            drag: None,
        }
    }

    pub fn begin_drag(&mut self, px: Vec2) {
        self.drag = Some(DragTrack {
            last_px: px,
            travelled_px: 0.0,
        });
    }

    pub fn drag_to(&mut self, px: Vec2, viewport_height: f32) {
        let Some(track) = self.drag.as_mut() else {
            return;
        };
        let delta = px - track.last_px;
        track.last_px = px;
        track.travelled_px += delta.length();
        let h = viewport_height.max(1.0);
        // Dragging right turns the view left, like grabbing the backdrop.
        self.pending.x -= TAU * delta.x / h * self.rotate_speed;
        self.pending.y -= TAU * delta.y / h * self.rotate_speed;
    }

    pub fn end_drag(&mut self) -> f32 {
        self.drag.take().map(|d| d.travelled_px).unwrap_or(0.0)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_travel(&self) -> f32 {
        self.drag.map(|d| d.travelled_px).unwrap_or(0.0)
    }

    pub fn update(&mut self, dt_sec: f32) {
        let frames = (dt_sec.max(0.0) * 60.0).min(60.0);
        let remaining = (1.0 - self.damping).powf(frames);
        let applied = self.pending * (1.0 - remaining);
        self.pending -= applied;
        self.theta = (self.theta + applied.x).rem_euclid(TAU);
        let eps = crate::constants::ORBIT_POLAR_EPSILON;
        self.phi = (self.phi + applied.y).clamp(eps, PI - eps);
        if self.pending.length_squared() < 1e-12 {
            self.pending = Vec2::ZERO;
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn apply(&self, camera: &mut Camera) {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let offset = Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        );
        camera.eye = camera.target + offset;
    }
}
