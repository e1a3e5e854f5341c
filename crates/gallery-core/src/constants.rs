use glam::Vec3;

// Shared scene/audio tuning constants. `EngineConfig::default()` is built from these.

// Panorama surface
pub const SPHERE_RADIUS: f32 = 400.0;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 60;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 40;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_EYE_DISTANCE: f32 = 0.1; // eye sits just off the orbit target
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of pending rotation applied per 60 Hz frame
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;
pub const CLICK_DRAG_TOLERANCE_PX: f32 = 5.0;

// Audio levels
pub const AMBIENT_NOMINAL_VOLUME: f32 = 0.5;
pub const AMBIENT_CROSSFADE_SEC: f64 = 2.0;
pub const ARTIFACT_VOLUME: f32 = 0.8;
pub const ARTIFACT_DUCKED_VOLUME: f32 = 0.4;
pub const DESCRIPTION_VOLUME: f32 = 1.0;

// Glow overlay (artifact/video markers)
pub const GLOW_RADIUS: f32 = 6.0;
pub const GLOW_MAX_OPACITY: f32 = 0.6;
pub const GLOW_HOVER_BASE: f32 = 0.4;
pub const GLOW_PULSE_OFFSET: f32 = 0.2;
pub const GLOW_PULSE_AMPLITUDE: f32 = 0.2;
pub const GLOW_PULSE_RATE: f32 = 5.0; // rad/s
pub const GLOW_DECAY_PER_FRAME: f32 = 0.05;
pub const GLOW_DISTANCE_SCALE: f32 = 0.01;

// Billboard sprites (artifact/video markers)
pub const SPRITE_AUTHORED_SCALE: f32 = 15.0; // before the first distance-compensated layout
pub const SPRITE_SIZE: f32 = 10.0;
pub const SPRITE_DISTANCE_SCALE: f32 = 0.01;
pub const SPRITE_PULSE_AMPLITUDE: f32 = 0.06;
pub const SPRITE_PULSE_RATE: f32 = 5.0;

// Navigation cones
pub const NAV_CONE_RADIUS: f32 = 3.0;
pub const NAV_CONE_HEIGHT: f32 = 8.0;
pub const NAV_HUE_FROM: f32 = 0.33; // green
pub const NAV_HUE_TO: f32 = 0.17; // yellow
pub const NAV_SATURATION: f32 = 1.0;
pub const NAV_LIGHTNESS_BASE: f32 = 0.5;
pub const NAV_LIGHTNESS_SPAN: f32 = 0.2;
pub const NAV_COLOR_RATE: f32 = 5.0;
pub const NAV_BOB_AMPLITUDE: f32 = 3.0;
pub const NAV_BOB_RATE: f32 = 2.0;

// Overlay text
pub const TOOLTIP_OFFSET_PX: f32 = 20.0;
pub const DEFAULT_NAVIGATION_TITLE: &str = "Enter";
pub const DEFAULT_VIDEO_TITLE: &str = "Play Video";
