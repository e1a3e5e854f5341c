use crate::constants::*;
use serde::{Deserialize, Serialize};

/// What `navigate` does while another transition is still in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    Reject,
    #[default]
    Queue,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub audio: AudioConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub transition_policy: TransitionPolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    pub ambient_volume: f32,
    pub crossfade_sec: f64,
    pub artifact_volume: f32,
    pub artifact_ducked_volume: f32,
    pub description_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ambient_volume: AMBIENT_NOMINAL_VOLUME,
            crossfade_sec: AMBIENT_CROSSFADE_SEC,
            artifact_volume: ARTIFACT_VOLUME,
            artifact_ducked_volume: ARTIFACT_DUCKED_VOLUME,
            description_volume: DESCRIPTION_VOLUME,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    pub glow_max_opacity: f32,
    pub glow_hover_base: f32,
    pub glow_pulse_offset: f32,
    pub glow_pulse_amplitude: f32,
    pub glow_pulse_rate: f32,
    pub glow_decay_per_frame: f32,
    pub glow_distance_scale: f32,
    pub sprite_size: f32,
    pub sprite_distance_scale: f32,
    pub sprite_pulse_amplitude: f32,
    pub sprite_pulse_rate: f32,
    pub nav_hue_from: f32,
    pub nav_hue_to: f32,
    pub nav_color_rate: f32,
    pub nav_bob_amplitude: f32,
    pub nav_bob_rate: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            glow_max_opacity: GLOW_MAX_OPACITY,
            glow_hover_base: GLOW_HOVER_BASE,
            glow_pulse_offset: GLOW_PULSE_OFFSET,
            glow_pulse_amplitude: GLOW_PULSE_AMPLITUDE,
            glow_pulse_rate: GLOW_PULSE_RATE,
            glow_decay_per_frame: GLOW_DECAY_PER_FRAME,
            glow_distance_scale: GLOW_DISTANCE_SCALE,
            sprite_size: SPRITE_SIZE,
            sprite_distance_scale: SPRITE_DISTANCE_SCALE,
            sprite_pulse_amplitude: SPRITE_PULSE_AMPLITUDE,
            sprite_pulse_rate: SPRITE_PULSE_RATE,
            nav_hue_from: NAV_HUE_FROM,
            nav_hue_to: NAV_HUE_TO,
            nav_color_rate: NAV_COLOR_RATE,
            nav_bob_amplitude: NAV_BOB_AMPLITUDE,
            nav_bob_rate: NAV_BOB_RATE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub eye_distance: f32,
    pub rotate_speed: f32,
    pub damping: f32,
    pub click_drag_tolerance_px: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            eye_distance: CAMERA_EYE_DISTANCE,
            rotate_speed: ORBIT_ROTATE_SPEED,
            damping: ORBIT_DAMPING,
            click_drag_tolerance_px: CLICK_DRAG_TOLERANCE_PX,
        }
    }
}
