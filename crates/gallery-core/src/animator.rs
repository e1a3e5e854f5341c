use crate::config::AnimationConfig;
use crate::marker::{HotspotMarker, MarkerId};
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct HoverAnimator {
    config: AnimationConfig,
}

impl HoverAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn frame(
        &self,
        markers: &mut [HotspotMarker],
        hovered: Option<MarkerId>,
        eye: Vec3,
        time_sec: f64,
    ) {
        self.layout(markers, eye, time_sec);
        for m in markers.iter_mut() {
            self.step_glow(m, hovered == Some(m.id), time_sec);
        }
    }

    /// Time-driven geometry and colour only. Used right after a room is
    /// populated so pick radii are valid before the next frame.
    pub fn layout(&self, markers: &mut [HotspotMarker], eye: Vec3, time_sec: f64) {
        let t = time_sec as f32;
        let c = &self.config;
        for m in markers.iter_mut() {
            if m.hotspot.is_navigation() {
                let shift = ((t * c.nav_color_rate).sin() + 1.0) * 0.5;
                let hue = c.nav_hue_from + (c.nav_hue_to - c.nav_hue_from) * shift;
                let lightness = crate::constants::NAV_LIGHTNESS_BASE
                    + crate::constants::NAV_LIGHTNESS_SPAN * shift;
                m.color = hsl_to_rgb(hue, crate::constants::NAV_SATURATION, lightness);
                m.position = m.hotspot.position
                    + Vec3::Y * (c.nav_bob_amplitude * (t * c.nav_bob_rate).sin());
                continue;
            }
            let distance = eye.distance(m.position);
            let base = c.sprite_size * distance * c.sprite_distance_scale;
            let pulse = 1.0 + c.sprite_pulse_amplitude * (t * c.sprite_pulse_rate).sin();
            m.scale = [base, base * pulse];
            if let Some(glow) = m.glow.as_mut() {
                glow.scale = distance * c.glow_distance_scale;
            }
        }
    }

    fn step_glow(&self, marker: &mut HotspotMarker, hovered: bool, time_sec: f64) {
        let c = &self.config;
        let Some(glow) = marker.glow.as_mut() else {
            return;
        };
        glow.opacity = if hovered {
            let pulse = c.glow_pulse_offset
                + c.glow_pulse_amplitude * (time_sec as f32 * c.glow_pulse_rate).sin();
            c.glow_hover_base + pulse
        } else {
            glow.opacity - c.glow_decay_per_frame
        }
        .clamp(0.0, c.glow_max_opacity);
    }
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f32| {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}
