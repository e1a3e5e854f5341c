use glam::Vec2;
use web_sys as web;

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Width over height, or `None` while the canvas has no area (e.g. hidden).
#[inline]
pub fn aspect_of(size: Vec2) -> Option<f32> {
    (size.x >= 1.0 && size.y >= 1.0).then(|| size.x / size.y)
}

/// True when the aspect moved enough to be worth a projection update.
#[inline]
pub fn aspect_changed(prev: Option<f32>, next: f32) -> bool {
    prev.map_or(true, |p| (p - next).abs() > 1e-4)
}

/// Keep a pointer that was released outside the canvas inside the viewport.
#[inline]
pub fn clamp_to_viewport(px: Vec2, viewport: Vec2) -> Vec2 {
    px.clamp(Vec2::ZERO, viewport.max(Vec2::ZERO))
}
