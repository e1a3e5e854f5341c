// Panorama image decoding. Kept free of browser types so it runs on the host.

use image::GenericImageView;

/// Tightly packed RGBA8 pixels ready for `queue.write_texture`.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Largest size with the same aspect ratio whose edges fit in `max_dim`.
pub fn fit_within(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dim || longest == 0 {
        return (width, height);
    }
    let scale = max_dim as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_dim);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_dim);
    (w, h)
}

/// Decode a PNG or JPEG, downscaling when it exceeds `max_dim`.
pub fn decode_image(bytes: &[u8], max_dim: u32) -> anyhow::Result<DecodedImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| anyhow::anyhow!("decode failed: {e}"))?;
    let (w, h) = fit_within(img.width(), img.height(), max_dim);
    let img = if (w, h) != (img.width(), img.height()) {
        log::info!(
            "[texture] downscaling {}x{} to {}x{}",
            img.width(),
            img.height(),
            w,
            h
        );
        img.resize_exact(w, h, image::imageops::FilterType::Triangle)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
