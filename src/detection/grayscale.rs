use image::Luma;

use crate::models::{LuminanceBuffer, PixelBuffer};

/// Convert RGBA to luminance with the BT.601 weights, ignoring alpha.
pub fn to_luminance(img: &PixelBuffer) -> LuminanceBuffer {
    let mut gray = LuminanceBuffer::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(gray.pixels_mut()) {
        let [r, g, b, _] = src.0;
        *dst = Luma([luma(r, g, b)]);
    }
    gray
}

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}
