use crate::models::{EDGE_ON, EdgeMask, LuminanceBuffer};

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Threshold the Sobel gradient magnitude into a binary edge mask.
///
/// Only interior pixels are evaluated; the one-pixel frame stays 0. The
/// threshold is strict (`magnitude > threshold`) with no hysteresis or
/// non-maximum suppression.
pub fn sobel_edges(gray: &LuminanceBuffer, threshold: f32) -> EdgeMask {
    let (width, height) = gray.dimensions();
    let mut mask = EdgeMask::new(width, height);
    if width < 3 || height < 3 {
        return mask;
    }

    let src = gray.as_raw();
    let w = width as usize;
    let threshold = f64::from(threshold);

    for y in 1..height as usize - 1 {
        for x in 1..w - 1 {
            let mut sum_x = 0i32;
            let mut sum_y = 0i32;
            for ky in 0..3 {
                let row = (y + ky - 1) * w;
                for kx in 0..3 {
                    let v = i32::from(src[row + x + kx - 1]);
                    sum_x += v * SOBEL_X[ky * 3 + kx];
                    sum_y += v * SOBEL_Y[ky * 3 + kx];
                }
            }
            let magnitude = f64::from(sum_x * sum_x + sum_y * sum_y).sqrt();
            if magnitude > threshold {
                mask.put_pixel(x as u32, y as u32, image::Luma([EDGE_ON]));
            }
        }
    }

    mask
}
