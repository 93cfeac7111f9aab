use image::Rgba;
use shapescan::PixelBuffer;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Creates a uniform canvas of the given color.
pub fn blank(width: u32, height: u32, color: Rgba<u8>) -> PixelBuffer {
    PixelBuffer::from_pixel(width, height, color)
}

/// Fills the half-open rectangle `[x, x + w) x [y, y + h)`.
pub fn fill_rect(img: &mut PixelBuffer, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..(y + h).min(img.height()) {
        for px in x..(x + w).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

/// Fills every pixel whose center lies inside the triangle `a`, `b`, `c`.
pub fn fill_triangle(
    img: &mut PixelBuffer,
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    color: Rgba<u8>,
) {
    fn side(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> f64 {
        (p.0 - r.0) * (q.1 - r.1) - (q.0 - r.0) * (p.1 - r.1)
    }

    for y in 0..img.height() {
        for x in 0..img.width() {
            let p = (x as f64 + 0.5, y as f64 + 0.5);
            let d1 = side(p, a, b);
            let d2 = side(p, b, c);
            let d3 = side(p, c, a);
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            if !(has_neg && has_pos) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Fills a disc centered on `(cx, cy)`.
pub fn fill_circle(img: &mut PixelBuffer, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Sets isolated single pixels.
pub fn scatter_dots(img: &mut PixelBuffer, points: &[(u32, u32)], color: Rgba<u8>) {
    for &(x, y) in points {
        img.put_pixel(x, y, color);
    }
}

/// The 200x200 scene with one solid triangle spanning x 80..120, y 80..110.
pub fn single_triangle_scene() -> PixelBuffer {
    let mut img = blank(200, 200, BLACK);
    fill_triangle(&mut img, (80.0, 80.0), (120.0, 80.0), (100.0, 110.0), WHITE);
    img
}

/// Two well-separated 20x20 squares.
pub fn two_squares_scene() -> PixelBuffer {
    let mut img = blank(200, 200, BLACK);
    fill_rect(&mut img, 30, 30, 20, 20, WHITE);
    fill_rect(&mut img, 130, 130, 20, 20, WHITE);
    img
}
