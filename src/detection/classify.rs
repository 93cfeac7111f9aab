use std::f64::consts::PI;

use crate::config::LabelThresholds;
use crate::models::{BoundingBox, Centroid, DetectedShape, Region, ShapeLabel};

/// A Sobel step edge fires on both sides of the boundary.
const EDGE_BAND_WIDTH: f64 = 2.0;

/// Pick a label from the raw pixel count.
pub fn label_for_count(count: usize, thresholds: &LabelThresholds) -> ShapeLabel {
    let below = |cut: u32| count < cut as usize;
    if below(thresholds.triangle_below) {
        ShapeLabel::Triangle
    } else if below(thresholds.rectangle_below) {
        ShapeLabel::Rectangle
    } else if below(thresholds.pentagon_below) {
        ShapeLabel::Pentagon
    } else if thresholds.star_below.is_some_and(below) {
        ShapeLabel::Star
    } else {
        ShapeLabel::Circle
    }
}

/// Describe one region. The region must be non-empty.
pub fn classify_region(region: &Region, thresholds: &LabelThresholds) -> DetectedShape {
    let (min_x, min_y, max_x, max_y) = region.extent().unwrap_or_default();
    let bbox = BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    };

    let count = region.pixel_count();
    let (sum_x, sum_y) = region
        .pixels()
        .iter()
        .fold((0u64, 0u64), |(sx, sy), p| (sx + u64::from(p.x), sy + u64::from(p.y)));
    let n = count.max(1) as f64;
    let centroid = Centroid {
        x: sum_x as f64 / n,
        y: sum_y as f64 / n,
    };

    let label = label_for_count(count, thresholds);

    DetectedShape {
        label,
        confidence: fit_score(label, &bbox, count),
        bbox,
        centroid,
        area: bbox.area(),
        pixel_count: count as u32,
    }
}

/// Compare the pixel count with the edge band of an ideal `label` outline
/// inscribed in `bbox`.
pub fn fit_score(label: ShapeLabel, bbox: &BoundingBox, count: usize) -> f32 {
    let expected = outline_perimeter(label, f64::from(bbox.width), f64::from(bbox.height))
        * EDGE_BAND_WIDTH;
    let actual = count as f64;
    if expected <= 0.0 || actual <= 0.0 {
        return 0.0;
    }
    (actual.min(expected) / actual.max(expected)) as f32
}

fn outline_perimeter(label: ShapeLabel, w: f64, h: f64) -> f64 {
    match label {
        // Isosceles, base along the bottom of the box.
        ShapeLabel::Triangle => w + 2.0 * (w * w / 4.0 + h * h).sqrt(),
        ShapeLabel::Rectangle => 2.0 * (w + h),
        ShapeLabel::Pentagon => 10.0 * (PI / 5.0).sin() * polygon_circumradius(w, h),
        // Inner radius of a regular pentagram is about 0.382 of the outer one.
        ShapeLabel::Star => {
            let r = polygon_circumradius(w, h);
            let inner = 0.381_966 * r;
            let edge = (r * r + inner * inner - 2.0 * r * inner * (PI / 5.0).cos()).sqrt();
            10.0 * edge
        }
        ShapeLabel::Circle => {
            // Ramanujan's approximation for an ellipse.
            let a = w / 2.0;
            let b = h / 2.0;
            PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
        }
    }
}

/// Circumradius of a regular five-pointed figure spanning a `w` x `h` box.
fn polygon_circumradius(w: f64, h: f64) -> f64 {
    let from_width = w / (2.0 * (2.0 * PI / 5.0).sin());
    let from_height = h / (1.0 + (PI / 5.0).cos());
    (from_width + from_height) / 2.0
}
