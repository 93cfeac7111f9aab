use std::fmt;
use std::time::Duration;

use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Decoded RGBA input, row-major with the origin at the top-left.
pub type PixelBuffer = RgbaImage;

/// Single-channel intensity image derived from a [`PixelBuffer`].
pub type LuminanceBuffer = GrayImage;

/// Binary mask: 0 = background, 255 = edge.
pub type EdgeMask = GrayImage;

/// Value of an "on" pixel in an [`EdgeMask`].
pub const EDGE_ON: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// One connected component of edge pixels.
///
/// Pixel order follows the flood fill and carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pixels: Vec<Point>,
}

impl Region {
    pub fn new(pixels: Vec<Point>) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Inclusive extremes `(min_x, min_y, max_x, max_y)`, `None` for an empty region.
    pub fn extent(&self) -> Option<(u32, u32, u32, u32)> {
        let first = self.pixels.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.pixels.iter().fold(init, |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        }))
    }
}

/// Axis-aligned box; `width`/`height` are `max - min`, so a single pixel has size 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= f64::from(self.x)
            && x <= f64::from(self.right())
            && y >= f64::from(self.y)
            && y <= f64::from(self.bottom())
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeLabel {
    Triangle,
    Rectangle,
    Pentagon,
    Star,
    Circle,
}

impl ShapeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeLabel::Triangle => "triangle",
            ShapeLabel::Rectangle => "rectangle",
            ShapeLabel::Pentagon => "pentagon",
            ShapeLabel::Star => "star",
            ShapeLabel::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedShape {
    pub label: ShapeLabel,
    /// Geometric-fit score in `[0, 1]`
    pub confidence: f32,
    pub bbox: BoundingBox,
    pub centroid: Centroid,
    /// Bounding-box area (`width * height`), not the pixel count
    pub area: u64,
    /// Number of edge pixels in the source region
    pub pixel_count: u32,
}

/// Output of one detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub shapes: Vec<DetectedShape>,
    #[serde(rename = "processing_time_ms", with = "duration_ms")]
    pub processing_time: Duration,
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectionResult {
    /// Equality ignoring `processing_time`.
    pub fn same_shapes(&self, other: &DetectionResult) -> bool {
        self.image_width == other.image_width
            && self.image_height == other.image_height
            && self.shapes == other.shapes
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64() * 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(ms / 1000.0).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_extent_covers_all_pixels() {
        let region = Region::new(vec![
            Point { x: 4, y: 7 },
            Point { x: 2, y: 9 },
            Point { x: 6, y: 8 },
        ]);
        assert_eq!(region.extent(), Some((2, 7, 6, 9)));
        assert_eq!(Region::new(Vec::new()).extent(), None);
    }

    #[test]
    fn bounding_box_containment_is_inclusive() {
        let bbox = BoundingBox { x: 10, y: 20, width: 5, height: 0 };
        assert!(bbox.contains(10.0, 20.0));
        assert!(bbox.contains(15.0, 20.0));
        assert!(!bbox.contains(15.5, 20.0));
        assert!(!bbox.contains(12.0, 20.1));
        assert_eq!(bbox.area(), 0);
    }

    #[test]
    fn disjoint_boxes_do_not_overlap() {
        let a = BoundingBox { x: 0, y: 0, width: 10, height: 10 };
        let b = BoundingBox { x: 11, y: 0, width: 3, height: 3 };
        let c = BoundingBox { x: 10, y: 10, width: 3, height: 3 };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn result_serializes_duration_as_millis() {
        let result = DetectionResult {
            shapes: Vec::new(),
            processing_time: Duration::from_millis(250),
            image_width: 3,
            image_height: 4,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["processing_time_ms"], 250.0);
        assert_eq!(json["image_width"], 3);
        let back: DetectionResult = serde_json::from_value(json).unwrap();
        assert!(back.same_shapes(&result));
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&ShapeLabel::Pentagon).unwrap(), "\"pentagon\"");
        assert_eq!(ShapeLabel::Circle.to_string(), "circle");
    }
}
