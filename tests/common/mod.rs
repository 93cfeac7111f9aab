mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shapescan for tests
pub use shapescan::{
    BoundingBox, DetectOptions, DetectedShape, DetectionResult, LabelThresholds, PixelBuffer,
    ShapeDetector, ShapeLabel,
};
