pub mod config;
pub mod detection;
pub mod error;
pub mod models;

pub use config::{DetectOptions, LabelThresholds};
pub use detection::{DetectionTrace, ShapeDetector};
pub use error::DetectError;
pub use models::{
    BoundingBox, Centroid, DetectedShape, DetectionResult, EdgeMask, LuminanceBuffer,
    PixelBuffer, Point, Region, ShapeLabel,
};

/// Detect shapes in `image` with default options.
pub fn detect(image: &PixelBuffer) -> Result<DetectionResult, DetectError> {
    ShapeDetector::default().detect(image)
}
