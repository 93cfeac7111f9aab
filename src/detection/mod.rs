pub mod classify;
pub mod edges;
pub mod grayscale;
pub mod regions;

use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;
use tracing::debug;

use crate::config::DetectOptions;
use crate::error::{DetectError, Result};
use crate::models::{DetectionResult, EdgeMask, LuminanceBuffer, PixelBuffer, Region};

/// Intermediate buffers of one run, kept for inspection and debug dumps.
#[derive(Debug, Clone)]
pub struct DetectionTrace {
    pub luminance: LuminanceBuffer,
    pub edges: EdgeMask,
    pub regions: Vec<Region>,
    pub discarded_regions: usize,
    pub result: DetectionResult,
}

/// Runs grayscale -> edges -> regions -> classification over one image.
///
/// Holds only configuration; every call allocates its own buffers, so one
/// detector can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ShapeDetector {
    options: DetectOptions,
}

impl ShapeDetector {
    /// Create a detector, rejecting invalid options up front.
    pub fn new(options: DetectOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Run the full detection pipeline on an RGBA image
    pub fn detect(&self, image: &PixelBuffer) -> Result<DetectionResult> {
        Ok(self.trace(image)?.result)
    }

    /// Detect shapes in any decoded image, converting it to RGBA first.
    pub fn detect_image(&self, image: &DynamicImage) -> Result<DetectionResult> {
        self.detect(&image.to_rgba8())
    }

    /// Detect shapes in a raw row-major RGBA8 byte buffer.
    pub fn detect_raw(&self, width: u32, height: u32, data: &[u8]) -> Result<DetectionResult> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(DetectError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let image = PixelBuffer::from_raw(width, height, data.to_vec()).ok_or(
            DetectError::BufferSize {
                expected,
                actual: data.len(),
            },
        )?;
        self.detect(&image)
    }

    /// Run [`ShapeDetector::detect`] on the blocking thread pool so an async
    /// caller is not stalled while it computes.
    pub async fn detect_async(&self, image: Arc<PixelBuffer>) -> Result<DetectionResult> {
        let detector = self.clone();
        tokio::task::spawn_blocking(move || detector.detect(&image))
            .await
            .map_err(|e| DetectError::TaskJoin(e.to_string()))?
    }

    /// Run the pipeline and keep every intermediate stage output.
    pub fn trace(&self, image: &PixelBuffer) -> Result<DetectionTrace> {
        let (width, height) = image.dimensions();
        check_dimensions(width, height)?;
        let started = Instant::now();

        let luminance = grayscale::to_luminance(image);
        debug!(width, height, elapsed = ?started.elapsed(), "grayscale done");

        let edges = edges::sobel_edges(&luminance, self.options.gradient_threshold);
        debug!(
            threshold = self.options.gradient_threshold,
            edge_pixels = edges.pixels().filter(|p| p[0] != 0).count(),
            elapsed = ?started.elapsed(),
            "edge detection done"
        );

        let scan = regions::label_regions(&edges, self.options.min_region_size);
        debug!(
            regions = scan.regions.len(),
            discarded = scan.discarded_regions,
            discarded_pixels = scan.discarded_pixels,
            elapsed = ?started.elapsed(),
            "region extraction done"
        );

        let shapes = scan
            .regions
            .iter()
            .map(|region| classify::classify_region(region, &self.options.labels))
            .collect::<Vec<_>>();

        let processing_time = started.elapsed();
        debug!(shapes = shapes.len(), elapsed = ?processing_time, "classification done");

        Ok(DetectionTrace {
            luminance,
            edges,
            regions: scan.regions,
            discarded_regions: scan.discarded_regions,
            result: DetectionResult {
                shapes,
                processing_time,
                image_width: width,
                image_height: height,
            },
        })
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(DetectError::EmptyImage { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rejects_empty_image() {
        let detector = ShapeDetector::default();
        let err = detector.detect(&PixelBuffer::new(0, 10)).unwrap_err();
        assert!(matches!(err, DetectError::EmptyImage { width: 0, height: 10 }));
    }

    #[test]
    fn rejects_wrong_channel_layout() {
        let detector = ShapeDetector::default();
        // Three bytes per pixel instead of four.
        let rgb = vec![0u8; 4 * 4 * 3];
        let err = detector.detect_raw(4, 4, &rgb).unwrap_err();
        assert!(matches!(err, DetectError::BufferSize { expected: 64, actual: 48 }));
    }

    #[test]
    fn rejects_invalid_options() {
        let options = DetectOptions::default().with_min_region_size(0);
        assert!(ShapeDetector::new(options).is_err());
    }

    #[test]
    fn result_echoes_dimensions() {
        let detector = ShapeDetector::default();
        let image = PixelBuffer::from_pixel(37, 21, Rgba([9, 9, 9, 255]));
        let result = detector.detect(&image).unwrap();
        assert_eq!((result.image_width, result.image_height), (37, 21));
        assert!(result.shapes.is_empty());
    }

    #[test]
    fn trace_exposes_stage_outputs() {
        let detector = ShapeDetector::default();
        let image = PixelBuffer::from_fn(60, 60, |x, y| {
            if (20..40).contains(&x) && (20..40).contains(&y) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let trace = detector.trace(&image).unwrap();
        assert_eq!(trace.luminance.dimensions(), (60, 60));
        assert_eq!(trace.edges.dimensions(), (60, 60));
        assert_eq!(trace.regions.len(), 1);
        assert_eq!(trace.result.shapes.len(), 1);
        assert_eq!(trace.result.shapes[0].pixel_count as usize, trace.regions[0].pixel_count());
    }
}
