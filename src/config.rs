use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Pixel-count cut points used to pick a label.
///
/// Labels depend on how many edge pixels a region has, so they track shape
/// scale rather than shape geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelThresholds {
    pub triangle_below: u32,
    pub rectangle_below: u32,
    pub pentagon_below: u32,
    /// Star band between pentagon and circle; disabled when `None`
    pub star_below: Option<u32>,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            triangle_below: 400,
            rectangle_below: 900,
            pentagon_below: 1500,
            star_below: None,
        }
    }
}

impl LabelThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.triangle_below == 0 {
            return Err(DetectError::InvalidThresholds(
                "triangle cut point must be positive".to_string(),
            ));
        }
        let mut cuts = vec![self.triangle_below, self.rectangle_below, self.pentagon_below];
        cuts.extend(self.star_below);
        if cuts.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DetectError::InvalidThresholds(format!(
                "cut points must be strictly ascending, got {:?}",
                cuts
            )));
        }
        Ok(())
    }
}

/// Tunable parameters of one detection call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectOptions {
    /// Sobel magnitude a pixel must exceed to count as an edge
    pub gradient_threshold: f32,
    /// Smallest region (in pixels) that is reported
    pub min_region_size: u32,
    pub labels: LabelThresholds,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            gradient_threshold: 100.0,
            min_region_size: 80,
            labels: LabelThresholds::default(),
        }
    }
}

impl DetectOptions {
    pub fn with_gradient_threshold(mut self, threshold: f32) -> Self {
        self.gradient_threshold = threshold;
        self
    }

    pub fn with_min_region_size(mut self, size: u32) -> Self {
        self.min_region_size = size;
        self
    }

    pub fn with_labels(mut self, labels: LabelThresholds) -> Self {
        self.labels = labels;
        self
    }

    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read options {}: {}", path.display(), e))?;
        let options: DetectOptions = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse options {}: {}", path.display(), e))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gradient_threshold.is_finite() || self.gradient_threshold < 0.0 {
            return Err(DetectError::InvalidOption(format!(
                "gradient threshold must be a non-negative number, got {}",
                self.gradient_threshold
            )));
        }
        if self.min_region_size == 0 {
            return Err(DetectError::InvalidOption(
                "minimum region size must be at least 1".to_string(),
            ));
        }
        self.labels.validate()
    }
}
