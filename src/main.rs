use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use shapescan::{DetectOptions, DetectionTrace, ShapeDetector};

#[derive(Parser)]
#[command(name = "shapescan")]
#[command(about = "Detect simple geometric shapes in images")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Save intermediate luminance and edge images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Load detection options from a JSON file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Sobel magnitude a pixel must exceed to count as an edge
    #[arg(long)]
    gradient_threshold: Option<f32>,

    /// Smallest edge region (in pixels) that is reported
    #[arg(long)]
    min_region_size: Option<u32>,

    /// Regions with fewer pixels are labelled triangles
    #[arg(long)]
    triangle_below: Option<u32>,

    /// Regions with fewer pixels are labelled rectangles
    #[arg(long)]
    rectangle_below: Option<u32>,

    /// Regions with fewer pixels are labelled pentagons
    #[arg(long)]
    pentagon_below: Option<u32>,

    /// Enable the star band: regions with fewer pixels are labelled stars
    #[arg(long)]
    star_below: Option<u32>,
}

impl Cli {
    fn detect_options(&self) -> anyhow::Result<DetectOptions> {
        let mut options = match &self.options {
            Some(path) => DetectOptions::from_json_file(path)?,
            None => DetectOptions::default(),
        };
        if let Some(t) = self.gradient_threshold {
            options.gradient_threshold = t;
        }
        if let Some(m) = self.min_region_size {
            options.min_region_size = m;
        }
        if let Some(v) = self.triangle_below {
            options.labels.triangle_below = v;
        }
        if let Some(v) = self.rectangle_below {
            options.labels.rectangle_below = v;
        }
        if let Some(v) = self.pentagon_below {
            options.labels.pentagon_below = v;
        }
        if self.star_below.is_some() {
            options.labels.star_below = self.star_below;
        }
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let detector = ShapeDetector::new(args.detect_options()?)?;

    if let Some(dir) = &args.debug_out {
        prepare_debug_dir(dir)?;
    }

    tracing::debug!("Loading image: {:?}", args.image_path);
    let img = ImageReader::open(&args.image_path)
        .with_context(|| format!("Failed to open {}", args.image_path.display()))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    tracing::debug!("Image loaded: {}x{}", img.width(), img.height());

    let trace = detector.trace(&img.to_rgba8())?;

    if let Some(dir) = &args.debug_out {
        save_debug_images(dir, &trace)?;
    }

    let result = &trace.result;
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("\n=== Shape Detection Results ===");
    println!(
        "Image: {}x{}, processed in {:.2} ms",
        result.image_width,
        result.image_height,
        result.processing_time.as_secs_f64() * 1000.0
    );
    println!("Total shapes detected: {}", result.shapes.len());

    if result.shapes.is_empty() {
        println!("No shapes detected.");
    } else {
        println!("\nDetected shapes:");
        for (i, shape) in result.shapes.iter().enumerate() {
            println!(
                "  {} {} at ({:.1}, {:.1}) - bbox: ({}, {}) {}x{}, area: {}, confidence: {:.2}",
                i + 1,
                shape.label,
                shape.centroid.x,
                shape.centroid.y,
                shape.bbox.x,
                shape.bbox.y,
                shape.bbox.width,
                shape.bbox.height,
                shape.area,
                shape.confidence
            );
        }
    }

    Ok(())
}

/// The directory must be empty or non-existent
fn prepare_debug_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.exists() {
        let entries = std::fs::read_dir(dir)?;
        if entries.count() > 0 {
            return Err(anyhow::anyhow!("Debug directory is not empty: {}", dir.display()));
        }
    } else {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn save_debug_images(dir: &Path, trace: &DetectionTrace) -> anyhow::Result<()> {
    let outputs = [
        ("01_luminance.png", &trace.luminance),
        ("02_edges.png", &trace.edges),
    ];
    for (name, buffer) in outputs {
        let path = dir.join(name);
        buffer
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        tracing::debug!("Debug: saved {}", path.display());
    }
    Ok(())
}
