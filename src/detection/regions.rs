use tracing::trace;

use crate::models::{EDGE_ON, EdgeMask, Point, Region};

const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Outcome of a full scan over an edge mask.
#[derive(Debug, Clone, Default)]
pub struct RegionScan {
    /// Accepted regions, in row-major order of their seed pixel
    pub regions: Vec<Region>,
    /// Components dropped for being smaller than the minimum size
    pub discarded_regions: usize,
    pub discarded_pixels: usize,
}

/// Connected components of edge pixels with at least `min_size` pixels.
pub fn extract_regions(mask: &EdgeMask, min_size: u32) -> Vec<Region> {
    label_regions(mask, min_size).regions
}

/// Flood-fill every 8-connected component of "on" pixels.
///
/// Each pixel is claimed by at most one component. Components below
/// `min_size` are dropped but their pixels stay visited.
pub fn label_regions(mask: &EdgeMask, min_size: u32) -> RegionScan {
    let (width, height) = mask.dimensions();
    let w = width as usize;
    let data = mask.as_raw();
    let mut visited = vec![false; data.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut scan = RegionScan::default();

    for seed in 0..data.len() {
        if data[seed] != EDGE_ON || visited[seed] {
            continue;
        }

        visited[seed] = true;
        stack.push(seed);
        let mut pixels = Vec::new();

        while let Some(idx) = stack.pop() {
            let x = (idx % w) as i64;
            let y = (idx / w) as i64;
            pixels.push(Point { x: x as u32, y: y as u32 });

            for (dx, dy) in NEIGHBORS {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if data[n] == EDGE_ON && !visited[n] {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }

        if pixels.len() < min_size as usize {
            trace!(
                seed_x = seed % w,
                seed_y = seed / w,
                pixels = pixels.len(),
                "discarding small region"
            );
            scan.discarded_regions += 1;
            scan.discarded_pixels += pixels.len();
            continue;
        }

        scan.regions.push(Region::new(pixels));
    }

    scan
}
