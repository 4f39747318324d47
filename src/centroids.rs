//! Reduce the foreground blobs of a mask to one representative point each.
//!
//! Blobs are discovered as external contours (Suzuki–Abe border following,
//! 8-connected) and each is reduced to the arithmetic mean of its boundary
//! pixels. Averaging the boundary rather than the filled interior is the
//! centroid convention this system inherits: it is accurate for small,
//! roughly circular markers and biased for highly irregular shapes, and the
//! downstream margin geometry only requires that *one* convention is applied
//! consistently.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::Point2;

/// Configuration for centroid extraction from a binary mask.
#[derive(Debug, Clone)]
pub struct CentroidConfig {
    /// Minimum number of boundary pixels a contour needs to produce a point.
    /// The default keeps everything, down to single-pixel blobs.
    /// Default: 1
    pub min_boundary_points: usize,
}

impl Default for CentroidConfig {
    fn default() -> Self {
        Self {
            min_boundary_points: 1,
        }
    }
}

/// Result of centroid extraction, with diagnostics.
#[derive(Debug, Clone)]
pub struct PointExtraction {
    /// One point per external contour, in contour-discovery order.
    pub points: Vec<Point2>,
    /// Number of contours found before filtering, hole contours included.
    pub num_contours_raw: usize,
}

impl PointExtraction {
    /// True if no blob survived extraction.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Extract one centroid per foreground blob of `mask`.
///
/// Only external contours are considered; contours of holes inside a blob are
/// ignored. A mask with no foreground pixels yields an empty point set — the
/// separator solve rejects that downstream, since it needs at least one point
/// per class.
///
/// The scan is deterministic: the same mask always produces the same points
/// in the same order.
pub fn extract_centroids(mask: &GrayImage, config: &CentroidConfig) -> PointExtraction {
    let contours = find_contours::<u32>(mask);
    let num_contours_raw = contours.len();

    let points = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter(|c| c.points.len() >= config.min_boundary_points)
        .map(|c| {
            let n = c.points.len() as f64;
            let (sx, sy) = c
                .points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
            Point2::new(sx / n, sy / n)
        })
        .collect();

    PointExtraction {
        points,
        num_contours_raw,
    }
}
