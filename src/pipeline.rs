//! End-to-end orchestration: image → masks → point sets → separator →
//! overlay.
//!
//! The stages run strictly in sequence on immutable inputs; the only
//! mutation anywhere is the overlay writing into its own copy of the image.

use std::path::Path;

use anyhow::Context;
use image::{GrayImage, RgbImage};
use tracing::{debug, info};

use crate::centroids::{extract_centroids, CentroidConfig};
use crate::mask::{extract_mask, Channel, MaskConfig};
use crate::overlay::{render_overlay, OverlayStyle};
use crate::panel::PanelGrid;
use crate::solver::{solve_separator_with, MinNormSolver, Separator, MARGIN_TOLERANCE};
use crate::{Point2, SeparationError};

/// Configuration of one separation run.
#[derive(Debug, Clone)]
pub struct SeparationConfig {
    /// Channel whose dark dots mark class A.
    /// Default: red
    pub class_a_channel: Channel,
    /// Channel whose dark dots mark class B.
    /// Default: blue
    pub class_b_channel: Channel,
    /// Mask extraction parameters (shared by both classes).
    pub mask: MaskConfig,
    /// Centroid extraction parameters (shared by both classes).
    pub centroid: CentroidConfig,
    /// Solver backend parameters.
    pub solver: MinNormSolver,
    /// Tolerance for post-solve constraint verification.
    /// Default: [`MARGIN_TOLERANCE`]
    pub margin_tolerance: f64,
    /// Overlay rendering parameters.
    pub overlay: OverlayStyle,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            class_a_channel: Channel::Red,
            class_b_channel: Channel::Blue,
            mask: MaskConfig::default(),
            centroid: CentroidConfig::default(),
            solver: MinNormSolver::default(),
            margin_tolerance: MARGIN_TOLERANCE,
            overlay: OverlayStyle::default(),
        }
    }
}

/// Everything one separation run produces.
#[derive(Debug, Clone)]
pub struct SeparationResult {
    /// Class-A centroids, in contour-discovery order.
    pub class_a: Vec<Point2>,
    /// Class-B centroids, in contour-discovery order.
    pub class_b: Vec<Point2>,
    /// Binary mask class A was extracted from, kept for inspection.
    pub mask_a: GrayImage,
    /// Binary mask class B was extracted from, kept for inspection.
    pub mask_b: GrayImage,
    /// The maximum-margin separator.
    pub separator: Separator,
    /// Copy of the input with the separator and margin lines drawn in.
    pub overlay: RgbImage,
}

impl SeparationResult {
    /// Compose the standard 2×2 report: original, mask A, mask B, overlay.
    pub fn panel_report(&self, original: &RgbImage) -> RgbImage {
        let mut grid = PanelGrid::new(2, 2, original.width(), original.height());
        grid.place(0, 0, original);
        grid.place_gray(0, 1, &self.mask_a);
        grid.place_gray(1, 0, &self.mask_b);
        grid.place(1, 1, &self.overlay);
        grid.into_image()
    }
}

/// Run the full separation pipeline on an in-memory image.
pub fn separate(
    image: &RgbImage,
    config: &SeparationConfig,
) -> Result<SeparationResult, SeparationError> {
    let mask_a = extract_mask(image, config.class_a_channel, &config.mask);
    let extraction_a = extract_centroids(&mask_a, &config.centroid);
    debug!(
        channel = ?config.class_a_channel,
        contours = extraction_a.num_contours_raw,
        points = extraction_a.points.len(),
        "class A extracted"
    );

    let mask_b = extract_mask(image, config.class_b_channel, &config.mask);
    let extraction_b = extract_centroids(&mask_b, &config.centroid);
    debug!(
        channel = ?config.class_b_channel,
        contours = extraction_b.num_contours_raw,
        points = extraction_b.points.len(),
        "class B extracted"
    );

    let separator = solve_separator_with(
        &config.solver,
        &extraction_a.points,
        &extraction_b.points,
        config.margin_tolerance,
    )?;

    let overlay = render_overlay(image, &separator, &config.overlay)?;

    info!(
        class_a_points = extraction_a.points.len(),
        class_b_points = extraction_b.points.len(),
        margin_width = separator.margin_width(),
        "separation complete"
    );

    Ok(SeparationResult {
        class_a: extraction_a.points,
        class_b: extraction_b.points,
        mask_a,
        mask_b,
        separator,
        overlay,
    })
}

/// Run the pipeline on an image file.
///
/// File-level problems (missing, unreadable, undecodable) surface with
/// context; pipeline conditions keep their [`SeparationError`] identity
/// inside the error chain.
pub fn separate_file(
    path: impl AsRef<Path>,
    config: &SeparationConfig,
) -> anyhow::Result<SeparationResult> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("failed to open image: {}", path.display()))?
        .to_rgb8();
    separate(&image, config).map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Stamp a square dot whose `channel` value is dark (0) and whose other
    /// channels stay bright.
    fn stamp_dot(image: &mut RgbImage, cx: u32, cy: u32, r: u32, channel: Channel) {
        let mut color = [230u8, 230, 230];
        color[channel.index()] = 0;
        for y in cy.saturating_sub(r)..=(cy + r).min(image.height() - 1) {
            for x in cx.saturating_sub(r)..=(cx + r).min(image.width() - 1) {
                image.put_pixel(x, y, Rgb(color));
            }
        }
    }

    fn scatter_image() -> RgbImage {
        let mut img = RgbImage::from_pixel(120, 90, Rgb([255, 255, 255]));
        // Class A (dark red channel) in the upper-left region.
        stamp_dot(&mut img, 20, 20, 3, Channel::Red);
        stamp_dot(&mut img, 30, 35, 3, Channel::Red);
        stamp_dot(&mut img, 15, 45, 3, Channel::Red);
        // Class B (dark blue channel) in the lower-right region.
        stamp_dot(&mut img, 90, 60, 3, Channel::Blue);
        stamp_dot(&mut img, 100, 70, 3, Channel::Blue);
        stamp_dot(&mut img, 85, 75, 3, Channel::Blue);
        img
    }

    #[test]
    fn full_pipeline_separates_a_synthetic_scatter() {
        let img = scatter_image();
        let result = separate(&img, &SeparationConfig::default()).unwrap();

        assert_eq!(result.class_a.len(), 3);
        assert_eq!(result.class_b.len(), 3);

        let sep = &result.separator;
        for p in &result.class_a {
            assert!(sep.evaluate(p) <= -1.0 + 1e-6);
        }
        for p in &result.class_b {
            assert!(sep.evaluate(p) >= 1.0 - 1e-6);
        }
        assert_ne!(result.overlay, img);
    }

    #[test]
    fn missing_class_is_an_empty_class_error() {
        let mut img = RgbImage::from_pixel(60, 60, Rgb([255, 255, 255]));
        stamp_dot(&mut img, 20, 20, 3, Channel::Red);

        let err = separate(&img, &SeparationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SeparationError::EmptyClass {
                class: crate::ClassLabel::B
            }
        ));
    }

    #[test]
    fn panel_report_is_a_two_by_two_montage() {
        let img = scatter_image();
        let result = separate(&img, &SeparationConfig::default()).unwrap();
        let report = result.panel_report(&img);
        assert_eq!(report.dimensions(), (2 * img.width(), 2 * img.height()));
    }
}
