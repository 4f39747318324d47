//! Burn the separator and its margin envelope into a copy of the image.
//!
//! Three parallel lines are drawn: the boundary (offset `c`) in black and the
//! two margin lines (offsets `c ∓ 1`) in gray, so the decision boundary is
//! visually distinct from the strip it clears. Endpoints are evaluated at
//! x = −W and x = 2W, one image-width beyond each side, so the drawn segment
//! crosses the whole visible region at any slope.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

use crate::{SeparationError, Separator, Vector2};

/// Rendering parameters for the overlay.
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    /// Stroke width of each line, in pixels.
    /// Default: 5
    pub stroke_width: u32,
    /// Grayscale intensity of the boundary line.
    /// Default: 0 (black)
    pub boundary_shade: u8,
    /// Grayscale intensity of the two margin lines.
    /// Default: 100
    pub margin_shade: u8,
    /// Verticality ratio handed to [`Separator::is_vertical`]; separators at
    /// least this vertical are refused instead of dividing by `a`.
    /// Default: 1e-4
    pub vertical_ratio: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_width: 5,
            boundary_shade: 0,
            margin_shade: 100,
            vertical_ratio: 1e-4,
        }
    }
}

/// Render `separator` onto a copy of `image`. The input is untouched.
///
/// Fails with [`SeparationError::DegenerateBoundary`] when the separator is
/// vertical to within the style's ratio: the column-to-row evaluation
/// `y = −(b·x + offset)/a` has no answer there, and the condition must be
/// reported instead of surfacing as an arithmetic fault mid-render.
pub fn render_overlay(
    image: &RgbImage,
    separator: &Separator,
    style: &OverlayStyle,
) -> Result<RgbImage, SeparationError> {
    if separator.is_vertical(style.vertical_ratio) {
        return Err(SeparationError::DegenerateBoundary { a: separator.a });
    }

    let mut canvas = image.clone();
    let width = f64::from(image.width());
    let height = f64::from(image.height());

    // Rows outside this band cannot touch the canvas even with the stroke.
    let pad = f64::from(style.stroke_width) + 2.0;
    let (y_min, y_max) = (-pad, height + pad);

    // Margin lines first, boundary last so it stays on top where they meet.
    let passes = [
        (separator.c - 1.0, style.margin_shade),
        (separator.c + 1.0, style.margin_shade),
        (separator.c, style.boundary_shade),
    ];

    for (offset, shade) in passes {
        let x0 = -width;
        let x1 = 2.0 * width;
        let p0 = Vector2::new(x0, separator.row_at(x0, offset));
        let p1 = Vector2::new(x1, separator.row_at(x1, offset));

        if let Some((q0, q1)) = clip_rows(p0, p1, y_min, y_max) {
            stroke_segment(
                &mut canvas,
                q0,
                q1,
                f64::from(style.stroke_width),
                Rgb([shade, shade, shade]),
            );
        }
    }

    Ok(canvas)
}

/// Clip the segment `p0`–`p1` to the row band `[y_min, y_max]`, keeping the
/// line geometry exact. Returns `None` when nothing of it lies in the band.
fn clip_rows(p0: Vector2, p1: Vector2, y_min: f64, y_max: f64) -> Option<(Vector2, Vector2)> {
    let dy = p1.y - p0.y;
    if dy.abs() < f64::EPSILON {
        return (p0.y >= y_min && p0.y <= y_max).then_some((p0, p1));
    }

    let t_lo = (y_min - p0.y) / dy;
    let t_hi = (y_max - p0.y) / dy;
    let (mut t0, mut t1) = if t_lo <= t_hi {
        (t_lo, t_hi)
    } else {
        (t_hi, t_lo)
    };
    t0 = t0.max(0.0);
    t1 = t1.min(1.0);
    if t0 >= t1 {
        return None;
    }

    let d = p1 - p0;
    Some((p0 + t0 * d, p0 + t1 * d))
}

/// Draw a stroked segment as a filled quad centered on the line.
fn stroke_segment(canvas: &mut RgbImage, p0: Vector2, p1: Vector2, width: f64, color: Rgb<u8>) {
    let d = p1 - p0;
    let len = d.norm();
    if len == 0.0 || width <= 0.0 {
        return;
    }

    let n = Vector2::new(-d.y, d.x) * (width / (2.0 * len));
    let quad =
        [p0 + n, p1 + n, p1 - n, p0 - n].map(|p| Point::new(round_i32(p.x), round_i32(p.y)));

    // draw_polygon_mut rejects a closed ring; sub-pixel strokes can collapse
    // the quad after rounding, in which case a plain line is all there is.
    if quad[0] == quad[3] || quad[1] == quad[2] {
        draw_line_segment_mut(
            canvas,
            (p0.x as f32, p0.y as f32),
            (p1.x as f32, p1.y as f32),
            color,
        );
        return;
    }
    draw_polygon_mut(canvas, &quad, color);
}

fn round_i32(v: f64) -> i32 {
    v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
