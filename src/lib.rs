//! # scatterline
//!
//! Finds the **maximum-margin straight line** separating two colored point
//! clusters in a raster image.
//!
//! Each cluster is marked in the source image as a set of dark dots in one
//! color channel (dark ink on a light background). The pipeline:
//!
//! 1. **Mask extraction** — inverted binary threshold of the chosen channel
//!    isolates the dots of one class.
//! 2. **Centroid extraction** — external contours of the mask are reduced to
//!    one point each (the mean of the boundary pixels).
//! 3. **Separator solve** — a hard-margin convex program
//!    (minimize `a² + b²` subject to `a·y + b·x + c ≤ −1` for class A and
//!    `≥ +1` for class B) yields the line `a·y + b·x + c = 0` with the widest
//!    possible margin `2/‖(a,b)‖`.
//! 4. **Overlay rendering** — the boundary and its two margin lines are drawn
//!    onto a copy of the image for visual verification.
//!
//! ## Example
//!
//! ```no_run
//! use scatterline::{separate_file, SeparationConfig};
//!
//! let config = SeparationConfig::default();
//! let result = separate_file("scatter-map.jpg", &config).unwrap();
//!
//! println!(
//!     "separator: {:.4}·y + {:.4}·x + {:.4} = 0 (margin {:.1} px)",
//!     result.separator.a,
//!     result.separator.b,
//!     result.separator.c,
//!     result.separator.margin_width(),
//! );
//! result.overlay.save("separated.png").unwrap();
//! ```
//!
//! Non-separable inputs, empty classes and vertical separators (which the
//! overlay evaluation cannot draw) are reported as distinct
//! [`SeparationError`] conditions rather than producing a nonsensical line.

pub mod centroids;
mod error;
pub mod mask;
pub mod overlay;
pub mod panel;
pub mod pipeline;
pub mod solver;

pub use centroids::{extract_centroids, CentroidConfig, PointExtraction};
pub use error::{ClassLabel, SeparationError};
pub use mask::{extract_mask, Channel, MaskConfig};
pub use overlay::{render_overlay, OverlayStyle};
pub use panel::PanelGrid;
pub use pipeline::{separate, separate_file, SeparationConfig, SeparationResult};
pub use solver::{
    solve_separator, solve_separator_with, ConvexSolver, LinearConstraint, MarginProgram,
    MinNormSolver, Separator, SolveOutcome, MARGIN_TOLERANCE,
};

// Commonly used types
// Point counts are tiny here, so everything runs in 64-bit floats; the solver
// tolerances (1e-6 and below) leave no room for f32.
pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
