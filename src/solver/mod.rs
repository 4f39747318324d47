//! Maximum-margin separator solve.
//!
//! Given two non-empty point sets, this module poses the hard-margin convex
//! program
//!
//! ```text
//! minimize    a² + b²
//! subject to  a·y + b·x + c ≤ −1   for every (x, y) in class A
//!             a·y + b·x + c ≥ +1   for every (x, y) in class B
//! ```
//!
//! and solves it through a narrow backend interface. Minimizing the squared
//! normal `(a, b)` maximizes the margin width `2/‖(a,b)‖`, so the optimum is
//! the widest strip of empty space between the two classes.
//!
//! The pipeline depends only on the [`ConvexSolver`] contract, so the backend
//! can be swapped (or stubbed in tests). The shipped backend is
//! [`MinNormSolver`]. Whatever the backend reports, [`solve_separator_with`]
//! re-checks every constraint of the program against the returned
//! coefficients before handing out a [`Separator`].

pub mod minnorm;
pub mod program;

use tracing::debug;

pub use minnorm::MinNormSolver;
pub use program::{LinearConstraint, MarginProgram};

use crate::{Point2, SeparationError, Vector3};

/// Default tolerance for post-solve constraint verification.
pub const MARGIN_TOLERANCE: f64 = 1e-6;

// ── Solver seam ─────────────────────────────────────────────────────────────

/// Outcome of one backend invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Optimal coefficients `(a, b, c)`.
    Optimal(Vector3),
    /// The constraint set admits no solution: the classes are not linearly
    /// separable.
    Infeasible,
    /// The backend could not settle the program either way.
    SolverError(String),
}

/// The one-operation solver contract the rest of the pipeline depends on.
pub trait ConvexSolver {
    /// Solve `program` to global optimality, or report why that is
    /// impossible.
    fn solve(&self, program: &MarginProgram) -> SolveOutcome;
}

// ── The separator ───────────────────────────────────────────────────────────

/// A separating line `a·y + b·x + c = 0` in image coordinates.
///
/// The y-coefficient comes first, matching row/column pixel addressing. Every
/// class-A point satisfies `a·y + b·x + c ≤ −1` and every class-B point
/// `≥ +1`, so the strip between the two margin lines (offsets `c∓1`) is
/// empty and `2/‖(a,b)‖` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separator {
    /// Coefficient of y (image row).
    pub a: f64,
    /// Coefficient of x (image column).
    pub b: f64,
    /// Constant offset.
    pub c: f64,
}

impl Separator {
    /// Signed evaluation `a·y + b·x + c`. Negative on the class-A side,
    /// positive on the class-B side.
    pub fn evaluate(&self, p: &Point2) -> f64 {
        self.a * p.y + self.b * p.x + self.c
    }

    /// Euclidean norm of the normal vector `(a, b)`.
    pub fn normal_norm(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Full width of the empty strip between the two margin lines.
    pub fn margin_width(&self) -> f64 {
        2.0 / self.normal_norm()
    }

    /// Perpendicular distance from `p` to the boundary line.
    pub fn distance_to_boundary(&self, p: &Point2) -> f64 {
        self.evaluate(p).abs() / self.normal_norm()
    }

    /// Row coordinate of the line at column `x`, with `offset` substituted
    /// for `c` (pass `self.c` for the boundary itself, `c ∓ 1` for the
    /// margin lines).
    ///
    /// Callers must check [`is_vertical`](Self::is_vertical) first; a
    /// vertical separator has `a ≈ 0` and no row for any column.
    pub fn row_at(&self, x: f64, offset: f64) -> f64 {
        -(self.b * x + offset) / self.a
    }

    /// True if the separator is vertical to within `ratio`, i.e.
    /// `|a| < ratio·‖(a,b)‖`. The test is relative to the normal's norm, so
    /// it is independent of the solution's overall scale.
    pub fn is_vertical(&self, ratio: f64) -> bool {
        self.a.abs() < ratio * self.normal_norm()
    }
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Solve for the maximum-margin separator with the default backend and
/// verification tolerance.
pub fn solve_separator(
    class_a: &[Point2],
    class_b: &[Point2],
) -> Result<Separator, SeparationError> {
    solve_separator_with(&MinNormSolver::default(), class_a, class_b, MARGIN_TOLERANCE)
}

/// Solve for the maximum-margin separator with an explicit backend.
///
/// On `Optimal`, every constraint of the program is re-checked against the
/// returned coefficients within `margin_tolerance`; a backend answer that
/// fails that check is reported as [`SeparationError::Solver`] rather than
/// passed through. `Infeasible` maps to [`SeparationError::Infeasible`]
/// ("no separating line exists"), never to a degenerate fallback line.
pub fn solve_separator_with(
    backend: &dyn ConvexSolver,
    class_a: &[Point2],
    class_b: &[Point2],
    margin_tolerance: f64,
) -> Result<Separator, SeparationError> {
    let program = MarginProgram::new(class_a, class_b)?;

    match backend.solve(&program) {
        SolveOutcome::Optimal(coeffs) => {
            let violation = program.max_violation(&coeffs);
            if violation > margin_tolerance {
                return Err(SeparationError::Solver(format!(
                    "returned coefficients violate the constraints by {violation:.3e} \
                     (tolerance {margin_tolerance:.1e})"
                )));
            }
            let separator = Separator {
                a: coeffs.x,
                b: coeffs.y,
                c: coeffs.z,
            };
            debug!(
                a = separator.a,
                b = separator.b,
                c = separator.c,
                margin_width = separator.margin_width(),
                "separator found"
            );
            Ok(separator)
        }
        SolveOutcome::Infeasible => Err(SeparationError::Infeasible),
        SolveOutcome::SolverError(message) => Err(SeparationError::Solver(message)),
    }
}
