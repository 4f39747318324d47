//! Minimum-norm-point backend for the hard-margin program.
//!
//! The program's dual is classical geometry: the widest margin between two
//! linearly separable sets is the gap between their convex hulls, and the
//! optimal normal is the segment connecting the closest pair of hull points
//! `u* ∈ conv(A)`, `v* ∈ conv(B)`. Equivalently, `z* = v* − u*` is the
//! minimum-norm point of the Minkowski difference `conv(B) ⊖ conv(A)`.
//!
//! The backend finds `z*` with Gilbert's iteration: at each step the support
//! pair most opposed to the current `z` is located (one scan per class) and
//! `z` is moved toward it with an exact line search. Each step keeps `u` and
//! `v` inside their hulls as explicit convex combinations, so the final pair
//! maps straight back to the primal optimum:
//!
//! ```text
//! (b, a) = 2·z*/‖z*‖²          (normal, x then y component)
//! c      = −(a·my + b·mx)       with (mx, my) = (u* + v*)/2
//! ```
//!
//! which places the margin lines exactly through `u*` and `v*`. When the
//! hulls touch or overlap, `‖z‖` is driven toward zero and the program is
//! reported infeasible.

use tracing::debug;

use super::program::MarginProgram;
use super::{ConvexSolver, SolveOutcome};
use crate::{Vector2, Vector3};

/// Shipped [`ConvexSolver`] backend.
#[derive(Debug, Clone)]
pub struct MinNormSolver {
    /// Iteration cap; exceeding it is a solver error, not an answer.
    /// Default: 100_000
    pub max_iterations: usize,
    /// Convergence test on the relative duality gap
    /// `(‖z‖² − z·s) / ‖z‖²` at the current support point `s`.
    /// Default: 1e-12
    pub gap_tolerance: f64,
    /// `‖z‖` below this is treated as touching hulls, i.e. no strictly
    /// separating line exists. Measured in the same units as the input
    /// coordinates (pixels).
    /// Default: 1e-7
    pub feasibility_tolerance: f64,
}

impl Default for MinNormSolver {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            gap_tolerance: 1e-12,
            feasibility_tolerance: 1e-7,
        }
    }
}

impl ConvexSolver for MinNormSolver {
    fn solve(&self, program: &MarginProgram) -> SolveOutcome {
        let class_a: Vec<Vector2> = program.class_a().iter().map(|p| p.coords).collect();
        let class_b: Vec<Vector2> = program.class_b().iter().map(|p| p.coords).collect();

        // Current hull points; z = v − u is the candidate normal segment.
        let mut u = class_a[0];
        let mut v = class_b[0];
        let mut z = v - u;

        if z.norm() <= self.feasibility_tolerance {
            return SolveOutcome::Infeasible;
        }

        let mut converged = false;
        let mut iterations = 0usize;

        for iter in 0..self.max_iterations {
            iterations = iter + 1;

            // Support pair most opposed to z: the class-A point furthest
            // along z and the class-B point least far along z.
            let sa = *support_max(&class_a, &z);
            let sb = *support_min(&class_b, &z);
            let s = sb - sa;

            let zz = z.norm_squared();
            let gap = zz - z.dot(&s);
            if gap <= self.gap_tolerance * zz {
                converged = true;
                break;
            }

            // Exact line search toward the support pair. gap > 0 guarantees
            // progress (t > 0); t caps at 1 when the support pair itself is
            // the minimizer.
            let d = s - z;
            let dd = d.norm_squared();
            if dd == 0.0 {
                converged = true;
                break;
            }
            let t = (gap / dd).min(1.0);

            u += t * (sa - u);
            v += t * (sb - v);
            z = v - u;

            if z.norm() <= self.feasibility_tolerance {
                return SolveOutcome::Infeasible;
            }
        }

        if !converged {
            return SolveOutcome::SolverError(format!(
                "no convergence after {} iterations (‖z‖ = {:.3e})",
                self.max_iterations,
                z.norm()
            ));
        }

        debug!(iterations, gap_px = z.norm(), "minimum-norm point located");

        // Map the dual optimum back to line coefficients. The normal acts on
        // (x, y); the separator stores the y-coefficient first.
        let w = 2.0 * z / z.norm_squared();
        let mid = (u + v) * 0.5;
        let c = -w.dot(&mid);
        SolveOutcome::Optimal(Vector3::new(w.y, w.x, c))
    }
}

fn support_max<'a>(points: &'a [Vector2], direction: &Vector2) -> &'a Vector2 {
    points
        .iter()
        .max_by(|p, q| {
            p.dot(direction)
                .partial_cmp(&q.dot(direction))
                .expect("point coordinates are finite")
        })
        .expect("class is non-empty by construction")
}

fn support_min<'a>(points: &'a [Vector2], direction: &Vector2) -> &'a Vector2 {
    points
        .iter()
        .min_by(|p, q| {
            p.dot(direction)
                .partial_cmp(&q.dot(direction))
                .expect("point coordinates are finite")
        })
        .expect("class is non-empty by construction")
}
