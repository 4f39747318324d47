//! Error taxonomy for the separation pipeline.
//!
//! Each failure names the stage that can no longer proceed. None of these are
//! transient: an empty class means the extraction found nothing, and the
//! geometric conditions are properties of the current point sets.

use std::fmt;

use thiserror::Error;

/// Which of the two input classes a condition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLabel {
    A,
    B,
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Fatal conditions raised by the separation pipeline.
#[derive(Debug, Clone, Error)]
pub enum SeparationError {
    /// A class produced no points, so no separator can be posed. Reported
    /// distinctly from [`Infeasible`](Self::Infeasible): this is an upstream
    /// extraction problem (wrong channel, wrong threshold), not a geometric
    /// one.
    #[error("class {class} produced no points; check the channel selection and threshold")]
    EmptyClass { class: ClassLabel },

    /// The two point sets are not linearly separable: no separating line
    /// exists.
    #[error("the point sets are not linearly separable; no separating line exists")]
    Infeasible,

    /// The separator is vertical (y-coefficient ≈ 0), so the overlay's
    /// column-to-row line evaluation `y = -(b·x + c)/a` is undefined.
    #[error("separator is vertical (y-coefficient a = {a:.3e}); the overlay cannot evaluate it")]
    DegenerateBoundary { a: f64 },

    /// The solver backend failed to produce a usable answer (iteration cap
    /// reached, or a returned optimum violated the constraints it was solved
    /// under).
    #[error("solver failed: {0}")]
    Solver(String),
}
