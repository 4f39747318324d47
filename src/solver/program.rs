//! Formulation of the hard-margin program.
//!
//! The decision variable is `x = (a, b, c)`. Each sample point contributes
//! one linear inequality, materialized here in `row·x ≤ rhs` form:
//!
//! - class A, point `(px, py)`:  `( py,  px,  1)·x ≤ −1`
//! - class B, point `(px, py)`:  `(−py, −px, −1)·x ≤ −1`
//!
//! The objective minimizes `a² + b²` (the quadratic form `xᵀ·diag(1,1,0)·x`),
//! which maximizes the margin width `2/‖(a,b)‖`.

use nalgebra::Matrix3;

use crate::{ClassLabel, Point2, SeparationError, Vector3};

/// One linear inequality `row·x ≤ rhs` over the variables `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConstraint {
    pub row: Vector3,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Signed violation of this constraint at `x`: positive means violated.
    pub fn violation(&self, x: &Vector3) -> f64 {
        self.row.dot(x) - self.rhs
    }
}

/// The max-margin program posed over two labeled point sets.
///
/// Construction rejects empty classes: with no sample on one side the
/// program has nothing to separate, which is an extraction failure rather
/// than an infeasibility.
#[derive(Debug, Clone)]
pub struct MarginProgram {
    class_a: Vec<Point2>,
    class_b: Vec<Point2>,
}

impl MarginProgram {
    pub fn new(class_a: &[Point2], class_b: &[Point2]) -> Result<Self, SeparationError> {
        if class_a.is_empty() {
            return Err(SeparationError::EmptyClass {
                class: ClassLabel::A,
            });
        }
        if class_b.is_empty() {
            return Err(SeparationError::EmptyClass {
                class: ClassLabel::B,
            });
        }
        Ok(Self {
            class_a: class_a.to_vec(),
            class_b: class_b.to_vec(),
        })
    }

    /// Points required to satisfy `a·y + b·x + c ≤ −1`.
    pub fn class_a(&self) -> &[Point2] {
        &self.class_a
    }

    /// Points required to satisfy `a·y + b·x + c ≥ +1`.
    pub fn class_b(&self) -> &[Point2] {
        &self.class_b
    }

    /// Quadratic form of the objective `minimize xᵀ·Q·x`.
    pub fn objective(&self) -> Matrix3<f64> {
        Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, 0.0))
    }

    /// All constraint rows, class A first, in input order.
    pub fn constraints(&self) -> Vec<LinearConstraint> {
        let a_rows = self.class_a.iter().map(|p| LinearConstraint {
            row: Vector3::new(p.y, p.x, 1.0),
            rhs: -1.0,
        });
        let b_rows = self.class_b.iter().map(|p| LinearConstraint {
            row: Vector3::new(-p.y, -p.x, -1.0),
            rhs: -1.0,
        });
        a_rows.chain(b_rows).collect()
    }

    /// Largest constraint violation of candidate coefficients `x = (a, b, c)`.
    /// Non-positive means every inequality holds.
    pub fn max_violation(&self, x: &Vector3) -> f64 {
        self.constraints()
            .iter()
            .map(|c| c.violation(x))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_classes_are_rejected_at_construction() {
        let p = vec![Point2::new(1.0, 2.0)];
        assert!(matches!(
            MarginProgram::new(&[], &p),
            Err(SeparationError::EmptyClass {
                class: ClassLabel::A
            })
        ));
        assert!(matches!(
            MarginProgram::new(&p, &[]),
            Err(SeparationError::EmptyClass {
                class: ClassLabel::B
            })
        ));
    }

    #[test]
    fn one_constraint_per_point() {
        let a = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let b = vec![Point2::new(9.0, 9.0)];
        let program = MarginProgram::new(&a, &b).unwrap();
        assert_eq!(program.constraints().len(), 3);
    }

    #[test]
    fn objective_scores_only_the_normal() {
        let a = vec![Point2::new(0.0, 0.0)];
        let b = vec![Point2::new(4.0, 0.0)];
        let program = MarginProgram::new(&a, &b).unwrap();

        let x = Vector3::new(3.0, 4.0, 100.0);
        let q = program.objective();
        // xᵀ·Q·x = a² + b²; the offset c is free.
        assert!(((x.transpose() * q * x)[(0, 0)] - 25.0).abs() < 1e-12);
    }

    #[test]
    fn violation_is_signed() {
        // Separator y = 5 with unit margins: a = 1, b = 0, c = -5.
        let a = vec![Point2::new(0.0, 3.0)];
        let b = vec![Point2::new(0.0, 7.0)];
        let program = MarginProgram::new(&a, &b).unwrap();
        let x = Vector3::new(1.0, 0.0, -5.0);

        // A at y = 3: 3 - 5 = -2 ≤ -1 holds with slack 1.
        // B at y = 7: 7 - 5 = +2 ≥ +1 holds with slack 1.
        assert!((program.max_violation(&x) - (-1.0)).abs() < 1e-12);

        // Shrinking the margin below the samples violates the rows.
        let bad = Vector3::new(1.0, 0.0, 0.0);
        assert!(program.max_violation(&bad) > 0.0);
    }
}
