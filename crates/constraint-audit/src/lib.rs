//! Constraint audit for sketch documents.
//!
//! This crate evaluates, it never solves: given a `SketchDocument` whose
//! positions are already at (or near) a solution, it answers whether the
//! constraint system is satisfied, how many degrees of freedom remain, and
//! whether any equations are conflicting or linearly dependent. Degrees of
//! freedom come from the numerical rank of the constraint Jacobian, not from
//! counting constraints, so redundant emissions are detected rather than
//! miscounted.

pub mod dof;
pub mod graph;
pub mod residual;

pub use dof::{audit, AuditReport};
pub use graph::{equal_radius_classes, extract_loops};
pub use residual::{equation_rows, AuditError, Row, RowSource};

/// Numeric tolerances used by the audit.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Equations with |residual| above this are violated.
    pub residual: f64,
    /// Singular values above this count toward the Jacobian rank.
    pub rank: f64,
    /// Central finite-difference step for the Jacobian.
    pub fd_step: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            residual: 1e-7,
            rank: 1e-6,
            fd_step: 1e-8,
        }
    }
}
