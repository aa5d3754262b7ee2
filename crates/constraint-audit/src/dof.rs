use nalgebra::DMatrix;
use serde::Serialize;
use tracing::debug;

use pad_types::{ConstraintStatus, Point2d, SketchDocument, SketchEntity};

use crate::residual::{rows_at, AuditError, PositionTable};
use crate::Tolerance;

/// Outcome of a full constraint audit.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub status: ConstraintStatus,
    /// Points whose positions the constraint system may move (anchored
    /// points excluded).
    pub free_points: usize,
    /// 2 * free_points.
    pub free_params: usize,
    /// Scalar equations expanded from the document.
    pub equations: usize,
    /// Numerical rank of the constraint Jacobian.
    pub rank: usize,
    pub max_residual: f64,
}

/// Audit a document: check every equation at the stored positions, then
/// measure remaining degrees of freedom as free parameters minus Jacobian
/// rank. `anchored` lists point ids held fixed from outside the constraint
/// system (typically the user-selected center).
///
/// Conflicts are reported as indices into the audit's equation list (the
/// order `equation_rows` produces).
pub fn audit(
    doc: &SketchDocument,
    anchored: &[u32],
    tol: &Tolerance,
) -> Result<AuditReport, AuditError> {
    let free: Vec<u32> = doc
        .entities
        .iter()
        .filter_map(|e| match e {
            SketchEntity::Point { id, .. } if !anchored.contains(id) => Some(*id),
            _ => None,
        })
        .collect();

    let mut table = PositionTable::from_document(doc);
    let base = rows_at(doc, &table)?;
    let equations = base.len();
    let free_params = free.len() * 2;

    let mut max_residual = 0.0_f64;
    let mut conflicts = Vec::new();
    for (i, row) in base.iter().enumerate() {
        max_residual = max_residual.max(row.residual.abs());
        if row.residual.abs() > tol.residual {
            conflicts.push(i as u32);
        }
    }

    let rank = if equations == 0 || free_params == 0 {
        0
    } else {
        let mut jacobian = DMatrix::<f64>::zeros(equations, free_params);
        let h = tol.fd_step;
        for (j, id) in free.iter().enumerate() {
            let origin = table.get(*id)?;
            for axis in 0..2 {
                let (dx, dy) = if axis == 0 { (h, 0.0) } else { (0.0, h) };
                table.set(*id, Point2d::new(origin.x + dx, origin.y + dy));
                let plus = rows_at(doc, &table)?;
                table.set(*id, Point2d::new(origin.x - dx, origin.y - dy));
                let minus = rows_at(doc, &table)?;
                table.set(*id, origin);
                for i in 0..equations {
                    jacobian[(i, j * 2 + axis)] =
                        (plus[i].residual - minus[i].residual) / (2.0 * h);
                }
            }
        }
        jacobian.svd(false, false).rank(tol.rank)
    };

    let dof = free_params - rank;
    debug!(equations, free_params, rank, dof, max_residual, "constraint audit");

    let status = if !conflicts.is_empty() {
        ConstraintStatus::OverConstrained { conflicts }
    } else if dof > 0 {
        ConstraintStatus::UnderConstrained { dof: dof as u32 }
    } else if equations > rank {
        ConstraintStatus::Redundant {
            dependent: (equations - rank) as u32,
        }
    } else {
        ConstraintStatus::FullyConstrained
    };

    Ok(AuditReport {
        status,
        free_points: free.len(),
        free_params,
        equations,
        rank,
        max_residual,
    })
}
