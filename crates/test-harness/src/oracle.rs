//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets callers collect all failures in one pass.

use constraint_audit::{audit, equal_radius_classes, extract_loops, Tolerance};
use pad_types::{ConstraintStatus, Point2d, SketchDocument, SketchEntity};
use serde::Serialize;

/// How far the midline midpoint may drift from the center point.
const CENTERING_TOL: f64 = 1e-9;

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Census Oracles ──────────────────────────────────────────────────────────

/// Check exact entity counts: profile lines, fillet arcs, construction.
pub fn check_entity_census(
    doc: &SketchDocument,
    expected_lines: usize,
    expected_arcs: usize,
    expected_construction: usize,
) -> OracleVerdict {
    let lines = doc
        .entities
        .iter()
        .filter(|e| matches!(e, SketchEntity::Line { .. }) && !e.is_construction())
        .count();
    let arcs = doc
        .entities
        .iter()
        .filter(|e| matches!(e, SketchEntity::Arc { .. }))
        .count();
    let construction = doc.entities.iter().filter(|e| e.is_construction()).count();

    if lines == expected_lines && arcs == expected_arcs && construction == expected_construction {
        OracleVerdict::pass(
            "entity_census",
            format!(
                "lines={} arcs={} construction={}",
                lines, arcs, construction
            ),
        )
    } else {
        OracleVerdict::fail(
            "entity_census",
            format!(
                "expected lines={} arcs={} construction={}, got lines={} arcs={} construction={}",
                expected_lines, expected_arcs, expected_construction, lines, arcs, construction
            ),
        )
    }
}

/// Check that the profile edges form exactly one closed outer loop.
pub fn check_closed_loop(doc: &SketchDocument, expected_len: usize) -> OracleVerdict {
    let loops = extract_loops(doc);
    match loops.as_slice() {
        [only] if only.entity_ids.len() == expected_len && only.is_outer => OracleVerdict::pass_val(
            "closed_loop",
            format!("one outer loop of {} entities", expected_len),
            expected_len as f64,
        ),
        [only] => OracleVerdict::fail_val(
            "closed_loop",
            format!(
                "loop has {} entities (expected {}), is_outer={}",
                only.entity_ids.len(),
                expected_len,
                only.is_outer
            ),
            only.entity_ids.len() as f64,
        ),
        _ => OracleVerdict::fail(
            "closed_loop",
            format!("expected one loop, found {}", loops.len()),
        ),
    }
}

// ── Constraint Oracles ──────────────────────────────────────────────────────

/// Check that the audit leaves zero degrees of freedom.
pub fn check_fully_constrained(
    doc: &SketchDocument,
    anchored: &[u32],
    tol: &Tolerance,
) -> OracleVerdict {
    let report = match audit(doc, anchored, tol) {
        Ok(report) => report,
        Err(e) => return OracleVerdict::fail("fully_constrained", format!("audit failed: {e}")),
    };
    match report.status {
        ConstraintStatus::FullyConstrained => OracleVerdict::pass_val(
            "fully_constrained",
            format!(
                "{} equations, rank {}, 0 dof",
                report.equations, report.rank
            ),
            0.0,
        ),
        ConstraintStatus::UnderConstrained { dof } => OracleVerdict::fail_val(
            "fully_constrained",
            format!(
                "{} degrees of freedom remain ({} equations, rank {})",
                dof, report.equations, report.rank
            ),
            dof as f64,
        ),
        ConstraintStatus::OverConstrained { ref conflicts } => OracleVerdict::fail(
            "fully_constrained",
            format!(
                "{} conflicting equations at rows {:?}, max residual {:.3e}",
                conflicts.len(),
                conflicts,
                report.max_residual
            ),
        ),
        ConstraintStatus::Redundant { dependent } => OracleVerdict::fail_val(
            "fully_constrained",
            format!(
                "{} dependent equations ({} equations, rank {})",
                dependent, report.equations, report.rank
            ),
            dependent as f64,
        ),
    }
}

/// Check that every fillet arc belongs to a single equal-radius class.
pub fn check_equal_radius_class(doc: &SketchDocument) -> OracleVerdict {
    let arc_count = doc
        .entities
        .iter()
        .filter(|e| matches!(e, SketchEntity::Arc { .. }))
        .count();
    let classes = equal_radius_classes(doc);
    match classes.as_slice() {
        [only] if only.len() == arc_count => OracleVerdict::pass(
            "equal_radius_class",
            format!("all {} fillets share one radius class", arc_count),
        ),
        _ => OracleVerdict::fail(
            "equal_radius_class",
            format!(
                "expected one class of {} arcs, got {:?}",
                arc_count, classes
            ),
        ),
    }
}

/// Check that the construction midline's midpoint sits on the center point.
pub fn check_centering(doc: &SketchDocument, center_id: u32) -> OracleVerdict {
    let midline = doc.entities.iter().find_map(|e| match e {
        SketchEntity::Line {
            id,
            start_id,
            end_id,
            construction: true,
        } => Some((*id, *start_id, *end_id)),
        _ => None,
    });
    let Some((line_id, start_id, end_id)) = midline else {
        return OracleVerdict::fail("centering", "no construction midline found".to_string());
    };
    let (Some(center), Some(start), Some(end)) = (
        doc.point_position(center_id),
        doc.point_position(start_id),
        doc.point_position(end_id),
    ) else {
        return OracleVerdict::fail(
            "centering",
            format!("midline {} or center {} has missing points", line_id, center_id),
        );
    };

    let midpoint = Point2d::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    let gap = midpoint.distance_to(&center);
    if gap <= CENTERING_TOL {
        OracleVerdict::pass_val(
            "centering",
            format!("midline {} midpoint is {:.2e} from center", line_id, gap),
            gap,
        )
    } else {
        OracleVerdict::fail_val(
            "centering",
            format!(
                "midline {} midpoint is {:.2e} from center (tol {:.0e})",
                line_id, gap, CENTERING_TOL
            ),
            gap,
        )
    }
}

// ── Composite ───────────────────────────────────────────────────────────────

/// Run every check a freshly placed pad must satisfy.
pub fn run_all_profile_checks(doc: &SketchDocument, center_id: u32) -> Vec<OracleVerdict> {
    vec![
        check_entity_census(doc, 4, 4, 1),
        check_closed_loop(doc, 8),
        check_fully_constrained(doc, &[center_id], &Tolerance::default()),
        check_equal_radius_class(doc),
        check_centering(doc, center_id),
    ]
}
