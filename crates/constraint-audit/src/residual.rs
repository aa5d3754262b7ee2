use std::collections::HashMap;

use pad_types::{DimensionKind, Point2d, SketchConstraint, SketchDocument, SketchEntity};

/// Errors raised while expanding a document into equations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuditError {
    #[error("entity not found: {id}")]
    EntityNotFound { id: u32 },

    #[error("entity {id} is not the kind the constraint expects")]
    WrongKind { id: u32 },
}

/// Where a scalar equation row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    /// Arc well-formedness: start and end equidistant from the center.
    ArcGeometry { arc: u32 },
    /// Index into the document's constraint list.
    Constraint { index: u32 },
    /// A dimension driver, by dimension id.
    Dimension { id: u32 },
}

/// One scalar equation, evaluated at some configuration. Zero when
/// satisfied; signed so gradients stay non-degenerate at the solution.
#[derive(Debug, Clone, Copy)]
pub struct Row {
    pub source: RowSource,
    pub residual: f64,
}

/// Point positions the equations are evaluated against. Starts from the
/// document's stored positions; the Jacobian perturbs entries one at a time.
#[derive(Debug, Clone)]
pub(crate) struct PositionTable {
    points: HashMap<u32, Point2d>,
}

impl PositionTable {
    pub(crate) fn from_document(doc: &SketchDocument) -> Self {
        let mut points = HashMap::new();
        for entity in &doc.entities {
            if let SketchEntity::Point { id, x, y, .. } = entity {
                points.insert(*id, Point2d::new(*x, *y));
            }
        }
        Self { points }
    }

    pub(crate) fn get(&self, id: u32) -> Result<Point2d, AuditError> {
        self.points
            .get(&id)
            .copied()
            .ok_or(AuditError::EntityNotFound { id })
    }

    pub(crate) fn set(&mut self, id: u32, to: Point2d) {
        self.points.insert(id, to);
    }
}

/// Expand the document into its scalar equations, evaluated at the stored
/// positions. Row order is deterministic: arc geometry first (entity order),
/// then constraints, then dimensions.
pub fn equation_rows(doc: &SketchDocument) -> Result<Vec<Row>, AuditError> {
    let table = PositionTable::from_document(doc);
    rows_at(doc, &table)
}

pub(crate) fn rows_at(doc: &SketchDocument, table: &PositionTable) -> Result<Vec<Row>, AuditError> {
    let mut rows = Vec::new();

    for entity in &doc.entities {
        if let SketchEntity::Arc {
            id,
            center_id,
            start_id,
            end_id,
            ..
        } = entity
        {
            let c = table.get(*center_id)?;
            let s = table.get(*start_id)?;
            let e = table.get(*end_id)?;
            rows.push(Row {
                source: RowSource::ArcGeometry { arc: *id },
                residual: c.distance_to(&s) - c.distance_to(&e),
            });
        }
    }

    for (index, constraint) in doc.constraints.iter().enumerate() {
        let source = RowSource::Constraint {
            index: index as u32,
        };
        match constraint {
            SketchConstraint::Coincident { point_a, point_b } => {
                let a = table.get(*point_a)?;
                let b = table.get(*point_b)?;
                rows.push(Row {
                    source,
                    residual: a.x - b.x,
                });
                rows.push(Row {
                    source,
                    residual: a.y - b.y,
                });
            }
            SketchConstraint::Perpendicular { line_a, line_b } => {
                let (dax, day) = line_direction(doc, table, *line_a)?;
                let (dbx, dby) = line_direction(doc, table, *line_b)?;
                rows.push(Row {
                    source,
                    residual: dax * dbx + day * dby,
                });
            }
            SketchConstraint::Horizontal { line } => {
                let (start_id, end_id) = line_ids(doc, *line)?;
                let s = table.get(start_id)?;
                let e = table.get(end_id)?;
                rows.push(Row {
                    source,
                    residual: s.y - e.y,
                });
            }
            SketchConstraint::Tangent { arc, line } => {
                rows.push(Row {
                    source,
                    residual: tangent_residual(doc, table, *arc, *line)?,
                });
            }
            SketchConstraint::EqualRadius { arc_a, arc_b } => {
                rows.push(Row {
                    source,
                    residual: arc_radius(doc, table, *arc_a)? - arc_radius(doc, table, *arc_b)?,
                });
            }
            SketchConstraint::Midpoint { point, line } => {
                let p = table.get(*point)?;
                let (start_id, end_id) = line_ids(doc, *line)?;
                let s = table.get(start_id)?;
                let e = table.get(end_id)?;
                rows.push(Row {
                    source,
                    residual: p.x - (s.x + e.x) * 0.5,
                });
                rows.push(Row {
                    source,
                    residual: p.y - (s.y + e.y) * 0.5,
                });
            }
        }
    }

    for dim in &doc.dimensions {
        let source = RowSource::Dimension { id: dim.id };
        match &dim.kind {
            DimensionKind::AlignedDistance { point_a, point_b } => {
                let a = table.get(*point_a)?;
                let b = table.get(*point_b)?;
                rows.push(Row {
                    source,
                    residual: a.distance_to(&b) - dim.value,
                });
            }
            DimensionKind::Radial { arc } => {
                rows.push(Row {
                    source,
                    residual: arc_radius(doc, table, *arc)? - dim.value,
                });
            }
        }
    }

    Ok(rows)
}

fn line_ids(doc: &SketchDocument, id: u32) -> Result<(u32, u32), AuditError> {
    match doc.entity(id) {
        Some(SketchEntity::Line {
            start_id, end_id, ..
        }) => Ok((*start_id, *end_id)),
        Some(_) => Err(AuditError::WrongKind { id }),
        None => Err(AuditError::EntityNotFound { id }),
    }
}

fn arc_ids(doc: &SketchDocument, id: u32) -> Result<(u32, u32, u32), AuditError> {
    match doc.entity(id) {
        Some(SketchEntity::Arc {
            center_id,
            start_id,
            end_id,
            ..
        }) => Ok((*center_id, *start_id, *end_id)),
        Some(_) => Err(AuditError::WrongKind { id }),
        None => Err(AuditError::EntityNotFound { id }),
    }
}

fn line_direction(
    doc: &SketchDocument,
    table: &PositionTable,
    id: u32,
) -> Result<(f64, f64), AuditError> {
    let (start_id, end_id) = line_ids(doc, id)?;
    let s = table.get(start_id)?;
    let e = table.get(end_id)?;
    Ok((e.x - s.x, e.y - s.y))
}

fn arc_radius(doc: &SketchDocument, table: &PositionTable, id: u32) -> Result<f64, AuditError> {
    let (center_id, start_id, _) = arc_ids(doc, id)?;
    let c = table.get(center_id)?;
    let s = table.get(start_id)?;
    Ok(c.distance_to(&s))
}

/// Tangency between an arc and a line. When they share an endpoint the arc's
/// radius vector there must be perpendicular to the line; otherwise the
/// line's distance from the center must equal the radius.
fn tangent_residual(
    doc: &SketchDocument,
    table: &PositionTable,
    arc: u32,
    line: u32,
) -> Result<f64, AuditError> {
    let (center_id, arc_start, arc_end) = arc_ids(doc, arc)?;
    let (line_start, line_end) = line_ids(doc, line)?;
    let c = table.get(center_id)?;
    let (dx, dy) = line_direction(doc, table, line)?;

    let shared = [arc_start, arc_end]
        .into_iter()
        .find(|id| *id == line_start || *id == line_end);
    if let Some(id) = shared {
        let p = table.get(id)?;
        return Ok(dx * (p.x - c.x) + dy * (p.y - c.y));
    }

    let s = table.get(line_start)?;
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-15 {
        return Ok(arc_radius(doc, table, arc)?);
    }
    let dist = ((c.x - s.x) * dy - (c.y - s.y) * dx).abs() / len;
    Ok(dist - arc_radius(doc, table, arc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_types::Dimension;

    fn doc_with(entities: Vec<SketchEntity>) -> SketchDocument {
        let mut doc = SketchDocument::new();
        doc.entities = entities;
        doc
    }

    fn point(id: u32, x: f64, y: f64) -> SketchEntity {
        SketchEntity::Point {
            id,
            x,
            y,
            construction: false,
        }
    }

    fn line(id: u32, start_id: u32, end_id: u32) -> SketchEntity {
        SketchEntity::Line {
            id,
            start_id,
            end_id,
            construction: false,
        }
    }

    #[test]
    fn perpendicular_residual_is_signed_dot_product() {
        let mut doc = doc_with(vec![
            point(1, 0.0, 0.0),
            point(2, 2.0, 0.0),
            point(3, 0.0, 0.0),
            point(4, 1.0, 3.0),
            line(5, 1, 2),
            line(6, 3, 4),
        ]);
        doc.constraints.push(SketchConstraint::Perpendicular {
            line_a: 5,
            line_b: 6,
        });
        let rows = equation_rows(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        // dot((2,0), (1,3)) = 2
        assert!((rows[0].residual - 2.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_expands_to_two_rows() {
        let mut doc = doc_with(vec![
            point(1, 0.0, 0.0),
            point(2, 4.0, 0.0),
            point(3, 2.5, 1.0),
            line(4, 1, 2),
        ]);
        doc.constraints
            .push(SketchConstraint::Midpoint { point: 3, line: 4 });
        let rows = equation_rows(&doc).unwrap();
        assert_eq!(rows.len(), 2);
        assert!((rows[0].residual - 0.5).abs() < 1e-12);
        assert!((rows[1].residual - 1.0).abs() < 1e-12);
    }

    #[test]
    fn arc_row_vanishes_for_well_formed_arc() {
        let doc = doc_with(vec![
            point(1, 0.0, 0.0),
            point(2, 1.0, 0.0),
            point(3, 0.0, 1.0),
            SketchEntity::Arc {
                id: 4,
                center_id: 1,
                start_id: 2,
                end_id: 3,
                construction: false,
            },
        ]);
        let rows = equation_rows(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0].source, RowSource::ArcGeometry { arc: 4 }));
        assert!(rows[0].residual.abs() < 1e-12);
    }

    #[test]
    fn shared_endpoint_tangency_detects_non_perpendicular_radius() {
        // Arc centered at origin ending at (1, 0); line continues from there
        // at 45 degrees instead of vertically.
        let mut doc = doc_with(vec![
            point(1, 0.0, 0.0),
            point(2, 1.0, 0.0),
            point(3, 0.0, 1.0),
            point(4, 2.0, 1.0),
            SketchEntity::Arc {
                id: 5,
                center_id: 1,
                start_id: 3,
                end_id: 2,
                construction: false,
            },
            line(6, 2, 4),
        ]);
        doc.constraints
            .push(SketchConstraint::Tangent { arc: 5, line: 6 });
        let rows = equation_rows(&doc).unwrap();
        let tangent = rows
            .iter()
            .find(|r| matches!(r.source, RowSource::Constraint { .. }))
            .unwrap();
        // dir (1,1), radial (1,0): dot = 1, clearly violated.
        assert!((tangent.residual - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dimension_rows_compare_measurement_to_value() {
        let mut doc = doc_with(vec![point(1, 0.0, 0.0), point(2, 3.0, 4.0)]);
        doc.dimensions.push(Dimension {
            id: 1,
            name: "d1".to_string(),
            kind: DimensionKind::AlignedDistance {
                point_a: 1,
                point_b: 2,
            },
            value: 6.0,
            anchor: Point2d::ORIGIN,
        });
        let rows = equation_rows(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].residual + 1.0).abs() < 1e-12);
    }

    #[test]
    fn dangling_reference_is_an_error() {
        let mut doc = doc_with(vec![point(1, 0.0, 0.0)]);
        doc.constraints.push(SketchConstraint::Coincident {
            point_a: 1,
            point_b: 99,
        });
        assert!(matches!(
            equation_rows(&doc),
            Err(AuditError::EntityNotFound { id: 99 })
        ));
    }
}
