use pad_types::{Dimension, DimensionKind, Point2d, SketchConstraint, SketchDocument, SketchEntity};

use crate::traits::SketchSurface;
use crate::types::{
    ArcHandle, ConstraintHandle, DimensionHandle, LineHandle, PointHandle, SurfaceError,
};

/// Two positions closer than this are the same corner.
const COINCIDENCE_TOL: f64 = 1e-7;

/// In-memory sketch surface. Records every operation into a
/// `SketchDocument` and computes real fillet tangent geometry, so documents
/// it produces are already at the solved configuration.
///
/// Deterministic: entity ids and dimension names are allocated in call
/// order, so identical call sequences produce identical documents (modulo
/// the document uuid).
#[derive(Debug, Clone)]
pub struct PlanarSketch {
    doc: SketchDocument,
    next_entity: u32,
    next_dimension: u32,
}

impl PlanarSketch {
    pub fn new() -> Self {
        Self {
            doc: SketchDocument::new(),
            next_entity: 1,
            next_dimension: 1,
        }
    }

    pub fn document(&self) -> &SketchDocument {
        &self.doc
    }

    pub fn into_document(self) -> SketchDocument {
        self.doc
    }

    /// Rigidly translate every point and dimension anchor. This is the
    /// simulated outcome of dragging the anchor point and letting the host
    /// re-solve: the constraint set is translation-invariant, so the
    /// translated configuration is the solved one.
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        for entity in &mut self.doc.entities {
            if let SketchEntity::Point { x, y, .. } = entity {
                *x += dx;
                *y += dy;
            }
        }
        for dim in &mut self.doc.dimensions {
            dim.anchor = dim.anchor.translated(dx, dy);
        }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_entity;
        self.next_entity += 1;
        id
    }

    fn new_point(&mut self, at: Point2d, construction: bool) -> u32 {
        let id = self.alloc_id();
        self.doc.entities.push(SketchEntity::Point {
            id,
            x: at.x,
            y: at.y,
            construction,
        });
        id
    }

    fn position(&self, id: u32) -> Result<Point2d, SurfaceError> {
        self.doc
            .point_position(id)
            .ok_or(SurfaceError::EntityNotFound { id })
    }

    fn endpoints(&self, line: LineHandle) -> Result<(u32, u32), SurfaceError> {
        self.doc
            .line_endpoints(line.0)
            .ok_or(SurfaceError::EntityNotFound { id: line.0 })
    }

    fn require_arc(&self, arc: ArcHandle) -> Result<(), SurfaceError> {
        self.doc
            .arc_points(arc.0)
            .map(|_| ())
            .ok_or(SurfaceError::EntityNotFound { id: arc.0 })
    }

    fn push_constraint(&mut self, constraint: SketchConstraint) -> ConstraintHandle {
        self.doc.constraints.push(constraint);
        ConstraintHandle(self.doc.constraints.len() as u32 - 1)
    }

    fn push_dimension(&mut self, kind: DimensionKind, value: f64, anchor: Point2d) -> DimensionHandle {
        let id = self.next_dimension;
        self.next_dimension += 1;
        self.doc.dimensions.push(Dimension {
            id,
            name: format!("d{}", id),
            kind,
            value,
            anchor,
        });
        DimensionHandle(id)
    }
}

impl Default for PlanarSketch {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchSurface for PlanarSketch {
    fn add_point(&mut self, at: Point2d) -> Result<PointHandle, SurfaceError> {
        Ok(PointHandle(self.new_point(at, false)))
    }

    fn add_line(&mut self, start: Point2d, end: Point2d) -> Result<LineHandle, SurfaceError> {
        let start_id = self.new_point(start, false);
        let end_id = self.new_point(end, false);
        let id = self.alloc_id();
        self.doc.entities.push(SketchEntity::Line {
            id,
            start_id,
            end_id,
            construction: false,
        });
        Ok(LineHandle(id))
    }

    fn mark_construction(&mut self, line: LineHandle) -> Result<(), SurfaceError> {
        for entity in &mut self.doc.entities {
            if let SketchEntity::Line {
                id, construction, ..
            } = entity
            {
                if *id == line.0 {
                    *construction = true;
                    return Ok(());
                }
            }
        }
        Err(SurfaceError::EntityNotFound { id: line.0 })
    }

    fn add_fillet(
        &mut self,
        line_a: LineHandle,
        line_b: LineHandle,
        radius: f64,
    ) -> Result<ArcHandle, SurfaceError> {
        if radius <= 0.0 {
            return Err(SurfaceError::FilletFailed {
                reason: format!("radius must be positive, got {}", radius),
            });
        }

        let (a_start, a_end) = self.endpoints(line_a)?;
        let (b_start, b_end) = self.endpoints(line_b)?;

        let corner = self.position(a_end)?;
        let b_corner = self.position(b_start)?;
        let gap = corner.distance_to(&b_corner);
        if gap > COINCIDENCE_TOL {
            return Err(SurfaceError::EdgesDoNotMeet {
                line_a: line_a.0,
                line_b: line_b.0,
                gap,
            });
        }

        let a_far = self.position(a_start)?;
        let b_far = self.position(b_end)?;
        let len_a = a_far.distance_to(&corner);
        let len_b = b_far.distance_to(&corner);
        if len_a < COINCIDENCE_TOL || len_b < COINCIDENCE_TOL {
            return Err(SurfaceError::FilletFailed {
                reason: "cannot fillet a zero-length edge".to_string(),
            });
        }

        // Unit directions along each edge, away from the shared corner.
        let da = ((a_far.x - corner.x) / len_a, (a_far.y - corner.y) / len_a);
        let db = ((b_far.x - corner.x) / len_b, (b_far.y - corner.y) / len_b);

        let cos_full = (da.0 * db.0 + da.1 * db.1).clamp(-1.0, 1.0);
        if cos_full >= 1.0 - 1e-9 {
            return Err(SurfaceError::FilletFailed {
                reason: "edges fold back on each other at the corner".to_string(),
            });
        }
        if cos_full <= -1.0 + 1e-9 {
            return Err(SurfaceError::FilletFailed {
                reason: "edges are collinear across the corner".to_string(),
            });
        }

        // Tangent points sit radius/tan(θ/2) from the corner along each edge;
        // the arc center sits radius/sin(θ/2) along the corner bisector.
        let half = cos_full.acos() * 0.5;
        let (sin_half, cos_half) = half.sin_cos();
        let trim = radius * cos_half / sin_half;
        let center_dist = radius / sin_half;

        if trim > len_a + COINCIDENCE_TOL || trim > len_b + COINCIDENCE_TOL {
            return Err(SurfaceError::FilletFailed {
                reason: format!(
                    "radius {} trims {:.6} but edges have only {:.6} and {:.6} left",
                    radius, trim, len_a, len_b
                ),
            });
        }

        let bis = (da.0 + db.0, da.1 + db.1);
        let bis_len = (bis.0 * bis.0 + bis.1 * bis.1).sqrt();
        let center = Point2d::new(
            corner.x + bis.0 / bis_len * center_dist,
            corner.y + bis.1 / bis_len * center_dist,
        );
        let tangent_a = Point2d::new(corner.x + da.0 * trim, corner.y + da.1 * trim);
        let tangent_b = Point2d::new(corner.x + db.0 * trim, corner.y + db.1 * trim);

        // Trim both edges to the tangent points. The arc adopts the trimmed
        // endpoints, which is what closes the loop without extra coincidence.
        self.doc.set_point_position(a_end, tangent_a);
        self.doc.set_point_position(b_start, tangent_b);

        let center_id = self.new_point(center, false);
        let id = self.alloc_id();
        self.doc.entities.push(SketchEntity::Arc {
            id,
            center_id,
            start_id: a_end,
            end_id: b_start,
            construction: false,
        });
        self.doc.constraints.push(SketchConstraint::Tangent {
            arc: id,
            line: line_a.0,
        });
        self.doc.constraints.push(SketchConstraint::Tangent {
            arc: id,
            line: line_b.0,
        });
        Ok(ArcHandle(id))
    }

    fn add_perpendicular(
        &mut self,
        line_a: LineHandle,
        line_b: LineHandle,
    ) -> Result<ConstraintHandle, SurfaceError> {
        self.endpoints(line_a)?;
        self.endpoints(line_b)?;
        Ok(self.push_constraint(SketchConstraint::Perpendicular {
            line_a: line_a.0,
            line_b: line_b.0,
        }))
    }

    fn add_horizontal(&mut self, line: LineHandle) -> Result<ConstraintHandle, SurfaceError> {
        self.endpoints(line)?;
        Ok(self.push_constraint(SketchConstraint::Horizontal { line: line.0 }))
    }

    fn add_equal_radius(
        &mut self,
        arc_a: ArcHandle,
        arc_b: ArcHandle,
    ) -> Result<ConstraintHandle, SurfaceError> {
        self.require_arc(arc_a)?;
        self.require_arc(arc_b)?;
        Ok(self.push_constraint(SketchConstraint::EqualRadius {
            arc_a: arc_a.0,
            arc_b: arc_b.0,
        }))
    }

    fn add_coincident(
        &mut self,
        point_a: PointHandle,
        point_b: PointHandle,
    ) -> Result<ConstraintHandle, SurfaceError> {
        self.position(point_a.0)?;
        self.position(point_b.0)?;
        Ok(self.push_constraint(SketchConstraint::Coincident {
            point_a: point_a.0,
            point_b: point_b.0,
        }))
    }

    fn add_midpoint(
        &mut self,
        point: PointHandle,
        line: LineHandle,
    ) -> Result<ConstraintHandle, SurfaceError> {
        self.position(point.0)?;
        self.endpoints(line)?;
        Ok(self.push_constraint(SketchConstraint::Midpoint {
            point: point.0,
            line: line.0,
        }))
    }

    fn add_distance_dimension(
        &mut self,
        point_a: PointHandle,
        point_b: PointHandle,
        anchor: Point2d,
    ) -> Result<DimensionHandle, SurfaceError> {
        let a = self.position(point_a.0)?;
        let b = self.position(point_b.0)?;
        Ok(self.push_dimension(
            DimensionKind::AlignedDistance {
                point_a: point_a.0,
                point_b: point_b.0,
            },
            a.distance_to(&b),
            anchor,
        ))
    }

    fn add_radial_dimension(
        &mut self,
        arc: ArcHandle,
        anchor: Point2d,
    ) -> Result<DimensionHandle, SurfaceError> {
        let radius = self
            .doc
            .arc_radius(arc.0)
            .ok_or(SurfaceError::EntityNotFound { id: arc.0 })?;
        Ok(self.push_dimension(DimensionKind::Radial { arc: arc.0 }, radius, anchor))
    }

    fn set_dimension_value(
        &mut self,
        dimension: DimensionHandle,
        value: f64,
    ) -> Result<(), SurfaceError> {
        match self.doc.dimension_mut(dimension.0) {
            Some(dim) => {
                dim.value = value;
                Ok(())
            }
            None => Err(SurfaceError::DimensionNotFound { id: dimension.0 }),
        }
    }

    fn point_position(&self, point: PointHandle) -> Result<Point2d, SurfaceError> {
        self.position(point.0)
    }

    fn line_endpoints(
        &self,
        line: LineHandle,
    ) -> Result<(PointHandle, PointHandle), SurfaceError> {
        let (start, end) = self.endpoints(line)?;
        Ok((PointHandle(start), PointHandle(end)))
    }
}
