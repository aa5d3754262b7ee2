use pad_types::Point2d;

use crate::types::{
    ArcHandle, ConstraintHandle, DimensionHandle, LineHandle, PointHandle, SurfaceError,
};

/// The sketch capability consumed by profile construction.
///
/// Implemented by `PlanarSketch` (in-memory recording surface, also the
/// deterministic test double). An adapter wrapping a real host sketch
/// implements the same contract; the builder never depends on a concrete
/// host type.
pub trait SketchSurface {
    /// Create a sketch point at the given position.
    fn add_point(&mut self, at: Point2d) -> Result<PointHandle, SurfaceError>;

    /// Create a line between two freshly created endpoints.
    fn add_line(&mut self, start: Point2d, end: Point2d) -> Result<LineHandle, SurfaceError>;

    /// Flag a line as construction-only reference geometry, excluded from
    /// profile loops.
    fn mark_construction(&mut self, line: LineHandle) -> Result<(), SurfaceError>;

    /// Fillet the corner where `line_a` ends and `line_b` starts: trim both
    /// lines to the tangent points of an arc of `radius` and insert that arc.
    /// The arc adopts the trimmed endpoints as its own start/end, and
    /// tangency to both lines is recorded.
    fn add_fillet(
        &mut self,
        line_a: LineHandle,
        line_b: LineHandle,
        radius: f64,
    ) -> Result<ArcHandle, SurfaceError>;

    fn add_perpendicular(
        &mut self,
        line_a: LineHandle,
        line_b: LineHandle,
    ) -> Result<ConstraintHandle, SurfaceError>;

    fn add_horizontal(&mut self, line: LineHandle) -> Result<ConstraintHandle, SurfaceError>;

    fn add_equal_radius(
        &mut self,
        arc_a: ArcHandle,
        arc_b: ArcHandle,
    ) -> Result<ConstraintHandle, SurfaceError>;

    /// Pin two points together.
    fn add_coincident(
        &mut self,
        point_a: PointHandle,
        point_b: PointHandle,
    ) -> Result<ConstraintHandle, SurfaceError>;

    /// Constrain `point` to sit at the midpoint of `line`.
    fn add_midpoint(
        &mut self,
        point: PointHandle,
        line: LineHandle,
    ) -> Result<ConstraintHandle, SurfaceError>;

    /// Aligned distance dimension between two points, with a label anchor.
    /// The driver's initial value is the currently measured distance.
    fn add_distance_dimension(
        &mut self,
        point_a: PointHandle,
        point_b: PointHandle,
        anchor: Point2d,
    ) -> Result<DimensionHandle, SurfaceError>;

    /// Radial dimension on an arc, with a label anchor. The driver's initial
    /// value is the arc's current radius.
    fn add_radial_dimension(
        &mut self,
        arc: ArcHandle,
        anchor: Point2d,
    ) -> Result<DimensionHandle, SurfaceError>;

    /// Overwrite a dimension driver's parameter value (a parametric edit).
    fn set_dimension_value(
        &mut self,
        dimension: DimensionHandle,
        value: f64,
    ) -> Result<(), SurfaceError>;

    fn point_position(&self, point: PointHandle) -> Result<Point2d, SurfaceError>;

    /// Start and end point handles of a line.
    fn line_endpoints(
        &self,
        line: LineHandle,
    ) -> Result<(PointHandle, PointHandle), SurfaceError>;
}
