/// Opaque handle to a sketch point.
/// Valid only for the surface that created it. NEVER persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointHandle(pub u32);

/// Opaque handle to a sketch line.
/// Valid only for the surface that created it. NEVER persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(pub u32);

/// Opaque handle to a sketch arc.
/// Valid only for the surface that created it. NEVER persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcHandle(pub u32);

/// Opaque handle to a recorded constraint (index into the document's
/// constraint list). Valid only for the surface that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintHandle(pub u32);

/// Opaque handle to a dimension driver.
/// Valid only for the surface that created it. NEVER persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionHandle(pub u32);

/// Errors from sketch surface operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SurfaceError {
    #[error("entity not found: {id}")]
    EntityNotFound { id: u32 },

    #[error("dimension not found: {id}")]
    DimensionNotFound { id: u32 },

    #[error("lines {line_a} and {line_b} do not meet at a corner (gap {gap:.6})")]
    EdgesDoNotMeet { line_a: u32, line_b: u32, gap: f64 },

    #[error("fillet failed: {reason}")]
    FilletFailed { reason: String },

    #[error("operation rejected: {reason}")]
    Rejected { reason: String },
}
