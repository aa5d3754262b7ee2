use sketch_surface::{ArcHandle, DimensionHandle, LineHandle, SurfaceError};

/// Handles to everything a successful build created. Like the handles it
/// holds, valid only for the surface the profile was built on.
#[derive(Debug, Clone, Copy)]
pub struct ProfileHandle {
    /// Edges in drawing order: top, right, bottom, left.
    pub edges: [LineHandle; 4],
    /// Corner fillets in creation order: top-right, bottom-right,
    /// bottom-left, top-left.
    pub fillets: [ArcHandle; 4],
    /// Horizontal construction line through the center.
    pub midline: LineHandle,
    /// Aligned distance between the top edge's start and the bottom edge's
    /// end; measures the pad height.
    pub height_dim: DimensionHandle,
    /// Aligned distance between the right edge's start and the left edge's
    /// end; measures the pad width.
    pub width_dim: DimensionHandle,
    /// Radial dimension driving the first fillet. The other three follow it
    /// through equal-radius constraints.
    pub radius_dim: DimensionHandle,
}

/// Rejected profile parameters, reported before anything touches the sketch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("width must be positive, got {width}")]
    NonPositiveWidth { width: f64 },

    #[error("height must be positive, got {height}")]
    NonPositiveHeight { height: f64 },

    #[error("corner radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f64 },

    #[error("corner radius {radius} exceeds half the shorter side ({limit})")]
    RadiusTooLarge { radius: f64, limit: f64 },
}

/// Why a profile build stopped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("invalid profile parameters: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("sketch surface rejected an operation: {0}")]
    Surface(#[from] SurfaceError),
}
