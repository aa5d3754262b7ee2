//! The sketch capability boundary: the narrow `SketchSurface` trait the
//! profile builder writes through, plus `PlanarSketch`, the in-memory
//! implementation that records everything into a `pad_types::SketchDocument`.

pub mod planar;
pub mod traits;
pub mod types;

pub use planar::PlanarSketch;
pub use traits::SketchSurface;
pub use types::*;
