//! Shared vocabulary for the pad add-in: 2D geometry primitives and the
//! sketch document model (entities, constraints, dimension drivers) that the
//! surface records and the audit inspects.

pub mod geom;
pub mod sketch;

pub use geom::Point2d;
pub use sketch::*;
