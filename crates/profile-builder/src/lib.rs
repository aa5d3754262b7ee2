//! Construction of the rounded-square pad profile on any [`SketchSurface`].
//!
//! The builder draws a rectangle centered on a selected point, fillets all
//! four corners, and then constrains the result down to zero remaining
//! degrees of freedom: three perpendiculars, two aligned distance
//! dimensions, one driving radius with the other fillets coupled to it, and
//! a horizontal construction midline that ties the loop to the center.
//!
//! Construction is not transactional. When a surface call fails the error
//! propagates immediately and whatever was already created stays in the
//! sketch, mirroring how a host application leaves a half-drawn sketch on
//! screen for the user to inspect.

pub mod build;
pub mod types;

pub use build::build_rounded_square;
pub use types::{BuildError, ProfileHandle, ValidationError};

pub use sketch_surface::SketchSurface;
