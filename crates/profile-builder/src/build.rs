use pad_types::Point2d;
use sketch_surface::{PointHandle, SketchSurface};
use tracing::{debug, instrument};

use crate::types::{BuildError, ProfileHandle, ValidationError};

fn validate(width: f64, height: f64, corner_radius: f64) -> Result<(), ValidationError> {
    if width <= 0.0 {
        return Err(ValidationError::NonPositiveWidth { width });
    }
    if height <= 0.0 {
        return Err(ValidationError::NonPositiveHeight { height });
    }
    if corner_radius <= 0.0 {
        return Err(ValidationError::NonPositiveRadius { radius: corner_radius });
    }
    // Equality is allowed: the fillets then consume the shorter edges whole.
    let limit = width.min(height) / 2.0;
    if corner_radius > limit {
        return Err(ValidationError::RadiusTooLarge {
            radius: corner_radius,
            limit,
        });
    }
    Ok(())
}

/// Draw a rounded square of `width` x `height` centered on `center`, fillet
/// its corners with `corner_radius`, and constrain it fully.
///
/// The returned handles reference the created geometry on `sketch`. On
/// error, geometry created before the failing call remains in the sketch.
#[instrument(skip(sketch))]
pub fn build_rounded_square(
    sketch: &mut dyn SketchSurface,
    center: PointHandle,
    width: f64,
    height: f64,
    corner_radius: f64,
) -> Result<ProfileHandle, BuildError> {
    validate(width, height, corner_radius)?;

    let c = sketch.point_position(center)?;
    let (hw, hh) = (width / 2.0, height / 2.0);
    let tl = Point2d::new(c.x - hw, c.y + hh);
    let tr = Point2d::new(c.x + hw, c.y + hh);
    let br = Point2d::new(c.x + hw, c.y - hh);
    let bl = Point2d::new(c.x - hw, c.y - hh);

    // Closed rectangle, drawn clockwise from the top edge.
    let top = sketch.add_line(tl, tr)?;
    let right = sketch.add_line(tr, br)?;
    let bottom = sketch.add_line(br, bl)?;
    let left = sketch.add_line(bl, tl)?;
    debug!(?top, ?right, ?bottom, ?left, "rectangle edges placed");

    // Fillets go in only after all four edges exist; each one trims its two
    // edges back to the tangent points and takes over the corner.
    let fillets = [
        sketch.add_fillet(top, right, corner_radius)?,
        sketch.add_fillet(right, bottom, corner_radius)?,
        sketch.add_fillet(bottom, left, corner_radius)?,
        sketch.add_fillet(left, top, corner_radius)?,
    ];
    debug!(radius = corner_radius, "corners filleted");

    // Three perpendiculars square up the loop; a fourth would be dependent
    // on these and the tangencies.
    sketch.add_perpendicular(top, right)?;
    sketch.add_perpendicular(right, bottom)?;
    sketch.add_perpendicular(bottom, left)?;

    // Driving distances, labels dropped outside the profile. Initial values
    // are the measured extents.
    let (top_start, _) = sketch.line_endpoints(top)?;
    let (_, bottom_end) = sketch.line_endpoints(bottom)?;
    let height_dim = sketch.add_distance_dimension(
        top_start,
        bottom_end,
        Point2d::new(c.x + width, c.y - height),
    )?;
    let (right_start, _) = sketch.line_endpoints(right)?;
    let (_, left_end) = sketch.line_endpoints(left)?;
    let width_dim = sketch.add_distance_dimension(
        right_start,
        left_end,
        Point2d::new(c.x + width, c.y + height),
    )?;

    // One driving radius on the first fillet, re-stamped with the requested
    // value, and the other three coupled to it.
    let radius_dim =
        sketch.add_radial_dimension(fillets[0], Point2d::new(c.x + hw, c.y + hh))?;
    sketch.set_dimension_value(radius_dim, corner_radius)?;
    sketch.add_equal_radius(fillets[0], fillets[1])?;
    sketch.add_equal_radius(fillets[0], fillets[2])?;
    sketch.add_equal_radius(fillets[0], fillets[3])?;
    debug!(?height_dim, ?width_dim, ?radius_dim, "dimensions recorded");

    // Construction midline through the center. Its endpoints ride the left
    // and right edge midpoints, and the horizontal pin removes the loop's
    // last rotational freedom about the center.
    let midline = sketch.add_line(Point2d::new(c.x - hw, c.y), Point2d::new(c.x + hw, c.y))?;
    sketch.mark_construction(midline)?;
    sketch.add_horizontal(midline)?;
    let (mid_start, mid_end) = sketch.line_endpoints(midline)?;
    sketch.add_midpoint(mid_start, left)?;
    sketch.add_midpoint(mid_end, right)?;

    // Finally the selected center locks onto the midline's own midpoint.
    sketch.add_midpoint(center, midline)?;
    debug!(?midline, "midline anchored to center");

    Ok(ProfileHandle {
        edges: [top, right, bottom, left],
        fillets,
        midline,
        height_dim,
        width_dim,
        radius_dim,
    })
}
