use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Point2d;

/// A geometric entity in a sketch. Ids are dense `u32` values allocated by
/// the surface that owns the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchEntity {
    Point {
        id: u32,
        x: f64,
        y: f64,
        construction: bool,
    },
    Line {
        id: u32,
        start_id: u32,
        end_id: u32,
        construction: bool,
    },
    /// A circular arc through three points. The radius is implied by the
    /// center/start distance; well-formedness (start and end equidistant from
    /// the center) is an implicit constraint carried by the entity itself.
    Arc {
        id: u32,
        center_id: u32,
        start_id: u32,
        end_id: u32,
        construction: bool,
    },
}

impl SketchEntity {
    pub fn id(&self) -> u32 {
        match self {
            SketchEntity::Point { id, .. }
            | SketchEntity::Line { id, .. }
            | SketchEntity::Arc { id, .. } => *id,
        }
    }

    pub fn is_construction(&self) -> bool {
        match self {
            SketchEntity::Point { construction, .. }
            | SketchEntity::Line { construction, .. }
            | SketchEntity::Arc { construction, .. } => *construction,
        }
    }
}

/// A constraint between sketch entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchConstraint {
    Coincident {
        point_a: u32,
        point_b: u32,
    },
    Perpendicular {
        line_a: u32,
        line_b: u32,
    },
    Horizontal {
        line: u32,
    },
    /// Arc tangent to a line at their shared endpoint.
    Tangent {
        arc: u32,
        line: u32,
    },
    EqualRadius {
        arc_a: u32,
        arc_b: u32,
    },
    /// Point sits at the midpoint of a line.
    Midpoint {
        point: u32,
        line: u32,
    },
}

/// What a dimension driver measures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DimensionKind {
    /// Distance between two points, measured along the line joining them.
    AlignedDistance { point_a: u32, point_b: u32 },
    /// Radius of an arc.
    Radial { arc: u32 },
}

/// A named, mutable numeric parameter bound to a measurement. Editing the
/// value is what a parametric re-drive of the profile acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    pub id: u32,
    /// Host-style model parameter name ("d1", "d2", ...).
    pub name: String,
    pub kind: DimensionKind,
    pub value: f64,
    /// Label placement point, offset from the geometry it annotates.
    pub anchor: Point2d,
}

/// Verdict of the constraint audit over a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConstraintStatus {
    /// Every equation satisfied and independent; zero degrees of freedom.
    FullyConstrained,
    /// Equations satisfied but geometry can still move.
    UnderConstrained { dof: u32 },
    /// One or more constraints are violated at the current positions.
    OverConstrained {
        /// Indices into the audit's equation list, in evaluation order.
        conflicts: Vec<u32>,
    },
    /// Consistent, zero degrees of freedom, but some equations are linearly
    /// dependent on the rest.
    Redundant { dependent: u32 },
}

/// A closed loop of non-construction curve entities, ordered and normalized
/// to counter-clockwise winding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedLoop {
    /// Ordered entity ids forming the loop.
    pub entity_ids: Vec<u32>,
    /// Counter-clockwise loops bound area; a clockwise loop would be a hole.
    pub is_outer: bool,
}

/// A 2D sketch document: entities, constraints between them, and dimension
/// drivers. This is the permanent record a surface builds up; positions live
/// on the point entities themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchDocument {
    pub id: Uuid,
    pub entities: Vec<SketchEntity>,
    pub constraints: Vec<SketchConstraint>,
    pub dimensions: Vec<Dimension>,
}

impl SketchDocument {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entities: Vec::new(),
            constraints: Vec::new(),
            dimensions: Vec::new(),
        }
    }

    pub fn entity(&self, id: u32) -> Option<&SketchEntity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn point_position(&self, id: u32) -> Option<Point2d> {
        match self.entity(id)? {
            SketchEntity::Point { x, y, .. } => Some(Point2d::new(*x, *y)),
            _ => None,
        }
    }

    pub fn set_point_position(&mut self, id: u32, to: Point2d) -> bool {
        for entity in &mut self.entities {
            if let SketchEntity::Point { id: pid, x, y, .. } = entity {
                if *pid == id {
                    *x = to.x;
                    *y = to.y;
                    return true;
                }
            }
        }
        false
    }

    pub fn line_endpoints(&self, id: u32) -> Option<(u32, u32)> {
        match self.entity(id)? {
            SketchEntity::Line {
                start_id, end_id, ..
            } => Some((*start_id, *end_id)),
            _ => None,
        }
    }

    pub fn arc_points(&self, id: u32) -> Option<(u32, u32, u32)> {
        match self.entity(id)? {
            SketchEntity::Arc {
                center_id,
                start_id,
                end_id,
                ..
            } => Some((*center_id, *start_id, *end_id)),
            _ => None,
        }
    }

    /// Arc radius implied by the current center/start positions.
    pub fn arc_radius(&self, id: u32) -> Option<f64> {
        let (center_id, start_id, _) = self.arc_points(id)?;
        let center = self.point_position(center_id)?;
        let start = self.point_position(start_id)?;
        Some(center.distance_to(&start))
    }

    pub fn dimension(&self, id: u32) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    pub fn dimension_mut(&mut self, id: u32) -> Option<&mut Dimension> {
        self.dimensions.iter_mut().find(|d| d.id == id)
    }
}

impl Default for SketchDocument {
    fn default() -> Self {
        Self::new()
    }
}
