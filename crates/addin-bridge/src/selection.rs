use serde::{Deserialize, Serialize};

use sketch_surface::{PointHandle, SketchSurface};

/// What the host reports as selected when the command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectionRef {
    /// A point in the active sketch.
    SketchPoint { id: u32 },
    /// Anything else the user can click (an edge, a face, a body).
    Other { id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("select a sketch point before running the command")]
    NothingSelected,

    #[error("expected a single selected point, got {count} selections")]
    MultipleSelections { count: usize },

    #[error("the selection is not a sketch point")]
    NotASketchPoint,

    #[error("selected point {id} does not exist in the active sketch")]
    UnknownPoint { id: u32 },
}

/// Resolve the command's selection down to the one sketch point the profile
/// will be centered on.
pub fn resolve_center(
    surface: &dyn SketchSurface,
    selections: &[SelectionRef],
) -> Result<PointHandle, SelectionError> {
    match selections {
        [] => Err(SelectionError::NothingSelected),
        [SelectionRef::SketchPoint { id }] => {
            let handle = PointHandle(*id);
            surface
                .point_position(handle)
                .map_err(|_| SelectionError::UnknownPoint { id: *id })?;
            Ok(handle)
        }
        [SelectionRef::Other { .. }] => Err(SelectionError::NotASketchPoint),
        many => Err(SelectionError::MultipleSelections { count: many.len() }),
    }
}
