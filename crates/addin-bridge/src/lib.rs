//! Host-facing surface of the rounded-square pad add-in.
//!
//! The host application owns the UI: a toolbar button, a command dialog
//! with a size dropdown, and the selection set. This crate models what the
//! add-in contributes: command registration into an explicit
//! [`AddinState`], resolution of the user's selection to a sketch point,
//! and a JSON message loop that turns a committed dialog into a fully
//! constrained profile on whatever [`sketch_surface::SketchSurface`] the
//! host hands over.

pub mod dispatch;
pub mod messages;
pub mod presets;
pub mod selection;
pub mod state;

pub use dispatch::{dispatch, dispatch_json, CommandError};
pub use messages::{AddinToHost, CommandInputs, HostToAddin, ProfileSummary};
pub use presets::{PadDimensions, PadPreset};
pub use selection::{resolve_center, SelectionError, SelectionRef};
pub use state::{
    AddinState, CommandDefinition, ToolbarPanel, COMMAND_ID, COMMAND_LABEL, COMMAND_TOOLTIP,
    PANEL_ID,
};
