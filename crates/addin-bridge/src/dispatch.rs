//! Host message dispatch.
//!
//! [`dispatch`] is the typed entry point; [`dispatch_json`] wraps it for
//! hosts that speak JSON strings. Failures never unwind across the
//! boundary: every error becomes an [`AddinToHost::Error`] response.

use profile_builder::{build_rounded_square, BuildError};
use sketch_surface::SketchSurface;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::messages::{AddinToHost, CommandInputs, HostToAddin, ProfileSummary};
use crate::selection::{resolve_center, SelectionError};
use crate::state::AddinState;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {command_id}")]
    UnknownCommand { command_id: String },

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("profile build failed: {0}")]
    Build(#[from] BuildError),
}

/// Handle one host message, turning any failure into an error response.
#[instrument(skip(state, surface))]
pub fn dispatch(
    state: &AddinState,
    surface: &mut dyn SketchSurface,
    msg: HostToAddin,
) -> AddinToHost {
    match handle_message(state, surface, msg) {
        Ok(response) => response,
        Err(e) => AddinToHost::Error {
            message: e.to_string(),
        },
    }
}

/// JSON-string front door for hosts without typed bindings.
pub fn dispatch_json(state: &AddinState, surface: &mut dyn SketchSurface, json: &str) -> String {
    let response = match serde_json::from_str::<HostToAddin>(json) {
        Ok(msg) => dispatch(state, surface, msg),
        Err(e) => AddinToHost::Error {
            message: format!("malformed host message: {e}"),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"response serialization failed: {e}"}}"#)
    })
}

fn handle_message(
    state: &AddinState,
    surface: &mut dyn SketchSurface,
    msg: HostToAddin,
) -> Result<AddinToHost, CommandError> {
    match msg {
        HostToAddin::ExecuteCommand { command_id, inputs } => {
            debug!(%command_id, "host command received");
            if state.command_definition(&command_id).is_none() {
                return Err(CommandError::UnknownCommand { command_id });
            }
            execute_draw(surface, inputs)
        }
    }
}

fn execute_draw(
    surface: &mut dyn SketchSurface,
    inputs: CommandInputs,
) -> Result<AddinToHost, CommandError> {
    let center = resolve_center(&*surface, &inputs.selection)?;
    let dims = inputs.size.dimensions();
    let profile = build_rounded_square(
        surface,
        center,
        dims.width,
        dims.height,
        dims.corner_radius,
    )?;
    info!(
        size = inputs.size.label(),
        width = dims.width,
        height = dims.height,
        "rounded square placed"
    );
    Ok(AddinToHost::ProfileCreated {
        summary: ProfileSummary {
            size_label: inputs.size.label().to_string(),
            width: dims.width,
            height: dims.height,
            corner_radius: dims.corner_radius,
            edges: profile.edges.len(),
            fillets: profile.fillets.len(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PadPreset;
    use crate::selection::SelectionRef;
    use pad_types::Point2d;
    use sketch_surface::PlanarSketch;

    fn registered_state() -> AddinState {
        let mut state = AddinState::new();
        state.register();
        state
    }

    #[test]
    fn unknown_command_id_is_rejected() {
        let state = registered_state();
        let mut sketch = PlanarSketch::new();
        let response = dispatch(
            &state,
            &mut sketch,
            HostToAddin::ExecuteCommand {
                command_id: "extrudeCmd".to_string(),
                inputs: CommandInputs {
                    size: PadPreset::M6,
                    selection: Vec::new(),
                },
            },
        );
        match response {
            AddinToHost::Error { message } => {
                assert_eq!(message, "unknown command: extrudeCmd");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn empty_selection_becomes_an_error_response() {
        let state = registered_state();
        let mut sketch = PlanarSketch::new();
        let response = dispatch(
            &state,
            &mut sketch,
            HostToAddin::ExecuteCommand {
                command_id: crate::state::COMMAND_ID.to_string(),
                inputs: CommandInputs {
                    size: PadPreset::M6,
                    selection: Vec::new(),
                },
            },
        );
        match response {
            AddinToHost::Error { message } => {
                assert!(message.contains("select a sketch point"), "got: {message}");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_answered_not_panicked() {
        let state = registered_state();
        let mut sketch = PlanarSketch::new();
        let out = dispatch_json(&state, &mut sketch, "{not json");
        assert!(out.contains(r#""type":"Error""#), "got: {out}");
        assert!(out.contains("malformed host message"), "got: {out}");
    }

    #[test]
    fn execute_draws_an_m6_pad() {
        let state = registered_state();
        let mut sketch = PlanarSketch::new();
        let center = sketch.add_point(Point2d::new(0.0, 0.0)).unwrap();
        let response = dispatch(
            &state,
            &mut sketch,
            HostToAddin::ExecuteCommand {
                command_id: crate::state::COMMAND_ID.to_string(),
                inputs: CommandInputs {
                    size: PadPreset::M6,
                    selection: vec![SelectionRef::SketchPoint { id: center.0 }],
                },
            },
        );
        match response {
            AddinToHost::ProfileCreated { summary } => {
                assert_eq!(summary.size_label, "M6");
                assert!((summary.width - 0.67).abs() < 1e-12);
                assert!((summary.corner_radius - 0.05).abs() < 1e-12);
                assert_eq!(summary.edges, 4);
                assert_eq!(summary.fillets, 4);
            }
            other => panic!("expected ProfileCreated, got {other:?}"),
        }
    }
}
