//! Helper functions: error types and pad placement scenarios.

use addin_bridge::{
    dispatch, AddinState, AddinToHost, CommandInputs, HostToAddin, PadPreset, ProfileSummary,
    SelectionRef, COMMAND_ID,
};
use pad_types::Point2d;
use profile_builder::{build_rounded_square, BuildError, ProfileHandle};
use sketch_surface::{PlanarSketch, PointHandle, SketchSurface, SurfaceError};

use crate::oracle::OracleVerdict;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("dispatch error: {message}")]
    DispatchError { message: String },

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },
}

// ── Scenario Builders ───────────────────────────────────────────────────────

/// A placed pad plus everything needed to inspect it afterwards.
pub struct PadScenario {
    pub state: AddinState,
    pub sketch: PlanarSketch,
    pub center: PointHandle,
    pub summary: ProfileSummary,
}

/// Register the add-in, select a point at `(cx, cy)` and run the draw
/// command through the normal dispatch path.
pub fn place_pad(size: PadPreset, cx: f64, cy: f64) -> Result<PadScenario, HarnessError> {
    let mut state = AddinState::new();
    state.register();

    let mut sketch = PlanarSketch::new();
    let center = sketch.add_point(Point2d::new(cx, cy))?;

    let msg = HostToAddin::ExecuteCommand {
        command_id: COMMAND_ID.to_string(),
        inputs: CommandInputs {
            size,
            selection: vec![SelectionRef::SketchPoint { id: center.0 }],
        },
    };
    match dispatch(&state, &mut sketch, msg) {
        AddinToHost::ProfileCreated { summary } => Ok(PadScenario {
            state,
            sketch,
            center,
            summary,
        }),
        AddinToHost::Error { message } => Err(HarnessError::DispatchError { message }),
    }
}

/// Build a pad on a fresh sketch without going through the host boundary.
/// Lets oracle tests use dimensions the presets do not cover.
pub fn place_pad_direct(
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
    corner_radius: f64,
) -> Result<(PlanarSketch, PointHandle, ProfileHandle), HarnessError> {
    let mut sketch = PlanarSketch::new();
    let center = sketch.add_point(Point2d::new(cx, cy))?;
    let profile = build_rounded_square(&mut sketch, center, width, height, corner_radius)?;
    Ok((sketch, center, profile))
}

// ── Verdict Helpers ─────────────────────────────────────────────────────────

/// Fail on the first oracle verdict that did not pass.
pub fn expect_all_passed(verdicts: &[OracleVerdict]) -> Result<(), HarnessError> {
    for verdict in verdicts {
        if !verdict.passed {
            return Err(HarnessError::OracleFailure {
                oracle: verdict.oracle_name.clone(),
                detail: verdict.detail.clone(),
            });
        }
    }
    Ok(())
}
