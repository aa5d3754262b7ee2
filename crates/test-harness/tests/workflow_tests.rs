//! End-to-end workflows: register, dispatch, verify, tear down.

use addin_bridge::{
    dispatch, AddinState, AddinToHost, CommandInputs, HostToAddin, PadPreset, SelectionRef,
    COMMAND_ID,
};
use pad_types::{Point2d, SketchConstraint};
use sketch_surface::{PlanarSketch, PointHandle, SketchSurface};
use test_harness::helpers::{expect_all_passed, place_pad};
use test_harness::oracle::run_all_profile_checks;
use test_harness::HarnessError;

fn draw_msg(center: PointHandle, size: PadPreset) -> HostToAddin {
    HostToAddin::ExecuteCommand {
        command_id: COMMAND_ID.to_string(),
        inputs: CommandInputs {
            size,
            selection: vec![SelectionRef::SketchPoint { id: center.0 }],
        },
    }
}

#[test]
fn m6_pad_passes_every_oracle() {
    let scenario = place_pad(PadPreset::M6, 0.0, 0.0).unwrap();
    assert_eq!(scenario.summary.size_label, "M6");
    assert!((scenario.summary.width - 0.67).abs() < 1e-12);

    let verdicts = run_all_profile_checks(scenario.sketch.document(), scenario.center.0);
    expect_all_passed(&verdicts).unwrap();
}

#[test]
fn m8_pad_passes_every_oracle_off_origin() {
    let scenario = place_pad(PadPreset::M8, 12.5, -3.25).unwrap();
    assert!((scenario.summary.width - 0.88).abs() < 1e-12);
    assert!((scenario.summary.height - 0.88).abs() < 1e-12);

    let verdicts = run_all_profile_checks(scenario.sketch.document(), scenario.center.0);
    expect_all_passed(&verdicts).unwrap();
}

#[test]
fn command_only_runs_once_registered() {
    let mut state = AddinState::new();
    let mut sketch = PlanarSketch::new();
    let center = sketch.add_point(Point2d::new(0.0, 0.0)).unwrap();

    let response = dispatch(&state, &mut sketch, draw_msg(center, PadPreset::M6));
    assert!(matches!(response, AddinToHost::Error { .. }));

    state.register();
    let response = dispatch(&state, &mut sketch, draw_msg(center, PadPreset::M6));
    assert!(matches!(response, AddinToHost::ProfileCreated { .. }));
}

#[test]
fn unregister_takes_the_command_away_again() {
    let mut scenario = place_pad(PadPreset::M6, 0.0, 0.0).unwrap();
    scenario.state.unregister();

    let response = dispatch(
        &scenario.state,
        &mut scenario.sketch,
        draw_msg(scenario.center, PadPreset::M8),
    );
    assert!(matches!(response, AddinToHost::Error { .. }));
}

#[test]
fn expect_all_passed_reports_the_first_failure() {
    let scenario = place_pad(PadPreset::M6, 0.0, 0.0).unwrap();
    let center = scenario.center.0;
    let mut doc = scenario.sketch.into_document();
    doc.constraints
        .retain(|c| !matches!(c, SketchConstraint::EqualRadius { .. }));

    let verdicts = run_all_profile_checks(&doc, center);
    let err = expect_all_passed(&verdicts).unwrap_err();
    match err {
        HarnessError::OracleFailure { oracle, .. } => {
            assert_eq!(oracle, "fully_constrained");
        }
        other => panic!("Expected OracleFailure, got {:?}", other),
    }
}
