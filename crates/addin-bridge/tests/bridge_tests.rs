use addin_bridge::messages::*;
use addin_bridge::*;
use constraint_audit::{audit, extract_loops, Tolerance};
use pad_types::{ConstraintStatus, Point2d};
use sketch_surface::{PlanarSketch, PointHandle, SketchSurface};

// ── Helper functions ─────────────────────────────────────────────────────

fn registered_state() -> AddinState {
    let mut state = AddinState::new();
    state.register();
    state
}

fn sketch_with_center(x: f64, y: f64) -> (PlanarSketch, PointHandle) {
    let mut sketch = PlanarSketch::new();
    let center = sketch.add_point(Point2d::new(x, y)).unwrap();
    (sketch, center)
}

fn execute_msg(size: PadPreset, point_id: u32) -> HostToAddin {
    HostToAddin::ExecuteCommand {
        command_id: COMMAND_ID.to_string(),
        inputs: CommandInputs {
            size,
            selection: vec![SelectionRef::SketchPoint { id: point_id }],
        },
    }
}

// ── Serde Round-Trip Tests ───────────────────────────────────────────────

#[test]
fn serde_roundtrip_execute_command() {
    let msg = execute_msg(PadPreset::M8, 7);
    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: HostToAddin = serde_json::from_str(&json).unwrap();
    assert!(json.contains("\"type\":\"ExecuteCommand\""));
    assert!(json.contains("\"size\":\"M8\""));
    assert!(matches!(deserialized, HostToAddin::ExecuteCommand { .. }));
}

#[test]
fn serde_roundtrip_profile_created() {
    let msg = AddinToHost::ProfileCreated {
        summary: ProfileSummary {
            size_label: "M6".to_string(),
            width: 0.67,
            height: 0.67,
            corner_radius: 0.05,
            edges: 4,
            fillets: 4,
        },
    };
    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: AddinToHost = serde_json::from_str(&json).unwrap();
    assert!(json.contains("\"type\":\"ProfileCreated\""));
    assert!(matches!(deserialized, AddinToHost::ProfileCreated { .. }));
}

#[test]
fn serde_roundtrip_error_response() {
    let msg = AddinToHost::Error {
        message: "something went wrong".to_string(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: AddinToHost = serde_json::from_str(&json).unwrap();
    assert!(matches!(
        deserialized,
        AddinToHost::Error { message } if message == "something went wrong"
    ));
}

// ── Dispatch Tests ───────────────────────────────────────────────────────

#[test]
fn dispatch_m6_execute_returns_profile_created() {
    let state = registered_state();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M6, center.0));

    if let AddinToHost::ProfileCreated { summary } = response {
        assert_eq!(summary.size_label, "M6");
        assert!((summary.width - 0.67).abs() < 1e-12);
        assert!((summary.height - 0.67).abs() < 1e-12);
        assert!((summary.corner_radius - 0.05).abs() < 1e-12);
        assert_eq!(summary.edges, 4);
        assert_eq!(summary.fillets, 4);
    } else {
        panic!("Expected ProfileCreated, got {:?}", response);
    }
}

#[test]
fn dispatched_pad_is_closed_and_fully_constrained() {
    let state = registered_state();
    let (mut sketch, center) = sketch_with_center(2.0, -1.0);

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M8, center.0));
    assert!(matches!(response, AddinToHost::ProfileCreated { .. }));

    let loops = extract_loops(sketch.document());
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].entity_ids.len(), 8);
    assert!(loops[0].is_outer);

    let report = audit(sketch.document(), &[center.0], &Tolerance::default()).unwrap();
    assert_eq!(report.status, ConstraintStatus::FullyConstrained);
}

#[test]
fn dispatch_without_registration_returns_error() {
    let state = AddinState::new();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M6, center.0));

    if let AddinToHost::Error { message } = response {
        assert!(
            message.contains("unknown command"),
            "Expected unknown-command error, got: {}",
            message
        );
    } else {
        panic!("Expected Error, got {:?}", response);
    }
}

#[test]
fn dispatch_after_unregister_returns_error() {
    let mut state = registered_state();
    state.unregister();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M6, center.0));
    assert!(matches!(response, AddinToHost::Error { .. }));
}

#[test]
fn dispatch_with_unknown_point_returns_error() {
    let state = registered_state();
    let mut sketch = PlanarSketch::new();

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M6, 99));

    if let AddinToHost::Error { message } = response {
        assert!(message.contains("99"), "got: {}", message);
    } else {
        panic!("Expected Error, got {:?}", response);
    }
}

#[test]
fn dispatch_with_non_point_selection_returns_error() {
    let state = registered_state();
    let (mut sketch, _center) = sketch_with_center(0.0, 0.0);

    let msg = HostToAddin::ExecuteCommand {
        command_id: COMMAND_ID.to_string(),
        inputs: CommandInputs {
            size: PadPreset::M6,
            selection: vec![SelectionRef::Other { id: 3 }],
        },
    };
    let response = dispatch(&state, &mut sketch, msg);

    if let AddinToHost::Error { message } = response {
        assert!(message.contains("not a sketch point"), "got: {}", message);
    } else {
        panic!("Expected Error, got {:?}", response);
    }
}

#[test]
fn dispatch_with_two_selections_returns_error() {
    let state = registered_state();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);
    let other = sketch.add_point(Point2d::new(1.0, 1.0)).unwrap();

    let msg = HostToAddin::ExecuteCommand {
        command_id: COMMAND_ID.to_string(),
        inputs: CommandInputs {
            size: PadPreset::M6,
            selection: vec![
                SelectionRef::SketchPoint { id: center.0 },
                SelectionRef::SketchPoint { id: other.0 },
            ],
        },
    };
    let response = dispatch(&state, &mut sketch, msg);

    if let AddinToHost::Error { message } = response {
        assert!(message.contains("got 2 selections"), "got: {}", message);
    } else {
        panic!("Expected Error, got {:?}", response);
    }
}

#[test]
fn repeated_execution_stacks_profiles() {
    // There is no undo at this layer; each execution adds a fresh profile.
    let state = registered_state();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M6, center.0));
    assert!(matches!(response, AddinToHost::ProfileCreated { .. }));
    let placed = sketch.document().entities.len();

    let response = dispatch(&state, &mut sketch, execute_msg(PadPreset::M6, center.0));
    assert!(matches!(response, AddinToHost::ProfileCreated { .. }));
    assert!(sketch.document().entities.len() > placed);
}

// ── JSON Front Door Tests ────────────────────────────────────────────────

#[test]
fn dispatch_json_executes_from_raw_text() {
    let state = registered_state();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);

    let json = format!(
        r#"{{"type":"ExecuteCommand","command_id":"drawRoundedSquareCmd","inputs":{{"size":"M8","selection":[{{"type":"SketchPoint","id":{}}}]}}}}"#,
        center.0
    );
    let out = dispatch_json(&state, &mut sketch, &json);

    let response: AddinToHost = serde_json::from_str(&out).unwrap();
    if let AddinToHost::ProfileCreated { summary } = response {
        assert_eq!(summary.size_label, "M8");
        assert!((summary.width - 0.88).abs() < 1e-12);
    } else {
        panic!("Expected ProfileCreated, got: {}", out);
    }
}

#[test]
fn dispatch_json_defaults_to_m6_when_size_is_omitted() {
    let state = registered_state();
    let (mut sketch, center) = sketch_with_center(0.0, 0.0);

    let json = format!(
        r#"{{"type":"ExecuteCommand","command_id":"drawRoundedSquareCmd","inputs":{{"selection":[{{"type":"SketchPoint","id":{}}}]}}}}"#,
        center.0
    );
    let out = dispatch_json(&state, &mut sketch, &json);

    let response: AddinToHost = serde_json::from_str(&out).unwrap();
    if let AddinToHost::ProfileCreated { summary } = response {
        assert_eq!(summary.size_label, "M6");
    } else {
        panic!("Expected ProfileCreated, got: {}", out);
    }
}

#[test]
fn dispatch_json_reports_parse_failures_in_band() {
    let state = registered_state();
    let mut sketch = PlanarSketch::new();

    let out = dispatch_json(&state, &mut sketch, r#"{"type":"Unheard"}"#);

    let response: AddinToHost = serde_json::from_str(&out).unwrap();
    assert!(matches!(response, AddinToHost::Error { .. }));
}
