//! Integration tests for script execution.
//!
//! Runs the bundled demo scripts end to end and checks the rendered output.

use schemakernel::{parse_script, run_script, Interpreter, ScriptError};
use schemakernel_layout::{Canvas, DrawingSink, Primitive, RenderConfig, Schematic};

const COMMON_EMITTER: &str = include_str!("../demos/common_emitter.sch");
const LOGIC: &str = include_str!("../demos/logic.sch");

#[test]
fn common_emitter_renders() {
    let mut sch = Schematic::new(Canvas::default());
    let summary = run_script(&mut sch, COMMON_EMITTER).unwrap();
    assert_eq!(summary.placed, 6);
    assert_eq!(summary.connected, 5);
    assert_eq!(summary.skipped, 0);

    let prims = sch.sink().primitives();
    assert_eq!(prims.iter().filter(|p| p.is_wire()).count(), 5);
    assert!(prims[..5].iter().all(Primitive::is_wire));

    let svg = sch.export();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches(r#"class="component""#).count(), 6);
    assert_eq!(svg.matches(r#"class="solder-dot""#).count(), 10);
    assert!(svg.contains(">4.7k</text>"));
}

#[test]
fn receiver_prefixed_script_renders() {
    let mut sch = Schematic::new(Canvas::default());
    let summary = run_script(&mut sch, LOGIC).unwrap();
    assert_eq!(summary.placed, 3);
    assert_eq!(summary.connected, 2);
    assert!(sch.pin("carry", "in2").is_some());
}

#[test]
fn json_snapshot_of_script() {
    let mut sch = Schematic::new(Canvas::default());
    run_script(&mut sch, LOGIC).unwrap();
    let json: serde_json::Value = serde_json::from_str(&sch.to_json().unwrap()).unwrap();
    let components = json["components"].as_array().unwrap();
    assert_eq!(components.len(), 3);
    let wires = json["primitives"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["type"] == "wire")
        .count();
    assert_eq!(wires, 2);
}

#[test]
fn config_controls_reject_policy() {
    let config = RenderConfig::from_yaml("duplicate_ids: reject\n").unwrap();
    let mut sch = Schematic::from_config(&config);
    let err = run_script(&mut sch, "add('led', 'd1')\nadd('led', 'd1')").unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(matches!(err, ScriptError::Placement { .. }));
    assert_eq!(sch.len(), 1);
}

#[test]
fn one_engine_many_runs() {
    let mut sch = Schematic::new(Canvas::default());
    let first = parse_script(COMMON_EMITTER).unwrap();
    let second = parse_script("reset()\nadd('battery', 'b1')").unwrap();

    let mut interp = Interpreter::new(&mut sch);
    interp.run(&first).unwrap();
    let summary = interp.run(&second).unwrap();
    assert_eq!(summary.placed, 7);
    assert_eq!(summary.resets, 1);

    assert_eq!(sch.len(), 1);
    assert_eq!(sch.sink().primitives().len(), 1);
}

#[test]
fn parse_error_display_has_position() {
    let err = parse_script("add('resistor', 'r1')\nconnect('r1' 'right')").unwrap_err();
    let text = err.to_string();
    assert!(text.starts_with("parse error at line 2, column 14"), "{text}");
}
