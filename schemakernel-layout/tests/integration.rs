//! Integration tests for the schematic engine.
//!
//! Drives the public `add` / `connect` / `reset` / `export` surface the way
//! an instruction sequence would.

use schemakernel_layout::routing::{branch_for, RouteBranch};
use schemakernel_layout::types::WirePath;
use schemakernel_layout::{Canvas, ComponentType, DrawingSink, PlaceConfig, Point, Primitive, Schematic};
use std::collections::BTreeSet;

const EPS: f64 = 1e-6;

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

fn wires(sch: &Schematic) -> Vec<&WirePath> {
    sch.sink()
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Wire(w) => Some(w),
            _ => None,
        })
        .collect()
}

#[test]
fn every_type_places_with_its_documented_pins() {
    let expected: &[(&str, &[&str])] = &[
        ("resistor", &["left", "right"]),
        ("capacitor", &["left", "right"]),
        ("inductor", &["left", "right"]),
        ("diode", &["anode", "cathode"]),
        ("led", &["anode", "cathode"]),
        ("voltage_source", &["top", "bottom"]),
        ("current_source", &["top", "bottom"]),
        ("ground", &["top"]),
        ("opamp", &["in_inv", "in_non", "out"]),
        ("npn", &["base", "collector", "emitter"]),
        ("pnp", &["base", "collector", "emitter"]),
        ("nmos", &["gate", "drain", "source"]),
        ("pmos", &["gate", "drain", "source"]),
        ("not", &["in", "out"]),
        ("and", &["in1", "in2", "out"]),
        ("or", &["in1", "in2", "out"]),
        ("nand", &["in1", "in2", "out"]),
        ("nor", &["in1", "in2", "out"]),
        ("xor", &["in1", "in2", "out"]),
    ];

    let mut sch = Schematic::new(Canvas::default());
    for (i, (tag, pins)) in expected.iter().enumerate() {
        let id = format!("u{i}");
        sch.add(tag, &id, PlaceConfig::at(i as f64 * 20.0, 0.0).rotated(90.0));
        let got: BTreeSet<&str> = sch.component(&id).unwrap().pin_names().collect();
        let want: BTreeSet<&str> = pins.iter().copied().collect();
        assert_eq!(got, want, "{tag}");
    }
}

#[test]
fn every_registered_type_can_be_placed() {
    let mut sch = Schematic::new(Canvas::default());
    for kind in ComponentType::all() {
        sch.add(kind.tag(), kind.tag(), PlaceConfig::at(0.0, 0.0));
        assert_eq!(sch.component(kind.tag()).unwrap().kind, Some(kind));
    }
    assert_eq!(sch.len(), ComponentType::all().count());
}

#[test]
fn rotation_by_full_turn_is_identity() {
    let mut sch = Schematic::new(Canvas::default());
    for (i, r) in [0.0, 90.0, 180.0, 270.0, -90.0].into_iter().enumerate() {
        let a = format!("a{i}");
        let b = format!("b{i}");
        sch.add("opamp", &a, PlaceConfig::at(40.0, -60.0).rotated(r));
        sch.add("opamp", &b, PlaceConfig::at(40.0, -60.0).rotated(r + 360.0));
        for pin in ["in_inv", "in_non", "out"] {
            assert!(approx(sch.pin(&a, pin).unwrap(), sch.pin(&b, pin).unwrap()), "{pin} at {r}");
        }
    }
}

#[test]
fn quarter_turn_resistor_at_origin() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("resistor", "r1", PlaceConfig::at(0.0, 0.0).rotated(90.0));
    assert!(approx(sch.pin("r1", "left").unwrap(), Point::new(0.0, -30.0)));
    assert!(approx(sch.pin("r1", "right").unwrap(), Point::new(0.0, 30.0)));
}

#[test]
fn side_by_side_resistors_route_horizontally() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("resistor", "r1", PlaceConfig::at(-100.0, 0.0));
    sch.add("resistor", "r2", PlaceConfig::at(100.0, 0.0));
    sch.connect("r1", "right", "r2", "left");

    let wires = wires(&sch);
    assert_eq!(wires.len(), 1);
    let pts = &wires[0].points;
    assert_eq!(pts.first(), Some(&Point::new(-70.0, 0.0)));
    assert_eq!(pts.last(), Some(&Point::new(70.0, 0.0)));
    assert_eq!(branch_for(pts[0], pts[3]), RouteBranch::Horizontal);
    assert!(pts.iter().all(|p| p.y == 0.0), "path should be straight: {pts:?}");
}

#[test]
fn stacked_components_route_vertically() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("resistor", "top", PlaceConfig::at(0.0, -100.0).rotated(90.0));
    sch.add("resistor", "bottom", PlaceConfig::at(0.0, 100.0).rotated(90.0));
    sch.connect("top", "right", "bottom", "left");

    let wires = wires(&sch);
    assert_eq!(wires.len(), 1);
    let pts = &wires[0].points;
    assert!(approx(pts[0], Point::new(0.0, -70.0)));
    assert!(approx(pts[3], Point::new(0.0, 70.0)));
    assert_eq!(branch_for(pts[0], pts[3]), RouteBranch::Vertical);
    assert!(pts.iter().all(|p| p.x.abs() < EPS), "path should be straight: {pts:?}");
}

#[test]
fn connect_emits_one_path_and_two_dots() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("voltage_source", "v1", PlaceConfig::at(-120.0, 0.0));
    sch.add("resistor", "r1", PlaceConfig::at(0.0, -80.0));
    sch.add("ground", "g1", PlaceConfig::at(-120.0, 80.0));
    let before = sch.sink().primitives().len();

    sch.connect("v1", "top", "r1", "left");
    let prims = sch.sink().primitives();
    assert_eq!(prims.len(), before + 3);
    assert!(prims[0].is_wire());
    assert_eq!(prims.iter().filter(|p| p.is_wire()).count(), 1);
    assert_eq!(prims.iter().filter(|p| p.is_dot()).count(), 2);
    assert!(prims[before + 1].is_dot() && prims[before + 2].is_dot());
}

#[test]
fn bad_connections_continue_the_sequence() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("resistor", "r1", PlaceConfig::at(-100.0, 0.0));
    sch.add("resistor", "r2", PlaceConfig::at(100.0, 0.0));

    sch.connect("nope", "left", "r2", "left");
    sch.connect("r1", "gate", "r2", "left");
    assert_eq!(sch.sink().primitives().len(), 2);

    sch.connect("r1", "right", "r2", "left");
    assert_eq!(wires(&sch).len(), 1);
}

#[test]
fn unknown_type_registers_with_no_pins() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("flux_capacitor", "fc", PlaceConfig::at(0.0, 0.0).labeled("1.21 GW"));
    let inst = sch.component("fc").unwrap();
    assert!(inst.kind.is_none());
    assert_eq!(inst.pin_names().count(), 0);
    sch.connect("fc", "left", "fc", "right");
    assert!(wires(&sch).is_empty());
    assert!(sch.export().contains("1.21 GW"));
}

#[test]
fn re_add_replaces_pose_pins_and_graphic() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("resistor", "r1", PlaceConfig::at(-100.0, 0.0).labeled("old"));
    sch.add("resistor", "r1", PlaceConfig::at(60.0, 40.0).rotated(180.0).labeled("new"));

    let inst = sch.component("r1").unwrap();
    assert_eq!(inst.pose.x, 60.0);
    assert!(approx(inst.pin("left").unwrap(), Point::new(90.0, 40.0)));
    assert!(approx(inst.pin("right").unwrap(), Point::new(30.0, 40.0)));

    let symbols: Vec<_> = sch
        .sink()
        .primitives()
        .iter()
        .filter(|p| p.owner() == Some("r1"))
        .collect();
    assert_eq!(symbols.len(), 1);
    let svg = sch.export();
    assert!(svg.contains(">new</text>"));
    assert!(!svg.contains(">old</text>"));
}

#[test]
fn reset_then_rebuild() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("battery", "b1", PlaceConfig::at(0.0, 0.0));
    sch.add("switch", "s1", PlaceConfig::at(100.0, -40.0));
    sch.connect("b1", "top", "s1", "left");
    let grid = sch.sink().decoration().len();

    sch.reset();
    assert!(sch.is_empty());
    assert!(sch.sink().primitives().is_empty());
    assert_eq!(sch.sink().decoration().len(), grid);

    // Connections against cleared ids are soft failures
    sch.connect("b1", "top", "s1", "left");
    assert!(sch.sink().primitives().is_empty());

    sch.add("battery", "b1", PlaceConfig::at(0.0, 0.0));
    assert_eq!(sch.len(), 1);
}

#[test]
fn export_of_empty_engine_is_decoration_only() {
    let sch = Schematic::new(Canvas::default());
    let svg = sch.export();
    assert!(svg.contains(r#"<g id="decoration">"#));
    assert!(!svg.contains(r#"class="component""#));
    assert!(!svg.contains(r#"class="wire""#));
}

#[test]
fn label_markup_is_escaped_in_export() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add(
        "resistor",
        "r1",
        PlaceConfig::at(0.0, 0.0).labeled(r#"</text><script>alert("x")</script>"#),
    );
    let svg = sch.export();
    assert!(!svg.contains("<script>"));
    assert!(svg.contains("&lt;/text&gt;&lt;script&gt;alert(&quot;x&quot;)"));
}

#[test]
fn common_emitter_amplifier() {
    let mut sch = Schematic::new(Canvas::default());
    sch.add("voltage_source", "vcc", PlaceConfig::at(-200.0, -40.0).labeled("9V"));
    sch.add("resistor", "rc", PlaceConfig::at(20.0, -100.0).rotated(90.0).labeled("4.7k"));
    sch.add("npn", "q1", PlaceConfig::at(0.0, 0.0).labeled("Q1"));
    sch.add("resistor", "re", PlaceConfig::at(20.0, 100.0).rotated(90.0).labeled("1k"));
    sch.add("ground", "gnd", PlaceConfig::at(20.0, 180.0));
    sch.add("capacitor", "cin", PlaceConfig::at(-100.0, 0.0).labeled("100n"));

    sch.connect("rc", "right", "q1", "collector");
    sch.connect("q1", "emitter", "re", "left");
    sch.connect("re", "right", "gnd", "top");
    sch.connect("cin", "right", "q1", "base");
    sch.connect("vcc", "top", "rc", "left");

    assert_eq!(sch.len(), 6);
    let prims = sch.sink().primitives();
    assert_eq!(prims.iter().filter(|p| p.is_wire()).count(), 5);
    assert_eq!(prims.iter().filter(|p| p.is_dot()).count(), 10);
    // Wires occupy the bottom of the draw order
    assert!(prims[..5].iter().all(Primitive::is_wire));

    for wire in wires(&sch) {
        for seg in wire.points.windows(2) {
            assert!(
                (seg[0].x - seg[1].x).abs() < EPS || (seg[0].y - seg[1].y).abs() < EPS,
                "diagonal segment in {} -> {}",
                wire.from,
                wire.to
            );
        }
    }

    let json = sch.to_json().unwrap();
    assert!(json.contains("\"collector\""));
}
