//! Component symbol definitions.
//!
//! Each component type maps to a fixed template: vector shapes built from
//! path commands (move_to, line_to, quad_to, arc_to, close) and circles, plus
//! the named pins a wire may attach to. Templates are drawn unrotated and
//! centred on (0, 0) on the 20-unit schematic grid; placement applies the pose.
//!
//! Lookup goes through [`SYMBOL_TABLE`], a static registry of tag → template
//! function. Supporting a new part means adding a [`ComponentType`] variant
//! and one table row.

use crate::types::{PathCmd, Point, Shape};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

/// Enumeration of every component type the library can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    Led,
    VoltageSource,
    CurrentSource,
    Ground,
    OpAmp,
    NpnBjt,
    PnpBjt,
    Nmos,
    Pmos,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Potentiometer,
    Switch,
    Battery,
    Transformer,
}

impl ComponentType {
    /// Resolve a caller-supplied type tag. Matching ignores ASCII case and
    /// treats `-` and spaces as `_`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        SYMBOL_TABLE
            .iter()
            .find(|entry| entry.tags.contains(&normalized.as_str()))
            .map(|entry| entry.kind)
    }

    /// Canonical tag (the first tag in the registry row).
    pub fn tag(self) -> &'static str {
        entry_for(self).map_or("", |e| e.tags[0])
    }

    /// All registered types, in table order.
    pub fn all() -> impl Iterator<Item = ComponentType> {
        SYMBOL_TABLE.iter().map(|entry| entry.kind)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Named attachment point in symbol-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PinDef {
    pub name: &'static str,
    pub offset: Point,
}

/// Local geometry plus pin offsets for one component type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Symbol {
    pub shapes: Vec<Shape>,
    pub pins: Vec<PinDef>,
}

impl Symbol {
    fn new(shapes: Vec<Shape>, pins: &[(&'static str, f64, f64)]) -> Self {
        Self {
            shapes,
            pins: pins
                .iter()
                .map(|&(name, x, y)| PinDef {
                    name,
                    offset: Point::new(x, y),
                })
                .collect(),
        }
    }

    pub fn pin(&self, name: &str) -> Option<Point> {
        self.pins.iter().find(|p| p.name == name).map(|p| p.offset)
    }

    pub fn pin_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pins.iter().map(|p| p.name)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.pins.is_empty()
    }
}

/// One registry row: type, accepted tags (canonical first), template.
pub struct SymbolEntry {
    pub kind: ComponentType,
    pub tags: &'static [&'static str],
    pub build: fn() -> Symbol,
}

/// Static symbol registry.
pub static SYMBOL_TABLE: &[SymbolEntry] = &[
    SymbolEntry { kind: ComponentType::Resistor, tags: &["resistor", "res", "r"], build: resistor },
    SymbolEntry { kind: ComponentType::Capacitor, tags: &["capacitor", "cap", "c"], build: capacitor },
    SymbolEntry { kind: ComponentType::Inductor, tags: &["inductor", "coil", "l"], build: inductor },
    SymbolEntry { kind: ComponentType::Diode, tags: &["diode", "d"], build: diode },
    SymbolEntry { kind: ComponentType::Led, tags: &["led"], build: led },
    SymbolEntry {
        kind: ComponentType::VoltageSource,
        tags: &["voltage_source", "voltage", "vsource", "dc_source"],
        build: voltage_source,
    },
    SymbolEntry {
        kind: ComponentType::CurrentSource,
        tags: &["current_source", "current", "isource"],
        build: current_source,
    },
    SymbolEntry { kind: ComponentType::Ground, tags: &["ground", "gnd"], build: ground },
    SymbolEntry { kind: ComponentType::OpAmp, tags: &["opamp", "op_amp"], build: opamp },
    SymbolEntry { kind: ComponentType::NpnBjt, tags: &["npn", "bjt_npn", "npn_bjt"], build: npn_bjt },
    SymbolEntry { kind: ComponentType::PnpBjt, tags: &["pnp", "bjt_pnp", "pnp_bjt"], build: pnp_bjt },
    SymbolEntry { kind: ComponentType::Nmos, tags: &["nmos", "mosfet_n", "nmosfet"], build: nmos },
    SymbolEntry { kind: ComponentType::Pmos, tags: &["pmos", "mosfet_p", "pmosfet"], build: pmos },
    SymbolEntry { kind: ComponentType::And, tags: &["and", "and_gate"], build: and_gate },
    SymbolEntry { kind: ComponentType::Or, tags: &["or", "or_gate"], build: or_gate },
    SymbolEntry { kind: ComponentType::Not, tags: &["not", "not_gate", "inverter"], build: not_gate },
    SymbolEntry { kind: ComponentType::Nand, tags: &["nand", "nand_gate"], build: nand_gate },
    SymbolEntry { kind: ComponentType::Nor, tags: &["nor", "nor_gate"], build: nor_gate },
    SymbolEntry { kind: ComponentType::Xor, tags: &["xor", "xor_gate"], build: xor_gate },
    SymbolEntry {
        kind: ComponentType::Potentiometer,
        tags: &["potentiometer", "pot"],
        build: potentiometer,
    },
    SymbolEntry { kind: ComponentType::Switch, tags: &["switch", "sw"], build: switch },
    SymbolEntry { kind: ComponentType::Battery, tags: &["battery", "cell"], build: battery },
    SymbolEntry { kind: ComponentType::Transformer, tags: &["transformer", "xfmr"], build: transformer },
];

fn entry_for(kind: ComponentType) -> Option<&'static SymbolEntry> {
    SYMBOL_TABLE.iter().find(|entry| entry.kind == kind)
}

/// Get the template for a component type.
pub fn symbol_for(kind: ComponentType) -> Symbol {
    entry_for(kind).map(|e| (e.build)()).unwrap_or_default()
}

/// Get the template for a raw type tag. Unknown tags yield an empty symbol.
pub fn symbol_for_tag(tag: &str) -> Symbol {
    ComponentType::from_tag(tag).map(symbol_for).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

use PathCmd::{ArcTo, Close, LineTo, MoveTo, QuadTo};

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
    Shape::stroke(vec![MoveTo(x1, y1), LineTo(x2, y2)])
}

fn polyline(points: &[(f64, f64)]) -> Shape {
    let mut cmds = Vec::with_capacity(points.len());
    for (i, &(x, y)) in points.iter().enumerate() {
        cmds.push(if i == 0 { MoveTo(x, y) } else { LineTo(x, y) });
    }
    Shape::stroke(cmds)
}

fn filled_triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Shape {
    Shape::fill(vec![MoveTo(a.0, a.1), LineTo(b.0, b.1), LineTo(c.0, c.1), Close])
}

// ---------------------------------------------------------------------------
// Passives
// ---------------------------------------------------------------------------

/// American-style zigzag resistor.
fn resistor() -> Symbol {
    Symbol::new(
        vec![polyline(&[
            (-30.0, 0.0),
            (-20.0, 0.0),
            (-17.5, -7.0),
            (-12.5, 7.0),
            (-7.5, -7.0),
            (-2.5, 7.0),
            (2.5, -7.0),
            (7.5, 7.0),
            (12.5, -7.0),
            (17.5, 7.0),
            (20.0, 0.0),
            (30.0, 0.0),
        ])],
        &[("left", -30.0, 0.0), ("right", 30.0, 0.0)],
    )
}

/// Non-polarized capacitor: two parallel plates.
fn capacitor() -> Symbol {
    Symbol::new(
        vec![
            line(-30.0, 0.0, -4.0, 0.0),
            line(-4.0, -12.0, -4.0, 12.0),
            line(4.0, -12.0, 4.0, 12.0),
            line(4.0, 0.0, 30.0, 0.0),
        ],
        &[("left", -30.0, 0.0), ("right", 30.0, 0.0)],
    )
}

/// Inductor: four coil bumps.
fn inductor() -> Symbol {
    let mut cmds = vec![MoveTo(-30.0, 0.0), LineTo(-20.0, 0.0)];
    for cx in [-15.0, -5.0, 5.0, 15.0] {
        cmds.push(ArcTo(cx, 0.0, 5.0, PI, TAU));
    }
    cmds.push(LineTo(30.0, 0.0));
    Symbol::new(
        vec![Shape::stroke(cmds)],
        &[("left", -30.0, 0.0), ("right", 30.0, 0.0)],
    )
}

fn diode_body() -> Vec<Shape> {
    vec![
        line(-30.0, 0.0, -10.0, 0.0),
        Shape::stroke(vec![MoveTo(-10.0, -10.0), LineTo(-10.0, 10.0), LineTo(10.0, 0.0), Close]),
        // Cathode bar
        line(10.0, -10.0, 10.0, 10.0),
        line(10.0, 0.0, 30.0, 0.0),
    ]
}

/// Diode: triangle + cathode bar.
fn diode() -> Symbol {
    Symbol::new(diode_body(), &[("anode", -30.0, 0.0), ("cathode", 30.0, 0.0)])
}

/// LED: diode with two emission arrows.
fn led() -> Symbol {
    let mut shapes = diode_body();
    for dx in [0.0, 7.0] {
        shapes.push(line(1.0 + dx, -13.0, 8.0 + dx, -20.0));
        shapes.push(filled_triangle((10.0 + dx, -22.0), (4.5 + dx, -20.5), (8.5 + dx, -16.5)));
    }
    Symbol::new(shapes, &[("anode", -30.0, 0.0), ("cathode", 30.0, 0.0)])
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

fn source_frame() -> Vec<Shape> {
    vec![
        Shape::ring(0.0, 0.0, 20.0),
        line(0.0, -40.0, 0.0, -20.0),
        line(0.0, 20.0, 0.0, 40.0),
    ]
}

/// Independent voltage source: circle with polarity marks.
fn voltage_source() -> Symbol {
    let mut shapes = source_frame();
    // Plus
    shapes.push(line(-5.0, -10.0, 5.0, -10.0));
    shapes.push(line(0.0, -15.0, 0.0, -5.0));
    // Minus
    shapes.push(line(-5.0, 10.0, 5.0, 10.0));
    Symbol::new(shapes, &[("top", 0.0, -40.0), ("bottom", 0.0, 40.0)])
}

/// Independent current source: circle with an upward arrow.
fn current_source() -> Symbol {
    let mut shapes = source_frame();
    shapes.push(line(0.0, 12.0, 0.0, -6.0));
    shapes.push(filled_triangle((0.0, -13.0), (-5.0, -5.0), (5.0, -5.0)));
    Symbol::new(shapes, &[("top", 0.0, -40.0), ("bottom", 0.0, 40.0)])
}

/// Ground symbol: three horizontal lines.
fn ground() -> Symbol {
    Symbol::new(
        vec![
            line(0.0, -20.0, 0.0, 0.0),
            line(-15.0, 0.0, 15.0, 0.0),
            line(-9.0, 5.0, 9.0, 5.0),
            line(-3.0, 10.0, 3.0, 10.0),
        ],
        &[("top", 0.0, -20.0)],
    )
}

/// Battery: long (positive) and short plates, vertical.
fn battery() -> Symbol {
    Symbol::new(
        vec![
            line(0.0, -40.0, 0.0, -6.0),
            line(-15.0, -6.0, 15.0, -6.0),
            line(-7.0, 6.0, 7.0, 6.0),
            line(0.0, 6.0, 0.0, 40.0),
            // Plus mark
            line(18.0, -14.0, 24.0, -14.0),
            line(21.0, -17.0, 21.0, -11.0),
        ],
        &[("top", 0.0, -40.0), ("bottom", 0.0, 40.0)],
    )
}

// ---------------------------------------------------------------------------
// Actives
// ---------------------------------------------------------------------------

/// Op-amp: triangle, inverting input on top.
fn opamp() -> Symbol {
    Symbol::new(
        vec![
            Shape::stroke(vec![MoveTo(-25.0, -30.0), LineTo(-25.0, 30.0), LineTo(30.0, 0.0), Close]),
            line(-40.0, -20.0, -25.0, -20.0),
            line(-40.0, 20.0, -25.0, 20.0),
            line(30.0, 0.0, 40.0, 0.0),
            // Inverting input (-)
            line(-21.0, -20.0, -13.0, -20.0),
            // Non-inverting input (+)
            line(-21.0, 20.0, -13.0, 20.0),
            line(-17.0, 16.0, -17.0, 24.0),
        ],
        &[("in_inv", -40.0, -20.0), ("in_non", -40.0, 20.0), ("out", 40.0, 0.0)],
    )
}

fn bjt_body() -> Vec<Shape> {
    vec![
        // Base lead and bar
        line(-30.0, 0.0, -5.0, 0.0),
        line(-5.0, -12.0, -5.0, 12.0),
        // Collector
        polyline(&[(-5.0, -6.0), (20.0, -20.0), (20.0, -30.0)]),
        // Emitter
        polyline(&[(-5.0, 6.0), (20.0, 20.0), (20.0, 30.0)]),
    ]
}

const BJT_PINS: &[(&str, f64, f64)] =
    &[("base", -30.0, 0.0), ("collector", 20.0, -30.0), ("emitter", 20.0, 30.0)];

/// NPN BJT: emitter arrow pointing out.
fn npn_bjt() -> Symbol {
    let mut shapes = bjt_body();
    shapes.push(filled_triangle((16.0, 17.8), (8.0, 17.9), (12.0, 10.9)));
    Symbol::new(shapes, BJT_PINS)
}

/// PNP BJT: emitter arrow pointing in.
fn pnp_bjt() -> Symbol {
    let mut shapes = bjt_body();
    shapes.push(filled_triangle((0.0, 8.8), (4.0, 15.7), (8.0, 8.7)));
    Symbol::new(shapes, BJT_PINS)
}

fn mosfet_body() -> Vec<Shape> {
    vec![
        // Gate
        line(-30.0, 0.0, -10.0, 0.0),
        line(-10.0, -15.0, -10.0, 15.0),
        // Channel (three segments, enhancement mode)
        line(-4.0, -18.0, -4.0, -8.0),
        line(-4.0, -5.0, -4.0, 5.0),
        line(-4.0, 8.0, -4.0, 18.0),
        // Drain
        polyline(&[(-4.0, -13.0), (20.0, -13.0), (20.0, -30.0)]),
        // Source
        polyline(&[(-4.0, 13.0), (20.0, 13.0), (20.0, 30.0)]),
        // Body tied to source
        polyline(&[(-4.0, 0.0), (20.0, 0.0), (20.0, 13.0)]),
    ]
}

const MOSFET_PINS: &[(&str, f64, f64)] =
    &[("gate", -30.0, 0.0), ("drain", 20.0, -30.0), ("source", 20.0, 30.0)];

/// N-channel MOSFET: body arrow pointing in.
fn nmos() -> Symbol {
    let mut shapes = mosfet_body();
    shapes.push(filled_triangle((-4.0, 0.0), (4.0, -4.0), (4.0, 4.0)));
    Symbol::new(shapes, MOSFET_PINS)
}

/// P-channel MOSFET: body arrow pointing out.
fn pmos() -> Symbol {
    let mut shapes = mosfet_body();
    shapes.push(filled_triangle((12.0, 0.0), (4.0, -4.0), (4.0, 4.0)));
    Symbol::new(shapes, MOSFET_PINS)
}

// ---------------------------------------------------------------------------
// Logic gates
// ---------------------------------------------------------------------------

const GATE_PINS: &[(&str, f64, f64)] = &[("in1", -40.0, -10.0), ("in2", -40.0, 10.0), ("out", 40.0, 0.0)];

fn and_body() -> Shape {
    Shape::stroke(vec![
        MoveTo(-20.0, -20.0),
        LineTo(0.0, -20.0),
        ArcTo(0.0, 0.0, 20.0, -FRAC_PI_2, FRAC_PI_2),
        LineTo(-20.0, 20.0),
        Close,
    ])
}

fn or_body() -> Shape {
    Shape::stroke(vec![
        MoveTo(-22.0, -20.0),
        QuadTo(0.0, -20.0, 22.0, 0.0),
        QuadTo(0.0, 20.0, -22.0, 20.0),
        QuadTo(-12.0, 0.0, -22.0, -20.0),
        Close,
    ])
}

/// Input leads reaching the gate body at `body_x`.
fn gate_inputs(body_x: f64) -> [Shape; 2] {
    [line(-40.0, -10.0, body_x, -10.0), line(-40.0, 10.0, body_x, 10.0)]
}

/// Inversion bubble at `x` followed by the output lead.
fn inverted_output(x: f64) -> [Shape; 2] {
    [Shape::ring(x + 4.0, 0.0, 4.0), line(x + 8.0, 0.0, 40.0, 0.0)]
}

fn and_gate() -> Symbol {
    let mut shapes = vec![and_body(), line(20.0, 0.0, 40.0, 0.0)];
    shapes.extend(gate_inputs(-20.0));
    Symbol::new(shapes, GATE_PINS)
}

fn nand_gate() -> Symbol {
    let mut shapes = vec![and_body()];
    shapes.extend(gate_inputs(-20.0));
    shapes.extend(inverted_output(20.0));
    Symbol::new(shapes, GATE_PINS)
}

fn or_gate() -> Symbol {
    let mut shapes = vec![or_body(), line(22.0, 0.0, 40.0, 0.0)];
    shapes.extend(gate_inputs(-18.0));
    Symbol::new(shapes, GATE_PINS)
}

fn nor_gate() -> Symbol {
    let mut shapes = vec![or_body()];
    shapes.extend(gate_inputs(-18.0));
    shapes.extend(inverted_output(22.0));
    Symbol::new(shapes, GATE_PINS)
}

/// XOR: OR body with a second back curve.
fn xor_gate() -> Symbol {
    let mut shapes = vec![
        or_body(),
        Shape::stroke(vec![MoveTo(-28.0, 20.0), QuadTo(-18.0, 0.0, -28.0, -20.0)]),
        line(22.0, 0.0, 40.0, 0.0),
    ];
    shapes.extend(gate_inputs(-18.0));
    Symbol::new(shapes, GATE_PINS)
}

/// NOT: buffer triangle with output bubble.
fn not_gate() -> Symbol {
    let mut shapes = vec![
        Shape::stroke(vec![MoveTo(-20.0, -15.0), LineTo(-20.0, 15.0), LineTo(14.0, 0.0), Close]),
        line(-40.0, 0.0, -20.0, 0.0),
    ];
    shapes.extend(inverted_output(14.0));
    Symbol::new(shapes, &[("in", -40.0, 0.0), ("out", 40.0, 0.0)])
}

// ---------------------------------------------------------------------------
// Composite devices
// ---------------------------------------------------------------------------

/// Potentiometer: resistor with an arrow wiper from above.
fn potentiometer() -> Symbol {
    let mut shapes = resistor().shapes;
    shapes.push(line(0.0, -30.0, 0.0, -15.0));
    shapes.push(filled_triangle((0.0, -8.0), (-4.0, -15.0), (4.0, -15.0)));
    Symbol::new(
        shapes,
        &[("left", -30.0, 0.0), ("right", 30.0, 0.0), ("wiper", 0.0, -30.0)],
    )
}

/// SPST switch, drawn open.
fn switch() -> Symbol {
    Symbol::new(
        vec![
            line(-30.0, 0.0, -18.0, 0.0),
            Shape::ring(-15.0, 0.0, 3.0),
            Shape::ring(15.0, 0.0, 3.0),
            line(18.0, 0.0, 30.0, 0.0),
            // Arm
            line(-12.5, -1.5, 14.0, -14.0),
        ],
        &[("left", -30.0, 0.0), ("right", 30.0, 0.0)],
    )
}

/// Transformer: two coupled coils around a core.
fn transformer() -> Symbol {
    let mut primary = vec![MoveTo(-30.0, -20.0), LineTo(-10.0, -20.0)];
    let mut secondary = vec![MoveTo(30.0, -20.0), LineTo(10.0, -20.0)];
    for cy in [-15.0, -5.0, 5.0, 15.0] {
        // Primary bumps face left, secondary bumps face right
        primary.push(ArcTo(-10.0, cy, 5.0, -FRAC_PI_2, -3.0 * FRAC_PI_2));
        secondary.push(ArcTo(10.0, cy, 5.0, -FRAC_PI_2, FRAC_PI_2));
    }
    primary.push(LineTo(-30.0, 20.0));
    secondary.push(LineTo(30.0, 20.0));
    Symbol::new(
        vec![
            Shape::stroke(primary),
            line(-3.0, -22.0, -3.0, 22.0),
            line(3.0, -22.0, 3.0, 22.0),
            Shape::stroke(secondary),
        ],
        &[
            ("pri_top", -30.0, -20.0),
            ("pri_bottom", -30.0, 20.0),
            ("sec_top", 30.0, -20.0),
            ("sec_bottom", 30.0, 20.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn pin_set(kind: ComponentType) -> BTreeSet<&'static str> {
        symbol_for(kind).pin_names().collect()
    }

    fn set(names: &[&'static str]) -> BTreeSet<&'static str> {
        names.iter().copied().collect()
    }

    #[test]
    fn every_type_has_geometry_and_pins() {
        for kind in ComponentType::all() {
            let sym = symbol_for(kind);
            assert!(!sym.shapes.is_empty(), "{kind} has no shapes");
            assert!(!sym.pins.is_empty(), "{kind} has no pins");
        }
    }

    #[test]
    fn pin_names_are_unique_per_type() {
        for kind in ComponentType::all() {
            let sym = symbol_for(kind);
            let unique: BTreeSet<_> = sym.pin_names().collect();
            assert_eq!(unique.len(), sym.pins.len(), "{kind} repeats a pin name");
        }
    }

    #[test]
    fn pin_contracts() {
        use ComponentType::*;
        for kind in [Resistor, Capacitor, Inductor] {
            assert_eq!(pin_set(kind), set(&["left", "right"]));
        }
        for kind in [Diode, Led] {
            assert_eq!(pin_set(kind), set(&["anode", "cathode"]));
        }
        for kind in [VoltageSource, CurrentSource] {
            assert_eq!(pin_set(kind), set(&["top", "bottom"]));
        }
        assert_eq!(pin_set(Ground), set(&["top"]));
        assert_eq!(pin_set(OpAmp), set(&["in_inv", "in_non", "out"]));
        for kind in [NpnBjt, PnpBjt] {
            assert_eq!(pin_set(kind), set(&["base", "collector", "emitter"]));
        }
        for kind in [Nmos, Pmos] {
            assert_eq!(pin_set(kind), set(&["gate", "drain", "source"]));
        }
        assert_eq!(pin_set(Not), set(&["in", "out"]));
        for kind in [And, Or, Nand, Nor, Xor] {
            assert_eq!(pin_set(kind), set(&["in1", "in2", "out"]));
        }
    }

    #[test]
    fn two_terminal_passives_sit_on_the_grid() {
        let sym = symbol_for(ComponentType::Resistor);
        assert_eq!(sym.pin("left"), Some(Point::new(-30.0, 0.0)));
        assert_eq!(sym.pin("right"), Some(Point::new(30.0, 0.0)));
    }

    #[test]
    fn tags_resolve_with_aliases_and_case() {
        assert_eq!(ComponentType::from_tag("resistor"), Some(ComponentType::Resistor));
        assert_eq!(ComponentType::from_tag("Op-Amp"), Some(ComponentType::OpAmp));
        assert_eq!(ComponentType::from_tag(" NPN "), Some(ComponentType::NpnBjt));
        assert_eq!(ComponentType::from_tag("voltage source"), Some(ComponentType::VoltageSource));
        assert_eq!(ComponentType::from_tag("flux_capacitor"), None);
    }

    #[test]
    fn canonical_tags_round_trip() {
        for kind in ComponentType::all() {
            assert_eq!(ComponentType::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_yields_empty_symbol() {
        let sym = symbol_for_tag("warp_core");
        assert!(sym.is_empty());
        assert_eq!(sym.pin("left"), None);
    }

    #[test]
    fn leads_end_at_pins() {
        // Each pin should coincide with some path vertex so wires meet the drawing.
        for kind in ComponentType::all() {
            let sym = symbol_for(kind);
            let vertices: Vec<Point> = sym
                .shapes
                .iter()
                .filter_map(|s| match s {
                    Shape::Path { cmds, .. } => Some(cmds),
                    Shape::Circle { .. } => None,
                })
                .flatten()
                .filter_map(|c| match *c {
                    MoveTo(x, y) | LineTo(x, y) => Some(Point::new(x, y)),
                    _ => None,
                })
                .collect();
            for pin in &sym.pins {
                assert!(
                    vertices.iter().any(|v| v.distance(pin.offset) < 1e-9),
                    "{kind}.{} is not on a lead",
                    pin.name
                );
            }
        }
    }
}
