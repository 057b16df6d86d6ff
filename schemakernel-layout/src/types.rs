//! Geometry and drawing types for the schematic engine.
//!
//! Everything the engine pushes into a [`crate::sink::DrawingSink`] derives
//! [`serde::Serialize`] so a diagram can be snapshotted to JSON next to the
//! SVG export.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in the logical drawing plane (origin at the drawing centre, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate about the origin by `degrees`.
    ///
    /// Uses the standard matrix `(x cos θ − y sin θ, x sin θ + y cos θ)`, which
    /// on a y-down canvas turns clockwise, matching SVG `rotate()`.
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Position and orientation of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Degrees. Conventionally a multiple of 90 but any value is accepted.
    pub rotation: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    /// Map a symbol-local point into the drawing plane: rotate, then translate.
    pub fn apply(&self, local: Point) -> Point {
        local.rotated(self.rotation).translated(self.x, self.y)
    }
}

/// Caller-supplied placement for [`crate::Schematic::add`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceConfig {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PlaceConfig {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.rotation)
    }
}

/// A path command for vector symbol rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    /// Move to (x, y) without drawing.
    MoveTo(f64, f64),
    /// Draw a line to (x, y).
    LineTo(f64, f64),
    /// Quadratic curve: control point (cx, cy), end point (x, y).
    QuadTo(f64, f64, f64, f64),
    /// Arc: center (cx, cy), radius, start_angle, end_angle (radians).
    /// Angles increase clockwise on screen; a line joins the pen to the
    /// arc's start point.
    ArcTo(f64, f64, f64, f64, f64),
    /// Close the current sub-path.
    Close,
}

/// One stroked or filled element of a symbol template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Path { cmds: Vec<PathCmd>, filled: bool },
    Circle { cx: f64, cy: f64, r: f64, filled: bool },
}

impl Shape {
    pub fn stroke(cmds: Vec<PathCmd>) -> Self {
        Shape::Path {
            cmds,
            filled: false,
        }
    }

    pub fn fill(cmds: Vec<PathCmd>) -> Self {
        Shape::Path { cmds, filled: true }
    }

    pub fn ring(cx: f64, cy: f64, r: f64) -> Self {
        Shape::Circle {
            cx,
            cy,
            r,
            filled: false,
        }
    }

    pub fn disc(cx: f64, cy: f64, r: f64) -> Self {
        Shape::Circle {
            cx,
            cy,
            r,
            filled: true,
        }
    }
}

/// Reference to a named pin on a registered component, e.g. `r1.right`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRef {
    pub component: String,
    pub pin: String,
}

impl PinRef {
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

/// Text drawn with a component, in the component's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Anchor in symbol-local coordinates; the text is centred on it.
    pub anchor: Point,
    /// Rotation applied about the anchor. Always the negated component
    /// rotation so the text reads upright.
    pub rotation: f64,
}

/// A component symbol as drawn: template shapes under a pose transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolGraphic {
    /// Component id that owns this graphic.
    pub id: String,
    /// Type tag as given by the caller.
    pub kind: String,
    pub pose: Pose,
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

/// A routed wire (sequence of orthogonal segments) in absolute coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePath {
    pub from: PinRef,
    pub to: PinRef,
    pub points: Vec<Point>,
}

/// Filled connection marker at a wire endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolderDot {
    pub center: Point,
    pub radius: f64,
}

/// Anything the engine draws into its diagram layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Symbol(SymbolGraphic),
    Wire(WirePath),
    Dot(SolderDot),
}

impl Primitive {
    /// Component id whose placement produced this primitive, if any.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Primitive::Symbol(g) => Some(&g.id),
            Primitive::Wire(_) | Primitive::Dot(_) => None,
        }
    }

    pub fn is_wire(&self) -> bool {
        matches!(self, Primitive::Wire(_))
    }

    pub fn is_dot(&self) -> bool {
        matches!(self, Primitive::Dot(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Primitive::Symbol(_))
    }
}

/// Host-owned static decoration, never touched by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decoration {
    /// Background grid line.
    GridLine { from: Point, to: Point },
}
