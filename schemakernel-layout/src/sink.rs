//! Drawing sink: the ordered primitive list the engine draws into.
//!
//! The engine only ever talks to the [`DrawingSink`] trait. [`Canvas`] is the
//! concrete sink used for SVG export: it keeps the host's static decoration
//! (the background grid) in a separate layer that the engine cannot reach,
//! so `clear` only ever removes the engine's own diagram.

use crate::config::{CanvasConfig, Style};
use crate::types::{Decoration, Point, Primitive};

/// Ordered collection of diagram primitives. Index 0 draws first (bottom).
pub trait DrawingSink {
    /// Draw on top of everything already present.
    fn append(&mut self, primitive: Primitive);

    /// Draw behind everything already present.
    fn insert_back(&mut self, primitive: Primitive);

    /// Remove every primitive owned by component `id`; returns how many went.
    fn remove_owned(&mut self, id: &str) -> usize;

    /// Remove all diagram primitives. Host decoration is not affected.
    fn clear(&mut self);

    /// Diagram primitives in draw order.
    fn primitives(&self) -> &[Primitive];
}

impl<T: DrawingSink + ?Sized> DrawingSink for &mut T {
    fn append(&mut self, primitive: Primitive) {
        (**self).append(primitive);
    }

    fn insert_back(&mut self, primitive: Primitive) {
        (**self).insert_back(primitive);
    }

    fn remove_owned(&mut self, id: &str) -> usize {
        (**self).remove_owned(id)
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn primitives(&self) -> &[Primitive] {
        (**self).primitives()
    }
}

/// Vector drawing surface: host decoration layer + engine diagram layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    config: CanvasConfig,
    style: Style,
    decoration: Vec<Decoration>,
    diagram: Vec<Primitive>,
}

impl Canvas {
    pub fn new(config: CanvasConfig, style: Style) -> Self {
        let decoration = if config.show_grid {
            grid_lines(config.width, config.height, config.grid)
        } else {
            Vec::new()
        };
        Self {
            config,
            style,
            decoration,
            diagram: Vec::new(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn decoration(&self) -> &[Decoration] {
        &self.decoration
    }

    /// Host-side hook for adding static decoration.
    pub fn add_decoration(&mut self, decoration: Decoration) {
        self.decoration.push(decoration);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), Style::default())
    }
}

impl DrawingSink for Canvas {
    fn append(&mut self, primitive: Primitive) {
        self.diagram.push(primitive);
    }

    fn insert_back(&mut self, primitive: Primitive) {
        self.diagram.insert(0, primitive);
    }

    fn remove_owned(&mut self, id: &str) -> usize {
        let before = self.diagram.len();
        self.diagram.retain(|p| p.owner() != Some(id));
        before - self.diagram.len()
    }

    fn clear(&mut self) {
        self.diagram.clear();
    }

    fn primitives(&self) -> &[Primitive] {
        &self.diagram
    }
}

/// Grid lines through the origin at multiples of `spacing`, covering a
/// `width` × `height` area centred on it.
fn grid_lines(width: f64, height: f64, spacing: f64) -> Vec<Decoration> {
    if !(spacing > 0.0) || !width.is_finite() || !height.is_finite() {
        return Vec::new();
    }
    let (half_w, half_h) = (width / 2.0, height / 2.0);
    let mut lines = Vec::new();

    let first = (-half_w / spacing).ceil() as i64;
    let last = (half_w / spacing).floor() as i64;
    for k in first..=last {
        let x = k as f64 * spacing;
        lines.push(Decoration::GridLine {
            from: Point::new(x, -half_h),
            to: Point::new(x, half_h),
        });
    }

    let first = (-half_h / spacing).ceil() as i64;
    let last = (half_h / spacing).floor() as i64;
    for k in first..=last {
        let y = k as f64 * spacing;
        lines.push(Decoration::GridLine {
            from: Point::new(-half_w, y),
            to: Point::new(half_w, y),
        });
    }

    lines
}
