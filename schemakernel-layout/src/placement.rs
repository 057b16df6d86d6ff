//! Placement: symbol template + pose → absolute pins and a drawable graphic.
//!
//! Pins go through the pose transform (rotate about the symbol origin, then
//! translate). The symbol's shapes are kept in local coordinates and carry
//! the same pose, so the exporter can emit them under a single
//! `translate(x y) rotate(r)` group.

use crate::registry::ComponentInstance;
use crate::symbols::{symbol_for, ComponentType, Symbol};
use crate::types::{Label, PlaceConfig, Point, Pose, SymbolGraphic};
use std::collections::BTreeMap;

/// Result of placing one component.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub instance: ComponentInstance,
    pub graphic: SymbolGraphic,
}

/// Absolute position of every pin in `symbol` under `pose`.
pub fn absolute_pins(symbol: &Symbol, pose: Pose) -> BTreeMap<String, Point> {
    symbol
        .pins
        .iter()
        .map(|pin| (pin.name.to_string(), pose.apply(pin.offset)))
        .collect()
}

/// Label above the symbol origin, counter-rotated to stay upright.
fn label_for(text: &str, pose: Pose, offset: f64) -> Label {
    Label {
        text: text.to_string(),
        anchor: Point::new(0.0, -offset),
        rotation: -pose.rotation,
    }
}

/// Place a component of type `tag` under `id`.
///
/// Unknown tags produce an instance with no pins and a graphic with no
/// shapes (the label, if any, is still drawn).
pub fn place(tag: &str, id: &str, config: &PlaceConfig, label_offset: f64) -> Placement {
    let kind = ComponentType::from_tag(tag);
    let symbol = kind.map(symbol_for).unwrap_or_default();
    let pose = config.pose();

    let instance = ComponentInstance {
        id: id.to_string(),
        tag: tag.to_string(),
        kind,
        pose,
        label: config.label.clone(),
        pins: absolute_pins(&symbol, pose),
    };
    let graphic = SymbolGraphic {
        id: id.to_string(),
        kind: tag.to_string(),
        pose,
        shapes: symbol.shapes,
        label: config
            .label
            .as_deref()
            .map(|text| label_for(text, pose, label_offset)),
    };

    Placement { instance, graphic }
}
