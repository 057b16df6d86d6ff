//! Schematic rendering engine.
//!
//! Turns an ordered sequence of `add` / `connect` instructions into a vector
//! drawing of a circuit:
//!
//! ```text
//! add(type, id, config)
//!   → Symbol library   (local geometry + named pin offsets)
//!   → Placement        (rotate, translate → absolute pins)
//!   → Registry         (id → placed component)
//!   → Drawing sink     (symbol graphic appended on top)
//!
//! connect(from, pin, to, pin)
//!   → Registry lookup  (unknown id / pin → warning, nothing drawn)
//!   → Routing          (two-bend Manhattan path)
//!   → Drawing sink     (wire inserted at the back, solder dots on top)
//!
//! export()             → SVG of decoration + diagram
//! reset()              → empty registry, empty diagram, decoration kept
//! ```
//!
//! ```
//! use schemakernel_layout::{Canvas, PlaceConfig, Schematic};
//!
//! let mut sch = Schematic::new(Canvas::default());
//! sch.add("resistor", "r1", PlaceConfig::at(-100.0, 0.0).labeled("R1"));
//! sch.add("resistor", "r2", PlaceConfig::at(100.0, 0.0));
//! sch.connect("r1", "right", "r2", "left");
//! let svg = sch.export();
//! assert!(svg.contains("class=\"wire\""));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod placement;
pub mod registry;
pub mod routing;
pub mod sink;
pub mod symbols;
pub mod types;

pub use config::{DuplicatePolicy, RenderConfig};
pub use error::{ConnectError, PlacementError};
pub use export::Export;
pub use registry::{ComponentInstance, ComponentRegistry};
pub use sink::{Canvas, DrawingSink};
pub use symbols::ComponentType;
pub use types::{PinRef, PlaceConfig, Point, Pose, Primitive};

use log::{debug, warn};
use serde::Serialize;
use types::{SolderDot, WirePath};

/// Engine knobs that affect what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub duplicate_ids: DuplicatePolicy,
    pub label_offset: f64,
    pub dot_radius: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicatePolicy::Replace,
            label_offset: 30.0,
            dot_radius: 3.0,
        }
    }
}

impl From<&RenderConfig> for EngineOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            duplicate_ids: config.duplicate_ids,
            label_offset: config.style.label_offset,
            dot_radius: config.style.dot_radius,
        }
    }
}

/// The schematic engine: a component registry plus the sink it draws into.
///
/// Single writer, synchronous. Every operation runs to completion; nothing
/// already drawn is rolled back if a later instruction fails.
#[derive(Debug)]
pub struct Schematic<S: DrawingSink = Canvas> {
    registry: ComponentRegistry,
    sink: S,
    options: EngineOptions,
}

impl Schematic<Canvas> {
    /// Engine over a fresh [`Canvas`] built from `config`.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::with_options(
            Canvas::new(config.canvas.clone(), config.style.clone()),
            EngineOptions::from(config),
        )
    }
}

impl<S: DrawingSink> Schematic<S> {
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, EngineOptions::default())
    }

    pub fn with_options(sink: S, options: EngineOptions) -> Self {
        Self {
            registry: ComponentRegistry::new(),
            sink,
            options,
        }
    }

    /// Place a component. Never fails: under [`DuplicatePolicy::Reject`] a
    /// duplicate id is logged and skipped.
    pub fn add(&mut self, tag: &str, id: &str, config: PlaceConfig) {
        if let Err(e) = self.try_add(tag, id, config) {
            warn!("skipping add of {tag} '{id}': {e}");
        }
    }

    /// Place a component, reporting a rejected duplicate id.
    ///
    /// Re-adding an id under [`DuplicatePolicy::Replace`] replaces the prior
    /// instance's pose, pins, and symbol graphic. Wires already drawn to the
    /// old pins stay where they were.
    pub fn try_add(&mut self, tag: &str, id: &str, config: PlaceConfig) -> Result<(), PlacementError> {
        if self.registry.contains(id) {
            match self.options.duplicate_ids {
                DuplicatePolicy::Reject => return Err(PlacementError::DuplicateId(id.to_string())),
                DuplicatePolicy::Replace => {
                    let removed = self.sink.remove_owned(id);
                    debug!("replacing '{id}' ({removed} primitives removed)");
                }
            }
        }

        let placement = placement::place(tag, id, &config, self.options.label_offset);
        if placement.instance.kind.is_none() {
            debug!("unknown component type '{tag}' for '{id}': drawing without symbol");
        }
        debug!(
            "placed {tag} '{id}' at ({}, {}) rot {} with {} pins",
            config.x,
            config.y,
            config.rotation,
            placement.instance.pins.len()
        );

        self.registry.insert(placement.instance);
        self.sink.append(Primitive::Symbol(placement.graphic));
        Ok(())
    }

    /// Wire two pins together. Unknown ids or pins are logged and skipped.
    pub fn connect(&mut self, from_id: &str, from_pin: &str, to_id: &str, to_pin: &str) {
        if let Err(e) = self.try_connect(from_id, from_pin, to_id, to_pin) {
            warn!("skipping connection {from_id}.{from_pin} -> {to_id}.{to_pin}: {e}");
        }
    }

    /// Wire two pins together, reporting why a connection could not resolve.
    ///
    /// On success the wire goes behind everything drawn so far and a solder
    /// dot is drawn on top at each end. On error nothing is drawn.
    pub fn try_connect(
        &mut self,
        from_id: &str,
        from_pin: &str,
        to_id: &str,
        to_pin: &str,
    ) -> Result<(), ConnectError> {
        let from = PinRef::new(from_id, from_pin);
        let to = PinRef::new(to_id, to_pin);
        let start = self.registry.resolve(&from)?;
        let end = self.registry.resolve(&to)?;

        let points = routing::route_wire(start, end);
        debug!(
            "routed {from} -> {to} ({:?}, {} points)",
            routing::branch_for(start, end),
            points.len()
        );

        self.sink.insert_back(Primitive::Wire(WirePath { from, to, points }));
        for center in [start, end] {
            self.sink.append(Primitive::Dot(SolderDot {
                center,
                radius: self.options.dot_radius,
            }));
        }
        Ok(())
    }

    /// Drop every component and every diagram primitive. Host decoration
    /// stays.
    pub fn reset(&mut self) {
        debug!(
            "reset: {} components, {} primitives cleared",
            self.registry.len(),
            self.sink.primitives().len()
        );
        self.registry.clear();
        self.sink.clear();
    }

    /// Serialize decoration plus diagram.
    pub fn export(&self) -> String
    where
        S: Export,
    {
        self.sink.export()
    }

    /// JSON snapshot of registered components and diagram primitives.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Snapshot {
            version: 1,
            components: self.registry.iter().collect(),
            primitives: self.sink.primitives(),
        })
    }

    pub fn component(&self, id: &str) -> Option<&ComponentInstance> {
        self.registry.get(id)
    }

    /// Absolute position of `id.pin`, if both exist.
    pub fn pin(&self, id: &str, pin: &str) -> Option<Point> {
        self.registry.get(id).and_then(|c| c.pin(pin))
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.registry.iter()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// `true` in the Empty state (nothing registered).
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    version: u32,
    components: Vec<&'a ComponentInstance>,
    primitives: &'a [Primitive],
}
