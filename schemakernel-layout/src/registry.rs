//! Component registry: instance id → placed component.

use crate::error::ConnectError;
use crate::symbols::ComponentType;
use crate::types::{PinRef, Point, Pose};
use serde::Serialize;
use std::collections::BTreeMap;

/// A component placed on the schematic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInstance {
    pub id: String,
    /// Type tag exactly as the caller gave it.
    pub tag: String,
    /// Resolved library type, `None` for tags the library does not know.
    pub kind: Option<ComponentType>,
    pub pose: Pose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Absolute pin positions. The key set is always the library's pin set
    /// for `kind` (empty for unknown tags).
    pub pins: BTreeMap<String, Point>,
}

impl ComponentInstance {
    pub fn pin(&self, name: &str) -> Option<Point> {
        self.pins.get(name).copied()
    }

    pub fn pin_names(&self) -> impl Iterator<Item = &str> {
        self.pins.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    instances: BTreeMap<String, ComponentInstance>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the instance previously under the same id.
    pub fn insert(&mut self, instance: ComponentInstance) -> Option<ComponentInstance> {
        self.instances.insert(instance.id.clone(), instance)
    }

    pub fn get(&self, id: &str) -> Option<&ComponentInstance> {
        self.instances.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.instances.values()
    }

    /// Absolute position of a component pin.
    pub fn resolve(&self, pin: &PinRef) -> Result<Point, ConnectError> {
        let instance = self
            .get(&pin.component)
            .ok_or_else(|| ConnectError::UnknownComponent(pin.component.clone()))?;
        instance.pin(&pin.pin).ok_or_else(|| ConnectError::UnknownPin {
            component: pin.component.clone(),
            kind: instance.tag.clone(),
            pin: pin.pin.clone(),
        })
    }
}
