//! YAML-based render configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```yaml
//! canvas:
//!   width: 1200
//!   height: 800
//!   show_grid: false
//! style:
//!   wire_color: "#0050a0"
//!   dot_radius: 4
//! duplicate_ids: reject
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// What `add` does when an id is already placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the prior instance and its symbol graphic.
    #[default]
    Replace,
    /// Refuse the placement; `try_add` reports [`crate::PlacementError::DuplicateId`].
    Reject,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub duplicate_ids: DuplicatePolicy,
}

impl RenderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Drawing surface dimensions, centred on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Spacing of the background grid. Advisory only; placements are not snapped.
    #[serde(default = "default_grid")]
    pub grid: f64,
    #[serde(default = "default_true")]
    pub show_grid: bool,
}

fn default_width() -> f64 { 800.0 }
fn default_height() -> f64 { 600.0 }
fn default_grid() -> f64 { 20.0 }
fn default_true() -> bool { true }

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            grid: default_grid(),
            show_grid: default_true(),
        }
    }
}

/// Colours and sizes used by placement, routing, and SVG export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_wire_color")]
    pub wire_color: String,
    #[serde(default = "default_wire_width")]
    pub wire_width: f64,
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Distance from the symbol origin to the label anchor, upward.
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,
}

fn default_background() -> String { "#ffffff".into() }
fn default_grid_color() -> String { "#e6e6e6".into() }
fn default_stroke() -> String { "#1a1a1a".into() }
fn default_stroke_width() -> f64 { 2.0 }
fn default_wire_color() -> String { "#1a1a1a".into() }
fn default_wire_width() -> f64 { 2.0 }
fn default_dot_radius() -> f64 { 3.0 }
fn default_font_size() -> f64 { 12.0 }
fn default_font_family() -> String { "sans-serif".into() }
fn default_label_offset() -> f64 { 30.0 }

impl Default for Style {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid_color: default_grid_color(),
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
            wire_color: default_wire_color(),
            wire_width: default_wire_width(),
            dot_radius: default_dot_radius(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            label_offset: default_label_offset(),
        }
    }
}
