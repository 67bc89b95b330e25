//! huewheel - HSV color wheel picker nodes for a node-graph canvas
//!
//! The picker itself lives in `huewheel_ui`; this crate is the host side:
//! the RGB color picker node, the canvas that owns nodes and routes pointer
//! events, and app configuration.

pub mod app;
pub mod canvas;
pub mod config;
mod constants;
pub mod node;

pub use canvas::{GraphCanvas, PickerHandle};
pub use config::{AppConfig, ConfigError, LogLevel};
pub use node::RgbColorPickerNode;
