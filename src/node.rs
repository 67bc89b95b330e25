//! The RGB color picker node.
//!
//! Holds four numeric widget values (red, green, blue, alpha) and exposes
//! them to the picker through [`HostChannels`]. Its outputs are the color as
//! `#RRGGBB` and `#RRGGBBAA` hex strings.

use std::collections::BTreeMap;

use huewheel_ui::{Channel, HostChannels};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{CHANNEL_MAX, CHANNEL_MIN, DEFAULT_CHANNELS};

/// A graph node carrying RGBA channel widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgbColorPickerNode {
    /// Widget values by name, as stored in a saved graph
    widgets: BTreeMap<String, Value>,

    #[serde(skip)]
    dirty: bool,

    /// Widget writes since the last [`take_changes`](Self::take_changes)
    #[serde(skip)]
    changes: Vec<(Channel, u8)>,
}

impl RgbColorPickerNode {
    /// Node title shown by the host.
    pub const TITLE: &'static str = "RGB Color Picker";

    /// Create a node with the default channel values (opaque red).
    pub fn new() -> Self {
        let widgets = Channel::ALL
            .into_iter()
            .zip(DEFAULT_CHANNELS)
            .map(|(channel, value)| (channel.name().to_string(), Value::from(value)))
            .collect();
        Self {
            widgets,
            dirty: false,
            changes: Vec::new(),
        }
    }

    /// Create a node without an alpha widget.
    pub fn without_alpha() -> Self {
        let mut node = Self::new();
        node.widgets.remove(Channel::Alpha.name());
        node
    }

    pub fn widget_value(&self, name: &str) -> Option<&Value> {
        self.widgets.get(name)
    }

    /// Overwrite a stored widget value without notifying anyone, as a graph
    /// load does before the picker is reconfigured.
    pub fn set_widget_value(&mut self, name: &str, value: Value) {
        self.widgets.insert(name.to_string(), value);
    }

    /// Whether a widget changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drain the recorded widget writes.
    pub fn take_changes(&mut self) -> Vec<(Channel, u8)> {
        std::mem::take(&mut self.changes)
    }

    /// Integer value of a channel widget, falling back to the node default.
    fn channel_int(&self, channel: Channel) -> i64 {
        let fallback = match channel {
            Channel::Red => DEFAULT_CHANNELS[0],
            Channel::Green => DEFAULT_CHANNELS[1],
            Channel::Blue => DEFAULT_CHANNELS[2],
            Channel::Alpha => DEFAULT_CHANNELS[3],
        };
        self.channel(channel)
            .filter(|v| v.is_finite())
            .map_or(fallback, |v| v.round() as i64)
    }

    /// The node's outputs: `("#RRGGBB", "#RRGGBBAA")`.
    pub fn outputs(&self) -> (String, String) {
        Self::convert_to_hex(
            self.channel_int(Channel::Red),
            self.channel_int(Channel::Green),
            self.channel_int(Channel::Blue),
            self.channel_int(Channel::Alpha),
        )
    }

    /// Format channels as uppercase hex, clamping each to 0-255.
    pub fn convert_to_hex(red: i64, green: i64, blue: i64, alpha: i64) -> (String, String) {
        let clamp = |v: i64| v.clamp(CHANNEL_MIN, CHANNEL_MAX);
        let (r, g, b, a) = (clamp(red), clamp(green), clamp(blue), clamp(alpha));
        let rgb = format!("#{:02X}{:02X}{:02X}", r, g, b);
        let rgba = format!("{}{:02X}", rgb, a);
        (rgb, rgba)
    }
}

impl Default for RgbColorPickerNode {
    fn default() -> Self {
        Self::new()
    }
}

impl HostChannels for RgbColorPickerNode {
    fn channel(&self, channel: Channel) -> Option<f64> {
        self.widgets.get(channel.name()).and_then(Value::as_f64)
    }

    fn set_channel(&mut self, channel: Channel, value: u8) {
        self.widgets
            .insert(channel.name().to_string(), Value::from(value));
        self.changes.push((channel, value));
        log::trace!("widget '{}' set to {}", channel.name(), value);
    }

    fn has_channel(&self, channel: Channel) -> bool {
        self.widgets.contains_key(channel.name())
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }
}
