//! Configuration for the picker widget.
//!
//! Provides tunable geometry, placement and rendering options with defaults
//! matching a 300px wheel.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::constants::{
    ALPHA_BAR_HEIGHT, ALPHA_BAR_MARGIN, CONTAINER_GAP, CORNER_GAP, DEFAULT_RGBA, PREVIEW_MARGIN,
    PREVIEW_SIZE, RING_MARGIN, RING_THICKNESS, WHEEL_SIZE,
};

/// How the hue ring is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RingStyle {
    /// Anti-aliased annulus filled with an angular gradient.
    #[default]
    Gradient,
    /// Per-pixel HSV evaluation inside the annulus.
    PerPixel,
}

/// Configuration for a single picker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Logical side of the square wheel surface.
    pub wheel_size: f32,
    /// Radial thickness of the hue ring.
    pub ring_thickness: f32,
    /// Gap between the SV square's corners and the ring.
    pub corner_gap: f32,
    /// Gap between the surface edge and the ring.
    pub ring_margin: f32,
    /// Alpha bar height.
    pub alpha_bar_height: f32,
    /// Space between wheel and alpha bar.
    pub alpha_bar_margin: f32,
    /// Preview swatch side.
    pub preview_size: f32,
    /// Space between alpha bar and preview swatch.
    pub preview_margin: f32,
    /// Vertical gap below the host object, in canvas units.
    pub container_gap: f32,
    /// Backing-store resolution multiplier.
    pub device_pixel_ratio: f32,
    /// Hue ring rasterization path.
    pub ring_style: RingStyle,
    /// Color used for any host channel that is missing or malformed.
    pub default_color: [u8; 4],
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            wheel_size: WHEEL_SIZE,
            ring_thickness: RING_THICKNESS,
            corner_gap: CORNER_GAP,
            ring_margin: RING_MARGIN,
            alpha_bar_height: ALPHA_BAR_HEIGHT,
            alpha_bar_margin: ALPHA_BAR_MARGIN,
            preview_size: PREVIEW_SIZE,
            preview_margin: PREVIEW_MARGIN,
            container_gap: CONTAINER_GAP,
            device_pixel_ratio: 1.0,
            ring_style: RingStyle::default(),
            default_color: DEFAULT_RGBA,
        }
    }
}

impl PickerConfig {
    /// Set the wheel size.
    pub fn with_wheel_size(mut self, size: f32) -> Self {
        self.wheel_size = size;
        self
    }

    /// Set the device pixel ratio.
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Set the ring rasterization path.
    pub fn with_ring_style(mut self, style: RingStyle) -> Self {
        self.ring_style = style;
        self
    }

    /// Set the fallback color for missing channels.
    pub fn with_default_color(mut self, color: [u8; 4]) -> Self {
        self.default_color = color;
        self
    }

    /// Device pixel ratio, falling back to 1.0 when non-positive or non-finite.
    pub fn effective_pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    pub fn default_rgba(&self) -> Rgba {
        Rgba::from(self.default_color)
    }
}
