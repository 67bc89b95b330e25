//! Host synchronization: channel binding and viewport placement.
//!
//! The picker reads its color from four numeric host channels and writes them
//! back after every interactive change. Placement keeps the picker container
//! glued below its host object while the host view pans and zooms.

use crate::color::{ColorState, Rgba};
use crate::geometry::Point;

/// Named numeric slots on the host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Host-side widget name.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// The host object's channel storage as seen by the picker.
pub trait HostChannels {
    /// Current numeric value, or `None` if absent or not a number.
    fn channel(&self, channel: Channel) -> Option<f64>;

    /// Write a value (0-255).
    fn set_channel(&mut self, channel: Channel, value: u8);

    /// Whether the host exposes this channel at all.
    fn has_channel(&self, channel: Channel) -> bool {
        let _ = channel;
        true
    }

    /// Ask the host to repaint after a channel write.
    fn request_redraw(&mut self) {}
}

fn channel_or(host: &dyn HostChannels, channel: Channel, fallback: u8) -> u8 {
    match host.channel(channel) {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 255.0) as u8,
        Some(v) => {
            log::warn!(
                "channel '{}' holds non-finite value {}, using {}",
                channel.name(),
                v,
                fallback
            );
            fallback
        }
        None => fallback,
    }
}

/// Read host channels into 8-bit RGBA, substituting `fallback` per channel.
pub fn read_rgba(host: &dyn HostChannels, fallback: Rgba) -> Rgba {
    Rgba::new(
        channel_or(host, Channel::Red, fallback.r),
        channel_or(host, Channel::Green, fallback.g),
        channel_or(host, Channel::Blue, fallback.b),
        channel_or(host, Channel::Alpha, fallback.a),
    )
}

/// Read host channels into a fresh [`ColorState`].
pub fn read_state(host: &dyn HostChannels, fallback: Rgba) -> ColorState {
    ColorState::from_rgba(read_rgba(host, fallback))
}

/// Write `state` to the host and request a repaint.
///
/// Alpha is only written when the host has an alpha channel.
pub fn push_state(host: &mut dyn HostChannels, state: &ColorState) {
    let rgba = state.rgba();
    host.set_channel(Channel::Red, rgba.r);
    host.set_channel(Channel::Green, rgba.g);
    host.set_channel(Channel::Blue, rgba.b);
    if host.has_channel(Channel::Alpha) {
        host.set_channel(Channel::Alpha, rgba.a);
    }
    host.request_redraw();
}

/// Host view transform: canvas units to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: [f32; 2],
    /// Left edge of the host drawing surface on screen.
    pub left: f32,
    /// Top edge of the host drawing surface on screen.
    pub top: f32,
}

impl Viewport {
    pub fn new(scale: f32, offset: [f32; 2], left: f32, top: f32) -> Self {
        Self {
            scale,
            offset,
            left,
            top,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, [0.0, 0.0], 0.0, 0.0)
    }

    /// Scale, falling back to 1.0 when zero, negative or non-finite.
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Map a canvas-space point to the screen.
    pub fn canvas_to_screen(&self, point: Point) -> Point {
        let scale = self.effective_scale();
        Point::new(
            (point.x + self.offset[0]) * scale + self.left,
            (point.y + self.offset[1]) * scale + self.top,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

/// Position and size of the object that owns the picker, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostObject {
    pub position: [f32; 2],
    pub size: [f32; 2],
}

impl HostObject {
    pub fn new(position: [f32; 2], size: [f32; 2]) -> Self {
        Self { position, size }
    }
}

/// Where the picker container sits on screen and how much it is scaled.
///
/// The container is scaled uniformly about its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f32,
    pub top: f32,
    pub scale: f32,
}

impl Placement {
    /// Place the container `gap` canvas units below `object`.
    pub fn compute(object: &HostObject, viewport: &Viewport, gap: f32) -> Self {
        let anchor = viewport.canvas_to_screen(Point::new(
            object.position[0],
            object.position[1] + object.size[1] + gap,
        ));
        Self {
            left: anchor.x,
            top: anchor.y,
            scale: viewport.effective_scale(),
        }
    }

    /// Screen point to widget-local logical coordinates.
    pub fn to_local(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.left) / self.scale,
            (screen.y - self.top) / self.scale,
        )
    }

    /// Widget-local logical coordinates to a screen point.
    pub fn to_screen(&self, local: Point) -> Point {
        Point::new(
            local.x * self.scale + self.left,
            local.y * self.scale + self.top,
        )
    }

    /// Container transform for compositing the picker's surfaces.
    pub fn transform(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(self.scale, 0.0, 0.0, self.scale, self.left, self.top)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale: 1.0,
        }
    }
}
