//! huewheel_ui - An HSV color wheel picker rendered with tiny-skia
//!
//! The picker keeps an HSV + alpha color in sync with four numeric host
//! channels (red, green, blue, alpha). It is host-agnostic: anything that
//! implements [`HostChannels`] and drives the [`Lifecycle`] hooks can embed it.

mod callback;
mod color;
mod config;
pub mod constants;
mod error;
mod event;
mod geometry;
mod interaction;
mod renderer;
mod state;
mod sync;
mod widget;
mod widgets;

pub use callback::Callback;
pub use color::{hsv_to_rgb, rgb_to_hsv, ColorState, Rgb, Rgba};
pub use config::{PickerConfig, RingStyle};
pub use error::{RenderError, Result};
pub use event::{Event, ListenerGuard, MouseButton, PickerId, WindowListeners};
pub use geometry::{AlphaBar, Geometry, PickerLayout, Point, Rectangle, Region};
pub use interaction::Interaction;
pub use renderer::{Renderer, Surface};
pub use state::{DragState, DragTarget};
pub use sync::{
    push_state, read_rgba, read_state, Channel, HostChannels, HostObject, Placement, Viewport,
};
pub use widget::{EventResult, Lifecycle};

// Re-export widgets
pub use widgets::{color_wheel, ColorWheel, Surfaces};

// Re-export tiny-skia so hosts composite with the same version
pub use tiny_skia;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::{ColorState, Rgba};
    pub use crate::config::{PickerConfig, RingStyle};
    pub use crate::event::{Event, MouseButton, PickerId, WindowListeners};
    pub use crate::geometry::Point;
    pub use crate::sync::{Channel, HostChannels, HostObject, Viewport};
    pub use crate::widget::{EventResult, Lifecycle};
    pub use crate::widgets::{color_wheel, ColorWheel};
}
