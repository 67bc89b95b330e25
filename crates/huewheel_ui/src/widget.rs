//! Host lifecycle trait and event results

use crate::sync::{HostChannels, HostObject, Viewport};

/// Hooks a host calls on a widget it owns.
///
/// The host drives these in order: attach once its object exists, configure
/// when stored values are reloaded, redraw every frame, detach on removal.
pub trait Lifecycle {
    /// Build per-instance state and read the initial color.
    fn on_attach(&mut self, host: &mut dyn HostChannels);

    /// Re-read channels after the host reloads its stored values.
    fn on_configure(&mut self, host: &mut dyn HostChannels);

    /// Reposition (and repaint) for the current frame.
    fn on_redraw(&mut self, object: &HostObject, viewport: &Viewport);

    /// Release per-instance state and any window listeners.
    fn on_detach(&mut self);
}

/// Outcome of routing one event to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// Not handled
    #[default]
    None,
    /// Handled, color unchanged
    Captured,
    /// Handled and the color changed (channels were written)
    Changed,
}

impl EventResult {
    /// Whether the widget consumed the event.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::None)
    }
}
