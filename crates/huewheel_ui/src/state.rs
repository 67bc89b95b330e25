//! Drag state for the picker's interaction state machine.

use crate::event::ListenerGuard;

/// Which control a drag session is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Hue,
    SaturationValue,
    Alpha,
}

/// Observable interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No button held
    #[default]
    Idle,
    /// Dragging on the hue ring
    DraggingHue,
    /// Dragging inside the SV square
    DraggingSv,
    /// Dragging on the alpha bar
    DraggingAlpha,
}

impl DragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

impl From<DragTarget> for DragState {
    fn from(target: DragTarget) -> Self {
        match target {
            DragTarget::Hue => DragState::DraggingHue,
            DragTarget::SaturationValue => DragState::DraggingSv,
            DragTarget::Alpha => DragState::DraggingAlpha,
        }
    }
}

/// An active drag. Owns the window listener registration for its lifetime.
#[derive(Debug)]
pub struct DragSession {
    target: DragTarget,
    _listeners: ListenerGuard,
}

impl DragSession {
    pub fn begin(target: DragTarget, listeners: ListenerGuard) -> Self {
        Self {
            target,
            _listeners: listeners,
        }
    }

    pub fn target(&self) -> DragTarget {
        self.target
    }
}
