//! Pointer interaction state machine.
//!
//! ```text
//! Idle --down(ring)----> DraggingHue    --move--> re-map angle (no region test)
//! Idle --down(square)--> DraggingSv     --move--> re-map only inside the square
//! Idle --down(bar)-----> DraggingAlpha  --move--> re-map x (no region test)
//! Dragging* --up--> Idle
//! ```
//!
//! All positions are widget-local logical coordinates; converting from
//! screen space (viewport scale and offset) happens before this module.

use crate::color::ColorState;
use crate::event::{PickerId, WindowListeners};
use crate::geometry::{PickerLayout, Point, Region};
use crate::state::{DragSession, DragState, DragTarget};

/// Drag-session bookkeeping for one picker.
#[derive(Debug, Default)]
pub struct Interaction {
    session: Option<DragSession>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.session
            .as_ref()
            .map_or(DragState::Idle, |s| DragState::from(s.target()))
    }

    /// Start a drag if `local` hits the ring, the square or the alpha bar.
    ///
    /// Returns `true` when a session started; the mapping has then already
    /// been applied to `state`. A press while a session is active is ignored.
    pub fn pointer_down(
        &mut self,
        state: &mut ColorState,
        layout: &PickerLayout,
        local: Point,
        listeners: &WindowListeners,
        owner: PickerId,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }

        let target = match layout.wheel.hit_test(local) {
            Region::Ring => DragTarget::Hue,
            Region::Square => DragTarget::SaturationValue,
            Region::None if layout.alpha_bar.contains(local) => DragTarget::Alpha,
            Region::None => return false,
        };

        apply(target, state, layout, local);
        log::debug!("picker {:?}: started dragging {:?}", owner, target);
        self.session = Some(DragSession::begin(target, listeners.register(owner)));
        true
    }

    /// Re-apply the active mapping. Returns `true` if `state` changed.
    pub fn pointer_move(
        &mut self,
        state: &mut ColorState,
        layout: &PickerLayout,
        local: Point,
    ) -> bool {
        let Some(session) = &self.session else {
            return false;
        };

        let target = session.target();
        if target == DragTarget::SaturationValue
            && !layout.wheel.square_bounds().contains(local)
        {
            return false;
        }

        let before = *state;
        apply(target, state, layout, local);
        *state != before
    }

    /// End the session. Returns `true` if one was active.
    pub fn pointer_up(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("stopped dragging {:?}", session.target());
                true
            }
            None => false,
        }
    }

    /// Drop any active session without touching color state (forced detach).
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("drag session cancelled");
        }
    }
}

fn apply(target: DragTarget, state: &mut ColorState, layout: &PickerLayout, local: Point) {
    match target {
        DragTarget::Hue => state.set_hue(layout.wheel.angle_to_hue(local)),
        DragTarget::SaturationValue => {
            let (s, v) = layout.wheel.point_to_sv(local);
            state.set_saturation_value(s, v);
        }
        DragTarget::Alpha => state.set_alpha(layout.alpha_bar.alpha_at(local)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;

    const OWNER: PickerId = PickerId(1);

    fn setup() -> (Interaction, ColorState, PickerLayout, WindowListeners) {
        (
            Interaction::new(),
            ColorState::new(0.0, 0.5, 0.5, 1.0),
            PickerLayout::from_config(&PickerConfig::default()),
            WindowListeners::new(),
        )
    }

    fn ring_point(layout: &PickerLayout, degrees: f32, radius: f32) -> Point {
        let c = layout.wheel.center;
        let r = degrees.to_radians();
        Point::new(c.x + radius * r.cos(), c.y + radius * r.sin())
    }

    #[test]
    fn test_ring_press_sets_hue_and_registers_listeners() {
        let (mut ix, mut state, layout, listeners) = setup();
        let at = ring_point(&layout, 240.0, layout.wheel.ring_center_radius());

        assert!(ix.pointer_down(&mut state, &layout, at, &listeners, OWNER));
        assert_eq!(ix.drag_state(), DragState::DraggingHue);
        assert!((state.hue() - 240.0).abs() < 0.01);
        assert!(listeners.is_registered(OWNER));

        assert!(ix.pointer_up());
        assert_eq!(ix.drag_state(), DragState::Idle);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_hue_drag_tracks_outside_ring() {
        let (mut ix, mut state, layout, listeners) = setup();
        let start = ring_point(&layout, 10.0, layout.wheel.ring_center_radius());
        ix.pointer_down(&mut state, &layout, start, &listeners, OWNER);

        // far outside the annulus and inside the square: still a hue drag
        let far = ring_point(&layout, 90.0, 1000.0);
        assert!(ix.pointer_move(&mut state, &layout, far));
        assert!((state.hue() - 90.0).abs() < 0.01);

        let inner = ring_point(&layout, 180.0, 5.0);
        assert!(ix.pointer_move(&mut state, &layout, inner));
        assert!((state.hue() - 180.0).abs() < 0.01);
        assert_eq!(state.saturation(), 0.5);
    }

    #[test]
    fn test_sv_drag_declines_outside_square() {
        let (mut ix, mut state, layout, listeners) = setup();
        let center = layout.wheel.center;
        assert!(ix.pointer_down(&mut state, &layout, center, &listeners, OWNER));
        assert_eq!(ix.drag_state(), DragState::DraggingSv);

        let before = state;
        let outside = ring_point(&layout, 0.0, layout.wheel.ring_center_radius());
        assert!(!ix.pointer_move(&mut state, &layout, outside));
        assert_eq!(state, before);
        assert_eq!(ix.drag_state(), DragState::DraggingSv);

        let tl = layout.wheel.square_top_left;
        assert!(ix.pointer_move(&mut state, &layout, Point::new(tl.x + 0.5, tl.y + 0.5)));
        assert_eq!(state.saturation(), 0.0);
        assert_eq!(state.value(), 1.0);
    }

    #[test]
    fn test_alpha_drag_tracks_outside_bar() {
        let (mut ix, mut state, layout, listeners) = setup();
        let bar = layout.alpha_bar.bounds;
        let press = Point::new(bar.width / 4.0, bar.y + bar.height / 2.0);
        assert!(ix.pointer_down(&mut state, &layout, press, &listeners, OWNER));
        assert_eq!(ix.drag_state(), DragState::DraggingAlpha);
        assert_eq!(state.alpha(), 0.25);

        // way above the bar, over the wheel
        assert!(ix.pointer_move(&mut state, &layout, Point::new(bar.width * 0.75, 10.0)));
        assert_eq!(state.alpha(), 0.75);
        assert_eq!(state.hue(), 0.0);
    }

    #[test]
    fn test_press_outside_everything_is_ignored() {
        let (mut ix, mut state, layout, listeners) = setup();
        let before = state;
        assert!(!ix.pointer_down(&mut state, &layout, Point::new(1.0, 1.0), &listeners, OWNER));
        assert_eq!(ix.drag_state(), DragState::Idle);
        assert_eq!(state, before);
        assert!(listeners.is_empty());
        assert!(!ix.pointer_move(&mut state, &layout, layout.wheel.center));
        assert!(!ix.pointer_up());
    }

    #[test]
    fn test_second_press_during_drag_is_ignored() {
        let (mut ix, mut state, layout, listeners) = setup();
        ix.pointer_down(&mut state, &layout, layout.wheel.center, &listeners, OWNER);
        let ring = ring_point(&layout, 45.0, layout.wheel.ring_center_radius());
        assert!(!ix.pointer_down(&mut state, &layout, ring, &listeners, OWNER));
        assert_eq!(ix.drag_state(), DragState::DraggingSv);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_cancel_releases_listeners() {
        let (mut ix, mut state, layout, listeners) = setup();
        ix.pointer_down(&mut state, &layout, layout.wheel.center, &listeners, OWNER);
        ix.cancel();
        assert_eq!(ix.drag_state(), DragState::Idle);
        assert!(listeners.is_empty());
    }
}
