//! HSV color wheel widget bound to host color channels
//!
//! One instance per host object. It renders:
//! - A hue ring around a saturation/value square, with a marker on each
//! - An alpha bar over a checkerboard
//! - A preview swatch of the current RGBA
//!
//! Every interactive change is written straight back to the host's
//! red/green/blue/alpha channels.

use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::callback::Callback;
use crate::color::{ColorState, Rgba};
use crate::config::PickerConfig;
use crate::error::Result;
use crate::event::{Event, MouseButton, PickerId, WindowListeners};
use crate::geometry::{PickerLayout, Rectangle};
use crate::interaction::Interaction;
use crate::renderer::{Renderer, Surface};
use crate::state::DragState;
use crate::sync::{push_state, read_state, HostChannels, HostObject, Placement, Viewport};
use crate::widget::{EventResult, Lifecycle};

/// The three raster targets of a mounted picker.
#[derive(Debug)]
pub struct Surfaces {
    pub wheel: Surface,
    pub alpha_bar: Surface,
    pub preview: Surface,
}

impl Surfaces {
    fn allocate(layout: &PickerLayout, scale: f32) -> Result<Self> {
        let bar = layout.alpha_bar.bounds;
        Ok(Self {
            wheel: Surface::new(layout.wheel_size, layout.wheel_size, scale)?,
            alpha_bar: Surface::new(bar.width, bar.height, scale)?,
            preview: Surface::new(layout.preview.width, layout.preview.height, scale)?,
        })
    }
}

/// Per-instance state that only exists between attach and detach.
#[derive(Debug)]
struct Mounted {
    state: ColorState,
    /// `None` when allocation failed; the picker then stays interactive but blank.
    surfaces: Option<Surfaces>,
}

/// An HSV wheel picker attached to one host object.
pub struct ColorWheel {
    id: PickerId,
    config: PickerConfig,
    layout: PickerLayout,
    renderer: Renderer,
    mounted: Option<Mounted>,
    placement: Placement,
    interaction: Interaction,
    listeners: WindowListeners,
    /// Called with the new color after each channel write
    on_change: Callback<Rgba>,
}

impl ColorWheel {
    /// Create an unattached picker.
    pub fn new(id: PickerId, config: PickerConfig, listeners: WindowListeners) -> Self {
        let layout = PickerLayout::from_config(&config);
        Self {
            id,
            renderer: Renderer::new(config.ring_style),
            config,
            layout,
            mounted: None,
            placement: Placement::default(),
            interaction: Interaction::new(),
            listeners,
            on_change: Callback::none(),
        }
    }

    /// Set the change handler
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(Rgba) + 'static,
    {
        self.on_change = Callback::new(handler);
        self
    }

    pub fn id(&self) -> PickerId {
        self.id
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn layout(&self) -> &PickerLayout {
        &self.layout
    }

    pub fn is_attached(&self) -> bool {
        self.mounted.is_some()
    }

    /// Current color, if attached.
    pub fn state(&self) -> Option<ColorState> {
        self.mounted.as_ref().map(|m| m.state)
    }

    pub fn drag_state(&self) -> DragState {
        self.interaction.drag_state()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn surfaces(&self) -> Option<&Surfaces> {
        self.mounted.as_ref().and_then(|m| m.surfaces.as_ref())
    }

    /// Container bounds on screen.
    pub fn screen_bounds(&self) -> Rectangle {
        let (width, height) = self.layout.content_size();
        Rectangle::new(
            self.placement.left,
            self.placement.top,
            width * self.placement.scale,
            height * self.placement.scale,
        )
    }

    /// Change the backing-store resolution, reallocating surfaces if attached.
    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.config.device_pixel_ratio = ratio;
        let scale = self.config.effective_pixel_ratio();
        if let Some(mounted) = &mut self.mounted {
            mounted.surfaces = match Surfaces::allocate(&self.layout, scale) {
                Ok(surfaces) => Some(surfaces),
                Err(e) => {
                    log::warn!("picker {:?}: {}", self.id, e);
                    None
                }
            };
        }
        self.repaint();
    }

    /// Route one pointer event. Positions are screen coordinates.
    pub fn on_event(&mut self, event: &Event, host: &mut dyn HostChannels) -> EventResult {
        let Some(mounted) = &mut self.mounted else {
            return EventResult::None;
        };

        match event {
            Event::PointerDown {
                button: MouseButton::Left,
                position,
            } => {
                let local = self.placement.to_local(*position);
                let started = self.interaction.pointer_down(
                    &mut mounted.state,
                    &self.layout,
                    local,
                    &self.listeners,
                    self.id,
                );
                if started {
                    self.commit(host);
                    EventResult::Changed
                } else {
                    EventResult::None
                }
            }

            Event::PointerMove { position } => {
                if !self.interaction.drag_state().is_dragging() {
                    return EventResult::None;
                }
                let local = self.placement.to_local(*position);
                if self
                    .interaction
                    .pointer_move(&mut mounted.state, &self.layout, local)
                {
                    self.commit(host);
                    EventResult::Changed
                } else {
                    EventResult::Captured
                }
            }

            Event::PointerUp { .. } => {
                if self.interaction.pointer_up() {
                    EventResult::Captured
                } else {
                    EventResult::None
                }
            }

            _ => EventResult::None,
        }
    }

    /// Draw the picker's surfaces onto a host pixmap at the current placement.
    pub fn composite(&self, target: &mut Pixmap) {
        let Some(surfaces) = self.surfaces() else {
            return;
        };
        let inv = 1.0 / self.config.effective_pixel_ratio();
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let container = self.placement.transform();

        let parts = [
            (&surfaces.wheel, 0.0),
            (&surfaces.alpha_bar, self.layout.alpha_bar.bounds.y),
            (&surfaces.preview, self.layout.preview.y),
        ];
        for (surface, y) in parts {
            let ts = container
                .pre_concat(Transform::from_translate(0.0, y))
                .pre_scale(inv, inv);
            target.draw_pixmap(0, 0, surface.pixmap().as_ref(), &paint, ts, None);
        }
    }

    fn commit(&mut self, host: &mut dyn HostChannels) {
        let Some(mounted) = &self.mounted else {
            return;
        };
        let state = mounted.state;
        push_state(host, &state);
        self.on_change.call(state.rgba());
        log::trace!("picker {:?}: wrote {:?}", self.id, state.rgba());
        self.repaint();
    }

    fn repaint(&mut self) {
        let Self {
            renderer,
            mounted,
            layout,
            ..
        } = self;
        let Some(Mounted {
            state,
            surfaces: Some(surfaces),
        }) = mounted
        else {
            return;
        };
        renderer.draw_wheel(&mut surfaces.wheel, state, &layout.wheel);
        renderer.draw_alpha_bar(&mut surfaces.alpha_bar, state);
        renderer.draw_preview(&mut surfaces.preview, state);
    }
}

impl Lifecycle for ColorWheel {
    fn on_attach(&mut self, host: &mut dyn HostChannels) {
        if self.mounted.is_some() {
            log::debug!("picker {:?} already attached", self.id);
            return;
        }

        let state = read_state(host, self.config.default_rgba());
        let surfaces = match Surfaces::allocate(&self.layout, self.config.effective_pixel_ratio()) {
            Ok(surfaces) => Some(surfaces),
            Err(e) => {
                log::warn!("picker {:?}: {}", self.id, e);
                None
            }
        };
        self.mounted = Some(Mounted { state, surfaces });
        self.repaint();
        log::info!("picker {:?} attached with {:?}", self.id, state.rgba());
    }

    fn on_configure(&mut self, host: &mut dyn HostChannels) {
        let Some(mounted) = &mut self.mounted else {
            self.on_attach(host);
            return;
        };
        mounted.state = read_state(host, self.config.default_rgba());
        log::debug!("picker {:?} reconfigured to {:?}", self.id, mounted.state.rgba());
        self.repaint();
    }

    fn on_redraw(&mut self, object: &HostObject, viewport: &Viewport) {
        if self.mounted.is_none() {
            return;
        }
        self.placement = Placement::compute(object, viewport, self.config.container_gap);
        self.repaint();
    }

    fn on_detach(&mut self) {
        self.interaction.cancel();
        self.renderer.invalidate();
        if self.mounted.take().is_some() {
            log::info!("picker {:?} detached", self.id);
        }
    }
}

impl std::fmt::Debug for ColorWheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorWheel")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("drag_state", &self.drag_state())
            .field("placement", &self.placement)
            .finish()
    }
}

/// Create an unattached wheel with default configuration.
pub fn color_wheel(id: PickerId, listeners: &WindowListeners) -> ColorWheel {
    ColorWheel::new(id, PickerConfig::default(), listeners.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::sync::Channel;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockHost {
        values: HashMap<Channel, f64>,
        no_alpha: bool,
        redraws: usize,
    }

    impl MockHost {
        fn with_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
            let mut host = Self::default();
            for (channel, v) in Channel::ALL.into_iter().zip([r, g, b, a]) {
                host.values.insert(channel, v);
            }
            host
        }

        fn rgb(&self) -> [f64; 3] {
            [
                self.values[&Channel::Red],
                self.values[&Channel::Green],
                self.values[&Channel::Blue],
            ]
        }
    }

    impl HostChannels for MockHost {
        fn channel(&self, channel: Channel) -> Option<f64> {
            self.values.get(&channel).copied()
        }

        fn set_channel(&mut self, channel: Channel, value: u8) {
            self.values.insert(channel, value as f64);
        }

        fn has_channel(&self, channel: Channel) -> bool {
            !(self.no_alpha && channel == Channel::Alpha)
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    fn attached(host: &mut MockHost) -> (ColorWheel, WindowListeners) {
        let listeners = WindowListeners::new();
        let mut wheel = color_wheel(PickerId(7), &listeners);
        wheel.on_attach(host);
        wheel.on_redraw(
            &HostObject::new([100.0, 100.0], [200.0, 80.0]),
            &Viewport::identity(),
        );
        (wheel, listeners)
    }

    fn ring_screen_point(wheel: &ColorWheel, degrees: f32) -> Point {
        let g = wheel.layout().wheel;
        let r = degrees.to_radians();
        let local = Point::new(
            g.center.x + g.ring_center_radius() * r.cos(),
            g.center.y + g.ring_center_radius() * r.sin(),
        );
        wheel.placement().to_screen(local)
    }

    fn down(position: Point) -> Event {
        Event::PointerDown {
            button: MouseButton::Left,
            position,
        }
    }

    fn up(position: Point) -> Event {
        Event::PointerUp {
            button: MouseButton::Left,
            position,
        }
    }

    #[test]
    fn test_attach_reads_channels() {
        let mut host = MockHost::with_rgba(0.0, 255.0, 0.0, 255.0);
        let (wheel, _) = attached(&mut host);
        let state = wheel.state().expect("attached");
        assert!((state.hue() - 120.0).abs() < 0.5);
        assert_eq!(state.saturation(), 1.0);
        assert_eq!(state.value(), 1.0);
        // attaching never writes back
        assert_eq!(host.redraws, 0);
    }

    #[test]
    fn test_ring_press_writes_channels() {
        let mut host = MockHost::with_rgba(0.0, 255.0, 0.0, 255.0);
        let (mut wheel, listeners) = attached(&mut host);

        let at = ring_screen_point(&wheel, 240.0);
        assert_eq!(wheel.on_event(&down(at), &mut host), EventResult::Changed);
        assert_eq!(wheel.drag_state(), DragState::DraggingHue);
        assert_eq!(host.rgb(), [0.0, 0.0, 255.0]);
        assert_eq!(host.values[&Channel::Alpha], 255.0);
        assert_eq!(host.redraws, 1);
        assert!(listeners.is_registered(PickerId(7)));

        assert_eq!(wheel.on_event(&up(at), &mut host), EventResult::Captured);
        assert!(listeners.is_empty());
        assert_eq!(wheel.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_missing_channels_use_default_red() {
        let mut host = MockHost::default();
        host.values.insert(Channel::Green, f64::NAN);
        let (wheel, _) = attached(&mut host);
        assert_eq!(
            wheel.state().map(|s| s.rgba()),
            Some(Rgba::new(255, 0, 0, 255))
        );
    }

    #[test]
    fn test_missing_alpha_channel_is_not_written() {
        let mut host = MockHost::with_rgba(0.0, 0.0, 255.0, 255.0);
        host.values.remove(&Channel::Alpha);
        host.no_alpha = true;
        let (mut wheel, _) = attached(&mut host);

        let bar = wheel.layout().alpha_bar.bounds;
        let press = wheel
            .placement()
            .to_screen(Point::new(bar.width / 2.0, bar.y + bar.height / 2.0));
        assert_eq!(wheel.on_event(&down(press), &mut host), EventResult::Changed);
        assert_eq!(wheel.drag_state(), DragState::DraggingAlpha);
        assert!(!host.values.contains_key(&Channel::Alpha));
        assert_eq!(host.rgb(), [0.0, 0.0, 255.0]);
    }

    #[test]
    fn test_pointer_mapping_under_zoom() {
        let mut host = MockHost::with_rgba(255.0, 0.0, 0.0, 255.0);
        let (mut wheel, _) = attached(&mut host);
        wheel.on_redraw(
            &HostObject::new([100.0, 100.0], [0.0, 0.0]),
            &Viewport::new(2.0, [0.0, 0.0], 0.0, 0.0),
        );
        assert_eq!(wheel.placement().left, 200.0);
        assert_eq!(wheel.placement().top, 224.0);

        // SV square center on screen: local (150, 150) scaled by 2
        let center = Point::new(200.0 + 300.0, 224.0 + 300.0);
        assert_eq!(wheel.on_event(&down(center), &mut host), EventResult::Changed);
        let state = wheel.state().expect("attached");
        assert!((state.saturation() - 0.5).abs() < 1e-4);
        assert!((state.value() - 0.5).abs() < 1e-4);
        let [r, g, b] = host.rgb();
        assert!((127.0..=128.0).contains(&r), "{r}");
        assert!((63.0..=64.0).contains(&g) && g == b, "{g} {b}");
    }

    #[test]
    fn test_drag_move_and_release() {
        let mut host = MockHost::with_rgba(255.0, 0.0, 0.0, 255.0);
        let (mut wheel, _) = attached(&mut host);

        let start = ring_screen_point(&wheel, 0.0);
        wheel.on_event(&down(start), &mut host);
        let moved = Event::PointerMove {
            position: ring_screen_point(&wheel, 120.0),
        };
        assert_eq!(wheel.on_event(&moved, &mut host), EventResult::Changed);
        assert_eq!(host.rgb(), [0.0, 255.0, 0.0]);
        // same position again: nothing to write
        assert_eq!(wheel.on_event(&moved, &mut host), EventResult::Captured);

        wheel.on_event(&up(start), &mut host);
        assert_eq!(wheel.on_event(&moved, &mut host), EventResult::None);
    }

    #[test]
    fn test_non_left_press_and_misses_are_ignored() {
        let mut host = MockHost::with_rgba(255.0, 0.0, 0.0, 255.0);
        let (mut wheel, listeners) = attached(&mut host);
        let at = ring_screen_point(&wheel, 90.0);

        let right = Event::PointerDown {
            button: MouseButton::Right,
            position: at,
        };
        assert_eq!(wheel.on_event(&right, &mut host), EventResult::None);

        let miss = wheel.placement().to_screen(Point::new(1.0, 1.0));
        assert_eq!(wheel.on_event(&down(miss), &mut host), EventResult::None);
        assert!(listeners.is_empty());
        assert_eq!(host.redraws, 0);
    }

    #[test]
    fn test_on_change_receives_color() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let listeners = WindowListeners::new();
        let mut wheel = color_wheel(PickerId(1), &listeners)
            .on_change(move |c| sink.borrow_mut().push(c));
        let mut host = MockHost::with_rgba(255.0, 0.0, 0.0, 255.0);
        wheel.on_attach(&mut host);

        let at = ring_screen_point(&wheel, 240.0);
        wheel.on_event(&down(at), &mut host);
        assert_eq!(seen.borrow().as_slice(), &[Rgba::new(0, 0, 255, 255)]);
    }

    #[test]
    fn test_detach_releases_listeners_mid_drag() {
        let mut host = MockHost::with_rgba(255.0, 0.0, 0.0, 255.0);
        let (mut wheel, listeners) = attached(&mut host);
        wheel.on_event(&down(ring_screen_point(&wheel, 30.0)), &mut host);
        assert_eq!(listeners.len(), 1);

        wheel.on_detach();
        assert!(listeners.is_empty());
        assert!(!wheel.is_attached());
        assert_eq!(wheel.drag_state(), DragState::Idle);
        assert_eq!(
            wheel.on_event(&down(ring_screen_point(&wheel, 30.0)), &mut host),
            EventResult::None
        );
    }

    #[test]
    fn test_detach_drops_cached_textures() {
        let mut host = MockHost::default();
        let (mut wheel, _) = attached(&mut host);
        assert!(wheel.renderer().active_ring_style().is_some());

        wheel.on_detach();
        assert!(wheel.surfaces().is_none());
        assert!(wheel.renderer().active_ring_style().is_none());
    }

    #[test]
    fn test_configure_rereads_channels() {
        let mut host = MockHost::with_rgba(255.0, 0.0, 0.0, 255.0);
        let (mut wheel, _) = attached(&mut host);
        host.values.insert(Channel::Red, 0.0);
        host.values.insert(Channel::Blue, 255.0);
        wheel.on_configure(&mut host);
        assert!((wheel.state().expect("attached").hue() - 240.0).abs() < 0.5);
    }

    #[test]
    fn test_repeated_attach_and_redraw_are_stable() {
        let mut host = MockHost::with_rgba(10.0, 200.0, 90.0, 128.0);
        let (mut wheel, _) = attached(&mut host);
        let object = HostObject::new([100.0, 100.0], [200.0, 80.0]);
        let before = wheel
            .surfaces()
            .map(|s| s.wheel.data().to_vec())
            .expect("surfaces");

        wheel.on_attach(&mut host);
        wheel.on_redraw(&object, &Viewport::identity());
        wheel.on_redraw(&object, &Viewport::identity());
        let after = wheel.surfaces().expect("surfaces");
        assert_eq!(before, after.wheel.data());
        assert_eq!(wheel.renderer().sv_texture_builds(), 1);
    }

    #[test]
    fn test_screen_bounds_follow_zoom() {
        let mut host = MockHost::default();
        let (mut wheel, _) = attached(&mut host);
        wheel.on_redraw(
            &HostObject::new([0.0, 0.0], [10.0, 10.0]),
            &Viewport::new(0.5, [0.0, 0.0], 0.0, 0.0),
        );
        let bounds = wheel.screen_bounds();
        assert_eq!(bounds.y, 11.0);
        assert_eq!(bounds.width, 150.0);
        assert_eq!(bounds.height, 194.0);
    }

    #[test]
    fn test_high_dpi_surfaces() {
        let mut host = MockHost::default();
        let (mut wheel, _) = attached(&mut host);
        wheel.set_device_pixel_ratio(2.0);
        let surfaces = wheel.surfaces().expect("surfaces");
        assert_eq!(surfaces.wheel.pixel_size(), (600, 600));
        assert_eq!(surfaces.alpha_bar.pixel_size(), (600, 32));
        assert_eq!(surfaces.preview.pixel_size(), (112, 112));
    }

    #[test]
    fn test_composite_draws_at_placement() {
        let mut host = MockHost::with_rgba(0.0, 255.0, 0.0, 255.0);
        let (wheel, _) = attached(&mut host);
        let mut canvas = Pixmap::new(500, 600).expect("pixmap");
        wheel.composite(&mut canvas);

        // preview swatch: placement (100, 192) + preview offset (0, 332) + 28
        let p = canvas.pixel(128, 552).expect("in bounds");
        assert!(p.red() < 5 && p.green() > 250 && p.blue() < 5, "{p:?}");
        assert_eq!(canvas.pixel(50, 50).expect("in bounds").alpha(), 0);
    }
}
