//! Graph canvas host.
//!
//! Owns the nodes, the view transform and the window listener registry, and
//! drives each node's picker through its lifecycle:
//! - attach when a node is added (or lazily on the first frame)
//! - configure when stored widget values are reloaded
//! - redraw every frame
//! - detach when the node is removed

use huewheel_ui::tiny_skia::Pixmap;
use huewheel_ui::{
    ColorWheel, Event, EventResult, HostObject, Lifecycle, MouseButton, PickerConfig, PickerId,
    Point, RenderError, Viewport, WindowListeners,
};
use serde_json::Value;

use crate::node::RgbColorPickerNode;

/// The picker mounted on a node. Absent until the node is attached.
#[derive(Debug)]
pub struct PickerHandle {
    wheel: ColorWheel,
}

impl PickerHandle {
    pub fn wheel(&self) -> &ColorWheel {
        &self.wheel
    }
}

#[derive(Debug)]
struct NodeRecord {
    id: PickerId,
    node: RgbColorPickerNode,
    object: HostObject,
    picker: Option<PickerHandle>,
}

impl NodeRecord {
    /// Attach a picker if none is mounted yet.
    fn ensure_attached(&mut self, config: &PickerConfig, listeners: &WindowListeners) {
        if self.picker.is_some() {
            return;
        }
        let mut wheel = ColorWheel::new(self.id, config.clone(), listeners.clone());
        wheel.on_attach(&mut self.node);
        self.picker = Some(PickerHandle { wheel });
    }
}

/// A pan/zoom canvas of color picker nodes.
#[derive(Debug)]
pub struct GraphCanvas {
    viewport: Viewport,
    nodes: Vec<NodeRecord>,
    listeners: WindowListeners,
    picker_config: PickerConfig,
    next_id: u64,
}

impl GraphCanvas {
    pub fn new(picker_config: PickerConfig) -> Self {
        Self {
            viewport: Viewport::identity(),
            nodes: Vec::new(),
            listeners: WindowListeners::new(),
            picker_config,
            next_id: 1,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the view transform. Pickers follow on the next frame.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn listeners(&self) -> &WindowListeners {
        &self.listeners
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node and attach its picker immediately.
    pub fn add_node(&mut self, node: RgbColorPickerNode, object: HostObject) -> PickerId {
        let id = self.insert(node, object);
        if let Some(record) = self.nodes.iter_mut().find(|r| r.id == id) {
            record.ensure_attached(&self.picker_config, &self.listeners);
        }
        id
    }

    /// Add a node restored from a saved graph. Its picker attaches on the
    /// first frame, after stored values are in place.
    pub fn restore_node(&mut self, node: RgbColorPickerNode, object: HostObject) -> PickerId {
        self.insert(node, object)
    }

    /// Detach the node's picker and remove the node.
    pub fn remove_node(&mut self, id: PickerId) -> Option<RgbColorPickerNode> {
        let index = self.nodes.iter().position(|r| r.id == id)?;
        let mut record = self.nodes.remove(index);
        if let Some(handle) = &mut record.picker {
            handle.wheel.on_detach();
        }
        log::debug!("removed node {:?}", id);
        Some(record.node)
    }

    pub fn node(&self, id: PickerId) -> Option<&RgbColorPickerNode> {
        self.record(id).map(|r| &r.node)
    }

    pub fn node_mut(&mut self, id: PickerId) -> Option<&mut RgbColorPickerNode> {
        self.record_mut(id).map(|r| &mut r.node)
    }

    pub fn picker(&self, id: PickerId) -> Option<&PickerHandle> {
        self.record(id).and_then(|r| r.picker.as_ref())
    }

    /// Move a node in canvas space.
    pub fn move_node(&mut self, id: PickerId, position: [f32; 2]) {
        if let Some(record) = self.record_mut(id) {
            record.object.position = position;
        }
    }

    /// Load stored widget values into a node and reconfigure its picker.
    pub fn configure_node(&mut self, id: PickerId, values: &[(&str, Value)]) {
        let Some(record) = self.nodes.iter_mut().find(|r| r.id == id) else {
            log::warn!("configure for unknown node {:?}", id);
            return;
        };
        for (name, value) in values {
            record.node.set_widget_value(name, value.clone());
        }
        if let Some(handle) = &mut record.picker {
            handle.wheel.on_configure(&mut record.node);
        }
    }

    /// Run the per-frame redraw hook on every node.
    pub fn draw_frame(&mut self) {
        let (config, listeners, viewport) = (&self.picker_config, &self.listeners, &self.viewport);
        for record in &mut self.nodes {
            record.ensure_attached(config, listeners);
            if let Some(handle) = &mut record.picker {
                handle.wheel.on_redraw(&record.object, viewport);
            }
        }
    }

    /// Composite every mounted picker into a fresh pixmap.
    pub fn render(&self, width: u32, height: u32) -> Result<Pixmap, RenderError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
        for handle in self.nodes.iter().filter_map(|r| r.picker.as_ref()) {
            handle.wheel.composite(&mut pixmap);
        }
        Ok(pixmap)
    }

    /// Deliver a press to the topmost picker under `position`.
    pub fn pointer_down(&mut self, button: MouseButton, position: Point) -> EventResult {
        let event = Event::PointerDown { button, position };
        for record in self.nodes.iter_mut().rev() {
            let NodeRecord { node, picker, .. } = record;
            let Some(handle) = picker else { continue };
            if !handle.wheel.screen_bounds().contains(position) {
                continue;
            }
            let result = handle.wheel.on_event(&event, node);
            if result.is_handled() {
                return result;
            }
        }
        EventResult::None
    }

    /// Window-level move: only pickers holding listeners receive it.
    pub fn pointer_move(&mut self, position: Point) -> EventResult {
        self.dispatch_to_listeners(&Event::PointerMove { position })
    }

    /// Window-level release: only pickers holding listeners receive it.
    pub fn pointer_up(&mut self, button: MouseButton, position: Point) -> EventResult {
        self.dispatch_to_listeners(&Event::PointerUp { button, position })
    }

    fn dispatch_to_listeners(&mut self, event: &Event) -> EventResult {
        let owners = self.listeners.owners();
        let mut outcome = EventResult::None;
        for record in self.nodes.iter_mut().filter(|r| owners.contains(&r.id)) {
            let NodeRecord { node, picker, .. } = record;
            if let Some(handle) = picker {
                match handle.wheel.on_event(event, node) {
                    EventResult::None => {}
                    EventResult::Captured if outcome == EventResult::Changed => {}
                    result => outcome = result,
                }
            }
        }
        outcome
    }

    fn insert(&mut self, node: RgbColorPickerNode, object: HostObject) -> PickerId {
        let id = PickerId(self.next_id);
        self.next_id += 1;
        self.nodes.push(NodeRecord {
            id,
            node,
            object,
            picker: None,
        });
        log::debug!("added node {:?} at {:?}", id, object.position);
        id
    }

    fn record(&self, id: PickerId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|r| r.id == id)
    }

    fn record_mut(&mut self, id: PickerId) -> Option<&mut NodeRecord> {
        self.nodes.iter_mut().find(|r| r.id == id)
    }
}

impl Default for GraphCanvas {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huewheel_ui::{Channel, DragState, HostChannels};

    fn canvas_with_node() -> (GraphCanvas, PickerId) {
        let mut canvas = GraphCanvas::default();
        let id = canvas.add_node(
            RgbColorPickerNode::new(),
            HostObject::new([100.0, 100.0], [300.0, 60.0]),
        );
        canvas.draw_frame();
        (canvas, id)
    }

    fn ring_point(canvas: &GraphCanvas, id: PickerId, degrees: f32) -> Point {
        let wheel = canvas.picker(id).expect("attached").wheel();
        let g = wheel.layout().wheel;
        let r = degrees.to_radians();
        wheel.placement().to_screen(Point::new(
            g.center.x + g.ring_center_radius() * r.cos(),
            g.center.y + g.ring_center_radius() * r.sin(),
        ))
    }

    #[test]
    fn test_add_node_attaches_immediately() {
        let mut canvas = GraphCanvas::default();
        let id = canvas.add_node(RgbColorPickerNode::new(), HostObject::default());
        assert!(canvas.picker(id).is_some_and(|p| p.wheel().is_attached()));
    }

    #[test]
    fn test_restored_node_attaches_on_first_frame() {
        let mut canvas = GraphCanvas::default();
        let mut node = RgbColorPickerNode::new();
        node.set_widget_value("red", Value::from(0));
        node.set_widget_value("blue", Value::from(255));
        let id = canvas.restore_node(node, HostObject::default());
        assert!(canvas.picker(id).is_none());

        canvas.draw_frame();
        canvas.draw_frame();
        let state = canvas
            .picker(id)
            .and_then(|p| p.wheel().state())
            .expect("attached");
        assert!((state.hue() - 240.0).abs() < 0.5);
    }

    #[test]
    fn test_click_drag_release_updates_node() {
        let (mut canvas, id) = canvas_with_node();

        let press = ring_point(&canvas, id, 120.0);
        assert_eq!(
            canvas.pointer_down(MouseButton::Left, press),
            EventResult::Changed
        );
        assert_eq!(canvas.listeners().owners(), vec![id]);

        let node = canvas.node_mut(id).expect("node");
        assert!(node.take_dirty());
        assert_eq!(node.outputs().0, "#00FF00");

        let moved = ring_point(&canvas, id, 240.0);
        assert_eq!(canvas.pointer_move(moved), EventResult::Changed);
        assert_eq!(canvas.node(id).expect("node").outputs().0, "#0000FF");

        assert_eq!(
            canvas.pointer_up(MouseButton::Left, moved),
            EventResult::Captured
        );
        assert!(canvas.listeners().is_empty());
        assert_eq!(canvas.pointer_move(press), EventResult::None);
    }

    #[test]
    fn test_press_outside_pickers_is_ignored() {
        let (mut canvas, id) = canvas_with_node();
        assert_eq!(
            canvas.pointer_down(MouseButton::Left, Point::new(5.0, 5.0)),
            EventResult::None
        );
        assert!(!canvas.node(id).expect("node").is_dirty());
    }

    #[test]
    fn test_pickers_follow_pan_and_zoom() {
        let (mut canvas, id) = canvas_with_node();
        canvas.set_viewport(Viewport::new(2.0, [10.0, -20.0], 0.0, 0.0));
        canvas.draw_frame();
        let placement = canvas.picker(id).expect("attached").wheel().placement();
        assert_eq!(placement.left, 220.0);
        assert_eq!(placement.top, (100.0 - 20.0 + 60.0 + 12.0) * 2.0);
        assert_eq!(placement.scale, 2.0);

        let press = ring_point(&canvas, id, 240.0);
        canvas.pointer_down(MouseButton::Left, press);
        assert_eq!(canvas.node(id).expect("node").outputs().0, "#0000FF");
    }

    #[test]
    fn test_configure_node_rereads_values() {
        let (mut canvas, id) = canvas_with_node();
        canvas.configure_node(id, &[("red", Value::from(0)), ("green", Value::from(255))]);
        let state = canvas
            .picker(id)
            .and_then(|p| p.wheel().state())
            .expect("attached");
        assert!((state.hue() - 120.0).abs() < 0.5);
    }

    #[test]
    fn test_remove_node_mid_drag_releases_listeners() {
        let (mut canvas, id) = canvas_with_node();
        canvas.pointer_down(MouseButton::Left, ring_point(&canvas, id, 10.0));
        assert_eq!(canvas.listeners().len(), 1);

        let node = canvas.remove_node(id).expect("node");
        assert!(canvas.listeners().is_empty());
        assert!(canvas.is_empty());
        assert!(node.channel(Channel::Red).is_some());
        assert_eq!(canvas.pointer_up(MouseButton::Left, Point::zero()), EventResult::None);
    }

    #[test]
    fn test_overlapping_pickers_topmost_wins() {
        let mut canvas = GraphCanvas::default();
        let below = canvas.add_node(RgbColorPickerNode::new(), HostObject::default());
        let above = canvas.add_node(RgbColorPickerNode::new(), HostObject::default());
        canvas.draw_frame();

        let press = ring_point(&canvas, above, 240.0);
        canvas.pointer_down(MouseButton::Left, press);
        let drag = |id| canvas.picker(id).expect("attached").wheel().drag_state();
        assert_eq!(drag(above), DragState::DraggingHue);
        assert_eq!(drag(below), DragState::Idle);
    }

    #[test]
    fn test_render_composites_pickers() {
        let (canvas, _) = canvas_with_node();
        let pixmap = canvas.render(500, 600).expect("pixmap");
        // preview swatch center: (100, 172 + 332) + 28
        let p = pixmap.pixel(128, 532).expect("in bounds");
        assert!(p.red() > 250 && p.green() < 5 && p.blue() < 5, "{p:?}");
        assert_eq!(p.alpha(), 255);
        assert_eq!(pixmap.pixel(20, 20).expect("in bounds").alpha(), 0);
    }
}
