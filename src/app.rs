//! Native demo: lays out a picker node, drives one hue drag through the
//! canvas host and writes each frame to a PNG.

use std::error::Error;
use std::path::{Path, PathBuf};

use huewheel_ui::{HostObject, MouseButton, Point, Viewport};

use crate::canvas::GraphCanvas;
use crate::config::AppConfig;
use crate::constants::{CANVAS_SIZE, NODE_SIZE};
use crate::node::RgbColorPickerNode;

/// Render the demo frames into `out_dir`. Returns the files written.
pub fn run(config: &AppConfig, out_dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    std::fs::create_dir_all(out_dir)?;

    let mut canvas = GraphCanvas::new(config.picker.clone());
    let id = canvas.add_node(
        RgbColorPickerNode::new(),
        HostObject::new([40.0, 20.0], NODE_SIZE),
    );
    let mut written = Vec::new();

    canvas.draw_frame();
    written.push(save_frame(&canvas, out_dir, "initial.png")?);

    // press on the ring at 240 degrees and drag the SV marker to the middle
    let Some(handle) = canvas.picker(id) else {
        return Err("picker failed to attach".into());
    };
    let wheel = handle.wheel();
    let g = wheel.layout().wheel;
    let ring = g.hue_marker_position(240.0);
    let press = wheel.placement().to_screen(ring);
    let square_center = wheel.placement().to_screen(g.center);

    canvas.pointer_down(MouseButton::Left, press);
    canvas.pointer_up(MouseButton::Left, press);
    canvas.pointer_down(MouseButton::Left, square_center);
    canvas.pointer_move(Point::new(square_center.x - 20.0, square_center.y - 30.0));
    canvas.pointer_up(MouseButton::Left, square_center);
    canvas.draw_frame();
    written.push(save_frame(&canvas, out_dir, "picked.png")?);

    canvas.set_viewport(Viewport::new(1.5, [-20.0, -10.0], 0.0, 0.0));
    canvas.draw_frame();
    written.push(save_frame(&canvas, out_dir, "zoomed.png")?);

    if let Some(node) = canvas.node_mut(id) {
        let (rgb, rgba) = node.outputs();
        log::info!("{} changes written, outputs {} {}", node.take_changes().len(), rgb, rgba);
        println!("{}", rgb);
        println!("{}", rgba);
    }

    Ok(written)
}

fn save_frame(canvas: &GraphCanvas, out_dir: &Path, name: &str) -> Result<PathBuf, Box<dyn Error>> {
    let (width, height) = CANVAS_SIZE;
    let pixmap = canvas.render(width, height)?;
    let path = out_dir.join(name);
    let png = pixmap.encode_png().map_err(|e| e.to_string())?;
    std::fs::write(&path, png)?;
    log::info!("wrote {:?}", path);
    Ok(path)
}
