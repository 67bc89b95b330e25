//! Raster rendering of the wheel, alpha bar and preview swatch.
//!
//! Surfaces are tiny-skia pixmaps sized `round(logical * device_pixel_ratio)`.
//! Every draw call clears its surface, applies one resolution-scale transform
//! and works in logical units from there, so repeated draws of the same state
//! produce identical bytes.
//!
//! Two textures are cached between frames:
//! - the hue ring, keyed by surface size, scale, geometry and ring style
//! - the SV square, keyed by hue and device-pixel side

use std::fmt;
use std::path::Path;

use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, LinearGradient, Paint, PathBuilder, Pattern,
    Pixmap, PixmapPaint, PremultipliedColorU8, Rect, SpreadMode, Stroke, Transform,
};

use crate::color::{hsv_to_rgb, ColorState};
use crate::config::RingStyle;
use crate::constants::{
    CHECKER_DARK, CHECKER_LIGHT, CHECKER_TILE, MARKER_INNER_STROKE, MARKER_OUTER_STROKE,
    MARKER_RADIUS,
};
use crate::error::{RenderError, Result};
use crate::geometry::{AlphaBar, Geometry, Point};

/// Hue stops of the angular gradient, as (turn fraction, rgb).
const HUE_STOPS: [(f32, [u8; 3]); 7] = [
    (0.0 / 6.0, [255, 0, 0]),
    (1.0 / 6.0, [255, 255, 0]),
    (2.0 / 6.0, [0, 255, 0]),
    (3.0 / 6.0, [0, 255, 255]),
    (4.0 / 6.0, [0, 0, 255]),
    (5.0 / 6.0, [255, 0, 255]),
    (6.0 / 6.0, [255, 0, 0]),
];

/// A raster target with a fixed logical size and a device-pixel backing store.
pub struct Surface {
    pixmap: Pixmap,
    width: f32,
    height: f32,
    scale: f32,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: f32, height: f32, scale: f32) -> Result<Self> {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        let height = if height.is_finite() { height.max(1.0) } else { 1.0 };

        let px_width = ((width * scale).round() as u32).max(1);
        let px_height = ((height * scale).round() as u32).max(1);
        let pixmap = Pixmap::new(px_width, px_height).ok_or(RenderError::SurfaceAllocation {
            width: px_width,
            height: px_height,
        })?;

        Ok(Self {
            pixmap,
            width,
            height,
            scale,
        })
    }

    /// Logical (unscaled) size.
    pub fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Backing-store size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether this surface already has the requested shape.
    pub fn matches(&self, width: f32, height: f32, scale: f32) -> bool {
        self.width == width && self.height == height && self.scale == scale
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("logical", &(self.width, self.height))
            .field("pixels", &self.pixel_size())
            .field("scale", &self.scale)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RingKey {
    requested: RingStyle,
    pixels: (u32, u32),
    scale: u32,
    center: (u32, u32),
    radii: (u32, u32),
}

impl RingKey {
    fn new(requested: RingStyle, surface: &Surface, geometry: &Geometry) -> Self {
        Self {
            requested,
            pixels: surface.pixel_size(),
            scale: surface.scale.to_bits(),
            center: (geometry.center.x.to_bits(), geometry.center.y.to_bits()),
            radii: (
                geometry.inner_radius.to_bits(),
                geometry.outer_radius.to_bits(),
            ),
        }
    }
}

enum RingPaint {
    /// Conic gradient texture used as a pattern over an anti-aliased annulus.
    Gradient {
        texture: Pixmap,
        annulus: tiny_skia::Path,
        pattern_transform: Transform,
    },
    /// Full-surface texture with the ring already evaluated per pixel.
    PerPixel { texture: Pixmap },
}

struct RingCache {
    key: RingKey,
    paint: RingPaint,
}

struct SvTexture {
    hue_bits: u32,
    side: u32,
    pixmap: Pixmap,
}

/// Draws picker surfaces and owns their cached textures.
pub struct Renderer {
    ring_style: RingStyle,
    ring: Option<RingCache>,
    sv: Option<SvTexture>,
    checker: Option<Pixmap>,
    ring_builds: usize,
    sv_builds: usize,
}

impl Renderer {
    pub fn new(ring_style: RingStyle) -> Self {
        Self {
            ring_style,
            ring: None,
            sv: None,
            checker: None,
            ring_builds: 0,
            sv_builds: 0,
        }
    }

    /// The requested ring style.
    pub fn ring_style(&self) -> RingStyle {
        self.ring_style
    }

    /// The ring style actually in use, once a ring has been drawn.
    pub fn active_ring_style(&self) -> Option<RingStyle> {
        self.ring.as_ref().map(|cache| match cache.paint {
            RingPaint::Gradient { .. } => RingStyle::Gradient,
            RingPaint::PerPixel { .. } => RingStyle::PerPixel,
        })
    }

    /// Number of times the hue ring texture has been (re)built.
    pub fn ring_texture_builds(&self) -> usize {
        self.ring_builds
    }

    /// Number of times the SV texture has been (re)built.
    pub fn sv_texture_builds(&self) -> usize {
        self.sv_builds
    }

    /// Drop all cached textures.
    pub fn invalidate(&mut self) {
        self.ring = None;
        self.sv = None;
        self.checker = None;
    }

    /// Draw hue ring, SV square and both markers.
    pub fn draw_wheel(&mut self, surface: &mut Surface, state: &ColorState, geometry: &Geometry) {
        surface.clear();
        self.draw_hue_ring(surface, geometry);
        self.draw_sv_square(surface, state.hue(), geometry);

        let ts = surface.transform();
        draw_marker(&mut surface.pixmap, geometry.hue_marker_position(state.hue()), ts);
        draw_marker(
            &mut surface.pixmap,
            geometry.sv_marker_position(state.saturation(), state.value()),
            ts,
        );
    }

    /// Draw the checkerboard, transparent-to-opaque gradient and alpha handle.
    pub fn draw_alpha_bar(&mut self, surface: &mut Surface, state: &ColorState) {
        surface.clear();
        let (width, height) = surface.logical_size();
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };
        self.fill_checkerboard(surface, rect);

        let rgb = state.rgb();
        let gradient = LinearGradient::new(
            tiny_skia::Point::from_xy(0.0, 0.0),
            tiny_skia::Point::from_xy(width, 0.0),
            vec![
                GradientStop::new(0.0, Color::from_rgba8(rgb.r, rgb.g, rgb.b, 0)),
                GradientStop::new(1.0, Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );
        match gradient {
            Some(shader) => {
                let paint = Paint {
                    shader,
                    ..Paint::default()
                };
                let ts = surface.transform();
                surface.pixmap.fill_rect(rect, &paint, ts, None);
            }
            None => log::debug!("alpha gradient unavailable for {}px bar", width),
        }

        let handle = AlphaBar::new(0.0, width, height).handle_position(state.alpha());
        let ts = surface.transform();
        draw_marker(&mut surface.pixmap, handle, ts);
    }

    /// Draw the current RGBA over a checkerboard with a light border.
    pub fn draw_preview(&mut self, surface: &mut Surface, state: &ColorState) {
        surface.clear();
        let (width, height) = surface.logical_size();
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };
        self.fill_checkerboard(surface, rect);

        let ts = surface.transform();
        let rgba = state.rgba();
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        surface.pixmap.fill_rect(rect, &paint, ts, None);

        if let Some(border) = Rect::from_xywh(0.5, 0.5, width - 1.0, height - 1.0) {
            paint.set_color_rgba8(255, 255, 255, 255);
            let path = PathBuilder::from_rect(border);
            let stroke = Stroke {
                width: 1.0,
                ..Stroke::default()
            };
            surface.pixmap.stroke_path(&path, &paint, &stroke, ts, None);
        }
    }

    fn draw_hue_ring(&mut self, surface: &mut Surface, geometry: &Geometry) {
        let key = RingKey::new(self.ring_style, surface, geometry);
        if self.ring.as_ref().is_none_or(|cache| cache.key != key) {
            self.ring = build_ring(key, surface, geometry);
            self.ring_builds += 1;
        }
        let Some(cache) = &self.ring else {
            log::warn!("hue ring texture unavailable, skipping ring");
            return;
        };

        match &cache.paint {
            RingPaint::Gradient {
                texture,
                annulus,
                pattern_transform,
            } => {
                let paint = Paint {
                    shader: Pattern::new(
                        texture.as_ref(),
                        SpreadMode::Pad,
                        FilterQuality::Bilinear,
                        1.0,
                        *pattern_transform,
                    ),
                    anti_alias: true,
                    ..Paint::default()
                };
                let ts = surface.transform();
                surface
                    .pixmap
                    .fill_path(annulus, &paint, FillRule::EvenOdd, ts, None);
            }
            RingPaint::PerPixel { texture } => {
                surface.pixmap.draw_pixmap(
                    0,
                    0,
                    texture.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    fn draw_sv_square(&mut self, surface: &mut Surface, hue: f32, geometry: &Geometry) {
        let side_px = ((geometry.square_side * surface.scale).round() as u32).max(1);
        let hue_bits = hue.to_bits();
        let stale = self
            .sv
            .as_ref()
            .is_none_or(|t| t.hue_bits != hue_bits || t.side != side_px);
        if stale {
            log::trace!("rebuilding {}px SV texture for hue {:.2}", side_px, hue);
            self.sv = build_sv_texture(hue, side_px).map(|pixmap| SvTexture {
                hue_bits,
                side: side_px,
                pixmap,
            });
            self.sv_builds += 1;
        }
        let Some(sv) = &self.sv else {
            log::warn!("SV texture unavailable, skipping square");
            return;
        };

        let tl = geometry.square_top_left;
        let side = geometry.square_side;
        let Some(rect) = Rect::from_xywh(tl.x, tl.y, side, side) else {
            return;
        };
        // texture pixels -> logical units
        let k = side / side_px as f32;
        let paint = Paint {
            shader: Pattern::new(
                sv.pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                1.0,
                Transform::from_row(k, 0.0, 0.0, k, tl.x, tl.y),
            ),
            anti_alias: false,
            ..Paint::default()
        };
        let ts = surface.transform();
        surface.pixmap.fill_rect(rect, &paint, ts, None);
    }

    fn fill_checkerboard(&mut self, surface: &mut Surface, rect: Rect) {
        if self.checker.is_none() {
            self.checker = checker_tile();
        }
        let ts = surface.transform();
        match &self.checker {
            Some(tile) => {
                let paint = Paint {
                    shader: Pattern::new(
                        tile.as_ref(),
                        SpreadMode::Repeat,
                        FilterQuality::Nearest,
                        1.0,
                        Transform::identity(),
                    ),
                    anti_alias: false,
                    ..Paint::default()
                };
                surface.pixmap.fill_rect(rect, &paint, ts, None);
            }
            None => {
                let [r, g, b] = CHECKER_LIGHT;
                let mut paint = Paint::default();
                paint.set_color_rgba8(r, g, b, 255);
                surface.pixmap.fill_rect(rect, &paint, ts, None);
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RingStyle::default())
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("ring_style", &self.ring_style)
            .field("active_ring_style", &self.active_ring_style())
            .field("ring_builds", &self.ring_builds)
            .field("sv_builds", &self.sv_builds)
            .finish()
    }
}

/// Color of the angular gradient at `turn` (0..1 around the circle).
fn conic_color(turn: f32) -> [u8; 3] {
    let t = turn.rem_euclid(1.0);
    for pair in HUE_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
            return [lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2])];
        }
    }
    HUE_STOPS[HUE_STOPS.len() - 1].1
}

fn build_ring(key: RingKey, surface: &Surface, geometry: &Geometry) -> Option<RingCache> {
    if key.requested == RingStyle::Gradient {
        match conic_ring(surface.scale, geometry) {
            Some(paint) => return Some(RingCache { key, paint }),
            None => log::debug!("angular gradient unavailable, using per-pixel hue ring"),
        }
    }
    per_pixel_ring(surface, geometry).map(|texture| RingCache {
        key,
        paint: RingPaint::PerPixel { texture },
    })
}

fn conic_ring(scale: f32, geometry: &Geometry) -> Option<RingPaint> {
    let side = ((geometry.outer_radius * 2.0 * scale).ceil() as u32).max(1);
    let mut texture = Pixmap::new(side, side)?;
    let half = side as f32 / 2.0;
    for (i, pixel) in texture.pixels_mut().iter_mut().enumerate() {
        let x = (i as u32 % side) as f32 + 0.5 - half;
        let y = (i as u32 / side) as f32 + 0.5 - half;
        let turn = y.atan2(x).to_degrees().rem_euclid(360.0) / 360.0;
        let [r, g, b] = conic_color(turn);
        *pixel = PremultipliedColorU8::from_rgba(r, g, b, 255)?;
    }

    let c = geometry.center;
    let mut pb = PathBuilder::new();
    pb.push_circle(c.x, c.y, geometry.outer_radius);
    pb.push_circle(c.x, c.y, geometry.inner_radius);
    let annulus = pb.finish()?;

    let inv = 1.0 / scale;
    Some(RingPaint::Gradient {
        texture,
        annulus,
        pattern_transform: Transform::from_row(inv, 0.0, 0.0, inv, c.x - half * inv, c.y - half * inv),
    })
}

fn per_pixel_ring(surface: &Surface, geometry: &Geometry) -> Option<Pixmap> {
    let (width, height) = surface.pixel_size();
    let mut texture = Pixmap::new(width, height)?;
    let scale = surface.scale;
    let pixels = texture.pixels_mut();
    for y in 0..height {
        for x in 0..width {
            let p = Point::new((x as f32 + 0.5) / scale, (y as f32 + 0.5) / scale);
            let dist = p.distance(geometry.center);
            if dist < geometry.inner_radius || dist > geometry.outer_radius {
                continue;
            }
            let rgb = hsv_to_rgb(geometry.angle_to_hue(p), 1.0, 1.0);
            pixels[(y * width + x) as usize] = PremultipliedColorU8::from_rgba(rgb.r, rgb.g, rgb.b, 255)?;
        }
    }
    Some(texture)
}

fn build_sv_texture(hue: f32, side: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(side, side)?;
    let span = side.saturating_sub(1).max(1) as f32;
    let pixels = pixmap.pixels_mut();
    for y in 0..side {
        let value = 1.0 - y as f32 / span;
        for x in 0..side {
            let rgb = hsv_to_rgb(hue, x as f32 / span, value);
            pixels[(y * side + x) as usize] = PremultipliedColorU8::from_rgba(rgb.r, rgb.g, rgb.b, 255)?;
        }
    }
    Some(pixmap)
}

fn checker_tile() -> Option<Pixmap> {
    let mut tile = Pixmap::new(CHECKER_TILE, CHECKER_TILE)?;
    let cell = CHECKER_TILE / 2;
    let [lr, lg, lb] = CHECKER_LIGHT;
    let [dr, dg, db] = CHECKER_DARK;
    let light = PremultipliedColorU8::from_rgba(lr, lg, lb, 255)?;
    let dark = PremultipliedColorU8::from_rgba(dr, dg, db, 255)?;
    for (i, pixel) in tile.pixels_mut().iter_mut().enumerate() {
        let x = i as u32 % CHECKER_TILE;
        let y = i as u32 / CHECKER_TILE;
        *pixel = if (x < cell) == (y < cell) { dark } else { light };
    }
    Some(tile)
}

/// Two-tone circular marker: dark outer ring, light inner ring.
fn draw_marker(pixmap: &mut Pixmap, at: Point, ts: Transform) {
    let Some(path) = PathBuilder::from_circle(at.x, at.y, MARKER_RADIUS) else {
        return;
    };
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };

    paint.set_color_rgba8(0, 0, 0, 255);
    let outer = Stroke {
        width: MARKER_OUTER_STROKE,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &outer, ts, None);

    paint.set_color_rgba8(255, 255, 255, 255);
    let inner = Stroke {
        width: MARKER_INNER_STROKE,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &inner, ts, None);
}
