//! Wheel geometry and hit testing.
//!
//! Everything here works in widget-local logical units: the wheel surface's
//! top-left corner is the origin, and the alpha bar and preview sit below it
//! in the same coordinate space.

use crate::config::PickerConfig;
use crate::constants::{MIN_EXTENT, SNAP_FRACTION, SNAP_MIN_PX};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Which part of the wheel a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ring,
    Square,
    None,
}

fn sanitize_extent(x: f32) -> f32 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}

/// Ring and SV-square geometry for a square drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub center: Point,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub ring_thickness: f32,
    pub square_side: f32,
    pub square_top_left: Point,
}

impl Geometry {
    /// Compute geometry for a surface of side `size`.
    ///
    /// Radii and the square side never drop below one logical unit, so a tiny
    /// surface produces a tiny (but valid) wheel instead of dividing by zero.
    pub fn new(size: f32, ring_thickness: f32, corner_gap: f32, margin: f32) -> Self {
        let size = sanitize_extent(size);
        let ring_thickness = sanitize_extent(ring_thickness);
        let half = size / 2.0;
        let center = Point::new(half, half);

        let outer_radius = (half - sanitize_extent(margin)).max(MIN_EXTENT);
        let inner_radius = (outer_radius - ring_thickness).max(MIN_EXTENT);
        // half diagonal of the square = inner - corner gap
        let square_side =
            ((inner_radius - sanitize_extent(corner_gap)) * std::f32::consts::SQRT_2).max(MIN_EXTENT);
        let square_top_left = Point::new(center.x - square_side / 2.0, center.y - square_side / 2.0);

        Self {
            center,
            outer_radius,
            inner_radius,
            ring_thickness,
            square_side,
            square_top_left,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(
            config.wheel_size,
            config.ring_thickness,
            config.corner_gap,
            config.ring_margin,
        )
    }

    /// Axis-aligned bounds of the SV square.
    pub fn square_bounds(&self) -> Rectangle {
        Rectangle::new(
            self.square_top_left.x,
            self.square_top_left.y,
            self.square_side,
            self.square_side,
        )
    }

    /// Classify a point. The ring wins where both regions could apply.
    pub fn hit_test(&self, point: Point) -> Region {
        let dist = point.distance(self.center);
        if dist >= self.inner_radius && dist <= self.outer_radius {
            Region::Ring
        } else if self.square_bounds().contains(point) {
            Region::Square
        } else {
            Region::None
        }
    }

    /// Hue selected by the angle of `point` around the center, in [0, 360).
    pub fn angle_to_hue(&self, point: Point) -> f32 {
        let dy = point.y - self.center.y;
        let dx = point.x - self.center.x;
        crate::color::wrap_hue(dy.atan2(dx).to_degrees())
    }

    /// Distance from an edge within which a channel snaps to its extreme.
    pub fn snap_margin(&self) -> f32 {
        SNAP_MIN_PX.max(self.square_side * SNAP_FRACTION)
    }

    /// Map a point to (saturation, value), snapping near the square's edges.
    ///
    /// Left/top take precedence over right/bottom when the square is smaller
    /// than two snap margins.
    pub fn point_to_sv(&self, point: Point) -> (f32, f32) {
        let bounds = self.square_bounds();
        let snap = self.snap_margin();

        let saturation = if point.x - bounds.x <= snap {
            0.0
        } else if bounds.right() - point.x <= snap {
            1.0
        } else {
            ((point.x - bounds.x) / bounds.width).clamp(0.0, 1.0)
        };

        let value = if point.y - bounds.y <= snap {
            1.0
        } else if bounds.bottom() - point.y <= snap {
            0.0
        } else {
            1.0 - ((point.y - bounds.y) / bounds.height).clamp(0.0, 1.0)
        };

        (saturation, value)
    }

    /// Radius of the ring's centerline, where the hue marker sits.
    pub fn ring_center_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    pub fn hue_marker_position(&self, hue: f32) -> Point {
        let radians = hue.to_radians();
        let r = self.ring_center_radius();
        Point::new(
            self.center.x + r * radians.cos(),
            self.center.y + r * radians.sin(),
        )
    }

    pub fn sv_marker_position(&self, saturation: f32, value: f32) -> Point {
        Point::new(
            self.square_top_left.x + saturation * self.square_side,
            self.square_top_left.y + (1.0 - value) * self.square_side,
        )
    }
}

/// Horizontal alpha strip below the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBar {
    pub bounds: Rectangle,
}

impl AlphaBar {
    pub fn new(top: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rectangle::new(
                0.0,
                top,
                sanitize_extent(width).max(MIN_EXTENT),
                sanitize_extent(height).max(MIN_EXTENT),
            ),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Alpha from the horizontal position only; `y` is ignored.
    pub fn alpha_at(&self, point: Point) -> f32 {
        ((point.x - self.bounds.x) / self.bounds.width).clamp(0.0, 1.0)
    }

    /// Bar-local x of the handle for `alpha`.
    pub fn handle_x(&self, alpha: f32) -> f32 {
        crate::color::unit(alpha) * self.bounds.width
    }

    /// Handle center in bar-local coordinates.
    pub fn handle_position(&self, alpha: f32) -> Point {
        Point::new(self.handle_x(alpha), self.bounds.height / 2.0)
    }
}

/// The full picker layout: wheel, alpha bar and preview swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerLayout {
    pub wheel_size: f32,
    pub wheel: Geometry,
    pub alpha_bar: AlphaBar,
    pub preview: Rectangle,
}

impl PickerLayout {
    pub fn from_config(config: &PickerConfig) -> Self {
        let wheel_size = sanitize_extent(config.wheel_size).max(MIN_EXTENT);
        let alpha_bar = AlphaBar::new(
            wheel_size + sanitize_extent(config.alpha_bar_margin),
            wheel_size,
            config.alpha_bar_height,
        );
        let preview_size = sanitize_extent(config.preview_size).max(MIN_EXTENT);
        let preview = Rectangle::new(
            0.0,
            alpha_bar.bounds.bottom() + sanitize_extent(config.preview_margin),
            preview_size,
            preview_size,
        );

        Self {
            wheel_size,
            wheel: Geometry::from_config(config),
            alpha_bar,
            preview,
        }
    }

    /// Unscaled size of the whole container.
    pub fn content_size(&self) -> (f32, f32) {
        (
            self.wheel_size.max(self.preview.width),
            self.preview.bottom(),
        )
    }
}
