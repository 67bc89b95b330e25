//! Centralized constants for huewheel_ui
//!
//! All magic numbers shared by geometry, rendering and sync are defined here
//! for consistency and easy maintenance.

// =============================================================================
// Wheel Geometry
// =============================================================================

/// Logical side length of the square wheel surface
pub const WHEEL_SIZE: f32 = 300.0;

/// Radial thickness of the hue ring
pub const RING_THICKNESS: f32 = 20.0;

/// Distance from the SV square's corners to the ring's inner edge
pub const CORNER_GAP: f32 = 14.0;

/// Gap between the wheel surface edge and the ring's outer edge
pub const RING_MARGIN: f32 = 4.0;

/// Smallest radius or side length geometry may collapse to
pub const MIN_EXTENT: f32 = 1.0;

/// Edge snapping margin floor (logical px)
pub const SNAP_MIN_PX: f32 = 2.0;

/// Edge snapping margin as a fraction of the square side
pub const SNAP_FRACTION: f32 = 0.01;

// =============================================================================
// Alpha Bar & Preview
// =============================================================================

/// Height of the alpha bar strip
pub const ALPHA_BAR_HEIGHT: f32 = 16.0;

/// Vertical space between the wheel and the alpha bar
pub const ALPHA_BAR_MARGIN: f32 = 8.0;

/// Side of the preview swatch
pub const PREVIEW_SIZE: f32 = 56.0;

/// Vertical space between the alpha bar and the preview swatch
pub const PREVIEW_MARGIN: f32 = 8.0;

/// Checkerboard tile size (two cells per side)
pub const CHECKER_TILE: u32 = 12;

/// Light checkerboard cell
pub const CHECKER_LIGHT: [u8; 3] = [0xbb, 0xbb, 0xbb];

/// Dark checkerboard cell
pub const CHECKER_DARK: [u8; 3] = [0x99, 0x99, 0x99];

// =============================================================================
// Markers
// =============================================================================

/// Radius of the hue, SV and alpha markers
pub const MARKER_RADIUS: f32 = 6.0;

/// Stroke width of the dark outer marker ring
pub const MARKER_OUTER_STROKE: f32 = 3.0;

/// Stroke width of the light inner marker ring
pub const MARKER_INNER_STROKE: f32 = 1.5;

// =============================================================================
// Host Placement
// =============================================================================

/// Vertical gap (canvas units) between the host object and the picker
pub const CONTAINER_GAP: f32 = 12.0;

/// Default picker color when host channels are missing: opaque pure red
pub const DEFAULT_RGBA: [u8; 4] = [255, 0, 0, 255];
