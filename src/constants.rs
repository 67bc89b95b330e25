//! Host-side constants.

/// Smallest channel value a node outputs
pub const CHANNEL_MIN: i64 = 0;

/// Largest channel value a node outputs
pub const CHANNEL_MAX: i64 = 255;

/// Node channel defaults: red, green, blue, alpha (opaque red)
pub const DEFAULT_CHANNELS: [i64; 4] = [255, 0, 0, 255];

/// Default node body size in canvas units
pub const NODE_SIZE: [f32; 2] = [300.0, 60.0];

/// Demo render target size in screen pixels
pub const CANVAS_SIZE: (u32, u32) = (720, 900);
