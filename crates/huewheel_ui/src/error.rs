//! Error types for raster surface operations.

use thiserror::Error;

/// Errors that can occur while allocating or exporting raster surfaces.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backing pixmap could not be allocated (zero or oversized dimensions)
    #[error("Failed to allocate {width}x{height} surface")]
    SurfaceAllocation {
        /// Requested width in device pixels
        width: u32,
        /// Requested height in device pixels
        height: u32,
    },

    /// PNG encoding failed
    #[error("PNG encoding error: {0}")]
    Encode(String),

    /// I/O error while writing an encoded surface
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
