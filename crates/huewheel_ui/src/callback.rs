//! Callback abstraction for picker change notifications
//!
//! Wraps `Option<Box<dyn Fn(T)>>` so widgets can expose optional handlers
//! through builder methods.
//!
//! # Examples
//!
//! ```ignore
//! use huewheel_ui::{Callback, Rgba};
//!
//! let on_change: Callback<Rgba> = Callback::new(|c| log::info!("picked {:?}", c));
//! on_change.call(Rgba::new(255, 0, 0, 255));
//! ```

use std::fmt;

/// An optional side-effect handler taking a `T`.
pub struct Callback<T> {
    f: Option<Box<dyn Fn(T)>>,
}

impl<T> Callback<T> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the handler with `value`, if one is set.
    ///
    /// Returns `true` if a handler ran.
    pub fn call(&self, value: T) -> bool {
        match &self.f {
            Some(f) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
