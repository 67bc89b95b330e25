// Widget implementations

mod color_wheel;

pub use color_wheel::{color_wheel, ColorWheel, Surfaces};
