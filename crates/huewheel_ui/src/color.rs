//! HSV/RGB color model.
//!
//! Pure conversion functions plus [`ColorState`], the clamped HSV + alpha
//! value a picker owns. Nothing in here fails: out-of-range or non-finite
//! inputs are clamped (or wrapped, for hue) before use.

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to (hue, saturation, value).
    pub fn to_hsv(self) -> (f32, f32, f32) {
        rgb_to_hsv(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Attach an alpha channel.
    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Clamp to [0, 1], mapping NaN and infinities to 0.
pub(crate) fn unit(x: f32) -> f32 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Wrap a hue in degrees into [0, 360), mapping non-finite input to 0.
pub(crate) fn wrap_hue(h: f32) -> f32 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0 in f32
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Quantize a unit-interval channel to 0-255.
fn to_channel(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (wrapped modulo 360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// Sectors are chosen with `floor(h / 60)`, so a hue sitting exactly on a
/// sector boundary is evaluated by exactly one branch.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = wrap_hue(h);
    let s = unit(s);
    let v = unit(v);

    let c = v * s;
    let hh = h / 60.0;
    let x = c * (1.0 - ((hh % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (hh.floor() as u8).min(5) {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

/// Convert RGB (each 0-255) to HSV.
///
/// Returns `(h, s, v)` with `h` in [0, 360) and `s`, `v` in [0, 1].
/// Black has saturation 0; grays have hue 0 and saturation 0.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let r = unit(r / 255.0);
    let g = unit(g / 255.0);
    let b = unit(b / 255.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let h = if d == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { d / max };

    (wrap_hue(h), s, max)
}

/// The picker's color: HSV plus alpha, always in range.
///
/// Hue wraps modulo 360; saturation, value and alpha clamp to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    hue: f32,
    saturation: f32,
    value: f32,
    alpha: f32,
}

impl ColorState {
    /// Create a state, wrapping/clamping every component.
    pub fn new(hue: f32, saturation: f32, value: f32, alpha: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: unit(saturation),
            value: unit(value),
            alpha: unit(alpha),
        }
    }

    /// Build an opaque state from 8-bit RGB.
    pub fn from_rgb(color: Rgb) -> Self {
        Self::from_rgba(color.with_alpha(255))
    }

    /// Build a state from 8-bit RGBA.
    pub fn from_rgba(color: Rgba) -> Self {
        let (h, s, v) = color.rgb().to_hsv();
        Self::new(h, s, v, color.a as f32 / 255.0)
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_hue(&mut self, hue: f32) {
        self.hue = wrap_hue(hue);
    }

    pub fn set_saturation_value(&mut self, saturation: f32, value: f32) {
        self.saturation = unit(saturation);
        self.value = unit(value);
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = unit(alpha);
    }

    /// Derived RGB (never stored).
    pub fn rgb(&self) -> Rgb {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }

    /// Derived RGBA with alpha scaled to 0-255.
    pub fn rgba(&self) -> Rgba {
        self.rgb().with_alpha(to_channel(self.alpha))
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::from_rgba(Rgba::from(crate::constants::DEFAULT_RGBA))
    }
}
