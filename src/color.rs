//! Color model: structured HSL descriptions and the deterministic HSL→RGB
//! transform used to derive translucent draw colors.

/// A hue/saturation/lightness color description. Hue in degrees,
/// saturation and lightness in percent.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// A draw color: opaque RGB plus an alpha in [0, 1].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    pub fn white(a: f32) -> Self {
        Self::new(255, 255, 255, a)
    }
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Translucent draw color at the given alpha.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        let (r, g, b) = hsl_to_rgb(self.h, self.s, self.l);
        Rgba::new(r, g, b, alpha)
    }
}

/// Standard chroma-based piecewise HSL→RGB transform. Pure; hue wraps past
/// a full circle.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let s = s / 100.0;
    let l = l / 100.0;
    let k = |n: f32| (n + h / 30.0).rem_euclid(12.0);
    let a = s * l.min(1.0 - l);
    let f = |n: f32| {
        let k = k(n);
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    (
        (255.0 * f(0.0)).round() as u8,
        (255.0 * f(8.0)).round() as u8,
        (255.0 * f(4.0)).round() as u8,
    )
}

/// Parse an `hsl(h, s%, l%)` descriptor.
pub fn parse_hsl(descriptor: &str) -> Option<Hsl> {
    let inner = descriptor
        .trim()
        .strip_prefix("hsl(")?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let h = parts.next()?.parse::<f32>().ok()?;
    let s = parts.next()?.strip_suffix('%')?.parse::<f32>().ok()?;
    let l = parts.next()?.strip_suffix('%')?.parse::<f32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Hsl::new(h, s, l))
}

/// Convert a textual color descriptor to opaque RGB. An unparsable
/// descriptor degrades to opaque white; a bad color never halts rendering.
pub fn css_to_rgb(descriptor: &str) -> (u8, u8, u8) {
    match parse_hsl(descriptor) {
        Some(c) => hsl_to_rgb(c.h, c.s, c.l),
        None => (255, 255, 255),
    }
}
