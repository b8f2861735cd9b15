/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Build a color from hue, saturation and lightness.
    ///
    /// Hue wraps modulo 1; saturation and lightness are clamped to `[0, 1]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self::new(
            hue_to_rgb(q, p, h + 1.0 / 3.0),
            hue_to_rgb(q, p, h),
            hue_to_rgb(q, p, h - 1.0 / 3.0),
        )
    }

    /// Linear interpolation; `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let s = 1.0 - t;
        Color::new(
            self.r * s + other.r * t,
            self.g * s + other.g * t,
            self.b * s + other.b * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// RGB plus a caller-chosen fourth component, for std140-style uniforms.
    pub fn extend(self, w: f32) -> [f32; 4] {
        [self.r, self.g, self.b, w]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::from_hex(0x55aa33);
        assert!(close(c, Color::new(85.0 / 255.0, 170.0 / 255.0, 51.0 / 255.0)));
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(Color::from_hsl(0.6, 0.0, 1.0), Color::WHITE);
        assert_eq!(Color::from_hsl(0.3, 0.0, 0.25), Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn primary_hues() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::new(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::new(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hue_wraps() {
        assert!(close(Color::from_hsl(1.6, 1.0, 0.6), Color::from_hsl(0.6, 1.0, 0.6)));
        assert!(close(Color::from_hsl(-0.4, 1.0, 0.6), Color::from_hsl(0.6, 1.0, 0.6)));
    }

    #[test]
    fn sky_blue_hsl() {
        // Lightness 0.6 at full saturation: p = 1.0, q = 0.2.
        let c = Color::from_hsl(0.6, 1.0, 0.6);
        assert!(close(c, Color::new(0.2, 0.52, 1.0)));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::new(0.2, 0.4, 0.8);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!(close(a.lerp(b, 0.5), Color::new(0.1, 0.2, 0.4)));
    }
}
