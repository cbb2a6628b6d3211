/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Rationale:
/// - Correct blending with linear filtering (avoids fringes).
/// - Matches the `One, OneMinusSrcAlpha` blend state used by every pipeline.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied linear color from straight sRGB bytes (`0`–`255`).
    ///
    /// This is the constructor for CSS-style literals such as `#ccc`: the RGB
    /// channels are decoded from the sRGB transfer curve so they come out right
    /// on an sRGB swapchain.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();

        match digits.len() {
            3 => {
                let mut ch = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                let (r, g, b) = (ch.next()??, ch.next()??, ch.next()??);
                Some(Self::from_srgb_u8(r, g, b, 255))
            }
            6 => Some(Self::from_srgb_u8(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                255,
            )),
            8 => Some(Self::from_srgb_u8(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => None,
        }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Converts to the `wgpu` clear-color representation.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_expands_digits() {
        assert_eq!(Color::from_hex("#000"), Some(Color::black()));
        assert_eq!(Color::from_hex("#fff"), Some(Color::white()));
        assert_eq!(Color::from_hex("#f00"), Color::from_hex("#ff0000"));
    }

    #[test]
    fn gray_is_decoded_to_linear() {
        let c = Color::from_hex("#ccc").unwrap();
        // 0xcc = 0.8 in sRGB, ~0.604 linear.
        assert!((c.r - 0.6038).abs() < 1e-3);
        assert_eq!(c.r, c.g);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn alpha_premultiplies_channels() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#zzz").is_none());
        assert!(Color::from_hex("").is_none());
    }
}
