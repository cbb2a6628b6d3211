use dial_engine::paint::Color;

/// Fixed visual constants of the clock face.
///
/// Lengths are logical pixels; insets are measured inward from the dial radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockStyle {
    /// Surface color behind the dial.
    pub background: Color,
    /// Color of the dial ring, the hour and minute hands and the brand text.
    pub ink: Color,
    /// Color of minor dots and numerals.
    pub faint: Color,

    pub dial_width: f32,

    pub dot_radius: f32,
    pub dot_inset: f32,

    pub numeral_inset: f32,
    pub numeral_size: f32,

    pub title: &'static str,
    pub tagline: &'static str,

    /// Length of the hour and minute hands behind the center.
    pub hand_tail: f32,
    pub hour_width: f32,
    pub minute_width: f32,

    pub second_color: Color,
    pub second_tail: f32,
    pub second_half_width: f32,
    pub second_inset: f32,

    pub cap_radius: f32,
    pub cap_color: Color,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            background: Color::white(),
            ink: Color::black(),
            faint: Color::from_srgb_u8(0xcc, 0xcc, 0xcc, 0xff),

            dial_width: 10.0,

            dot_radius: 4.0,
            dot_inset: 16.0,

            numeral_inset: 50.0,
            numeral_size: 35.0,

            title: "Simple-Clock",
            tagline: "Time is life...",

            hand_tail: 15.0,
            hour_width: 10.0,
            minute_width: 8.0,

            second_color: Color::from_srgb_u8(0xff, 0x00, 0x00, 0xff),
            second_tail: 30.0,
            second_half_width: 5.0,
            second_inset: 50.0,

            cap_radius: 6.0,
            cap_color: Color::from_srgb_u8(0x66, 0x66, 0x66, 0xff),
        }
    }
}

impl ClockStyle {
    /// Ink for dot or numeral emphasis.
    #[inline]
    pub fn marker(&self, major: bool) -> Color {
        if major { self.ink } else { self.faint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_use_ink_or_faint() {
        let s = ClockStyle::default();
        assert_eq!(s.marker(true), Color::black());
        assert_eq!(s.marker(false), Color::from_hex("#ccc").unwrap());
    }

    #[test]
    fn second_hand_is_red() {
        assert_eq!(ClockStyle::default().second_color, Color::from_hex("#f00").unwrap());
    }
}
