//! Temperature and brightness sliders applied to a base color.

use crate::color::{encode, Color};

/// Slider bound on either side of zero.
pub const OFFSET_LIMIT: i32 = 50;
/// Channel shift at full brightness.
const BRIGHTNESS_SPAN: f64 = 80.0;
/// Red/blue shift at full temperature.
const TEMPERATURE_SPAN: f64 = 35.0;

/// Slider positions, each in [-50, 50].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adjustment {
    pub temperature: i32,
    pub brightness: i32,
}

impl Adjustment {
    pub fn nudge_temperature(&mut self, step: i32) {
        self.temperature = clamp_offset(self.temperature.saturating_add(step));
    }

    pub fn nudge_brightness(&mut self, step: i32) {
        self.brightness = clamp_offset(self.brightness.saturating_add(step));
    }

    pub fn is_neutral(&self) -> bool {
        self.temperature == 0 && self.brightness == 0
    }

    pub fn apply(&self, base: Color) -> Color {
        adjust(base, self.temperature, self.brightness)
    }
}

fn clamp_offset(v: i32) -> i32 {
    v.clamp(-OFFSET_LIMIT, OFFSET_LIMIT)
}

fn scaled(offset: i32, span: f64) -> i32 {
    (clamp_offset(offset) as f64 / OFFSET_LIMIT as f64 * span).floor() as i32
}

fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Brightness first, then temperature on the brightness-adjusted channels.
/// The two passes do not commute because each clamps.
pub fn adjust(base: Color, temperature: i32, brightness: i32) -> Color {
    let (r, g, b) = base.channels();
    let (mut r, mut g, mut b) = (r as i32, g as i32, b as i32);

    let delta_b = scaled(brightness, BRIGHTNESS_SPAN);
    r = clamp_channel(r + delta_b) as i32;
    g = clamp_channel(g + delta_b) as i32;
    b = clamp_channel(b + delta_b) as i32;

    let delta_t = scaled(temperature, TEMPERATURE_SPAN);
    r = clamp_channel(r + delta_t) as i32;
    b = clamp_channel(b - delta_t) as i32;

    encode(r as u8, g as u8, b as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(hex: &str) -> Color {
        hex.parse().unwrap()
    }

    #[test]
    fn zero_offsets_are_identity() {
        for hex in ["#000000", "#FFFFFF", "#6366F1", "#7F8081"] {
            assert_eq!(adjust(c(hex), 0, 0), c(hex));
        }
    }

    #[test]
    fn extremes_clamp_to_channel_bounds() {
        // Cooling a black base still lifts blue by the full temperature span.
        assert_eq!(adjust(c("#000000"), -50, -50), Color::new(0, 0, 35));
        assert_eq!(adjust(c("#FFFFFF"), 50, 50), Color::new(255, 255, 255 - 35));
    }

    #[test]
    fn full_brightness_adds_eighty_to_every_channel() {
        let base = c("#102030");
        assert_eq!(adjust(base, 0, 50), Color::new(0x10 + 80, 0x20 + 80, 0x30 + 80));
        assert_eq!(adjust(c("#F0F0F0"), 0, 50), c("#FFFFFF"));
    }

    #[test]
    fn full_temperature_warms_red_and_cools_blue() {
        let base = c("#808080");
        let warm = adjust(base, 50, 0);
        assert_eq!(warm.channels(), (0x80 + 35, 0x80, 0x80 - 35));
        let cold = adjust(base, -50, 0);
        assert_eq!(cold.channels(), (0x80 - 35, 0x80, 0x80 + 35));
    }

    #[test]
    fn negative_fractions_round_toward_negative_infinity() {
        // -1/50*80 = -1.6 -> -2 ; -1/50*35 = -0.7 -> -1
        let out = adjust(c("#646464"), -1, -1);
        assert_eq!(out, Color::new(100 - 2 - 1, 100 - 2, 100 - 2 + 1));
    }

    #[test]
    fn temperature_applies_after_brightness_clamp() {
        // Brightness pushes red to 255 first; warming cannot exceed it, while
        // blue is cooled from the clamped value.
        let out = adjust(c("#F0F0F0"), 50, 50);
        assert_eq!(out.channels(), (255, 255, 255 - 35));
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        assert_eq!(adjust(c("#808080"), 500, -500), adjust(c("#808080"), 50, -50));
        let mut a = Adjustment::default();
        a.nudge_brightness(70);
        a.nudge_temperature(-70);
        assert_eq!(a, Adjustment { temperature: -50, brightness: 50 });
        assert!(!a.is_neutral());
    }
}
