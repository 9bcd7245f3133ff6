use std::fmt;
use std::hash::{Hash, Hasher};

use image::Rgba;

use crate::color::{rgba, Color, ColorId};
use crate::util::normalize;

const RED_MASK: u16 = 0x001f;
const GREEN_MASK: u16 = 0x03e0;
const BLUE_MASK: u16 = 0x7c00;
const COLOR_MASK: u16 = RED_MASK | GREEN_MASK | BLUE_MASK;

pub const CHANNEL_MAX: u8 = 0x1f;

/// 15-bit color as used by handheld LCD controllers.
///
/// `0bxbbbbbgggggrrrrr`: red in bits 0-4, green in 5-9, blue in 10-14.
/// Bit 15 is kept in the raw value but ignored by every channel operation,
/// equality and hashing included.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rgb555(pub u16);

impl Rgb555 {
    pub const BLACK: Rgb555 = Rgb555(0x0000);
    pub const WHITE: Rgb555 = Rgb555(0x7fff);

    /// Packs three 5-bit channels, saturating anything above 31.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        let r = r.min(CHANNEL_MAX) as u16;
        let g = g.min(CHANNEL_MAX) as u16;
        let b = b.min(CHANNEL_MAX) as u16;

        Self(r | (g << 5) | (b << 10))
    }

    pub fn red(self) -> u8 {
        (self.0 & RED_MASK) as u8
    }

    pub fn green(self) -> u8 {
        ((self.0 & GREEN_MASK) >> 5) as u8
    }

    pub fn blue(self) -> u8 {
        ((self.0 & BLUE_MASK) >> 10) as u8
    }

    /// Channel intensities from 0 to 31.
    pub fn channels(self) -> (u8, u8, u8) {
        (self.red(), self.green(), self.blue())
    }

    /// Shrinks an 8-bit color to 5 bits per channel. Alpha is dropped.
    pub fn from_rgba(color: Rgba<u8>) -> Self {
        let [r, g, b, _] = color.0;
        let shrink = |c: u8| normalize(c as u64, 8, 5) as u8;

        Self::new(shrink(r), shrink(g), shrink(b))
    }

    /// 8-bit color, always opaque.
    pub fn to_rgba(self) -> Rgba<u8> {
        rgba(&self)
    }

    /// Moves every channel toward white; `intensity` 0 is a no-op, 16 and above is white.
    pub fn brighten(self, intensity: u32) -> Self {
        let intensity = intensity as u64;
        let lift = |mask: u16| {
            let mask = mask as u64;
            let a = self.0 as u64 & mask;
            (a + ((mask - a) * intensity) / 16).min(mask) & mask
        };

        Self((lift(RED_MASK) | lift(GREEN_MASK) | lift(BLUE_MASK)) as u16)
    }

    /// Moves every channel toward black; `intensity` 0 is a no-op, 16 and above is black.
    pub fn darken(self, intensity: u32) -> Self {
        let intensity = intensity as u64;
        let lower = |mask: u16| {
            let mask = mask as u64;
            let a = self.0 as u64 & mask;
            a.saturating_sub((a * intensity) / 16) & mask
        };

        Self((lower(RED_MASK) | lower(GREEN_MASK) | lower(BLUE_MASK)) as u16)
    }

    /// Places the channels in a 5-6-5 layout. Green is shifted, not rescaled,
    /// so the low green bit is always clear.
    pub fn to_rgb565(self) -> u16 {
        let (r, g, b) = self.channels();
        ((r as u16) << 11) | ((g as u16) << 6) | b as u16
    }
}

/// Blends two colors channel by channel.
///
/// Weights are meant to lie in `0.0..=1.0` but are not checked. Each channel
/// is clamped at 31; a negative sum truncates to 0.
pub fn mix(a_weight: f64, a: Rgb555, b_weight: f64, b: Rgb555) -> Rgb555 {
    let blend = |x: u8, y: u8| {
        let value = a_weight * x as f64 + b_weight * y as f64;
        value.min(CHANNEL_MAX as f64) as u16
    };

    let r = blend(a.red(), b.red());
    let g = blend(a.green(), b.green());
    let bl = blend(a.blue(), b.blue());

    Rgb555(r | (g << 5) | (bl << 10))
}

impl Color for Rgb555 {
    const ID: ColorId = ColorId::Rgb555;

    fn rgba32(&self) -> [u32; 4] {
        let expand = |c: u8| normalize(c as u64, 5, 32) as u32;
        let (r, g, b) = self.channels();

        [expand(r), expand(g), expand(b), u32::MAX]
    }
}

impl fmt::Display for Rgb555 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Rgba([r, g, b, _]) = self.to_rgba();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl PartialEq for Rgb555 {
    fn eq(&self, other: &Self) -> bool {
        self.0 & COLOR_MASK == other.0 & COLOR_MASK
    }
}

impl Eq for Rgb555 {}

impl Hash for Rgb555 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0 & COLOR_MASK).hash(state);
    }
}

impl From<u16> for Rgb555 {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Rgb555> for u16 {
    fn from(value: Rgb555) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_colors() -> impl Iterator<Item = Rgb555> {
        (0..=u16::MAX).map(Rgb555)
    }

    #[test]
    fn extracts_channels_by_mask() {
        let color = Rgb555(0b1_10101_01010_00111);
        assert_eq!(color.channels(), (0b00111, 0b01010, 0b10101));
    }

    #[test]
    fn new_saturates_channels() {
        assert_eq!(Rgb555::new(40, 200, 31), Rgb555::WHITE);
        assert_eq!(Rgb555::new(31, 0, 0), Rgb555(0x001f));
    }

    #[test]
    fn display_strings() {
        assert_eq!(Rgb555(0x7fff).to_string(), "#FFFFFF");
        assert_eq!(Rgb555(0x0000).to_string(), "#000000");
        assert_eq!(Rgb555(0x001f).to_string(), "#FF0000");
        assert_eq!(Rgb555(0x03e0).to_string(), "#00FF00");
        assert_eq!(Rgb555(0x7c00).to_string(), "#0000FF");
        assert_eq!(Rgb555::new(16, 1, 0).to_string(), "#840800");
    }

    #[test]
    fn unused_bit_is_ignored() {
        assert_eq!(Rgb555(0x801f).to_string(), "#FF0000");
        assert_eq!(Rgb555(0x8000).channels(), (0, 0, 0));
        assert_eq!(Rgb555(0x9234), Rgb555(0x1234));
        assert_ne!(Rgb555(0x9234), Rgb555(0x1235));

        let set: HashSet<Rgb555> = [Rgb555(0x8000), Rgb555::BLACK].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn transforms_keep_equality_with_unused_bit_set() {
        let color = Rgb555(0x9234);
        assert_eq!(color.brighten(0), color);
        assert_eq!(color.darken(0), color);
        assert_eq!(mix(1.0, color, 0.0, Rgb555::BLACK), color);
        assert_eq!(u16::from(color.brighten(0)), 0x1234);
    }

    #[test]
    fn display_is_always_six_uppercase_hex_digits() {
        for color in (0..=u16::MAX).map(Rgb555) {
            let s = color.to_string();
            assert_eq!(s.len(), 7);
            assert!(s.starts_with('#'));
            assert!(s[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn to_rgba_agrees_with_direct_normalization() {
        for c in 0..=CHANNEL_MAX {
            let expected = normalize(c as u64, 5, 8) as u8;
            let color = Rgb555::new(c, c, c);
            assert_eq!(color.to_rgba(), Rgba([expected, expected, expected, 255]));
        }
    }

    #[test]
    fn rgba32_is_full_range() {
        assert_eq!(Rgb555::WHITE.rgba32(), [u32::MAX; 4]);
        assert_eq!(Rgb555::BLACK.rgba32(), [0, 0, 0, u32::MAX]);
        assert_eq!(Rgb555::ID, ColorId::Rgb555);
    }

    #[test]
    fn from_rgba_truncates_to_five_bits() {
        assert_eq!(
            Rgb555::from_rgba(Rgba([255, 128, 7, 0])),
            Rgb555::new(31, 16, 0)
        );
        for color in all_colors() {
            assert_eq!(Rgb555::from_rgba(color.to_rgba()), color);
        }
    }

    #[test]
    fn brighten_bounds() {
        for color in all_colors() {
            assert_eq!(color.brighten(0), color);
            assert_eq!(color.brighten(16), Rgb555::WHITE);
        }
    }

    #[test]
    fn darken_bounds() {
        for color in all_colors() {
            assert_eq!(color.darken(0), color);
            assert_eq!(color.darken(16), Rgb555::BLACK);
        }
    }

    #[test]
    fn brighten_halfway() {
        assert_eq!(Rgb555::BLACK.brighten(8), Rgb555::new(15, 15, 15));
        assert_eq!(Rgb555::new(1, 0, 0).brighten(8), Rgb555::new(16, 15, 15));
    }

    #[test]
    fn darken_rounds_within_the_raw_field() {
        // red divides the bare 5-bit value, green and blue divide the shifted one
        assert_eq!(Rgb555::WHITE.darken(8), Rgb555::new(16, 15, 15));
        assert_eq!(Rgb555::new(1, 1, 1).darken(1), Rgb555::new(1, 0, 0));
    }

    #[test]
    fn out_of_range_intensity_saturates() {
        assert_eq!(Rgb555::BLACK.brighten(32), Rgb555::WHITE);
        assert_eq!(Rgb555::new(3, 9, 27).brighten(u32::MAX), Rgb555::WHITE);
        assert_eq!(Rgb555::WHITE.darken(17), Rgb555::BLACK);
        assert_eq!(Rgb555::WHITE.darken(20), Rgb555::BLACK);
        assert_eq!(Rgb555::WHITE.darken(u32::MAX), Rgb555::BLACK);
    }

    #[test]
    fn in_range_intensity_never_leaves_the_channel_range() {
        for color in all_colors().step_by(13) {
            for intensity in 0..=16 {
                let (r, g, b) = color.channels();
                let (br, bg, bb) = color.brighten(intensity).channels();
                assert!(br >= r && bg >= g && bb >= b);
                let (dr, dg, db) = color.darken(intensity).channels();
                assert!(dr <= r && dg <= g && db <= b);
            }
        }
    }

    #[test]
    fn mix_selects_at_extremes() {
        for a in all_colors().step_by(389) {
            for b in all_colors().step_by(97) {
                assert_eq!(mix(1.0, a, 0.0, b), a);
                assert_eq!(mix(0.0, a, 1.0, b), b);
            }
        }
    }

    #[test]
    fn mix_clamps_above() {
        let a = Rgb555::new(31, 20, 0);
        let mixed = mix(2.0, a, 0.0, Rgb555::WHITE);
        assert_eq!(mixed.channels(), (31, 31, 0));
        assert_eq!(mix(1.0, Rgb555::WHITE, 1.0, Rgb555::WHITE), Rgb555::WHITE);
    }

    #[test]
    fn mix_truncates() {
        assert_eq!(
            mix(0.5, Rgb555::WHITE, 0.5, Rgb555::BLACK),
            Rgb555::new(15, 15, 15)
        );
        assert_eq!(mix(-1.0, Rgb555::WHITE, 0.0, Rgb555::BLACK), Rgb555::BLACK);
    }

    #[test]
    fn rgb565_places_channels_without_rescaling() {
        assert_eq!(Rgb555::WHITE.to_rgb565(), 0xffdf);
        assert_eq!(Rgb555::new(0, 1, 0).to_rgb565(), 0x0040);
        assert_eq!(Rgb555::new(31, 0, 0).to_rgb565(), 0xf800);
        assert_eq!(Rgb555::new(0, 0, 31).to_rgb565(), 0x001f);
    }
}
