use std::fmt;

use image::Rgba;

/// Identifies a packed color encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorId {
    #[default]
    Invalid,
    Rgb555,
}

impl ColorId {
    pub fn name(&self) -> &'static str {
        match self {
            ColorId::Invalid => "invalid",
            ColorId::Rgb555 => "rgb555",
        }
    }
}

impl From<&str> for ColorId {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case(ColorId::Rgb555.name()) {
            ColorId::Rgb555
        } else {
            ColorId::Invalid
        }
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A packed color that can be expanded to full range.
///
/// `Display` renders the color as `#RRGGBB`.
pub trait Color: fmt::Display {
    const ID: ColorId;

    /// Channels scaled to the full 32-bit range, in `[r, g, b, a]` order.
    fn rgba32(&self) -> [u32; 4];
}

/// Truncates the 32-bit channels of `color` to their top byte.
pub fn rgba<C: Color>(color: &C) -> Rgba<u8> {
    let [r, g, b, a] = color.rgba32();
    Rgba([
        (r >> 24) as u8,
        (g >> 24) as u8,
        (b >> 24) as u8,
        (a >> 24) as u8,
    ])
}
