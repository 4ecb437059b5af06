//! Packed 24-bit RGB color used for stroke ink.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 24-bit `0xRRGGBB` color. Bits above the low 24 are always zero.
///
/// Serializes as a lowercase `#rrggbb` string and deserializes from either that
/// form (or the short `#rgb` form) or a packed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RgbRepr", into = "String")]
pub struct Rgb(u32);

impl Rgb {
    pub const BLACK: Self = Self(0x0000_0000);
    pub const WHITE: Self = Self(0x00FF_FFFF);

    /// Wrap a packed value, discarding anything above 24 bits.
    #[must_use]
    pub const fn new(packed: u32) -> Self {
        Self(packed & 0x00FF_FFFF)
    }

    #[must_use]
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed `0xRRGGBB` value.
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Parse `#RGB` or `#RRGGBB` (surrounding whitespace allowed).
    #[must_use]
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        let repeat = match hex.len() {
            3 => 2,
            6 => 1,
            _ => return None,
        };
        hex.chars()
            .flat_map(|c| std::iter::repeat_n(c, repeat))
            .try_fold(0_u32, |packed, c| Some((packed << 4) | c.to_digit(16)?))
            .map(Self::new)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl From<u32> for Rgb {
    fn from(packed: u32) -> Self {
        Self::new(packed)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Packed(u32),
    Hex(String),
}

impl TryFrom<RgbRepr> for Rgb {
    type Error = String;

    fn try_from(repr: RgbRepr) -> Result<Self, Self::Error> {
        match repr {
            RgbRepr::Packed(packed) if packed <= 0x00FF_FFFF => Ok(Self(packed)),
            RgbRepr::Packed(packed) => Err(format!("color {packed:#x} does not fit in 24 bits")),
            RgbRepr::Hex(raw) => Self::parse_hex(&raw).ok_or_else(|| format!("invalid hex color: {raw:?}")),
        }
    }
}
