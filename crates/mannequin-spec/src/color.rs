//! RGB colors and the fixed skin palette.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;

/// An 8-bit sRGB color.
///
/// Serializes as a `#RRGGBB` hex string, which is also the format used by the
/// persistence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);

    /// Creates a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Returns the packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns normalized sRGB components in [0, 1].
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Builds a color from normalized components, clamping each to [0, 1].
    pub fn from_unit(rgb: [f32; 3]) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(rgb[0]), q(rgb[1]), q(rgb[2]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Parses `#RRGGBB`, `RRGGBB` or `0xRRGGBB` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError {
                input: s.to_string(),
            });
        }

        let packed = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError {
            input: s.to_string(),
        })?;
        Ok(Rgb::from_hex(packed))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The five skin tones offered by the customizer UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinTone {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl SkinTone {
    /// All palette entries in UI order.
    pub const ALL: [SkinTone; 5] = [
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    /// Returns the palette color for this tone.
    pub fn color(self) -> Rgb {
        match self {
            SkinTone::Light => Rgb::from_hex(0xFDBCB4),
            SkinTone::MediumLight => Rgb::from_hex(0xE8A87C),
            SkinTone::Medium => Rgb::from_hex(0xD08B5B),
            SkinTone::MediumDark => Rgb::from_hex(0xAE5D29),
            SkinTone::Dark => Rgb::from_hex(0x8B4513),
        }
    }

    /// Returns the display label used by the UI.
    pub fn label(self) -> &'static str {
        match self {
            SkinTone::Light => "Light",
            SkinTone::MediumLight => "Medium Light",
            SkinTone::Medium => "Medium",
            SkinTone::MediumDark => "Medium Dark",
            SkinTone::Dark => "Dark",
        }
    }

    /// Looks up the tone whose palette color is exactly `color`.
    pub fn from_color(color: Rgb) -> Option<SkinTone> {
        Self::ALL.into_iter().find(|tone| tone.color() == color)
    }

    /// Returns the palette tone closest to `color` (squared RGB distance).
    ///
    /// Ties resolve to the earlier palette entry.
    pub fn nearest(color: Rgb) -> SkinTone {
        let dist = |tone: SkinTone| {
            let c = tone.color();
            let dr = c.r as i32 - color.r as i32;
            let dg = c.g as i32 - color.g as i32;
            let db = c.b as i32 - color.b as i32;
            dr * dr + dg * dg + db * db
        };
        let mut best = SkinTone::Light;
        for tone in Self::ALL {
            if dist(tone) < dist(best) {
                best = tone;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_display() {
        let c = Rgb::from_hex(0x4A3728);
        assert_eq!(c.to_string(), "#4A3728");
        assert_eq!(c.to_hex(), 0x4A3728);
    }

    #[test]
    fn test_parse_variants() {
        let expected = Rgb::new(0xFD, 0xBC, 0xB4);
        assert_eq!("#FDBCB4".parse::<Rgb>().unwrap(), expected);
        assert_eq!("fdbcb4".parse::<Rgb>().unwrap(), expected);
        assert_eq!("0xFDBCB4".parse::<Rgb>().unwrap(), expected);
        assert!("#FDBCB".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::from_hex(0x8B4513)).unwrap();
        assert_eq!(json, "\"#8B4513\"");
        let parsed: Rgb = serde_json::from_str("\"#e8a87c\"").unwrap();
        assert_eq!(parsed, SkinTone::MediumLight.color());
    }

    #[test]
    fn test_palette_lookup() {
        for tone in SkinTone::ALL {
            assert_eq!(SkinTone::from_color(tone.color()), Some(tone));
            assert_eq!(SkinTone::nearest(tone.color()), tone);
        }
        assert_eq!(SkinTone::from_color(Rgb::from_hex(0x123456)), None);
        assert_eq!(SkinTone::nearest(Rgb::from_hex(0x8A4412)), SkinTone::Dark);
    }
}
