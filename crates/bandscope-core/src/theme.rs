//! Colour themes for render surfaces.

use ecolor::Color32;
use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Named bar colours offered to the user
pub const BAR_PRESETS: [(&str, &str); 7] = [
    ("Aura Blue", "#40C4FF"),
    ("Emerald", "#00E676"),
    ("Sunset Orange", "#FF9800"),
    ("Fire Red", "#FF1744"),
    ("Midnight Purple", "#7C4DFF"),
    ("Pink", "#FF69B4"),
    ("Cyan", "#00BCD4"),
];

/// Background used when none is given
pub const DEFAULT_BACKGROUND: Color32 = Color32::from_rgb(0x2A, 0x2A, 0x2A);

/// Alpha of theme-coloured bars
const BAR_ALPHA: u8 = 230;
/// Per-channel lift of the cap colour over the primary
const CAP_LIFT: u8 = 30;

/// Primary and background colour pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    /// Accent colour used for bars and fills
    #[serde(with = "hex_color")]
    pub primary: Color32,
    /// Surface clear colour
    #[serde(with = "hex_color")]
    pub background: Color32,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(0x40, 0xC4, 0xFF),
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl ColorTheme {
    /// Build from `#RRGGBB` strings
    pub fn from_hex(primary: &str, background: &str) -> Result<Self> {
        Ok(Self {
            primary: parse_hex(primary)?,
            background: parse_hex(background)?,
        })
    }

    /// Theme for a named preset on the default background
    pub fn preset(name: &str) -> Option<Self> {
        BAR_PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .and_then(|(_, hex)| Color32::from_hex(hex).ok())
            .map(|primary| Self {
                primary,
                background: DEFAULT_BACKGROUND,
            })
    }

    /// Bar fill colour: primary at alpha 230
    pub fn bar_color(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.primary.r(),
            self.primary.g(),
            self.primary.b(),
            BAR_ALPHA,
        )
    }

    /// Peak-cap colour: primary lifted by 30 per channel, opaque
    pub fn cap_color(&self) -> Color32 {
        Color32::from_rgb(
            self.primary.r().saturating_add(CAP_LIFT),
            self.primary.g().saturating_add(CAP_LIFT),
            self.primary.b().saturating_add(CAP_LIFT),
        )
    }

    /// Primary colour with a different alpha
    pub fn primary_with_alpha(&self, alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.primary.r(),
            self.primary.g(),
            self.primary.b(),
            alpha,
        )
    }
}

fn parse_hex(hex: &str) -> Result<Color32> {
    Color32::from_hex(hex)
        .map_err(|e| CoreError::InvalidConfig(format!("bad colour '{}': {:?}", hex, e)))
}

mod hex_color {
    use ecolor::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!(
            "#{:02X}{:02X}{:02X}",
            color.r(),
            color.g(),
            color.b()
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color32::from_hex(&hex)
            .map_err(|e| serde::de::Error::custom(format!("bad colour '{}': {:?}", hex, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_and_cap_colors() {
        let theme = ColorTheme::default();
        assert_eq!(theme.bar_color().a(), 230);
        assert_eq!(
            theme.cap_color(),
            Color32::from_rgb(0x40 + 30, 0xC4 + 30, 0xFF)
        );
    }

    #[test]
    fn test_presets_resolve() {
        for (name, _) in BAR_PRESETS {
            assert!(ColorTheme::preset(name).is_some(), "{name}");
        }
        let red = ColorTheme::preset("fire red").unwrap();
        assert_eq!(red.primary, Color32::from_rgb(0xFF, 0x17, 0x44));
        assert_eq!(red.background, DEFAULT_BACKGROUND);
        assert!(ColorTheme::preset("Mauve").is_none());
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(ColorTheme::from_hex("#00E676", "#2A2A2A").is_ok());
        assert!(ColorTheme::from_hex("green", "#2A2A2A").is_err());
    }

    #[test]
    fn test_serializes_as_hex() {
        let json = serde_json::to_string(&ColorTheme::default()).unwrap();
        assert_eq!(json, r##"{"primary":"#40C4FF","background":"#2A2A2A"}"##);
        let back: ColorTheme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ColorTheme::default());
    }
}
