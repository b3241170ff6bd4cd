use serde::{Deserialize, Serialize};

/// RGBA color assigned to a task, category, note or attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel, 255 is opaque.
    pub alpha: u8,
}

impl Color {
    /// Opaque color from its RGB channels.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }
}

/// Stroke weight of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Thin strokes.
    Light,
    /// Regular strokes.
    #[default]
    Normal,
    /// Heavy strokes.
    Bold,
}

impl FontWeight {
    /// Keyword used in font descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Slant of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Cursive italic glyphs.
    Italic,
    /// Mechanically slanted glyphs.
    Slant,
}

impl FontStyle {
    /// Keyword used in font descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Slant => "slant",
        }
    }
}

/// Toolkit-independent font description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    /// Face name, may contain spaces and non-ASCII characters.
    pub face: String,
    /// Size in points.
    pub point_size: u16,
    /// Stroke weight.
    #[serde(default)]
    pub weight: FontWeight,
    /// Slant.
    #[serde(default)]
    pub style: FontStyle,
    /// Whether glyphs are underlined.
    #[serde(default)]
    pub underlined: bool,
}

impl Font {
    /// Regular font of the given face and size.
    #[must_use]
    pub fn new(face: impl Into<String>, point_size: u16) -> Self {
        Self {
            face: face.into(),
            point_size,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            underlined: false,
        }
    }
}
