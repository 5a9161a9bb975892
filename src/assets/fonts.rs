//! # Typefaces
//!
//! The screen uses one typeface family in five weights. In the terminal a
//! weight becomes a set of text modifiers; each face ships as a small JSON
//! descriptor:
//!
//! ```json
//! { "family": "SoDoSans-Bold", "weight": 700, "modifiers": ["bold"] }
//! ```

use super::AssetError;
use ratatui::style::Modifier;
use serde::Deserialize;
use std::collections::HashMap;

/// The five weights of the bundled family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Thin,
    Light,
    Regular,
    SemiBold,
    Bold,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Thin,
        FontFamily::Light,
        FontFamily::Regular,
        FontFamily::SemiBold,
        FontFamily::Bold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Thin => "SoDoSans-Thin",
            FontFamily::Light => "SoDoSans-Light",
            FontFamily::Regular => "SoDoSans-Regular",
            FontFamily::SemiBold => "SoDoSans-SemiBold",
            FontFamily::Bold => "SoDoSans-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontModifier {
    Bold,
    Dim,
    Italic,
}

/// A parsed typeface descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontFace {
    pub family: String,
    pub weight: u16,
    #[serde(default)]
    pub modifiers: Vec<FontModifier>,
}

impl FontFace {
    pub fn parse(family: FontFamily, source: &str) -> Result<Self, AssetError> {
        let face: FontFace =
            serde_json::from_str(source).map_err(|e| AssetError::InvalidFont {
                family: family.name(),
                source: e,
            })?;
        if face.family != family.name() {
            return Err(AssetError::FamilyMismatch {
                expected: family.name(),
                found: face.family,
            });
        }
        Ok(face)
    }

    pub fn modifier(&self) -> Modifier {
        self.modifiers
            .iter()
            .fold(Modifier::empty(), |acc, m| match m {
                FontModifier::Bold => acc | Modifier::BOLD,
                FontModifier::Dim => acc | Modifier::DIM,
                FontModifier::Italic => acc | Modifier::ITALIC,
            })
    }
}

/// Every face of the family, loaded and ready to style text.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    faces: HashMap<FontFamily, FontFace>,
}

impl FontSet {
    pub fn insert(&mut self, family: FontFamily, face: FontFace) {
        self.faces.insert(family, face);
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face(&self, family: FontFamily) -> Option<&FontFace> {
        self.faces.get(&family)
    }

    /// Modifiers for a text style. Missing faces render plain, except that
    /// display sizes are always bold.
    pub fn modifier(&self, style: TextStyle) -> Modifier {
        let face = self
            .face(style.family)
            .map_or(Modifier::empty(), FontFace::modifier);
        if style.is_display() {
            face | Modifier::BOLD
        } else {
            face
        }
    }
}

/// A named text style: typeface weight plus nominal point size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub size: u16,
}

impl TextStyle {
    /// Smallest point size drawn as a headline.
    pub const DISPLAY_SIZE: u16 = 24;

    const fn new(family: FontFamily, size: u16) -> Self {
        Self { family, size }
    }

    pub const fn is_display(self) -> bool {
        self.size >= Self::DISPLAY_SIZE
    }
}

/// Typography scale of the screen.
pub mod typography {
    use super::{FontFamily, TextStyle};

    pub const H2: TextStyle = TextStyle::new(FontFamily::Bold, 30);
    pub const H4: TextStyle = TextStyle::new(FontFamily::SemiBold, 20);
    pub const SUBTITLE1: TextStyle = TextStyle::new(FontFamily::SemiBold, 18);
    pub const BODY2: TextStyle = TextStyle::new(FontFamily::Light, 14);
    pub const CAPTION: TextStyle = TextStyle::new(FontFamily::Regular, 12);
}
