//! # Theme System
//!
//! Provides the color palettes of the promo screen.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines all colors used throughout the UI. Rendering
//! code references theme fields instead of hardcoding `ratatui::style::Color`
//! values. The active theme is chosen by name in the config file.
//!
//! Opacity has no direct terminal equivalent, so [`Theme::fade`] blends a
//! color towards the backdrop instead.
//!
//! ## Built-in Themes
//!
//! - **Siren** (default) - the brand green backdrop with a white card
//! - **Reserve** - near-black backdrop with copper accents

use ratatui::style::Color;

/// All colors used by the promo screen, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, matched case-insensitively from the config.
    pub name: &'static str,

    // -- Backdrop --
    /// Screen background behind the carousel.
    pub backdrop: Color,
    /// Pattern drawn over the backdrop.
    pub pattern: Color,

    // -- Details card --
    /// Card surface.
    pub card_bg: Color,
    /// Card outline.
    pub card_border: Color,
    /// Primary text on the card (price, name).
    pub text: Color,
    /// Secondary text on the card (description).
    pub text_muted: Color,
    /// Outline of the size pill.
    pub pill_border: Color,
    /// Text inside the size pill.
    pub pill_text: Color,

    // -- Call to action --
    pub button_bg: Color,
    pub button_text: Color,
    /// Button background while pressed.
    pub button_pressed: Color,

    // -- Carousel --
    /// Drink artwork.
    pub art: Color,
    /// Splash and logo accent.
    pub accent: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Siren).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Blend `color` over the backdrop at `opacity` (0 = invisible, 1 = solid).
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        blend(color, self.backdrop, opacity)
    }
}

/// Linear blend of two RGB colors. Non-RGB colors snap to whichever side
/// dominates.
pub fn blend(fg: Color, bg: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| -> u8 {
                (f64::from(b) + (f64::from(f) - f64::from(b)) * opacity).round() as u8
            };
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 2] = [
    // 0 - Siren (default)
    Theme {
        name: "Siren",
        backdrop: Color::Rgb(0, 117, 74),        // primary #00754A
        pattern: Color::Rgb(6, 118, 80),         // secondary #067650
        card_bg: Color::Rgb(255, 255, 255),      // white
        card_border: Color::Rgb(169, 169, 169),  // darkGray
        text: Color::Rgb(0, 0, 0),               // black
        text_muted: Color::Rgb(128, 128, 128),   // gray
        pill_border: Color::Rgb(211, 211, 211),  // lightGray
        pill_text: Color::Rgb(169, 169, 169),    // darkGray
        button_bg: Color::Rgb(0, 0, 0),          // black
        button_text: Color::Rgb(255, 255, 255),  // white
        button_pressed: Color::Rgb(64, 64, 64),
        art: Color::Rgb(255, 255, 255),
        accent: Color::Rgb(255, 255, 255),
    },
    // 1 - Reserve
    Theme {
        name: "Reserve",
        backdrop: Color::Rgb(20, 20, 20),
        pattern: Color::Rgb(45, 40, 36),
        card_bg: Color::Rgb(245, 240, 230),
        card_border: Color::Rgb(165, 42, 42),    // brown
        text: Color::Rgb(20, 20, 20),
        text_muted: Color::Rgb(110, 100, 90),
        pill_border: Color::Rgb(205, 170, 125),
        pill_text: Color::Rgb(140, 110, 80),
        button_bg: Color::Rgb(165, 42, 42),
        button_text: Color::Rgb(255, 255, 255),
        button_pressed: Color::Rgb(120, 30, 30),
        art: Color::Rgb(255, 165, 0),            // orange
        accent: Color::Rgb(205, 170, 125),
    },
];
