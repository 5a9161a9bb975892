//! # Bundled Assets
//!
//! All artwork and typefaces are embedded at build time; nothing is fetched
//! at runtime.
//!
//! | Kind       | Count | Source                          |
//! |------------|-------|---------------------------------|
//! | background | 1     | `assets/images/background.txt`  |
//! | logo       | 1     | `assets/images/logo.txt`        |
//! | products   | 3     | `assets/images/coffee{1,2,3}.txt` |
//! | typefaces  | 5     | `assets/fonts/SoDoSans-*.json`  |
//!
//! The typeface set is parsed off the UI thread at startup. Until it is
//! ready the screen shows only the splash placeholder (see [`Splash`]).

pub mod art;
pub mod fonts;

pub use art::AsciiArt;
pub use fonts::{typography, FontFamily, FontSet, TextStyle};

use fonts::FontFace;
use std::sync::OnceLock;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid typeface descriptor {family}: {source}")]
    InvalidFont {
        family: &'static str,
        source: serde_json::Error,
    },
    #[error("typeface descriptor declares {found}, expected {expected}")]
    FamilyMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("typeface loader stopped before finishing")]
    Interrupted,
}

const BACKGROUND: &str = include_str!("../../assets/images/background.txt");
const LOGO: &str = include_str!("../../assets/images/logo.txt");

/// Product images by key.
const PRODUCT_IMAGES: [(&str, &str); 3] = [
    ("coffee1", include_str!("../../assets/images/coffee1.txt")),
    ("coffee2", include_str!("../../assets/images/coffee2.txt")),
    ("coffee3", include_str!("../../assets/images/coffee3.txt")),
];

/// Typeface descriptors, one per weight.
const TYPEFACES: [(FontFamily, &str); 5] = [
    (
        FontFamily::Thin,
        include_str!("../../assets/fonts/SoDoSans-Thin.json"),
    ),
    (
        FontFamily::Light,
        include_str!("../../assets/fonts/SoDoSans-Light.json"),
    ),
    (
        FontFamily::Regular,
        include_str!("../../assets/fonts/SoDoSans-Regular.json"),
    ),
    (
        FontFamily::SemiBold,
        include_str!("../../assets/fonts/SoDoSans-SemiBold.json"),
    ),
    (
        FontFamily::Bold,
        include_str!("../../assets/fonts/SoDoSans-Bold.json"),
    ),
];

/// Shown for product keys that have no bundled image.
const PLACEHOLDER: &str = " ____\n|    |\n| ?? |\n|____|\n";

/// Counts of each bundled asset kind, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    pub backgrounds: usize,
    pub logos: usize,
    pub product_images: usize,
    pub typefaces: usize,
}

pub fn manifest() -> Manifest {
    Manifest {
        backgrounds: 1,
        logos: 1,
        product_images: PRODUCT_IMAGES.len(),
        typefaces: TYPEFACES.len(),
    }
}

pub fn background() -> &'static AsciiArt {
    static ART: OnceLock<AsciiArt> = OnceLock::new();
    ART.get_or_init(|| AsciiArt::parse(BACKGROUND))
}

pub fn logo() -> &'static AsciiArt {
    static ART: OnceLock<AsciiArt> = OnceLock::new();
    ART.get_or_init(|| AsciiArt::parse(LOGO))
}

/// Image for a product key, falling back to a placeholder.
pub fn product_art(key: &str) -> &'static AsciiArt {
    static ARTS: OnceLock<Vec<(&'static str, AsciiArt)>> = OnceLock::new();
    static MISSING: OnceLock<AsciiArt> = OnceLock::new();

    let arts = ARTS.get_or_init(|| {
        PRODUCT_IMAGES
            .iter()
            .map(|(k, src)| (*k, AsciiArt::parse(src)))
            .collect()
    });
    arts.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, art)| art)
        .unwrap_or_else(|| MISSING.get_or_init(|| AsciiArt::parse(PLACEHOLDER)))
}

/// Parse every bundled typeface descriptor.
pub fn load_fonts() -> Result<FontSet, AssetError> {
    let mut fonts = FontSet::default();
    for (family, source) in TYPEFACES {
        let face = FontFace::parse(family, source)?;
        log::debug!("Loaded typeface {} (weight {})", face.family, face.weight);
        fonts.insert(family, face);
    }
    Ok(fonts)
}

/// Start loading the typeface set on the blocking pool.
pub fn spawn_font_loader() -> JoinHandle<Result<FontSet, AssetError>> {
    tokio::task::spawn_blocking(load_fonts)
}

/// App lifecycle: fonts not loaded yet, then ready. One way, one time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Loading,
    Ready,
}

/// The startup placeholder. Visible from launch until released, and never again.
#[derive(Debug, Clone, Default)]
pub struct Splash {
    released: bool,
}

impl Splash {
    pub fn is_visible(&self) -> bool {
        !self.released
    }

    /// Hide the splash. Returns `true` only for the call that actually hid it.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        true
    }
}
