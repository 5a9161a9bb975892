//! # Motion Module
//!
//! Everything that moves on the promo screen.
//!
//! ## Components
//!
//! - [`signal`] - Lock-free scroll-position signal (one writer, many readers)
//! - [`card`] - Per-card transform derived from the scroll position
//! - [`index`] - Active-card derivation
//! - [`snap`] - Drag, momentum and snap-to-card physics
//! - [`driver`] - The motion thread that owns the physics
//! - [`entrance`] - One-shot entrance animations
//! - [`interpolate`] / [`easing`] - The math underneath

pub mod card;
pub mod driver;
pub mod easing;
pub mod entrance;
pub mod index;
pub mod interpolate;
pub mod signal;
pub mod snap;

pub use card::{card_transform, CardTransform};
pub use driver::{Gesture, MotionDriver, MotionThread};
pub use entrance::{EntranceTarget, MountedEntrances, Reveal, SCREEN_ENTRANCES};
pub use index::active_index;
pub use signal::{ScrollReader, ScrollWriter};
