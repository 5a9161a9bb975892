//! Drinkdeck - a promotional drink carousel for the terminal
//!
//! This library provides the motion model (scroll-driven card transforms,
//! snap scrolling, entrance animations), the product catalog, the bundled
//! assets and the terminal UI that ties them together.

pub mod assets;
pub mod catalog;
pub mod motion;
pub mod ui;
