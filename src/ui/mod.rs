//! # UI Module
//!
//! The terminal side of the promo screen.
//!
//! ## Components
//!
//! - [`App`] - Screen state: lifecycle, active drink, detail pager, entrances
//! - [`mod@render`] - Drawing the splash and the promo screen
//! - [`input`] - Mapping terminal events to actions
//! - [`pager`] - The details card's page scrolling
//! - [`config`] / [`theme`] - User configuration and colour palettes
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  backdrop pattern       logo             │
//! │                                          │
//! │     [ ]        [  drink  ]        [ ]    │
//! │   previous      (active)          next   │
//! │                                          │
//! │  ╭────────────────────────────────────╮  │
//! │  │ $28                       ╭─────╮  │  │
//! │  │                           │420ml│  │  │
//! │  │ Strawberry Cheesecake     ╰─────╯  │  │
//! │  │ A dreamy combination of ...        │  │
//! │  │             [ Get it ]             │  │
//! │  ╰────────────────────────────────────╯  │
//! └──────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod input;
pub mod pager;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
