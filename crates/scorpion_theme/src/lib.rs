//! Scorpion Theme Store
//!
//! Persisted theme selection for the documentation site.
//!
//! # Overview
//!
//! The theme system provides:
//! - **Theme selection**: `modern` or `retro`, plus a dark flag that only
//!   applies to `retro`
//! - **Persistence**: every change is written to key-value storage and read
//!   back at startup
//! - **Migration**: a schema version tag resets stale persisted state
//! - **Document markers**: root attributes and classes that the stylesheet
//!   targets, written synchronously with every commit
//!
//! # Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use scorpion_core::HeadlessHost;
//! use scorpion_theme::{ThemeConfig, ThemeName, ThemeProvider, ThemeStore, use_app_theme};
//!
//! let host = HeadlessHost::new(1280.0);
//! let store = ThemeStore::load(host.storage.clone(), host.document.clone(), ThemeConfig::default());
//!
//! // Fresh install defaults to retro
//! assert_eq!(store.theme(), ThemeName::Retro);
//!
//! let _provider = ThemeProvider::new(Rc::new(store));
//! use_app_theme().toggle_theme();
//! assert_eq!(use_app_theme().theme(), ThemeName::Modern);
//! assert_eq!(host.document.attribute("data-theme").as_deref(), Some("modern"));
//! ```
//!
//! # Document contract
//!
//! | Marker | Value |
//! |--------|-------|
//! | [`THEME_ATTRIBUTE`] | active theme name |
//! | [`RETRO_CLASS`] | present while the theme is `retro` |
//! | [`RETRO_DARK_ATTRIBUTE`] | `"true"`, only in retro + dark |

pub mod config;
pub mod error;
pub mod keys;
pub mod provider;
pub mod state;
pub mod theme;

pub use config::{ThemeConfig, CURRENT_SCHEMA_VERSION};
pub use error::ThemeError;
pub use keys::{
    RETRO_CLASS, RETRO_DARK_ATTRIBUTE, RETRO_DARK_KEY, SCHEMA_VERSION_KEY, THEME_ATTRIBUTE,
    THEME_NAME_KEY,
};
pub use provider::{try_use_app_theme, use_app_theme, ThemeProvider};
pub use state::ThemeStore;
pub use theme::{ThemeName, ThemeState};
