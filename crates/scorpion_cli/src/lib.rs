//! Scorpion UI command line support
//!
//! Backs the `scorpion` binary: site configuration, a JSON file store for the
//! persisted theme, and headless navigation replay.

pub mod config;
pub mod file_store;
pub mod simulate;
pub mod theme;

pub use config::{SiteConfig, StorageConfig, CONFIG_FILE};
pub use file_store::FileStore;
pub use simulate::{Scenario, Step, StepParseError};
pub use theme::{open_store, DarkAction, ThemeReport};
