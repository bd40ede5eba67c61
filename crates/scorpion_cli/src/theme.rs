//! Theme commands on the file-backed store

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use scorpion_core::MemoryDocument;
use scorpion_theme::{ThemeName, ThemeStore};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::file_store::FileStore;

/// What `scorpion theme` prints
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeReport {
    pub theme: ThemeName,
    pub retro_dark: bool,
    pub dark_mode_active: bool,
    pub schema_version: String,
}

impl ThemeReport {
    pub fn of(store: &ThemeStore) -> Self {
        let state = store.get();
        Self {
            theme: state.theme_name,
            retro_dark: state.retro_dark,
            dark_mode_active: state.dark_mode_active(),
            schema_version: store.schema_version().to_string(),
        }
    }
}

/// Load the theme store persisted at `storage_path`.
///
/// Loading runs the usual migration, so a stale file is reset on first use.
pub fn open_store(config: &SiteConfig, storage_path: &Path) -> Result<ThemeStore> {
    let storage = FileStore::open(storage_path)
        .with_context(|| format!("Failed to open storage {}", storage_path.display()))?;
    Ok(ThemeStore::load(
        Rc::new(storage),
        Rc::new(MemoryDocument::new()),
        config.theme.clone(),
    ))
}

/// How `scorpion theme dark` changes the flag
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DarkAction {
    On,
    Off,
    Toggle,
}

impl DarkAction {
    pub fn apply(self, store: &ThemeStore) {
        match self {
            DarkAction::On => store.set_retro_dark(true),
            DarkAction::Off => store.set_retro_dark(false),
            DarkAction::Toggle => store.toggle_retro_dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn temp_storage(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("scorpion-theme-cmd-{}-{name}", std::process::id()))
            .join("storage.json")
    }

    #[test]
    fn test_commands_persist_between_runs() {
        let path = temp_storage("persist");
        let config = SiteConfig::default();

        let store = open_store(&config, &path).unwrap();
        assert_eq!(store.theme(), ThemeName::Retro);
        store.set_theme(ThemeName::Modern);
        DarkAction::Toggle.apply(&store);
        drop(store);

        let store = open_store(&config, &path).unwrap();
        assert_eq!(
            ThemeReport::of(&store),
            ThemeReport {
                theme: ThemeName::Modern,
                retro_dark: true,
                dark_mode_active: false,
                schema_version: "2".to_string(),
            }
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
