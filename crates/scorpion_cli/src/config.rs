//! Site configuration file handling (scorpion.toml)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scorpion_nav::{Breakpoints, HeaderConfig, NavConfig, NavTimings, PerfOptions, ScrollResetOptions};
use scorpion_theme::ThemeConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default config file name
pub const CONFIG_FILE: &str = "scorpion.toml";

/// Top-level site configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub breakpoints: Breakpoints,
    #[serde(default)]
    pub timings: NavTimings,
    #[serde(default)]
    pub scroll: ScrollResetOptions,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub perf: PerfOptions,
}

/// Key-value storage backing the theme commands
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON file holding the persisted keys
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".scorpion/storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file or a directory containing
    /// `scorpion.toml`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write this configuration, refusing to overwrite unless `force`
    pub fn write(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists. Pass --force to overwrite it.",
                path.display()
            );
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Layout configuration for [`AppLayout`](scorpion_nav::AppLayout)
    pub fn nav_config(&self) -> NavConfig {
        NavConfig {
            breakpoints: self.breakpoints,
            timings: self.timings,
            scroll: self.scroll.clone(),
            header: self.header.clone(),
            perf: self.perf,
        }
    }

    /// Storage path, resolved against the config file's directory
    pub fn storage_path(&self, config_path: &Path) -> PathBuf {
        if self.storage.path.is_absolute() {
            return self.storage.path.clone();
        }
        match config_path.parent() {
            Some(dir) => dir.join(&self.storage.path),
            None => self.storage.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scorpion_core::ScrollBehavior;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(SiteConfig::from_toml("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = SiteConfig::from_toml(
            r##"
            [timings]
            show_delay_ms = 500

            [scroll]
            behavior = "smooth"
            container_selector = "#main-content"

            [storage]
            path = "state.json"
            "##,
        )
        .unwrap();

        assert_eq!(config.timings.show_delay_ms, 500);
        assert_eq!(config.timings.fade_out_ms, 300);
        assert_eq!(config.scroll.behavior, ScrollBehavior::Smooth);
        assert!(config.scroll.respect_hash);
        assert_eq!(config.scroll.container_selector.as_deref(), Some("#main-content"));
        assert_eq!(config.storage.path, PathBuf::from("state.json"));
        assert_eq!(config.breakpoints, Breakpoints::DEFAULT);
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut config = SiteConfig::default();
        config.breakpoints.tablet = 1200.0;
        config.theme = ThemeConfig::with_schema_version("3");

        let parsed = SiteConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_storage_path_is_relative_to_config() {
        let config = SiteConfig::default();
        assert_eq!(
            config.storage_path(Path::new("site/scorpion.toml")),
            PathBuf::from("site/.scorpion/storage.json")
        );
    }
}
