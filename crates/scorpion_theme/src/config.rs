//! Theme store configuration

use serde::{Deserialize, Serialize};

/// Schema version written by this release.
///
/// Bump it when the meaning of persisted theme values changes; stores written
/// by other versions are reset to defaults on the next start.
pub const CURRENT_SCHEMA_VERSION: &str = "2";

/// Theme store configuration (`[theme]` in `scorpion.toml`)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Expected schema version of persisted state
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
}

fn default_schema_version() -> String {
    CURRENT_SCHEMA_VERSION.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
        }
    }
}

impl ThemeConfig {
    pub fn with_schema_version(version: impl Into<String>) -> Self {
        Self {
            schema_version: version.into(),
        }
    }
}
