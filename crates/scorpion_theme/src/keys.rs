//! Storage keys and document marker names
//!
//! These names are the integration point with the stylesheet and with
//! previously persisted state. Do not rename them.

/// Storage key holding `"modern"` or `"retro"`
pub const THEME_NAME_KEY: &str = "theme-name";

/// Storage key holding `"true"` or `"false"`
pub const RETRO_DARK_KEY: &str = "theme-retro-dark";

/// Storage key holding the schema version the persisted values were written with
pub const SCHEMA_VERSION_KEY: &str = "theme-schema-version";

/// Root attribute set to the active theme name
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Root class present while the retro theme is active
pub const RETRO_CLASS: &str = "theme-retro";

/// Root attribute present only in retro + dark
pub const RETRO_DARK_ATTRIBUTE: &str = "data-retro-dark";
