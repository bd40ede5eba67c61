//! Theme values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// A named visual mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Modern,
    /// Default on first run and after a schema reset
    #[default]
    Retro,
}

impl ThemeName {
    pub const ALL: [ThemeName; 2] = [ThemeName::Modern, ThemeName::Retro];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Modern => "modern",
            ThemeName::Retro => "retro",
        }
    }

    /// The other theme
    pub fn toggle(self) -> Self {
        match self {
            ThemeName::Modern => ThemeName::Retro,
            ThemeName::Retro => ThemeName::Modern,
        }
    }

    pub fn is_retro(&self) -> bool {
        matches!(self, ThemeName::Retro)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modern" => Ok(ThemeName::Modern),
            "retro" => Ok(ThemeName::Retro),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}

/// Current theme selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeState {
    pub theme_name: ThemeName,
    /// Only meaningful while `theme_name` is retro. Kept (but ignored) under
    /// modern so switching back restores it.
    pub retro_dark: bool,
}

impl ThemeState {
    pub fn new(theme_name: ThemeName, retro_dark: bool) -> Self {
        Self {
            theme_name,
            retro_dark,
        }
    }

    /// Whether the dark marker should be present
    pub fn dark_mode_active(&self) -> bool {
        self.theme_name.is_retro() && self.retro_dark
    }
}

/// Parse a persisted boolean flag
pub(crate) fn parse_flag(value: &str) -> Result<bool, ThemeError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ThemeError::InvalidFlag(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_name() {
        assert_eq!("modern".parse::<ThemeName>(), Ok(ThemeName::Modern));
        assert_eq!("retro".parse::<ThemeName>(), Ok(ThemeName::Retro));
        assert_eq!(
            "Retro".parse::<ThemeName>(),
            Err(ThemeError::UnknownTheme("Retro".to_string()))
        );
        assert!("".parse::<ThemeName>().is_err());
    }

    #[test]
    fn test_toggle_is_an_involution() {
        for name in ThemeName::ALL {
            assert_ne!(name.toggle(), name);
            assert_eq!(name.toggle().toggle(), name);
        }
    }

    #[test]
    fn test_dark_mode_only_in_retro() {
        assert!(ThemeState::new(ThemeName::Retro, true).dark_mode_active());
        assert!(!ThemeState::new(ThemeName::Retro, false).dark_mode_active());
        assert!(!ThemeState::new(ThemeName::Modern, true).dark_mode_active());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Ok(true));
        assert_eq!(parse_flag("false"), Ok(false));
        assert!(parse_flag("yes").is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ThemeState::new(ThemeName::Modern, false)).unwrap();
        assert_eq!(json, r#"{"theme_name":"modern","retro_dark":false}"#);
    }
}
