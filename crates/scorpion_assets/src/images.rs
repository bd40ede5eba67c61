//! Site images
//!
//! Paths include the deployment base (`/scorpion-ui/`).

use scorpion_theme::{ThemeName, ThemeState};
use serde::Serialize;

use crate::AssetCatalog;

/// Deployment base path of every image
pub const BASE_PATH: &str = "/scorpion-ui/";

/// Known images by key
pub static IMAGES: &[(&str, &str)] = &[
    ("avatar8bit", "/scorpion-ui/avatar_8bit.png"),
    ("avatarProfile2", "/scorpion-ui/avatar-profile-2.png"),
    ("scorpionHero", "/scorpion-ui/scorpion-hero.png"),
    ("scorpionBlack", "/scorpion-ui/scorpion-black.png"),
    ("scorpionWhite", "/scorpion-ui/scorpion-white.png"),
    ("scorpionNeutral", "/scorpion-ui/scorpion-neutral.png"),
    ("landscape1", "/scorpion-ui/landscape-1.png"),
    ("landscape2", "/scorpion-ui/landscape-2.png"),
    ("landscape4", "/scorpion-ui/landscape-4.png"),
    ("landscape5", "/scorpion-ui/landscape-5.png"),
    ("landscape6", "/scorpion-ui/landscape-6.png"),
];

/// Image lookup. Unknown keys resolve under `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCatalog {
    pub base: String,
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self {
            base: BASE_PATH.to_string(),
        }
    }
}

impl ImageCatalog {
    /// Known image path for `key`
    pub fn get(key: &str) -> Option<&'static str> {
        IMAGES.iter().find(|(k, _)| *k == key).map(|(_, path)| *path)
    }
}

impl AssetCatalog for ImageCatalog {
    fn locate(&self, name: &str) -> String {
        match Self::get(name) {
            Some(path) => path.to_string(),
            None => format!("{}{}", self.base, name),
        }
    }
}

/// Where the scorpion mark is shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorpionVariant {
    /// On the hero background (inverted contrast)
    #[default]
    Hero,
    /// In the app header (normal contrast)
    Header,
}

/// Image and CSS filter for the scorpion mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScorpionImage {
    pub src: &'static str,
    pub filter: &'static str,
}

const WHITE: &str = "brightness(0) saturate(100%) invert(100%)";
const NEUTRAL_900: &str = "brightness(0) saturate(100%) invert(14%) sepia(7%) saturate(897%) hue-rotate(179deg) brightness(92%) contrast(91%)";

/// Pick the scorpion mark for the active theme
pub fn scorpion_image(theme: &ThemeState, variant: ScorpionVariant) -> ScorpionImage {
    let image = |key: &str, filter: &'static str| ScorpionImage {
        src: ImageCatalog::get(key).unwrap_or(BASE_PATH),
        filter,
    };

    match (variant, theme.theme_name, theme.retro_dark) {
        (ScorpionVariant::Header, ThemeName::Modern, _) => image("scorpionBlack", "none"),
        (ScorpionVariant::Header, ThemeName::Retro, true) => image("scorpionWhite", WHITE),
        (ScorpionVariant::Header, ThemeName::Retro, false) => image("scorpionBlack", "none"),
        (ScorpionVariant::Hero, ThemeName::Modern, _) => image("scorpionBlack", "invert(1)"),
        (ScorpionVariant::Hero, ThemeName::Retro, true) => image("scorpionNeutral", NEUTRAL_900),
        (ScorpionVariant::Hero, ThemeName::Retro, false) => image("scorpionWhite", WHITE),
    }
}
