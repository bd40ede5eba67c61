//! # Scorpion Assets
//!
//! Standalone asset catalog for the documentation site. Page code resolves
//! icons, images and inline pixel shapes through it; the theme and navigation
//! crates do not depend on it.
//!
//! Every catalog is a pure `name → locator` function. Names are forwarded as
//! given; a wrong name produces a locator that fails to load, never an error
//! here.
//!
//! ## Usage
//!
//! ```rust
//! use scorpion_assets::{icons::{IconCategory, IconVariant}, pixel, AssetCatalog, ImageCatalog};
//!
//! let images = ImageCatalog::default();
//! assert_eq!(images.locate("scorpionHero"), "/scorpion-ui/scorpion-hero.png");
//!
//! let path = scorpion_assets::icons::icon_path("Figma", IconCategory::UserApps, IconVariant::Dark);
//! assert_eq!(path, "/Icons/Dark theme/1. User apps/Figma.png");
//!
//! let svg = scorpion_assets::to_svg(pixel::CHEVRON_DOWN, 16.0);
//! assert!(svg.contains("image-rendering"));
//! ```

pub mod icons;
pub mod images;
pub mod pixel;

pub use icons::{IconCatalog, IconCategory, IconVariant};
pub use images::{scorpion_image, ImageCatalog, ScorpionImage, ScorpionVariant};

/// A `name → locator` lookup
pub trait AssetCatalog {
    /// Resolve a name. Unknown names are forwarded, not rejected.
    fn locate(&self, name: &str) -> String;
}

/// Pixel-art viewBox (16x16 grid)
pub const VIEW_BOX: (f32, f32, f32, f32) = (0.0, 0.0, 16.0, 16.0);

/// Generate a complete SVG string from pixel-art shape data
///
/// # Arguments
/// * `shape_data` - The inner SVG content (rects on a 16x16 grid)
/// * `size` - The width and height of the SVG in pixels
pub fn to_svg(shape_data: &str, size: f32) -> String {
    to_svg_colored(shape_data, size, "currentColor")
}

/// Generate SVG with a custom fill (for non-currentColor usage)
pub fn to_svg_colored(shape_data: &str, size: f32, color: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 16 16" style="image-rendering: pixelated"><g fill="{color}">{shape_data}</g></svg>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_svg() {
        let svg = to_svg(pixel::CHEVRON_UP, 16.0);
        assert!(svg.contains("viewBox=\"0 0 16 16\""));
        assert!(svg.contains("width=\"16\""));
        assert!(svg.contains("fill=\"currentColor\""));
    }

    #[test]
    fn test_to_svg_colored() {
        let svg = to_svg_colored(pixel::CHEVRON_DOWN, 24.0, "#ff0000");
        assert!(svg.contains("width=\"24\""));
        assert!(svg.contains("fill=\"#ff0000\""));
    }
}
