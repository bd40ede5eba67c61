//! Inline pixel-art shapes on a 16x16 grid
//!
//! Render with [`to_svg`](crate::to_svg).

/// Chevron pointing down (bottom half of a diamond)
pub const CHEVRON_DOWN: &str = concat!(
    r#"<rect x="7" y="7" width="2" height="1"/>"#,
    r#"<rect x="6" y="8" width="4" height="1"/>"#,
    r#"<rect x="5" y="9" width="6" height="1"/>"#,
    r#"<rect x="4" y="10" width="8" height="1"/>"#,
    r#"<rect x="3" y="11" width="10" height="1"/>"#,
);

/// Chevron pointing up (top half of a diamond)
pub const CHEVRON_UP: &str = concat!(
    r#"<rect x="3" y="4" width="10" height="1"/>"#,
    r#"<rect x="4" y="5" width="8" height="1"/>"#,
    r#"<rect x="5" y="6" width="6" height="1"/>"#,
    r#"<rect x="6" y="7" width="4" height="1"/>"#,
    r#"<rect x="7" y="8" width="2" height="1"/>"#,
);

/// Chevron for an expandable section, pointing up when expanded
pub fn group_chevron(expanded: bool) -> &'static str {
    if expanded {
        CHEVRON_UP
    } else {
        CHEVRON_DOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chevrons_are_mirrored() {
        assert_eq!(CHEVRON_DOWN.matches("<rect").count(), 5);
        assert_eq!(CHEVRON_UP.matches("<rect").count(), 5);
        assert_eq!(group_chevron(true), CHEVRON_UP);
        assert_eq!(group_chevron(false), CHEVRON_DOWN);
    }
}
