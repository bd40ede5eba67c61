use thiserror::Error;

/// Errors from parsing persisted or user-supplied theme values.
///
/// The store never returns these from its mutation API: it logs and falls back
/// to a default instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme `{0}` (expected `modern` or `retro`)")]
    UnknownTheme(String),

    #[error("invalid boolean flag `{0}` (expected `true` or `false`)")]
    InvalidFlag(String),
}
