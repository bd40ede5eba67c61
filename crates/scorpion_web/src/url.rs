//! Conversions between browser strings and host values

/// Join `location.pathname`, `search` and `hash` into one router URL.
///
/// Browsers report `search` and `hash` with their leading `?` and `#`, or as
/// empty strings.
pub fn current_url(pathname: &str, search: &str, hash: &str) -> String {
    let path = if pathname.is_empty() { "/" } else { pathname };
    format!("{path}{search}{hash}")
}

/// An inline style value, `None` when unset
pub fn style_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Clamp a delay to what `setTimeout` accepts
pub fn timeout_millis(delay: std::time::Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}
