//! Router location
//!
//! Navigation happens without page reloads; the current [`Location`] lives in
//! a [`Router`] signal that the layout fans out to its controllers.

use std::fmt;

use scorpion_core::{Signal, Subscription};
use serde::{Deserialize, Serialize};

/// A parsed in-app URL
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Always starts with `/`
    pub path: String,
    /// Query string without the leading `?`
    pub search: Option<String>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parse `path[?search][#hash]`. A missing or relative path is rooted at `/`.
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, non_empty(hash)),
            None => (url, None),
        };
        let (path, search) = match rest.split_once('?') {
            Some((path, search)) => (path, non_empty(search)),
            None => (rest, None),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self { path, search, hash }
    }

    /// Whether the URL carries a non-empty fragment
    pub fn has_hash(&self) -> bool {
        self.hash.is_some()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl Default for Location {
    fn default() -> Self {
        Self::parse("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(search) = &self.search {
            write!(f, "?{search}")?;
        }
        if let Some(hash) = &self.hash {
            write!(f, "#{hash}")?;
        }
        Ok(())
    }
}

/// Current location of one running app
#[derive(Clone, Debug)]
pub struct Router {
    location: Signal<Location>,
}

impl Router {
    pub fn new(initial: Location) -> Self {
        Self {
            location: Signal::new(initial),
        }
    }

    pub fn location(&self) -> Location {
        self.location.get()
    }

    pub fn path(&self) -> String {
        self.location.with(|l| l.path.clone())
    }

    /// Move to `url`. Returns the previous location if anything changed.
    pub fn navigate(&self, url: &str) -> Option<Location> {
        let next = Location::parse(url);
        let previous = self.location.get();
        if previous == next {
            return None;
        }
        self.location.set(next);
        Some(previous)
    }

    pub fn subscribe(&self, f: impl Fn(&Location) + 'static) -> Subscription {
        self.location.subscribe(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let loc = Location::parse("/components/buttons?tab=api#variants");
        assert_eq!(loc.path, "/components/buttons");
        assert_eq!(loc.search.as_deref(), Some("tab=api"));
        assert_eq!(loc.hash.as_deref(), Some("variants"));
        assert_eq!(loc.to_string(), "/components/buttons?tab=api#variants");
    }

    #[test]
    fn test_parse_edge_cases() {
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("components").path, "/components");
        assert!(!Location::parse("/a#").has_hash());
        assert!(Location::parse("#top").has_hash());
        assert_eq!(Location::parse("#top").path, "/");
    }

    #[test]
    fn test_navigate_reports_changes_only() {
        let router = Router::new(Location::parse("/"));
        assert_eq!(router.navigate("/"), None);
        assert_eq!(router.navigate("/components"), Some(Location::parse("/")));
        assert_eq!(router.path(), "/components");
    }
}
