//! Site routes and sidebar navigation
//!
//! The route table is static: every page of the documentation site, plus the
//! grouped links the sidebar renders.

use serde::Serialize;

/// A page of the site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
}

/// Every routable page. Anything else renders [`NOT_FOUND`].
pub static ROUTES: &[Route] = &[
    Route { path: "/", title: "Home" },
    Route { path: "/components", title: "Components" },
    Route { path: "/components/navigation", title: "Navigation" },
    Route { path: "/components/buttons", title: "Buttons" },
    Route { path: "/components/forms", title: "Forms" },
    Route { path: "/components/cards", title: "Cards" },
    Route { path: "/components/modals", title: "Modals" },
    Route { path: "/components/type", title: "Type" },
    Route { path: "/foundations", title: "Foundations" },
    Route { path: "/foundations/color-base", title: "Base Colors" },
    Route { path: "/foundations/color-semantics", title: "Semantic Colors" },
    Route { path: "/foundations/border-radius", title: "Border Radius" },
];

/// Catch-all page
pub static NOT_FOUND: Route = Route {
    path: "*",
    title: "Not Found",
};

/// Drop a trailing slash (except on the root)
pub fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Resolve a path to its page, falling back to [`NOT_FOUND`]
pub fn resolve(path: &str) -> &'static Route {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .unwrap_or(&NOT_FOUND)
}

/// Whether `path` is `prefix` or lies below it, on segment boundaries
pub fn is_descendant(path: &str, prefix: &str) -> bool {
    let path = normalize(path);
    if prefix == "/" {
        return path.starts_with('/');
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// A sidebar link
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    /// Active only on an exact match, not on descendants
    pub end: bool,
}

impl NavLink {
    pub fn is_active(&self, path: &str) -> bool {
        if self.end {
            normalize(path) == self.href
        } else {
            is_descendant(path, self.href)
        }
    }
}

/// A collapsible sidebar group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub id: &'static str,
    pub label: &'static str,
    /// Route prefix whose pages belong to the group
    pub prefix: &'static str,
    pub links: &'static [NavLink],
}

impl NavGroup {
    /// Whether `path` belongs to this group
    pub fn contains(&self, path: &str) -> bool {
        is_descendant(path, self.prefix)
    }
}

pub static HOME_LINK: NavLink = NavLink {
    href: "/",
    label: "Home",
    end: true,
};

pub static NAV_GROUPS: &[NavGroup] = &[
    NavGroup {
        id: "components",
        label: "Components",
        prefix: "/components",
        links: &[
            NavLink { href: "/components", label: "Overview", end: true },
            NavLink { href: "/components/navigation", label: "Navigation", end: false },
            NavLink { href: "/components/buttons", label: "Buttons", end: false },
            NavLink { href: "/components/forms", label: "Forms", end: false },
            NavLink { href: "/components/cards", label: "Cards", end: false },
            NavLink { href: "/components/modals", label: "Modals", end: false },
            NavLink { href: "/components/type", label: "Type", end: false },
        ],
    },
    NavGroup {
        id: "foundations",
        label: "Foundations",
        prefix: "/foundations",
        links: &[
            NavLink { href: "/foundations", label: "Overview", end: true },
            NavLink { href: "/foundations/color-base", label: "Base Colors", end: false },
            NavLink { href: "/foundations/color-semantics", label: "Semantic Colors", end: false },
            NavLink { href: "/foundations/border-radius", label: "Border Radius", end: false },
        ],
    },
];

/// Look up a sidebar group by id
pub fn nav_group(id: &str) -> Option<&'static NavGroup> {
    NAV_GROUPS.iter().find(|group| group.id == id)
}
