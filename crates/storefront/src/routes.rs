//! Navigation table for storefront views.
//!
//! # Route Structure
//!
//! ```text
//! /               - Home (loaded eagerly)
//! /productos      - Legacy path, redirects to /tienda
//! /tienda         - Shop
//! /carrito        - Cart
//! /acerca         - About
//! /escuela        - School landing
//! /shop-category  - Shop by category
//! /privacidad     - Privacy policy
//! /terminos       - Terms of service
//! /accesibilidad  - Accessibility statement
//! ```
//!
//! Paths match exactly; query strings and fragments are ignored. There are
//! no parameterized routes, guards or nested routes.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// A storefront view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Shop,
    Cart,
    About,
    School,
    ShopCategory,
    Privacy,
    Terms,
    Accessibility,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "HomeView",
            Self::Shop => "ShopView",
            Self::Cart => "CartView",
            Self::About => "AboutView",
            Self::School => "SchoolView",
            Self::ShopCategory => "ShopCategoryView",
            Self::Privacy => "PrivacyView",
            Self::Terms => "TermsView",
            Self::Accessibility => "AccessibilityView",
        };
        f.pad(name)
    }
}

/// When a view's code is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// At startup.
    Eager,
    /// On first navigation.
    Lazy,
}

/// One entry of the navigation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub loading: Loading,
}

/// A permanent redirect from a retired path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub from: &'static str,
    pub to: &'static str,
}

/// All routes, in declaration order.
pub const ROUTES: &[Route] = &[
    route("/", "home", View::Home, Loading::Eager),
    route("/tienda", "tienda", View::Shop, Loading::Lazy),
    route("/carrito", "carrito", View::Cart, Loading::Lazy),
    route("/acerca", "acerca", View::About, Loading::Lazy),
    route("/escuela", "escuela", View::School, Loading::Lazy),
    route("/shop-category", "shop-category", View::ShopCategory, Loading::Lazy),
    route("/privacidad", "privacidad", View::Privacy, Loading::Lazy),
    route("/terminos", "terminos", View::Terms, Loading::Lazy),
    route("/accesibilidad", "accesibilidad", View::Accessibility, Loading::Lazy),
];

/// Retired paths.
pub const REDIRECTS: &[Redirect] = &[Redirect {
    from: "/productos",
    to: "/tienda",
}];

const fn route(path: &'static str, name: &'static str, view: View, loading: Loading) -> Route {
    Route {
        path,
        name,
        view,
        loading,
    }
}

/// Navigation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("No route for path: {0}")]
    NotFound(String),
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub route: &'static Route,
    /// The retired path that was followed, if any.
    pub redirected_from: Option<&'static str>,
}

/// Result of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: &'static Route,
    pub redirected_from: Option<&'static str>,
    /// Whether this navigation loaded a lazy view for the first time.
    pub loaded_view: bool,
}

/// Look up a path, following redirects.
///
/// # Errors
///
/// Returns `NavigationError::NotFound` for unknown paths.
pub fn resolve(path: &str) -> Result<Resolved, NavigationError> {
    let path = strip_query(path);

    let (target, redirected_from) = REDIRECTS
        .iter()
        .find(|r| r.from == path)
        .map_or((path, None), |r| (r.to, Some(r.from)));

    ROUTES
        .iter()
        .find(|r| r.path == target)
        .map(|route| Resolved {
            route,
            redirected_from,
        })
        .ok_or_else(|| NavigationError::NotFound(path.to_string()))
}

/// Look up a route by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path.get(..end).unwrap_or(path)
}

/// Session router: resolves paths and tracks which lazy views are loaded.
#[derive(Debug, Clone)]
pub struct Router {
    loaded: HashSet<View>,
    current: Option<&'static Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router with the eager views already loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: ROUTES
                .iter()
                .filter(|r| r.loading == Loading::Eager)
                .map(|r| r.view)
                .collect(),
            current: None,
        }
    }

    /// Navigate to a path.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NotFound` for unknown paths; the current
    /// route is left unchanged.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let resolved = resolve(path)?;
        let loaded_view = self.loaded.insert(resolved.route.view);
        if loaded_view {
            tracing::debug!(view = %resolved.route.view, "Loading view");
        }
        self.current = Some(resolved.route);

        Ok(Navigation {
            route: resolved.route,
            redirected_from: resolved.redirected_from,
            loaded_view,
        })
    }

    /// The route of the last successful navigation.
    #[must_use]
    pub const fn current(&self) -> Option<&'static Route> {
        self.current
    }

    #[must_use]
    pub fn is_loaded(&self, view: View) -> bool {
        self.loaded.contains(&view)
    }
}
