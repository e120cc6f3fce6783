//! Navigation table commands.

use uniformes_storefront::routes::{self, Loading, NavigationError, REDIRECTS, ROUTES};

/// Print every route and redirect.
#[allow(clippy::print_stdout)]
pub fn print_routes() {
    for route in ROUTES {
        let loading = match route.loading {
            Loading::Eager => "eager",
            Loading::Lazy => "lazy",
        };
        println!("{:<16} {:<16} {:<20} {loading}", route.path, route.name, route.view);
    }
    for redirect in REDIRECTS {
        println!("{:<16} -> {}", redirect.from, redirect.to);
    }
}

/// Resolve one path and print the view it lands on.
///
/// # Errors
///
/// Returns `NavigationError::NotFound` for unknown paths.
pub fn resolve_path(path: &str) -> Result<(), NavigationError> {
    let resolved = routes::resolve(path)?;

    #[allow(clippy::print_stdout)]
    {
        if let Some(from) = resolved.redirected_from {
            println!("{from} redirects to {}", resolved.route.path);
        }
        println!("{} -> {} ({})", resolved.route.path, resolved.route.view, resolved.route.name);
    }
    Ok(())
}
