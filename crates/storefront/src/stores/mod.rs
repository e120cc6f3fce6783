//! UI-facing state containers.
//!
//! Each store is an explicit handle constructed once per session and passed
//! to whatever needs it. Handles are cheap to clone and share state. Loading
//! flags are advisory: nothing stops a second call while one is in flight.
//!
//! - [`CartStore`] - line items, totals, checkout
//! - [`CatalogStore`] - products of the selected client, category filter
//! - [`ClientStore`] - client organizations, persisted selection

pub mod cart;
pub mod catalog;
pub mod clients;

pub use cart::{CartError, CartStore, Customization, LineChange, LineItem, LineKey};
pub use catalog::CatalogStore;
pub use clients::ClientStore;

/// How a list fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The backend returned the list; it now holds `count` records.
    Loaded { count: usize },
    /// The backend answered `success: false`; the list is unchanged.
    Rejected,
    /// The fetch failed and the built-in sample data was substituted.
    Degraded,
    /// The fetch failed and the list is unchanged.
    Failed,
    /// Nothing to fetch (no client selected).
    Skipped,
    /// A newer request (or a cancellation) made this response obsolete.
    Superseded,
}

impl FetchOutcome {
    /// Whether the list now reflects a fresh backend response.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}
