//! Cart aggregation store.
//!
//! Holds the ordered list of line items. Adding a product whose
//! (product, size, customization text) key is already in the cart bumps that
//! line's quantity instead of appending a new line; the prices captured by
//! the first add stay in place.
//!
//! Remove and update use the same full key as add, so two customized
//! variants of one product and size can be managed independently.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use uniformes_core::{Price, Product, ProductId};

use crate::api::{ApiClient, ApiError, CheckoutRequest};
use crate::error::{add_breadcrumb, report_error};

/// Image used when a product has no media of its own.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1488161994519-c21cc028cb0d?w=500&h=600&fit=crop";

/// Category label for products without a category.
pub const UNCATEGORIZED: &str = "Sin categoría";

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantities must be at least one (or, for updates, representable).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Incrementing a line would overflow its quantity.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// A line or cart total would exceed the representable amount.
    #[error("Price overflow for product {0}")]
    PriceOverflow(ProductId),

    /// Checkout request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Text and surcharge attached to a line item (embroidery, name tags).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub text: String,
    #[serde(default)]
    pub customization_cost: Price,
}

impl Customization {
    #[must_use]
    pub fn new(text: impl Into<String>, customization_cost: Price) -> Self {
        Self {
            text: text.into(),
            customization_cost,
        }
    }
}

/// Identity of a cart line.
///
/// No customization is a different key from any customization text,
/// including the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub customization: Option<String>,
}

impl LineKey {
    /// Key of an uncustomized line.
    #[must_use]
    pub fn new(product_id: ProductId, size: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            customization: None,
        }
    }

    #[must_use]
    pub fn with_customization(mut self, text: impl Into<String>) -> Self {
        self.customization = Some(text.into());
        self
    }
}

/// One entry in the cart.
///
/// Serializes in the camelCase shape the checkout endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    /// Backend size id, or `"{product}-{size}"` when the size has none.
    pub product_size_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Unit price for the chosen size.
    pub price: Price,
    /// Unit price plus customization cost.
    pub total_price: Price,
    pub image: String,
    pub size: String,
    pub quantity: u32,
    pub category: String,
    pub customization: Option<Customization>,
}

impl LineItem {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            size: self.size.clone(),
            customization: self.customization.as_ref().map(|c| c.text.clone()),
        }
    }

    /// Whether this line has the given key.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id
            && self.size == key.size
            && self.customization.as_ref().map(|c| c.text.as_str()) == key.customization.as_deref()
    }

    /// `total_price × quantity`, or `None` if it doesn't fit.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.total_price.checked_mul(self.quantity)
    }
}

/// What `add_item` did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was increased.
    Incremented,
}

// =============================================================================
// CartStore
// =============================================================================

/// Cart state container.
///
/// Cheap to clone; clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    api: ApiClient,
    state: RwLock<CartState>,
}

#[derive(Debug, Default)]
struct CartState {
    items: Vec<LineItem>,
    loading: bool,
    error: Option<String>,
}

impl CartState {
    fn position(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|item| item.matches(key))
    }

    fn remove(&mut self, key: &LineKey) -> bool {
        self.position(key)
            .map(|index| self.items.remove(index))
            .is_some()
    }

    // Mutations are rejected when they'd make this overflow
    fn total(&self) -> Price {
        self.total_with(None, None).unwrap_or(Price::MAX)
    }

    /// Cart total with line `replaced` swapped for `line` (or `line`
    /// appended when `replaced` is `None`).
    fn total_with(&self, replaced: Option<usize>, line: Option<&LineItem>) -> Option<Price> {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != replaced)
            .map(|(_, item)| item)
            .chain(line)
            .try_fold(Price::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    /// Take the submitted lines out of the cart. Lines added, or units
    /// added to a line, after the snapshot was taken stay.
    fn settle(&mut self, submitted: &[LineItem]) {
        for line in submitted {
            let Some(index) = self.position(&line.key()) else {
                continue;
            };
            let remaining = self
                .items
                .get(index)
                .map_or(0, |current| current.quantity.saturating_sub(line.quantity));
            if remaining == 0 {
                self.items.remove(index);
            } else if let Some(current) = self.items.get_mut(index) {
                current.quantity = remaining;
            }
        }
    }
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                api,
                state: RwLock::new(CartState::default()),
            }),
        }
    }

    /// Snapshot of the line items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.inner.state.read().items.clone()
    }

    /// The line with the given key, if any.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<LineItem> {
        let state = self.inner.state.read();
        state.position(key).and_then(|i| state.items.get(i).cloned())
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.read().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.read().items.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.inner
            .state
            .read()
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Sum of `total_price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.inner.state.read().total()
    }

    /// Whether a checkout is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.state.read().loading
    }

    /// Message of the last failed checkout.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    /// Image URL for a product: its main media under the API origin, else
    /// the placeholder.
    #[must_use]
    pub fn image_url(&self, product: &Product) -> String {
        product.main_media().map_or_else(
            || PLACEHOLDER_IMAGE.to_string(),
            |path| self.inner.api.media_url(path),
        )
    }

    /// Add `quantity` units of a product in a size.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity,
    /// `CartError::QuantityOverflow` if the merged quantity doesn't fit and
    /// `CartError::PriceOverflow` if the line or cart total wouldn't. The
    /// cart is unchanged on error.
    pub fn add_item(
        &self,
        product: &Product,
        size: &str,
        quantity: u32,
        customization: Option<Customization>,
    ) -> Result<LineChange, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        let mut key = LineKey::new(product.id, size);
        key.customization = customization.as_ref().map(|c| c.text.clone());

        let change = {
            let mut state = self.inner.state.write();
            let index = state.position(&key);
            let line = match index.and_then(|i| state.items.get(i)) {
                Some(existing) => {
                    let mut merged = existing.clone();
                    merged.quantity = existing
                        .quantity
                        .checked_add(quantity)
                        .ok_or(CartError::QuantityOverflow(product.id))?;
                    merged
                }
                None => self.build_line(product, size, quantity, customization)?,
            };
            if state.total_with(index, Some(&line)).is_none() {
                return Err(CartError::PriceOverflow(product.id));
            }

            let merged_quantity = line.quantity;
            if let Some(slot) = index.and_then(|i| state.items.get_mut(i)) {
                *slot = line;
                debug!(product_id = %product.id, size, quantity = merged_quantity, "Merged cart line");
                LineChange::Incremented
            } else {
                state.items.push(line);
                debug!(product_id = %product.id, size, quantity, "Added cart line");
                LineChange::Added
            }
        };

        let message = match change {
            LineChange::Added => "Added line",
            LineChange::Incremented => "Incremented line",
        };
        self.breadcrumb(message, &key);
        Ok(change)
    }

    fn build_line(
        &self,
        product: &Product,
        size: &str,
        quantity: u32,
        customization: Option<Customization>,
    ) -> Result<LineItem, CartError> {
        let price = product.price_for_size(size);
        let surcharge = customization
            .as_ref()
            .map_or(Price::ZERO, |c| c.customization_cost);
        let product_size_id = product
            .size_entry(size)
            .and_then(|entry| entry.id)
            .map_or_else(|| format!("{}-{size}", product.id), |id| id.to_string());

        let total_price = price
            .checked_add(surcharge)
            .ok_or(CartError::PriceOverflow(product.id))?;

        Ok(LineItem {
            product_id: product.id,
            product_size_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price,
            total_price,
            image: self.image_url(product),
            size: size.to_string(),
            quantity,
            category: product
                .category_name()
                .unwrap_or(UNCATEGORIZED)
                .to_string(),
            customization,
        })
    }

    /// Remove the line with the given key. Returns whether a line was removed.
    pub fn remove_item(&self, key: &LineKey) -> bool {
        let removed = self.inner.state.write().remove(key);
        if removed {
            self.breadcrumb("Removed line", key);
        }
        removed
    }

    /// Set a line's quantity; zero or less removes the line.
    ///
    /// Returns whether a line matched.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity` exceeds `u32::MAX`
    /// and `CartError::PriceOverflow` if the new totals wouldn't fit.
    pub fn update_quantity(&self, key: &LineKey, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove_item(key));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?;

        let mut state = self.inner.state.write();
        let Some(index) = state.position(key) else {
            return Ok(false);
        };
        let Some(mut line) = state.items.get(index).cloned() else {
            return Ok(false);
        };
        line.quantity = quantity;
        if state.total_with(Some(index), Some(&line)).is_none() {
            return Err(CartError::PriceOverflow(key.product_id));
        }
        if let Some(slot) = state.items.get_mut(index) {
            *slot = line;
        }
        Ok(true)
    }

    /// Remove every line.
    pub fn clear_cart(&self) {
        self.inner.state.write().items.clear();
    }

    /// Submit the cart to the backend.
    ///
    /// On success the submitted lines are removed and the backend payload
    /// returned. Lines added while the request was in flight, and units added
    /// to a submitted line, stay in the cart. On failure the message is
    /// recorded in [`error`](Self::error) and the error returned. Concurrent
    /// calls are not coalesced.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Api` if the request fails.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<serde_json::Value, CartError> {
        let (items, total) = {
            let mut state = self.inner.state.write();
            state.loading = true;
            state.error = None;
            (state.items.clone(), state.total())
        };

        let line_count = items.len().to_string();
        let total_text = total.to_string();
        add_breadcrumb(
            "cart",
            "Checkout",
            Some(&[("items", line_count.as_str()), ("total", total_text.as_str())]),
        );

        let request = CheckoutRequest {
            items: &items,
            total,
        };
        let result = self.inner.api.checkout(&request).await;

        let mut state = self.inner.state.write();
        state.loading = false;
        match result {
            Ok(payload) => {
                state.settle(&items);
                drop(state);
                info!(lines = items.len(), %total, "Checkout completed");
                Ok(payload)
            }
            Err(e) => {
                state.error = Some(e.to_string());
                drop(state);
                report_error("cart", "checkout", &e);
                Err(CartError::Api(e))
            }
        }
    }

    fn breadcrumb(&self, message: &str, key: &LineKey) {
        let product_id = key.product_id.to_string();
        add_breadcrumb(
            "cart",
            message,
            Some(&[("product_id", product_id.as_str()), ("size", key.size.as_str())]),
        );
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("CartStore")
            .field("lines", &state.items.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use serde_json::json;
    use uniformes_core::{ProductSize, ProductSizeId};

    fn store() -> CartStore {
        let config = StorefrontConfig::default()
            .with_api_url("https://uniformes.example.com/api")
            .unwrap();
        CartStore::new(ApiClient::new(&config).unwrap())
    }

    fn shirt() -> Product {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Camisa",
            "price": 100,
            "category": {"name": "Escolares"},
            "sizes": [{"id": 31, "size": "M", "price": 120}, {"size": "L"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_same_key_merges_and_keeps_first_price() {
        let cart = store();
        let mut product = shirt();

        assert_eq!(cart.add_item(&product, "M", 2, None).unwrap(), LineChange::Added);
        // A later price change doesn't touch the existing line
        product.sizes[0].price = Some(Price::from_units(999));
        assert_eq!(
            cart.add_item(&product, "M", 3, None).unwrap(),
            LineChange::Incremented
        );

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].price, Price::from_units(120));
        assert_eq!(cart.total(), Price::from_units(600));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_size_price_and_fallbacks() {
        let cart = store();
        let product = shirt();
        cart.add_item(&product, "M", 1, None).unwrap();
        cart.add_item(&product, "L", 1, None).unwrap();

        let m = cart.line(&LineKey::new(product.id, "M")).unwrap();
        assert_eq!(m.product_size_id, "31");
        assert_eq!(m.category, "Escolares");

        // L has no id and no price of its own
        let l = cart.line(&LineKey::new(product.id, "L")).unwrap();
        assert_eq!(l.price, Price::from_units(100));
        assert_eq!(l.product_size_id, "1-L");
    }

    #[test]
    fn test_customization_is_part_of_the_key() {
        let cart = store();
        let product = shirt();
        let embroidery = Customization::new("ANA", Price::from_units(15));

        cart.add_item(&product, "M", 1, None).unwrap();
        cart.add_item(&product, "M", 1, Some(embroidery.clone())).unwrap();
        cart.add_item(&product, "M", 1, Some(Customization::new("", Price::ZERO)))
            .unwrap();
        assert_eq!(cart.len(), 3);

        let key = LineKey::new(product.id, "M").with_customization("ANA");
        let line = cart.line(&key).unwrap();
        assert_eq!(line.total_price, Price::from_units(135));
        assert_eq!(line.price, Price::from_units(120));

        // Removing the customized line leaves the plain one
        assert!(cart.remove_item(&key));
        assert!(cart.line(&LineKey::new(product.id, "M")).is_some());
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_total_includes_customization() {
        let cart = store();
        let product = shirt();
        cart.add_item(&product, "M", 2, Some(Customization::new("ANA", Price::from_units(15))))
            .unwrap();
        assert_eq!(cart.total(), Price::from_units(270));
    }

    #[test]
    fn test_zero_quantity_add_rejected() {
        let cart = store();
        let err = cart.add_item(&shirt(), "M", 0, None).unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_overflow() {
        let cart = store();
        let product = shirt();
        cart.add_item(&product, "M", u32::MAX, None).unwrap();
        let err = cart.add_item(&product, "M", 1, None).unwrap_err();
        assert!(matches!(err, CartError::QuantityOverflow(_)));
        assert_eq!(cart.item_count(), u64::from(u32::MAX));
    }

    fn pricey(price: &str) -> Product {
        serde_json::from_value(json!({
            "id": 9,
            "name": "Toga",
            "price": price,
            "sizes": [{"size": "U"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_line_total_overflow_rejected() {
        let cart = store();
        let product = pricey("50000000000000000000");

        let err = cart.add_item(&product, "U", 4_000_000_000, None).unwrap_err();
        assert!(matches!(err, CartError::PriceOverflow(_)));
        assert!(cart.is_empty());

        cart.add_item(&product, "U", 1, None).unwrap();
        let err = cart.add_item(&product, "U", 3_999_999_999, None).unwrap_err();
        assert!(matches!(err, CartError::PriceOverflow(_)));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), product.price);

        let key = LineKey::new(product.id, "U");
        assert!(matches!(
            cart.update_quantity(&key, 4_000_000_000),
            Err(CartError::PriceOverflow(_))
        ));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_cart_total_overflow_rejected() {
        let cart = store();
        let product = pricey("50000000000000000000");
        let engraved = Customization::new("X", Price::ZERO);

        // Each line fits on its own; together they don't
        cart.add_item(&product, "U", 1_000_000_000, None).unwrap();
        let err = cart
            .add_item(&product, "U", 1_000_000_000, Some(engraved))
            .unwrap_err();
        assert!(matches!(err, CartError::PriceOverflow(_)));
        assert_eq!(cart.len(), 1);
        assert!(cart.total() < Price::MAX);
    }

    #[test]
    fn test_surcharge_overflow_rejected() {
        let cart = store();
        let mut product = pricey("1");
        product.price = Price::MAX;

        let surcharge = Customization::new("ANA", Price::from_units(1));
        let err = cart.add_item(&product, "U", 1, Some(surcharge)).unwrap_err();
        assert!(matches!(err, CartError::PriceOverflow(_)));
        assert!(cart.is_empty());

        cart.add_item(&product, "U", 1, None).unwrap();
        assert_eq!(cart.total(), Price::MAX);
    }

    #[test]
    fn test_settle_keeps_lines_added_after_snapshot() {
        let cart = store();
        let product = shirt();
        cart.add_item(&product, "M", 2, None).unwrap();
        let submitted = cart.items();

        cart.add_item(&product, "M", 3, None).unwrap();
        cart.add_item(&product, "L", 1, None).unwrap();
        cart.inner.state.write().settle(&submitted);

        let m = cart.line(&LineKey::new(product.id, "M")).unwrap();
        assert_eq!(m.quantity, 3);
        assert!(cart.line(&LineKey::new(product.id, "L")).is_some());

        let submitted = cart.items();
        cart.inner.state.write().settle(&submitted);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let cart = store();
        let product = shirt();
        let key = LineKey::new(product.id, "M");
        cart.add_item(&product, "M", 1, None).unwrap();

        assert!(cart.update_quantity(&key, 4).unwrap());
        assert_eq!(cart.item_count(), 4);

        // Unknown key is a no-op
        assert!(!cart.update_quantity(&LineKey::new(product.id, "XL"), 2).unwrap());
        assert!(matches!(
            cart.update_quantity(&key, i64::from(u32::MAX) + 1),
            Err(CartError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_update_to_zero_or_less_removes() {
        for quantity in [0, -3] {
            let cart = store();
            let product = shirt();
            cart.add_item(&product, "M", 2, None).unwrap();
            cart.add_item(&product, "L", 1, None).unwrap();

            assert!(cart.update_quantity(&LineKey::new(product.id, "M"), quantity).unwrap());
            assert_eq!(cart.len(), 1);
            assert_eq!(cart.item_count(), 1);
        }
    }

    #[test]
    fn test_clear_cart() {
        let cart = store();
        let product = shirt();
        cart.add_item(&product, "M", 2, None).unwrap();
        cart.add_item(&product, "L", 3, None).unwrap();
        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_item_count_tracks_every_operation() {
        let cart = store();
        let product = shirt();
        let m = LineKey::new(product.id, "M");
        let l = LineKey::new(product.id, "L");

        let check = |cart: &CartStore| {
            let sum: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
            assert_eq!(cart.item_count(), sum);
        };

        cart.add_item(&product, "M", 2, None).unwrap();
        check(&cart);
        cart.add_item(&product, "L", 5, None).unwrap();
        check(&cart);
        cart.update_quantity(&m, 7).unwrap();
        check(&cart);
        cart.remove_item(&l);
        check(&cart);
        cart.add_item(&product, "M", 1, None).unwrap();
        check(&cart);
        assert_eq!(cart.item_count(), 8);
    }

    #[test]
    fn test_image_url_resolution() {
        let cart = store();
        let mut product = shirt();
        assert_eq!(cart.image_url(&product), PLACEHOLDER_IMAGE);

        // A bare image URL is not media
        product.image = Some("https://via.placeholder.com/300x400".to_string());
        assert_eq!(cart.image_url(&product), PLACEHOLDER_IMAGE);

        product.media = Some(uniformes_core::ProductMedia {
            main: Some(String::new()),
            gallery: Vec::new(),
        });
        assert_eq!(cart.image_url(&product), PLACEHOLDER_IMAGE);

        product.media = Some(uniformes_core::ProductMedia {
            main: Some("/storage/camisa.jpg".to_string()),
            gallery: Vec::new(),
        });
        assert_eq!(
            cart.image_url(&product),
            "https://uniformes.example.com/storage/camisa.jpg"
        );
    }

    #[test]
    fn test_missing_category_uses_placeholder() {
        let cart = store();
        let mut product = shirt();
        product.category = None;
        product.sizes = vec![ProductSize {
            id: Some(ProductSizeId::new(5)),
            size: "S".to_string(),
            price: None,
        }];
        cart.add_item(&product, "S", 1, None).unwrap();
        assert_eq!(cart.items()[0].category, UNCATEGORIZED);
    }

    #[test]
    fn test_line_item_wire_shape() {
        let cart = store();
        cart.add_item(&shirt(), "M", 2, Some(Customization::new("ANA", Price::from_units(15))))
            .unwrap();
        let json = serde_json::to_value(cart.items()).unwrap();
        let line = &json[0];
        assert_eq!(line["productId"], json!(1));
        assert_eq!(line["productSizeId"], json!("31"));
        assert_eq!(line["totalPrice"].as_f64(), Some(135.0));
        assert_eq!(line["customization"]["customizationCost"].as_f64(), Some(15.0));
        assert_eq!(line["quantity"], json!(2));
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_items_and_records_error() {
        let config = StorefrontConfig::default()
            .with_api_url("http://127.0.0.1:9/api")
            .unwrap();
        let cart = CartStore::new(ApiClient::new(&config).unwrap());
        cart.add_item(&shirt(), "M", 1, None).unwrap();

        let err = cart.checkout().await.unwrap_err();
        assert!(matches!(err, CartError::Api(ApiError::Http(_))));
        assert!(!cart.loading());
        assert!(cart.error().is_some());
        assert_eq!(cart.len(), 1);
    }
}
