//! Product catalog records.
//!
//! The backend has served two shapes over time: the early one with a plain
//! category string and bare size labels, and the current one with a nested
//! category object and per-size prices. Both decode into the same types;
//! serialization always produces the current shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{CategoryId, ProductId, ProductSizeId};
use super::price::Price;

/// A product offered to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Flat price, used when the chosen size has no price of its own.
    #[serde(default)]
    pub price: Price,
    pub category: Option<ProductCategory>,
    /// Absolute image URL.
    pub image: Option<String>,
    /// Media paths relative to the API origin.
    pub media: Option<ProductMedia>,
    #[serde(default)]
    pub sizes: Vec<ProductSize>,
    /// Backend fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Find the size entry with the given label.
    #[must_use]
    pub fn size_entry(&self, size: &str) -> Option<&ProductSize> {
        self.sizes.iter().find(|entry| entry.size == size)
    }

    /// Unit price for a size: the size's own price if it has one, else the
    /// product's flat price.
    #[must_use]
    pub fn price_for_size(&self, size: &str) -> Price {
        self.size_entry(size)
            .and_then(|entry| entry.price)
            .unwrap_or(self.price)
    }

    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Media path of the main image, if any.
    #[must_use]
    pub fn main_media(&self) -> Option<&str> {
        self.media
            .as_ref()
            .and_then(|m| m.main.as_deref())
            .filter(|path| !path.is_empty())
    }

    /// Size labels in catalog order.
    pub fn size_labels(&self) -> impl Iterator<Item = &str> {
        self.sizes.iter().map(|entry| entry.size.as_str())
    }
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct ProductCategory {
    pub id: Option<CategoryId>,
    pub name: String,
}

impl ProductCategory {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Name(String),
    Object { id: Option<CategoryId>, name: String },
}

impl From<CategoryRepr> for ProductCategory {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Name(name) => Self { id: None, name },
            CategoryRepr::Object { id, name } => Self { id, name },
        }
    }
}

/// One purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SizeRepr")]
pub struct ProductSize {
    pub id: Option<ProductSizeId>,
    /// Size label (e.g. "M", "32").
    pub size: String,
    pub price: Option<Price>,
}

impl ProductSize {
    /// A size with no id and no price override.
    #[must_use]
    pub fn label(size: impl Into<String>) -> Self {
        Self {
            id: None,
            size: size.into(),
            price: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Label(String),
    Entry {
        id: Option<ProductSizeId>,
        size: String,
        price: Option<Price>,
    },
}

impl From<SizeRepr> for ProductSize {
    fn from(repr: SizeRepr) -> Self {
        match repr {
            SizeRepr::Label(size) => Self::label(size),
            SizeRepr::Entry { id, size, price } => Self { id, size, price },
        }
    }
}

/// Product media paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMedia {
    pub main: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}
