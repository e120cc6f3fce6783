//! Degrade-to-demo-data policy for list fetches.
//!
//! When the backend can't be reached, the client and catalog stores can
//! substitute a small built-in data set so the storefront still has
//! something to show. This is a product decision, so it is a named,
//! configurable policy rather than part of the generic error path.

use serde_json::Map;
use uniformes_core::{Client, ClientId, Price, Product, ProductCategory, ProductId, ProductSize};

/// What a list fetch does after a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Replace the list with the built-in sample data.
    #[default]
    SampleData,
    /// Leave the list as it was.
    Disabled,
}

impl FallbackPolicy {
    #[must_use]
    pub const fn uses_sample_data(self) -> bool {
        matches!(self, Self::SampleData)
    }
}

/// The two sample client organizations.
#[must_use]
pub fn sample_clients() -> Vec<Client> {
    vec![
        sample_client(
            1,
            "Colegio San José",
            2010,
            "https://images.unsplash.com/photo-1427504494785-cdea0d6c1b10?w=600&h=400&fit=crop",
        ),
        sample_client(
            2,
            "Instituto Técnico Nacional",
            2005,
            "https://images.unsplash.com/photo-1552664730-d307ca884978?w=600&h=400&fit=crop",
        ),
    ]
}

fn sample_client(id: i32, name: &str, established_year: i32, image: &str) -> Client {
    Client {
        id: ClientId::new(id),
        name: name.to_string(),
        city: Some("Guatemala".to_string()),
        established_year: Some(established_year),
        image: Some(image.to_string()),
        extra: Map::new(),
    }
}

/// The six-item sample catalog.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        sample_product(
            1,
            "Uniforme Escolar Completo",
            "Incluye camisa, pantalón y corbata",
            45_000,
            "Escolares",
            "Uniforme+Escolar",
            &["XS", "S", "M", "L", "XL"],
        ),
        sample_product(
            2,
            "Camisa Empresarial",
            "Camisa de manga larga para empresas",
            25_000,
            "Empresariales",
            "Camisa+Empresarial",
            &["S", "M", "L", "XL", "XXL"],
        ),
        sample_product(
            3,
            "Falda Escolar",
            "Falda plisada para uniforme escolar",
            18_000,
            "Escolares",
            "Falda+Escolar",
            &["XS", "S", "M", "L"],
        ),
        sample_product(
            4,
            "Pantalón Empresarial",
            "Pantalón de vestir para empresas",
            30_000,
            "Empresariales",
            "Pantalón+Empresarial",
            &["28", "30", "32", "34", "36", "38"],
        ),
        sample_product(
            5,
            "Sweater Escolar",
            "Sweater con el logo de la institución",
            22_000,
            "Escolares",
            "Sweater+Escolar",
            &["XS", "S", "M", "L", "XL"],
        ),
        sample_product(
            6,
            "Blazer Empresarial",
            "Blazer ejecutivo de alta calidad",
            65_000,
            "Empresariales",
            "Blazer+Empresarial",
            &["S", "M", "L", "XL", "XXL"],
        ),
    ]
}

fn sample_product(
    id: i32,
    name: &str,
    description: &str,
    price: i64,
    category: &str,
    image_text: &str,
    sizes: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        price: Price::from_units(price),
        category: Some(ProductCategory::named(category)),
        image: Some(format!("https://via.placeholder.com/300x400?text={image_text}")),
        media: None,
        sizes: sizes.iter().map(|size| ProductSize::label(*size)).collect(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_clients() {
        let clients = sample_clients();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients.first().map(|c| c.id), Some(ClientId::new(1)));
    }

    #[test]
    fn test_sample_products_cover_both_categories() {
        let products = sample_products();
        assert_eq!(products.len(), 6);
        let schools = products
            .iter()
            .filter(|p| p.category_name() == Some("Escolares"))
            .count();
        assert_eq!(schools, 3);
        assert!(products.iter().all(|p| !p.sizes.is_empty()));
    }

    #[test]
    fn test_policy() {
        assert!(FallbackPolicy::default().uses_sample_data());
        assert!(!FallbackPolicy::Disabled.uses_sample_data());
    }
}
