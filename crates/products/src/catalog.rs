//! The loaded product catalog.

use std::sync::Arc;

use crate::product::{Category, Price, Product};

/// Ordered, immutable product collection.
///
/// Cloning is cheap: the products live behind an `Arc` and are shared with
/// every [`FilteredView`](crate::FilteredView) derived from the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for product in self.products.iter() {
            if !seen.contains(&product.category()) {
                seen.push(product.category());
            }
        }
        seen
    }

    /// Highest price in the catalog (`None` when empty).
    pub fn max_price(&self) -> Option<Price> {
        self.products.iter().map(Product::price).max()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.products[..] == other.products[..]
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductRecord;

    fn product(name: &str, category: &str, price: u64) -> Product {
        Product::try_from(ProductRecord {
            name: name.to_string(),
            brand: "Brand".to_string(),
            category: category.to_string(),
            price,
            rating: 4.0,
            image: format!("{name}.jpg"),
        })
        .unwrap()
    }

    #[test]
    fn categories_are_distinct_in_first_appearance_order() {
        let catalog = Catalog::new(vec![
            product("a", "shoes", 10),
            product("b", "watches", 20),
            product("c", "shoes", 30),
            product("d", "bags", 40),
        ]);

        let names: Vec<&str> = catalog.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["shoes", "watches", "bags"]);
    }

    #[test]
    fn max_price_of_empty_catalog_is_none() {
        assert_eq!(Catalog::empty().max_price(), None);

        let catalog = Catalog::new(vec![product("a", "shoes", 10), product("b", "shoes", 99)]);
        assert_eq!(catalog.max_price(), Some(Price::new(99)));
    }

    #[test]
    fn clones_share_storage() {
        let catalog = Catalog::new(vec![product("a", "shoes", 10)]);
        let clone = catalog.clone();
        assert!(std::ptr::eq(catalog.as_slice(), clone.as_slice()));
        assert_eq!(catalog, clone);
    }
}
