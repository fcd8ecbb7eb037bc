//! Filter engine: `(catalog, criteria) -> filtered view`.
//!
//! Every application recomputes the subset from the full catalog; there is no
//! incremental narrowing and no memoization between calls.

use crate::catalog::Catalog;
use crate::product::{Category, Price, Product};

/// Category constraint: the `"all"` wildcard or one exact category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const WILDCARD: &'static str = "all";

    /// Parse a selector value; `"all"` is the wildcard, anything else is exact.
    pub fn parse(value: &str) -> Self {
        if value == Self::WILDCARD {
            Self::All
        } else {
            Self::Only(Category::new(value))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => Self::WILDCARD,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Current search/category/price constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    query: String,
    category: CategoryFilter,
    max_price: Price,
}

impl Default for FilterCriteria {
    /// Unbounded criteria: matches every product.
    fn default() -> Self {
        Self {
            query: String::new(),
            category: CategoryFilter::All,
            max_price: Price::MAX,
        }
    }
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, category: CategoryFilter, max_price: Price) -> Self {
        Self {
            query: query.into(),
            category,
            max_price,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_max_price(mut self, max_price: Price) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_max_price(&mut self, max_price: Price) {
        self.max_price = max_price;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn max_price(&self) -> Price {
        self.max_price
    }

    /// Evaluate all predicates against a single product.
    pub fn matches(&self, product: &Product) -> bool {
        Predicate::new(self).matches(product)
    }
}

/// Criteria with the query case-folded once per filter pass.
struct Predicate<'a> {
    needle: String,
    criteria: &'a FilterCriteria,
}

impl<'a> Predicate<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            needle: criteria.query.to_lowercase(),
            criteria,
        }
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.needle.is_empty()
            || product.name().to_lowercase().contains(&self.needle)
            || product.brand().to_lowercase().contains(&self.needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.criteria.category.matches(product.category())
    }

    fn matches_price(&self, product: &Product) -> bool {
        product.price() <= self.criteria.max_price
    }

    fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product) && self.matches_price(product)
    }
}

/// Subset of a catalog eligible for display, in catalog order.
///
/// Stored as the shared catalog plus ascending indices, so a view can never
/// reorder or invent products.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    catalog: Catalog,
    indices: Vec<usize>,
}

impl FilteredView {
    /// View containing every product of `catalog`.
    pub fn unfiltered(catalog: &Catalog) -> Self {
        Self {
            catalog: catalog.clone(),
            indices: (0..catalog.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Product> {
        self.indices
            .get(position)
            .and_then(|&index| self.catalog.get(index))
    }

    /// The full catalog this view was taken from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Positions of the visible products within the source catalog.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.indices
            .iter()
            .filter_map(move |&index| self.catalog.get(index))
    }

    /// Materialize the view as a standalone catalog.
    pub fn to_catalog(&self) -> Catalog {
        self.iter().cloned().collect()
    }
}

/// Apply `criteria` to the full `catalog`.
pub fn filter(catalog: &Catalog, criteria: &FilterCriteria) -> FilteredView {
    let predicate = Predicate::new(criteria);
    let indices = catalog
        .iter()
        .enumerate()
        .filter(|(_, product)| predicate.matches(product))
        .map(|(index, _)| index)
        .collect();

    FilteredView {
        catalog: catalog.clone(),
        indices,
    }
}
