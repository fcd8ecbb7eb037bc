//! Products domain module (catalog + filter engine).
//!
//! This crate contains the catalog data model and the filter engine,
//! implemented purely as deterministic domain logic (no IO, no rendering).

pub mod catalog;
pub mod filter;
pub mod format;
pub mod product;

pub use catalog::Catalog;
pub use filter::{filter, CategoryFilter, FilterCriteria, FilteredView};
pub use format::{group_en_in, price_label, rating_label};
pub use product::{Category, Price, Product, ProductRecord, Rating};
