//! View state machine and the presentation model handed to renderers.

use serde::Serialize;

use shopfront_core::{DomainError, DomainResult};
use shopfront_products::{price_label, rating_label, FilteredView, Product};

/// Message shown in place of the grid when the catalog cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading products. Check your local server.";

/// Lifecycle of the visible catalog.
///
/// `Loading` → `Populated` | `Empty` | `Error`, then `Populated` ↔ `Empty`
/// any number of times. `Error` is terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Loading,
    Populated,
    Empty,
    Error(String),
}

impl ViewState {
    /// `Populated` or `Empty` depending on whether `view` has products.
    pub fn for_view(view: &FilteredView) -> Self {
        if view.is_empty() {
            Self::Empty
        } else {
            Self::Populated
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Populated => "populated",
            ViewState::Empty => "empty",
            ViewState::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    pub fn can_transition_to(&self, next: &ViewState) -> bool {
        use ViewState::*;
        matches!(
            (self, next),
            (Loading, Populated | Empty | Error(_)) | (Populated | Empty, Populated | Empty)
        )
    }

    pub fn transition(&self, next: ViewState) -> DomainResult<ViewState> {
        if !self.can_transition_to(&next) {
            return Err(DomainError::invariant(format!(
                "illegal view transition {} -> {}",
                self.name(),
                next.name()
            )));
        }
        Ok(next)
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            ViewState::Loading => Visibility {
                loading: true,
                grid: false,
                empty_state: false,
                error: false,
            },
            ViewState::Populated => Visibility {
                loading: false,
                grid: true,
                empty_state: false,
                error: false,
            },
            ViewState::Empty => Visibility {
                loading: false,
                grid: true,
                empty_state: true,
                error: false,
            },
            ViewState::Error(_) => Visibility {
                loading: false,
                grid: false,
                empty_state: false,
                error: true,
            },
        }
    }
}

/// Which presentational regions are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub loading: bool,
    pub grid: bool,
    pub empty_state: bool,
    pub error: bool,
}

/// One rendered product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    /// Position within the filtered view (target of add-to-cart)
    pub position: usize,
    pub image: String,
    pub image_alt: String,
    /// Card images are always deferred until near the viewport
    pub image_loading: &'static str,
    pub brand: String,
    pub name: String,
    pub rating_label: String,
    pub price_label: String,
    pub add_to_cart_label: &'static str,
}

impl ProductCard {
    pub const ADD_TO_CART_LABEL: &'static str = "Add to Cart";
    pub const IMAGE_LOADING: &'static str = "lazy";

    pub fn new(position: usize, product: &Product) -> Self {
        Self {
            position,
            image: product.image().to_string(),
            image_alt: product.name().to_string(),
            image_loading: Self::IMAGE_LOADING,
            brand: product.brand().to_string(),
            name: product.name().to_string(),
            rating_label: rating_label(product.rating()),
            price_label: price_label(product.price()),
            add_to_cart_label: Self::ADD_TO_CART_LABEL,
        }
    }
}

/// Everything a renderer needs to draw one state of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame<'a> {
    pub state: &'a ViewState,
    pub visibility: Visibility,
    /// Empty unless `state` is `Populated`
    pub cards: Vec<ProductCard>,
    /// Text paired with the max-price control
    pub price_label: &'a str,
    /// Options for the category selector, after the `"all"` wildcard
    pub categories: Vec<String>,
    /// Upper bound of the max-price range control (`None` until a catalog is loaded)
    pub price_range_max: Option<u64>,
}

impl<'a> Frame<'a> {
    pub fn build(state: &'a ViewState, view: &FilteredView, price_label: &'a str) -> Self {
        let cards = match state {
            ViewState::Populated => view
                .iter()
                .enumerate()
                .map(|(position, product)| ProductCard::new(position, product))
                .collect(),
            _ => Vec::new(),
        };

        // Control options come from the full catalog, not the visible subset.
        let catalog = view.catalog();

        Self {
            state,
            visibility: state.visibility(),
            cards,
            price_label,
            categories: catalog
                .categories()
                .into_iter()
                .map(|category| category.as_str().to_string())
                .collect(),
            price_range_max: catalog.max_price().map(|price| price.amount()),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self.state {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}
