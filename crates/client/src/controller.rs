//! Application controller: owns the state and drives the event loop.

use tokio::sync::mpsc;

use shopfront_products::{filter, group_en_in, Catalog, CategoryFilter, FilterCriteria, FilteredView, Price, Product};

use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::loader::{load_catalog, CatalogSource, LoadError};
use crate::render::Renderer;
use crate::view::{Frame, ViewState, LOAD_ERROR_MESSAGE};

/// Input from the presentation layer's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// New search box text (debounced).
    QueryInput(String),
    /// Category selector change (immediate).
    CategoryChanged(CategoryFilter),
    /// Max-price range control change (immediate).
    MaxPriceChanged(Price),
    /// "Add to Cart" pressed on the card at this position of the visible list.
    AddToCart(usize),
}

/// Extension point behind the add-to-cart affordance.
pub trait CartHandler: Send {
    fn add_to_cart(&mut self, product: &Product);
}

/// Default cart: the control is visible but does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCart;

impl CartHandler for NoopCart {
    fn add_to_cart(&mut self, product: &Product) {
        tracing::debug!(product = product.name(), "add to cart has no behaviour yet");
    }
}

/// Single source of truth for the widget.
#[derive(Debug, Default)]
pub struct AppState {
    catalog: Catalog,
    loaded: bool,
    criteria: FilterCriteria,
    view: FilteredView,
    state: ViewState,
    filter_runs: u64,
}

impl AppState {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    /// Number of filter engine invocations so far.
    pub fn filter_runs(&self) -> u64 {
        self.filter_runs
    }
}

pub struct CatalogController<R: Renderer> {
    config: ClientConfig,
    app: AppState,
    renderer: R,
    cart: Box<dyn CartHandler>,
}

impl<R: Renderer> CatalogController<R> {
    /// Create the controller and draw the initial loading frame.
    pub fn new(config: ClientConfig, renderer: R) -> Self {
        let mut controller = Self {
            config,
            app: AppState::default(),
            renderer,
            cart: Box::new(NoopCart),
        };
        controller.render();
        controller
    }

    pub fn with_cart(mut self, cart: impl CartHandler + 'static) -> Self {
        self.cart = Box::new(cart);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.app
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Text for the label paired with the max-price control.
    pub fn price_label(&self) -> String {
        let max = self.app.criteria.max_price();
        if max == Price::MAX {
            "Any".to_string()
        } else {
            group_en_in(max.amount())
        }
    }

    /// Loader completion. Only the first completion while `Loading` counts.
    pub fn on_loaded(&mut self, result: Result<Catalog, LoadError>) {
        if self.app.state != ViewState::Loading {
            tracing::warn!(state = self.app.state.name(), "ignoring late catalog load result");
            return;
        }

        match result {
            Ok(catalog) => {
                tracing::info!(products = catalog.len(), "catalog loaded");
                // First paint shows the whole catalog.
                self.app.view = FilteredView::unfiltered(&catalog);
                self.app.catalog = catalog;
                self.app.loaded = true;
                self.transition(ViewState::for_view(&self.app.view));
            }
            Err(err) => {
                tracing::error!(error = %err, "catalog load failed");
                self.transition(ViewState::Error(LOAD_ERROR_MESSAGE.to_string()));
            }
        }
        self.render();
    }

    /// Mirror the search box without filtering (the debounced apply follows).
    pub fn update_query_text(&mut self, text: impl Into<String>) {
        self.app.criteria.set_query(text);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.app.criteria.set_query(query);
        self.apply_filters();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.app.criteria.set_category(category);
        self.apply_filters();
    }

    pub fn set_max_price(&mut self, max_price: Price) {
        self.app.criteria.set_max_price(max_price);
        if !self.apply_filters() {
            // The price label tracks the control even before results exist.
            self.render();
        }
    }

    /// Recompute the filtered view from the full catalog and render it.
    ///
    /// Returns `false` when skipped (catalog not loaded yet, or load failed).
    pub fn apply_filters(&mut self) -> bool {
        if !self.app.loaded || self.app.state.is_error() {
            tracing::debug!(state = self.app.state.name(), "filter skipped: no catalog");
            return false;
        }

        let view = filter(&self.app.catalog, &self.app.criteria);
        self.app.filter_runs += 1;
        tracing::debug!(
            query = self.app.criteria.query(),
            category = self.app.criteria.category().as_str(),
            max_price = self.app.criteria.max_price().amount(),
            visible = view.len(),
            total = self.app.catalog.len(),
            "filters applied"
        );

        self.app.view = view;
        self.transition(ViewState::for_view(&self.app.view));
        self.render();
        true
    }

    pub fn add_to_cart(&mut self, position: usize) {
        match self.app.view.get(position) {
            Some(product) => self.cart.add_to_cart(product),
            None => tracing::warn!(position, visible = self.app.view.len(), "no card at position"),
        }
    }

    /// Dispatch one UI event; query text goes through `debouncer`.
    pub fn handle(&mut self, event: UiEvent, debouncer: &mut Debouncer<String>) {
        match event {
            UiEvent::QueryInput(text) => {
                self.update_query_text(text.clone());
                debouncer.push(text);
            }
            UiEvent::CategoryChanged(category) => self.set_category(category),
            UiEvent::MaxPriceChanged(price) => self.set_max_price(price),
            UiEvent::AddToCart(position) => self.add_to_cart(position),
        }
    }

    /// Run the widget: load the catalog and process UI events until `events` closes.
    ///
    /// Input stays responsive while the catalog loads. When `events` closes the
    /// pending debounce is cancelled; an in-flight load is still awaited so the
    /// final state is never `Loading`.
    pub async fn run<S>(mut self, source: &S, mut events: mpsc::Receiver<UiEvent>) -> Self
    where
        S: CatalogSource + ?Sized,
    {
        let (mut debouncer, mut settled) = Debouncer::channel(self.config.debounce);
        let delay = self.config.loading_delay;

        let load = async {
            let result = load_catalog(source).await;
            if result.is_ok() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        };
        tokio::pin!(load);

        let mut loading = true;
        let mut events_open = true;

        loop {
            tokio::select! {
                result = &mut load, if loading => {
                    loading = false;
                    self.on_loaded(result);
                    if !events_open {
                        break;
                    }
                }
                Some(delivery) = settled.recv() => {
                    if let Some(query) = debouncer.accept(delivery) {
                        self.set_query(query);
                    }
                }
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle(event, &mut debouncer),
                    None => {
                        events_open = false;
                        debouncer.cancel();
                        if !loading {
                            break;
                        }
                    }
                },
            }
        }

        tracing::debug!(filter_runs = self.app.filter_runs, "controller stopped");
        self
    }

    fn transition(&mut self, next: ViewState) {
        match self.app.state.transition(next) {
            Ok(state) => self.app.state = state,
            Err(err) => tracing::warn!(error = %err, "view transition rejected"),
        }
    }

    fn render(&mut self) {
        let label = self.price_label();
        let frame = Frame::build(&self.app.state, &self.app.view, &label);
        self.renderer.render(&frame);
    }
}
