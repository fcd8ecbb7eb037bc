//! `shopfront-client`
//!
//! **Responsibility:** the catalog widget's runtime around the pure filter engine.
//!
//! This crate provides:
//! - Catalog loading from HTTP, files or in-memory payloads
//! - Debounced query input
//! - The view state machine and pluggable renderers
//! - A controller that owns the application state and drives the event loop

pub mod command;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod loader;
pub mod render;
pub mod view;

pub use command::{parse_command, Command, CommandError};
pub use config::{CatalogLocation, ClientConfig};
pub use controller::{AppState, CartHandler, CatalogController, NoopCart, UiEvent};
pub use debounce::{Debouncer, Settled};
pub use loader::{
    load_catalog, source_for, CatalogSource, FileCatalogSource, HttpCatalogSource, LoadError,
    StaticCatalogSource,
};
pub use render::{FrameSnapshot, HeadlessRenderer, Renderer, TextRenderer};
pub use view::{Frame, ProductCard, ViewState, Visibility};
