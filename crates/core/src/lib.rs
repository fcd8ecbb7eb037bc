//! `shopfront-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod error;

pub use error::{DomainError, DomainResult};
