//! Rendering backends.
//!
//! The controller only knows the [`Renderer`] trait; the backend (terminal,
//! headless recorder, a webview bridge) is a swappable collaborator.

use std::io::Write;

use serde::Serialize;

use shopfront_products::{group_en_in, CategoryFilter};

use crate::view::{Frame, ProductCard, ViewState, Visibility};

/// Projects a frame into some visible surface.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, frame: &Frame<'_>) {
        (**self).render(frame)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &Frame<'_>) {
        (**self).render(frame)
    }
}

/// Owned copy of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSnapshot {
    pub state: ViewState,
    pub visibility: Visibility,
    pub cards: Vec<ProductCard>,
    pub price_label: String,
    pub categories: Vec<String>,
    pub price_range_max: Option<u64>,
}

impl From<&Frame<'_>> for FrameSnapshot {
    fn from(frame: &Frame<'_>) -> Self {
        Self {
            state: frame.state.clone(),
            visibility: frame.visibility,
            cards: frame.cards.clone(),
            price_label: frame.price_label.to_string(),
            categories: frame.categories.clone(),
            price_range_max: frame.price_range_max,
        }
    }
}

/// Records every frame; used for tests and embedding.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: Vec<FrameSnapshot>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.frames.last()
    }

    pub fn render_count(&self) -> usize {
        self.frames.len()
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames.push(FrameSnapshot::from(frame));
    }
}

/// Plain-text cards for a terminal.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        let out = &mut self.out;
        match frame.state {
            ViewState::Loading => writeln!(out, "Loading products...")?,
            ViewState::Error(_) => {
                if let Some(message) = frame.error_message() {
                    writeln!(out, "! {message}")?;
                }
            }
            ViewState::Empty => {
                writeln!(out, "-- 0 products (max price: {}) --", frame.price_label)?;
                write_controls(out, frame)?;
                writeln!(out, "No products match your filters.")?;
            }
            ViewState::Populated => {
                writeln!(
                    out,
                    "-- {} products (max price: {}) --",
                    frame.cards.len(),
                    frame.price_label
                )?;
                write_controls(out, frame)?;
                for card in &frame.cards {
                    writeln!(out, "[{}] {} | {}", card.position + 1, card.brand, card.name)?;
                    writeln!(
                        out,
                        "    {}  {}  [{}]",
                        card.rating_label, card.price_label, card.add_to_cart_label
                    )?;
                    writeln!(out, "    image: {}", card.image)?;
                }
            }
        }
        out.flush()
    }
}

fn write_controls<W: Write>(out: &mut W, frame: &Frame<'_>) -> std::io::Result<()> {
    let mut options = vec![CategoryFilter::WILDCARD];
    options.extend(frame.categories.iter().map(String::as_str));
    write!(out, "   categories: {}", options.join(", "))?;
    match frame.price_range_max {
        Some(max) => writeln!(out, "  |  price range: 0 to {}", group_en_in(max)),
        None => writeln!(out),
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) {
        if let Err(err) = self.write_frame(frame) {
            tracing::warn!(error = %err, "failed to write frame");
        }
    }
}
