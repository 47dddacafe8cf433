//! # retui
//!
//! Declarative terminal UI engine for Rust.
//!
//! ## Architecture
//!
//! Applications describe a tree of elements and components. Each frame the
//! engine reconciles that description into a persistent node arena,
//! resolves styles through a selector cascade, lays the tree out on a cell
//! grid, paints it into a z-stamped screen buffer and flushes only the
//! cells that changed. Input comes back through hit testing, focus and
//! bubbling dispatch.
//!
//! ```text
//! render() → reconcile → cascade + layout → paint → diff flush → backend
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr, Dimension, Rect, keywords)
//! - [`engine`] - Elements, components, the node arena and reconciliation
//! - [`style`] - Properties, selectors, stylesheets and the cascade
//! - [`layout`] - Flex/block layout, absolute overlays, scrolling, hit testing
//! - [`renderer`] - Screen buffers, canvas primitives and diff flushing
//! - [`state`] - Events, focus order, scrolling and dispatch
//! - [`backend`] - The terminal seam: crossterm and a recording test backend
//! - [`pipeline`] - The [`Document`] that runs it all
//!
//! ## Example
//!
//! ```ignore
//! use retui::*;
//!
//! let app = div()
//!     .style("border", 1)
//!     .child(button().on_click(|_, cx| { cx.exit(); Ok(()) }).child("Quit"));
//!
//! let config = DocumentConfig::default();
//! let backend = CrosstermBackend::stdout(&config)?;
//! Document::with_options(app, backend, Stylesheet::new(), config)?.run()?;
//! ```

pub mod backend;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, HandlerError, HandlerResult, Result};

pub use engine::{
    Child, Component, Element, Node, NodeId, NodeKind, Props, RenderContext, State,
    StateContext, Tree, Value, button, component, div, el, span, text,
};

pub use style::{Property, Selector, StyleContext, StyleValue, Stylesheet};

pub use layout::{LayoutBox, ScrollState, compute_layout, find_element_at};

pub use renderer::{Canvas, DiffRenderer, FlushStats, ScreenBuffer, ScreenCell};

pub use state::{Event, EventContext, EventKind, FocusState, KeyCode, MouseButtons, Payload};

pub use backend::{Backend, CellStyle, CrosstermBackend, CursorPlacement, TestBackend};

pub use pipeline::{Document, DocumentConfig};
