//! Layout Module
//!
//! Constraint-based layout for the materialized tree: flex column and row
//! with grow weights, wrapping block flow, text leaves, absolute overlays
//! and scroll viewports. z-index never affects geometry; it is recorded
//! per node for paint order and hit testing.
//!
//! # Example
//!
//! ```ignore
//! use retui::layout::{compute_layout, find_element_at};
//!
//! compute_layout(&mut tree, &sheet, focus, 80, 24);
//! let target = find_element_at(&tree, 4, 1);
//! ```

mod engine;
mod hit_test;
mod text_measure;
mod types;

pub use engine::{LayoutEngine, LayoutResult, compute_layout};
pub use hit_test::find_element_at;
pub use text_measure::{char_width, string_width, text_size};
pub use types::*;
