//! Pipeline
//!
//! Connects the component tree to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Element tree → reconcile → layout → paint → diff flush → backend
//!                    ↑                                        │
//!                    └──────── dispatch ← input events ←──────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. **materialize** - Renders dirty components and reconciles their output
//! 2. **layout** - Size and position passes over the materialized tree
//! 3. **paint** - Draws every node into the current screen buffer
//! 4. **flush** - Sends the difference from the previous frame
//! 5. **dispatch** - Routes input through focus, hit testing and bubbling
//!
//! [`Document`] owns all of it and runs one pass per tick.

mod config;
mod document;
mod paint;

pub use config::DocumentConfig;
pub use document::Document;
pub use paint::{paint_tree, scroll_translation};
