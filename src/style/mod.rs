//! Style Module - selectors, stylesheets and the cascade
//!
//! Stylesheets are compiled once, when a document is built. Resolution
//! happens per frame through a [`StyleContext`], which sees the tree and
//! the current focus/open references needed by `:focus` and `:open`.
//!
//! # Example
//!
//! ```ignore
//! let mut sheet = Stylesheet::with_base()?;
//! sheet.add_toml_str(r##"
//!     ["#title"]
//!     color = "yellow"
//!     font-weight = "bold"
//! "##)?;
//!
//! let cx = StyleContext::new(&tree, &sheet, focus);
//! let fg = cx.color(id, Property::Color);
//! ```

mod cascade;
mod property;
mod selector;
mod stylesheet;

pub use cascade::StyleContext;
pub use property::{Property, PropertyName, Shorthand, StyleMap, StyleValue, expand_sides};
pub use selector::{MatchTarget, Pseudo, Selector, Specificity};
pub use stylesheet::{BASE_STYLESHEET, StyleRule, Stylesheet};
