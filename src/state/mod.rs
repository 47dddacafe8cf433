//! State Module - interaction state of a document
//!
//! - **Events** - Event kinds, payloads, key codes
//! - **Focus** - Tab order, focus cycling, open element
//! - **Dispatch** - Handler invocation with bubbling and stop-propagation
//! - **Scroll** - Scroll offsets, clamping, scroll chaining

mod dispatch;
mod events;
mod focus;
mod scroll;

pub use dispatch::*;
pub use events::*;
pub use focus::*;
pub use scroll::*;
