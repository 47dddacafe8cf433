//! Layout types.

use crate::types::Rect;

/// Stand-in for an unlimited extent. Small enough that sums of a few
/// extents never overflow `i32`.
pub const UNBOUNDED: i32 = i32::MAX / 4;

/// Inbound size constraints of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl Constraints {
    /// Exactly `width` x `height`.
    pub const fn tight(width: i32, height: i32) -> Self {
        Self {
            min_width: width,
            min_height: height,
            max_width: width,
            max_height: height,
        }
    }

    /// Anything up to `width` x `height`.
    pub const fn loose(width: i32, height: i32) -> Self {
        Self {
            min_width: 0,
            min_height: 0,
            max_width: width,
            max_height: height,
        }
    }
}

/// Computed geometry of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutBox {
    /// Outer rectangle, in unscrolled document coordinates.
    pub rect: Rect,
    /// Rectangle inside border and padding.
    pub content: Rect,
    /// Accumulated z-index: ancestors' plus own.
    pub z: i32,
    /// Children are clipped to the content box.
    pub clips: bool,
}

/// Scroll position and extents of a scrollable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub scrollable: bool,
    pub offset_x: i32,
    pub offset_y: i32,
    pub content_width: i32,
    pub content_height: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
}

impl ScrollState {
    /// Vertical scrollbar thumb as (offset in track, length), or none when
    /// the content fits.
    pub fn thumb(&self) -> Option<(i32, i32)> {
        let track = self.viewport_height;
        if !self.scrollable || track <= 0 || self.content_height <= track {
            return None;
        }
        let len = (track * track / self.content_height).clamp(1, track);
        let (_, max_y) = self.max_scroll();
        let pos = if max_y > 0 {
            self.offset_y * (track - len) / max_y
        } else {
            0
        };
        Some((pos, len))
    }
}
