//! Core types for retui.
//!
//! These are the plain values every stage of the pipeline agrees on:
//! colors and font modifiers for painting, dimensions for layout, and the
//! rectangles used for geometry and clipping.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Special value: r=-1 means "terminal default" (let terminal pick),
/// r=-2 marks an ANSI palette index stored in `g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TERMINAL_DEFAULT
    }
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(0x77, 0x77, 0x77);

    /// Create an ANSI palette color (0-255).
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if this is an ANSI palette color.
    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// ```
    /// use retui::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::RED));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let d = c.to_digit(16)? as u8;
                    *slot = d << 4 | d;
                }
                Some(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Look up one of the basic color names.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "cyan" => Self::CYAN,
            "magenta" => Self::MAGENTA,
            "grey" | "gray" => Self::GRAY,
            _ => return None,
        };
        Some(color)
    }

    /// Parse a color from hex, a basic name or the `default` keyword.
    ///
    /// ```
    /// use retui::types::Rgba;
    ///
    /// assert_eq!(Rgba::parse("Blue"), Some(Rgba::BLUE));
    /// assert!(Rgba::parse("default").unwrap().is_terminal_default());
    /// assert!(Rgba::parse("invalid-color").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        if lower == "default" {
            return Some(Self::TERMINAL_DEFAULT);
        }
        if let Some(color) = Self::named(&lower) {
            return Some(color);
        }
        if input.starts_with('#') || input.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(input);
        }
        None
    }
}

// =============================================================================
// Dimension - Supports absolute and percentage values
// =============================================================================

/// A dimension value that can be absolute (cells) or percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Content-determined.
    #[default]
    Auto,
    /// Absolute size in terminal cells.
    Cells(i32),
    /// Percentage of the parent extent (0-100).
    Percent(f32),
}

impl Dimension {
    /// Resolve against the parent extent. `Auto` has no value.
    pub fn resolve(&self, parent: i32) -> Option<i32> {
        match *self {
            Self::Auto => None,
            Self::Cells(n) => Some(n),
            Self::Percent(p) => Some(((parent.max(0) as f32) * p / 100.0).floor() as i32),
        }
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        Self::Cells(value)
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Font modifiers as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Rect / ClipRect
// =============================================================================

/// An axis-aligned rectangle in cell coordinates.
///
/// Signed so that scrolled content can sit above or left of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A clipping rectangle. An empty clip rejects every write.
pub type ClipRect = Rect;

// =============================================================================
// Sides
// =============================================================================

/// Per-side extents (padding, border presence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Sides {
    pub const ZERO: Self = Self::all(0);

    pub const fn all(v: i32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn from_array([top, right, bottom, left]: [i32; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    pub fn add(&self, other: &Sides) -> Sides {
        Sides {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }

    /// Shrink a rectangle by these extents, never below zero size.
    pub fn inset(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.left,
            rect.y + self.top,
            (rect.width - self.horizontal()).max(0),
            (rect.height - self.vertical()).max(0),
        )
    }
}

// =============================================================================
// Border glyphs
// =============================================================================

/// Box-drawing glyphs for one border weight.
///
/// Order: left, top-left, top, top-right, bottom-left, bottom, bottom-right, right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub left: char,
    pub top_left: char,
    pub top: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom: char,
    pub bottom_right: char,
    pub right: char,
}

impl BorderGlyphs {
    const fn from_str8(s: [char; 8]) -> Self {
        Self {
            left: s[0],
            top_left: s[1],
            top: s[2],
            top_right: s[3],
            bottom_left: s[4],
            bottom: s[5],
            bottom_right: s[6],
            right: s[7],
        }
    }

    pub const THIN: Self = Self::from_str8(['│', '┌', '─', '┐', '└', '─', '┘', '│']);
    pub const HEAVY: Self = Self::from_str8(['┃', '┏', '━', '┓', '┗', '━', '┛', '┃']);
    pub const DOUBLE: Self = Self::from_str8(['║', '╔', '═', '╗', '╚', '═', '╝', '║']);
    pub const BLOCK: Self = Self::from_str8(['▐', '▛', '▀', '▜', '▙', '▄', '▟', '▌']);

    /// Select the glyph set for a border width: 1=thin, 2=heavy, 3=double, >=4=block.
    pub const fn for_width(width: i32) -> Self {
        match width {
            i32::MIN..=1 => Self::THIN,
            2 => Self::HEAVY,
            3 => Self::DOUBLE,
            _ => Self::BLOCK,
        }
    }
}

// =============================================================================
// Layout keywords
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

impl FlexDirection {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "column" => Some(Self::Column),
            "row" => Some(Self::Row),
            _ => None,
        }
    }

    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

/// Box algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Flex,
    Block,
    None,
}

impl Display {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "flex" => Some(Self::Flex),
            "block" | "inline" | "inline-block" => Some(Self::Block),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Start/center/end placement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "start" | "flex-start" | "left" | "top" | "stretch" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" | "flex-end" | "right" | "bottom" => Some(Self::End),
            _ => None,
        }
    }

    /// Offset of an item of `size` inside an extent of `space`.
    #[inline]
    pub fn offset(&self, space: i32, size: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (space - size) / 2,
            Self::End => space - size,
        }
    }
}

/// Position mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

impl Position {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "relative" | "static" => Some(Self::Relative),
            "absolute" | "fixed" => Some(Self::Absolute),
            _ => None,
        }
    }
}

/// Overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

impl Overflow {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "visible" => Some(Self::Visible),
            "hidden" => Some(Self::Hidden),
            "scroll" | "auto" => Some(Self::Scroll),
            _ => None,
        }
    }

    pub const fn is_scrollable(&self) -> bool {
        matches!(self, Self::Scroll)
    }

    pub const fn clips(&self) -> bool {
        !matches!(self, Self::Visible)
    }
}

// =============================================================================
// Tests
// =============================================================================
