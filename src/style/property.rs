//! Style property names, values and declaration maps.

use std::collections::{HashMap, HashSet};

use crate::types::{Dimension, Rgba};

// =============================================================================
// Property
// =============================================================================

/// A known style property.
///
/// Names are accepted in camelCase or kebab-case; `padding` and `border`
/// are shorthands and never stored directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Color,
    Background,
    FontWeight,
    FontStyle,
    TextDecoration,
    Display,
    FlexDirection,
    FlexGrow,
    AlignItems,
    AlignSelf,
    Align,
    Justify,
    Position,
    Top,
    Left,
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    BorderColor,
    ZIndex,
    Overflow,
    Cursor,
}

/// Shorthands expanding to four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    Padding,
    Border,
}

impl Shorthand {
    /// Per-side properties in (top, right, bottom, left) order.
    pub const fn sides(&self) -> [Property; 4] {
        match self {
            Self::Padding => [
                Property::PaddingTop,
                Property::PaddingRight,
                Property::PaddingBottom,
                Property::PaddingLeft,
            ],
            Self::Border => [
                Property::BorderTop,
                Property::BorderRight,
                Property::BorderBottom,
                Property::BorderLeft,
            ],
        }
    }
}

/// Result of looking up a declaration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyName {
    Longhand(Property),
    Shorthand(Shorthand),
}

fn canonical(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl PropertyName {
    pub fn parse(name: &str) -> Option<Self> {
        use Property::*;
        let prop = match canonical(name).as_str() {
            "padding" => return Some(Self::Shorthand(Shorthand::Padding)),
            "border" => return Some(Self::Shorthand(Shorthand::Border)),
            "color" | "foreground" => Color,
            "background" | "backgroundcolor" => Background,
            "fontweight" => FontWeight,
            "fontstyle" => FontStyle,
            "textdecoration" => TextDecoration,
            "display" => Display,
            "flexdirection" => FlexDirection,
            "flexgrow" => FlexGrow,
            "alignitems" => AlignItems,
            "alignself" => AlignSelf,
            "align" => Align,
            "justify" | "justifycontent" => Justify,
            "position" => Position,
            "top" => Top,
            "left" => Left,
            "width" => Width,
            "height" => Height,
            "minwidth" => MinWidth,
            "minheight" => MinHeight,
            "maxwidth" => MaxWidth,
            "maxheight" => MaxHeight,
            "paddingtop" => PaddingTop,
            "paddingright" => PaddingRight,
            "paddingbottom" => PaddingBottom,
            "paddingleft" => PaddingLeft,
            "bordertop" => BorderTop,
            "borderright" => BorderRight,
            "borderbottom" => BorderBottom,
            "borderleft" => BorderLeft,
            "bordercolor" => BorderColor,
            "zindex" => ZIndex,
            "overflow" => Overflow,
            "cursor" => Cursor,
            _ => return None,
        };
        Some(Self::Longhand(prop))
    }
}

impl Property {
    /// Properties that fall back to the parent's value when unset.
    pub const fn is_inheritable(&self) -> bool {
        matches!(
            self,
            Self::Color | Self::Background | Self::FontWeight | Self::FontStyle | Self::TextDecoration
        )
    }
}

// =============================================================================
// StyleValue
// =============================================================================

/// A declared style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Whole cells, or a plain integer (z-index, grow).
    Int(i32),
    Number(f64),
    Percent(f32),
    /// Lowercased keyword or color text.
    Keyword(String),
}

impl StyleValue {
    /// Parse a textual value: `"50%"`, `"3"`, `"1.5"` or a keyword.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(pct) = text.strip_suffix('%') {
            if let Ok(p) = pct.trim().parse::<f32>() {
                return Self::Percent(p);
            }
        }
        if let Ok(i) = text.parse::<i32>() {
            return Self::Int(i);
        }
        if let Ok(n) = text.parse::<f64>() {
            return Self::Number(n);
        }
        Self::Keyword(text.to_lowercase())
    }

    pub fn as_dimension(&self) -> Option<Dimension> {
        match self {
            Self::Int(i) => Some(Dimension::Cells(*i)),
            Self::Number(n) => Some(Dimension::Cells(n.floor() as i32)),
            Self::Percent(p) => Some(Dimension::Percent(*p)),
            Self::Keyword(k) if k == "auto" => Some(Dimension::Auto),
            Self::Keyword(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Number(n) => Some(n.floor() as i32),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        self.as_keyword().and_then(Rgba::parse)
    }

    /// Integers for a four-sided shorthand: an int, or space separated ints.
    fn side_values(&self) -> Option<Vec<i32>> {
        match self {
            Self::Int(i) => Some(vec![*i]),
            Self::Number(n) => Some(vec![n.floor() as i32]),
            Self::Keyword(k) => k.split_whitespace().map(|v| v.parse().ok()).collect(),
            Self::Percent(_) => None,
        }
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        Self::parse(v)
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        Self::parse(&v)
    }
}

/// Expand 1-4 shorthand values into (top, right, bottom, left).
pub fn expand_sides(values: &[i32]) -> Option<[i32; 4]> {
    match *values {
        [a] => Some([a, a, a, a]),
        [a, b] => Some([a, b, a, b]),
        [a, b, c] => Some([a, b, c, b]),
        [a, b, c, d] => Some([a, b, c, d]),
        _ => None,
    }
}

// =============================================================================
// StyleMap
// =============================================================================

/// A flat property → value declaration map.
///
/// Shorthands expand on insertion. A side declared explicitly keeps its
/// value even if a shorthand is declared after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    values: HashMap<Property, StyleValue>,
    explicit: HashSet<Property>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prop: Property) -> Option<&StyleValue> {
        self.values.get(&prop)
    }

    pub fn set(&mut self, prop: Property, value: impl Into<StyleValue>) {
        self.explicit.insert(prop);
        self.values.insert(prop, value.into());
    }

    pub fn remove(&mut self, prop: Property) -> Option<StyleValue> {
        self.explicit.remove(&prop);
        self.values.remove(&prop)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &StyleValue)> {
        self.values.iter().map(|(p, v)| (*p, v))
    }

    /// Declare a property by name.
    ///
    /// Returns false when the name is unknown or a shorthand value is
    /// malformed; nothing is stored in that case.
    pub fn declare(&mut self, name: &str, value: impl Into<StyleValue>) -> bool {
        let value = value.into();
        match PropertyName::parse(name) {
            Some(PropertyName::Longhand(prop)) => {
                self.set(prop, value);
                true
            }
            Some(PropertyName::Shorthand(shorthand)) => {
                let Some(sides) = value.side_values().as_deref().and_then(expand_sides) else {
                    tracing::warn!(name, ?value, "malformed shorthand value ignored");
                    return false;
                };
                for (prop, v) in shorthand.sides().into_iter().zip(sides) {
                    if !self.explicit.contains(&prop) {
                        self.values.insert(prop, StyleValue::Int(v));
                    }
                }
                true
            }
            None => {
                tracing::warn!(name, "unknown style property ignored");
                false
            }
        }
    }
}

impl<K: AsRef<str>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.declare(name.as_ref(), value);
        }
        map
    }
}

// =============================================================================
// Tests
// =============================================================================
