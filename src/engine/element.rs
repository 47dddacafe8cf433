//! Declarative render output.
//!
//! A render function returns a [`Child`]: elements, strings, numbers,
//! booleans, options and nested lists all convert into one. [`normalize`]
//! turns that into the canonical flat list of elements the reconciler
//! consumes.

use std::fmt;
use std::rc::Rc;

use super::component::Component;
use super::props::{Handler, Props, handler};
use super::value::Value;
use crate::error::HandlerResult;
use crate::state::{Event, EventContext, EventKind};
use crate::style::StyleValue;

/// Tag used for text leaves.
pub const TEXT_TAG: &str = "Text";

/// Text leaf content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextContent {
    pub text: String,
    /// Produced from a literal `true`. Occupies no space.
    pub marker: bool,
}

/// What an element becomes once mounted.
#[derive(Clone)]
pub enum ElementKind {
    /// A plain container; its children are the declared children.
    Host,
    Text(TextContent),
    /// A component; declared children are handed to its render function.
    Component(Rc<dyn Component>),
}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str("Host"),
            Self::Text(t) => f.debug_tuple("Text").field(&t.text).finish(),
            Self::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
        }
    }
}

/// One described node.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) kind: ElementKind,
    pub(crate) props: Props,
    pub(crate) children: Vec<Child>,
}

/// Anything a render function may return.
#[derive(Debug, Clone, Default)]
pub enum Child {
    Element(Element),
    Text(String),
    Bool(bool),
    List(Vec<Child>),
    #[default]
    Empty,
}

// =============================================================================
// Constructors
// =============================================================================

/// A host element with the given tag.
pub fn el(tag: impl Into<String>) -> Element {
    Element {
        tag: tag.into(),
        kind: ElementKind::Host,
        props: Props::default(),
        children: Vec::new(),
    }
}

pub fn div() -> Element {
    el("div")
}

pub fn span() -> Element {
    el("span")
}

pub fn button() -> Element {
    el("button")
}

/// A text leaf.
pub fn text(content: impl Into<String>) -> Element {
    Element {
        tag: TEXT_TAG.to_string(),
        kind: ElementKind::Text(TextContent {
            text: content.into(),
            marker: false,
        }),
        props: Props::default(),
        children: Vec::new(),
    }
}

/// An element rendered by a component.
pub fn component(c: impl Component + 'static) -> Element {
    Element {
        tag: c.name().to_string(),
        kind: ElementKind::Component(Rc::new(c)),
        props: Props::default(),
        children: Vec::new(),
    }
}

fn marker() -> Element {
    let mut e = text("");
    if let ElementKind::Text(t) = &mut e.kind {
        t.marker = true;
    }
    e
}

// =============================================================================
// Builder
// =============================================================================

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.props.id = Some(id.into());
        self
    }

    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.props.class_name = Some(class_name.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.props.key = Some(key.into());
        self
    }

    /// Declare an inline style property. Shorthands expand; unknown names are dropped.
    pub fn style(mut self, name: &str, value: impl Into<StyleValue>) -> Self {
        self.props.style.declare(name, value);
        self
    }

    pub fn cursor(mut self, x: i32, y: i32) -> Self {
        self.props.cursor = Some((x, y));
        self
    }

    /// Set a widget-specific prop.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.extra.insert(name.into(), value.into());
        self
    }

    pub fn on<F>(mut self, kind: EventKind, f: F) -> Self
    where
        F: Fn(&mut Event, &mut EventContext<'_>) -> HandlerResult + 'static,
    {
        self.props.handlers.set(kind, handler(f));
        self
    }

    pub fn on_handler(mut self, kind: EventKind, h: Handler) -> Self {
        self.props.handlers.set(kind, h);
        self
    }

    pub fn on_click<F>(self, f: F) -> Self
    where
        F: Fn(&mut Event, &mut EventContext<'_>) -> HandlerResult + 'static,
    {
        self.on(EventKind::Click, f)
    }

    pub fn on_keypress<F>(self, f: F) -> Self
    where
        F: Fn(&mut Event, &mut EventContext<'_>) -> HandlerResult + 'static,
    {
        self.on(EventKind::KeyPress, f)
    }

    pub fn on_change<F>(self, f: F) -> Self
    where
        F: Fn(&mut Event, &mut EventContext<'_>) -> HandlerResult + 'static,
    {
        self.on(EventKind::Change, f)
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Structural equality, used to detect changed component children.
    pub(crate) fn same_as(&self, other: &Element) -> bool {
        let kinds_match = match (&self.kind, &other.kind) {
            (ElementKind::Host, ElementKind::Host) => true,
            (ElementKind::Text(a), ElementKind::Text(b)) => a == b,
            (ElementKind::Component(_), ElementKind::Component(_)) => true,
            _ => false,
        };
        kinds_match
            && self.tag == other.tag
            && self.props.same_as(&other.props)
            && children_same(&self.children, &other.children)
    }
}

impl Child {
    pub(crate) fn same_as(&self, other: &Child) -> bool {
        match (self, other) {
            (Self::Element(a), Self::Element(b)) => a.same_as(b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::List(a), Self::List(b)) => children_same(a, b),
            (Self::Empty, Self::Empty) => true,
            _ => false,
        }
    }
}

pub(crate) fn children_same(a: &[Child], b: &[Child]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Element> for Child {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Child {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! child_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Child {
            fn from(n: $t) -> Self {
                Self::Text(n.to_string())
            }
        })*
    };
}

child_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Element> for Child {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Child::Element).collect())
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Flatten a render result into the canonical element list.
///
/// Lists flatten, `true` becomes a marker text leaf, `false` and empty
/// values are skipped, and strings become text leaves.
pub fn normalize(child: Child) -> Vec<Element> {
    let mut out = Vec::new();
    normalize_into(child, &mut out);
    out
}

pub fn normalize_all(children: Vec<Child>) -> Vec<Element> {
    let mut out = Vec::new();
    for child in children {
        normalize_into(child, &mut out);
    }
    out
}

fn normalize_into(child: Child, out: &mut Vec<Element>) {
    match child {
        Child::Element(e) => out.push(e),
        Child::Text(s) => out.push(text(s)),
        Child::Bool(true) => out.push(marker()),
        Child::Bool(false) | Child::Empty => {}
        Child::List(items) => {
            for item in items {
                normalize_into(item, out);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(elements: &[Element]) -> Vec<&str> {
        elements.iter().map(|e| e.tag()).collect()
    }

    #[test]
    fn test_normalize_flattens_and_converts() {
        let out = normalize(Child::from(vec![
            Child::from("a"),
            Child::from(vec![Child::from(div()), Child::from(42)]),
            Child::from(false),
            Child::from(None::<Element>),
            Child::from(true),
        ]));
        assert_eq!(tags(&out), vec!["Text", "div", "Text", "Text"]);
        match &out[2].kind {
            ElementKind::Text(t) => assert_eq!(t.text, "42"),
            other => panic!("expected text, got {other:?}"),
        }
        match &out[3].kind {
            ElementKind::Text(t) => assert!(t.marker && t.text.is_empty()),
            other => panic!("expected marker, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_sets_props() {
        let e = span()
            .id("menu1")
            .class("p-1")
            .key("k")
            .style("zIndex", 10)
            .prop("label", "File")
            .on_click(|_, _| Ok(()))
            .child("Menu1");
        assert_eq!(e.props.id.as_deref(), Some("menu1"));
        assert_eq!(e.props.classes().collect::<Vec<_>>(), vec!["p-1"]);
        assert_eq!(e.props.key.as_deref(), Some("k"));
        assert!(e.props.handlers.contains(EventKind::Click));
        assert_eq!(e.props.get("label"), Some(&Value::from("File")));
        assert_eq!(e.children.len(), 1);
    }

    #[test]
    fn test_same_as_ignores_handler_identity() {
        let a = div().on_click(|_, _| Ok(())).child("x");
        let b = div().on_click(|_, _| Ok(())).child("x");
        let c = div().child("y");
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }
}
