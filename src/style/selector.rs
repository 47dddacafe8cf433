//! Selector compilation and matching.
//!
//! Grammar: `tag#id.class1.class2:pseudo`, every part optional, `*` or the
//! empty string for the universal selector. Combinators are not supported.

use std::fmt;

/// Pseudo flags a selector can require.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pseudo {
    /// The node or one of its descendants has focus.
    Focus,
    /// The node is the document's open element.
    Open,
    /// Anything else. Never matches.
    Unknown(String),
}

impl Pseudo {
    fn parse(name: &str) -> Self {
        match name {
            "focus" | "focus-within" => Self::Focus,
            "open" => Self::Open,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Ranking of a selector. Higher wins; ties go to the later rule.
///
/// Packed as ids, then classes, then tag+pseudo, then a universal bit so
/// every valid selector has a nonzero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(u32);

impl Specificity {
    const FIELD: u32 = 0x3ff;

    fn new(ids: usize, classes: usize, others: usize) -> Self {
        let f = |n: usize| (n as u32).min(Self::FIELD);
        Self(f(ids) << 21 | f(classes) << 11 | f(others) << 1 | 1)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// What a selector needs to know about a node.
#[derive(Debug, Clone, Copy)]
pub struct MatchTarget<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    pub class_name: Option<&'a str>,
    pub focus_within: bool,
    pub open: bool,
}

/// A compiled selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: Vec<Pseudo>,
    specificity: Specificity,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Compile a selector. Returns None for syntax this engine does not support.
    pub fn parse(source: &str) -> Option<Self> {
        let text = source.trim();
        let mut tag = None;
        let mut id = None;
        let mut classes = Vec::new();
        let mut pseudo = Vec::new();

        let mut rest = text;
        if let Some(r) = rest.strip_prefix('*') {
            rest = r;
        } else {
            let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
            if end > 0 {
                tag = Some(rest[..end].to_string());
                rest = &rest[end..];
            }
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let end = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
            if end == 0 {
                return None;
            }
            let name = &body[..end];
            match marker {
                '#' if id.is_none() => id = Some(name.to_string()),
                '.' => classes.push(name.to_string()),
                ':' => pseudo.push(Pseudo::parse(name)),
                _ => return None,
            }
            rest = &body[end..];
        }

        let others = usize::from(tag.is_some()) + pseudo.len();
        let specificity = Specificity::new(usize::from(id.is_some()), classes.len(), others);
        Some(Self {
            source: text.to_string(),
            tag,
            id,
            classes,
            pseudo,
            specificity,
        })
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_pseudo(&self) -> bool {
        !self.pseudo.is_empty()
    }

    pub fn matches(&self, target: &MatchTarget<'_>) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != target.tag) {
            return false;
        }
        if self.id.is_some() && self.id.as_deref() != target.id {
            return false;
        }
        if !self.classes.is_empty() {
            let have = target.class_name.unwrap_or("");
            if !self
                .classes
                .iter()
                .all(|c| have.split_whitespace().any(|h| h == c))
            {
                return false;
            }
        }
        self.pseudo.iter().all(|p| match p {
            Pseudo::Focus => target.focus_within,
            Pseudo::Open => target.open,
            Pseudo::Unknown(_) => false,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn target<'a>(tag: &'a str, id: Option<&'a str>, class_name: Option<&'a str>) -> MatchTarget<'a> {
        MatchTarget {
            tag,
            id,
            class_name,
            focus_within: false,
            open: false,
        }
    }

    #[test]
    fn test_parse_full_selector() {
        let sel = Selector::parse("button#ok.primary.wide:focus").unwrap();
        assert_eq!(sel.tag.as_deref(), Some("button"));
        assert_eq!(sel.id.as_deref(), Some("ok"));
        assert_eq!(sel.classes, vec!["primary", "wide"]);
        assert_eq!(sel.pseudo, vec![Pseudo::Focus]);
    }

    #[test]
    fn test_parse_rejects_combinators() {
        assert!(Selector::parse("div > span").is_none());
        assert!(Selector::parse("div span").is_none());
        assert!(Selector::parse("#a#b").is_none());
        assert!(Selector::parse("div.").is_none());
        assert!(Selector::parse("[type=text]").is_none());
    }

    #[test]
    fn test_specificity_ordering() {
        let universal = Selector::parse("*").unwrap().specificity();
        let empty = Selector::parse("").unwrap().specificity();
        let tag = Selector::parse("div").unwrap().specificity();
        let class = Selector::parse(".a").unwrap().specificity();
        let many = Selector::parse("div.a.b.c.d.e.f.g.h.i.j.k:focus").unwrap().specificity();
        let id = Selector::parse("#x").unwrap().specificity();

        assert!(universal.value() > 0);
        assert_eq!(universal, empty);
        assert!(tag > universal);
        assert!(class > Selector::parse("div:focus:open").unwrap().specificity());
        assert!(id > many);
    }

    #[test]
    fn test_match_tag_id_classes() {
        let sel = Selector::parse("span.p-1").unwrap();
        assert!(sel.matches(&target("span", None, Some("menu p-1"))));
        assert!(!sel.matches(&target("span", None, Some("p-10"))));
        assert!(!sel.matches(&target("div", None, Some("p-1"))));

        let sel = Selector::parse("#menu3").unwrap();
        assert!(sel.matches(&target("span", Some("menu3"), None)));
        assert!(!sel.matches(&target("span", Some("menu4"), None)));
        assert!(!sel.matches(&target("span", None, None)));
    }

    #[test]
    fn test_match_pseudo_flags() {
        let sel = Selector::parse("select:open").unwrap();
        let mut t = target("select", None, None);
        assert!(!sel.matches(&t));
        t.open = true;
        assert!(sel.matches(&t));

        let hover = Selector::parse("div:hover").unwrap();
        assert!(!hover.matches(&MatchTarget {
            focus_within: true,
            open: true,
            ..target("div", None, None)
        }));
    }
}
