//! Compiled stylesheets.
//!
//! A stylesheet is an ordered list of rules. Ingestion accepts a nested
//! selector → property table; nested tables keyed by a pseudo flag
//! (`":focus"`) are flattened into their own rule right after the parent.

use std::fmt;

use toml::{Table, Value as TomlValue};

use super::property::{StyleMap, StyleValue};
use super::selector::{MatchTarget, Selector};
use super::Property;
use crate::error::{Error, Result};

/// Rules every document starts from. Caller rules are appended after these,
/// so equal-specificity ties favor the caller.
pub const BASE_STYLESHEET: &str = r#"
[span]
flex-direction = "row"

[p]
display = "block"

[button]
padding = "0 1"

[button.":focus"]
text-decoration = "reverse"

[input]
text-decoration = "underline"
min-width = 1
"#;

/// A compiled selector plus its declarations.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: Selector,
    pub declarations: StyleMap,
}

#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// An empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stylesheet holding the built-in base rules.
    pub fn with_base() -> Result<Self> {
        let mut sheet = Self::new();
        sheet.add_toml_str(BASE_STYLESHEET)?;
        Ok(sheet)
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile and append one rule.
    ///
    /// Returns false, after logging, if the selector is invalid; the rule
    /// is skipped and the stylesheet is left unchanged.
    pub fn add_rule<K, V>(&mut self, selector: &str, declarations: impl IntoIterator<Item = (K, V)>) -> bool
    where
        K: AsRef<str>,
        V: Into<StyleValue>,
    {
        self.push(selector, declarations.into_iter().collect())
    }

    fn push(&mut self, selector: &str, declarations: StyleMap) -> bool {
        match Selector::parse(selector) {
            Some(selector) => {
                self.rules.push(StyleRule {
                    selector,
                    declarations,
                });
                true
            }
            None => {
                tracing::warn!(selector, "invalid selector, rule skipped");
                false
            }
        }
    }

    /// Append every rule of another stylesheet.
    pub fn extend(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
    }

    /// Parse TOML text and append its rules in declaration order.
    pub fn add_toml_str(&mut self, source: &str) -> Result<()> {
        let table: Table = toml::from_str(source)?;
        self.add_table(&table)
    }

    /// Append rules from a selector → declarations table.
    ///
    /// All or nothing: on a shape error no rule of `table` is kept.
    pub fn add_table(&mut self, table: &Table) -> Result<()> {
        let mut staged = Stylesheet::new();
        for (selector, body) in table {
            let TomlValue::Table(body) = body else {
                return Err(Error::StylesheetShape {
                    selector: selector.clone(),
                });
            };
            staged.add_rule_table(selector, body)?;
        }
        self.extend(staged);
        Ok(())
    }

    fn add_rule_table(&mut self, selector: &str, body: &Table) -> Result<()> {
        let mut declarations = StyleMap::new();
        let mut nested = Vec::new();

        for (name, value) in body {
            match value {
                TomlValue::Table(sub) if name.starts_with(':') => nested.push((name, sub)),
                TomlValue::Table(_) => {
                    return Err(Error::StylesheetShape {
                        selector: format!("{selector} {name}"),
                    });
                }
                other => match toml_to_style(other) {
                    Some(v) => {
                        declarations.declare(name, v);
                    }
                    None => tracing::warn!(selector, name, "unsupported value type ignored"),
                },
            }
        }

        self.push(selector, declarations);
        for (pseudo, sub) in nested {
            self.add_rule_table(&format!("{selector}{pseudo}"), sub)?;
        }
        Ok(())
    }

    /// Best declaration for `prop` among the rules matching `target`.
    ///
    /// Highest specificity wins; among equals the later rule wins.
    pub fn lookup(&self, target: &MatchTarget<'_>, prop: Property) -> Option<&StyleValue> {
        let mut best: Option<(u32, &StyleValue)> = None;
        for rule in &self.rules {
            let Some(value) = rule.declarations.get(prop) else {
                continue;
            };
            let score = rule.selector.specificity().value();
            if best.is_some_and(|(s, _)| score < s) {
                continue;
            }
            if rule.selector.matches(target) {
                best = Some((score, value));
            }
        }
        best.map(|(_, v)| v)
    }
}

fn toml_to_style(value: &TomlValue) -> Option<StyleValue> {
    match value {
        TomlValue::Integer(i) => Some(StyleValue::Int((*i).clamp(i32::MIN as i64, i32::MAX as i64) as i32)),
        TomlValue::Float(f) => Some(StyleValue::Number(*f)),
        TomlValue::String(s) => Some(StyleValue::parse(s)),
        TomlValue::Array(items) => {
            let parts: Option<Vec<String>> = items
                .iter()
                .map(|v| v.as_integer().map(|i| i.to_string()))
                .collect();
            parts.map(|p| StyleValue::Keyword(p.join(" ")))
        }
        _ => None,
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{} ({} declarations)", rule.selector, rule.declarations.len())?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
