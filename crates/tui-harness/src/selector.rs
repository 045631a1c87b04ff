//! CSS-style widget selectors.
//!
//! Supported syntax: type names (`Button`, or a custom widget class),
//! `#id`, `.class`, the universal selector `*`, compounds of these
//! (`Button#ok.primary`) and the descendant combinator (whitespace).
//!
//! # Examples
//!
//! ```
//! use tui_harness::selector::Selector;
//!
//! let selector: Selector = "Horizontal Button.primary".parse().unwrap();
//! assert_eq!(selector.to_string(), "Horizontal Button.primary");
//!
//! assert!("Button > Label".parse::<Selector>().is_err());
//! ```

use crate::widget::{NodeId, Widget, WidgetTree};
use std::fmt;
use std::str::FromStr;
use tui_core::Error;

/// One compound selector: every part must match the same widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Type name; `None` for `*` or when omitted
    pub type_name: Option<String>,
    /// Required id
    pub id: Option<String>,
    /// Required classes
    pub classes: Vec<String>,
}

impl Compound {
    /// Whether `widget` satisfies every part.
    #[must_use]
    pub fn matches(&self, widget: &Widget) -> bool {
        if let Some(name) = &self.type_name {
            if widget.type_name != *name && widget.kind.name() != name {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if widget.id.as_ref() != Some(id) {
                return false;
            }
        }
        self.classes.iter().all(|c| widget.has_class(c))
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_name {
            Some(name) => f.write_str(name)?,
            None if self.id.is_none() && self.classes.is_empty() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// A chain of compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// Compounds from outermost to innermost.
    #[must_use]
    pub fn parts(&self) -> &[Compound] {
        &self.parts
    }

    /// Whether the widget at `node` matches.
    ///
    /// The last compound must match `node` itself, each earlier compound
    /// some ancestor, in order.
    #[must_use]
    pub fn matches(&self, tree: &WidgetTree, node: NodeId) -> bool {
        let Some((last, outer)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(tree.get(node)) {
            return false;
        }

        let mut ancestors = tree.ancestors(node);
        outer
            .iter()
            .rev()
            .all(|compound| ancestors.any(|a| compound.matches(tree.get(a))))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::InvalidSelector {
            selector: s.to_string(),
            reason,
        };

        let parts = s
            .split_whitespace()
            .map(|word| parse_compound(word).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        if parts.is_empty() {
            return Err(invalid("empty selector".to_string()));
        }
        Ok(Self { parts })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn parse_compound(word: &str) -> Result<Compound, String> {
    let mut compound = Compound::default();
    let mut rest = word;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else {
        let end = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if end > 0 {
            compound.type_name = Some(rest[..end].to_string());
            rest = &rest[end..];
        }
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
        let name = &body[..end];

        match marker {
            '#' | '.' if name.is_empty() => {
                return Err(format!("expected a name after '{marker}'"));
            }
            '#' if compound.id.is_some() => {
                return Err("a compound selector can name one id".to_string());
            }
            '#' => compound.id = Some(name.to_string()),
            '.' => compound.classes.push(name.to_string()),
            other => return Err(format!("unsupported syntax '{other}'")),
        }
        rest = &body[end..];
    }

    Ok(compound)
}
