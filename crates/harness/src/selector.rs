//! Structured DOM selectors
//!
//! Scenarios address elements through attribute-based selectors (`aria-label`,
//! `data-cy`, element ids) rather than ad hoc query strings. Building them as
//! values lets the runner validate every selector before a browser is ever
//! launched, and keeps the rendered CSS form in one place.

use std::fmt;

use crate::error::{HarnessError, HarnessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrMatch {
    Exact,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrFilter {
    name: String,
    value: String,
    mode: AttrMatch,
}

/// A declarative element selector that renders to a CSS query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrFilter>,
    only_enabled: bool,
    descendant: Option<Box<Selector>>,
}

impl Selector {
    fn empty() -> Self {
        Self {
            tag: None,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            only_enabled: false,
            descendant: None,
        }
    }

    /// Select by element tag, e.g. `li`
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::empty()
        }
    }

    /// Select by element id, rendered as `#id`
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::empty()
        }
    }

    /// Select by class name, rendered as `.class`
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Self::empty()
        }
    }

    /// Select by exact attribute value, rendered as `[name="value"]`
    pub fn attr(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::empty().and_attr(name, value)
    }

    pub fn and_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(AttrFilter {
            name: name.into(),
            value: value.into(),
            mode: AttrMatch::Exact,
        });
        self
    }

    pub fn and_attr_contains(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(AttrFilter {
            name: name.into(),
            value: value.into(),
            mode: AttrMatch::Contains,
        });
        self
    }

    pub fn and_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Restrict to enabled elements, rendered as `:enabled`
    pub fn enabled(mut self) -> Self {
        self.only_enabled = true;
        self
    }

    /// Match `child` anywhere under this selector (descendant combinator)
    pub fn descendant(mut self, child: Selector) -> Self {
        // Chain onto the innermost scope so a.descendant(b).descendant(c)
        // renders "a b c".
        match self.descendant {
            Some(ref mut existing) => {
                let inner = std::mem::replace(existing.as_mut(), Selector::empty());
                **existing = inner.descendant(child);
            }
            None => self.descendant = Some(Box::new(child)),
        }
        self
    }

    /// Reject selectors that would render to malformed or ambiguous CSS
    pub fn validate(&self) -> HarnessResult<()> {
        let bare = |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || "\"'\\#.[]".contains(c));

        if let Some(tag) = &self.tag {
            if !bare(tag) {
                return Err(HarnessError::InvalidSelector(format!("bad tag {tag:?}")));
            }
        }
        if let Some(id) = &self.id {
            if !bare(id) {
                return Err(HarnessError::InvalidSelector(format!("bad id {id:?}")));
            }
        }
        for class in &self.classes {
            if !bare(class) {
                return Err(HarnessError::InvalidSelector(format!("bad class {class:?}")));
            }
        }
        for attr in &self.attrs {
            if !bare(&attr.name) {
                return Err(HarnessError::InvalidSelector(format!(
                    "bad attribute name {:?}",
                    attr.name
                )));
            }
            if attr.value.contains(['"', '\\']) {
                return Err(HarnessError::InvalidSelector(format!(
                    "bad attribute value {:?}",
                    attr.value
                )));
            }
        }
        if self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty() {
            return Err(HarnessError::InvalidSelector("empty selector".to_string()));
        }
        if let Some(child) = &self.descendant {
            child.validate()?;
        }
        Ok(())
    }

    /// Render to the CSS query the browser receives
    pub fn css(&self) -> String {
        let mut out = String::new();
        if let Some(tag) = &self.tag {
            out.push_str(tag);
        }
        if let Some(id) = &self.id {
            out.push('#');
            out.push_str(id);
        }
        for class in &self.classes {
            out.push('.');
            out.push_str(class);
        }
        for attr in &self.attrs {
            match attr.mode {
                AttrMatch::Exact => {
                    out.push_str(&format!("[{}=\"{}\"]", attr.name, attr.value));
                }
                AttrMatch::Contains => {
                    out.push_str(&format!("[{}*=\"{}\"]", attr.name, attr.value));
                }
            }
        }
        if self.only_enabled {
            out.push_str(":enabled");
        }
        if let Some(child) = &self.descendant {
            out.push(' ');
            out.push_str(&child.css());
        }
        out
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn renders_attribute_forms() {
        let add = Selector::tag("a").and_attr("aria-label", "Add");
        assert_eq!(add.css(), "a[aria-label=\"Add\"]");

        let search = Selector::tag("input").and_attr_contains("aria-label", "Search");
        assert_eq!(search.css(), "input[aria-label*=\"Search\"]");
    }

    #[test]
    fn renders_checkbox_with_enabled_filter() {
        let sel = Selector::tag("input")
            .and_attr("id", "select-organization-42")
            .and_attr("type", "checkbox")
            .enabled();
        assert_eq!(
            sel.css(),
            "input[id=\"select-organization-42\"][type=\"checkbox\"]:enabled"
        );
    }

    #[test]
    fn renders_descendants_left_to_right() {
        let rows = Selector::attr("aria-label", "Organizations List").descendant(Selector::tag("li"));
        assert_eq!(rows.css(), "[aria-label=\"Organizations List\"] li");

        let nested = Selector::class("pf-c-empty-state")
            .descendant(Selector::class("pf-c-empty-state__body"))
            .descendant(Selector::tag("strong"));
        assert_eq!(nested.css(), ".pf-c-empty-state .pf-c-empty-state__body strong");
    }

    #[test]
    fn renders_id_and_class() {
        assert_eq!(Selector::id("org-name").css(), "#org-name");
        assert_eq!(Selector::class("pf-c-expandable__content").css(), ".pf-c-expandable__content");
        assert_eq!(
            Selector::tag("dd").and_attr_contains("data-cy", "name").css(),
            "dd[data-cy*=\"name\"]"
        );
    }

    #[test_case(Selector::id("org-name") => true; "plain id")]
    #[test_case(Selector::attr("aria-label", "confirm delete") => true; "space in value")]
    #[test_case(Selector::attr("aria-label", "x\"y") => false; "quote in value")]
    #[test_case(Selector::tag("a b") => false; "space in tag")]
    #[test_case(Selector::empty() => false; "empty selector")]
    fn validation(sel: Selector) -> bool {
        sel.validate().is_ok()
    }
}
