//! Declarative markup trees.
//!
//! A [`Markup`] value is what a calculator's render function returns. It is
//! inert until [`Document::set_children`](super::Document::set_children)
//! or [`Document::append`](super::Document::append) turns it into nodes.

use serde::{Deserialize, Serialize};

/// A markup node: an element with children, or a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Markup {
    Element(ElementSpec),
    Text(String),
}

/// Element description used by the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub value: Option<String>,
    pub checked: bool,
    pub hidden: bool,
    pub children: Vec<Markup>,
}

/// Start an element.
pub fn el(tag: &str) -> ElementSpec {
    ElementSpec {
        tag: tag.to_ascii_lowercase(),
        ..ElementSpec::default()
    }
}

/// A text run.
pub fn text(content: impl Into<String>) -> Markup {
    Markup::Text(content.into())
}

impl ElementSpec {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Set an attribute.
    ///
    /// `id`, `class`, `value`, `checked`, `hidden` and a `display: none`
    /// style map onto the dedicated element fields instead of the
    /// attribute list.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "id" => self.id = Some(value),
            "class" => return self.class(&value),
            "value" => self.value = Some(value),
            "checked" => self.checked = true,
            "hidden" => self.hidden = true,
            "style" if is_display_none(&value) => self.hidden = true,
            _ => {
                if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
                    slot.1 = value;
                } else {
                    self.attrs.push((name, value));
                }
            }
        }
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Markup::Text(content.into()));
        self
    }
}

impl From<ElementSpec> for Markup {
    fn from(spec: ElementSpec) -> Self {
        Markup::Element(spec)
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Markup::Text(s.to_string())
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Markup::Text(s)
    }
}

fn is_display_none(style: &str) -> bool {
    style.split(';').any(|decl| {
        let mut parts = decl.splitn(2, ':');
        let prop = parts.next().unwrap_or("").trim();
        let val = parts.next().unwrap_or("").trim();
        prop.eq_ignore_ascii_case("display") && val.eq_ignore_ascii_case("none")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_routes_special_attributes() {
        let spec = el("DIV")
            .attr("id", "box")
            .attr("class", "a b")
            .class("b c")
            .attr("style", "display: none;")
            .attr("data-calc-id", "x");
        assert_eq!(spec.tag, "div");
        assert_eq!(spec.id.as_deref(), Some("box"));
        assert_eq!(spec.classes, vec!["a", "b", "c"]);
        assert!(spec.hidden);
        assert_eq!(spec.attrs, vec![("data-calc-id".to_string(), "x".to_string())]);
    }

    #[test]
    fn test_children_accept_text_and_elements() {
        let spec = el("p").text("Hello ").child(el("strong").text("world"));
        assert_eq!(spec.children.len(), 2);
        assert!(matches!(spec.children[0], Markup::Text(ref t) if t == "Hello "));
    }
}
