//! Document → widget renderer for the calculator display.
//!
//! Walks the mounted calculator's subtree and maps each element onto the
//! closest iced widget. Hidden subtrees are skipped. Interactive elements
//! route their events by element id (inputs, selects, checkboxes) or by
//! node handle (buttons).

use std::fmt;

use iced::widget::{
    button, checkbox, column, container, pick_list, rule, scrollable, slider, text, text_input, Column, Row,
};
use iced::{Element, Length, Padding};

use calc_core::dom::{Document, Element as DomElement, NodeData, NodeId};

use crate::app::Message;

const BODY_SIZE: u32 = 13;

/// Inline tags whose content collapses into a single text run.
const INLINE_TAGS: &[&str] = &["strong", "em", "b", "i", "span", "code", "small", "sup", "sub", "a"];

/// One option of a `<select>`, shown by label and reported by value.
#[derive(Debug, Clone, PartialEq)]
struct Choice {
    value: String,
    label: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Render the display area (`#calculator-display`).
pub fn view_display(doc: &Document, display: Option<NodeId>) -> Element<'_, Message> {
    let content = match display {
        Some(node) => children(doc, node),
        None => column![text("Nothing to display").size(BODY_SIZE)],
    };

    container(scrollable(content.padding(12)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn children(doc: &Document, node: NodeId) -> Column<'_, Message> {
    Column::with_children(doc.children(node).iter().filter_map(|c| view_node(doc, *c))).spacing(6)
}

fn view_node(doc: &Document, node: NodeId) -> Option<Element<'_, Message>> {
    let element = match &doc.get(node)?.data {
        NodeData::Text(t) => {
            let t = t.trim();
            return (!t.is_empty()).then(|| text(t).size(BODY_SIZE).into());
        }
        NodeData::Element(e) => e,
    };
    if element.hidden {
        return None;
    }

    let widget: Element<'_, Message> = match element.tag.as_str() {
        "h1" | "h2" => text(doc.text_content(node)).size(22).into(),
        "h3" => text(doc.text_content(node)).size(16).into(),
        "h4" => text(doc.text_content(node)).size(14).into(),
        "hr" => rule::horizontal(1).into(),
        "br" => return None,
        "button" => view_button(doc, node, element),
        "input" => view_input(element, None)?,
        "select" => view_select(doc, node, element)?,
        "label" => view_label(doc, node)?,
        "tr" => Row::with_children(doc.children(node).iter().filter_map(|c| view_node(doc, *c)))
            .spacing(16)
            .into(),
        _ if is_inline_only(doc, node) => {
            let content = doc.text_content(node);
            let content = content.trim();
            if content.is_empty() {
                return None;
            }
            text(content.to_string()).size(BODY_SIZE).into()
        }
        _ if element.has_class("result-content") => container(children(doc, node))
            .padding(10)
            .width(Length::Fill)
            .style(container::rounded_box)
            .into(),
        _ => children(doc, node).into(),
    };
    Some(widget)
}

/// True when `node` holds only text and inline markup.
fn is_inline_only(doc: &Document, node: NodeId) -> bool {
    doc.descendants(node).into_iter().all(|n| match doc.element(n) {
        Some(e) => INLINE_TAGS.contains(&e.tag.as_str()),
        None => true,
    })
}

fn view_button<'a>(doc: &'a Document, node: NodeId, element: &DomElement) -> Element<'a, Message> {
    let label = doc.text_content(node).trim().to_string();
    let style = if element.has_class("calculate-btn") {
        button::primary
    } else {
        button::secondary
    };
    let mut widget = button(text(label).size(BODY_SIZE))
        .padding(Padding::from([4, 10]))
        .style(style);
    if element.attr("disabled").is_none() {
        widget = widget.on_press(Message::Click(node));
    }
    widget.into()
}

/// A label wrapping a checkbox or radio becomes that control with the
/// label's text; any other label is plain text.
fn view_label(doc: &Document, node: NodeId) -> Option<Element<'_, Message>> {
    let label = doc.text_content(node).trim().to_string();
    let toggle = doc
        .children(node)
        .iter()
        .filter_map(|c| doc.element(*c))
        .find(|e| e.tag == "input" && matches!(e.attr("type"), Some("checkbox" | "radio")));
    match toggle {
        Some(input) => view_input(input, Some(label)),
        None if label.is_empty() => None,
        None => Some(text(label).size(BODY_SIZE).into()),
    }
}

fn view_input<'a>(element: &DomElement, label: Option<String>) -> Option<Element<'a, Message>> {
    let id = element.id.clone()?;
    let widget = match element.attr("type").unwrap_or("text") {
        "checkbox" | "radio" => {
            let radio = element.attr("type") == Some("radio");
            checkbox(element.checked)
                .label(label.unwrap_or_default())
                .on_toggle(move |checked| Message::Toggle(id.clone(), checked || radio))
                .text_size(BODY_SIZE)
                .into()
        }
        "range" => {
            let min = element.attr("min").and_then(|v| v.parse().ok()).unwrap_or(0.0);
            let max = element.attr("max").and_then(|v| v.parse().ok()).unwrap_or(100.0);
            let value = element.value.parse().unwrap_or(min);
            slider(min..=max, value, move |v: f64| Message::Input(id.clone(), format!("{}", v.round())))
                .step(1.0)
                .into()
        }
        kind => {
            let placeholder = match (element.attr("placeholder"), kind) {
                (Some(p), _) => p.to_string(),
                (None, "date") => "YYYY-MM-DD".to_string(),
                (None, _) => String::new(),
            };
            let submit = id.clone();
            text_input(&placeholder, &element.value)
                .on_input(move |v| Message::Input(id.clone(), v))
                .on_submit(Message::Submit(submit))
                .size(BODY_SIZE)
                .into()
        }
    };
    Some(widget)
}

fn view_select<'a>(doc: &Document, node: NodeId, element: &DomElement) -> Option<Element<'a, Message>> {
    let id = element.id.clone()?;
    let choices: Vec<Choice> = doc
        .options(node)
        .into_iter()
        .map(|(value, label, _)| Choice { value, label })
        .collect();
    let selected = choices.iter().find(|c| c.value == element.value).cloned();
    Some(
        pick_list(choices, selected, move |c: Choice| Message::Choose(id.clone(), c.value))
            .text_size(BODY_SIZE)
            .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::dom::el;

    #[test]
    fn test_inline_detection() {
        let mut doc = Document::new();
        let root = doc.root();
        let ids = doc
            .set_children(
                root,
                [
                    el("p").text("Force: ").child(el("strong").text("6.00 N")),
                    el("div").child(el("input").id("mass")),
                ],
            )
            .unwrap();
        assert!(is_inline_only(&doc, ids[0]));
        assert!(!is_inline_only(&doc, ids[1]));
    }

    #[test]
    fn test_choice_displays_label() {
        let choice = Choice {
            value: "EUR".into(),
            label: "Euro (EUR)".into(),
        };
        assert_eq!(choice.to_string(), "Euro (EUR)");
    }
}
