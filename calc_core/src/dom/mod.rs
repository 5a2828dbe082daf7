//! # Headless Document
//!
//! An in-process element tree that calculators render into and bind
//! listeners on. Frontends (iced, terminal) read it to draw widgets and
//! forward user input back through [`Document::input`],
//! [`Document::choose`], [`Document::toggle`] and [`Document::click`].
//!
//! Nodes live in a generational arena. Removing a subtree frees its slots
//! and bumps their generation, so a [`NodeId`] held past its node's
//! lifetime resolves to `None` instead of aliasing a newer node.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::dom::{el, Document, EventKind};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.set_children(root, [el("input").id("mass").value("2")]).unwrap();
//!
//! let mass = doc.get_element_by_id("mass").unwrap();
//! doc.add_listener(mass, EventKind::Input, |doc, node| {
//!     let twice = doc.value(node).unwrap_or("").repeat(2);
//!     doc.set_title(twice);
//!     Ok(())
//! }).unwrap();
//!
//! doc.input(mass, "3");
//! assert_eq!(doc.title(), "33");
//! ```

mod markup;
mod parse;

pub use markup::{el, text, ElementSpec, Markup};
pub use parse::{decode_entities, parse_fragment};

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::effects::Effect;
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Handles
// ============================================================================

/// Generational handle to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Handle to a registered listener, unique per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Text typed into an input.
    Input,
    /// Select or checkbox committed a new value.
    Change,
    /// Button pressed.
    Click,
}

/// Event handler. Errors are logged by [`Document::dispatch`] and never
/// reach the caller.
pub type Listener = Rc<dyn Fn(&mut Document, NodeId) -> CalcResult<()>>;

struct ListenerEntry {
    id: ListenerId,
    kind: EventKind,
    callback: Listener,
}

// ============================================================================
// Nodes
// ============================================================================

/// Inline style touched by the reveal animation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub opacity: Option<f32>,
    pub translate_y: Option<f32>,
    pub transition: Option<String>,
}

impl Style {
    fn is_empty(&self) -> bool {
        self.opacity.is_none() && self.translate_y.is_none() && self.transition.is_none()
    }

    fn to_css(&self) -> String {
        let mut parts = Vec::new();
        if let Some(o) = self.opacity {
            parts.push(format!("opacity: {o}"));
        }
        if let Some(y) = self.translate_y {
            parts.push(format!("transform: translateY({y}px)"));
        }
        if let Some(t) = &self.transition {
            parts.push(format!("transition: {t}"));
        }
        parts.join("; ")
    }
}

pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: IndexMap<String, String>,
    pub value: String,
    pub checked: bool,
    pub hidden: bool,
    pub style: Style,
    listeners: Vec<ListenerEntry>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("id", &self.id)
            .field("classes", &self.classes)
            .field("hidden", &self.hidden)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug)]
pub enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub data: NodeData,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

// ============================================================================
// Document
// ============================================================================

pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    ids: HashMap<String, Vec<NodeId>>,
    focused: Option<NodeId>,
    title: String,
    next_listener: u64,
    effects: Vec<Effect>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .field("title", &self.title)
            .field("focused", &self.focused)
            .finish()
    }
}

impl Document {
    /// Empty document with a `body` root.
    pub fn new() -> Self {
        let mut doc = Document {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId { index: 0, generation: 0 },
            ids: HashMap::new(),
            focused: None,
            title: String::new(),
            next_listener: 0,
            effects: Vec::new(),
        };
        doc.root = doc.alloc(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(new_element(el("body"))),
        });
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // ------------------------------------------------------------------------
    // Arena
    // ------------------------------------------------------------------------

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId { index, generation: slot.generation }
        } else {
            self.slots.push(Slot { generation: 0, node: Some(node) });
            NodeId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// True while the handle refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Text of a text node.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) => Some(t),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------------

    /// Build `markup` and append it under `parent`.
    pub fn append(&mut self, parent: NodeId, markup: impl Into<Markup>) -> CalcResult<NodeId> {
        if self.element(parent).is_none() {
            return Err(CalcError::element_not_found(format!("{parent:?}")));
        }
        Ok(self.build(parent, markup.into()))
    }

    /// Replace every child of `parent` with freshly built `markup`.
    ///
    /// Removed nodes take their listeners with them.
    pub fn set_children<I, M>(&mut self, parent: NodeId, markup: I) -> CalcResult<Vec<NodeId>>
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.clear_children(parent)?;
        Ok(markup.into_iter().map(|m| self.build(parent, m.into())).collect())
    }

    /// Replace the children of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, content: impl Into<String>) -> CalcResult<()> {
        self.set_children(node, [Markup::Text(content.into())]).map(|_| ())
    }

    /// Replace `node` in its parent with freshly built `markup`, keeping
    /// its position.
    pub fn replace_node<I>(&mut self, node: NodeId, markup: I) -> CalcResult<Vec<NodeId>>
    where
        I: IntoIterator<Item = Markup>,
    {
        let parent = self
            .parent(node)
            .ok_or_else(|| CalcError::element_not_found(format!("parent of {node:?}")))?;
        let position = self.children(parent).iter().position(|c| *c == node).unwrap_or(0);
        self.remove(node);

        let built: Vec<NodeId> = markup.into_iter().map(|m| self.build(parent, m)).collect();
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| !built.contains(c));
            for (offset, id) in built.iter().enumerate() {
                p.children.insert(position + offset, *id);
            }
        }
        Ok(built)
    }

    pub fn clear_children(&mut self, parent: NodeId) -> CalcResult<()> {
        let children = match self.get(parent) {
            Some(node) => node.children.clone(),
            None => return Err(CalcError::element_not_found(format!("{parent:?}"))),
        };
        for child in children {
            self.free_subtree(child);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.clear();
        }
        Ok(())
    }

    /// Detach and free `node` with its subtree. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.contains(node) {
            return false;
        }
        if let Some(parent) = self.parent(node) {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|c| *c != node);
            }
        }
        self.free_subtree(node);
        true
    }

    fn free_subtree(&mut self, node: NodeId) {
        for child in self.children(node).to_vec() {
            self.free_subtree(child);
        }
        let removed = match self.slots.get_mut(node.index as usize) {
            Some(slot) if slot.generation == node.generation => {
                let taken = slot.node.take();
                slot.generation = slot.generation.wrapping_add(1);
                taken
            }
            _ => None,
        };
        if removed.is_none() {
            return;
        }
        self.free.push(node.index);
        if let Some(NodeData::Element(element)) = removed.map(|n| n.data) {
            if let Some(id) = element.id {
                if let Some(list) = self.ids.get_mut(&id) {
                    list.retain(|n| *n != node);
                    if list.is_empty() {
                        self.ids.remove(&id);
                    }
                }
            }
        }
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    fn build(&mut self, parent: NodeId, markup: Markup) -> NodeId {
        let (data, children) = match markup {
            Markup::Text(t) => (NodeData::Text(t), Vec::new()),
            Markup::Element(mut spec) => {
                let children = std::mem::take(&mut spec.children);
                (NodeData::Element(new_element(spec)), children)
            }
        };
        let id = self.alloc(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        if let Some(key) = self.element(id).and_then(|e| e.id.clone()) {
            self.ids.entry(key).or_default().push(id);
        }
        for child in children {
            self.build(id, child);
        }
        self.init_select_value(id);
        id
    }

    /// A select without an explicit value takes its `selected` option, or
    /// the first one.
    fn init_select_value(&mut self, id: NodeId) {
        let needs_value = matches!(self.element(id), Some(e) if e.tag == "select" && e.value.is_empty());
        if !needs_value {
            return;
        }
        let options = self.options(id);
        let chosen = options
            .iter()
            .find(|(_, _, selected)| *selected)
            .or_else(|| options.first())
            .map(|(value, _, _)| value.clone());
        if let (Some(value), Some(e)) = (chosen, self.element_mut(id)) {
            e.value = value;
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// First live element registered under `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).and_then(|list| list.first().copied())
    }

    /// Like [`get_element_by_id`](Self::get_element_by_id), as an error.
    pub fn require(&self, id: &str) -> CalcResult<NodeId> {
        self.get_element_by_id(id)
            .ok_or_else(|| CalcError::element_not_found(format!("#{id}")))
    }

    /// Pre-order descendants of `node`, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn query_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.element(*n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    pub fn query_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.element(*n).is_some_and(|e| e.tag == tag))
            .collect()
    }

    /// First descendant whose attribute `name` equals `value`.
    pub fn query_attr(&self, scope: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.element(*n).and_then(|e| e.attr(name)) == Some(value))
    }

    /// `(value, label, selected)` for each option of a select.
    pub fn options(&self, select: NodeId) -> Vec<(String, String, bool)> {
        self.query_tag(select, "option")
            .into_iter()
            .filter_map(|opt| {
                let e = self.element(opt)?;
                let label = self.text_content(opt);
                let value = e.attr("value").map(str::to_string).unwrap_or_else(|| label.clone());
                Some((value, label, e.attrs.contains_key("selected")))
            })
            .collect()
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(t) = self.text_of(node) {
            return t.to_string();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| self.text_of(n))
            .collect()
    }

    /// Visible text of `node` laid out for a terminal: hidden subtrees are
    /// skipped and block elements end a line.
    pub fn render_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_text(node, &mut out);
        out.lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.get(node) else { return };
        match &n.data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(e) if e.hidden => {}
            NodeData::Element(e) => {
                if matches!(e.tag.as_str(), "input" | "select" | "textarea") {
                    out.push_str(&format!("[{}]", e.value));
                    return;
                }
                for child in &n.children {
                    self.write_text(*child, out);
                }
                if is_block(&e.tag) {
                    out.push('\n');
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Element state
    // ------------------------------------------------------------------------

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.value.as_str())
    }

    /// Programmatic write; does not fire events.
    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(e) = self.element_mut(node) {
            e.value = value.into();
        }
    }

    /// Value of the element with `id`, or an error if absent.
    pub fn value_of(&self, id: &str) -> CalcResult<String> {
        let node = self.require(id)?;
        Ok(self.value(node).unwrap_or_default().to_string())
    }

    pub fn set_value_of(&mut self, id: &str, value: impl Into<String>) -> CalcResult<()> {
        let node = self.require(id)?;
        self.set_value(node, value);
        Ok(())
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.checked)
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(e) = self.element_mut(node) {
            e.checked = checked;
        }
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.hidden)
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(e) = self.element_mut(node) {
            e.hidden = hidden;
        }
    }

    /// Visible: live and no hidden ancestor.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if !self.contains(n) || self.is_hidden(n) {
                return false;
            }
            current = self.parent(n);
        }
        true
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.element_mut(node) {
            if !e.has_class(class) {
                e.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.element_mut(node) {
            e.classes.retain(|c| c != class);
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(e) = self.element_mut(node) {
            e.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(e) = self.element_mut(node) {
            e.attrs.shift_remove(name);
        }
    }

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.element(node).map(|e| &e.style)
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) {
        if let Some(e) = self.element_mut(node) {
            e.style = style;
        }
    }

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    pub fn focus(&mut self, node: NodeId) -> bool {
        if self.element(node).is_some() {
            self.focused = Some(node);
            true
        } else {
            false
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|n| self.contains(*n))
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn add_listener<F>(&mut self, node: NodeId, kind: EventKind, callback: F) -> CalcResult<ListenerId>
    where
        F: Fn(&mut Document, NodeId) -> CalcResult<()> + 'static,
    {
        let id = ListenerId(self.next_listener);
        let element = self
            .element_mut(node)
            .ok_or_else(|| CalcError::element_not_found(format!("{node:?}")))?;
        element.listeners.push(ListenerEntry {
            id,
            kind,
            callback: Rc::new(callback),
        });
        self.next_listener += 1;
        Ok(id)
    }

    /// Returns false if the node or listener is already gone.
    pub fn remove_listener(&mut self, node: NodeId, listener: ListenerId) -> bool {
        match self.element_mut(node) {
            Some(e) => {
                let before = e.listeners.len();
                e.listeners.retain(|l| l.id != listener);
                e.listeners.len() != before
            }
            None => false,
        }
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.element(node).map(|e| e.listeners.len()).unwrap_or(0)
    }

    /// Run the listeners of `node` for `kind` in registration order.
    ///
    /// A failing listener is logged and does not stop the others. Returns
    /// the number of listeners invoked.
    pub fn dispatch(&mut self, node: NodeId, kind: EventKind) -> usize {
        let callbacks: Vec<Listener> = match self.element(node) {
            Some(e) => e
                .listeners
                .iter()
                .filter(|l| l.kind == kind)
                .map(|l| Rc::clone(&l.callback))
                .collect(),
            None => return 0,
        };
        for callback in &callbacks {
            if let Err(err) = callback(self, node) {
                warn!(?node, ?kind, code = err.error_code(), "listener failed: {err}");
            }
        }
        callbacks.len()
    }

    /// User typed `value` into an input.
    pub fn input(&mut self, node: NodeId, value: impl Into<String>) -> usize {
        self.set_value(node, value);
        self.dispatch(node, EventKind::Input)
    }

    /// User picked `value` in a select.
    pub fn choose(&mut self, node: NodeId, value: impl Into<String>) -> usize {
        self.set_value(node, value);
        self.dispatch(node, EventKind::Change)
    }

    /// User toggled a checkbox.
    pub fn toggle(&mut self, node: NodeId, checked: bool) -> usize {
        self.set_checked(node, checked);
        self.dispatch(node, EventKind::Change)
    }

    pub fn click(&mut self, node: NodeId) -> usize {
        self.dispatch(node, EventKind::Click)
    }

    // ------------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------------

    pub fn queue_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    /// Serialize `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.get(node) else { return };
        match &n.data {
            NodeData::Text(t) => out.push_str(&escape(t, false)),
            NodeData::Element(e) => {
                out.push('<');
                out.push_str(&e.tag);
                if let Some(id) = &e.id {
                    push_attr(out, "id", id);
                }
                if !e.classes.is_empty() {
                    push_attr(out, "class", &e.classes.join(" "));
                }
                for (k, v) in &e.attrs {
                    push_attr(out, k, v);
                }
                if !e.value.is_empty() && e.tag != "select" {
                    push_attr(out, "value", &e.value);
                }
                if e.checked {
                    out.push_str(" checked");
                }
                if e.hidden {
                    out.push_str(" hidden");
                }
                if !e.style.is_empty() {
                    push_attr(out, "style", &e.style.to_css());
                }
                out.push('>');
                if is_void(&e.tag) {
                    return;
                }
                for child in &n.children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&e.tag);
                out.push('>');
            }
        }
    }
}

fn new_element(spec: ElementSpec) -> Element {
    Element {
        tag: spec.tag,
        id: spec.id,
        classes: spec.classes,
        attrs: spec.attrs.into_iter().collect(),
        value: spec.value.unwrap_or_default(),
        checked: spec.checked,
        hidden: spec.hidden,
        style: Style::default(),
        listeners: Vec::new(),
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "div" | "p" | "br" | "hr" | "h1" | "h2" | "h3" | "h4" | "li" | "tr" | "table" | "ul" | "section" | "form"
    )
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input" | "meta" | "link" | "wbr")
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value, true));
    out.push('"');
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
