//! # Reveal Animator
//!
//! Sequential disclosure of an educational content blob. Top-level nodes
//! are attached one at a time; elements enter with a fade/slide style and
//! are followed by a short delay, text nodes go in immediately. When every
//! node is attached a best-effort typesetting pass runs over the container.
//!
//! The animation is a step machine ([`Reveal::advance`]) so any host can
//! schedule the delays: the iced frontend turns each [`RevealStep::Wait`]
//! into a timer task and [`Reveal::run_to_end`] skips the delays entirely.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::dom::{el, parse_fragment, text, Document, Markup, NodeData, NodeId, Style};
use crate::errors::{CalcError, CalcResult};

/// Delay between element insertions.
pub const DEFAULT_STEP: Duration = Duration::from_millis(50);

/// Transition applied to each entering element.
pub const ENTER_TRANSITION: &str = "opacity 0.3s ease, transform 0.3s ease";

/// Offset, in pixels, an element slides up from.
pub const ENTER_OFFSET_PX: f32 = 10.0;

const STATE_ATTR: &str = "data-reveal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealStep {
    /// An element was attached; wait before the next step.
    Wait(Duration),
    /// Nothing left to attach.
    Finished,
}

/// An in-flight reveal.
#[derive(Debug)]
pub struct Reveal {
    container: NodeId,
    pending: VecDeque<Markup>,
    step: Duration,
    attached: usize,
}

impl Reveal {
    /// Prepare a reveal of `content` into `container`.
    ///
    /// Returns `Ok(None)` when the container is already showing content or
    /// a reveal into it is under way, so a repeated request changes nothing.
    pub fn begin(doc: &mut Document, content: &str, container: NodeId, step: Duration) -> CalcResult<Option<Reveal>> {
        if doc.element(container).is_none() {
            return Err(CalcError::element_not_found(format!("{container:?}")));
        }
        let shown = !doc.is_hidden(container)
            && (!doc.children(container).is_empty() || doc.attr(container, STATE_ATTR).is_some());
        if shown {
            debug!(?container, "reveal already shown");
            return Ok(None);
        }

        let nodes = parse_fragment(content)?;
        doc.set_hidden(container, false);
        doc.clear_children(container)?;
        doc.set_attr(container, STATE_ATTR, "running");
        Ok(Some(Reveal {
            container,
            pending: nodes.into(),
            step,
            attached: 0,
        }))
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Nodes attached so far.
    pub fn attached(&self) -> usize {
        self.attached
    }

    /// Attach text nodes up to and including the next element.
    pub fn advance(&mut self, doc: &mut Document) -> RevealStep {
        if !doc.contains(self.container) {
            self.pending.clear();
            return RevealStep::Finished;
        }
        while let Some(node) = self.pending.pop_front() {
            let is_element = matches!(node, Markup::Element(_));
            let Ok(id) = doc.append(self.container, node) else {
                self.pending.clear();
                return RevealStep::Finished;
            };
            self.attached += 1;
            if is_element {
                // entering state, then the settled state the transition animates to
                doc.set_style(
                    id,
                    Style {
                        opacity: Some(0.0),
                        translate_y: Some(ENTER_OFFSET_PX),
                        transition: Some(ENTER_TRANSITION.to_string()),
                    },
                );
                doc.set_style(
                    id,
                    Style {
                        opacity: Some(1.0),
                        translate_y: Some(0.0),
                        transition: Some(ENTER_TRANSITION.to_string()),
                    },
                );
                return RevealStep::Wait(self.step);
            }
        }
        RevealStep::Finished
    }

    /// Typeset the container. Failures are logged, never returned.
    pub fn finish(self, doc: &mut Document, typesetter: &dyn Typesetter) {
        if !doc.contains(self.container) {
            return;
        }
        if let Err(err) = typesetter.typeset(doc, self.container) {
            error!(code = err.error_code(), "typesetting failed: {err}");
        }
        doc.set_attr(self.container, STATE_ATTR, "done");
        debug!(nodes = self.attached, "reveal finished");
    }

    /// Attach everything without waiting, then typeset.
    pub fn run_to_end(mut self, doc: &mut Document, typesetter: &dyn Typesetter) {
        while self.advance(doc) != RevealStep::Finished {}
        self.finish(doc, typesetter);
    }
}

// ============================================================================
// Typesetting
// ============================================================================

/// Renders embedded math notation inside a container.
pub trait Typesetter {
    fn typeset(&self, doc: &mut Document, container: NodeId) -> CalcResult<()>;
}

/// Leaves math delimiters untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTypesetter;

impl Typesetter for NoopTypesetter {
    fn typeset(&self, _doc: &mut Document, _container: NodeId) -> CalcResult<()> {
        Ok(())
    }
}

/// Turns `\( .. \)` into `span.math-inline` and `\[ .. \]` into
/// `div.math-display`, keeping the TeX source in `data-tex` and a plain
/// text rendering as content.
#[derive(Debug, Default, Clone, Copy)]
pub struct TexTypesetter;

impl Typesetter for TexTypesetter {
    fn typeset(&self, doc: &mut Document, container: NodeId) -> CalcResult<()> {
        let text_nodes: Vec<NodeId> = doc
            .descendants(container)
            .into_iter()
            .filter(|n| matches!(doc.get(*n).map(|node| &node.data), Some(NodeData::Text(t)) if t.contains('\\')))
            .collect();

        for node in text_nodes {
            let Some(source) = doc.text_of(node).map(str::to_string) else {
                continue;
            };
            let pieces = split_math(&source)?;
            if pieces.len() == 1 && matches!(pieces[0], Piece::Text(_)) {
                continue;
            }
            let markup = pieces.into_iter().map(|piece| match piece {
                Piece::Text(t) => text(t),
                Piece::Inline(tex) => el("span")
                    .class("math-inline")
                    .attr("data-tex", tex.clone())
                    .text(tex_to_text(&tex))
                    .into(),
                Piece::Display(tex) => el("div")
                    .class("math-display")
                    .attr("data-tex", tex.clone())
                    .text(tex_to_text(&tex))
                    .into(),
            });
            doc.replace_node(node, markup)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Piece {
    Text(String),
    Inline(String),
    Display(String),
}

fn split_math(source: &str) -> CalcResult<Vec<Piece>> {
    let mut pieces = Vec::new();
    let mut rest = source;
    loop {
        let inline = rest.find("\\(");
        let display = rest.find("\\[");
        let (start, open_is_inline) = match (inline, display) {
            (Some(i), Some(d)) => (i.min(d), i < d),
            (Some(i), None) => (i, true),
            (None, Some(d)) => (d, false),
            (None, None) => break,
        };
        let close = if open_is_inline { "\\)" } else { "\\]" };
        let body_start = start + 2;
        let Some(len) = rest[body_start..].find(close) else {
            return Err(CalcError::typeset(format!("unbalanced math delimiter near {:?}", &rest[start..])));
        };
        if start > 0 {
            pieces.push(Piece::Text(rest[..start].to_string()));
        }
        let tex = rest[body_start..body_start + len].trim().to_string();
        pieces.push(if open_is_inline { Piece::Inline(tex) } else { Piece::Display(tex) });
        rest = &rest[body_start + len + 2..];
    }
    if !rest.is_empty() || pieces.is_empty() {
        pieces.push(Piece::Text(rest.to_string()));
    }
    Ok(pieces)
}

/// Plain-text approximation of a TeX snippet.
pub fn tex_to_text(tex: &str) -> String {
    let mut out = String::new();
    let chars: Vec<char> = tex.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end].is_ascii_alphabetic() {
                end += 1;
            }
            if end == start {
                // escaped symbol such as \, or \%
                if let Some(next) = chars.get(start) {
                    if *next != ',' && *next != ';' && *next != '!' {
                        out.push(*next);
                    } else {
                        out.push(' ');
                    }
                }
                i = start + 1;
                continue;
            }
            let command: String = chars[start..end].iter().collect();
            i = end;
            match command.as_str() {
                "frac" | "dfrac" => {
                    let (num, after) = group(&chars, i);
                    let (den, after) = group(&chars, after);
                    out.push_str(&format!("({})/({})", tex_to_text(&num), tex_to_text(&den)));
                    i = after;
                }
                "sqrt" => {
                    let (body, after) = group(&chars, i);
                    out.push_str(&format!("√({})", tex_to_text(&body)));
                    i = after;
                }
                "text" | "mathrm" | "mathbf" | "operatorname" => {
                    let (body, after) = group(&chars, i);
                    out.push_str(&body);
                    i = after;
                }
                "left" | "right" => {}
                other => out.push_str(symbol(other)),
            }
        } else if c == '{' || c == '}' {
            i += 1;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn group(chars: &[char], mut i: usize) -> (String, usize) {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&'{') {
        return match chars.get(i) {
            Some(c) => (c.to_string(), i + 1),
            None => (String::new(), i),
        };
    }
    let mut depth = 0;
    let start = i + 1;
    while i < chars.len() {
        match chars[i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (chars[start..i].iter().collect(), i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    (chars[start.min(chars.len())..].iter().collect(), chars.len())
}

fn symbol(command: &str) -> &'static str {
    match command {
        "times" => "×",
        "cdot" => "·",
        "div" => "÷",
        "pm" => "±",
        "mp" => "∓",
        "le" | "leq" => "≤",
        "ge" | "geq" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "infty" => "∞",
        "sum" => "∑",
        "pi" => "π",
        "theta" => "θ",
        "alpha" => "α",
        "beta" => "β",
        "Delta" => "Δ",
        "Omega" => "Ω",
        "rightarrow" | "to" => "→",
        "quad" | "qquad" => " ",
        "%" => "%",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOB: &str = r#"
        <h3>Formula</h3>
        Intro text
        <p>Inline \( \frac{a}{b} \) here.</p>
        \[ x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a} \]
    "#;

    fn container(doc: &mut Document) -> NodeId {
        let root = doc.root();
        doc.append(root, el("div").id("educational-content-container").hidden(true))
            .unwrap()
    }

    #[test]
    fn test_steps_wait_only_after_elements() {
        let mut doc = Document::new();
        let c = container(&mut doc);
        let mut reveal = Reveal::begin(&mut doc, BLOB, c, DEFAULT_STEP).unwrap().unwrap();
        assert!(!doc.is_hidden(c));

        assert_eq!(reveal.advance(&mut doc), RevealStep::Wait(DEFAULT_STEP));
        assert_eq!(doc.children(c).len(), 1);
        // text node then the paragraph
        assert_eq!(reveal.advance(&mut doc), RevealStep::Wait(DEFAULT_STEP));
        assert_eq!(doc.children(c).len(), 3);
        // trailing display math is text
        assert_eq!(reveal.advance(&mut doc), RevealStep::Finished);
        assert_eq!(reveal.attached(), 4);

        let h3 = doc.children(c)[0];
        let style = doc.style(h3).unwrap();
        assert_eq!(style.opacity, Some(1.0));
        assert_eq!(style.translate_y, Some(0.0));
        assert_eq!(style.transition.as_deref(), Some(ENTER_TRANSITION));
    }

    #[test]
    fn test_second_reveal_is_noop() {
        let mut doc = Document::new();
        let c = container(&mut doc);
        let first = Reveal::begin(&mut doc, BLOB, c, DEFAULT_STEP).unwrap().unwrap();
        // a second request before the first attached anything
        assert!(Reveal::begin(&mut doc, BLOB, c, DEFAULT_STEP).unwrap().is_none());
        first.run_to_end(&mut doc, &TexTypesetter);
        let once = doc.to_html(c);

        assert!(Reveal::begin(&mut doc, BLOB, c, DEFAULT_STEP).unwrap().is_none());
        assert_eq!(doc.to_html(c), once);
    }

    #[test]
    fn test_typesetting_replaces_delimiters() {
        let mut doc = Document::new();
        let c = container(&mut doc);
        Reveal::begin(&mut doc, BLOB, c, DEFAULT_STEP)
            .unwrap()
            .unwrap()
            .run_to_end(&mut doc, &TexTypesetter);

        assert_eq!(doc.query_class(c, "math-inline").len(), 1);
        let display = doc.query_class(c, "math-display");
        assert_eq!(display.len(), 1);
        assert_eq!(doc.text_content(display[0]), "x = (-b ± √(b^2 - 4ac))/(2a)");
        assert!(!doc.text_content(c).contains("\\("));
        assert_eq!(doc.attr(c, "data-reveal"), Some("done"));
    }

    #[test]
    fn test_typesetting_failure_is_swallowed() {
        let mut doc = Document::new();
        let c = container(&mut doc);
        Reveal::begin(&mut doc, "<p>broken \\( x</p>", c, DEFAULT_STEP)
            .unwrap()
            .unwrap()
            .run_to_end(&mut doc, &TexTypesetter);
        assert_eq!(doc.text_content(c), "broken \\( x");
        assert_eq!(doc.attr(c, "data-reveal"), Some("done"));
    }

    #[test]
    fn test_removed_container_finishes() {
        let mut doc = Document::new();
        let c = container(&mut doc);
        let mut reveal = Reveal::begin(&mut doc, BLOB, c, DEFAULT_STEP).unwrap().unwrap();
        doc.remove(c);
        assert_eq!(reveal.advance(&mut doc), RevealStep::Finished);
    }

    #[test]
    fn test_tex_to_text() {
        assert_eq!(tex_to_text(r"\text{Result} = \frac{V \times P}{100}"), "Result = (V × P)/(100)");
        assert_eq!(tex_to_text(r"p = Z"), "p = Z");
    }
}
