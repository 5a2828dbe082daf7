//! Tolerant HTML fragment parser for static content blobs.
//!
//! Handles elements, quoted/unquoted/bare attributes, void elements,
//! comments and the common named entities. Whitespace-only text between
//! elements is dropped. Unclosed elements are closed at end of input; a
//! closing tag that matches nothing open is an error.

use super::markup::{el, ElementSpec, Markup};
use crate::errors::{CalcError, CalcResult};

const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// Parse a fragment into top-level markup nodes.
pub fn parse_fragment(source: &str) -> CalcResult<Vec<Markup>> {
    let mut parser = Parser { src: source, pos: 0 };
    let mut stack: Vec<ElementSpec> = Vec::new();
    let mut roots: Vec<Markup> = Vec::new();

    while parser.pos < parser.src.len() {
        let rest = parser.rest();
        if rest.starts_with("<!--") {
            let end = rest
                .find("-->")
                .ok_or_else(|| CalcError::markup(parser.pos, "unterminated comment"))?;
            parser.pos += end + 3;
        } else if rest.starts_with("</") {
            let start = parser.pos;
            parser.pos += 2;
            let name = parser.name();
            parser.skip_until('>');
            match stack.iter().rposition(|open| open.tag == name) {
                Some(index) => {
                    while stack.len() > index {
                        close_top(&mut stack, &mut roots);
                    }
                }
                None => {
                    return Err(CalcError::markup(start, format!("unexpected closing tag </{name}>")));
                }
            }
        } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            parser.pos += 1;
            let (spec, self_closing) = parser.open_tag()?;
            if self_closing || VOID_ELEMENTS.contains(&spec.tag.as_str()) {
                push_node(&mut stack, &mut roots, Markup::Element(spec));
            } else {
                stack.push(spec);
            }
        } else {
            let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            let end = rest[first..].find('<').map(|i| i + first).unwrap_or(rest.len());
            let raw = &rest[..end];
            parser.pos += end;
            if !raw.trim().is_empty() {
                push_node(&mut stack, &mut roots, Markup::Text(decode_entities(raw)));
            }
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    Ok(roots)
}

fn push_node(stack: &mut [ElementSpec], roots: &mut Vec<Markup>, node: Markup) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn close_top(stack: &mut Vec<ElementSpec>, roots: &mut Vec<Markup>) {
    if let Some(done) = stack.pop() {
        push_node(stack, roots, Markup::Element(done));
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn skip_until(&mut self, ch: char) {
        match self.rest().find(ch) {
            Some(i) => self.pos += i + ch.len_utf8(),
            None => self.pos = self.src.len(),
        }
    }

    fn name(&mut self) -> String {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'))
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_ascii_lowercase()
    }

    /// Parse after `<` through the closing `>`.
    fn open_tag(&mut self) -> CalcResult<(ElementSpec, bool)> {
        let start = self.pos;
        let mut spec = el(&self.name());
        loop {
            self.skip_ws();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(CalcError::markup(start, format!("unterminated <{}> tag", spec.tag)));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok((spec, true));
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok((spec, false));
            }

            let name = self.name();
            if name.is_empty() {
                // stray character inside a tag
                self.pos += rest.chars().next().map(char::len_utf8).unwrap_or(1);
                continue;
            }
            self.skip_ws();
            if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_ws();
                let value = self.attr_value()?;
                spec = spec.attr(&name, decode_entities(&value));
            } else {
                spec = spec.attr(&name, "");
            }
        }
    }

    fn attr_value(&mut self) -> CalcResult<String> {
        let rest = self.rest();
        if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
            let body = &rest[1..];
            let end = body
                .find(quote)
                .ok_or_else(|| CalcError::markup(self.pos, "unterminated attribute value"))?;
            self.pos += end + 2;
            Ok(body[..end].to_string())
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(rest.len());
            let end = if rest[..end].ends_with('/') && rest[end..].starts_with('>') {
                end - 1
            } else {
                end
            };
            self.pos += end;
            Ok(rest[..end].to_string())
        }
    }
}

/// Decode the named and numeric entities that show up in content blobs.
pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match candidate.find(';').filter(|&semi| semi <= 10) {
            Some(semi) => {
                let entity = &candidate[1..semi];
                match lookup_entity(entity) {
                    Some(ch) => {
                        out.push(ch);
                        rest = &candidate[semi + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &candidate[1..];
                    }
                }
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn lookup_entity(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "times" => '×',
        "divide" => '÷',
        "minus" => '−',
        "plusmn" => '±',
        "deg" => '°',
        "middot" => '·',
        "pi" => 'π',
        "sup2" => '²',
        "sup3" => '³',
        "rarr" => '→',
        "larr" => '←',
        "harr" => '↔',
        "le" => '≤',
        "ge" => '≥',
        "ne" => '≠',
        "asymp" => '≈',
        "sum" => '∑',
        "radic" => '√',
        "infin" => '∞',
        "ndash" => '–',
        "hellip" => '…',
        _ => return None,
    })
}
