//! Shared calculator chrome and form helpers.
//!
//! Every calculator renders through [`layout`] or [`inline_layout`] so the
//! loader can rely on an `h2.calculator-title` and the "What is this?"
//! button always targets `#educational-content-container`.

use std::rc::Rc;

use crate::dom::{el, Document, ElementSpec, EventKind, Markup, NodeId};
use crate::effects::Effect;
use crate::errors::{CalcError, CalcResult};
use crate::loader::MountScope;
use crate::numeric::{parse_integer, parse_number};
use crate::registry::CalculatorMeta;

pub const PLACEHOLDER: &str = "Enter values and click Calculate";
pub const EDU_BUTTON_ID: &str = "what-is-this-btn";
pub const EDU_CONTAINER_ID: &str = "educational-content-container";

// ============================================================================
// Page layout
// ============================================================================

fn title(meta: &CalculatorMeta) -> ElementSpec {
    el("h2")
        .class("calculator-title")
        .attr("tabindex", "-1")
        .text(meta.name.clone())
}

fn description(meta: &CalculatorMeta) -> ElementSpec {
    el("p").class("calculator-description").text(meta.description.clone())
}

fn education(educational: bool) -> Vec<Markup> {
    let mut parts = Vec::new();
    if educational {
        parts.push(
            el("div")
                .class("edu-actions")
                .child(el("button").id(EDU_BUTTON_ID).class("what-is-this-btn").text("What is this?"))
                .into(),
        );
    }
    parts.push(
        el("div")
            .id(EDU_CONTAINER_ID)
            .class("educational-content-container")
            .hidden(true)
            .into(),
    );
    parts
}

/// Greyed-out hint shown in an empty result area.
pub fn placeholder(message: &str) -> Markup {
    el("span").class("placeholder").text(message).into()
}

/// Title, description, inputs column and a separate results panel.
pub fn layout(meta: &CalculatorMeta, result_id: &str, educational: bool, inputs: Vec<Markup>) -> Markup {
    layout_with_details(meta, result_id, None, educational, inputs)
}

/// [`layout`] with an extra block under the result, such as a worked
/// explanation.
pub fn layout_with_details(
    meta: &CalculatorMeta,
    result_id: &str,
    details: Option<Markup>,
    educational: bool,
    inputs: Vec<Markup>,
) -> Markup {
    el("div")
        .class("calculator")
        .child(title(meta))
        .child(description(meta))
        .child(
            el("div")
                .class("calculator-wrapper")
                .child(
                    el("div")
                        .class("calculator-inputs")
                        .child(el("div").class("calculator-form").children(inputs)),
                )
                .child(
                    el("div")
                        .class("calculator-results")
                        .child(el("h3").text("Result"))
                        .child(
                            el("div")
                                .id(result_id)
                                .class("result-content")
                                .child(placeholder(PLACEHOLDER)),
                        )
                        .children(details)
                        .children(education(educational)),
                ),
        )
        .into()
}

/// Single-column variant: the result area and the educational controls
/// follow the inputs. Converters and the password generator use it.
pub fn inline_layout(meta: &CalculatorMeta, result_id: &str, educational: bool, inputs: Vec<Markup>) -> Markup {
    el("div")
        .class("calculator")
        .child(title(meta))
        .child(description(meta))
        .child(
            el("div").class("calculator-wrapper inline").child(
                el("div")
                    .class("calculator-inputs")
                    .child(el("div").class("calculator-form").children(inputs))
                    .child(el("div").id(result_id).class("result-content"))
                    .children(education(educational)),
            ),
        )
        .into()
}

// ============================================================================
// Form controls
// ============================================================================

fn form_group(id: &str, label: &str, control: ElementSpec) -> Markup {
    el("div")
        .class("form-group")
        .child(el("label").attr("for", id).text(label))
        .child(control)
        .into()
}

pub fn number_input(id: &str, label: &str, placeholder: &str) -> Markup {
    form_group(
        id,
        label,
        el("input")
            .id(id)
            .attr("type", "number")
            .attr("step", "any")
            .attr("placeholder", placeholder),
    )
}

/// Number input pre-filled with `value`.
pub fn number_input_with(id: &str, label: &str, value: &str) -> Markup {
    form_group(
        id,
        label,
        el("input").id(id).attr("type", "number").attr("step", "any").value(value),
    )
}

pub fn text_input(id: &str, label: &str, placeholder: &str) -> Markup {
    form_group(
        id,
        label,
        el("input").id(id).attr("type", "text").attr("placeholder", placeholder),
    )
}

pub fn select(id: &str, options: &[(String, String)], selected: &str) -> ElementSpec {
    el("select").id(id).children(options.iter().map(|(value, label)| {
        let opt = el("option").attr("value", value.clone()).text(label.clone());
        if value == selected {
            opt.attr("selected", "selected")
        } else {
            opt
        }
    }))
}

pub fn select_input(id: &str, label: &str, options: &[(String, String)], selected: &str) -> Markup {
    form_group(id, label, select(id, options, selected))
}

/// Radio buttons sharing `name`; each gets the id `{name}-{value}`.
pub fn radio_group(name: &str, options: &[(&str, &str)], checked: &str) -> Markup {
    el("div")
        .class("radio-group")
        .children(options.iter().map(|(value, label)| {
            let id = format!("{name}-{value}");
            el("label")
                .attr("for", id.clone())
                .child(
                    el("input")
                        .id(id)
                        .attr("type", "radio")
                        .attr("name", name)
                        .value(*value)
                        .checked(*value == checked),
                )
                .text(format!(" {label}"))
        }))
        .into()
}

pub fn checkbox(id: &str, label: &str, checked: bool) -> Markup {
    el("label")
        .class("checkbox-label")
        .attr("for", id)
        .child(el("input").id(id).attr("type", "checkbox").checked(checked))
        .text(format!(" {label}"))
        .into()
}

pub fn calculate_button(id: &str, label: &str) -> Markup {
    el("button").id(id).class("calculate-btn").text(label).into()
}

// ============================================================================
// Reading and writing
// ============================================================================

/// Parsed number in `id`; blank or non-numeric text is `None`.
pub fn read_number(doc: &Document, id: &str) -> CalcResult<Option<f64>> {
    Ok(parse_number(&doc.value_of(id)?))
}

pub fn read_integer(doc: &Document, id: &str) -> CalcResult<Option<i64>> {
    Ok(parse_integer(&doc.value_of(id)?))
}

/// Both numbers, or the generic validation message.
pub fn read_pair(doc: &Document, a: &str, b: &str) -> CalcResult<(f64, f64)> {
    match (read_number(doc, a)?, read_number(doc, b)?) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(CalcError::invalid_input(a, "", "Please enter valid numbers")),
    }
}

/// Every field in `ids`, or the generic validation message if any is blank.
pub fn read_numbers<const N: usize>(doc: &Document, ids: [&str; N]) -> CalcResult<[f64; N]> {
    let mut values = [0.0; N];
    for (slot, id) in values.iter_mut().zip(ids) {
        *slot = read_number(doc, id)?.ok_or_else(|| CalcError::invalid_input(id, "", "Please enter valid numbers"))?;
    }
    Ok(values)
}

pub fn is_checked(doc: &Document, id: &str) -> CalcResult<bool> {
    Ok(doc.is_checked(doc.require(id)?))
}

/// Replace the content of the element with `id`.
pub fn show<I, M>(doc: &mut Document, id: &str, content: I) -> CalcResult<()>
where
    I: IntoIterator<Item = M>,
    M: Into<Markup>,
{
    let node = doc.require(id)?;
    doc.set_children(node, content)?;
    Ok(())
}

/// `label <strong>value</strong>` followed by a line break.
pub fn line(label: &str, value: impl Into<String>) -> Vec<Markup> {
    vec![
        Markup::from(label.to_string()),
        el("strong").text(value).into(),
        el("br").into(),
    ]
}

// ============================================================================
// Radio groups
// ============================================================================

pub fn radios(doc: &Document, name: &str) -> Vec<NodeId> {
    doc.descendants(doc.root())
        .into_iter()
        .filter(|n| {
            doc.element(*n)
                .is_some_and(|e| e.tag == "input" && e.attr("type") == Some("radio") && e.attr("name") == Some(name))
        })
        .collect()
}

/// Value of the checked radio in group `name`.
pub fn checked_radio(doc: &Document, name: &str) -> Option<String> {
    radios(doc, name)
        .into_iter()
        .find(|n| doc.is_checked(*n))
        .and_then(|n| doc.value(n).map(str::to_string))
}

/// Call `on_change` with the new value whenever a radio of `name` is
/// checked. Checking one radio unchecks the rest of its group.
pub fn bind_radio_group<F>(doc: &mut Document, scope: &mut MountScope, name: &'static str, on_change: F) -> CalcResult<()>
where
    F: Fn(&mut Document, &str) -> CalcResult<()> + 'static,
{
    let on_change = Rc::new(on_change);
    for radio in radios(doc, name) {
        let on_change = Rc::clone(&on_change);
        scope.on(doc, radio, EventKind::Change, move |doc, node| {
            if !doc.is_checked(node) {
                return Ok(());
            }
            for other in radios(doc, name).into_iter().filter(|n| *n != node) {
                doc.set_checked(other, false);
            }
            let value = doc.value(node).unwrap_or_default().to_string();
            on_change(doc, &value)
        })?;
    }
    Ok(())
}

// ============================================================================
// Buttons
// ============================================================================

/// Run `compute` when `button_id` is clicked and put its markup in
/// `result_id`. Input errors are shown in place of a result.
pub fn on_calculate<F>(
    doc: &mut Document,
    scope: &mut MountScope,
    button_id: &str,
    result_id: &'static str,
    compute: F,
) -> CalcResult<()>
where
    F: Fn(&mut Document) -> CalcResult<Vec<Markup>> + 'static,
{
    scope.on_id(doc, button_id, EventKind::Click, move |doc, _| run(doc, result_id, &compute))
}

/// Like [`on_calculate`] but also recomputes on every keystroke in
/// `inputs`.
pub fn on_calculate_live<F>(
    doc: &mut Document,
    scope: &mut MountScope,
    button_id: &str,
    inputs: &[&str],
    result_id: &'static str,
    compute: F,
) -> CalcResult<()>
where
    F: Fn(&mut Document) -> CalcResult<Vec<Markup>> + 'static,
{
    let compute = Rc::new(compute);
    let click = Rc::clone(&compute);
    scope.on_id(doc, button_id, EventKind::Click, move |doc, _| run(doc, result_id, &*click))?;
    for input in inputs {
        let compute = Rc::clone(&compute);
        scope.on_id(doc, input, EventKind::Input, move |doc, _| run(doc, result_id, &*compute))?;
    }
    Ok(())
}

fn run<F>(doc: &mut Document, result_id: &str, compute: &F) -> CalcResult<()>
where
    F: Fn(&mut Document) -> CalcResult<Vec<Markup>> + ?Sized,
{
    match compute(doc) {
        Ok(markup) => show(doc, result_id, markup),
        Err(err @ (CalcError::InvalidInput { .. } | CalcError::MissingField { .. } | CalcError::OutOfRange { .. })) => {
            show(doc, result_id, [err.user_message()])
        }
        Err(err) => Err(err),
    }
}

/// Reveal `content` into the educational container when "What is this?"
/// is clicked.
pub fn bind_what_is_this(doc: &mut Document, scope: &mut MountScope, content: &'static str) -> CalcResult<()> {
    if doc.get_element_by_id(EDU_BUTTON_ID).is_none() {
        return Ok(());
    }
    scope.on_id(doc, EDU_BUTTON_ID, EventKind::Click, move |doc, _| {
        let container = doc.require(EDU_CONTAINER_ID)?;
        doc.queue_effect(Effect::Reveal { content, container });
        Ok(())
    })
}
