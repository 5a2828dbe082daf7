//! # Reactive Field Groups
//!
//! A group of inputs tied together by closed-form relations, such as
//! {atomic number, mass number, charge} and {protons, neutrons, electrons}.
//! Editing one field recomputes the others in a single pass.
//!
//! ## Pass
//!
//! Each group is a small state machine ([`GroupState`]). An edit while
//! `Idle` moves it to `Propagating`, runs one pass and returns it to
//! `Idle`; an edit arriving mid-pass is dropped.
//!
//! During a pass, with `source` being the edited field:
//!
//! 1. Every field is read and converted to canonical units. Empty or
//!    non-numeric text is unknown, never zero.
//! 2. The targets are the fields with a rule triggered by `source`, in rule
//!    declaration order. For each target, the first triggered rule whose
//!    inputs are all known is applied; its inputs become fixed for the rest
//!    of the pass so a later rule cannot overwrite them.
//! 3. Targets no rule could resolve are cleared unless they were fixed as
//!    an input.
//! 4. A formula error aborts the pass: dependents other than the failing
//!    rule's inputs are cleared and the error message goes to the result
//!    area.
//! 5. The summary callback refreshes the result area from the new values.

use std::cell::Cell;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{Document, EventKind};
use crate::errors::{CalcError, CalcResult};
use crate::loader::MountScope;
use crate::numeric::{parse_integer, parse_number};

/// Closed-form relation: inputs in declaration order, canonical units.
pub type Formula = fn(&[f64]) -> CalcResult<f64>;

/// Refreshes the result area after a successful pass.
pub type Summary<F> = Rc<dyn Fn(&mut Document, &Values<F>) -> CalcResult<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupState {
    Idle,
    Propagating,
}

/// What an edit did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PassOutcome {
    /// Pass completed.
    Resolved { updated: usize, cleared: usize },
    /// Arrived while a pass was running; dropped.
    Ignored,
    /// A formula rejected its inputs; message shown to the user.
    Rejected(String),
}

/// How a field's text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parse {
    Float,
    Integer,
}

/// Optional unit select next to a field.
#[derive(Clone, Copy)]
pub struct UnitBinding {
    pub select_id: &'static str,
    pub to_canonical: fn(f64, &str) -> Option<f64>,
    pub from_canonical: fn(f64, &str) -> Option<f64>,
}

/// Where a field lives in the document and how it is read and written.
#[derive(Clone, Copy)]
pub struct FieldBinding {
    pub input_id: &'static str,
    pub parse: Parse,
    pub unit: Option<UnitBinding>,
    pub format: fn(f64) -> String,
}

impl FieldBinding {
    pub fn float(input_id: &'static str, format: fn(f64) -> String) -> Self {
        FieldBinding {
            input_id,
            parse: Parse::Float,
            unit: None,
            format,
        }
    }

    pub fn integer(input_id: &'static str) -> Self {
        FieldBinding {
            input_id,
            parse: Parse::Integer,
            unit: None,
            format: |v| format!("{}", v.round() as i64),
        }
    }

    pub fn with_unit(mut self, unit: UnitBinding) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// A directed relation: `target = formula(inputs)`, applied when any of
/// `triggers` is the edited field.
#[derive(Debug, Clone)]
pub struct Rule<F> {
    pub target: F,
    pub inputs: Vec<F>,
    pub triggers: Vec<F>,
    pub formula: Formula,
}

impl<F: Copy> Rule<F> {
    /// Triggered by any of its inputs unless [`when`](Self::when) says
    /// otherwise.
    pub fn new(target: F, inputs: &[F], formula: Formula) -> Self {
        Rule {
            target,
            inputs: inputs.to_vec(),
            triggers: inputs.to_vec(),
            formula,
        }
    }

    pub fn when(mut self, triggers: &[F]) -> Self {
        self.triggers = triggers.to_vec();
        self
    }
}

/// Canonical values of every field after a pass.
#[derive(Debug, Clone)]
pub struct Values<F: Hash + Eq> {
    values: IndexMap<F, Option<f64>>,
    source: F,
    updated: Vec<F>,
}

impl<F: Copy + Hash + Eq> Values<F> {
    pub fn get(&self, field: F) -> Option<f64> {
        self.values.get(&field).copied().flatten()
    }

    /// The field the user edited.
    pub fn source(&self) -> F {
        self.source
    }

    /// Whether the pass computed a new value for `field`.
    pub fn was_updated(&self, field: F) -> bool {
        self.updated.contains(&field)
    }

    fn set(&mut self, field: F, value: Option<f64>) {
        self.values.insert(field, value);
    }
}

pub struct FieldGroup<F: Hash + Eq> {
    name: &'static str,
    fields: IndexMap<F, FieldBinding>,
    rules: Vec<Rule<F>>,
    result_id: Option<&'static str>,
    summary: Option<Summary<F>>,
    state: Cell<GroupState>,
}

impl<F> FieldGroup<F>
where
    F: Copy + Eq + Hash + Debug + 'static,
{
    pub fn new(name: &'static str) -> Self {
        FieldGroup {
            name,
            fields: IndexMap::new(),
            rules: Vec::new(),
            result_id: None,
            summary: None,
            state: Cell::new(GroupState::Idle),
        }
    }

    pub fn field(mut self, field: F, binding: FieldBinding) -> Self {
        self.fields.insert(field, binding);
        self
    }

    pub fn rule(mut self, rule: Rule<F>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Element that receives rejection messages.
    pub fn result(mut self, result_id: &'static str) -> Self {
        self.result_id = Some(result_id);
        self
    }

    pub fn summary<S>(mut self, summary: S) -> Self
    where
        S: Fn(&mut Document, &Values<F>) -> CalcResult<()> + 'static,
    {
        self.summary = Some(Rc::new(summary));
        self
    }

    pub fn state(&self) -> GroupState {
        self.state.get()
    }

    /// Wire every field's input (and unit select) to a pass with that field
    /// as source.
    pub fn bind(group: &Rc<Self>, doc: &mut Document, scope: &mut MountScope) -> CalcResult<()> {
        for (field, binding) in &group.fields {
            Self::listen(group, doc, scope, binding.input_id, EventKind::Input, *field)?;
            if let Some(unit) = binding.unit {
                Self::listen(group, doc, scope, unit.select_id, EventKind::Change, *field)?;
            }
        }
        Ok(())
    }

    /// Run a pass with `source` whenever `element_id` fires `kind`.
    pub fn listen(
        group: &Rc<Self>,
        doc: &mut Document,
        scope: &mut MountScope,
        element_id: &str,
        kind: EventKind,
        source: F,
    ) -> CalcResult<()> {
        let group = Rc::clone(group);
        scope.on_id(doc, element_id, kind, move |doc, _| group.edit(doc, source).map(|_| ()))
    }

    /// Handle an edit of `source`.
    pub fn edit(&self, doc: &mut Document, source: F) -> CalcResult<PassOutcome> {
        if self.state.get() == GroupState::Propagating {
            debug!(group = self.name, ?source, "edit dropped while propagating");
            return Ok(PassOutcome::Ignored);
        }
        self.state.set(GroupState::Propagating);
        let outcome = self.pass(doc, source);
        self.state.set(GroupState::Idle);
        outcome
    }

    fn pass(&self, doc: &mut Document, source: F) -> CalcResult<PassOutcome> {
        let mut values = self.read_all(doc, source)?;

        let mut targets: Vec<F> = Vec::new();
        for rule in &self.rules {
            if rule.target != source && rule.triggers.contains(&source) && !targets.contains(&rule.target) {
                targets.push(rule.target);
            }
        }

        let mut fixed: HashSet<F> = HashSet::from([source]);
        let mut computed: Vec<F> = Vec::new();
        let mut unresolved: Vec<F> = Vec::new();

        for target in &targets {
            if fixed.contains(target) {
                continue;
            }
            let applicable = self.rules.iter().find(|r| {
                r.target == *target
                    && r.triggers.contains(&source)
                    && r.inputs.iter().all(|i| *i != *target && values.get(*i).is_some())
            });
            let Some(rule) = applicable else {
                unresolved.push(*target);
                continue;
            };

            let args: Vec<f64> = rule.inputs.iter().filter_map(|i| values.get(*i)).collect();
            let result = (rule.formula)(&args).and_then(|v| {
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(CalcError::out_of_range(format!("{target:?}"), "Result is not a finite number"))
                }
            });
            match result {
                Ok(v) => {
                    values.set(*target, Some(v));
                    computed.push(*target);
                    fixed.extend(rule.inputs.iter().copied());
                }
                Err(err) => {
                    let message = err.user_message();
                    debug!(group = self.name, ?source, ?target, "pass rejected: {message}");
                    fixed.extend(rule.inputs.iter().copied());
                    for t in targets.iter().filter(|t| !fixed.contains(t)) {
                        self.write(doc, *t, None)?;
                    }
                    if let Some(result_id) = self.result_id {
                        doc.set_text(doc.require(result_id)?, message.clone())?;
                    }
                    return Ok(PassOutcome::Rejected(message));
                }
            }
        }

        let mut cleared = 0;
        for target in &computed {
            self.write(doc, *target, values.get(*target))?;
        }
        for target in unresolved.iter().filter(|t| !fixed.contains(t)) {
            values.set(*target, None);
            self.write(doc, *target, None)?;
            cleared += 1;
        }

        debug!(group = self.name, ?source, updated = computed.len(), cleared, "pass resolved");
        let updated = computed.len();
        values.updated = computed;
        if let Some(summary) = &self.summary {
            summary(doc, &values)?;
        }
        Ok(PassOutcome::Resolved { updated, cleared })
    }

    fn read_all(&self, doc: &Document, source: F) -> CalcResult<Values<F>> {
        let mut values = IndexMap::new();
        for (field, binding) in &self.fields {
            let text = doc.value_of(binding.input_id)?;
            let raw = match binding.parse {
                Parse::Float => parse_number(&text),
                Parse::Integer => parse_integer(&text).map(|v| v as f64),
            };
            let canonical = match (raw, binding.unit) {
                (Some(v), Some(unit)) => {
                    let unit_value = doc.value_of(unit.select_id)?;
                    (unit.to_canonical)(v, &unit_value)
                }
                (raw, None) => raw,
                (None, Some(_)) => None,
            };
            values.insert(*field, canonical);
        }
        Ok(Values {
            values,
            source,
            updated: Vec::new(),
        })
    }

    fn write(&self, doc: &mut Document, field: F, value: Option<f64>) -> CalcResult<()> {
        let Some(binding) = self.fields.get(&field) else {
            return Ok(());
        };
        let text = match (value, binding.unit) {
            (None, _) => String::new(),
            (Some(v), None) => (binding.format)(v),
            (Some(v), Some(unit)) => {
                let unit_value = doc.value_of(unit.select_id)?;
                (unit.from_canonical)(v, &unit_value)
                    .map(binding.format)
                    .unwrap_or_default()
            }
        };
        doc.set_value_of(binding.input_id, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::el;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Atom {
        Z,
        A,
        Charge,
        P,
        N,
        E,
    }

    const PROPS: &[Atom] = &[Atom::Z, Atom::A, Atom::Charge];
    const COMP: &[Atom] = &[Atom::P, Atom::N, Atom::E];

    fn atom_group() -> FieldGroup<Atom> {
        FieldGroup::new("atom")
            .field(Atom::Z, FieldBinding::integer("z"))
            .field(Atom::A, FieldBinding::integer("a"))
            .field(Atom::Charge, FieldBinding::integer("charge"))
            .field(Atom::P, FieldBinding::integer("p"))
            .field(Atom::N, FieldBinding::integer("n"))
            .field(Atom::E, FieldBinding::integer("e"))
            .rule(Rule::new(Atom::P, &[Atom::Z], |v| Ok(v[0])).when(PROPS))
            .rule(Rule::new(Atom::N, &[Atom::A, Atom::Z], |v| Ok(v[0] - v[1])).when(PROPS))
            .rule(Rule::new(Atom::E, &[Atom::Z, Atom::Charge], |v| Ok(v[0] - v[1])).when(PROPS))
            .rule(Rule::new(Atom::Z, &[Atom::P], |v| Ok(v[0])).when(COMP))
            .rule(Rule::new(Atom::A, &[Atom::P, Atom::N], |v| Ok(v[0] + v[1])).when(COMP))
            .rule(Rule::new(Atom::Charge, &[Atom::P, Atom::E], |v| Ok(v[0] - v[1])).when(COMP))
    }

    fn doc_with(ids: &[&str]) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_children(root, ids.iter().map(|id| el("input").id(*id))).unwrap();
        doc.append(root, el("div").id("out")).unwrap();
        doc
    }

    fn value(doc: &Document, id: &str) -> String {
        doc.value_of(id).unwrap()
    }

    #[test]
    fn test_atomic_number_and_mass_number() {
        let mut doc = doc_with(&["z", "a", "charge", "p", "n", "e"]);
        let group = atom_group();
        doc.set_value_of("z", "11").unwrap();
        group.edit(&mut doc, Atom::Z).unwrap();
        doc.set_value_of("a", "23").unwrap();
        let outcome = group.edit(&mut doc, Atom::A).unwrap();

        assert_eq!(outcome, PassOutcome::Resolved { updated: 2, cleared: 1 });
        assert_eq!(value(&doc, "p"), "11");
        assert_eq!(value(&doc, "n"), "12");
        assert_eq!(value(&doc, "e"), "");
    }

    #[test]
    fn test_clearing_source_clears_dependents() {
        let mut doc = doc_with(&["z", "a", "charge", "p", "n", "e"]);
        let group = atom_group();
        doc.set_value_of("z", "8").unwrap();
        doc.set_value_of("a", "16").unwrap();
        doc.set_value_of("charge", "-2").unwrap();
        group.edit(&mut doc, Atom::Charge).unwrap();
        assert_eq!(value(&doc, "e"), "10");

        doc.set_value_of("z", "").unwrap();
        group.edit(&mut doc, Atom::Z).unwrap();
        assert_eq!(value(&doc, "p"), "");
        assert_eq!(value(&doc, "n"), "");
        assert_eq!(value(&doc, "e"), "");
        // the other side of the relation is untouched
        assert_eq!(value(&doc, "a"), "16");
    }

    #[test]
    fn test_reverse_direction() {
        let mut doc = doc_with(&["z", "a", "charge", "p", "n", "e"]);
        let group = atom_group();
        doc.set_value_of("p", "17").unwrap();
        doc.set_value_of("n", "18").unwrap();
        doc.set_value_of("e", "18").unwrap();
        group.edit(&mut doc, Atom::E).unwrap();
        assert_eq!(value(&doc, "z"), "17");
        assert_eq!(value(&doc, "a"), "35");
        assert_eq!(value(&doc, "charge"), "-1");
    }

    #[test]
    fn test_edit_while_propagating_is_ignored() {
        let mut doc = doc_with(&["z", "a", "charge", "p", "n", "e"]);
        let group = atom_group();
        group.state.set(GroupState::Propagating);
        doc.set_value_of("z", "3").unwrap();
        assert_eq!(group.edit(&mut doc, Atom::Z).unwrap(), PassOutcome::Ignored);
        assert_eq!(value(&doc, "p"), "");
        group.state.set(GroupState::Idle);
        group.edit(&mut doc, Atom::Z).unwrap();
        assert_eq!(value(&doc, "p"), "3");
        assert_eq!(group.state(), GroupState::Idle);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Mix {
        Part,
        Whole,
        Percent,
    }

    fn mix_group() -> FieldGroup<Mix> {
        fn pct(v: &[f64]) -> CalcResult<f64> {
            if v[1] == 0.0 {
                return Err(CalcError::invalid_input("whole", "0", "Total mass must be greater than zero"));
            }
            Ok(v[0] / v[1] * 100.0)
        }
        FieldGroup::new("mix")
            .field(Mix::Part, FieldBinding::float("part", |v| crate::numeric::to_fixed(v, 2)))
            .field(Mix::Whole, FieldBinding::float("whole", |v| crate::numeric::to_fixed(v, 2)))
            .field(Mix::Percent, FieldBinding::float("pct", |v| crate::numeric::to_fixed(v, 2)))
            .rule(Rule::new(Mix::Percent, &[Mix::Part, Mix::Whole], pct))
            .rule(Rule::new(Mix::Part, &[Mix::Whole, Mix::Percent], |v| Ok(v[0] * v[1] / 100.0)))
            .rule(Rule::new(Mix::Whole, &[Mix::Part, Mix::Percent], |v| Ok(v[0] / (v[1] / 100.0))))
            .result("out")
    }

    #[test]
    fn test_inputs_of_applied_rule_are_not_overwritten() {
        let mut doc = doc_with(&["part", "whole", "pct"]);
        let group = mix_group();
        doc.set_value_of("part", "5").unwrap();
        doc.set_value_of("whole", "20").unwrap();
        group.edit(&mut doc, Mix::Whole).unwrap();
        assert_eq!(value(&doc, "pct"), "25.00");
        // Part was an input of the percent rule, so it keeps the user's text
        assert_eq!(value(&doc, "part"), "5");
    }

    #[test]
    fn test_domain_error_rejects_and_clears() {
        let mut doc = doc_with(&["part", "whole", "pct"]);
        let group = mix_group();
        doc.set_value_of("part", "5").unwrap();
        doc.set_value_of("pct", "12").unwrap();
        doc.set_value_of("whole", "0").unwrap();
        let outcome = group.edit(&mut doc, Mix::Whole).unwrap();
        assert_eq!(outcome, PassOutcome::Rejected("Total mass must be greater than zero".into()));
        assert_eq!(value(&doc, "pct"), "");
        let out = doc.require("out").unwrap();
        assert_eq!(doc.text_content(out), "Total mass must be greater than zero");
    }

    #[test]
    fn test_summary_sees_new_values() {
        let mut doc = doc_with(&["part", "whole", "pct"]);
        let group = mix_group().summary(|doc, values| {
            assert!(values.was_updated(Mix::Part));
            assert!(!values.was_updated(Mix::Whole));
            let text = match values.get(Mix::Percent) {
                Some(p) => format!("{p:.1}%"),
                None => "-".to_string(),
            };
            doc.set_text(doc.require("out")?, text)
        });
        doc.set_value_of("whole", "200").unwrap();
        doc.set_value_of("pct", "10").unwrap();
        group.edit(&mut doc, Mix::Percent).unwrap();
        assert_eq!(value(&doc, "part"), "20.00");
        assert_eq!(doc.text_content(doc.require("out").unwrap()), "10.0%");
    }

    #[test]
    fn test_bound_group_reacts_to_input_events() {
        let mut doc = doc_with(&["z", "a", "charge", "p", "n", "e"]);
        let group = Rc::new(atom_group());
        let mut scope = MountScope::new();
        FieldGroup::bind(&group, &mut doc, &mut scope).unwrap();
        assert_eq!(scope.len(), 6);

        let z = doc.require("z").unwrap();
        doc.input(z, "26");
        assert_eq!(value(&doc, "p"), "26");
    }
}
