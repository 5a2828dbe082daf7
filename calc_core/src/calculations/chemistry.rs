//! Atom and mass percentage calculators.
//!
//! Both are driven by [`FieldGroup`]s instead of a Calculate button: every
//! keystroke recomputes the related fields and refreshes the result area.

use std::rc::Rc;

use crate::dom::{el, Document, EventKind, Markup};
use crate::equations::chemistry::{
    self, describe_atom, percent_composition, AtomSummary, Composition, CompositionRow, ELEMENTS,
};
use crate::errors::CalcResult;
use crate::numeric::{parse_integer, parse_number, to_display, to_fixed};
use crate::reactive::{FieldBinding, FieldGroup, Rule, UnitBinding, Values};
use crate::registry::{Calculator, CalculatorMeta};
use crate::units::MASS;

use super::layout::{layout, number_input, placeholder, select, show};
use super::Definition;

const ATOM_EDU: &str = r#"
<div class="educational-section">
    <h3>Definitions</h3>
    <ul>
        <li><strong>Atomic number (Z):</strong> the number of protons. It identifies the element.</li>
        <li><strong>Mass number (A):</strong> protons plus neutrons.</li>
        <li><strong>Charge (z):</strong> protons minus electrons.</li>
    </ul>
    <h3>From Z, A and charge</h3>
    \[ p = Z \qquad n = A - Z \qquad e = Z - z \]
    <h3>From p, n and e</h3>
    \[ Z = p \qquad A = p + n \qquad z = p - e \]
    <p>An atom with more protons than electrons is a <strong>cation</strong>; one with more electrons than protons is an <strong>anion</strong>.</p>
</div>
"#;

const MASS_PERCENT_EDU: &str = r#"
<div class="educational-section">
    <p>Mass percent is the share of a mixture's mass that belongs to one component.</p>
    <h4>Solute in a solution</h4>
    \[ \text{Mass Percent} = \frac{m_\text{solute}}{m_\text{solute} + m_\text{solvent}} \times 100 \]
    <h4>Component in a compound</h4>
    \[ \text{Mass Percent} = \frac{m_\text{component}}{m_\text{total}} \times 100 \]
    <h4>Percent composition</h4>
    <p>Multiply each element's atomic mass by its atom count, add the results to get the molar mass, then divide each element's share by the molar mass. The percentages always add up to 100%.</p>
    <p>Example: 43 g of HCl in 200 g of water is \( \frac{43}{243} \times 100 \approx 17.70\% \).</p>
</div>
"#;

const ENTER_VALUES: &str = "Enter values...";
const COMPOSITION_ROWS: usize = 6;
const ORDINALS: [&str; COMPOSITION_ROWS] = ["1st", "2nd", "3rd", "4th", "5th", "6th"];

// ============================================================================
// Atom calculator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Atom {
    Z,
    A,
    Charge,
    P,
    N,
    E,
}

const PROPERTIES: &[Atom] = &[Atom::Z, Atom::A, Atom::Charge];
const COMPOSITION: &[Atom] = &[Atom::P, Atom::N, Atom::E];

fn atom_group() -> FieldGroup<Atom> {
    FieldGroup::new("atom")
        .field(Atom::Z, FieldBinding::integer("atom-z"))
        .field(Atom::A, FieldBinding::integer("atom-a"))
        .field(Atom::Charge, FieldBinding::integer("atom-charge"))
        .field(Atom::P, FieldBinding::integer("atom-p"))
        .field(Atom::N, FieldBinding::integer("atom-n"))
        .field(Atom::E, FieldBinding::integer("atom-e"))
        .rule(Rule::new(Atom::P, &[Atom::Z], |v| Ok(v[0])).when(PROPERTIES))
        .rule(Rule::new(Atom::N, &[Atom::A, Atom::Z], |v| Ok(chemistry::neutrons(v[0], v[1]))).when(PROPERTIES))
        .rule(Rule::new(Atom::E, &[Atom::Z, Atom::Charge], |v| Ok(chemistry::electrons(v[0], v[1]))).when(PROPERTIES))
        .rule(Rule::new(Atom::Z, &[Atom::P], |v| Ok(v[0])).when(COMPOSITION))
        .rule(Rule::new(Atom::A, &[Atom::P, Atom::N], |v| Ok(chemistry::mass_number(v[0], v[1]))).when(COMPOSITION))
        .rule(Rule::new(Atom::Charge, &[Atom::P, Atom::E], |v| Ok(chemistry::charge(v[0], v[1]))).when(COMPOSITION))
        .result("atom-result")
        .summary(atom_summary)
}

fn atom_summary(doc: &mut Document, values: &Values<Atom>) -> CalcResult<()> {
    let z = values.get(Atom::Z).map(|v| v as i64);
    let a = values.get(Atom::A).map(|v| v as i64);
    let content: Vec<Markup> = match describe_atom(z, a) {
        AtomSummary::Empty => vec![placeholder(ENTER_VALUES)],
        AtomSummary::InvalidNumber(_) => vec!["Invalid atomic number.".into()],
        AtomSummary::Identified { element, mass_number } => {
            let mass = mass_number.map(|a| a.to_string());
            vec![
                el("div")
                    .class("atom-element")
                    .text("Your element is ")
                    .child(el("strong").text(element.name))
                    .into(),
                el("div")
                    .class("atom-notation")
                    .text("AZE Notation:")
                    .child(el("br"))
                    .child(
                        el("div")
                            .class("aze")
                            .child(el("sup").text(mass.clone().unwrap_or_else(|| "?".into())))
                            .child(el("sub").text(element.number.to_string()))
                            .child(el("span").class("aze-symbol").text(element.symbol)),
                    )
                    .into(),
                el("div")
                    .class("atom-mass")
                    .text("Mass Number (A): ")
                    .child(el("strong").text(mass.unwrap_or_else(|| "-".into())))
                    .into(),
            ]
        }
    };
    show(doc, "atom-result", content)
}

pub fn atom() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "atom-calculator",
            "Atom Calculator",
            "Calculate atomic number, mass number, and charge from protons, neutrons, and electrons.",
        ),
        |def| {
            let column = |heading: &str, fields: [(&str, &str, &str); 3]| -> Markup {
                el("div")
                    .class("atom-column")
                    .child(el("h4").text(heading))
                    .children(fields.iter().map(|(id, label, hint)| number_input(id, label, hint)))
                    .into()
            };
            layout(
                def.meta(),
                "atom-result",
                def.has_education(),
                vec![el("div")
                    .class("two-columns")
                    .child(column(
                        "Properties",
                        [
                            ("atom-z", "Atomic Number (Z):", "e.g. 11"),
                            ("atom-a", "Mass Number (A):", "e.g. 23"),
                            ("atom-charge", "Charge (z):", "e.g. 0"),
                        ],
                    ))
                    .child(column(
                        "Composition",
                        [
                            ("atom-p", "Protons (p):", "e.g. 11"),
                            ("atom-n", "Neutrons (n):", "e.g. 12"),
                            ("atom-e", "Electrons (e):", "e.g. 11"),
                        ],
                    ))
                    .into()],
            )
        },
        |doc, scope| FieldGroup::bind(&Rc::new(atom_group()), doc, scope),
    )
    .with_education(ATOM_EDU)
}

// ============================================================================
// Mass percentage
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Solution {
    Solute,
    Solvent,
    Total,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Compound {
    Chemical,
    Total,
    Percent,
}

fn grams(value: f64, unit: &str) -> Option<f64> {
    MASS.to_canonical(value, unit)
}

fn from_grams(value: f64, unit: &str) -> Option<f64> {
    MASS.from_canonical(value, unit)
}

fn mass_field(prefix: &'static str, select_id: &'static str) -> FieldBinding {
    FieldBinding::float(prefix, |v| to_fixed(v, 4)).with_unit(UnitBinding {
        select_id,
        to_canonical: grams,
        from_canonical: from_grams,
    })
}

/// `label <strong>value unit</strong>` with the mass shown in the unit
/// currently selected next to its field.
fn mass_line(doc: &Document, label: &str, grams_value: f64, select_id: &str) -> CalcResult<Vec<Markup>> {
    let unit = doc.value_of(select_id)?;
    let shown = from_grams(grams_value, &unit).unwrap_or(grams_value);
    Ok(vec![
        label.into(),
        el("strong").text(format!("{} {}", to_fixed(shown, 2), unit)).into(),
    ])
}

fn percent_line(percent: f64) -> Vec<Markup> {
    vec![
        "Mass Percentage: ".into(),
        el("strong").text(format!("{}%", to_fixed(percent, 2))).into(),
    ]
}

fn solution_group() -> FieldGroup<Solution> {
    use Solution::*;
    FieldGroup::new("mass-percent-solution")
        .field(Solute, mass_field("solute-mass-val", "solute-mass-unit"))
        .field(Solvent, mass_field("solvent-mass-val", "solvent-mass-unit"))
        .field(Total, mass_field("solution-mass-val", "solution-mass-unit"))
        .field(Percent, FieldBinding::float("solute-percent", |v| to_fixed(v, 4)))
        // A typed percentage splits the known total, or scales up the solute.
        .rule(Rule::new(Solute, &[Total, Percent], |v| Ok(chemistry::part_from_percent(v[0], v[1]))).when(&[Percent]))
        .rule(Rule::new(Total, &[Solute, Percent], |v| chemistry::whole_from_percent(v[0], v[1])).when(&[Percent]))
        .rule(Rule::new(Total, &[Solute, Solvent], |v| Ok(v[0] + v[1])))
        // With only the solution known, a typed part gives the other part.
        // Declared ahead of the percentage so it sees the split.
        .rule(Rule::new(Solvent, &[Total, Solute], |v| Ok(v[0] - v[1])).when(&[Total, Percent, Solute]))
        .rule(Rule::new(Solute, &[Total, Solvent], |v| Ok(v[0] - v[1])).when(&[Total, Solvent]))
        .rule(Rule::new(Percent, &[Solute, Solvent], |v| chemistry::mass_percent(v[0], v[0] + v[1])))
        .rule(Rule::new(Percent, &[Solute, Total], |v| chemistry::mass_percent(v[0], v[1])).when(&[Total]))
        .result("mass-percent-result")
        .summary(|doc, values| {
            let content = if let Some(p) = values.get(Percent).filter(|_| values.was_updated(Percent)) {
                percent_line(p)
            } else if let Some(g) = values.get(Solute).filter(|_| values.was_updated(Solute)) {
                mass_line(doc, "Solute: ", g, "solute-mass-unit")?
            } else if let Some(g) = values.get(Total).filter(|_| values.was_updated(Total)) {
                mass_line(doc, "Solution: ", g, "solution-mass-unit")?
            } else {
                return Ok(());
            };
            show(doc, "mass-percent-result", content)
        })
}

fn compound_group() -> FieldGroup<Compound> {
    use Compound::*;
    FieldGroup::new("mass-percent-compound")
        .field(Chemical, mass_field("chemical-mass-val", "chemical-mass-unit"))
        .field(Total, mass_field("compound-mass-val", "compound-mass-unit"))
        .field(Percent, FieldBinding::float("chemical-percent", |v| to_fixed(v, 4)))
        .rule(Rule::new(Percent, &[Chemical, Total], |v| chemistry::mass_percent(v[0], v[1])))
        .rule(Rule::new(Chemical, &[Total, Percent], |v| Ok(chemistry::part_from_percent(v[0], v[1]))))
        .rule(Rule::new(Total, &[Chemical, Percent], |v| chemistry::whole_from_percent(v[0], v[1])))
        .result("mass-percent-result")
        .summary(|doc, values| {
            let content = if let Some(p) = values.get(Percent).filter(|_| values.was_updated(Percent)) {
                percent_line(p)
            } else if let Some(g) = values.get(Chemical).filter(|_| values.was_updated(Chemical)) {
                mass_line(doc, "Chemical Mass: ", g, "chemical-mass-unit")?
            } else if let Some(g) = values.get(Total).filter(|_| values.was_updated(Total)) {
                mass_line(doc, "Compound Mass: ", g, "compound-mass-unit")?
            } else {
                return Ok(());
            };
            show(doc, "mass-percent-result", content)
        })
}

fn mass_input(prefix: &str, label: &str) -> Markup {
    let units: Vec<(String, String)> = MASS.units.iter().map(|u| (u.key.to_string(), u.key.to_string())).collect();
    let value_id = format!("{prefix}-val");
    el("div")
        .class("form-group")
        .child(el("label").attr("for", value_id.clone()).text(label))
        .child(
            el("div")
                .class("input-with-unit")
                .child(el("input").id(value_id).attr("type", "number").attr("placeholder", "Enter value"))
                .child(select(&format!("{prefix}-unit"), &units, "g")),
        )
        .into()
}

fn percent_input(id: &str) -> Markup {
    el("div")
        .class("form-group")
        .child(el("label").attr("for", id).text("Mass percentage"))
        .child(
            el("div")
                .class("input-with-unit")
                .child(el("input").id(id).attr("type", "number").attr("placeholder", "Result"))
                .child(el("span").class("unit-suffix").text("%")),
        )
        .into()
}

fn composition_row(index: usize) -> Markup {
    let mut options = vec![(String::new(), "Select Element".to_string())];
    options.extend(
        ELEMENTS
            .iter()
            .map(|e| (e.number.to_string(), format!("{} - {}", e.symbol, e.name))),
    );
    el("div")
        .class("form-group composition-row")
        .child(el("label").text(format!("No. of {} element atoms", ORDINALS[index])))
        .child(
            el("div")
                .class("composition-inputs")
                .child(
                    el("input")
                        .id(format!("comp-n{index}"))
                        .attr("type", "number")
                        .attr("min", "0")
                        .attr("placeholder", "Count"),
                )
                .child(select(&format!("comp-e{index}"), &options, "")),
        )
        .into()
}

fn render_composition(doc: &mut Document) -> CalcResult<()> {
    let mut rows = Vec::with_capacity(COMPOSITION_ROWS);
    for i in 0..COMPOSITION_ROWS {
        rows.push(CompositionRow {
            count: parse_number(&doc.value_of(&format!("comp-n{i}"))?).unwrap_or(f64::NAN),
            element: parse_integer(&doc.value_of(&format!("comp-e{i}"))?),
        });
    }
    let content: Vec<Markup> = match percent_composition(&rows) {
        Composition::Empty => vec![placeholder("Enter counts and select elements...")],
        Composition::Invalid => vec![placeholder("Invalid data...")],
        Composition::Resolved { total_mass, parts } => vec![
            el("div")
                .class("molar-mass")
                .text("Total Molar Mass: ")
                .child(el("strong").text(format!("{} g/mol", to_fixed(total_mass, 3))))
                .into(),
            el("div")
                .class("composition-parts")
                .children(parts.iter().map(|p| {
                    el("div")
                        .class("composition-part")
                        .child(el("span").text(format!(
                            "{} {} ({})",
                            to_display(p.count),
                            p.element.symbol,
                            p.element.name
                        )))
                        .child(el("strong").text(format!("{}%", to_fixed(p.percent, 3))))
                }))
                .into(),
        ],
    };
    show(doc, "mass-percent-result", content)
}

const TABS: [(&str, &str); 3] = [
    ("tab-solute", "Solute"),
    ("tab-chemical", "Chemical"),
    ("tab-composition", "Composition"),
];

fn select_tab(doc: &mut Document, tab: &str) -> CalcResult<()> {
    let root = doc.root();
    for button in doc.query_class(root, "tab-btn") {
        if doc.attr(button, "data-tab") == Some(tab) {
            doc.add_class(button, "active");
        } else {
            doc.remove_class(button, "active");
        }
    }
    for (id, _) in TABS {
        let content = doc.require(id)?;
        doc.set_hidden(content, id != tab);
    }
    show(doc, "mass-percent-result", [placeholder(ENTER_VALUES)])
}

pub fn mass_percent() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "mass-percent-calculator",
            "Mass Percentage Calculator",
            "Calculate the mass percentage of a solute in a solution, a chemical component in a compound, or the percent composition of a mixture.",
        ),
        |def| {
            let tabs = el("div").class("tabs").children(TABS.iter().enumerate().map(|(i, (id, label))| {
                el("button")
                    .class(if i == 0 { "tab-btn active" } else { "tab-btn" })
                    .attr("data-tab", *id)
                    .text(*label)
            }));
            layout(
                def.meta(),
                "mass-percent-result",
                def.has_education(),
                vec![
                    tabs.into(),
                    el("div")
                        .id("tab-solute")
                        .class("tab-content")
                        .child(mass_input("solute-mass", "Mass of solute"))
                        .child(mass_input("solvent-mass", "Mass of solvent"))
                        .child(mass_input("solution-mass", "Mass of solution"))
                        .child(percent_input("solute-percent"))
                        .into(),
                    el("div")
                        .id("tab-chemical")
                        .class("tab-content")
                        .hidden(true)
                        .child(mass_input("chemical-mass", "Mass of chemical"))
                        .child(mass_input("compound-mass", "Total mass of compound"))
                        .child(percent_input("chemical-percent"))
                        .into(),
                    el("div")
                        .id("tab-composition")
                        .class("tab-content")
                        .hidden(true)
                        .children((0..COMPOSITION_ROWS).map(composition_row))
                        .into(),
                ],
            )
        },
        |doc, scope| {
            let root = doc.root();
            for button in doc.query_class(root, "tab-btn") {
                scope.on(doc, button, EventKind::Click, |doc, node| {
                    let tab = doc.attr(node, "data-tab").unwrap_or_default().to_string();
                    select_tab(doc, &tab)
                })?;
            }
            FieldGroup::bind(&Rc::new(solution_group()), doc, scope)?;
            FieldGroup::bind(&Rc::new(compound_group()), doc, scope)?;
            for i in 0..COMPOSITION_ROWS {
                scope.on_id(doc, &format!("comp-n{i}"), EventKind::Input, |doc, _| render_composition(doc))?;
                scope.on_id(doc, &format!("comp-e{i}"), EventKind::Change, |doc, _| render_composition(doc))?;
            }
            Ok(())
        },
    )
    .with_education(MASS_PERCENT_EDU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MountScope;

    fn mount(def: &Definition) -> (Document, MountScope) {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_children(root, [def.render()]).unwrap();
        let mut scope = MountScope::new();
        def.bind(&mut doc, &mut scope).unwrap();
        (doc, scope)
    }

    fn text(doc: &Document, id: &str) -> String {
        doc.text_content(doc.require(id).unwrap())
    }

    fn type_into(doc: &mut Document, id: &str, value: &str) {
        let node = doc.require(id).unwrap();
        doc.input(node, value);
    }

    #[test]
    fn test_atom_from_properties() {
        let (mut doc, _scope) = mount(&atom());
        type_into(&mut doc, "atom-z", "11");
        assert_eq!(doc.value_of("atom-p").unwrap(), "11");
        let result = text(&doc, "atom-result");
        assert!(result.contains("Your element is Sodium"));
        assert!(result.contains("Mass Number (A): -"));

        type_into(&mut doc, "atom-a", "23");
        type_into(&mut doc, "atom-charge", "1");
        assert_eq!(doc.value_of("atom-n").unwrap(), "12");
        assert_eq!(doc.value_of("atom-e").unwrap(), "10");
        assert!(text(&doc, "atom-result").contains("Mass Number (A): 23"));
    }

    #[test]
    fn test_atom_from_composition() {
        let (mut doc, _scope) = mount(&atom());
        type_into(&mut doc, "atom-p", "17");
        type_into(&mut doc, "atom-n", "18");
        type_into(&mut doc, "atom-e", "18");
        assert_eq!(doc.value_of("atom-z").unwrap(), "17");
        assert_eq!(doc.value_of("atom-a").unwrap(), "35");
        assert_eq!(doc.value_of("atom-charge").unwrap(), "-1");
        assert!(text(&doc, "atom-result").contains("Chlorine"));
    }

    #[test]
    fn test_atom_invalid_and_empty() {
        let (mut doc, _scope) = mount(&atom());
        type_into(&mut doc, "atom-z", "200");
        assert_eq!(text(&doc, "atom-result"), "Invalid atomic number.");
        type_into(&mut doc, "atom-z", "");
        assert_eq!(text(&doc, "atom-result"), ENTER_VALUES);
        assert_eq!(doc.value_of("atom-p").unwrap(), "");
    }

    #[test]
    fn test_solute_and_solvent_give_percentage() {
        let (mut doc, _scope) = mount(&mass_percent());
        type_into(&mut doc, "solute-mass-val", "43");
        type_into(&mut doc, "solvent-mass-val", "200");
        assert_eq!(doc.value_of("solution-mass-val").unwrap(), "243.0000");
        assert_eq!(doc.value_of("solute-percent").unwrap(), "17.6955");
        assert_eq!(text(&doc, "mass-percent-result"), "Mass Percentage: 17.70%");
    }

    #[test]
    fn test_solute_with_known_solution_keeps_solution() {
        let (mut doc, _scope) = mount(&mass_percent());
        type_into(&mut doc, "solution-mass-val", "100");
        type_into(&mut doc, "solute-mass-val", "25");
        assert_eq!(doc.value_of("solution-mass-val").unwrap(), "100");
        assert_eq!(doc.value_of("solvent-mass-val").unwrap(), "75.0000");
        assert_eq!(doc.value_of("solute-percent").unwrap(), "25.0000");
        assert_eq!(text(&doc, "mass-percent-result"), "Mass Percentage: 25.00%");
    }

    #[test]
    fn test_solvent_with_known_solution_keeps_solution() {
        let (mut doc, _scope) = mount(&mass_percent());
        type_into(&mut doc, "solution-mass-val", "80");
        type_into(&mut doc, "solvent-mass-val", "60");
        assert_eq!(doc.value_of("solution-mass-val").unwrap(), "80");
        assert_eq!(doc.value_of("solute-mass-val").unwrap(), "20.0000");
        assert_eq!(doc.value_of("solute-percent").unwrap(), "25.0000");
    }

    #[test]
    fn test_percentage_splits_solution() {
        let (mut doc, _scope) = mount(&mass_percent());
        type_into(&mut doc, "solution-mass-val", "1");
        let unit = doc.require("solution-mass-unit").unwrap();
        doc.choose(unit, "kg");
        type_into(&mut doc, "solute-percent", "25");
        assert_eq!(doc.value_of("solute-mass-val").unwrap(), "250.0000");
        assert_eq!(doc.value_of("solvent-mass-val").unwrap(), "750.0000");
        assert_eq!(text(&doc, "mass-percent-result"), "Solute: 250.00 g");
    }

    #[test]
    fn test_compound_tab() {
        let (mut doc, _scope) = mount(&mass_percent());
        let tab = doc
            .query_attr(doc.root(), "data-tab", "tab-chemical")
            .unwrap();
        doc.click(tab);
        assert!(doc.is_hidden(doc.require("tab-solute").unwrap()));
        assert!(!doc.is_hidden(doc.require("tab-chemical").unwrap()));
        assert_eq!(text(&doc, "mass-percent-result"), ENTER_VALUES);

        type_into(&mut doc, "chemical-percent", "40");
        type_into(&mut doc, "chemical-mass-val", "8");
        assert_eq!(doc.value_of("compound-mass-val").unwrap(), "20.0000");
        assert_eq!(text(&doc, "mass-percent-result"), "Compound Mass: 20.00 g");
    }

    #[test]
    fn test_zero_total_is_rejected() {
        let (mut doc, _scope) = mount(&mass_percent());
        type_into(&mut doc, "chemical-mass-val", "5");
        type_into(&mut doc, "compound-mass-val", "0");
        assert_eq!(text(&doc, "mass-percent-result"), "Total mass must be greater than zero");
        assert_eq!(doc.value_of("chemical-percent").unwrap(), "");
    }

    #[test]
    fn test_water_composition() {
        let (mut doc, _scope) = mount(&mass_percent());
        assert_eq!(doc.options(doc.require("comp-e0").unwrap()).len(), ELEMENTS.len() + 1);
        type_into(&mut doc, "comp-n0", "2");
        assert_eq!(text(&doc, "mass-percent-result"), "Enter counts and select elements...");
        let e0 = doc.require("comp-e0").unwrap();
        doc.choose(e0, "1");
        type_into(&mut doc, "comp-n1", "1");
        let e1 = doc.require("comp-e1").unwrap();
        doc.choose(e1, "8");
        let result = text(&doc, "mass-percent-result");
        assert!(result.contains("Total Molar Mass: 18.015 g/mol"));
        assert!(result.contains("2 H (Hydrogen)11.191%"));
        assert!(result.contains("1 O (Oxygen)88.809%"));
    }
}
