//! # Unit Converters
//!
//! Length, area and temperature. Each converter is a two-field reactive
//! group: editing the "from" value (or either unit) recomputes "to", and
//! editing "to" recomputes "from". Both fields hold the same canonical
//! quantity, so the relation is the identity in canonical units.
//!
//! After every pass the converter writes a one-line equation and a grid
//! of the value in every other unit.

use std::rc::Rc;

use crate::dom::{el, Document, ElementSpec, EventKind, Markup};
use crate::errors::CalcResult;
use crate::loader::MountScope;
use crate::reactive::{FieldBinding, FieldGroup, Rule, UnitBinding, Values};
use crate::registry::{Calculator, CalculatorMeta};
use crate::units::{
    format_input_value, format_temperature, format_temperature_input, format_value, temperature_from_celsius,
    temperature_to_celsius, TemperatureScale, UnitTable, AREA, LENGTH,
};

use super::layout::{inline_layout, select, show};
use super::Definition;

const LENGTH_EDU: &str = r#"
<div class="qa-section">
    <h4>Understanding Length Measurement</h4>
    <p>Two systems of length units are in everyday use: the <strong>metric system</strong> (SI), built on powers of ten around the meter, and the <strong>imperial system</strong>, used mainly in the United States.</p>
    <h4>Metric units</h4>
    <ul>
        <li>1 Kilometer = <strong>1,000</strong> Meters</li>
        <li>1 Meter = <strong>100</strong> Centimeters</li>
        <li>1 Centimeter = <strong>10</strong> Millimeters</li>
        <li>1 Millimeter = <strong>1,000</strong> Micrometers</li>
    </ul>
    <h4>Imperial units</h4>
    <ul>
        <li>1 Mile = <strong>1,760</strong> Yards = <strong>5,280</strong> Feet</li>
        <li>1 Yard = <strong>3</strong> Feet = <strong>36</strong> Inches</li>
    </ul>
    <h4>Crossing between systems</h4>
    <p>Since 1959 the inch is defined as exactly 2.54 cm, which fixes every other imperial length in meters:</p>
    \[ 1 \, \text{ft} = 0.3048 \, \text{m} \qquad 1 \, \text{mi} = 1.609344 \, \text{km} \]
    <p>A <strong>light year</strong>, the distance light travels in a year, is about \( 9.461 \times 10^{15} \) m.</p>
</div>
"#;

const AREA_EDU: &str = r#"
<div class="qa-section">
    <h4>Understanding Area Measurement</h4>
    <p>Area units are squares of length units, so their conversion factors are squared too. Since 1 m = 100 cm,</p>
    \[ 1 \, \text{m}^2 = 10{,}000 \, \text{cm}^2 \]
    <h4>Land units</h4>
    <ul>
        <li>1 Hectare = <strong>10,000</strong> m²</li>
        <li>1 Are = <strong>100</strong> m²</li>
        <li>1 Acre = <strong>43,560</strong> ft² ≈ <strong>4,047</strong> m²</li>
        <li>1 Square Mile = <strong>640</strong> Acres</li>
    </ul>
    <h4>Are vs Acre</h4>
    <p>Despite the names, an acre is about <strong>40.47</strong> times larger than an are.</p>
    <h4>Wire gauges</h4>
    <p>A <strong>circular mil</strong> is the area of a circle one mil (0.001 in) across. Cable cross-sections are often quoted in thousands of circular mils (kcmil).</p>
</div>
"#;

const TEMPERATURE_EDU: &str = r#"
<div class="qa-section">
    <h4>Understanding Temperature Scales</h4>
    <p>Temperature scales differ in both degree size and zero point, so converting needs an offset as well as a factor.</p>
    <ul>
        <li><strong>Celsius</strong>: water freezes at 0 °C and boils at 100 °C.</li>
        <li><strong>Fahrenheit</strong>: water freezes at 32 °F and boils at 212 °F.</li>
        <li><strong>Kelvin</strong>: starts at absolute zero with Celsius-sized degrees.</li>
        <li><strong>Rankine</strong>: starts at absolute zero with Fahrenheit-sized degrees.</li>
    </ul>
    <h4>Formulas</h4>
    \[ °F = °C \times \tfrac{9}{5} + 32 \qquad K = °C + 273.15 \qquad °R = (°C + 273.15) \times \tfrac{9}{5} \]
    <p>−40 is the one temperature where Celsius and Fahrenheit agree.</p>
</div>
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    From,
    To,
}

/// Element ids of one converter.
#[derive(Debug, Clone, Copy)]
struct Ids {
    from_value: &'static str,
    from_unit: &'static str,
    to_value: &'static str,
    to_unit: &'static str,
    switch: &'static str,
    final_result: &'static str,
    all_conversions: &'static str,
}

struct ScaleUnit {
    key: &'static str,
    name: &'static str,
    abbrev: &'static str,
}

#[derive(Clone, Copy)]
enum Scale {
    Linear(UnitTable),
    Temperature,
}

impl Scale {
    fn units(&self) -> Vec<ScaleUnit> {
        match self {
            Scale::Linear(table) => table
                .units
                .iter()
                .map(|u| ScaleUnit {
                    key: u.key,
                    name: u.name,
                    abbrev: u.abbrev,
                })
                .collect(),
            Scale::Temperature => TemperatureScale::ALL
                .iter()
                .map(|s| ScaleUnit {
                    key: s.key(),
                    name: s.name(),
                    abbrev: s.abbrev(),
                })
                .collect(),
        }
    }

    fn options(&self) -> Vec<(String, String)> {
        match self {
            Scale::Linear(table) => table.units.iter().map(|u| (u.key.to_string(), u.label())).collect(),
            Scale::Temperature => TemperatureScale::ALL
                .iter()
                .map(|s| (s.key().to_string(), s.label()))
                .collect(),
        }
    }

    fn display(&self, value: f64) -> String {
        match self {
            Scale::Linear(_) => format_value(value),
            Scale::Temperature => format_temperature(value),
        }
    }
}

struct Converter {
    ids: Ids,
    result_id: &'static str,
    scale: Scale,
    from_default: &'static str,
    to_default: &'static str,
    initial: &'static str,
    to_canonical: fn(f64, &str) -> Option<f64>,
    from_canonical: fn(f64, &str) -> Option<f64>,
    input_format: fn(f64) -> String,
}

fn length_to_meters(value: f64, key: &str) -> Option<f64> {
    LENGTH.to_canonical(value, key)
}

fn length_from_meters(value: f64, key: &str) -> Option<f64> {
    LENGTH.from_canonical(value, key)
}

fn area_to_square_meters(value: f64, key: &str) -> Option<f64> {
    AREA.to_canonical(value, key)
}

fn area_from_square_meters(value: f64, key: &str) -> Option<f64> {
    AREA.from_canonical(value, key)
}

static LENGTH_CONVERTER: Converter = Converter {
    ids: Ids {
        from_value: "length-from-value",
        from_unit: "length-from-unit",
        to_value: "length-to-value",
        to_unit: "length-to-unit",
        switch: "length-switch-btn",
        final_result: "length-final-result",
        all_conversions: "length-all-conversions",
    },
    result_id: "length-result-container",
    scale: Scale::Linear(LENGTH),
    from_default: "meter",
    to_default: "centimeter",
    initial: "1",
    to_canonical: length_to_meters,
    from_canonical: length_from_meters,
    input_format: format_input_value,
};

static AREA_CONVERTER: Converter = Converter {
    ids: Ids {
        from_value: "area-from-value",
        from_unit: "area-from-unit",
        to_value: "area-to-value",
        to_unit: "area-to-unit",
        switch: "area-switch-btn",
        final_result: "area-final-result",
        all_conversions: "area-all-conversions",
    },
    result_id: "area-result",
    scale: Scale::Linear(AREA),
    from_default: "sq_m",
    to_default: "sq_ft",
    initial: "1",
    to_canonical: area_to_square_meters,
    from_canonical: area_from_square_meters,
    input_format: format_input_value,
};

static TEMPERATURE_CONVERTER: Converter = Converter {
    ids: Ids {
        from_value: "temp-from-value",
        from_unit: "temp-from-unit",
        to_value: "temp-to-value",
        to_unit: "temp-to-unit",
        switch: "temp-switch-btn",
        final_result: "temp-final-result",
        all_conversions: "temp-all-conversions",
    },
    result_id: "temp-result",
    scale: Scale::Temperature,
    from_default: "celsius",
    to_default: "fahrenheit",
    initial: "0",
    to_canonical: temperature_to_celsius,
    from_canonical: temperature_from_celsius,
    input_format: format_temperature_input,
};

fn panel(side: &str, header: &str, value: ElementSpec, unit: ElementSpec) -> Markup {
    el("div")
        .class(&format!("converter-panel converter-{side}"))
        .child(el("div").class("converter-panel-header").text(header))
        .child(el("div").class("form-group").child(value))
        .child(el("div").class("form-group").child(unit))
        .into()
}

fn clear(doc: &mut Document, id: &str) -> CalcResult<()> {
    let node = doc.require(id)?;
    doc.clear_children(node)
}

impl Converter {
    fn render(&self, def: &Definition) -> Markup {
        let ids = self.ids;
        let options = self.scale.options();
        inline_layout(
            def.meta(),
            self.result_id,
            def.has_education(),
            vec![
                el("div")
                    .class("converter-layout")
                    .child(panel(
                        "from",
                        "From",
                        el("input")
                            .id(ids.from_value)
                            .attr("type", "number")
                            .attr("placeholder", "Enter value")
                            .value(self.initial),
                        select(ids.from_unit, &options, self.from_default),
                    ))
                    .child(
                        el("div").class("converter-swap-section").child(
                            el("button")
                                .id(ids.switch)
                                .class("converter-swap-btn")
                                .attr("title", "Swap Units")
                                .text("⇆"),
                        ),
                    )
                    .child(panel(
                        "to",
                        "To",
                        el("input").id(ids.to_value).attr("type", "number").attr("placeholder", "Result"),
                        select(ids.to_unit, &options, self.to_default),
                    ))
                    .into(),
                el("div").id(ids.final_result).class("converter-final-result").into(),
                el("div").id(ids.all_conversions).class("converter-all-results").into(),
            ],
        )
    }

    fn group(&'static self) -> FieldGroup<Side> {
        let ids = self.ids;
        let unit = |select_id| UnitBinding {
            select_id,
            to_canonical: self.to_canonical,
            from_canonical: self.from_canonical,
        };
        FieldGroup::new(ids.from_value)
            .field(
                Side::From,
                FieldBinding::float(ids.from_value, self.input_format).with_unit(unit(ids.from_unit)),
            )
            .field(
                Side::To,
                FieldBinding::float(ids.to_value, self.input_format).with_unit(unit(ids.to_unit)),
            )
            .rule(Rule::new(Side::To, &[Side::From], |v| Ok(v[0])))
            .rule(Rule::new(Side::From, &[Side::To], |v| Ok(v[0])))
            .result(self.result_id)
            .summary(move |doc, values| self.summarize(doc, values))
    }

    fn bind(&'static self, doc: &mut Document, scope: &mut MountScope) -> CalcResult<()> {
        let ids = self.ids;
        let group = Rc::new(self.group());

        // A unit change keeps the "from" value and recomputes "to".
        FieldGroup::listen(&group, doc, scope, ids.from_value, EventKind::Input, Side::From)?;
        FieldGroup::listen(&group, doc, scope, ids.from_unit, EventKind::Change, Side::From)?;
        FieldGroup::listen(&group, doc, scope, ids.to_unit, EventKind::Change, Side::From)?;
        FieldGroup::listen(&group, doc, scope, ids.to_value, EventKind::Input, Side::To)?;

        let swap = Rc::clone(&group);
        scope.on_id(doc, ids.switch, EventKind::Click, move |doc, _| {
            let from = doc.value_of(ids.from_unit)?;
            let to = doc.value_of(ids.to_unit)?;
            doc.set_value_of(ids.from_unit, to)?;
            doc.set_value_of(ids.to_unit, from)?;
            swap.edit(doc, Side::From).map(|_| ())
        })?;

        group.edit(doc, Side::From)?;
        Ok(())
    }

    fn summarize(&self, doc: &mut Document, values: &Values<Side>) -> CalcResult<()> {
        let ids = self.ids;
        clear(doc, self.result_id)?;
        let from_unit = doc.value_of(ids.from_unit)?;
        let to_unit = doc.value_of(ids.to_unit)?;

        let converted = values.get(Side::From).and_then(|canonical| {
            let from = (self.from_canonical)(canonical, &from_unit)?;
            let to = (self.from_canonical)(canonical, &to_unit)?;
            Some((canonical, from, to))
        });
        let Some((canonical, from, to)) = converted else {
            clear(doc, ids.final_result)?;
            return clear(doc, ids.all_conversions);
        };

        let units = self.scale.units();
        let name_of = |key: &str| units.iter().find(|u| u.key == key).map_or("", |u| u.name);

        show(
            doc,
            ids.final_result,
            [el("div")
                .class("converter-result-equation")
                .child(
                    el("span")
                        .class("converter-result-from")
                        .text(format!("{} {}", self.scale.display(from), name_of(&from_unit))),
                )
                .child(el("span").class("converter-result-equals").text(" = "))
                .child(
                    el("span")
                        .class("converter-result-to")
                        .text(format!("{} {}", self.scale.display(to), name_of(&to_unit))),
                )],
        )?;

        let items = units.iter().filter(|u| u.key != from_unit).filter_map(|u| {
            let value = (self.from_canonical)(canonical, u.key)?;
            let class = if u.key == to_unit {
                "converter-grid-item active"
            } else {
                "converter-grid-item"
            };
            Some(
                el("div")
                    .class(class)
                    .child(el("span").class("converter-grid-value").text(self.scale.display(value)))
                    .child(
                        el("span")
                            .class("converter-grid-unit")
                            .text(format!("{} ({})", u.name, u.abbrev)),
                    ),
            )
        });
        show(
            doc,
            ids.all_conversions,
            [
                Markup::from(el("div").class("converter-grid-title").text("All Conversions")),
                el("div").class("converter-grid").children(items).into(),
            ],
        )
    }
}

pub fn length() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "length-converter",
            "Length Converter",
            "Convert between various metric and imperial length units.",
        ),
        |def| LENGTH_CONVERTER.render(def),
        |doc, scope| LENGTH_CONVERTER.bind(doc, scope),
    )
    .with_education(LENGTH_EDU)
}

pub fn area() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "area-converter",
            "Area Converter",
            "Convert between various metric and imperial area units.",
        ),
        |def| AREA_CONVERTER.render(def),
        |doc, scope| AREA_CONVERTER.bind(doc, scope),
    )
    .with_education(AREA_EDU)
}

pub fn temperature() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "temperature-converter",
            "Temperature Converter",
            "Convert between Celsius, Fahrenheit, Kelvin, and Rankine.",
        ),
        |def| TEMPERATURE_CONVERTER.render(def),
        |doc, scope| TEMPERATURE_CONVERTER.bind(doc, scope),
    )
    .with_education(TEMPERATURE_EDU)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn grid_items(doc: &Document, id: &str) -> Vec<String> {
        let all = doc.require(id).unwrap();
        doc.query_class(all, "converter-grid-item")
            .into_iter()
            .map(|n| doc.text_content(n))
            .collect()
    }

    #[test]
    fn test_length_converts_on_mount() {
        let (doc, _scope) = mount(&length());
        assert_eq!(doc.value_of("length-to-value").unwrap(), "100");
        assert_eq!(text(&doc, "length-final-result"), "1 Meter = 100 Centimeter");

        let items = grid_items(&doc, "length-all-conversions");
        assert_eq!(items.len(), LENGTH.units.len() - 1);
        assert!(items.iter().all(|i| !i.ends_with("(m)")));
        assert!(items.contains(&"0.001Kilometer (km)".to_string()));

        let all = doc.require("length-all-conversions").unwrap();
        let active = doc.query_class(all, "active");
        assert_eq!(active.len(), 1);
        assert_eq!(doc.text_content(active[0]), "100Centimeter (cm)");
    }

    #[test]
    fn test_length_reverse_edit() {
        let (mut doc, _scope) = mount(&length());
        let to_unit = doc.require("length-to-unit").unwrap();
        doc.choose(to_unit, "inch");
        assert_eq!(doc.value_of("length-from-value").unwrap(), "1");
        assert_eq!(doc.value_of("length-to-value").unwrap(), "39.37007874");

        let to_value = doc.require("length-to-value").unwrap();
        doc.input(to_value, "3");
        assert_eq!(doc.value_of("length-from-value").unwrap(), "0.0762");
        assert_eq!(text(&doc, "length-final-result"), "0.0762 Meter = 3 Inch");
    }

    #[test]
    fn test_length_swap_units() {
        let (mut doc, _scope) = mount(&length());
        let switch = doc.require("length-switch-btn").unwrap();
        doc.click(switch);
        assert_eq!(doc.value_of("length-from-unit").unwrap(), "centimeter");
        assert_eq!(doc.value_of("length-to-unit").unwrap(), "meter");
        assert_eq!(doc.value_of("length-to-value").unwrap(), "0.01");
    }

    #[test]
    fn test_blank_and_zero_input() {
        let (mut doc, _scope) = mount(&length());
        let from = doc.require("length-from-value").unwrap();
        doc.input(from, "");
        assert_eq!(doc.value_of("length-to-value").unwrap(), "");
        assert_eq!(text(&doc, "length-final-result"), "");
        assert!(grid_items(&doc, "length-all-conversions").is_empty());

        doc.input(from, "0");
        assert_eq!(doc.value_of("length-to-value").unwrap(), "0");
        assert_eq!(text(&doc, "length-final-result"), "0 Meter = 0 Centimeter");
    }

    #[test]
    fn test_large_values_use_exponent_form() {
        let (mut doc, _scope) = mount(&length());
        let to_unit = doc.require("length-to-unit").unwrap();
        doc.choose(to_unit, "nanometer");
        let from = doc.require("length-from-value").unwrap();
        doc.input(from, "10");
        assert_eq!(doc.value_of("length-to-value").unwrap(), "1.000000e+10");
    }

    #[test]
    fn test_area_defaults() {
        let (doc, _scope) = mount(&area());
        assert_eq!(doc.value_of("area-to-value").unwrap(), "10.76391042");
        assert_eq!(text(&doc, "area-final-result"), "1 Square Meter = 10.76391042 Square Foot");
        assert_eq!(grid_items(&doc, "area-all-conversions").len(), 20);
    }

    #[test]
    fn test_temperature_conversions() {
        let (mut doc, _scope) = mount(&temperature());
        assert_eq!(doc.value_of("temp-to-value").unwrap(), "32");
        let items = grid_items(&doc, "temp-all-conversions");
        assert_eq!(
            items,
            vec!["32Fahrenheit (°F)", "273.15Kelvin (K)", "491.67Rankine (°R)"]
        );

        let from = doc.require("temp-from-value").unwrap();
        doc.input(from, "-40");
        assert_eq!(doc.value_of("temp-to-value").unwrap(), "-40");

        let to = doc.require("temp-to-value").unwrap();
        doc.input(to, "212");
        assert_eq!(doc.value_of("temp-from-value").unwrap(), "100");
        assert_eq!(text(&doc, "temp-final-result"), "100 Celsius = 212 Fahrenheit");
    }
}
