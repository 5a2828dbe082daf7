//! Percentage calculators.

use crate::dom::{el, Document, Markup};
use crate::equations::percent;
use crate::errors::{CalcError, CalcResult};
use crate::numeric::{to_display, to_fixed};
use crate::registry::{Calculator, CalculatorMeta};

use super::layout::{
    calculate_button, layout, line, number_input, on_calculate, on_calculate_live, placeholder, read_number,
    read_pair,
};
use super::Definition;

const PERCENTAGE_EDU: &str = r#"
<div class="educational-section">
    <p>A percentage is a number expressed as a fraction of 100. To take a percentage of a value, multiply and divide by 100:</p>
    \[ \text{Result} = \frac{\text{Value} \times \text{Percentage}}{100} \]
    <p>For example, 20% of 50 is \( \frac{50 \times 20}{100} = 10 \).</p>
</div>
"#;

const PERCENT_ERROR_EDU: &str = r#"
<div class="educational-section">
    <p>Percent error measures how far a measured value lands from the accepted one, relative to the accepted value.</p>
    \[ \text{Percent Error} = \left| \frac{\text{Measured} - \text{Actual}}{\text{Actual}} \right| \times 100\% \]
    <p>The actual value cannot be zero, since the error is relative to it.</p>
</div>
"#;

const TIME_PERCENTAGE_EDU: &str = r#"
<div class="educational-section">
    <p>The share of a period that has passed is the elapsed time over the total time:</p>
    \[ \text{Elapsed} = \frac{\text{Elapsed Time}}{\text{Total Time}} \times 100\% \]
    <p>Whatever is left is the remaining share:</p>
    \[ \text{Remaining} = 100\% - \text{Elapsed} \]
</div>
"#;

const PERCENTAGE_CHANGE_EDU: &str = r#"
<div class="educational-section">
    <h3>Percent Change Formula</h3>
    \[ \%\text{ change} = 100 \times \frac{\text{final} - \text{initial}}{|\text{initial}|} \]
    <p>Dividing by the <strong>absolute value</strong> of the initial value keeps the sign meaningful: a positive result is an increase, a negative one a decrease, even when the initial value is negative.</p>
    <h4>Example</h4>
    <ol>
        <li>Initial 200, final 250: difference 250 − 200 = 50</li>
        <li>Divide by |200|: 50 / 200 = 0.25</li>
        <li>Multiply by 100: 25%</li>
    </ol>
    <p>Result: <strong>25% increase</strong>.</p>
</div>
"#;

const PERCENTAGE_DECREASE_EDU: &str = r#"
<div class="educational-section">
    <h3>Percent Decrease Formula</h3>
    \[ \%\text{ decrease} = 100 \times \frac{\text{initial} - \text{final}}{|\text{initial}|} \]
    <h4>Example</h4>
    <ol>
        <li>Original 750, new 590: difference 750 − 590 = 160</li>
        <li>Divide by 750: 0.2133</li>
        <li>Multiply by 100: <strong>21.33%</strong></li>
    </ol>
    <p>A negative result means the value actually grew.</p>
</div>
"#;

// ============================================================================
// Percentage of a number
// ============================================================================

pub fn percentage() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "percentage-calculator",
            "Percentage Calculator",
            "Calculate what percent one number is of another, or find a percentage of a number.",
        ),
        |def| {
            layout(
                def.meta(),
                "percentage-result",
                def.has_education(),
                vec![
                    number_input("percent-value", "Value:", "Enter value"),
                    number_input("percent-percentage", "Percentage (%):", "Enter percentage"),
                    calculate_button("calculate-percentage", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate_live(
                doc,
                scope,
                "calculate-percentage",
                &["percent-value", "percent-percentage"],
                "percentage-result",
                |doc| {
                    let (Some(value), Some(pct)) =
                        (read_number(doc, "percent-value")?, read_number(doc, "percent-percentage")?)
                    else {
                        return Ok(vec![placeholder("Enter values...")]);
                    };
                    let result = percent::percent_of(value, pct);
                    Ok(vec![
                        format!("{}% of {} = ", to_display(pct), to_display(value)).into(),
                        el("strong").text(to_fixed(result, 2)).into(),
                    ])
                },
            )
        },
    )
    .with_education(PERCENTAGE_EDU)
}

// ============================================================================
// Percent error
// ============================================================================

pub fn percent_error() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "percent-error-calculator",
            "Percent Error Calculator",
            "Calculate the percentage error between a measured value and the actual value.",
        ),
        |def| {
            layout(
                def.meta(),
                "percent-error-result",
                def.has_education(),
                vec![
                    number_input("actual-value", "Actual Value:", "Enter actual value"),
                    number_input("measured-value", "Measured Value:", "Enter measured value"),
                    calculate_button("calculate-percent-error", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-percent-error", "percent-error-result", |doc| {
                let (actual, measured) = read_pair(doc, "actual-value", "measured-value")?;
                let error = percent::percent_error(actual, measured)?;
                Ok(vec![
                    "Percent Error: ".into(),
                    el("strong").text(format!("{}%", to_fixed(error, 2))).into(),
                ])
            })
        },
    )
    .with_education(PERCENT_ERROR_EDU)
}

// ============================================================================
// Time percentage
// ============================================================================

pub fn time_percentage() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "time-percentage-calculator",
            "Time Percentage Calculator",
            "Calculate the percentage of time elapsed or remaining.",
        ),
        |def| {
            layout(
                def.meta(),
                "time-percentage-result",
                def.has_education(),
                vec![
                    number_input("total-time", "Total Time (minutes):", "Enter total time"),
                    number_input("elapsed-time", "Elapsed Time (minutes):", "Enter elapsed time"),
                    calculate_button("calculate-time-percentage", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-time-percentage", "time-percentage-result", |doc| {
                let t = percent::time_percentage(read_number(doc, "total-time")?, read_number(doc, "elapsed-time")?)?;
                let mut out = line("Elapsed: ", format!("{}%", to_fixed(t.elapsed, 2)));
                out.push("Remaining: ".into());
                out.push(el("strong").text(format!("{}%", to_fixed(t.remaining, 2))).into());
                Ok(out)
            })
        },
    )
    .with_education(TIME_PERCENTAGE_EDU)
}

// ============================================================================
// Change and decrease
// ============================================================================

fn read_initial_final(doc: &Document, initial_id: &str, final_id: &str) -> CalcResult<(f64, f64)> {
    match (read_number(doc, initial_id)?, read_number(doc, final_id)?) {
        (Some(i), Some(f)) => Ok((i, f)),
        _ => Err(CalcError::invalid_input(initial_id, "", "Please enter valid numbers.")),
    }
}

/// Headline, sentence, three-step derivation and the signed difference.
fn change_report(heading: &str, percent: f64, sentence: String, steps: [String; 3], difference: f64) -> Vec<Markup> {
    vec![
        el("div")
            .class("change-headline")
            .child(el("div").text(heading).child(el("strong").text(format!("{}%", to_fixed(percent, 4)))))
            .child(el("div").class("change-sentence").text(sentence))
            .into(),
        el("hr").into(),
        el("div")
            .child(el("strong").text("Steps:"))
            .child(
                el("div")
                    .class("steps")
                    .children(steps.into_iter().flat_map(|s| [Markup::from(s), el("br").into()])),
            )
            .into(),
        el("hr").into(),
        el("div")
            .child(el("strong").text("Difference"))
            .child(el("div").class("hint").text("Final Value − Initial Value"))
            .child(
                el("div")
                    .class(if difference >= 0.0 { "difference positive" } else { "difference negative" })
                    .text(to_display(difference)),
            )
            .into(),
    ]
}

/// Steps for `(a − b) / |initial| × 100`.
fn derivation(a: f64, b: f64, initial: f64, result: f64) -> [String; 3] {
    let diff = a - b;
    let abs_initial = initial.abs();
    [
        format!("1. Difference: {} − {} = {}", to_display(a), to_display(b), to_display(diff)),
        format!(
            "2. Divide by |{}|: {} / {} = {}",
            to_display(initial),
            to_display(diff),
            to_display(abs_initial),
            to_fixed(diff / abs_initial, 6)
        ),
        format!("3. Multiply by 100: {}%", to_fixed(result, 4)),
    ]
}

pub fn percentage_change() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "percentage-change-calculator",
            "Percentage Change Calculator",
            "Calculate the percentage change between an initial and final value. Reports increase or decrease automatically.",
        ),
        |def| {
            layout(
                def.meta(),
                "pchange-result",
                def.has_education(),
                vec![
                    number_input("pchange-initial", "Initial Value", "Enter initial value"),
                    number_input("pchange-final", "Final Value", "Enter final value"),
                    calculate_button("calculate-pchange", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-pchange", "pchange-result", |doc| {
                let (initial, final_value) = read_initial_final(doc, "pchange-initial", "pchange-final")?;
                let change = percent::percent_change(initial, final_value)?;
                let direction = if change.is_increase() { "increase" } else { "decrease" };
                let sentence = format!(
                    "{} is a {}% {} of {}.",
                    to_display(final_value),
                    to_fixed(change.percent.abs(), 2),
                    direction,
                    to_display(initial)
                );
                Ok(change_report(
                    "Percent Change: ",
                    change.percent.abs(),
                    sentence,
                    derivation(final_value, initial, initial, change.percent),
                    change.difference,
                ))
            })
        },
    )
    .with_education(PERCENTAGE_CHANGE_EDU)
}

pub fn percentage_decrease() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "percentage-decrease-calculator",
            "Percentage Decrease Calculator",
            "Calculate the percentage decrease between an original value and a new value.",
        ),
        |def| {
            layout(
                def.meta(),
                "pdecrease-result",
                def.has_education(),
                vec![
                    number_input("pdecrease-initial", "Initial Value (Original)", "Enter original value"),
                    number_input("pdecrease-final", "Final Value (New)", "Enter new value"),
                    calculate_button("calculate-pdecrease", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-pdecrease", "pdecrease-result", |doc| {
                let (initial, final_value) = read_initial_final(doc, "pdecrease-initial", "pdecrease-final")?;
                let decrease = percent::percent_decrease(initial, final_value)?;
                let label = if decrease >= 0.0 {
                    "decrease"
                } else {
                    "increase (negative decrease)"
                };
                let sentence = format!(
                    "{} is a {}% {} of {}.",
                    to_display(final_value),
                    to_fixed(decrease.abs(), 2),
                    label,
                    to_display(initial)
                );
                Ok(change_report(
                    "Decrease (%): ",
                    decrease,
                    sentence,
                    derivation(initial, final_value, initial, decrease),
                    final_value - initial,
                ))
            })
        },
    )
    .with_education(PERCENTAGE_DECREASE_EDU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::EventKind;
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

    fn click(doc: &mut Document, id: &str) {
        let node = doc.require(id).unwrap();
        doc.dispatch(node, EventKind::Click);
    }

    #[test]
    fn test_percentage_updates_live() {
        let (mut doc, _scope) = mount(&percentage());
        let value = doc.require("percent-value").unwrap();
        doc.input(value, "50");
        assert_eq!(text(&doc, "percentage-result"), "Enter values...");
        let pct = doc.require("percent-percentage").unwrap();
        doc.input(pct, "20");
        assert_eq!(text(&doc, "percentage-result"), "20% of 50 = 10.00");
    }

    #[test]
    fn test_percent_error_messages() {
        let (mut doc, _scope) = mount(&percent_error());
        click(&mut doc, "calculate-percent-error");
        assert_eq!(text(&doc, "percent-error-result"), "Please enter valid numbers");
        doc.set_value_of("actual-value", "0").unwrap();
        doc.set_value_of("measured-value", "3").unwrap();
        click(&mut doc, "calculate-percent-error");
        assert_eq!(text(&doc, "percent-error-result"), "Actual value cannot be zero");
        doc.set_value_of("actual-value", "50").unwrap();
        doc.set_value_of("measured-value", "45").unwrap();
        click(&mut doc, "calculate-percent-error");
        assert_eq!(text(&doc, "percent-error-result"), "Percent Error: 10.00%");
    }

    #[test]
    fn test_time_percentage_result() {
        let (mut doc, _scope) = mount(&time_percentage());
        doc.set_value_of("total-time", "60").unwrap();
        doc.set_value_of("elapsed-time", "15").unwrap();
        click(&mut doc, "calculate-time-percentage");
        assert_eq!(text(&doc, "time-percentage-result"), "Elapsed: 25.00%Remaining: 75.00%");
    }

    #[test]
    fn test_percentage_change_report() {
        let (mut doc, _scope) = mount(&percentage_change());
        doc.set_value_of("pchange-initial", "200").unwrap();
        doc.set_value_of("pchange-final", "250").unwrap();
        click(&mut doc, "calculate-pchange");
        let out = text(&doc, "pchange-result");
        assert!(out.contains("Percent Change: 25.0000%"));
        assert!(out.contains("250 is a 25.00% increase of 200."));
        assert!(out.contains("1. Difference: 250 − 200 = 50"));
        assert!(out.contains("2. Divide by |200|: 50 / 200 = 0.250000"));

        doc.set_value_of("pchange-initial", "0").unwrap();
        click(&mut doc, "calculate-pchange");
        assert_eq!(text(&doc, "pchange-result"), "Initial value cannot be zero (division by zero).");
        doc.set_value_of("pchange-initial", "").unwrap();
        click(&mut doc, "calculate-pchange");
        assert_eq!(text(&doc, "pchange-result"), "Please enter valid numbers.");
    }

    #[test]
    fn test_percentage_decrease_report() {
        let (mut doc, _scope) = mount(&percentage_decrease());
        doc.set_value_of("pdecrease-initial", "750").unwrap();
        doc.set_value_of("pdecrease-final", "590").unwrap();
        click(&mut doc, "calculate-pdecrease");
        let out = text(&doc, "pdecrease-result");
        assert!(out.contains("Decrease (%): 21.3333%"));
        assert!(out.contains("590 is a 21.33% decrease of 750."));
        assert!(out.contains("1. Difference: 750 − 590 = 160"));

        doc.set_value_of("pdecrease-final", "900").unwrap();
        click(&mut doc, "calculate-pdecrease");
        assert!(text(&doc, "pdecrease-result").contains("increase (negative decrease)"));
    }
}
