//! Quadratic equation solver and discriminant calculator.

use crate::dom::{el, Document, Markup};
use crate::equations::algebra::{discriminant as discriminant_of, solve_quadratic, QuadraticForm, RootNature, Roots};
use crate::errors::{CalcError, CalcResult};
use crate::numeric::{to_display, to_fixed};
use crate::registry::{Calculator, CalculatorMeta};

use super::layout::{
    bind_radio_group, calculate_button, checkbox, checked_radio, is_checked, layout, layout_with_details,
    number_input, on_calculate, placeholder, radio_group, read_number, show,
};
use super::Definition;

const QUADRATIC_EDU: &str = r#"
<div class="educational-section">
    <p>A quadratic equation has the form \( ax^2 + bx + c = 0 \) with \( a \neq 0 \). Its roots are given by the quadratic formula:</p>
    \[ x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a} \]
    <p>The same parabola can be written in other forms:</p>
    <ul>
        <li><strong>Vertex form</strong> \( a(x - h)^2 + k = 0 \): the vertex sits at \( (h, k) \) and \( x = h \pm \sqrt{-k/a} \).</li>
        <li><strong>Factored form</strong> \( a(x - x_1)(x - x_2) = 0 \): the roots can be read off directly.</li>
    </ul>
    <p>When \( b^2 - 4ac &lt; 0 \) the parabola never crosses the x-axis and the roots are complex conjugates.</p>
</div>
"#;

const DISCRIMINANT_EDU: &str = r#"
<div class="educational-section">
    <p>The discriminant of \( ax^2 + bx + c \) is the part of the quadratic formula under the square root:</p>
    \[ \Delta = b^2 - 4ac \]
    <ul>
        <li>\( \Delta &gt; 0 \): two distinct real roots</li>
        <li>\( \Delta = 0 \): one repeated real root</li>
        <li>\( \Delta &lt; 0 \): two complex roots</li>
    </ul>
</div>
"#;

const SOLVE_PLACEHOLDER: &str = "Enter values and click Solve";
const FORMS: [(&str, &str); 3] = [("standard", "Standard"), ("vertex", "Vertex"), ("factored", "Factored")];

// ============================================================================
// Quadratic equation
// ============================================================================

/// Coefficient inputs for a form: `quad-a` plus two form-specific fields.
fn form_inputs(form: &str) -> Vec<Markup> {
    let fields: [(&str, &str, &str); 2] = match form {
        "vertex" => [("quad-h", "H (vertex x):", "Enter H"), ("quad-k", "K (vertex y):", "Enter K")],
        "factored" => [("quad-x1", "x₁:", "Enter x₁"), ("quad-x2", "x₂:", "Enter x₂")],
        _ => [("quad-b", "B:", "Enter B"), ("quad-c", "C:", "Enter C")],
    };
    std::iter::once(number_input("quad-a", "A:", "Enter A"))
        .chain(fields.iter().map(|(id, label, hint)| number_input(id, label, hint)))
        .collect()
}

/// Blank fields become NaN so the solver reports its own message.
fn coefficient(doc: &Document, id: &str) -> CalcResult<f64> {
    Ok(read_number(doc, id)?.unwrap_or(f64::NAN))
}

fn read_form(doc: &Document) -> CalcResult<QuadraticForm> {
    let a = coefficient(doc, "quad-a")?;
    Ok(match checked_radio(doc, "quad-form").as_deref() {
        Some("vertex") => QuadraticForm::Vertex {
            a,
            h: coefficient(doc, "quad-h")?,
            k: coefficient(doc, "quad-k")?,
        },
        Some("factored") => QuadraticForm::Factored {
            a,
            x1: coefficient(doc, "quad-x1")?,
            x2: coefficient(doc, "quad-x2")?,
        },
        _ => QuadraticForm::Standard {
            a,
            b: coefficient(doc, "quad-b")?,
            c: coefficient(doc, "quad-c")?,
        },
    })
}

fn roots_markup(form: &QuadraticForm, roots: &Roots) -> Vec<Markup> {
    let f4 = |v: f64| to_fixed(v, 4);
    match roots {
        Roots::Real(x1, x2) => {
            let fmt = |v: f64| match form {
                QuadraticForm::Factored { .. } => to_display(v),
                _ => f4(v),
            };
            vec![
                "x₁ = ".into(),
                el("strong").text(fmt(*x1)).into(),
                el("br").into(),
                "x₂ = ".into(),
                el("strong").text(fmt(*x2)).into(),
            ]
        }
        Roots::Double(x) => vec![
            "x = ".into(),
            el("strong").text(f4(*x)).into(),
            " (Double Root)".into(),
        ],
        Roots::Complex { re, im } => vec![
            format!("x₁ = {} + {}i", f4(*re), f4(*im)).into(),
            el("br").into(),
            format!("x₂ = {} - {}i", f4(*re), f4(*im)).into(),
        ],
        Roots::NoReal => match form {
            QuadraticForm::Standard { .. } => vec!["No real roots (Δ < 0)".into()],
            _ => vec!["No real roots".into()],
        },
    }
}

fn steps_markup(steps: &[(String, Vec<String>)]) -> Vec<Markup> {
    steps
        .iter()
        .map(|(title, lines)| {
            el("div")
                .class("explanation-step")
                .child(el("strong").text(title.clone()))
                .children(lines.iter().flat_map(|l| [Markup::from(el("br")), Markup::from(l.clone())]))
                .into()
        })
        .collect()
}

fn reset_quadratic(doc: &mut Document) -> CalcResult<()> {
    show(doc, "quadratic-result", [placeholder(SOLVE_PLACEHOLDER)])?;
    show(doc, "quadratic-explanation", Vec::<Markup>::new())
}

pub fn quadratic() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "quadratic-equation-calculator",
            "Quadratic Equation",
            "Solve quadratic equations using Standard, Vertex, or Factored forms.",
        ),
        |def| {
            let mut inputs = vec![
                el("div")
                    .class("form-group")
                    .child(el("label").text("Equation Form:"))
                    .child(radio_group("quad-form", &FORMS, "standard"))
                    .into(),
                el("div")
                    .id("dynamic-inputs")
                    .children(form_inputs("standard"))
                    .into(),
            ];
            inputs.push(checkbox("allow-complex", "Allow negative discriminant", false));
            inputs.push(calculate_button("calculate-quadratic", "Solve"));
            layout_with_details(
                def.meta(),
                "quadratic-result",
                Some(el("div").id("quadratic-explanation").class("explanation").into()),
                def.has_education(),
                inputs,
            )
        },
        |doc, scope| {
            bind_radio_group(doc, scope, "quad-form", |doc, form| {
                show(doc, "dynamic-inputs", form_inputs(form))?;
                reset_quadratic(doc)
            })?;
            on_calculate(doc, scope, "calculate-quadratic", "quadratic-result", |doc| {
                let form = read_form(doc)?;
                let allow_complex = is_checked(doc, "allow-complex")?;
                match solve_quadratic(form, allow_complex) {
                    Ok(solution) => {
                        show(doc, "quadratic-explanation", steps_markup(&solution.steps))?;
                        Ok(roots_markup(&form, &solution.roots))
                    }
                    Err(err) => {
                        show(doc, "quadratic-explanation", Vec::<Markup>::new())?;
                        Err(err)
                    }
                }
            })
        },
    )
    .with_education(QUADRATIC_EDU)
}

// ============================================================================
// Discriminant
// ============================================================================

pub fn discriminant() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "discriminant-calculator",
            "Discriminant Calculator",
            "Calculate the discriminant (b² - 4ac) of a quadratic equation.",
        ),
        |def| {
            layout(
                def.meta(),
                "discriminant-result",
                def.has_education(),
                vec![
                    number_input("disc-a", "A:", "Enter A"),
                    number_input("disc-b", "B:", "Enter B"),
                    number_input("disc-c", "C:", "Enter C"),
                    calculate_button("calculate-discriminant", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-discriminant", "discriminant-result", |doc| {
                let (Some(a), Some(b), Some(c)) = (
                    read_number(doc, "disc-a")?,
                    read_number(doc, "disc-b")?,
                    read_number(doc, "disc-c")?,
                ) else {
                    return Err(CalcError::invalid_input("disc", "", "Please enter valid coefficients"));
                };
                let d = discriminant_of(a, b, c);
                Ok(vec![
                    "Discriminant = ".into(),
                    el("strong").text(to_display(d)).into(),
                    el("br").into(),
                    el("br").into(),
                    RootNature::classify(d).describe().into(),
                ])
            })
        },
    )
    .with_education(DISCRIMINANT_EDU)
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

    fn click(doc: &mut Document, id: &str) {
        let node = doc.require(id).unwrap();
        doc.click(node);
    }

    #[test]
    fn test_quadratic_standard_roots_and_steps() {
        let (mut doc, _scope) = mount(&quadratic());
        doc.set_value_of("quad-a", "1").unwrap();
        doc.set_value_of("quad-b", "-3").unwrap();
        doc.set_value_of("quad-c", "2").unwrap();
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "x₁ = 2.0000x₂ = 1.0000");
        let explanation = text(&doc, "quadratic-explanation");
        assert!(explanation.contains("Step 2: Calculate Discriminant (Δ)"));
        assert!(explanation.contains("Δ = 1"));
    }

    #[test]
    fn test_quadratic_complex_toggle() {
        let (mut doc, _scope) = mount(&quadratic());
        doc.set_value_of("quad-a", "1").unwrap();
        doc.set_value_of("quad-b", "2").unwrap();
        doc.set_value_of("quad-c", "5").unwrap();
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "No real roots (Δ < 0)");

        let allow = doc.require("allow-complex").unwrap();
        doc.toggle(allow, true);
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "x₁ = -1.0000 + 2.0000ix₂ = -1.0000 - 2.0000i");
    }

    #[test]
    fn test_quadratic_form_switch_swaps_inputs() {
        let (mut doc, _scope) = mount(&quadratic());
        doc.set_value_of("quad-a", "1").unwrap();
        doc.set_value_of("quad-b", "-2").unwrap();
        doc.set_value_of("quad-c", "1").unwrap();
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "x = 1.0000 (Double Root)");

        let vertex = doc.require("quad-form-vertex").unwrap();
        doc.toggle(vertex, true);
        assert!(doc.get_element_by_id("quad-b").is_none());
        assert!(doc.get_element_by_id("quad-h").is_some());
        assert_eq!(text(&doc, "quadratic-result"), SOLVE_PLACEHOLDER);
        assert_eq!(text(&doc, "quadratic-explanation"), "");

        doc.set_value_of("quad-a", "1").unwrap();
        doc.set_value_of("quad-h", "2").unwrap();
        doc.set_value_of("quad-k", "-4").unwrap();
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "x₁ = 4.0000x₂ = 0.0000");
    }

    #[test]
    fn test_quadratic_validation() {
        let (mut doc, _scope) = mount(&quadratic());
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "Please enter valid coefficients");
        doc.set_value_of("quad-a", "0").unwrap();
        doc.set_value_of("quad-b", "1").unwrap();
        doc.set_value_of("quad-c", "1").unwrap();
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "Not a quadratic equation (A = 0)");
    }

    #[test]
    fn test_factored_form_shows_given_roots() {
        let (mut doc, _scope) = mount(&quadratic());
        let factored = doc.require("quad-form-factored").unwrap();
        doc.toggle(factored, true);
        doc.set_value_of("quad-a", "2").unwrap();
        doc.set_value_of("quad-x1", "3").unwrap();
        doc.set_value_of("quad-x2", "-1.5").unwrap();
        click(&mut doc, "calculate-quadratic");
        assert_eq!(text(&doc, "quadratic-result"), "x₁ = 3x₂ = -1.5");
    }

    #[test]
    fn test_discriminant_nature() {
        let (mut doc, _scope) = mount(&discriminant());
        click(&mut doc, "calculate-discriminant");
        assert_eq!(text(&doc, "discriminant-result"), "Please enter valid coefficients");
        doc.set_value_of("disc-a", "1").unwrap();
        doc.set_value_of("disc-b", "2").unwrap();
        doc.set_value_of("disc-c", "5").unwrap();
        click(&mut doc, "calculate-discriminant");
        assert_eq!(text(&doc, "discriminant-result"), "Discriminant = -16Two complex roots.");
    }
}
