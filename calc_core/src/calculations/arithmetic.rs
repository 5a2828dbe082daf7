//! Arithmetic sequence and factorial calculators.

use crate::dom::el;
use crate::equations::algebra;
use crate::errors::CalcError;
use crate::numeric::{to_display, to_fixed};
use crate::registry::{Calculator, CalculatorMeta};

use super::layout::{calculate_button, layout, number_input, on_calculate, read_integer, read_number};
use super::Definition;

const ARITHMETIC_EDU: &str = r#"
<div class="educational-section">
    <p>An arithmetic sequence adds the same common difference \( d \) to get from one term to the next. The \( n \)th term is</p>
    \[ a_n = a_1 + (n - 1)d \]
    <p>and the sum of the first \( n \) terms averages the first and last term:</p>
    \[ S_n = \frac{n}{2}(a_1 + a_n) \]
</div>
"#;

const FACTORIAL_EDU: &str = r#"
<div class="educational-section">
    <p>The factorial of a non-negative integer \( n \) is the product of every positive integer up to \( n \):</p>
    \[ n! = n \times (n - 1) \times \cdots \times 2 \times 1 \]
    <p>By convention \( 0! = 1 \). Factorials grow quickly: \( 10! = 3{,}628{,}800 \), and beyond \( 170! \) the value no longer fits in a double-precision number.</p>
</div>
"#;

pub fn arithmetic_sequence() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "arithmetic-sequence-calculator",
            "Arithmetic Sequence",
            "Calculate terms and sum of an arithmetic sequence.",
        ),
        |def| {
            layout(
                def.meta(),
                "arithmetic-result",
                def.has_education(),
                vec![
                    number_input("first-term", "First Term (a₁):", "Enter first term"),
                    number_input("common-difference", "Common Difference (d):", "Enter difference"),
                    number_input("n-terms", "Number of Terms (n):", "Enter n"),
                    calculate_button("calculate-arithmetic", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-arithmetic", "arithmetic-result", |doc| {
                let (Some(first), Some(diff), Some(n)) = (
                    read_number(doc, "first-term")?,
                    read_number(doc, "common-difference")?,
                    read_integer(doc, "n-terms")?,
                ) else {
                    return Err(CalcError::invalid_input("first-term", "", "Please enter valid numbers"));
                };
                let seq = algebra::arithmetic_sequence(first, diff, n)?;
                Ok(vec![
                    "nth Term (aₙ): ".into(),
                    el("strong").text(to_fixed(seq.nth_term, 2)).into(),
                    el("br").into(),
                    format!("Sum of {n} terms: ").into(),
                    el("strong").text(to_fixed(seq.sum, 2)).into(),
                ])
            })
        },
    )
    .with_education(ARITHMETIC_EDU)
}

pub fn factorial() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "factorial-calculator",
            "Factorial Calculator",
            "Calculate the factorial of a non-negative integer n (n!).",
        ),
        |def| {
            layout(
                def.meta(),
                "factorial-result",
                def.has_education(),
                vec![
                    number_input("factorial-n", "n:", "Enter a non-negative integer"),
                    calculate_button("calculate-factorial", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-factorial", "factorial-result", |doc| {
                let Some(n) = read_integer(doc, "factorial-n")? else {
                    return Err(CalcError::invalid_input("factorial-n", "", "Please enter a non-negative integer"));
                };
                let value = algebra::factorial(n)?;
                Ok(vec![format!("{n}! = ").into(), el("strong").text(to_display(value)).into()])
            })
        },
    )
    .with_education(FACTORIAL_EDU)
}
