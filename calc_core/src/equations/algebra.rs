//! # Algebra
//!
//! Quadratic roots, discriminant classification, arithmetic sequences and
//! factorials.
//!
//! ## Quadratic forms
//!
//! - Standard: `Ax² + Bx + C = 0`
//! - Vertex: `A(x − H)² + K = 0`
//! - Factored: `A(x − x₁)(x − x₂) = 0`
//!
//! ## Example
//!
//! ```rust
//! use calc_core::equations::algebra::{solve_quadratic, QuadraticForm, Roots};
//!
//! let sol = solve_quadratic(QuadraticForm::Standard { a: 1.0, b: -3.0, c: 2.0 }, false).unwrap();
//! assert_eq!(sol.roots, Roots::Real(2.0, 1.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{to_display, to_fixed};

// =============================================================================
// QUADRATIC EQUATIONS
// =============================================================================

/// Coefficients of a quadratic in one of its three common forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum QuadraticForm {
    Standard { a: f64, b: f64, c: f64 },
    Vertex { a: f64, h: f64, k: f64 },
    Factored { a: f64, x1: f64, x2: f64 },
}

impl QuadraticForm {
    /// Radio value used by the form selector.
    pub fn key(&self) -> &'static str {
        match self {
            QuadraticForm::Standard { .. } => "standard",
            QuadraticForm::Vertex { .. } => "vertex",
            QuadraticForm::Factored { .. } => "factored",
        }
    }
}

/// Roots of a quadratic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Roots {
    /// Two distinct real roots.
    Real(f64, f64),
    /// One repeated real root.
    Double(f64),
    /// `re ± im·i`.
    Complex { re: f64, im: f64 },
    /// Negative discriminant with complex roots not requested.
    NoReal,
}

/// Roots plus the worked steps that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticSolution {
    pub roots: Roots,
    /// Discriminant for the standard form, `−K/A` for the vertex form.
    pub key_value: Option<f64>,
    /// Titled explanation steps, in order.
    pub steps: Vec<(String, Vec<String>)>,
}

/// Solve a quadratic.
///
/// # Formula
/// - Standard: Δ = B² − 4AC, x = (−B ± √Δ) / 2A
/// - Vertex: x = H ± √(−K/A)
/// - Factored: x = x₁, x₂
///
/// With `allow_complex`, a negative Δ (or −K/A) yields conjugate roots
/// instead of [`Roots::NoReal`].
pub fn solve_quadratic(form: QuadraticForm, allow_complex: bool) -> CalcResult<QuadraticSolution> {
    let d = to_display;
    let f4 = |v: f64| to_fixed(v, 4);
    match form {
        QuadraticForm::Standard { a, b, c } => {
            if !(a.is_finite() && b.is_finite() && c.is_finite()) {
                return Err(CalcError::invalid_input("quad", "", "Please enter valid coefficients"));
            }
            if a == 0.0 {
                return Err(CalcError::invalid_input("quad-a", "0", "Not a quadratic equation (A = 0)"));
            }
            let disc = discriminant(a, b, c);
            let mut steps = vec![
                (
                    "Step 1: Identify coefficients".to_string(),
                    vec![format!("A = {}, B = {}, C = {}", d(a), d(b), d(c))],
                ),
                (
                    "Step 2: Calculate Discriminant (Δ)".to_string(),
                    vec![
                        "Δ = B² - 4AC".to_string(),
                        format!("Δ = ({})² - 4({})({})", d(b), d(a), d(c)),
                        format!("Δ = {} - {}", d(b * b), d(4.0 * a * c)),
                        format!("Δ = {}", d(disc)),
                    ],
                ),
            ];
            let roots = if disc > 0.0 {
                let sq = disc.sqrt();
                let x1 = (-b + sq) / (2.0 * a);
                let x2 = (-b - sq) / (2.0 * a);
                steps.push((
                    "Step 3: Apply Quadratic Formula".to_string(),
                    vec![
                        "Since Δ > 0, there are two real roots.".to_string(),
                        "x = (-B ± √Δ) / 2A".to_string(),
                        format!("x₁ = ({} + {}) / {} = {}", d(-b), f4(sq), d(2.0 * a), f4(x1)),
                        format!("x₂ = ({} - {}) / {} = {}", d(-b), f4(sq), d(2.0 * a), f4(x2)),
                    ],
                ));
                Roots::Real(x1, x2)
            } else if disc == 0.0 {
                let x = -b / (2.0 * a);
                steps.push((
                    "Step 3: Apply Quadratic Formula".to_string(),
                    vec![
                        "Since Δ = 0, there is one repeated real root.".to_string(),
                        "x = -B / 2A".to_string(),
                        format!("x = {} / {} = {}", d(-b), d(2.0 * a), f4(x)),
                    ],
                ));
                Roots::Double(x)
            } else if allow_complex {
                let re = -b / (2.0 * a);
                let im = disc.abs().sqrt() / (2.0 * a);
                steps.push((
                    "Step 3: Apply Quadratic Formula".to_string(),
                    vec![
                        "Since Δ < 0, the roots are complex.".to_string(),
                        format!("Real Part: -B / 2A = {}", f4(re)),
                        format!("Imaginary Part: √|Δ| / 2A = √{} / {} = {}i", d(disc.abs()), d(2.0 * a), f4(im)),
                    ],
                ));
                Roots::Complex { re, im }
            } else {
                steps.push((
                    "Step 3: Analyze Discriminant".to_string(),
                    vec![
                        "Since Δ < 0, there are no real roots for this equation.".to_string(),
                        "Enable \"Allow negative discriminant\" to see complex solutions.".to_string(),
                    ],
                ));
                Roots::NoReal
            };
            Ok(QuadraticSolution {
                roots,
                key_value: Some(disc),
                steps,
            })
        }
        QuadraticForm::Vertex { a, h, k } => {
            if !(a.is_finite() && h.is_finite() && k.is_finite()) {
                return Err(CalcError::invalid_input("quad", "", "Please enter valid values"));
            }
            if a == 0.0 {
                return Err(CalcError::invalid_input("quad-a", "0", "A cannot be 0"));
            }
            let rhs = -k / a;
            let mut steps = vec![
                (
                    "Step 1: Set up the equation".to_string(),
                    vec![format!("{}(x - {})² + {} = 0", d(a), d(h), d(k))],
                ),
                (
                    "Step 2: Isolate the squared term".to_string(),
                    vec![
                        format!("{}(x - {})² = {}", d(a), d(h), d(-k)),
                        format!("(x - {})² = {}", d(h), d(rhs)),
                    ],
                ),
            ];
            let roots = if rhs > 0.0 {
                let sq = rhs.sqrt();
                steps.push((
                    "Step 3: Take the square root".to_string(),
                    vec![
                        format!("x - {} = ±{}", d(h), f4(sq)),
                        format!("x₁ = {} + {} = {}", d(h), f4(sq), f4(h + sq)),
                        format!("x₂ = {} - {} = {}", d(h), f4(sq), f4(h - sq)),
                    ],
                ));
                Roots::Real(h + sq, h - sq)
            } else if rhs == 0.0 {
                steps.push((
                    "Step 3: Solve for x".to_string(),
                    vec![format!("(x - {})² = 0 implies x = {}", d(h), d(h))],
                ));
                Roots::Double(h)
            } else if allow_complex {
                let im = rhs.abs().sqrt();
                steps.push((
                    "Step 3: Take the square root".to_string(),
                    vec![
                        "Since the right side is negative, we use imaginary numbers.".to_string(),
                        format!("x = {} ± {}i", d(h), f4(im)),
                    ],
                ));
                Roots::Complex { re: h, im }
            } else {
                steps.push((
                    "Step 3: Analyze".to_string(),
                    vec![format!(
                        "Since (x - {})² equals a negative number ({}), there are no real solutions.",
                        d(h),
                        d(rhs)
                    )],
                ));
                Roots::NoReal
            };
            Ok(QuadraticSolution {
                roots,
                key_value: Some(rhs),
                steps,
            })
        }
        QuadraticForm::Factored { a, x1, x2 } => {
            if !(a.is_finite() && x1.is_finite() && x2.is_finite()) {
                return Err(CalcError::invalid_input("quad", "", "Please enter valid values"));
            }
            if a == 0.0 {
                return Err(CalcError::invalid_input("quad-a", "0", "A cannot be 0"));
            }
            let steps = vec![
                (
                    "Step 1: Analyze the Factored Form".to_string(),
                    vec![format!("Equation: {}(x - {})(x - {}) = 0", d(a), d(x1), d(x2))],
                ),
                (
                    "Step 2: Zero Product Property".to_string(),
                    vec![
                        "If the product of factors is zero, at least one of the factors must be zero.".to_string(),
                        format!("Either (x - {}) = 0 OR (x - {}) = 0", d(x1), d(x2)),
                    ],
                ),
                (
                    "Step 3: Solve for x".to_string(),
                    vec![format!("x = {}", d(x1)), format!("x = {}", d(x2))],
                ),
            ];
            Ok(QuadraticSolution {
                roots: Roots::Real(x1, x2),
                key_value: None,
                steps,
            })
        }
    }
}

/// B² − 4AC
#[inline]
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    b * b - 4.0 * a * c
}

/// Nature of the roots implied by a discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootNature {
    TwoReal,
    OneRepeated,
    TwoComplex,
}

impl RootNature {
    pub fn classify(discriminant: f64) -> Self {
        if discriminant > 0.0 {
            RootNature::TwoReal
        } else if discriminant == 0.0 {
            RootNature::OneRepeated
        } else {
            RootNature::TwoComplex
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            RootNature::TwoReal => "Two distinct real roots.",
            RootNature::OneRepeated => "One repeated real root.",
            RootNature::TwoComplex => "Two complex roots.",
        }
    }
}

// =============================================================================
// SEQUENCES AND FACTORIALS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticSequence {
    /// aₙ
    pub nth_term: f64,
    /// Sₙ
    pub sum: f64,
}

/// nth term and partial sum of an arithmetic sequence.
///
/// # Formulas
/// - aₙ = a₁ + (n − 1)d
/// - Sₙ = n/2 × (a₁ + aₙ)
pub fn arithmetic_sequence(first: f64, difference: f64, terms: i64) -> CalcResult<ArithmeticSequence> {
    if terms <= 0 {
        return Err(CalcError::invalid_input(
            "n-terms",
            terms.to_string(),
            "Terms must be a positive integer",
        ));
    }
    let n = terms as f64;
    let nth_term = first + (n - 1.0) * difference;
    Ok(ArithmeticSequence {
        nth_term,
        sum: n / 2.0 * (first + nth_term),
    })
}

/// n! as a float. Fails once the product is no longer finite (n > 170).
pub fn factorial(n: i64) -> CalcResult<f64> {
    if n < 0 {
        return Err(CalcError::invalid_input(
            "factorial-n",
            n.to_string(),
            "Please enter a non-negative integer",
        ));
    }
    let mut product = 1.0_f64;
    for i in 2..=n {
        product *= i as f64;
        if !product.is_finite() {
            return Err(CalcError::out_of_range("factorial", "Result too large"));
        }
    }
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_two_roots() {
        let sol = solve_quadratic(QuadraticForm::Standard { a: 1.0, b: -3.0, c: 2.0 }, false).unwrap();
        assert_eq!(sol.roots, Roots::Real(2.0, 1.0));
        assert_eq!(sol.key_value, Some(1.0));
        assert_eq!(sol.steps.len(), 3);
    }

    #[test]
    fn test_standard_double_root() {
        let sol = solve_quadratic(QuadraticForm::Standard { a: 1.0, b: 2.0, c: 1.0 }, false).unwrap();
        assert_eq!(sol.roots, Roots::Double(-1.0));
    }

    #[test]
    fn test_negative_discriminant() {
        let form = QuadraticForm::Standard { a: 1.0, b: 2.0, c: 5.0 };
        assert_eq!(solve_quadratic(form, false).unwrap().roots, Roots::NoReal);
        match solve_quadratic(form, true).unwrap().roots {
            Roots::Complex { re, im } => {
                assert_relative_eq!(re, -1.0);
                assert_relative_eq!(im, 2.0);
            }
            other => panic!("expected complex roots, got {other:?}"),
        }
    }

    #[test]
    fn test_not_quadratic() {
        let err = solve_quadratic(QuadraticForm::Standard { a: 0.0, b: 1.0, c: 1.0 }, false).unwrap_err();
        assert_eq!(err.user_message(), "Not a quadratic equation (A = 0)");
        let err = solve_quadratic(QuadraticForm::Vertex { a: 0.0, h: 1.0, k: 1.0 }, false).unwrap_err();
        assert_eq!(err.user_message(), "A cannot be 0");
    }

    #[test]
    fn test_vertex_form() {
        // 2(x - 3)² - 8 = 0  ->  x = 3 ± 2
        let sol = solve_quadratic(QuadraticForm::Vertex { a: 2.0, h: 3.0, k: -8.0 }, false).unwrap();
        assert_eq!(sol.roots, Roots::Real(5.0, 1.0));
        let none = solve_quadratic(QuadraticForm::Vertex { a: 1.0, h: 0.0, k: 4.0 }, false).unwrap();
        assert_eq!(none.roots, Roots::NoReal);
    }

    #[test]
    fn test_factored_form() {
        let sol = solve_quadratic(QuadraticForm::Factored { a: 3.0, x1: -1.5, x2: 4.0 }, false).unwrap();
        assert_eq!(sol.roots, Roots::Real(-1.5, 4.0));
    }

    #[test]
    fn test_discriminant_classification() {
        assert_eq!(discriminant(1.0, 5.0, 6.0), 1.0);
        assert_eq!(RootNature::classify(1.0), RootNature::TwoReal);
        assert_eq!(RootNature::classify(0.0).describe(), "One repeated real root.");
        assert_eq!(RootNature::classify(-3.0), RootNature::TwoComplex);
    }

    #[test]
    fn test_arithmetic_sequence() {
        let s = arithmetic_sequence(2.0, 3.0, 10).unwrap();
        assert_relative_eq!(s.nth_term, 29.0);
        assert_relative_eq!(s.sum, 155.0);
        assert_eq!(
            arithmetic_sequence(1.0, 1.0, 0).unwrap_err().user_message(),
            "Terms must be a positive integer"
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0).unwrap(), 1.0);
        assert_eq!(factorial(5).unwrap(), 120.0);
        assert_eq!(to_display(factorial(20).unwrap()), "2432902008176640000");
        assert!(factorial(170).is_ok());
        assert_eq!(factorial(171).unwrap_err().user_message(), "Result too large");
        assert!(factorial(-1).is_err());
    }
}
