//! # Calculator Equations
//!
//! The pure math behind every calculator. Nothing here touches the document
//! tree: each function takes parsed numbers and returns a serializable
//! result or a [`CalcError`](crate::errors::CalcError) carrying the message
//! the calculator shows.
//!
//! ## Modules
//!
//! - [`percent`] - Percent-of, error, elapsed time, change
//! - [`algebra`] - Quadratics, discriminant, arithmetic sequences, factorial
//! - [`physics`] - Projectile, free fall, force, gravitation
//! - [`chemistry`] - Periodic table, atom composition, mass percentage
//! - [`combinatorics`] - Combinations and lottery odds
//! - [`odds`] - Probability, consecutive events, betting odds
//! - [`misc`] - Planetary age, upload time, passwords, Roman numerals
//!
//! ## Conventions
//!
//! - Missing inputs arrive as `None`; the function decides the message
//! - Angles are in degrees at the boundary, radians inside
//! - Percentages are returned on the 0–100 scale

pub mod algebra;
pub mod chemistry;
pub mod combinatorics;
pub mod misc;
pub mod odds;
pub mod percent;
pub mod physics;

pub use algebra::{
    arithmetic_sequence, discriminant, factorial, solve_quadratic, ArithmeticSequence, QuadraticForm,
    QuadraticSolution, RootNature, Roots,
};
pub use chemistry::{describe_atom, element, mass_percent, percent_composition, AtomSummary, Composition, Element};
pub use combinatorics::{combinations, lottery, LotteryInput, LotteryKind, LotteryResult};
pub use misc::{convert_roman, generate_password, planetary_ages, upload_seconds, PasswordOptions, RomanConversion};
pub use odds::{basic_odds, consecutive_odds, decimal_odds, fractional_to_decimal, validate_bet, Probability};
pub use percent::{percent_change, percent_error, percent_of, time_percentage};
pub use physics::{force, free_fall, gravitational_force, projectile, ProjectileInput};
