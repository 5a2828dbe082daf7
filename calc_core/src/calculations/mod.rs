//! # Calculators
//!
//! Every calculator in the suite. Each one is a [`Definition`]: metadata,
//! an optional educational blob, a pure render function and a bind
//! function that wires listeners through the mount scope.
//!
//! ## Available Calculators
//!
//! - [`percentage`] - Percent-of, percent error, time, change, decrease
//! - [`algebra`] - Quadratic equation, discriminant
//! - [`arithmetic`] - Arithmetic sequence, factorial
//! - [`physics`] - Projectile, free fall, force, gravitation
//! - [`chemistry`] - Atom calculator, mass percentage
//! - [`statistics`] - Lottery, odds and betting
//! - [`converters`] - Length, area, temperature
//! - [`other`] - Planetary age, upload time, passwords, Roman numerals
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::default_registry;
//!
//! let registry = default_registry();
//! assert_eq!(registry.len(), 24);
//! assert!(registry.locate("roman-numeral-converter").is_some());
//! ```

pub mod algebra;
pub mod arithmetic;
pub mod chemistry;
pub mod converters;
pub mod layout;
pub mod other;
pub mod percentage;
pub mod physics;
pub mod statistics;

use once_cell::sync::Lazy;
use tracing::error;

use crate::dom::{Document, Markup};
use crate::errors::CalcResult;
use crate::loader::MountScope;
use crate::registry::{Calculator, CalculatorMeta, Category, Registry, Subcategory};

/// A calculator assembled from plain functions.
pub struct Definition {
    meta: CalculatorMeta,
    educational: Option<&'static str>,
    render: fn(&Definition) -> Markup,
    bind: fn(&mut Document, &mut MountScope) -> CalcResult<()>,
}

impl Definition {
    pub fn new(
        meta: CalculatorMeta,
        render: fn(&Definition) -> Markup,
        bind: fn(&mut Document, &mut MountScope) -> CalcResult<()>,
    ) -> Self {
        Definition {
            meta,
            educational: None,
            render,
            bind,
        }
    }

    /// Attach the blob revealed by "What is this?".
    pub fn with_education(mut self, content: &'static str) -> Self {
        self.educational = Some(content);
        self
    }

    pub fn has_education(&self) -> bool {
        self.educational.is_some()
    }
}

impl Calculator for Definition {
    fn meta(&self) -> &CalculatorMeta {
        &self.meta
    }

    fn educational_content(&self) -> Option<&'static str> {
        self.educational
    }

    fn render(&self) -> Markup {
        (self.render)(self)
    }

    fn bind(&self, doc: &mut Document, scope: &mut MountScope) -> CalcResult<()> {
        if let Some(content) = self.educational {
            layout::bind_what_is_this(doc, scope, content)?;
        }
        (self.bind)(doc, scope)
    }
}

/// Build the full catalog in sidebar order.
pub fn build_registry() -> CalcResult<Registry> {
    Registry::builder()
        .category(Category::Math)
        .subcategory(Subcategory::Percentage)
        .subcategory(Subcategory::Algebra)
        .subcategory(Subcategory::Arithmetic)
        .category(Category::Physics)
        .subcategory(Subcategory::Kinematics)
        .subcategory(Subcategory::Dynamics)
        .category(Category::Chemistry)
        .subcategory(Subcategory::Atomic)
        .subcategory(Subcategory::Solutions)
        .category(Category::Statistics)
        .subcategory(Subcategory::Lottery)
        .subcategory(Subcategory::Odds)
        .category(Category::Converters)
        .subcategory(Subcategory::Length)
        .subcategory(Subcategory::Area)
        .subcategory(Subcategory::Temperature)
        .category(Category::Other)
        .subcategory(Subcategory::Planetary)
        .subcategory(Subcategory::Network)
        .subcategory(Subcategory::Security)
        .subcategory(Subcategory::Numerals)
        .add(Subcategory::Percentage, percentage::percentage())?
        .add(Subcategory::Percentage, percentage::percent_error())?
        .add(Subcategory::Percentage, percentage::time_percentage())?
        .add(Subcategory::Percentage, percentage::percentage_change())?
        .add(Subcategory::Percentage, percentage::percentage_decrease())?
        .add(Subcategory::Algebra, algebra::quadratic())?
        .add(Subcategory::Algebra, algebra::discriminant())?
        .add(Subcategory::Arithmetic, arithmetic::arithmetic_sequence())?
        .add(Subcategory::Arithmetic, arithmetic::factorial())?
        .add(Subcategory::Kinematics, physics::projectile())?
        .add(Subcategory::Kinematics, physics::free_fall())?
        .add(Subcategory::Dynamics, physics::force())?
        .add(Subcategory::Dynamics, physics::gravitational_force())?
        .add(Subcategory::Atomic, chemistry::atom())?
        .add(Subcategory::Solutions, chemistry::mass_percent())?
        .add(Subcategory::Lottery, statistics::lottery())?
        .add(Subcategory::Odds, statistics::odds())?
        .add(Subcategory::Length, converters::length())?
        .add(Subcategory::Area, converters::area())?
        .add(Subcategory::Temperature, converters::temperature())?
        .add(Subcategory::Planetary, other::planetary_age())?
        .add(Subcategory::Network, other::upload_time())?
        .add(Subcategory::Security, other::password_generator())?
        .add(Subcategory::Numerals, other::roman_numerals())
        .map(|b| b.build())
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    build_registry().unwrap_or_else(|err| {
        error!(code = err.error_code(), "calculator registry failed to build: {err}");
        Registry::default()
    })
});

/// The process-wide catalog.
pub fn default_registry() -> &'static Registry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds_all_calculators() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.len(), 24);
        assert_eq!(default_registry().len(), 24);
        let order: Vec<_> = registry.categories().collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_first_and_last_entries() {
        let registry = default_registry();
        let ids: Vec<_> = registry.iter().map(|e| e.calculator.meta().id.clone()).collect();
        assert_eq!(ids.first().map(String::as_str), Some("percentage-calculator"));
        assert_eq!(ids.last().map(String::as_str), Some("roman-numeral-converter"));
    }

    #[test]
    fn test_every_render_has_a_title() {
        for entry in default_registry().iter() {
            let markup = entry.calculator.render();
            let Markup::Element(root) = markup else {
                panic!("{} rendered text", entry.calculator.meta().id);
            };
            assert!(root.children.iter().any(|c| matches!(
                c,
                Markup::Element(e) if e.tag == "h2" && e.classes.iter().any(|k| k == "calculator-title")
            )));
        }
    }
}
