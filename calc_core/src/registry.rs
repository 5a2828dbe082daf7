//! # Calculator Registry
//!
//! Static, ordered catalog of calculators grouped by category and
//! subcategory. Insertion order is display order in the sidebar.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::default_registry;
//! use calc_core::registry::{Category, Subcategory};
//!
//! let registry = default_registry();
//! let calc = registry
//!     .find(Category::Math, Subcategory::Percentage, "percentage-calculator")
//!     .unwrap();
//! assert_eq!(calc.meta().name, "Percentage Calculator");
//! ```

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, Markup};
use crate::errors::{CalcError, CalcResult};
use crate::loader::MountScope;

// ============================================================================
// Categories
// ============================================================================

/// Top-level sidebar grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Math,
    Physics,
    Chemistry,
    Statistics,
    Converters,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Math,
        Category::Physics,
        Category::Chemistry,
        Category::Statistics,
        Category::Converters,
        Category::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Physics => "physics",
            Category::Chemistry => "chemistry",
            Category::Statistics => "statistics",
            Category::Converters => "converters",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Math => "Math",
            Category::Physics => "Physics",
            Category::Chemistry => "Chemistry",
            Category::Statistics => "Statistics",
            Category::Converters => "Converters",
            Category::Other => "Other Calculators",
        }
    }

    /// Icon symbol reference in the shell's sprite sheet.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Math => "icon-math",
            Category::Physics => "icon-physics",
            Category::Chemistry => "icon-chemistry",
            Category::Statistics => "icon-statistics",
            Category::Converters => "icon-converter",
            Category::Other => "icon-calc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Second-level grouping. Each subcategory belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcategory {
    Percentage,
    Algebra,
    Arithmetic,
    Kinematics,
    Dynamics,
    Atomic,
    Solutions,
    Lottery,
    Odds,
    Length,
    Area,
    Temperature,
    Planetary,
    Network,
    Security,
    Numerals,
}

impl Subcategory {
    pub fn category(&self) -> Category {
        match self {
            Subcategory::Percentage | Subcategory::Algebra | Subcategory::Arithmetic => Category::Math,
            Subcategory::Kinematics | Subcategory::Dynamics => Category::Physics,
            Subcategory::Atomic | Subcategory::Solutions => Category::Chemistry,
            Subcategory::Lottery | Subcategory::Odds => Category::Statistics,
            Subcategory::Length | Subcategory::Area | Subcategory::Temperature => Category::Converters,
            Subcategory::Planetary | Subcategory::Network | Subcategory::Security | Subcategory::Numerals => {
                Category::Other
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Subcategory::Percentage => "percentage",
            Subcategory::Algebra => "algebra",
            Subcategory::Arithmetic => "arithmetic",
            Subcategory::Kinematics => "kinematics",
            Subcategory::Dynamics => "dynamics",
            Subcategory::Atomic => "atomic",
            Subcategory::Solutions => "solutions",
            Subcategory::Lottery => "lottery",
            Subcategory::Odds => "odds",
            Subcategory::Length => "length",
            Subcategory::Area => "area",
            Subcategory::Temperature => "temperature",
            Subcategory::Planetary => "planetary",
            Subcategory::Network => "network",
            Subcategory::Security => "security",
            Subcategory::Numerals => "numerals",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Calculator definition
// ============================================================================

/// Identity shown in the sidebar and title bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorMeta {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl CalculatorMeta {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        CalculatorMeta {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// A self-contained calculator.
///
/// `render` is pure and may be called any number of times. `bind` is
/// called exactly once per mount, after the rendered markup is attached;
/// it registers listeners through `scope` so the loader can drop them when
/// the calculator is unmounted.
pub trait Calculator: Send + Sync {
    fn meta(&self) -> &CalculatorMeta;

    /// Opaque HTML blob revealed by the "What is this?" button.
    fn educational_content(&self) -> Option<&'static str> {
        None
    }

    fn render(&self) -> Markup;

    fn bind(&self, doc: &mut Document, scope: &mut MountScope) -> CalcResult<()>;
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Default)]
struct CategoryGroup {
    subcategories: IndexMap<Subcategory, Vec<Box<dyn Calculator>>>,
}

/// Ordered catalog of calculators.
#[derive(Default)]
pub struct Registry {
    categories: IndexMap<Category, CategoryGroup>,
}

/// One registry entry with its location.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    pub category: Category,
    pub subcategory: Subcategory,
    pub calculator: &'a dyn Calculator,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolve a (category, subcategory, id) triple.
    pub fn find(&self, category: Category, subcategory: Subcategory, id: &str) -> Option<&dyn Calculator> {
        self.categories
            .get(&category)?
            .subcategories
            .get(&subcategory)?
            .iter()
            .find(|c| c.meta().id == id)
            .map(|c| c.as_ref())
    }

    /// Locate a calculator by id alone.
    pub fn locate(&self, id: &str) -> Option<Entry<'_>> {
        self.iter().find(|e| e.calculator.meta().id == id)
    }

    /// All entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = Entry<'_>> {
        self.categories.iter().flat_map(|(category, group)| {
            group.subcategories.iter().flat_map(move |(subcategory, calcs)| {
                calcs.iter().map(move |c| Entry {
                    category: *category,
                    subcategory: *subcategory,
                    calculator: c.as_ref(),
                })
            })
        })
    }

    /// Categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Entries of one category in display order.
    pub fn entries_in(&self, category: Category) -> impl Iterator<Item = Entry<'_>> {
        self.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a [`Registry`], rejecting duplicate ids and undeclared
/// subcategories.
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
    ids: HashSet<String>,
}

impl RegistryBuilder {
    /// Declare a category; categories appear in declaration order.
    pub fn category(mut self, category: Category) -> Self {
        self.registry.categories.entry(category).or_default();
        self
    }

    /// Declare a subcategory under its category (declaring the category if
    /// needed).
    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.registry
            .categories
            .entry(subcategory.category())
            .or_default()
            .subcategories
            .entry(subcategory)
            .or_default();
        self
    }

    pub fn add(mut self, subcategory: Subcategory, calculator: impl Calculator + 'static) -> CalcResult<Self> {
        let id = calculator.meta().id.clone();
        if self.ids.contains(&id) {
            return Err(CalcError::DuplicateCalculator { id });
        }
        let category = subcategory.category();
        let list = self
            .registry
            .categories
            .get_mut(&category)
            .and_then(|group| group.subcategories.get_mut(&subcategory))
            .ok_or_else(|| CalcError::UnknownSubcategory {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            })?;
        list.push(Box::new(calculator));
        self.ids.insert(id);
        Ok(self)
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dom::el;

    pub(crate) struct Stub {
        meta: CalculatorMeta,
    }

    impl Stub {
        pub(crate) fn new(id: &str, name: &str) -> Self {
            Stub {
                meta: CalculatorMeta::new(id, name, "stub"),
            }
        }
    }

    impl Calculator for Stub {
        fn meta(&self) -> &CalculatorMeta {
            &self.meta
        }

        fn render(&self) -> Markup {
            el("h2").class("calculator-title").text(self.meta.name.clone()).into()
        }

        fn bind(&self, _doc: &mut Document, _scope: &mut MountScope) -> CalcResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_find_and_order() {
        let registry = Registry::builder()
            .category(Category::Physics)
            .subcategory(Subcategory::Percentage)
            .subcategory(Subcategory::Kinematics)
            .add(Subcategory::Kinematics, Stub::new("fall", "Free Fall"))
            .unwrap()
            .add(Subcategory::Percentage, Stub::new("pct", "Percent"))
            .unwrap()
            .build();

        assert_eq!(registry.len(), 2);
        let order: Vec<_> = registry.categories().collect();
        assert_eq!(order, vec![Category::Physics, Category::Math]);
        assert!(registry.find(Category::Physics, Subcategory::Kinematics, "fall").is_some());
        assert!(registry.find(Category::Math, Subcategory::Kinematics, "fall").is_none());
        assert!(registry.find(Category::Math, Subcategory::Percentage, "nope").is_none());
        assert_eq!(registry.locate("pct").unwrap().subcategory, Subcategory::Percentage);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Registry::builder()
            .subcategory(Subcategory::Odds)
            .subcategory(Subcategory::Lottery)
            .add(Subcategory::Odds, Stub::new("same", "A"))
            .unwrap()
            .add(Subcategory::Lottery, Stub::new("same", "B"));
        assert!(matches!(result, Err(CalcError::DuplicateCalculator { id }) if id == "same"));
    }

    #[test]
    fn test_undeclared_subcategory_rejected() {
        let result = Registry::builder()
            .category(Category::Math)
            .add(Subcategory::Algebra, Stub::new("q", "Quadratic"));
        assert_eq!(result.err().unwrap().error_code(), "UNKNOWN_SUBCATEGORY");
    }

    #[test]
    fn test_subcategory_parent() {
        assert_eq!(Subcategory::Numerals.category(), Category::Other);
        assert_eq!(Subcategory::Solutions.category(), Category::Chemistry);
        assert_eq!(Category::Other.label(), "Other Calculators");
    }
}
