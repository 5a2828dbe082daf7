//! # calc_core - Universal Calculator Engine
//!
//! `calc_core` holds everything the Universal Calculator does that is not
//! drawing pixels: the calculator catalog, a headless document tree the
//! calculators render into, the loader that mounts one calculator at a
//! time, sidebar search, reactive field groups, the reveal animator, theme
//! preferences and the exchange-rate lookup with its offline fallback.
//!
//! Frontends (the iced desktop app and the terminal REPL) own a single
//! [`UiState`] and forward user events to it.
//!
//! ## Design Philosophy
//!
//! - **Headless**: calculators render to a [`dom::Document`], not a widget toolkit
//! - **Pure math**: every formula lives in [`equations`] and returns serializable results
//! - **Rich Errors**: [`CalcError`] carries the exact message shown to the user
//! - **One session**: the loader detaches every listener before mounting the next calculator
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{calculations::default_registry, config::AppConfig, preferences::MemoryStore, UiState};
//!
//! let mut ui = UiState::new(default_registry(), AppConfig::default(), Box::new(MemoryStore::new()), false)?;
//! ui.open("percentage-calculator")?;
//! ui.input("percent-value", "150")?;
//! ui.input("percent-percentage", "20")?;
//! ui.click("calculate-percentage")?;
//! assert!(ui.document().render_text(ui.display()?).contains("20% of 150 = 30.00"));
//! # Ok::<(), calc_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - Categories, subcategories and the calculator catalog
//! - [`calculations`] - The 24 calculators and their shared layout helpers
//! - [`equations`] - Formulas behind the calculators
//! - [`dom`] - Document tree, markup builder, events
//! - [`loader`] - Mounting a calculator and tearing the previous one down
//! - [`sidebar`] - Navigation tree and search
//! - [`reactive`] - Bidirectionally bound field groups
//! - [`reveal`] - Incremental reveal of educational content
//! - [`theme`] / [`preferences`] - Light/dark mode, variants and their persistence
//! - [`currency`] / [`offline`] - Exchange rates and the offline manifest
//! - [`app`] - The process-wide UI state
//! - [`errors`] - Structured error types

pub mod app;
pub mod calculations;
pub mod config;
pub mod currency;
pub mod debounce;
pub mod dom;
pub mod effects;
pub mod equations;
pub mod errors;
pub mod loader;
pub mod numeric;
pub mod offline;
pub mod preferences;
pub mod reactive;
pub mod registry;
pub mod reveal;
pub mod sidebar;
pub mod theme;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use app::{Job, JobId, UiState};
pub use errors::{CalcError, CalcResult};
pub use registry::{Calculator, CalculatorMeta, Category, Registry, Subcategory};
