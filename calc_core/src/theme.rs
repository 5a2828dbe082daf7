//! # Theme / Settings
//!
//! Light/dark mode plus a dark-only variant, persisted through a
//! [`PreferenceStore`] under the keys `theme` and `themeVariant`.
//!
//! At startup the stored mode wins; without one the system preference
//! decides. Toggling into dark mode restores the stored variant, and
//! choosing a variant always switches to dark mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dom::Document;
use crate::errors::{CalcError, CalcResult};
use crate::preferences::PreferenceStore;

pub const THEME_KEY: &str = "theme";
pub const VARIANT_KEY: &str = "themeVariant";

/// Attributes set on the document root.
pub const THEME_ATTR: &str = "data-theme";
pub const VARIANT_ATTR: &str = "data-variant";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Ask the desktop (or the browser's `prefers-color-scheme`) whether it is
/// in dark mode. Anything undetectable counts as light.
pub fn system_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(mode) => {
            let dark = mode_is_dark(mode);
            debug!(dark, "system colour scheme detected");
            dark
        }
        Err(err) => {
            debug!("system colour scheme unavailable: {err:?}");
            false
        }
    }
}

fn mode_is_dark(mode: dark_light::Mode) -> bool {
    matches!(mode, dark_light::Mode::Dark)
}

impl FromStr for ThemeMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(CalcError::invalid_input(THEME_KEY, other, "Expected 'light' or 'dark'")),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contrast level of the dark theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Soft,
    #[default]
    Medium,
    Enhanced,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 3] = [ThemeVariant::Soft, ThemeVariant::Medium, ThemeVariant::Enhanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeVariant::Soft => "soft",
            ThemeVariant::Medium => "medium",
            ThemeVariant::Enhanced => "enhanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeVariant::Soft => "Soft Dark",
            ThemeVariant::Medium => "Medium Dark",
            ThemeVariant::Enhanced => "Enhanced Dark",
        }
    }
}

impl FromStr for ThemeVariant {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeVariant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CalcError::invalid_input(VARIANT_KEY, s, "Expected 'soft', 'medium' or 'enhanced'"))
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide theme state backed by a preference store.
pub struct ThemeController {
    mode: ThemeMode,
    variant: ThemeVariant,
    store: Box<dyn PreferenceStore>,
}

impl ThemeController {
    /// Restore preferences, falling back to the system preference and the
    /// default variant. Unreadable stored values count as absent.
    pub fn init(store: Box<dyn PreferenceStore>, system_prefers_dark: bool) -> Self {
        let mode = read_pref::<ThemeMode>(store.as_ref(), THEME_KEY).unwrap_or(if system_prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        });
        let variant = read_pref::<ThemeVariant>(store.as_ref(), VARIANT_KEY).unwrap_or_default();
        info!(%mode, %variant, "theme initialised");
        ThemeController { mode, variant, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    /// The variant in effect, if any. Variants only apply in dark mode.
    pub fn active_variant(&self) -> Option<ThemeVariant> {
        (self.mode == ThemeMode::Dark).then_some(self.variant)
    }

    /// Switch light and dark. Entering dark mode restores the stored variant.
    pub fn toggle(&mut self) -> CalcResult<ThemeMode> {
        let next = self.mode.toggled();
        if next == ThemeMode::Dark {
            self.variant = read_pref(self.store.as_ref(), VARIANT_KEY).unwrap_or(self.variant);
        }
        self.store.set(THEME_KEY, next.as_str())?;
        self.mode = next;
        info!(mode = %next, "theme toggled");
        Ok(next)
    }

    /// Store `variant` and switch to dark mode.
    pub fn select_variant(&mut self, variant: ThemeVariant) -> CalcResult<()> {
        self.store.set(VARIANT_KEY, variant.as_str())?;
        self.store.set(THEME_KEY, ThemeMode::Dark.as_str())?;
        self.variant = variant;
        self.mode = ThemeMode::Dark;
        info!(%variant, "theme variant selected");
        Ok(())
    }

    /// Reflect the current state on the document root.
    pub fn apply(&self, doc: &mut Document) {
        let root = doc.root();
        doc.set_attr(root, THEME_ATTR, self.mode.as_str());
        match self.active_variant() {
            Some(variant) => doc.set_attr(root, VARIANT_ATTR, variant.as_str()),
            None => doc.remove_attr(root, VARIANT_ATTR),
        }
    }
}

fn read_pref<T: FromStr<Err = CalcError>>(store: &dyn PreferenceStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, "ignoring stored preference: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryStore;

    fn store_with(pairs: &[(&str, &str)]) -> Box<MemoryStore> {
        let mut store = MemoryStore::new();
        for (k, v) in pairs {
            store.set(k, v).unwrap();
        }
        Box::new(store)
    }

    #[test]
    fn test_init_falls_back_to_system_preference() {
        let dark = ThemeController::init(store_with(&[]), true);
        assert_eq!(dark.mode(), ThemeMode::Dark);
        assert_eq!(dark.variant(), ThemeVariant::Medium);

        let light = ThemeController::init(store_with(&[]), false);
        assert_eq!(light.mode(), ThemeMode::Light);
        assert_eq!(light.active_variant(), None);
    }

    #[test]
    fn test_system_scheme_mapping() {
        assert!(mode_is_dark(dark_light::Mode::Dark));
        assert!(!mode_is_dark(dark_light::Mode::Light));
        assert!(!mode_is_dark(dark_light::Mode::Unspecified));
    }

    #[test]
    fn test_detected_scheme_seeds_unstored_mode() {
        let dark = system_prefers_dark();
        let expected = if dark { ThemeMode::Dark } else { ThemeMode::Light };
        let theme = ThemeController::init(store_with(&[]), dark);
        assert_eq!(theme.mode(), expected);
    }

    #[test]
    fn test_stored_mode_beats_system() {
        let theme = ThemeController::init(store_with(&[("theme", "light")]), true);
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_garbage_preference_ignored() {
        let theme = ThemeController::init(store_with(&[("theme", "purple"), ("themeVariant", "x")]), false);
        assert_eq!(theme.mode(), ThemeMode::Light);
        assert_eq!(theme.variant(), ThemeVariant::Medium);
    }

    #[test]
    fn test_toggle_restores_stored_variant() {
        let mut theme = ThemeController::init(store_with(&[("theme", "dark")]), false);
        theme.select_variant(ThemeVariant::Enhanced).unwrap();
        assert_eq!(theme.toggle().unwrap(), ThemeMode::Light);
        assert_eq!(theme.active_variant(), None);
        assert_eq!(theme.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(theme.active_variant(), Some(ThemeVariant::Enhanced));
    }

    #[test]
    fn test_select_variant_forces_dark() {
        let mut theme = ThemeController::init(store_with(&[]), false);
        theme.select_variant(ThemeVariant::Soft).unwrap();
        assert_eq!(theme.mode(), ThemeMode::Dark);

        // persisted state survives a restart
        let restored = ThemeController::init(std::mem::replace(&mut theme.store, Box::new(MemoryStore::new())), false);
        assert_eq!(restored.mode(), ThemeMode::Dark);
        assert_eq!(restored.variant(), ThemeVariant::Soft);
    }

    #[test]
    fn test_apply_sets_root_attributes() {
        let mut doc = Document::new();
        let mut theme = ThemeController::init(store_with(&[]), true);
        theme.apply(&mut doc);
        let root = doc.root();
        assert_eq!(doc.attr(root, THEME_ATTR), Some("dark"));
        assert_eq!(doc.attr(root, VARIANT_ATTR), Some("medium"));

        theme.toggle().unwrap();
        theme.apply(&mut doc);
        assert_eq!(doc.attr(root, THEME_ATTR), Some("light"));
        assert_eq!(doc.attr(root, VARIANT_ATTR), None);
    }
}
