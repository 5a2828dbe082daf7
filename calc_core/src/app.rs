//! # UI State
//!
//! The single process-wide UI state: the document, the sidebar and its
//! search index, the loader's mount session, the theme and any pending
//! asynchronous work. Frontends own one [`UiState`] and drive it through
//! the methods below; nothing else holds UI state.
//!
//! Listeners cannot reach this struct, so they queue [`Effect`]s on the
//! document. Every entry point drains that queue: navigation is handled on
//! the spot, while reveals and rate lookups become [`Job`]s for the host to
//! schedule.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::app::UiState;
//! use calc_core::config::AppConfig;
//! use calc_core::preferences::MemoryStore;
//!
//! let mut ui = UiState::new(
//!     calc_core::calculations::default_registry(),
//!     AppConfig::default(),
//!     Box::new(MemoryStore::new()),
//!     false,
//! )?;
//! ui.open("time-percentage-calculator")?;
//! assert_eq!(ui.document().title(), "Time Percentage Calculator - Universal Calculator");
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::time::Duration;

use web_time::Instant;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::currency::RatesOutcome;
use crate::debounce::{Debouncer, Ticket};
use crate::dom::{el, Document, EventKind, Markup, NodeId};
use crate::effects::{Effect, RatesCallback};
use crate::errors::{CalcError, CalcResult};
use crate::loader::{Loader, MountSession, SessionId};
use crate::preferences::PreferenceStore;
use crate::registry::{Category, Registry, Subcategory};
use crate::reveal::{Reveal, RevealStep, TexTypesetter};
use crate::sidebar::{SearchReport, Sidebar};
use crate::theme::{ThemeController, ThemeMode, ThemeVariant};

pub const SIDEBAR_ID: &str = "sidebar-nav";
pub const DISPLAY_ID: &str = "calculator-display";
pub const SEARCH_ID: &str = "calc-search";
pub const APP_TITLE: &str = "Universal Calculator";

/// Handle for a reveal or lookup the host is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(u64);

/// Asynchronous work requested by the mounted calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Call [`UiState::step_reveal`] after `delay`.
    Reveal { id: JobId, delay: Duration },
    /// Fetch exchange rates, then call [`UiState::complete_rates`].
    FetchRates { id: JobId },
    /// Put `text` on the system clipboard.
    Clipboard { text: String },
}

struct PendingRates {
    session: SessionId,
    on_complete: RatesCallback,
}

pub struct UiState {
    registry: &'static Registry,
    doc: Document,
    sidebar: Sidebar,
    loader: Loader,
    theme: ThemeController,
    search: Debouncer<String>,
    config: AppConfig,
    reveals: IndexMap<JobId, Reveal>,
    rates: IndexMap<JobId, PendingRates>,
    jobs: Vec<Job>,
    next_job: u64,
}

/// Page skeleton: sidebar with search box, display target, welcome text.
pub fn shell() -> Vec<Markup> {
    vec![
        el("header")
            .class("top-bar")
            .child(el("h1").text(APP_TITLE))
            .child(
                el("input")
                    .id(SEARCH_ID)
                    .attr("type", "search")
                    .attr("placeholder", "Search calculators..."),
            )
            .child(el("button").id("theme-toggle").attr("aria-label", "Toggle theme"))
            .into(),
        el("aside")
            .class("sidebar")
            .child(el("nav").id(SIDEBAR_ID))
            .into(),
        el("main")
            .id(DISPLAY_ID)
            .child(
                el("div")
                    .class("welcome-message")
                    .child(el("h2").text(format!("Welcome to {APP_TITLE}")))
                    .child(el("p").text("Select a calculator from the sidebar to get started.")),
            )
            .into(),
    ]
}

impl UiState {
    /// Build the shell, restore the theme and render the sidebar.
    pub fn new(
        registry: &'static Registry,
        config: AppConfig,
        store: Box<dyn PreferenceStore>,
        system_prefers_dark: bool,
    ) -> CalcResult<Self> {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_children(root, shell())?;
        doc.set_title(APP_TITLE);

        let theme = ThemeController::init(store, system_prefers_dark);
        theme.apply(&mut doc);

        let mut sidebar = Sidebar::new(SIDEBAR_ID);
        sidebar.render(&mut doc, registry)?;

        Ok(UiState {
            registry,
            doc,
            sidebar,
            loader: Loader::new(DISPLAY_ID, SIDEBAR_ID),
            theme,
            search: Debouncer::new(config.search_debounce()),
            config,
            reveals: IndexMap::new(),
            rates: IndexMap::new(),
            jobs: Vec::new(),
            next_job: 0,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&MountSession> {
        self.loader.current()
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn display(&self) -> CalcResult<NodeId> {
        self.doc.require(DISPLAY_ID)
    }

    pub fn nav(&self) -> CalcResult<NodeId> {
        self.doc.require(SIDEBAR_ID)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Mount a calculator. Unknown triples change nothing.
    pub fn select(&mut self, category: Category, subcategory: Subcategory, id: &str) -> CalcResult<Option<SessionId>> {
        let session = self.loader.select(&mut self.doc, self.registry, category, subcategory, id)?;
        self.pump()?;
        Ok(session)
    }

    /// Mount a calculator by id alone.
    pub fn open(&mut self, id: &str) -> CalcResult<SessionId> {
        let entry = self.registry.locate(id).ok_or_else(|| CalcError::CalculatorNotFound {
            category: String::new(),
            subcategory: String::new(),
            id: id.to_string(),
        })?;
        let (category, subcategory) = (entry.category, entry.subcategory);
        self.select(category, subcategory, id)?
            .ok_or_else(|| CalcError::Internal {
                message: format!("calculator '{id}' located but not mounted"),
            })
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Fire `kind` on the element with `id`. Returns how many listeners ran.
    pub fn dispatch(&mut self, id: &str, kind: EventKind) -> CalcResult<usize> {
        let node = self.doc.require(id)?;
        let ran = self.doc.dispatch(node, kind);
        self.pump()?;
        Ok(ran)
    }

    /// Type `value` into an input.
    pub fn input(&mut self, id: &str, value: &str) -> CalcResult<usize> {
        let node = self.doc.require(id)?;
        let ran = self.doc.input(node, value);
        self.pump()?;
        Ok(ran)
    }

    /// Choose an option of a select.
    pub fn choose(&mut self, id: &str, value: &str) -> CalcResult<usize> {
        let node = self.doc.require(id)?;
        let ran = self.doc.choose(node, value);
        self.pump()?;
        Ok(ran)
    }

    pub fn toggle(&mut self, id: &str, checked: bool) -> CalcResult<usize> {
        let node = self.doc.require(id)?;
        let ran = self.doc.toggle(node, checked);
        self.pump()?;
        Ok(ran)
    }

    pub fn click(&mut self, id: &str) -> CalcResult<usize> {
        let node = self.doc.require(id)?;
        self.click_node(node)
    }

    /// Click a node directly, e.g. a sidebar entry without an id.
    pub fn click_node(&mut self, node: NodeId) -> CalcResult<usize> {
        let ran = self.doc.click(node);
        self.pump()?;
        Ok(ran)
    }

    /// Enter pressed in `id`: inputs and selects of the mounted calculator
    /// (not the search box) press its first calculate button.
    pub fn submit(&mut self, id: &str) -> CalcResult<bool> {
        if id == SEARCH_ID {
            return Ok(false);
        }
        let Some(node) = self.doc.get_element_by_id(id) else {
            return Ok(false);
        };
        let is_field = self
            .doc
            .element(node)
            .is_some_and(|e| e.tag == "input" || e.tag == "select");
        if !is_field {
            return Ok(false);
        }
        let display = self.display()?;
        let Some(button) = self.doc.query_class(display, "calculate-btn").into_iter().next() else {
            return Ok(false);
        };
        self.click_node(button)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Filter the sidebar now.
    pub fn search(&mut self, query: &str) -> CalcResult<SearchReport> {
        self.search.cancel();
        self.doc.set_value_of(SEARCH_ID, query)?;
        self.sidebar.search(&mut self.doc, query)
    }

    /// Record a keystroke in the search box; the filter runs once typing
    /// pauses for the debounce delay.
    pub fn search_input(&mut self, query: &str, now: Instant) -> CalcResult<Ticket> {
        self.doc.set_value_of(SEARCH_ID, query)?;
        Ok(self.search.push(query.to_string(), now))
    }

    /// Run the pending search if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> CalcResult<Option<SearchReport>> {
        match self.search.ready(now) {
            Some(query) => self.sidebar.search(&mut self.doc, &query).map(Some),
            None => Ok(None),
        }
    }

    /// Run the pending search if `ticket` is from the latest keystroke.
    pub fn fire_search(&mut self, ticket: Ticket) -> CalcResult<Option<SearchReport>> {
        match self.search.fire(ticket) {
            Some(query) => self.sidebar.search(&mut self.doc, &query).map(Some),
            None => Ok(None),
        }
    }

    pub fn search_delay(&self) -> Duration {
        self.search.delay()
    }

    /// Rebuild the sidebar; the search index is rebuilt on the next search.
    pub fn rerender_sidebar(&mut self) -> CalcResult<()> {
        self.sidebar.render(&mut self.doc, self.registry)
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    pub fn toggle_theme(&mut self) -> CalcResult<ThemeMode> {
        let mode = self.theme.toggle()?;
        self.theme.apply(&mut self.doc);
        Ok(mode)
    }

    pub fn select_variant(&mut self, variant: ThemeVariant) -> CalcResult<()> {
        self.theme.select_variant(variant)?;
        self.theme.apply(&mut self.doc);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Async work
    // ------------------------------------------------------------------

    /// Jobs queued since the last call.
    pub fn take_effects(&mut self) -> CalcResult<Vec<Job>> {
        self.pump()?;
        Ok(std::mem::take(&mut self.jobs))
    }

    /// Start revealing `content` into `container` unless it is already
    /// shown. The returned job must be stepped by the host.
    pub fn begin_reveal(&mut self, content: &str, container: NodeId) -> CalcResult<Option<Job>> {
        let Some(reveal) = Reveal::begin(&mut self.doc, content, container, self.config.reveal_step())? else {
            return Ok(None);
        };
        let id = self.job_id();
        self.reveals.insert(id, reveal);
        Ok(Some(Job::Reveal {
            id,
            delay: Duration::ZERO,
        }))
    }

    /// Attach the next part of a reveal. Returns the delay before the next
    /// step, or `None` once the reveal finished (or was unknown).
    pub fn step_reveal(&mut self, id: JobId) -> Option<Duration> {
        let reveal = self.reveals.get_mut(&id)?;
        match reveal.advance(&mut self.doc) {
            RevealStep::Wait(delay) => Some(delay),
            RevealStep::Finished => {
                if let Some(reveal) = self.reveals.shift_remove(&id) {
                    reveal.finish(&mut self.doc, &TexTypesetter);
                }
                None
            }
        }
    }

    /// Step a reveal to the end without waiting.
    pub fn finish_reveal(&mut self, id: JobId) {
        while self.step_reveal(id).is_some() {}
    }

    /// Deliver a rate lookup. Results for a calculator that is no longer
    /// mounted are dropped. Returns whether the callback ran.
    pub fn complete_rates(&mut self, id: JobId, outcome: &RatesOutcome) -> CalcResult<bool> {
        let Some(pending) = self.rates.shift_remove(&id) else {
            return Ok(false);
        };
        if self.loader.current().map(|s| s.session) != Some(pending.session) {
            debug!(session = %pending.session, "dropping rates for unmounted calculator");
            return Ok(false);
        }
        if let Err(err) = (pending.on_complete)(&mut self.doc, outcome) {
            warn!(code = err.error_code(), "rates callback failed: {err}");
        }
        self.pump()?;
        Ok(true)
    }

    fn job_id(&mut self) -> JobId {
        self.next_job += 1;
        JobId(self.next_job)
    }

    fn pump(&mut self) -> CalcResult<()> {
        loop {
            let effects = self.doc.take_effects();
            if effects.is_empty() {
                return Ok(());
            }
            for effect in effects {
                match effect {
                    Effect::Navigate { category, subcategory, id } => {
                        self.loader
                            .select(&mut self.doc, self.registry, category, subcategory, &id)?;
                    }
                    Effect::Reveal { content, container } => {
                        if let Some(job) = self.begin_reveal(content, container)? {
                            self.jobs.push(job);
                        }
                    }
                    Effect::FetchRates { on_complete } => {
                        let Some(session) = self.loader.current().map(|s| s.session) else {
                            continue;
                        };
                        let id = self.job_id();
                        self.rates.insert(id, PendingRates { session, on_complete });
                        self.jobs.push(Job::FetchRates { id });
                    }
                    Effect::Clipboard { text } => self.jobs.push(Job::Clipboard { text }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::default_registry;
    use crate::preferences::MemoryStore;

    fn ui() -> UiState {
        UiState::new(default_registry(), AppConfig::default(), Box::new(MemoryStore::new()), false).unwrap()
    }

    #[test]
    fn test_shell_and_sidebar() {
        let ui = ui();
        let nav = ui.nav().unwrap();
        let items = ui.document().query_class(nav, "nav-item");
        assert_eq!(items.len(), default_registry().len());
        assert_eq!(ui.document().title(), APP_TITLE);
    }

    #[test]
    fn test_sidebar_click_navigates() {
        let mut ui = ui();
        let nav = ui.nav().unwrap();
        let item = ui
            .document()
            .query_attr(nav, "data-calc-id", "factorial-calculator")
            .unwrap();
        ui.click_node(item).unwrap();
        assert_eq!(ui.current().unwrap().calculator_id, "factorial-calculator");
        assert!(ui.document().has_class(item, "active"));
        assert_eq!(ui.document().title(), "Factorial Calculator - Universal Calculator");
    }

    #[test]
    fn test_unknown_selection_is_noop() {
        let mut ui = ui();
        let r = ui.select(Category::Math, Subcategory::Algebra, "does-not-exist").unwrap();
        assert!(r.is_none());
        assert!(ui.current().is_none());
        assert!(ui.open("does-not-exist").is_err());
    }

    #[test]
    fn test_every_calculator_mounts_with_its_title() {
        let mut ui = ui();
        for entry in default_registry().iter() {
            let meta = entry.calculator.meta();
            let session = ui.select(entry.category, entry.subcategory, &meta.id).unwrap();
            assert!(session.is_some(), "{} did not mount", meta.id);
            let display = ui.display().unwrap();
            let title = ui.document().query_class(display, "calculator-title")[0];
            assert_eq!(ui.document().text_content(title), meta.name);
            assert_eq!(ui.document().focused(), Some(title));
            assert!(
                ui.document().query_class(display, "error-message").is_empty(),
                "{} failed to bind",
                meta.id
            );
        }
    }

    #[test]
    fn test_detached_listeners_never_fire() {
        let mut ui = ui();
        ui.open("time-percentage-calculator").unwrap();
        let total = ui.document().require("total-time").unwrap();
        let button = ui.document().query_class(ui.display().unwrap(), "calculate-btn")[0];
        ui.input("total-time", "100").unwrap();
        ui.input("elapsed-time", "25").unwrap();
        ui.click_node(button).unwrap();

        ui.open("factorial-calculator").unwrap();
        let before = ui.document().to_html(ui.display().unwrap());
        assert!(!ui.document().contains(total));
        assert!(!ui.document().contains(button));
        assert_eq!(ui.click_node(button).unwrap_or(0), 0);
        assert_eq!(ui.document().to_html(ui.display().unwrap()), before);
    }

    #[test]
    fn test_debounced_search() {
        let mut ui = ui();
        let start = Instant::now();
        ui.search_input("p", start).unwrap();
        ui.search_input("pe", start + Duration::from_millis(50)).unwrap();
        assert!(ui.poll(start + Duration::from_millis(100)).unwrap().is_none());
        let report = ui.poll(start + Duration::from_millis(250)).unwrap().unwrap();
        assert!(report.visible_items > 0);
        assert!(report.visible_items < default_registry().len());

        let all = ui.search("").unwrap();
        assert_eq!(all.visible_items, default_registry().len());
    }

    #[test]
    fn test_search_after_rerender_uses_fresh_nodes() {
        let mut ui = ui();
        ui.search("force").unwrap();
        ui.rerender_sidebar().unwrap();
        let report = ui.search("force").unwrap();
        assert!(report.visible_items >= 1);
        let nav = ui.nav().unwrap();
        let visible: Vec<_> = ui
            .document()
            .query_class(nav, "nav-item")
            .into_iter()
            .filter(|n| ui.document().is_rendered(*n))
            .map(|n| ui.document().text_content(n).to_lowercase())
            .collect();
        assert!(visible.iter().all(|t| t.contains("force")));
    }

    #[test]
    fn test_enter_presses_calculate() {
        let mut ui = ui();
        ui.open("factorial-calculator").unwrap();
        ui.input("factorial-n", "5").unwrap();
        assert!(ui.submit("factorial-n").unwrap());
        assert!(ui.document().text_content(ui.document().require("factorial-result").unwrap()).contains("120"));
        assert!(!ui.submit(SEARCH_ID).unwrap());
    }

    #[test]
    fn test_what_is_this_reveal_is_idempotent() {
        let mut ui = ui();
        ui.open("quadratic-equation-calculator").unwrap();
        ui.click("what-is-this-btn").unwrap();
        ui.click("what-is-this-btn").unwrap();
        let jobs = ui.take_effects().unwrap();
        assert_eq!(jobs.len(), 1);
        let Job::Reveal { id, .. } = jobs[0] else {
            panic!("expected a reveal job");
        };
        ui.finish_reveal(id);
        let container = ui.document().require("educational-content-container").unwrap();
        let once = ui.document().to_html(container);

        ui.click("what-is-this-btn").unwrap();
        assert!(ui.take_effects().unwrap().is_empty());
        assert_eq!(ui.document().to_html(container), once);
        assert!(!ui.document().is_hidden(container));
    }

    #[test]
    fn test_rates_for_unmounted_calculator_dropped() {
        let mut ui = ui();
        ui.open("odds-calculator").unwrap();
        ui.input("fractional-odds", "5/1").unwrap();
        ui.input("betting-stake", "100").unwrap();
        ui.click("calculate-betting").unwrap();
        let jobs = ui.take_effects().unwrap();
        let Some(Job::FetchRates { id }) = jobs.first().cloned() else {
            panic!("expected a rate lookup");
        };

        ui.open("factorial-calculator").unwrap();
        let delivered = ui.complete_rates(id, &RatesOutcome::Offline("test".into())).unwrap();
        assert!(!delivered);
    }

    #[test]
    fn test_offline_rates_show_degraded_result() {
        let mut ui = ui();
        ui.open("odds-calculator").unwrap();
        ui.input("fractional-odds", "5/1").unwrap();
        ui.input("betting-stake", "100").unwrap();
        ui.click("calculate-betting").unwrap();
        let result = ui.document().require("odds-result").unwrap();
        assert!(ui.document().text_content(result).contains("Fetching exchange rates"));

        let Some(Job::FetchRates { id }) = ui.take_effects().unwrap().first().cloned() else {
            panic!("expected a rate lookup");
        };
        assert!(ui.complete_rates(id, &RatesOutcome::Offline("timeout".into())).unwrap());
        let text = ui.document().text_content(result);
        assert!(text.contains("Offline"));
        assert!(text.contains("600.00 (Base Currency)"));
    }

    #[test]
    fn test_theme_entry_points() {
        let mut ui = ui();
        assert_eq!(ui.theme().mode(), ThemeMode::Light);
        ui.select_variant(ThemeVariant::Soft).unwrap();
        let root = ui.document().root();
        assert_eq!(ui.document().attr(root, "data-theme"), Some("dark"));
        assert_eq!(ui.document().attr(root, "data-variant"), Some("soft"));
        assert_eq!(ui.toggle_theme().unwrap(), ThemeMode::Light);
    }
}
