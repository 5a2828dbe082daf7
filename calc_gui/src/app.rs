//! Application state and message loop.
//!
//! [`App`] owns the single [`UiState`]. Widget events become [`Message`]s,
//! each message is applied to the UI state, and whatever asynchronous work
//! the mounted calculator queued (reveal steps, rate lookups, clipboard
//! writes) is turned into iced tasks.

use std::time::Duration;

use web_time::Instant;

use iced::widget::{column, container, row, stack, text};
use iced::{Element, Length, Task, Theme};
use tracing::{debug, error, warn};

use calc_core::app::{Job, JobId, APP_TITLE, SEARCH_ID};
use calc_core::calculations::default_registry;
use calc_core::config::AppConfig;
use calc_core::currency::RatesOutcome;
use calc_core::debounce::Ticket;
use calc_core::dom::NodeId;
use calc_core::preferences::{MemoryStore, PreferenceStore};
use calc_core::theme::{system_prefers_dark, ThemeMode, ThemeVariant};
use calc_core::{CalcError, CalcResult, UiState};

use crate::render;
use crate::ui::{header, modal, sidebar, status_bar};

const SIDEBAR_WIDTH: f32 = 260.0;

#[derive(Debug, Clone)]
pub enum Message {
    /// Keystroke in the sidebar search box.
    SearchChanged(String),
    /// Debounce timer for a search keystroke elapsed.
    SearchFire(Ticket),
    Click(NodeId),
    /// Text typed into the element with this id.
    Input(String, String),
    /// Option picked in the select with this id.
    Choose(String, String),
    Toggle(String, bool),
    /// Enter pressed in the element with this id.
    Submit(String),
    ToggleTheme,
    ToggleSettings,
    SelectVariant(ThemeVariant),
    RevealStep(JobId),
    RatesFetched(JobId, RatesOutcome),
}

pub struct App {
    state: Result<UiState, CalcError>,
    settings_open: bool,
    status: String,
}

impl App {
    pub fn boot(config: AppConfig) -> (Self, Task<Message>) {
        let store = open_store(&config);
        let state = UiState::new(default_registry(), config, store, system_prefers_dark());
        if let Err(err) = &state {
            error!(code = err.error_code(), "failed to build the interface: {err}");
        }
        (App::new(state), Task::none())
    }

    fn new(state: Result<UiState, CalcError>) -> Self {
        App {
            state,
            settings_open: false,
            status: "Ready".to_string(),
        }
    }

    pub fn title(&self) -> String {
        match &self.state {
            Ok(ui) => ui.document().title().to_string(),
            Err(_) => APP_TITLE.to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        match &self.state {
            Ok(ui) => theme_for(ui.theme().mode(), ui.theme().active_variant()),
            Err(_) => Theme::Light,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.apply(message) {
            Ok(task) => task,
            Err(err) => {
                warn!(code = err.error_code(), "{err}");
                self.status = err.to_string();
                Task::none()
            }
        }
    }

    fn apply(&mut self, message: Message) -> CalcResult<Task<Message>> {
        let Ok(ui) = &mut self.state else {
            return Ok(Task::none());
        };

        match message {
            Message::SearchChanged(query) => return search(ui, query),
            Message::SearchFire(ticket) => {
                if let Some(report) = ui.fire_search(ticket)? {
                    self.status = match report.visible_items {
                        1 => "1 calculator".to_string(),
                        n => format!("{n} calculators"),
                    };
                }
            }
            Message::Click(node) => {
                ui.click_node(node)?;
            }
            Message::Input(id, value) => {
                ui.input(&id, &value)?;
            }
            Message::Choose(id, value) => {
                ui.choose(&id, &value)?;
            }
            Message::Toggle(id, checked) => {
                ui.toggle(&id, checked)?;
            }
            Message::Submit(id) => {
                ui.submit(&id)?;
            }
            Message::ToggleTheme => {
                let mode = ui.toggle_theme()?;
                self.status = format!("Switched to {mode} mode");
            }
            Message::ToggleSettings => self.settings_open = !self.settings_open,
            Message::SelectVariant(variant) => {
                ui.select_variant(variant)?;
                self.settings_open = false;
                self.status = variant.label().to_string();
            }
            Message::RevealStep(id) => {
                return Ok(match ui.step_reveal(id) {
                    Some(delay) => after(delay, Message::RevealStep(id)),
                    None => Task::none(),
                });
            }
            Message::RatesFetched(id, outcome) => {
                if !ui.complete_rates(id, &outcome)? {
                    debug!("exchange rates arrived after the calculator closed");
                }
            }
        }

        let jobs = ui.take_effects()?;
        Ok(schedule(jobs, ui.config()))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let ui = match &self.state {
            Ok(ui) => ui,
            Err(err) => {
                return container(text(format!("{APP_TITLE} failed to start: {err}")).size(14))
                    .padding(20)
                    .into();
            }
        };
        let doc = ui.document();
        let query = doc.value_of(SEARCH_ID).unwrap_or_default();

        let body = row![
            sidebar::view_sidebar(doc, ui.nav().ok(), query, SIDEBAR_WIDTH),
            render::view_display(doc, ui.display().ok()),
        ]
        .spacing(8)
        .height(Length::Fill);

        let content = column![
            header::view_header(ui.theme().mode(), self.settings_open),
            body,
            status_bar::view_status_bar(ui.current(), &self.status),
        ]
        .spacing(6)
        .padding(10);

        if self.settings_open {
            stack![
                content,
                modal::view_backdrop(),
                modal::view_settings(ui.theme().mode(), ui.theme().variant()),
            ]
            .into()
        } else {
            content.into()
        }
    }
}

/// Dark variants map onto iced's built-in palettes.
fn theme_for(mode: ThemeMode, variant: Option<ThemeVariant>) -> Theme {
    match (mode, variant) {
        (ThemeMode::Light, _) => Theme::Light,
        (ThemeMode::Dark, Some(ThemeVariant::Soft)) => Theme::Nord,
        (ThemeMode::Dark, Some(ThemeVariant::Enhanced)) => Theme::Oxocarbon,
        (ThemeMode::Dark, _) => Theme::Dark,
    }
}

fn schedule(jobs: Vec<Job>, config: &AppConfig) -> Task<Message> {
    Task::batch(jobs.into_iter().map(|job| match job {
        Job::Reveal { id, delay } => after(delay, Message::RevealStep(id)),
        Job::FetchRates { id } => fetch_rates(id, config),
        Job::Clipboard { text } => iced::clipboard::write(text),
    }))
}

// ============================================================================
// Platform glue
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
fn after(delay: Duration, message: Message) -> Task<Message> {
    if delay.is_zero() {
        return Task::done(message);
    }
    Task::perform(async move { tokio::time::sleep(delay).await }, move |_| message)
}

// The browser has no tokio timer; setTimeout backs the sleep instead.
#[cfg(target_arch = "wasm32")]
fn after(delay: Duration, message: Message) -> Task<Message> {
    if delay.is_zero() {
        return Task::done(message);
    }
    Task::perform(gloo_timers::future::sleep(delay), move |_| message)
}

/// Only the timer of the latest keystroke runs the filter.
fn search(ui: &mut UiState, query: String) -> CalcResult<Task<Message>> {
    let ticket = ui.search_input(&query, Instant::now())?;
    Ok(after(ui.search_delay(), Message::SearchFire(ticket)))
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_rates(id: JobId, config: &AppConfig) -> Task<Message> {
    let url = config.rates_url.clone();
    let timeout = config.rates_timeout();
    Task::perform(
        async move { calc_core::currency::lookup(&url, timeout).await },
        move |outcome| Message::RatesFetched(id, outcome),
    )
}

#[cfg(target_arch = "wasm32")]
fn fetch_rates(id: JobId, _config: &AppConfig) -> Task<Message> {
    Task::done(Message::RatesFetched(
        id,
        RatesOutcome::Offline("exchange rates are not fetched from the browser build".to_string()),
    ))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store(config: &AppConfig) -> Box<dyn PreferenceStore> {
    use calc_core::preferences::FileStore;

    let path = config
        .prefs_path
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("universal-calc").join("preferences.json")));
    match path.map(|p| FileStore::open(&p)) {
        Some(Ok(store)) => {
            debug!(path = %store.path().display(), "preferences opened");
            Box::new(store)
        }
        Some(Err(err)) => {
            warn!(code = err.error_code(), "theme changes will not persist: {err}");
            Box::new(MemoryStore::new())
        }
        None => Box::new(MemoryStore::new()),
    }
}

#[cfg(target_arch = "wasm32")]
fn open_store(_config: &AppConfig) -> Box<dyn PreferenceStore> {
    Box::new(MemoryStore::new())
}
