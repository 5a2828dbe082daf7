//! Terminal session over [`UiState`].
//!
//! Runs parsed commands against the shared UI state and drains the jobs a
//! calculator queues. There is no frame clock in a terminal, so reveals are
//! stepped to the end at once and rate lookups block on a current-thread
//! runtime.

use tokio::runtime::Runtime;
use tracing::debug;

use calc_core::app::Job;
use calc_core::calculations::layout::EDU_BUTTON_ID;
use calc_core::sidebar::{CALC_ID_ATTR, NAV_ITEM_CLASS};
use calc_core::{CalcError, CalcResult, UiState};

use crate::command::{Command, HELP};

/// What the REPL does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

pub struct Session {
    ui: UiState,
    runtime: Runtime,
}

impl Session {
    pub fn new(ui: UiState) -> CalcResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CalcError::Internal {
                message: format!("failed to start async runtime: {e}"),
            })?;
        Ok(Session { ui, runtime })
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn execute(&mut self, command: Command) -> CalcResult<Outcome> {
        let mut notes = Vec::new();
        let text = match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => HELP.to_string(),
            Command::List => self.list(),
            Command::Search(query) => {
                let report = self.ui.search(&query)?;
                let mut out = self.visible_items()?;
                out.push(format!("{} calculator(s) in {} categories", report.visible_items, report.visible_categories));
                out.join("\n")
            }
            Command::Open(id) => {
                self.ui.open(&id)?;
                self.drain(&mut notes)?;
                self.display()?
            }
            Command::Set { id, value } => {
                self.ui.input(&id, &value)?;
                self.drain(&mut notes)?;
                self.display()?
            }
            Command::Choose { id, value } => {
                self.ui.choose(&id, &value)?;
                self.drain(&mut notes)?;
                self.display()?
            }
            Command::Check { id, on } => {
                self.ui.toggle(&id, on)?;
                self.drain(&mut notes)?;
                self.display()?
            }
            Command::Click(id) => {
                self.ui.click(&id)?;
                self.drain(&mut notes)?;
                self.display()?
            }
            Command::Show => self.display()?,
            Command::Info => {
                self.ui.click(EDU_BUTTON_ID)?;
                self.drain(&mut notes)?;
                self.display()?
            }
            Command::Theme => format!("Theme: {}", self.ui.toggle_theme()?),
            Command::Variant(variant) => {
                self.ui.select_variant(variant)?;
                match self.ui.theme().active_variant() {
                    Some(_) => format!("Theme: {}", variant.label()),
                    None => format!("{} selected; it applies in dark mode", variant.label()),
                }
            }
        };

        notes.push(text);
        Ok(Outcome::Print(notes.join("\n")))
    }

    /// Run queued jobs until the calculator stops producing new ones.
    fn drain(&mut self, notes: &mut Vec<String>) -> CalcResult<()> {
        loop {
            let jobs = self.ui.take_effects()?;
            if jobs.is_empty() {
                return Ok(());
            }
            for job in jobs {
                match job {
                    Job::Reveal { id, .. } => self.ui.finish_reveal(id),
                    Job::FetchRates { id } => {
                        let url = self.ui.config().rates_url.clone();
                        let timeout = self.ui.config().rates_timeout();
                        debug!(%url, "fetching exchange rates");
                        let outcome = self.runtime.block_on(calc_core::currency::lookup(&url, timeout));
                        self.ui.complete_rates(id, &outcome)?;
                    }
                    Job::Clipboard { text } => notes.push(format!("(copy) {text}")),
                }
            }
        }
    }

    fn list(&self) -> String {
        let registry = self.ui.registry();
        let mut out = Vec::new();
        for category in registry.categories() {
            out.push(format!("{}:", category.label()));
            for entry in registry.entries_in(category) {
                let meta = entry.calculator.meta();
                out.push(format!("  {:<28} {}", meta.id, meta.name));
            }
        }
        out.join("\n")
    }

    fn visible_items(&self) -> CalcResult<Vec<String>> {
        let doc = self.ui.document();
        Ok(doc
            .query_class(self.ui.nav()?, NAV_ITEM_CLASS)
            .into_iter()
            .filter(|item| doc.is_rendered(*item))
            .map(|item| {
                let id = doc.attr(item, CALC_ID_ATTR).unwrap_or_default();
                format!("  {:<28} {}", id, doc.text_content(item).trim())
            })
            .collect())
    }

    fn display(&self) -> CalcResult<String> {
        Ok(self.ui.document().render_text(self.ui.display()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::default_registry;
    use calc_core::config::AppConfig;
    use calc_core::preferences::MemoryStore;
    use calc_core::theme::ThemeVariant;

    fn session() -> Session {
        let ui = UiState::new(default_registry(), AppConfig::default(), Box::new(MemoryStore::new()), false).unwrap();
        Session::new(ui).unwrap()
    }

    fn run(session: &mut Session, line: &str) -> String {
        match session.execute(line.parse().unwrap()).unwrap() {
            Outcome::Print(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_open_set_click() {
        let mut s = session();
        let shown = run(&mut s, "open percentage-calculator");
        assert!(shown.contains("Percentage"));
        run(&mut s, "set percent-value 150");
        run(&mut s, "set percent-percentage 20");
        let shown = run(&mut s, "click calculate-percentage");
        assert!(shown.contains("20% of 150 = 30.00"), "{shown}");
    }

    #[test]
    fn test_search_lists_matches() {
        let mut s = session();
        let out = run(&mut s, "search roman");
        assert!(out.contains("roman-numeral-converter"), "{out}");
        assert!(!out.contains("force-calculator"));
        assert!(out.ends_with("1 calculator(s) in 1 categories"), "{out}");
    }

    #[test]
    fn test_list_covers_registry() {
        let s = session();
        let listed = s.list();
        for entry in s.ui().registry().iter() {
            assert!(listed.contains(&entry.calculator.meta().id));
        }
    }

    #[test]
    fn test_info_reveals_explanation() {
        let mut s = session();
        let before = run(&mut s, "open force-calculator");
        let after = run(&mut s, "info");
        assert!(after.len() > before.len());
    }

    #[test]
    fn test_theme_commands() {
        let mut s = session();
        assert_eq!(run(&mut s, "theme"), "Theme: dark");
        assert_eq!(run(&mut s, "variant soft"), "Theme: Soft Dark");
        assert_eq!(s.ui().theme().active_variant(), Some(ThemeVariant::Soft));
        assert_eq!(s.execute(Command::Quit).unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_unknown_element_is_an_error() {
        let mut s = session();
        run(&mut s, "open force-calculator");
        let err = s.execute("set nope 1".parse().unwrap()).unwrap_err();
        assert!(matches!(err, CalcError::ElementNotFound { .. }));
    }
}
