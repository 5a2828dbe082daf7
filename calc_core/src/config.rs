//! Runtime configuration loaded from environment variables.
//!
//! Every setting has a default; nothing needs to be set to run.
//!
//! | Variable                  | Default                                  | Description                    |
//! |---------------------------|------------------------------------------|--------------------------------|
//! | `CALC_LOG_LEVEL`          | `info`                                   | tracing filter                 |
//! | `CALC_SEARCH_DEBOUNCE_MS` | `150`                                    | sidebar search debounce        |
//! | `CALC_REVEAL_STEP_MS`     | `50`                                     | delay between revealed nodes   |
//! | `CALC_RATES_URL`          | `https://open.er-api.com/v6/latest/USD`  | exchange rate endpoint         |
//! | `CALC_RATES_TIMEOUT_SECS` | `10`                                     | exchange rate request timeout  |
//! | `CALC_PREFS_PATH`         | platform config dir                      | theme preference file          |

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tracing filter string, e.g. `"calc_core=debug,info"`.
    pub log_level: String,
    pub search_debounce_ms: u64,
    pub reveal_step_ms: u64,
    pub rates_url: String,
    pub rates_timeout_secs: u64,
    /// Explicit preference file; frontends pick a platform default when unset.
    pub prefs_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level:          str_or(&lookup, "CALC_LOG_LEVEL", "info"),
            search_debounce_ms: parse_or(&lookup, "CALC_SEARCH_DEBOUNCE_MS", 150),
            reveal_step_ms:     parse_or(&lookup, "CALC_REVEAL_STEP_MS", 50),
            rates_url:          str_or(&lookup, "CALC_RATES_URL", DEFAULT_RATES_URL),
            rates_timeout_secs: parse_or(&lookup, "CALC_RATES_TIMEOUT_SECS", 10),
            prefs_path:         lookup("CALC_PREFS_PATH").filter(|p| !p.is_empty()).map(PathBuf::from),
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn reveal_step(&self) -> Duration {
        Duration::from_millis(self.reveal_step_ms)
    }

    pub fn rates_timeout(&self) -> Duration {
        Duration::from_secs(self.rates_timeout_secs)
    }
}

fn str_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
