//! # Currency Lookup
//!
//! Exchange rates against a fixed base currency (USD), fetched once per
//! betting calculation. A failed lookup never fails the calculation: the
//! figures are reported in the base currency with an offline notice.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom::{el, Markup};
use crate::errors::{CalcError, CalcResult};
use crate::numeric::{group_thousands, to_fixed};

pub const BASE_CURRENCY: &str = "USD";

/// Display currencies offered by the betting section, base first.
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("IDR", "Indonesia Rupiah"),
    ("AUD", "Australia Dollar"),
    ("BRL", "Brazil Real"),
    ("CAD", "Canada Dollar"),
    ("CHF", "Switzerland Franc"),
    ("CNY", "China Yuan Renminbi"),
    ("EUR", "Euro"),
    ("GBP", "UK Pound"),
    ("HKD", "Hong Kong Dollar"),
    ("INR", "India Rupee"),
    ("JPY", "Japan Yen"),
    ("KRW", "Korea (South) Won"),
    ("MXN", "Mexico Peso"),
    ("NOK", "Norway Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PLN", "Polish Zloty"),
    ("SEK", "Sweden Krona"),
    ("SGD", "Singapore Dollar"),
    ("TWD", "Taiwan N. Dollar"),
    ("ZAR", "South Africa Rand"),
];

/// Rates relative to [`BASE_CURRENCY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: IndexMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code == self.base {
            return Some(1.0);
        }
        self.rates.get(code).copied().filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Result of a lookup as seen by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RatesOutcome {
    Live(RateTable),
    /// Lookup failed; carries the reason for logs.
    Offline(String),
}

#[derive(Deserialize)]
struct RatesResponse {
    result: Option<String>,
    base_code: Option<String>,
    rates: Option<IndexMap<String, f64>>,
    conversion_rates: Option<IndexMap<String, f64>>,
}

/// Parse a rate API body. Both `rates` and `conversion_rates` layouts are
/// accepted; a `result` other than `"success"` is an error.
pub fn parse_rates(url: &str, body: &str) -> CalcResult<RateTable> {
    let response: RatesResponse =
        serde_json::from_str(body).map_err(|e| CalcError::network(url, format!("Failed to parse response: {e}")))?;
    if let Some(result) = response.result.as_deref() {
        if result != "success" {
            return Err(CalcError::network(url, format!("API returned result '{result}'")));
        }
    }
    let rates = response
        .conversion_rates
        .or(response.rates)
        .ok_or_else(|| CalcError::network(url, "Response has no rate table"))?;
    Ok(RateTable {
        base: response.base_code.unwrap_or_else(|| BASE_CURRENCY.to_string()),
        rates,
        fetched_at: Utc::now(),
    })
}

/// Fetch the rate table from `url`.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_rates(url: &str, timeout: std::time::Duration) -> CalcResult<RateTable> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("UniversalCalculator/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| CalcError::network(url, format!("Failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CalcError::network(url, format!("Network error: {e}")))?;
    if !response.status().is_success() {
        return Err(CalcError::network(url, format!("Rate API returned {}", response.status())));
    }
    let body = response
        .text()
        .await
        .map_err(|e| CalcError::network(url, format!("Failed to read response: {e}")))?;
    parse_rates(url, &body)
}

/// Fetch and fold any failure into [`RatesOutcome::Offline`].
#[cfg(not(target_arch = "wasm32"))]
pub async fn lookup(url: &str, timeout: std::time::Duration) -> RatesOutcome {
    match fetch_rates(url, timeout).await {
        Ok(table) => {
            tracing::debug!(currencies = table.rates.len(), "exchange rates fetched");
            RatesOutcome::Live(table)
        }
        Err(err) => {
            tracing::warn!(code = err.error_code(), "exchange rate lookup failed: {err}");
            RatesOutcome::Offline(err.to_string())
        }
    }
}

// ============================================================================
// Betting summary
// ============================================================================

/// Returns on a stake at decimal odds, converted when rates are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingSummary {
    pub decimal_odds: f64,
    /// Currency the figures are in; the base currency when offline.
    pub currency: String,
    pub total_returned: f64,
    pub net_profit: f64,
    /// False when the rate lookup failed or lacked the currency.
    pub live: bool,
}

impl BettingSummary {
    pub fn to_markup(&self) -> Markup {
        let decimal = el("p")
            .child(el("strong").text("Decimal Odds used:"))
            .text(format!(" {}", to_fixed(self.decimal_odds, 2)));
        if self.live {
            el("div")
                .child(el("h4").text("Betting Results"))
                .child(decimal)
                .child(
                    el("p")
                        .child(el("strong").text("Total Returned:"))
                        .text(format!(" {}", format_money(self.total_returned, &self.currency))),
                )
                .child(
                    el("p")
                        .child(el("strong").text("Net Profit:"))
                        .text(format!(" {}", format_money(self.net_profit, &self.currency))),
                )
                .child(el("small").text(format!(
                    "(Assuming Stake in {BASE_CURRENCY}, converted to {})",
                    self.currency
                )))
                .into()
        } else {
            el("div")
                .child(el("h4").text("Betting Results (Offline)"))
                .child(decimal)
                .child(
                    el("p")
                        .child(el("strong").text("Total Returned:"))
                        .text(format!(" {} (Base Currency)", to_fixed(self.total_returned, 2))),
                )
                .child(
                    el("p")
                        .child(el("strong").text("Net Profit:"))
                        .text(format!(" {} (Base Currency)", to_fixed(self.net_profit, 2))),
                )
                .child(el("small").class("offline-notice").text("Could not fetch exchange rates."))
                .into()
        }
    }
}

/// Compute returns on `stake` (base currency) and convert to `currency`
/// when `outcome` is live and knows it.
pub fn betting_summary(stake: f64, decimal_odds: f64, currency: &str, outcome: &RatesOutcome) -> BettingSummary {
    let total = stake * decimal_odds;
    let profit = total - stake;
    let rate = match outcome {
        RatesOutcome::Live(table) => table.rate(currency),
        RatesOutcome::Offline(_) => None,
    };
    match rate {
        Some(rate) => BettingSummary {
            decimal_odds,
            currency: currency.to_string(),
            total_returned: total * rate,
            net_profit: profit * rate,
            live: true,
        },
        None => BettingSummary {
            decimal_odds,
            currency: BASE_CURRENCY.to_string(),
            total_returned: total,
            net_profit: profit,
            live: false,
        },
    }
}

/// `$1,234.50`, `¥1,235`, `SEK 99.00`.
pub fn format_money(amount: f64, code: &str) -> String {
    let (symbol, decimals) = match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "JPY" => ("¥", 0),
        "CNY" => ("CN¥", 2),
        "INR" => ("₹", 2),
        "KRW" => ("₩", 0),
        "AUD" => ("A$", 2),
        "CAD" => ("CA$", 2),
        "BRL" => ("R$", 2),
        "HKD" => ("HK$", 2),
        "MXN" => ("MX$", 2),
        "NZD" => ("NZ$", 2),
        "TWD" => ("NT$", 2),
        _ => ("", 2),
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    let digits = group_thousands(amount.abs(), decimals);
    if symbol.is_empty() {
        format!("{sign}{code} {digits}")
    } else {
        format!("{sign}{symbol}{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn live(pairs: &[(&str, f64)]) -> RatesOutcome {
        RatesOutcome::Live(RateTable {
            base: BASE_CURRENCY.to_string(),
            rates: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            fetched_at: Utc::now(),
        })
    }

    #[test]
    fn test_parse_both_layouts() {
        let a = parse_rates("u", r#"{"result":"success","base_code":"USD","rates":{"EUR":0.9}}"#).unwrap();
        assert_eq!(a.rate("EUR"), Some(0.9));
        let b = parse_rates("u", r#"{"result":"success","conversion_rates":{"GBP":0.8}}"#).unwrap();
        assert_eq!(b.rate("GBP"), Some(0.8));
        assert_eq!(b.rate("USD"), Some(1.0));
    }

    #[test]
    fn test_parse_rejects_api_error() {
        let err = parse_rates("u", r#"{"result":"error","error-type":"invalid-key"}"#).unwrap_err();
        assert_eq!(err.error_code(), "NETWORK_ERROR");
        assert!(parse_rates("u", "<html>").is_err());
        assert!(parse_rates("u", r#"{"result":"success"}"#).is_err());
    }

    #[test]
    fn test_live_summary_converts() {
        let s = betting_summary(100.0, 6.0, "EUR", &live(&[("EUR", 0.5)]));
        assert!(s.live);
        assert_eq!(s.currency, "EUR");
        assert_relative_eq!(s.total_returned, 300.0);
        assert_relative_eq!(s.net_profit, 250.0);
    }

    #[test]
    fn test_offline_summary_uses_base_currency() {
        let s = betting_summary(100.0, 6.0, "EUR", &RatesOutcome::Offline("timeout".into()));
        assert!(!s.live);
        assert_eq!(s.currency, "USD");
        assert_relative_eq!(s.total_returned, 600.0);
        assert_relative_eq!(s.net_profit, 500.0);

        let mut doc = crate::dom::Document::new();
        let root = doc.root();
        let node = doc.append(root, s.to_markup()).unwrap();
        let text = doc.text_content(node);
        assert!(text.contains("Offline"));
        assert!(text.contains("600.00 (Base Currency)"));
        assert!(text.contains("Could not fetch exchange rates."));
    }

    #[test]
    fn test_unknown_currency_degrades() {
        let s = betting_summary(10.0, 2.0, "XYZ", &live(&[("EUR", 0.5)]));
        assert!(!s.live);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_money(1234.6, "JPY"), "¥1,235");
        assert_eq!(format_money(-5.0, "EUR"), "-€5.00");
        assert_eq!(format_money(99.0, "SEK"), "SEK 99.00");
    }
}
