//! # Odds
//!
//! Odds "S to F" describe S chances for success against F chances against.
//! Fractional odds `N/D` pay N for every D staked; decimal odds include the
//! stake, so `decimal = N/D + 1`.
//!
//! Consecutive-event and betting figures both start from the same decimal
//! odds, derived by [`decimal_odds`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{parse_number, to_fixed};

/// Decimal odds from a fractional string, falling back to S/F chances.
///
/// A fraction containing `/` takes precedence. Otherwise the odds are
/// `1 + F/S` when both chances are known and `S > 0`. Returns `None` when
/// neither source yields a finite number.
pub fn decimal_odds(fractional: &str, success: Option<f64>, failure: Option<f64>) -> Option<f64> {
    let fractional = fractional.trim();
    let odds = if fractional.contains('/') {
        let mut parts = fractional.split('/');
        let num = parts.next().and_then(parse_number)?;
        let den = parts.next().and_then(parse_number)?;
        num / den + 1.0
    } else {
        match (success, failure) {
            (Some(s), Some(f)) if s > 0.0 => 1.0 + f / s,
            _ => return None,
        }
    };
    odds.is_finite().then_some(odds)
}

/// A probability in the three notations the odds panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability(pub f64);

impl Probability {
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    pub fn per_mille(&self) -> f64 {
        self.0 * 1000.0
    }

    pub fn basis_points(&self) -> f64 {
        self.0 * 10_000.0
    }

    /// `16.67% | 166.67‰ | 1667‱`
    pub fn display(&self) -> String {
        format!(
            "{}% | {}‰ | {}‱",
            to_fixed(self.percent(), 2),
            to_fixed(self.per_mille(), 2),
            to_fixed(self.basis_points(), 0)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicOdds {
    pub win: Probability,
    pub lose: Probability,
}

/// P(win) = S / (S + F), P(lose) = F / (S + F).
pub fn basic_odds(success: Option<f64>, failure: Option<f64>) -> CalcResult<BasicOdds> {
    let (Some(s), Some(f)) = (success, failure) else {
        return Err(CalcError::invalid_input("odds", "", "Please enter valid numbers."));
    };
    let total = s + f;
    if total == 0.0 {
        return Err(CalcError::invalid_input("odds", "0", "Total chances cannot be zero."));
    }
    Ok(BasicOdds {
        win: Probability(s / total),
        lose: Probability(f / total),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsecutiveOdds {
    pub count: i64,
    pub win: Probability,
    pub lose: Probability,
}

/// Chance of `count` wins (or losses) in a row at the given decimal odds.
///
/// # Formula
/// - p = 1 / decimal
/// - P(win ×x) = pˣ, P(lose ×x) = (1 − p)ˣ
pub fn consecutive_odds(count: Option<i64>, decimal: Option<f64>) -> CalcResult<ConsecutiveOdds> {
    let count = match count {
        Some(x) if x >= 1 => x,
        _ => {
            return Err(CalcError::invalid_input(
                "consecutive-count",
                "",
                "Please enter a valid count for consecutive events.",
            ))
        }
    };
    let decimal = match decimal {
        Some(d) if d > 1.0 => d,
        _ => {
            return Err(CalcError::invalid_input(
                "fractional-odds",
                "",
                "Please enter valid Fractional Odds or Success/Failure values first.",
            ))
        }
    };
    let p = 1.0 / decimal;
    let exp = i32::try_from(count).unwrap_or(i32::MAX);
    Ok(ConsecutiveOdds {
        count,
        win: Probability(p.powi(exp)),
        lose: Probability((1.0 - p).powi(exp)),
    })
}

/// Convert `"N/D"` to decimal odds.
pub fn fractional_to_decimal(fractional: &str) -> CalcResult<f64> {
    let parts: Vec<&str> = fractional.split('/').collect();
    if parts.len() != 2 {
        return Err(CalcError::invalid_input(
            "fractional-odds",
            fractional,
            "Invalid fraction format. Use '5/1'.",
        ));
    }
    match (parse_number(parts[0]), parse_number(parts[1])) {
        (Some(num), Some(den)) if den != 0.0 => Ok(num / den + 1.0),
        _ => Err(CalcError::invalid_input(
            "fractional-odds",
            fractional,
            "Invalid numbers in fraction.",
        )),
    }
}

/// A stake ready to be priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub stake: f64,
    pub decimal_odds: f64,
}

/// Check odds and stake before any rate lookup starts.
pub fn validate_bet(decimal: Option<f64>, stake: Option<f64>) -> CalcResult<Bet> {
    let decimal_odds = match decimal {
        Some(d) if d > 1.0 => d,
        _ => {
            return Err(CalcError::invalid_input(
                "fractional-odds",
                "",
                "Please enter valid Fractional Odds (e.g. 5/1) or Success/Failure values first to determine odds.",
            ))
        }
    };
    match stake {
        Some(stake) if stake > 0.0 => Ok(Bet { stake, decimal_odds }),
        _ => Err(CalcError::invalid_input("betting-stake", "", "Please enter a valid stake.")),
    }
}
