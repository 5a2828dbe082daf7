//! # Combinatorics
//!
//! Binomial coefficients and lottery draw probabilities.
//!
//! ## Notation
//!
//! - `n` = Balls in the pool
//! - `k` = Balls drawn (also the size of a ticket)
//! - `m` = Matching numbers on the ticket
//!
//! ## Example
//!
//! ```rust
//! use calc_core::equations::combinatorics::{combinations, lottery_odds};
//!
//! assert_eq!(combinations(49, 6), 13_983_816.0);
//! let p = lottery_odds(6, 6, 49);
//! assert!((p - 1.0 / 13_983_816.0).abs() < 1e-18);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CalcError, CalcResult};

/// Largest integer an `f64` holds exactly (2^53 - 1).
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Binomial coefficient C(n, k), rounded to the nearest integer.
///
/// Returns 0 when `k < 0` or `k > n`. Uses the smaller of `k` and `n - k`
/// so the running product stays small. Results beyond
/// [`MAX_EXACT_INTEGER`] are returned but logged as imprecise; results
/// beyond `f64::MAX` are `f64::INFINITY`.
///
/// With `k <= n / 2` every factor is at least 1 and the product at least
/// doubles every step, so it overflows within about a thousand iterations
/// however large `n` is.
pub fn combinations(n: i64, k: i64) -> f64 {
    if k < 0 || k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0_f64;
    for i in 1..=k {
        result = result * (n - i + 1) as f64 / i as f64;
        if !result.is_finite() {
            warn!(n, k, "combination count overflows f64");
            return f64::INFINITY;
        }
    }
    if result > MAX_EXACT_INTEGER {
        warn!(n, k, "combination count exceeds exact integer range; precision may be lost");
    }
    result.round()
}

/// Probability of matching exactly `matches` numbers when `drawn` balls
/// are drawn from `pool` and the ticket holds `drawn` numbers.
///
/// # Formula (hypergeometric)
/// P = C(k, m) × C(n − k, k − m) / C(n, k)
pub fn lottery_odds(drawn: i64, matches: i64, pool: i64) -> f64 {
    let total = combinations(pool, drawn);
    if total == 0.0 {
        return 0.0;
    }
    combinations(drawn, matches) * combinations(pool - drawn, drawn - matches) / total
}

// =============================================================================
// Lottery draws
// =============================================================================

/// Prize tier being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LotteryKind {
    /// Match `m` main numbers.
    Standard,
    /// Match `m - 1` main numbers plus one bonus ball drawn from the balls
    /// left in the main pool.
    BonusRemaining,
    /// Match `m` main numbers and `mb` of `kb` balls drawn from a separate
    /// bonus pool of `nb`.
    BonusPool,
}

impl LotteryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotteryKind::Standard => "standard",
            LotteryKind::BonusRemaining => "bonus-remaining",
            LotteryKind::BonusPool => "bonus-pool",
        }
    }

    pub fn parse(value: &str) -> Option<LotteryKind> {
        [LotteryKind::Standard, LotteryKind::BonusRemaining, LotteryKind::BonusPool]
            .into_iter()
            .find(|k| k.as_str() == value)
    }
}

/// Separate bonus pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPool {
    pub drawn: i64,
    pub matches: i64,
    pub pool: i64,
}

/// Lottery inputs; `None` is a blank or non-numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotteryInput {
    pub kind: LotteryKind,
    pub drawn: Option<i64>,
    pub matches: Option<i64>,
    pub pool: Option<i64>,
    /// Only read for [`LotteryKind::BonusPool`].
    pub bonus: Option<BonusPool>,
}

/// Winning odds of one prize tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotteryResult {
    pub probability: f64,
    /// `1 / probability`, the "1 in X" figure.
    pub one_in: f64,
}

/// Price a prize tier.
pub fn lottery(input: &LotteryInput) -> CalcResult<LotteryResult> {
    let (Some(k), Some(m), Some(n)) = (input.drawn, input.matches, input.pool) else {
        return Err(CalcError::invalid_input(
            "lottery",
            "",
            "Please enter valid numbers for the main pool.",
        ));
    };
    if m > k {
        return Err(CalcError::invalid_input("lottery-matches", m.to_string(), "Matches cannot exceed balls drawn."));
    }
    if k > n {
        return Err(CalcError::invalid_input("lottery-drawn", k.to_string(), "Balls drawn cannot exceed pool size."));
    }

    ensure_countable("lottery-pool", n, k)?;
    if let (LotteryKind::BonusPool, Some(bonus)) = (input.kind, input.bonus) {
        ensure_countable("bonus-pool", bonus.pool, bonus.drawn)?;
    }

    let probability = match input.kind {
        LotteryKind::Standard => lottery_odds(k, m, n),
        LotteryKind::BonusRemaining => {
            if k >= n {
                return Err(CalcError::invalid_input(
                    "lottery-pool",
                    n.to_string(),
                    "Pool size must be greater than balls drawn for bonus calculation.",
                ));
            }
            if m < 1 {
                return Err(CalcError::invalid_input(
                    "lottery-matches",
                    m.to_string(),
                    "Need at least 1 match for bonus calculation.",
                ));
            }
            let main_matches = m - 1;
            // the bonus ball is one of the n - k balls left; it must be one
            // of the k - (m - 1) unmatched numbers on the ticket
            let bonus = (k - main_matches) as f64 / (n - k) as f64;
            if bonus > 1.0 {
                return Err(CalcError::out_of_range(
                    "bonus",
                    "Invalid combination: more unmatched ticket numbers than remaining pool.",
                ));
            }
            lottery_odds(k, main_matches, n) * bonus
        }
        LotteryKind::BonusPool => {
            let bonus = input.bonus.ok_or_else(|| {
                CalcError::invalid_input("bonus-pool", "", "Please enter valid numbers for the bonus pool.")
            })?;
            lottery_odds(k, m, n) * lottery_odds(bonus.drawn, bonus.matches, bonus.pool)
        }
    };

    if probability == 0.0 {
        return Err(CalcError::out_of_range("probability", "Probability is 0 (Impossible combination)."));
    }
    Ok(LotteryResult {
        probability,
        one_in: 1.0 / probability,
    })
}

/// Rejects draws whose ticket count does not fit in an `f64`.
fn ensure_countable(field: &str, pool: i64, drawn: i64) -> CalcResult<()> {
    if combinations(pool, drawn).is_infinite() {
        return Err(CalcError::out_of_range(
            field,
            "Too many possible tickets to calculate. Use a smaller pool or fewer balls drawn.",
        ));
    }
    Ok(())
}
