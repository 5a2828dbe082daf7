//! # Percentages
//!
//! Percent-of, percent error, elapsed time and relative change.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// `percentage`% of `value`.
#[inline]
pub fn percent_of(value: f64, percentage: f64) -> f64 {
    value * percentage / 100.0
}

/// |measured − actual| / |actual| × 100.
pub fn percent_error(actual: f64, measured: f64) -> CalcResult<f64> {
    if actual == 0.0 {
        return Err(CalcError::invalid_input("actual-value", "0", "Actual value cannot be zero"));
    }
    Ok(((measured - actual) / actual).abs() * 100.0)
}

/// Share of a time span that has passed and that is left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePercentage {
    pub elapsed: f64,
    pub remaining: f64,
}

/// Percentage of `total` covered by `elapsed`.
///
/// Blank inputs, a non-positive total and an elapsed time outside
/// `0..=total` are rejected.
pub fn time_percentage(total: Option<f64>, elapsed: Option<f64>) -> CalcResult<TimePercentage> {
    let (Some(total), Some(elapsed)) = (total, elapsed) else {
        return Err(CalcError::invalid_input("time", "", "Please enter valid numbers"));
    };
    if total <= 0.0 {
        return Err(CalcError::invalid_input(
            "total-time",
            total.to_string(),
            "Total time must be greater than zero",
        ));
    }
    if elapsed < 0.0 || elapsed > total {
        return Err(CalcError::out_of_range(
            "elapsed-time",
            "Elapsed time must be between 0 and total time",
        ));
    }
    let share = elapsed / total * 100.0;
    Ok(TimePercentage {
        elapsed: share,
        remaining: 100.0 - share,
    })
}

/// Relative change from an initial to a final value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentChange {
    pub initial: f64,
    pub final_value: f64,
    /// final − initial
    pub difference: f64,
    /// difference / |initial| × 100, signed
    pub percent: f64,
}

impl PercentChange {
    pub fn is_increase(&self) -> bool {
        self.percent >= 0.0
    }
}

/// (final − initial) / |initial| × 100.
pub fn percent_change(initial: f64, final_value: f64) -> CalcResult<PercentChange> {
    if initial == 0.0 {
        return Err(CalcError::invalid_input(
            "initial",
            "0",
            "Initial value cannot be zero (division by zero).",
        ));
    }
    let difference = final_value - initial;
    Ok(PercentChange {
        initial,
        final_value,
        difference,
        percent: difference / initial.abs() * 100.0,
    })
}

/// (initial − final) / |initial| × 100. Negative when the value grew.
pub fn percent_decrease(initial: f64, final_value: f64) -> CalcResult<f64> {
    if initial == 0.0 {
        return Err(CalcError::invalid_input(
            "initial",
            "0",
            "Initial value cannot be zero (division by zero).",
        ));
    }
    Ok((initial - final_value) / initial.abs() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_percentage() {
        let t = time_percentage(Some(100.0), Some(25.0)).unwrap();
        assert_relative_eq!(t.elapsed, 25.0);
        assert_relative_eq!(t.remaining, 75.0);
    }

    #[test]
    fn test_time_percentage_rejects_zero_total() {
        let err = time_percentage(Some(0.0), Some(0.0)).unwrap_err();
        assert!(err.user_message().contains("must be greater than zero"));
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_time_percentage_out_of_range() {
        let err = time_percentage(Some(100.0), Some(105.0)).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        assert_eq!(err.user_message(), "Elapsed time must be between 0 and total time");
        assert!(time_percentage(Some(100.0), Some(-1.0)).is_err());
        assert_eq!(
            time_percentage(None, Some(1.0)).unwrap_err().user_message(),
            "Please enter valid numbers"
        );
    }

    #[test]
    fn test_percent_error() {
        assert_relative_eq!(percent_error(50.0, 45.0).unwrap(), 10.0);
        assert_relative_eq!(percent_error(-50.0, -55.0).unwrap(), 10.0);
        assert!(percent_error(0.0, 1.0).is_err());
    }

    #[test]
    fn test_percent_change_uses_absolute_initial() {
        let up = percent_change(80.0, 100.0).unwrap();
        assert_relative_eq!(up.percent, 25.0);
        assert!(up.is_increase());
        // -50 -> -25 is an increase of 50%
        let neg = percent_change(-50.0, -25.0).unwrap();
        assert_relative_eq!(neg.percent, 50.0);
        assert!(percent_change(0.0, 5.0).is_err());
    }

    #[test]
    fn test_percent_decrease() {
        assert_relative_eq!(percent_decrease(200.0, 150.0).unwrap(), 25.0);
        assert_relative_eq!(percent_decrease(100.0, 120.0).unwrap(), -20.0);
        assert_relative_eq!(percent_of(200.0, 15.0), 30.0);
    }
}
