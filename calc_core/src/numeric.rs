//! # Numeric Text
//!
//! Conversions between form-field text and `f64`. Field parsing is
//! prefix-based and lenient: `"12.5 kg"` reads as `12.5`, `"abc"` reads as
//! nothing. Formatting helpers produce fixed, exponential and
//! significant-digit renderings plus thousands grouping for result panels.

/// Parse the longest numeric prefix of `text` after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent and the literal `Infinity`. Returns `None` when no digits are
/// found.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse a base-10 integer prefix (sign plus digits).
pub fn parse_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}

/// Fixed-point rendering with `decimals` places.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return to_display(value);
    }
    let out = format!("{:.*}", decimals, value);
    // "-0.00" reads badly in a result panel
    if out.starts_with('-') && out[1..].chars().all(|c| c == '0' || c == '.') {
        out[1..].to_string()
    } else {
        out
    }
}

/// Exponential rendering with an explicit exponent sign, e.g. `6.67e-11`.
pub fn to_exponential(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return to_display(value);
    }
    let raw = format!("{:.*e}", decimals, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => raw,
    }
}

/// Render with `precision` significant digits, switching to exponential
/// form when the exponent is below -6 or at least `precision`.
pub fn to_precision(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return to_display(value);
    }
    let precision = precision.max(1);
    if value == 0.0 {
        return to_fixed(0.0, precision - 1);
    }
    let exponential = to_exponential(value, precision - 1);
    let exponent: i32 = exponential
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    if exponent < -6 || exponent >= precision as i32 {
        exponential
    } else {
        to_fixed(value, (precision as i32 - 1 - exponent).max(0) as usize)
    }
}

/// Shortest round-trip rendering, with `Infinity`/`NaN` spelled out.
pub fn to_display(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.abs() >= 1e21 || (value != 0.0 && value.abs() < 1e-6) {
        let raw = format!("{:e}", value);
        match raw.split_once('e') {
            Some((m, e)) if !e.starts_with('-') => format!("{m}e+{e}"),
            _ => raw,
        }
    } else {
        format!("{}", value)
    }
}

/// Round to at most `decimals` places and drop trailing zeros.
pub fn trim_decimals(value: f64, decimals: usize) -> String {
    let fixed = to_fixed(value, decimals);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Thousands-grouped rendering with exactly `decimals` fraction digits.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    group_digits(to_fixed(value, decimals))
}

/// Thousands-grouped rendering with at most `max_decimals` fraction
/// digits and no trailing zeros, e.g. `1,234.5`.
pub fn to_locale(value: f64, max_decimals: usize) -> String {
    group_digits(trim_decimals(value, max_decimals))
}

fn group_digits(fixed: String) -> String {
    let (sign, body) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return fixed;
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12.5 kg"), Some(12.5));
        assert_eq!(parse_number("  -3e2x"), Some(-300.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(parse_integer("42abc"), Some(42));
        assert_eq!(parse_integer("-7.9"), Some(-7));
        assert_eq!(parse_integer("x1"), None);
    }

    #[test]
    fn test_fixed_and_exponential() {
        assert_eq!(to_fixed(3.14159, 2), "3.14");
        assert_eq!(to_fixed(-0.0001, 2), "0.00");
        assert_eq!(to_exponential(6.6743e-11, 2), "6.67e-11");
        assert_eq!(to_exponential(12367.0, 2), "1.24e+4");
    }

    #[test]
    fn test_precision() {
        assert_eq!(to_precision(123.456, 4), "123.5");
        assert_eq!(to_precision(0.000012345, 3), "0.0000123");
        assert_eq!(to_precision(123456.0, 3), "1.23e+5");
    }

    #[test]
    fn test_display_and_grouping() {
        assert_eq!(to_display(3.0), "3");
        assert_eq!(to_display(0.1), "0.1");
        assert_eq!(to_display(f64::INFINITY), "Infinity");
        assert_eq!(trim_decimals(2.5000, 4), "2.5");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(-999.0, 0), "-999");
        assert_eq!(to_locale(1234.5, 8), "1,234.5");
        assert_eq!(to_locale(-1234567.0, 2), "-1,234,567");
    }
}
