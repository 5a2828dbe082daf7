//! # Everyday Tools
//!
//! Planetary ages, upload times, password generation and Roman numerals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::to_fixed;

// =============================================================================
// PLANETARY AGE
// =============================================================================

/// Orbital periods in Earth years.
pub const PLANETS: [(&str, f64); 8] = [
    ("Mercury", 0.2408467),
    ("Venus", 0.61519726),
    ("Earth", 1.0),
    ("Mars", 1.8808158),
    ("Jupiter", 11.862615),
    ("Saturn", 29.447498),
    ("Uranus", 84.016846),
    ("Neptune", 164.79132),
];

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetAge {
    pub planet: &'static str,
    pub years: f64,
}

/// Age on every planet for an age in Earth years.
pub fn planetary_ages(earth_age: Option<f64>) -> CalcResult<Vec<PlanetAge>> {
    let age = match earth_age {
        Some(a) if a >= 0.0 => a,
        _ => return Err(CalcError::invalid_input("earth-age", "", "Please enter a valid age.")),
    };
    Ok(PLANETS
        .iter()
        .map(|&(planet, period)| PlanetAge {
            planet,
            years: age / period,
        })
        .collect())
}

/// Earth age from a `YYYY-MM-DD` birth date, counting whole days.
pub fn age_from_birth_date(dob: &str, today: NaiveDate) -> CalcResult<f64> {
    let dob = dob.trim();
    if dob.is_empty() {
        return Err(CalcError::invalid_input("dob", "", "Please select a date of birth."));
    }
    let born = NaiveDate::parse_from_str(dob, "%Y-%m-%d")
        .map_err(|_| CalcError::invalid_input("dob", dob, "Please select a date of birth."))?;
    let days = (today - born).num_days().abs();
    Ok(days as f64 / DAYS_PER_YEAR)
}

// =============================================================================
// UPLOAD TIME
// =============================================================================

/// Seconds to move `bits` at `bits_per_second`.
pub fn upload_seconds(bits: Option<f64>, bits_per_second: Option<f64>) -> CalcResult<f64> {
    match (bits, bits_per_second) {
        (Some(b), Some(r)) if b > 0.0 && r > 0.0 => Ok(b / r),
        _ => Err(CalcError::invalid_input(
            "file-size",
            "",
            "Please enter valid positive numbers.",
        )),
    }
}

/// `12.50 seconds`, `3 min 20 sec`, `2 hr 5 min` or `3 days 4 hr`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{} seconds", to_fixed(seconds, 2));
    }
    if seconds < 3600.0 {
        let minutes = (seconds / 60.0).floor();
        return format!("{minutes} min {} sec", to_fixed(seconds % 60.0, 0));
    }
    if seconds < 86_400.0 {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds % 3600.0) / 60.0).floor();
        return format!("{hours} hr {minutes} min");
    }
    let days = (seconds / 86_400.0).floor();
    let hours = ((seconds % 86_400.0) / 3600.0).floor();
    format!("{days} days {hours} hr")
}

// =============================================================================
// PASSWORDS
// =============================================================================

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
pub const AMBIGUOUS: &str = "il1Lo0O";
pub const BRACKETS: &str = "<>()[]{}";

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub exclude_ambiguous: bool,
    pub exclude_brackets: bool,
    pub no_repeat: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
            exclude_ambiguous: false,
            exclude_brackets: false,
            no_repeat: false,
        }
    }
}

impl PasswordOptions {
    /// Distinct candidate characters after exclusions, in pool order.
    pub fn pool(&self) -> Vec<char> {
        let sets = [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ];
        let mut pool: Vec<char> = Vec::new();
        for c in sets.iter().filter(|(on, _)| *on).flat_map(|(_, set)| set.chars()) {
            if self.exclude_ambiguous && AMBIGUOUS.contains(c) {
                continue;
            }
            if self.exclude_brackets && BRACKETS.contains(c) {
                continue;
            }
            if !pool.contains(&c) {
                pool.push(c);
            }
        }
        pool
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPassword {
    pub password: String,
    pub pool_size: usize,
    pub entropy_bits: f64,
    pub strength: Strength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_entropy(bits: f64) -> Self {
        if bits < 28.0 {
            Strength::VeryWeak
        } else if bits < 36.0 {
            Strength::Weak
        } else if bits < 60.0 {
            Strength::Reasonable
        } else if bits < 128.0 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::VeryWeak => "Very Weak",
            Strength::Weak => "Weak",
            Strength::Reasonable => "Reasonable",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }

    /// Strength meter fill, in percent.
    pub fn meter(&self) -> u8 {
        match self {
            Strength::VeryWeak => 15,
            Strength::Weak => 30,
            Strength::Reasonable => 50,
            Strength::Strong => 75,
            Strength::VeryStrong => 100,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Strength::VeryWeak => "#ef4444",
            Strength::Weak => "#f97316",
            Strength::Reasonable => "#eab308",
            Strength::Strong => "#22c55e",
            Strength::VeryStrong => "#10b981",
        }
    }
}

/// Entropy of a uniformly random password: length × log₂(pool).
pub fn entropy_bits(length: usize, pool_size: usize) -> f64 {
    if pool_size == 0 {
        return 0.0;
    }
    length as f64 * (pool_size as f64).log2()
}

/// Build a password drawing indices from `next_u32`.
///
/// Without `no_repeat` each character is `pool[r % pool.len()]`; with it the
/// draw comes from the characters not yet used.
pub fn generate_with<R>(options: &PasswordOptions, mut next_u32: R) -> CalcResult<GeneratedPassword>
where
    R: FnMut() -> CalcResult<u32>,
{
    let pool = options.pool();
    if pool.is_empty() {
        return Err(CalcError::invalid_input(
            "pw-lower",
            "",
            "Select at least one character type!",
        ));
    }
    let length = options.length.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
    if options.no_repeat && length > pool.len() {
        return Err(CalcError::invalid_input(
            "pw-length",
            length.to_string(),
            format!("Max {} chars with no repeats", pool.len()),
        ));
    }

    let mut password = String::with_capacity(length);
    if options.no_repeat {
        let mut available = pool.clone();
        for _ in 0..length {
            let idx = next_u32()? as usize % available.len();
            password.push(available.remove(idx));
        }
    } else {
        for _ in 0..length {
            let idx = next_u32()? as usize % pool.len();
            password.push(pool[idx]);
        }
    }

    let entropy = entropy_bits(length, pool.len());
    Ok(GeneratedPassword {
        password,
        pool_size: pool.len(),
        entropy_bits: entropy,
        strength: Strength::from_entropy(entropy),
    })
}

/// Generate a password from the operating system's random source.
pub fn generate_password(options: &PasswordOptions) -> CalcResult<GeneratedPassword> {
    generate_with(options, || {
        getrandom::u32().map_err(|e| CalcError::Internal {
            message: format!("random source unavailable: {e}"),
        })
    })
}

// =============================================================================
// ROMAN NUMERALS
// =============================================================================

const NUMERALS: [(&str, u32); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

pub const ROMAN_SEPARATORS: [char; 6] = ['-', '.', '/', '\\', '|', ' '];

fn symbol_value(c: char) -> Option<i64> {
    Some(match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => return None,
    })
}

/// Numeral for 1..=3999 plus the symbols it was built from.
pub fn int_to_roman(n: u32) -> Option<(String, Vec<(&'static str, u32)>)> {
    if !(1..=3999).contains(&n) {
        return None;
    }
    let mut rest = n;
    let mut numeral = String::new();
    let mut steps = Vec::new();
    for &(sym, value) in &NUMERALS {
        while rest >= value {
            numeral.push_str(sym);
            steps.push((sym, value));
            rest -= value;
        }
    }
    Some((numeral, steps))
}

/// Value of a canonical numeral plus each symbol's signed contribution.
///
/// Non-canonical spellings such as `IIII` or `IM` are rejected.
pub fn roman_to_int(input: &str) -> Option<(u32, Vec<(char, i64)>)> {
    let upper = input.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    let values: Vec<(char, i64)> = upper
        .chars()
        .map(|c| symbol_value(c).map(|v| (c, v)))
        .collect::<Option<_>>()?;

    let mut parts = Vec::with_capacity(values.len());
    let mut total = 0i64;
    for (i, &(c, v)) in values.iter().enumerate() {
        let signed = match values.get(i + 1) {
            Some(&(_, next)) if next > v => -v,
            _ => v,
        };
        total += signed;
        parts.push((c, signed));
    }

    let n = u32::try_from(total).ok()?;
    match int_to_roman(n) {
        Some((canonical, _)) if canonical == upper => Some((n, parts)),
        _ => None,
    }
}

/// What the converter produced for one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RomanConversion {
    /// Several values split on a separator.
    Multi { inputs: String, outputs: String },
    ToRoman { value: u32, numeral: String, lines: Vec<String> },
    FromRoman { numeral: String, value: u32, lines: Vec<String> },
}

const MULTI_ERROR: &str =
    "Invalid input. Numbers must be 1–3999, Roman numerals must use valid symbols (I, V, X, L, C, D, M).";

/// Convert a number, a numeral, or a separated list of either.
pub fn convert_roman(input: &str) -> CalcResult<RomanConversion> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(CalcError::invalid_input("roman-input", "", "Enter a value…"));
    }

    if let Some(sep) = raw.chars().find(|c| ROMAN_SEPARATORS.contains(c)) {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for part in raw.split(|c| ROMAN_SEPARATORS.contains(&c)).filter(|p| !p.is_empty()) {
            if part.chars().all(|c| c.is_ascii_digit()) {
                let numeral = part
                    .parse::<u32>()
                    .ok()
                    .and_then(int_to_roman)
                    .map(|(numeral, _)| numeral)
                    .ok_or_else(|| CalcError::invalid_input("roman-input", raw, MULTI_ERROR))?;
                inputs.push(part.to_string());
                outputs.push(numeral);
            } else {
                let (value, _) =
                    roman_to_int(part).ok_or_else(|| CalcError::invalid_input("roman-input", raw, MULTI_ERROR))?;
                inputs.push(part.to_uppercase());
                outputs.push(value.to_string());
            }
        }
        if inputs.is_empty() {
            return Err(CalcError::invalid_input("roman-input", raw, MULTI_ERROR));
        }
        let joiner = sep.to_string();
        return Ok(RomanConversion::Multi {
            inputs: inputs.join(&joiner),
            outputs: outputs.join(&joiner),
        });
    }

    if raw.chars().all(|c| c.is_ascii_digit()) {
        let (value, numeral, steps) = raw
            .parse::<u32>()
            .ok()
            .and_then(|n| int_to_roman(n).map(|(numeral, steps)| (n, numeral, steps)))
            .ok_or_else(|| CalcError::out_of_range("roman-input", "Number must be between 1 and 3999."))?;
        let symbols: Vec<&str> = steps.iter().map(|(s, _)| *s).collect();
        let values: Vec<String> = steps.iter().map(|(_, v)| v.to_string()).collect();
        let lines = vec![
            format!("{value} → {}", symbols.join(" + ")),
            format!("= {}", values.join(" + ")),
            format!("= {numeral}"),
        ];
        return Ok(RomanConversion::ToRoman { value, numeral, lines });
    }

    if raw.chars().all(|c| c.is_ascii_alphabetic()) {
        let (value, parts) =
            roman_to_int(raw).ok_or_else(|| CalcError::invalid_input("roman-input", raw, "Invalid Roman numeral."))?;
        let numeral = raw.to_uppercase();
        let symbols: Vec<String> = parts.iter().map(|(c, _)| c.to_string()).collect();
        let values: Vec<String> = parts
            .iter()
            .map(|&(_, v)| if v < 0 { format!("({v})") } else { v.to_string() })
            .collect();
        let lines = vec![
            format!("{numeral} = {}", symbols.join(" + ")),
            format!("= {}", values.join(" + ")),
            format!("= {value}"),
        ];
        return Ok(RomanConversion::FromRoman { numeral, value, lines });
    }

    Err(CalcError::invalid_input(
        "roman-input",
        raw,
        "Invalid input. Enter a number (1–3999) or Roman numeral (I, V, X, L, C, D, M).",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_planetary_ages() {
        let ages = planetary_ages(Some(30.0)).unwrap();
        assert_eq!(ages.len(), 8);
        assert_relative_eq!(ages[2].years, 30.0);
        assert_relative_eq!(ages[3].years, 30.0 / 1.8808158);
        assert_eq!(planetary_ages(Some(-1.0)).unwrap_err().user_message(), "Please enter a valid age.");
        assert!(planetary_ages(None).is_err());
    }

    #[test]
    fn test_age_from_birth_date() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let age = age_from_birth_date("2023-01-01", today).unwrap();
        assert_relative_eq!(age, 365.0 / 365.25);
        assert_eq!(
            age_from_birth_date("not a date", today).unwrap_err().user_message(),
            "Please select a date of birth."
        );
        assert!(age_from_birth_date("", today).is_err());
    }

    #[test]
    fn test_upload_time() {
        // 100 MB over 10 Mbps
        let s = upload_seconds(Some(8e8), Some(1e7)).unwrap();
        assert_relative_eq!(s, 80.0);
        assert_eq!(format_duration(s), "1 min 20 sec");
        assert_eq!(format_duration(12.5), "12.50 seconds");
        assert_eq!(format_duration(7500.0), "2 hr 5 min");
        assert_eq!(format_duration(3.0 * 86_400.0 + 4.0 * 3600.0), "3 days 4 hr");
        assert_eq!(
            upload_seconds(Some(1.0), Some(0.0)).unwrap_err().user_message(),
            "Please enter valid positive numbers."
        );
    }

    #[test]
    fn test_password_pool() {
        let opts = PasswordOptions::default();
        assert_eq!(opts.pool().len(), 26 + 26 + 10 + 32);
        let opts = PasswordOptions {
            exclude_ambiguous: true,
            exclude_brackets: true,
            ..PasswordOptions::default()
        };
        let pool = opts.pool();
        assert!(!pool.contains(&'l'));
        assert!(!pool.contains(&'0'));
        assert!(!pool.contains(&'{'));
        assert_eq!(pool.len(), 94 - 7 - 8);
    }

    #[test]
    fn test_generate_with_sequence() {
        let opts = PasswordOptions {
            length: 4,
            uppercase: false,
            digits: false,
            symbols: false,
            ..PasswordOptions::default()
        };
        let mut n = 0u32;
        let pw = generate_with(&opts, || {
            n += 1;
            Ok(n)
        })
        .unwrap();
        assert_eq!(pw.password, "bcde");
        assert_eq!(pw.pool_size, 26);
        assert_relative_eq!(pw.entropy_bits, 4.0 * 26f64.log2());
        assert_eq!(pw.strength, Strength::VeryWeak);
    }

    #[test]
    fn test_no_repeat() {
        let opts = PasswordOptions {
            length: 10,
            lowercase: false,
            uppercase: false,
            symbols: false,
            no_repeat: true,
            ..PasswordOptions::default()
        };
        let pw = generate_with(&opts, || Ok(0)).unwrap();
        assert_eq!(pw.password, "0123456789");

        let too_long = PasswordOptions { length: 11, ..opts };
        assert_eq!(
            generate_with(&too_long, || Ok(0)).unwrap_err().user_message(),
            "Max 10 chars with no repeats"
        );
    }

    #[test]
    fn test_password_errors_and_strength() {
        let none = PasswordOptions {
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
            ..PasswordOptions::default()
        };
        assert_eq!(
            generate_password(&none).unwrap_err().user_message(),
            "Select at least one character type!"
        );
        let pw = generate_password(&PasswordOptions::default()).unwrap();
        assert_eq!(pw.password.chars().count(), 16);
        assert_eq!(pw.strength, Strength::Strong);
        assert_eq!(Strength::from_entropy(130.0).label(), "Very Strong");
    }

    #[test]
    fn test_int_to_roman() {
        assert_eq!(int_to_roman(1994).unwrap().0, "MCMXCIV");
        assert_eq!(int_to_roman(3999).unwrap().0, "MMMCMXCIX");
        assert!(int_to_roman(0).is_none());
        assert!(int_to_roman(4000).is_none());
    }

    #[test]
    fn test_roman_to_int_strict() {
        let (v, parts) = roman_to_int("mcm").unwrap();
        assert_eq!(v, 1900);
        assert_eq!(parts, vec![('M', 1000), ('C', -100), ('M', 1000)]);
        assert!(roman_to_int("IIII").is_none());
        assert!(roman_to_int("IM").is_none());
        assert!(roman_to_int("ABC").is_none());
    }

    #[test]
    fn test_convert_single_values() {
        match convert_roman("1994").unwrap() {
            RomanConversion::ToRoman { numeral, lines, .. } => {
                assert_eq!(numeral, "MCMXCIV");
                assert_eq!(lines[0], "1994 → M + CM + XC + IV");
                assert_eq!(lines[1], "= 1000 + 900 + 90 + 4");
            }
            other => panic!("unexpected {other:?}"),
        }
        match convert_roman("xiv").unwrap() {
            RomanConversion::FromRoman { numeral, value, lines } => {
                assert_eq!(numeral, "XIV");
                assert_eq!(value, 14);
                assert_eq!(lines[1], "= 10 + (-1) + 5");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            convert_roman("99999999999999999999").unwrap_err().user_message(),
            "Number must be between 1 and 3999."
        );
        assert_eq!(convert_roman("IIII").unwrap_err().user_message(), "Invalid Roman numeral.");
        assert!(convert_roman("12ab").unwrap_err().user_message().starts_with("Invalid input. Enter a number"));
        assert_eq!(convert_roman("  ").unwrap_err().user_message(), "Enter a value…");
    }

    #[test]
    fn test_convert_multi() {
        assert_eq!(
            convert_roman("2026/02/17").unwrap(),
            RomanConversion::Multi {
                inputs: "2026/02/17".into(),
                outputs: "MMXXVI/II/XVII".into(),
            }
        );
        assert_eq!(
            convert_roman("x|v").unwrap(),
            RomanConversion::Multi {
                inputs: "X|V".into(),
                outputs: "10|5".into(),
            }
        );
        assert_eq!(convert_roman("1 5000").unwrap_err().user_message(), MULTI_ERROR);
    }
}
