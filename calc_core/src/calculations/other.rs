//! Planetary age, upload time, password generator and Roman numerals.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::dom::{el, Document, ElementSpec, EventKind, Markup};
use crate::effects::Effect;
use crate::equations::misc::{
    age_from_birth_date, convert_roman, format_duration, generate_password, planetary_ages, upload_seconds,
    PasswordOptions, RomanConversion, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
use crate::errors::{CalcError, CalcResult};
use crate::numeric::to_fixed;
use crate::registry::{Calculator, CalculatorMeta};
use crate::units::{BIT_RATE, DATA_SIZE};

use super::layout::{
    bind_radio_group, calculate_button, checkbox, checked_radio, inline_layout, is_checked, layout, on_calculate,
    placeholder, radio_group, read_integer, read_number, select, show, text_input, PLACEHOLDER,
};
use super::Definition;

const PLANETARY_EDU: &str = r#"
<div class="educational-section">
    <h3>Orbital Periods &amp; Planetary Years</h3>
    <p>A planet's year is the time it takes to orbit the Sun once. Earth needs about 365.25 days; planets farther out need much longer.</p>
    <ul>
        <li><strong>Mercury:</strong> ~88 Earth days (0.24 Earth years)</li>
        <li><strong>Venus:</strong> ~225 Earth days (0.62 Earth years)</li>
        <li><strong>Mars:</strong> ~687 Earth days (1.88 Earth years)</li>
        <li><strong>Jupiter:</strong> ~11.86 Earth years</li>
        <li><strong>Saturn:</strong> ~29.45 Earth years</li>
        <li><strong>Uranus:</strong> ~84 Earth years</li>
        <li><strong>Neptune:</strong> ~165 Earth years</li>
    </ul>
    <p>Your age on another planet is your age in Earth years divided by that planet's orbital period:</p>
    \[ \text{Age}_{\text{Planet}} = \frac{\text{Age}_{\text{Earth}}}{\text{Orbital Period}_{\text{Planet}}} \]
</div>
"#;

const UPLOAD_EDU: &str = r#"
<div class="educational-section">
    <h3>Understanding Data Size Units</h3>
    <p>A <strong>bit</strong> is the smallest unit of digital information and holds a 0 or a 1. Eight bits make a <strong>byte</strong>.</p>
    <h4>Byte Conversion Chart</h4>
    <ul>
        <li>8 bits = 1 byte (B)</li>
        <li>1000 bytes = 1 kilobyte (KB)</li>
        <li>1000 kilobytes = 1 megabyte (MB)</li>
        <li>1000 megabytes = 1 gigabyte (GB)</li>
        <li>1000 gigabytes = 1 terabyte (TB)</li>
    </ul>
    <p><em>This calculator uses the decimal (SI) standard where 1 KB = 1000 B.</em></p>
    <h3>How to calculate upload time</h3>
    \[ \text{Upload Time} = \frac{\text{File Size}}{\text{Upload Speed}} \]
    <p>Connection speeds are quoted in megabits per second (Mbps) while files are measured in megabytes, and 1 MB = 8 Mb. A 40 MB file at 16 Mbps (2 MB/s) takes 20 seconds.</p>
</div>
"#;

const PASSWORD_EDU: &str = r#"
<div class="educational-section">
    <h3>Password Security</h3>
    <h4>Password Entropy</h4>
    <p>Entropy measures how unpredictable a password is:</p>
    \[ E = L \times \log_2(R) \]
    <p>where <strong>L</strong> is the password length and <strong>R</strong> the number of characters it is drawn from.</p>
    <h4>Strength Guidelines</h4>
    <ul>
        <li><strong>&lt; 28 bits:</strong> Very Weak</li>
        <li><strong>28 to 35 bits:</strong> Weak</li>
        <li><strong>36 to 59 bits:</strong> Reasonable</li>
        <li><strong>60 to 127 bits:</strong> Strong</li>
        <li><strong>128+ bits:</strong> Very Strong</li>
    </ul>
    <p>Passwords are generated locally from the operating system's random source and never leave this device.</p>
</div>
"#;

const ROMAN_EDU: &str = r#"
<div class="educational-section">
    <h3>Roman Numerals</h3>
    <p>Roman numerals write numbers with seven letters. They survive today on clock faces, book chapters and event names.</p>
    <h4>The Seven Symbols</h4>
    <table>
        <thead><tr><th>Symbol</th><th>Value</th></tr></thead>
        <tbody>
            <tr><td>I</td><td>1</td></tr>
            <tr><td>V</td><td>5</td></tr>
            <tr><td>X</td><td>10</td></tr>
            <tr><td>L</td><td>50</td></tr>
            <tr><td>C</td><td>100</td></tr>
            <tr><td>D</td><td>500</td></tr>
            <tr><td>M</td><td>1000</td></tr>
        </tbody>
    </table>
    <h4>Subtractive Notation</h4>
    <p>A smaller symbol before a larger one is subtracted: <strong>IV</strong> = 4, <strong>IX</strong> = 9, <strong>XL</strong> = 40, <strong>XC</strong> = 90, <strong>CD</strong> = 400, <strong>CM</strong> = 900.</p>
    <h4>Examples</h4>
    <ul>
        <li>2024 → MMXXIV</li>
        <li>1999 → MCMXCIX</li>
    </ul>
</div>
"#;

// ============================================================================
// Planetary age
// ============================================================================

fn age_field() -> Markup {
    el("div")
        .class("form-group")
        .child(el("label").attr("for", "earth-age").text("Your Age (Earth Years):"))
        .child(
            el("input")
                .id("earth-age")
                .attr("type", "number")
                .attr("min", "0")
                .attr("step", "0.1")
                .attr("placeholder", "e.g., 25"),
        )
        .into()
}

fn dob_field() -> Markup {
    el("div")
        .class("form-group")
        .child(el("label").attr("for", "dob").text("Date of Birth:"))
        .child(el("input").id("dob").attr("type", "date"))
        .into()
}

/// Earth age from whichever input method is active.
fn earth_age(doc: &Document, today: NaiveDate) -> CalcResult<Option<f64>> {
    match checked_radio(doc, "age-input-method").as_deref() {
        Some("dob") => age_from_birth_date(&doc.value_of("dob")?, today).map(Some),
        _ => read_number(doc, "earth-age"),
    }
}

fn planet_grid(doc: &Document, today: NaiveDate) -> CalcResult<Vec<Markup>> {
    let ages = planetary_ages(earth_age(doc, today)?)?;
    Ok(vec![el("div")
        .class("planet-grid")
        .children(ages.iter().map(|a| {
            el("div")
                .class("planet-card")
                .child(el("div").class("planet-name").text(a.planet))
                .child(el("div").class("planet-age").text(to_fixed(a.years, 2)))
                .child(el("div").class("planet-unit").text("years"))
        }))
        .into()])
}

pub fn planetary_age() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "age-on-planets",
            "Planetary Age",
            "Calculate your age on other planets in our solar system.",
        ),
        |def| {
            layout(
                def.meta(),
                "planetary-age-result",
                def.has_education(),
                vec![
                    el("div")
                        .class("form-group")
                        .child(el("label").text("Choose Input Method:"))
                        .child(radio_group(
                            "age-input-method",
                            &[("age", "Enter Age (Years)"), ("dob", "Enter Date of Birth")],
                            "age",
                        ))
                        .into(),
                    el("div").id("age-input-container").child(age_field()).into(),
                    calculate_button("calculate-planetary-age", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            bind_radio_group(doc, scope, "age-input-method", |doc, method| {
                let field = if method == "dob" { dob_field() } else { age_field() };
                show(doc, "age-input-container", [field])
            })?;
            on_calculate(doc, scope, "calculate-planetary-age", "planetary-age-result", |doc| {
                planet_grid(doc, Local::now().date_naive())
            })
        },
    )
    .with_education(PLANETARY_EDU)
}

// ============================================================================
// Upload time
// ============================================================================

fn amount_with_unit(id: &str, label: &str, hint: &str, unit: ElementSpec) -> Markup {
    el("div")
        .class("form-group")
        .child(el("label").attr("for", id).text(label))
        .child(
            el("div")
                .class("input-with-unit")
                .child(
                    el("input")
                        .id(id)
                        .attr("type", "number")
                        .attr("min", "0")
                        .attr("step", "any")
                        .attr("placeholder", hint),
                )
                .child(unit),
        )
        .into()
}

fn size_unit_select() -> ElementSpec {
    let options: Vec<(String, String)> = DATA_SIZE.units.iter().map(|u| (u.key.to_string(), u.label())).collect();
    select("size-unit", &options, "MB")
}

fn speed_unit_select() -> ElementSpec {
    let options: Vec<(String, String)> = BIT_RATE
        .units
        .iter()
        .map(|u| (u.key.to_string(), u.name.to_string()))
        .collect();
    select("speed-unit", &options, "Mbps")
}

pub fn upload_time() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "upload-time-calculator",
            "Upload Time",
            "Calculate how long it will take to upload a file based on its size and your upload speed.",
        ),
        |def| {
            layout(
                def.meta(),
                "upload-time-result",
                def.has_education(),
                vec![
                    amount_with_unit("file-size", "File Size:", "Enter file size", size_unit_select()),
                    amount_with_unit("upload-speed", "Upload Speed:", "Enter upload speed", speed_unit_select()),
                    calculate_button("calculate-upload-time", "Calculate Time"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-upload-time", "upload-time-result", |doc| {
                let size_unit = doc.value_of("size-unit")?;
                let speed_unit = doc.value_of("speed-unit")?;
                let bits = read_number(doc, "file-size")?.and_then(|v| DATA_SIZE.to_canonical(v, &size_unit));
                let rate = read_number(doc, "upload-speed")?.and_then(|v| BIT_RATE.to_canonical(v, &speed_unit));
                let seconds = upload_seconds(bits, rate)?;
                Ok(vec!["Estimated Time: ".into(), el("strong").text(format_duration(seconds)).into()])
            })
        },
    )
    .with_education(UPLOAD_EDU)
}

// ============================================================================
// Password generator
// ============================================================================

const COPY_LABEL: &str = "📋 Copy";

const PASSWORD_OPTIONS: [(&str, &str, bool); 7] = [
    ("pw-lower", "Lowercase (a-z)", true),
    ("pw-upper", "Uppercase (A-Z)", true),
    ("pw-numbers", "Numbers (0-9)", true),
    ("pw-symbols", "Symbols (!@#$%...)", true),
    ("pw-exclude-ambiguous", "Exclude Ambiguous (i l 1 L o 0 O)", false),
    ("pw-exclude-brackets", "Exclude Brackets (<>()[]{})", false),
    ("pw-no-repeat", "No Repeated Characters", false),
];

fn password_options(doc: &Document) -> CalcResult<PasswordOptions> {
    let length = read_integer(doc, "pw-length")?
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(PasswordOptions::default().length);
    Ok(PasswordOptions {
        length,
        lowercase: is_checked(doc, "pw-lower")?,
        uppercase: is_checked(doc, "pw-upper")?,
        digits: is_checked(doc, "pw-numbers")?,
        symbols: is_checked(doc, "pw-symbols")?,
        exclude_ambiguous: is_checked(doc, "pw-exclude-ambiguous")?,
        exclude_brackets: is_checked(doc, "pw-exclude-brackets")?,
        no_repeat: is_checked(doc, "pw-no-repeat")?,
    })
}

fn set_actions_enabled(doc: &mut Document, enabled: bool) -> CalcResult<()> {
    for id in ["pw-copy", "pw-regenerate"] {
        let button = doc.require(id)?;
        if enabled {
            doc.remove_attr(button, "disabled");
        } else {
            doc.set_attr(button, "disabled", "disabled");
        }
    }
    Ok(())
}

fn generate(doc: &mut Document) -> CalcResult<()> {
    let options = password_options(doc)?;
    let output = doc.require("pw-output")?;
    let section = doc.require("pw-strength-section")?;
    let copy = doc.require("pw-copy")?;
    doc.set_text(copy, COPY_LABEL)?;

    let generated = match generate_password(&options) {
        Ok(generated) => generated,
        Err(err @ CalcError::InvalidInput { .. }) => {
            doc.set_text(output, err.user_message())?;
            doc.set_hidden(section, true);
            return set_actions_enabled(doc, false);
        }
        Err(err) => return Err(err),
    };
    debug!(pool = generated.pool_size, length = options.length, "password generated");

    let strength = generated.strength;
    doc.set_text(output, generated.password)?;

    let bar = doc.require("pw-strength-bar")?;
    doc.set_attr(bar, "data-meter", strength.meter().to_string());
    doc.set_attr(
        bar,
        "style",
        format!("width: {}%; background: {};", strength.meter(), strength.color()),
    );
    let label = doc.require("pw-strength-label")?;
    doc.set_text(label, strength.label())?;
    doc.set_attr(label, "style", format!("color: {};", strength.color()));
    let entropy = doc.require("pw-entropy")?;
    doc.set_text(entropy, format!("{} bits entropy", to_fixed(generated.entropy_bits, 1)))?;

    doc.set_hidden(section, false);
    set_actions_enabled(doc, true)
}

pub fn password_generator() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "password-generator",
            "Password Generator",
            "Generate secure, random passwords entirely in your browser. Nothing is ever sent over the Internet.",
        ),
        |def| {
            inline_layout(
                def.meta(),
                "password-result",
                def.has_education(),
                vec![
                    el("div")
                        .id("pw-display")
                        .class("pw-display")
                        .child(el("span").id("pw-output").class("pw-output").text("—"))
                        .into(),
                    el("div")
                        .id("pw-strength-section")
                        .class("pw-strength-section")
                        .hidden(true)
                        .child(
                            el("div")
                                .class("pw-strength-bar-track")
                                .child(el("div").id("pw-strength-bar").class("pw-strength-bar")),
                        )
                        .child(
                            el("div")
                                .class("pw-strength-meta")
                                .child(el("span").id("pw-strength-label").class("pw-strength-label"))
                                .child(el("span").id("pw-entropy").class("pw-entropy")),
                        )
                        .into(),
                    el("div")
                        .class("pw-actions")
                        .child(
                            el("button")
                                .id("pw-copy")
                                .class("calculate-btn")
                                .attr("disabled", "disabled")
                                .text(COPY_LABEL),
                        )
                        .child(
                            el("button")
                                .id("pw-regenerate")
                                .class("calculate-btn")
                                .attr("disabled", "disabled")
                                .text("🔄 Regenerate"),
                        )
                        .into(),
                    el("hr").into(),
                    el("div")
                        .class("form-group")
                        .child(
                            el("label")
                                .attr("for", "pw-length")
                                .text("Password Length: ")
                                .child(
                                    el("strong")
                                        .id("pw-length-display")
                                        .text(PasswordOptions::default().length.to_string()),
                                ),
                        )
                        .child(
                            el("input")
                                .id("pw-length")
                                .class("pw-slider")
                                .attr("type", "range")
                                .attr("min", MIN_PASSWORD_LENGTH.to_string())
                                .attr("max", MAX_PASSWORD_LENGTH.to_string())
                                .value(PasswordOptions::default().length.to_string()),
                        )
                        .into(),
                    el("div")
                        .class("pw-options")
                        .children(PASSWORD_OPTIONS.iter().map(|(id, label, on)| checkbox(id, label, *on)))
                        .into(),
                    calculate_button("pw-generate", "⚡ Generate Password"),
                ],
            )
        },
        |doc, scope| {
            scope.on_id(doc, "pw-length", EventKind::Input, |doc, node| {
                let value = doc.value(node).unwrap_or_default().to_string();
                let display = doc.require("pw-length-display")?;
                doc.set_text(display, value)
            })?;
            scope.on_id(doc, "pw-generate", EventKind::Click, |doc, _| generate(doc))?;
            scope.on_id(doc, "pw-regenerate", EventKind::Click, |doc, node| {
                if doc.attr(node, "disabled").is_some() {
                    return Ok(());
                }
                generate(doc)
            })?;
            scope.on_id(doc, "pw-copy", EventKind::Click, |doc, node| {
                if doc.attr(node, "disabled").is_some() {
                    return Ok(());
                }
                let text = doc.text_content(doc.require("pw-output")?);
                doc.queue_effect(Effect::Clipboard { text });
                doc.set_text(node, "✅ Copied!")
            })
        },
    )
    .with_education(PASSWORD_EDU)
}

// ============================================================================
// Roman numerals
// ============================================================================

fn roman_markup(conversion: RomanConversion) -> Vec<Markup> {
    let (headline, lines, answer) = match conversion {
        RomanConversion::Multi { inputs, outputs } => {
            return vec![el("div").class("roman-headline").text(format!("{inputs} = {outputs}")).into()];
        }
        RomanConversion::ToRoman { value, numeral, lines } => (format!("{numeral} = {value}"), lines, numeral),
        RomanConversion::FromRoman { numeral, value, lines } => {
            (format!("{numeral} = {value}"), lines, value.to_string())
        }
    };
    // The last step restates the answer, which is emphasised.
    let steps = lines.iter().take(lines.len().saturating_sub(1)).map(|l| el("div").class("roman-step").text(l.clone()));
    vec![
        el("div").class("roman-headline").text(headline).into(),
        el("div")
            .class("roman-steps")
            .child(el("strong").text("Steps:"))
            .children(steps)
            .child(el("div").class("roman-step").text("= ").child(el("strong").text(answer)))
            .into(),
    ]
}

pub fn roman_numerals() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "roman-numeral-converter",
            "Roman Numeral Converter",
            "Convert between Arabic numbers and Roman numerals. Supports dates and multiple values with separators (-, ., /, |, or space).",
        ),
        |def| {
            layout(
                def.meta(),
                "roman-result",
                def.has_education(),
                vec![
                    text_input(
                        "roman-input",
                        "Enter a number or Roman numeral:",
                        "e.g. 2024 or MMXXIV or 2026/02/17",
                    ),
                    el("p")
                        .class("hint")
                        .text("Supports separators: ")
                        .children(["-", ".", "/", "\\", "|"].map(|s| el("code").text(s)))
                        .text(" or space for dates/lists.")
                        .into(),
                    el("div")
                        .class("button-row")
                        .child(calculate_button("roman-convert", "Convert"))
                        .child(calculate_button("roman-clear", "Clear"))
                        .into(),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "roman-convert", "roman-result", |doc| {
                convert_roman(&doc.value_of("roman-input")?).map(roman_markup)
            })?;
            scope.on_id(doc, "roman-clear", EventKind::Click, |doc, _| {
                doc.set_value_of("roman-input", "")?;
                show(doc, "roman-result", [placeholder(PLACEHOLDER)])
            })
        },
    )
    .with_education(ROMAN_EDU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::misc::{DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
    use crate::loader::MountScope;

    fn mount(def: &Definition) -> (Document, MountScope) {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_children(root, [def.render()]).unwrap();
        let mut scope = MountScope::new();
        def.bind(&mut doc, &mut scope).unwrap();
        (doc, scope)
    }

    fn text(doc: &Document, id: &str) -> String {
        doc.text_content(doc.require(id).unwrap())
    }

    fn click(doc: &mut Document, id: &str) {
        let node = doc.require(id).unwrap();
        doc.click(node);
    }

    fn uncheck(doc: &mut Document, id: &str) {
        let node = doc.require(id).unwrap();
        doc.toggle(node, false);
    }

    #[test]
    fn test_planetary_age_from_years() {
        let (mut doc, _scope) = mount(&planetary_age());
        doc.set_value_of("earth-age", "30").unwrap();
        click(&mut doc, "calculate-planetary-age");
        let result = doc.require("planetary-age-result").unwrap();
        let cards = doc.query_class(result, "planet-card");
        assert_eq!(cards.len(), 8);
        assert_eq!(doc.text_content(cards[0]), "Mercury124.56years");
        assert_eq!(doc.text_content(cards[2]), "Earth30.00years");

        doc.set_value_of("earth-age", "-1").unwrap();
        click(&mut doc, "calculate-planetary-age");
        assert_eq!(text(&doc, "planetary-age-result"), "Please enter a valid age.");
    }

    #[test]
    fn test_planetary_age_date_of_birth() {
        let (mut doc, _scope) = mount(&planetary_age());
        let dob = doc.require("age-input-method-dob").unwrap();
        doc.toggle(dob, true);
        assert!(doc.get_element_by_id("earth-age").is_none());
        assert!(doc.get_element_by_id("dob").is_some());

        click(&mut doc, "calculate-planetary-age");
        assert_eq!(text(&doc, "planetary-age-result"), "Please select a date of birth.");

        doc.set_value_of("dob", "2000-01-01").unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let age = earth_age(&doc, today).unwrap().unwrap();
        assert!((age - 9132.0 / 365.25).abs() < 1e-9);

        let age_radio = doc.require("age-input-method-age").unwrap();
        doc.toggle(age_radio, true);
        assert!(doc.get_element_by_id("earth-age").is_some());
    }

    #[test]
    fn test_upload_time() {
        let (mut doc, _scope) = mount(&upload_time());
        assert_eq!(doc.value_of("size-unit").unwrap(), "MB");
        assert_eq!(doc.value_of("speed-unit").unwrap(), "Mbps");
        doc.set_value_of("file-size", "40").unwrap();
        doc.set_value_of("upload-speed", "16").unwrap();
        click(&mut doc, "calculate-upload-time");
        assert_eq!(text(&doc, "upload-time-result"), "Estimated Time: 20.00 seconds");

        doc.set_value_of("size-unit", "GB").unwrap();
        doc.set_value_of("speed-unit", "Kbps").unwrap();
        doc.set_value_of("file-size", "1").unwrap();
        doc.set_value_of("upload-speed", "100").unwrap();
        click(&mut doc, "calculate-upload-time");
        assert_eq!(text(&doc, "upload-time-result"), "Estimated Time: 22 hr 13 min");

        doc.set_value_of("upload-speed", "0").unwrap();
        click(&mut doc, "calculate-upload-time");
        assert_eq!(text(&doc, "upload-time-result"), "Please enter valid positive numbers.");
    }

    #[test]
    fn test_password_generation() {
        let (mut doc, _scope) = mount(&password_generator());
        let slider = doc.require("pw-length").unwrap();
        doc.input(slider, "24");
        assert_eq!(text(&doc, "pw-length-display"), "24");

        click(&mut doc, "pw-generate");
        let password = text(&doc, "pw-output");
        assert_eq!(password.chars().count(), 24);
        let pool: String = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS].concat();
        assert!(password.chars().all(|c| pool.contains(c)));

        let section = doc.require("pw-strength-section").unwrap();
        assert!(!doc.is_hidden(section));
        assert_eq!(text(&doc, "pw-strength-label"), "Very Strong");
        assert_eq!(text(&doc, "pw-entropy"), "157.3 bits entropy");
        let copy = doc.require("pw-copy").unwrap();
        assert!(doc.attr(copy, "disabled").is_none());
    }

    #[test]
    fn test_password_copy_queues_clipboard() {
        let (mut doc, _scope) = mount(&password_generator());
        click(&mut doc, "pw-copy");
        assert!(doc.take_effects().is_empty());

        click(&mut doc, "pw-generate");
        let password = text(&doc, "pw-output");
        click(&mut doc, "pw-copy");
        assert_eq!(text(&doc, "pw-copy"), "✅ Copied!");
        let effects = doc.take_effects();
        assert!(matches!(effects.as_slice(), [Effect::Clipboard { text }] if *text == password));
    }

    #[test]
    fn test_password_option_errors() {
        let (mut doc, _scope) = mount(&password_generator());
        for id in ["pw-lower", "pw-upper", "pw-symbols"] {
            uncheck(&mut doc, id);
        }
        let no_repeat = doc.require("pw-no-repeat").unwrap();
        doc.toggle(no_repeat, true);
        click(&mut doc, "pw-generate");
        assert_eq!(text(&doc, "pw-output"), "Max 10 chars with no repeats");
        assert!(doc.is_hidden(doc.require("pw-strength-section").unwrap()));

        uncheck(&mut doc, "pw-numbers");
        click(&mut doc, "pw-generate");
        assert_eq!(text(&doc, "pw-output"), "Select at least one character type!");
        let regenerate = doc.require("pw-regenerate").unwrap();
        assert_eq!(doc.attr(regenerate, "disabled"), Some("disabled"));
    }

    #[test]
    fn test_roman_conversions() {
        let (mut doc, _scope) = mount(&roman_numerals());
        doc.set_value_of("roman-input", "2024").unwrap();
        click(&mut doc, "roman-convert");
        let out = text(&doc, "roman-result");
        assert!(out.starts_with("MMXXIV = 2024"));
        assert!(out.contains("2024 → M + M + X + X + IV"));
        assert!(out.ends_with("= MMXXIV"));

        doc.set_value_of("roman-input", "mcmxcix").unwrap();
        click(&mut doc, "roman-convert");
        assert!(text(&doc, "roman-result").starts_with("MCMXCIX = 1999"));

        doc.set_value_of("roman-input", "2026/02/17").unwrap();
        click(&mut doc, "roman-convert");
        assert_eq!(text(&doc, "roman-result"), "2026/02/17 = MMXXVI/II/XVII");
    }

    #[test]
    fn test_roman_errors_and_clear() {
        let (mut doc, _scope) = mount(&roman_numerals());
        doc.set_value_of("roman-input", "4000").unwrap();
        click(&mut doc, "roman-convert");
        assert_eq!(text(&doc, "roman-result"), "Number must be between 1 and 3999.");

        doc.set_value_of("roman-input", "IIII").unwrap();
        click(&mut doc, "roman-convert");
        assert_eq!(text(&doc, "roman-result"), "Invalid Roman numeral.");

        click(&mut doc, "roman-clear");
        assert_eq!(doc.value_of("roman-input").unwrap(), "");
        assert_eq!(text(&doc, "roman-result"), PLACEHOLDER);
    }
}
