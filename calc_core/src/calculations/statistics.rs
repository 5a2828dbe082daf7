//! Lottery odds and the odds/betting calculator.

use std::rc::Rc;

use crate::currency::{betting_summary, SUPPORTED_CURRENCIES};
use crate::dom::{el, Document, EventKind, Markup};
use crate::effects::Effect;
use crate::equations::combinatorics::{self, BonusPool, LotteryInput, LotteryKind};
use crate::equations::odds::{
    basic_odds, consecutive_odds, decimal_odds, fractional_to_decimal, validate_bet, Probability,
};
use crate::errors::CalcResult;
use crate::numeric::{to_fixed, to_locale};
use crate::registry::{Calculator, CalculatorMeta};

use super::layout::{
    bind_radio_group, calculate_button, checked_radio, layout, number_input, on_calculate, radio_group,
    read_integer, read_number, select_input, show, text_input,
};
use super::Definition;

const LOTTERY_EDU: &str = r#"
<div class="educational-section">
    <h3>How are lottery odds calculated?</h3>
    <p>Matching exactly \( m \) of the \( k \) drawn balls from a pool of \( n \) follows the hypergeometric distribution:</p>
    \[ P = \frac{\binom{k}{m} \binom{n-k}{k-m}}{\binom{n}{k}} \]
    <h3>Bonus balls</h3>
    <p><strong>From the remaining pool:</strong> the bonus ball is drawn from the \( n - k \) balls left after the main draw. The calculator finds the chance of matching \( m - 1 \) main numbers plus the bonus ball.</p>
    <p><strong>From a separate pool:</strong> main and bonus draws are independent (as in Powerball), so their probabilities multiply.</p>
</div>
"#;

const ODDS_EDU: &str = r#"
<div class="educational-section">
    <p>Odds of "S to F" mean S chances for success against F chances against.</p>
    \[ P(\text{win}) = \frac{S}{S + F} \qquad P(\text{lose}) = \frac{F}{S + F} \]
    <p>Odds of 5 to 12 give \( 5 / 17 \approx 29.41\% \) to win.</p>
    <p>Fractional odds \( N/D \) convert to decimal odds as \( N/D + 1 \); a stake returns stake × decimal odds.</p>
</div>
"#;

const ODDS_HINT: &str =
    "Open the Consecutive odds section to calculate the probability of multiple wins/losses in a row.";

// ============================================================================
// Lottery
// ============================================================================

const LOTTERY_KINDS: [(&str, &str); 3] = [
    ("standard", "Standard"),
    ("bonus-remaining", "Bonus (Remaining Pool)"),
    ("bonus-pool", "Bonus (Separate Pool)"),
];

fn lottery_kind(value: Option<&str>) -> LotteryKind {
    value.and_then(LotteryKind::parse).unwrap_or(LotteryKind::Standard)
}

fn read_bonus_pool(doc: &Document) -> CalcResult<Option<BonusPool>> {
    Ok(
        match (
            read_integer(doc, "bonus-drawn")?,
            read_integer(doc, "bonus-matches")?,
            read_integer(doc, "bonus-pool-size")?,
        ) {
            (Some(drawn), Some(matches), Some(pool)) => Some(BonusPool { drawn, matches, pool }),
            _ => None,
        },
    )
}

pub fn lottery() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "lottery-calculator",
            "Lottery Calculator",
            "Calculate the odds of winning a lottery jackpot or other prize tiers.",
        ),
        |def| {
            layout(
                def.meta(),
                "lottery-result",
                def.has_education(),
                vec![
                    el("div")
                        .class("form-group")
                        .child(el("label").text("Game Type:"))
                        .child(radio_group("lottery-type", &LOTTERY_KINDS, "standard"))
                        .into(),
                    number_input("lottery-drawn", "Balls to be drawn (k):", "e.g. 6"),
                    el("div")
                        .class("form-group")
                        .child(el("label").attr("for", "lottery-matches").text("Number of matches (m):"))
                        .child(
                            el("input")
                                .id("lottery-matches")
                                .attr("type", "number")
                                .attr("min", "0")
                                .attr("placeholder", "e.g. 6"),
                        )
                        .child(
                            el("small")
                                .id("matches-hint")
                                .class("hint")
                                .hidden(true)
                                .text("Calculates for m-1 matches + Bonus"),
                        )
                        .into(),
                    number_input("lottery-pool", "Number of balls in pool (n):", "e.g. 49"),
                    el("div")
                        .id("bonus-pool-inputs")
                        .class("bonus-pool")
                        .hidden(true)
                        .child(el("h4").text("Bonus Pool Settings"))
                        .child(number_input("bonus-drawn", "Bonus balls drawn:", "e.g. 1"))
                        .child(number_input("bonus-matches", "Matches with bonus pool:", "e.g. 1"))
                        .child(number_input("bonus-pool-size", "Balls in bonus pool:", "e.g. 10"))
                        .into(),
                    calculate_button("calculate-lottery", "Calculate Odds"),
                ],
            )
        },
        |doc, scope| {
            bind_radio_group(doc, scope, "lottery-type", |doc, value| {
                let kind = lottery_kind(Some(value));
                let bonus = doc.require("bonus-pool-inputs")?;
                doc.set_hidden(bonus, kind != LotteryKind::BonusPool);
                let hint = doc.require("matches-hint")?;
                doc.set_hidden(hint, kind != LotteryKind::BonusRemaining);
                Ok(())
            })?;
            on_calculate(doc, scope, "calculate-lottery", "lottery-result", |doc| {
                let kind = lottery_kind(checked_radio(doc, "lottery-type").as_deref());
                let input = LotteryInput {
                    kind,
                    drawn: read_integer(doc, "lottery-drawn")?,
                    matches: read_integer(doc, "lottery-matches")?,
                    pool: read_integer(doc, "lottery-pool")?,
                    bonus: match kind {
                        LotteryKind::BonusPool => read_bonus_pool(doc)?,
                        _ => None,
                    },
                };
                let result = combinatorics::lottery(&input)?;
                Ok(vec![
                    el("div").class("odds-label").text("Winning Odds:").into(),
                    el("div")
                        .class("odds-headline")
                        .text(format!("1 in {}", to_locale(result.one_in, 2)))
                        .into(),
                    el("div")
                        .class("odds-probability")
                        .text(format!("Probability: {}%", to_fixed(result.probability * 100.0, 8)))
                        .into(),
                ])
            })
        },
    )
    .with_education(LOTTERY_EDU)
}

// ============================================================================
// Odds and betting
// ============================================================================

fn probability_block(heading: &str, info_id: &str, p: Probability) -> Markup {
    el("div")
        .class("probability-block")
        .child(
            el("h4")
                .text(heading)
                .child(el("button").id(info_id).class("info-btn").text("i")),
        )
        .child(el("p").text(p.display()))
        .into()
}

fn current_decimal_odds(doc: &Document) -> CalcResult<Option<f64>> {
    Ok(decimal_odds(
        &doc.value_of("fractional-odds")?,
        read_number(doc, "odds-success")?,
        read_number(doc, "odds-failure")?,
    ))
}

fn section(title: &str) -> Markup {
    el("h3").class("section-title").text(title).into()
}

fn divider() -> Markup {
    el("div").class("divider").into()
}

pub fn odds() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "odds-calculator",
            "Odds Calculator",
            "Calculate winning/losing probabilities, convert odds, and estimate betting returns.",
        ),
        |def| {
            let currencies: Vec<(String, String)> = SUPPORTED_CURRENCIES
                .iter()
                .map(|(code, name)| (code.to_string(), format!("{code} - {name}")))
                .collect();
            layout(
                def.meta(),
                "odds-result",
                def.has_education(),
                vec![
                    section("Basic Odds"),
                    number_input("odds-success", "Chances for Success (S):", "e.g. 1"),
                    number_input("odds-failure", "Chances against Success (F):", "e.g. 5"),
                    calculate_button("calculate-basic-odds", "Calculate Probability"),
                    divider(),
                    section("Consecutive Odds"),
                    number_input("consecutive-count", "Number of events in a row (x):", "e.g. 2"),
                    calculate_button("calculate-consecutive", "Calculate Consecutive"),
                    divider(),
                    section("Odds Conversion"),
                    text_input("fractional-odds", "Fractional Odds (e.g. 5/1):", "e.g. 5/1"),
                    calculate_button("convert-odds", "Convert to Decimal"),
                    divider(),
                    section("Betting"),
                    number_input("betting-stake", "Stake (USD):", "e.g. 100"),
                    select_input("betting-currency", "Display Currency:", &currencies, "USD"),
                    calculate_button("calculate-betting", "Calculate Returns"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-basic-odds", "odds-result", |doc| {
                let odds = basic_odds(read_number(doc, "odds-success")?, read_number(doc, "odds-failure")?)?;
                Ok(vec![
                    probability_block("Probability of Winning", "info-win", odds.win),
                    probability_block("Probability of Losing", "info-loss", odds.lose),
                    el("p").id("odds-info").class("hint").hidden(true).text(ODDS_HINT).into(),
                ])
            })?;
            // The info buttons are rebuilt with every result, so they are
            // wired after the result is shown rather than at mount.
            scope.on_id(doc, "calculate-basic-odds", EventKind::Click, |doc, _| {
                for id in ["info-win", "info-loss"] {
                    if let Some(button) = doc.get_element_by_id(id) {
                        doc.add_listener(button, EventKind::Click, |doc, _| {
                            let info = doc.require("odds-info")?;
                            doc.set_hidden(info, false);
                            Ok(())
                        })?;
                    }
                }
                Ok(())
            })?;

            on_calculate(doc, scope, "calculate-consecutive", "odds-result", |doc| {
                let odds = consecutive_odds(read_integer(doc, "consecutive-count")?, current_decimal_odds(doc)?)?;
                let x = odds.count;
                Ok(vec![
                    el("h4").text(format!("Consecutive Probability ({x} times)")).into(),
                    el("p")
                        .text(format!("Winning {x} times in a row: "))
                        .child(el("strong").text(format!("{}%", to_fixed(odds.win.percent(), 4))))
                        .into(),
                    el("p")
                        .text(format!("Losing {x} times in a row: "))
                        .child(el("strong").text(format!("{}%", to_fixed(odds.lose.percent(), 4))))
                        .into(),
                ])
            })?;

            on_calculate(doc, scope, "convert-odds", "odds-result", |doc| {
                let decimal = fractional_to_decimal(&doc.value_of("fractional-odds")?)?;
                Ok(vec!["Decimal Odds: ".into(), el("strong").text(to_fixed(decimal, 2)).into()])
            })?;

            on_calculate(doc, scope, "calculate-betting", "odds-result", |doc| {
                let bet = validate_bet(current_decimal_odds(doc)?, read_number(doc, "betting-stake")?)?;
                let currency = doc.value_of("betting-currency")?;
                doc.queue_effect(Effect::FetchRates {
                    on_complete: Rc::new(move |doc, outcome| {
                        let summary = betting_summary(bet.stake, bet.decimal_odds, &currency, outcome);
                        show(doc, "odds-result", [summary.to_markup()])
                    }),
                });
                Ok(vec!["Fetching exchange rates...".into()])
            })
        },
    )
    .with_education(ODDS_EDU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{RateTable, RatesOutcome};
    use crate::loader::MountScope;
    use chrono::Utc;
    use indexmap::IndexMap;

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

    #[test]
    fn test_lottery_jackpot() {
        let (mut doc, _scope) = mount(&lottery());
        doc.set_value_of("lottery-drawn", "6").unwrap();
        doc.set_value_of("lottery-matches", "6").unwrap();
        doc.set_value_of("lottery-pool", "49").unwrap();
        click(&mut doc, "calculate-lottery");
        let out = text(&doc, "lottery-result");
        assert!(out.contains("1 in 13,983,816"));
        assert!(out.contains("Probability: 0.00000715%"));
    }

    #[test]
    fn test_lottery_type_toggles_sections() {
        let (mut doc, _scope) = mount(&lottery());
        let bonus = doc.require("bonus-pool-inputs").unwrap();
        let hint = doc.require("matches-hint").unwrap();
        assert!(doc.is_hidden(bonus));

        doc.toggle(doc.require("lottery-type-bonus-pool").unwrap(), true);
        assert!(!doc.is_hidden(bonus));
        assert!(doc.is_hidden(hint));

        doc.toggle(doc.require("lottery-type-bonus-remaining").unwrap(), true);
        assert!(doc.is_hidden(bonus));
        assert!(!doc.is_hidden(hint));
    }

    #[test]
    fn test_lottery_validation_messages() {
        let (mut doc, _scope) = mount(&lottery());
        click(&mut doc, "calculate-lottery");
        assert_eq!(text(&doc, "lottery-result"), "Please enter valid numbers for the main pool.");

        doc.set_value_of("lottery-drawn", "6").unwrap();
        doc.set_value_of("lottery-matches", "7").unwrap();
        doc.set_value_of("lottery-pool", "49").unwrap();
        click(&mut doc, "calculate-lottery");
        assert_eq!(text(&doc, "lottery-result"), "Matches cannot exceed balls drawn.");

        doc.set_value_of("lottery-matches", "6").unwrap();
        doc.toggle(doc.require("lottery-type-bonus-pool").unwrap(), true);
        click(&mut doc, "calculate-lottery");
        assert_eq!(text(&doc, "lottery-result"), "Please enter valid numbers for the bonus pool.");
    }

    #[test]
    fn test_basic_odds_and_info_hint() {
        let (mut doc, _scope) = mount(&odds());
        doc.set_value_of("odds-success", "1").unwrap();
        doc.set_value_of("odds-failure", "5").unwrap();
        click(&mut doc, "calculate-basic-odds");
        let out = text(&doc, "odds-result");
        assert!(out.contains("16.67% | 166.67‰ | 1667‱"));
        assert!(out.contains("83.33% | 833.33‰ | 8333‱"));

        let info = doc.require("odds-info").unwrap();
        assert!(doc.is_hidden(info));
        click(&mut doc, "info-loss");
        assert!(!doc.is_hidden(info));
    }

    #[test]
    fn test_consecutive_uses_fraction_first() {
        let (mut doc, _scope) = mount(&odds());
        doc.set_value_of("consecutive-count", "2").unwrap();
        click(&mut doc, "calculate-consecutive");
        assert_eq!(
            text(&doc, "odds-result"),
            "Please enter valid Fractional Odds or Success/Failure values first."
        );

        doc.set_value_of("odds-success", "1").unwrap();
        doc.set_value_of("odds-failure", "9").unwrap();
        doc.set_value_of("fractional-odds", "1/1").unwrap();
        click(&mut doc, "calculate-consecutive");
        let out = text(&doc, "odds-result");
        assert!(out.contains("Winning 2 times in a row: 25.0000%"));
        assert!(out.contains("Losing 2 times in a row: 25.0000%"));
    }

    #[test]
    fn test_convert_fraction() {
        let (mut doc, _scope) = mount(&odds());
        doc.set_value_of("fractional-odds", "5/2").unwrap();
        click(&mut doc, "convert-odds");
        assert_eq!(text(&doc, "odds-result"), "Decimal Odds: 3.50");
        doc.set_value_of("fractional-odds", "5").unwrap();
        click(&mut doc, "convert-odds");
        assert_eq!(text(&doc, "odds-result"), "Invalid fraction format. Use '5/1'.");
    }

    #[test]
    fn test_betting_with_live_rates() {
        let (mut doc, _scope) = mount(&odds());
        doc.set_value_of("fractional-odds", "1/1").unwrap();
        doc.set_value_of("betting-stake", "50").unwrap();
        let currency = doc.require("betting-currency").unwrap();
        doc.choose(currency, "EUR");
        click(&mut doc, "calculate-betting");
        assert_eq!(text(&doc, "odds-result"), "Fetching exchange rates...");

        let mut effects = doc.take_effects();
        let Some(Effect::FetchRates { on_complete }) = effects.pop() else {
            panic!("expected a rate lookup");
        };
        let table = RateTable {
            base: "USD".into(),
            rates: IndexMap::from([("EUR".to_string(), 0.5)]),
            fetched_at: Utc::now(),
        };
        on_complete(&mut doc, &RatesOutcome::Live(table)).unwrap();
        let out = text(&doc, "odds-result");
        assert!(out.contains("Betting Results"));
        assert!(out.contains("Total Returned: €50.00"));
        assert!(out.contains("converted to EUR"));
    }

    #[test]
    fn test_betting_requires_odds_and_stake() {
        let (mut doc, _scope) = mount(&odds());
        doc.set_value_of("betting-stake", "10").unwrap();
        click(&mut doc, "calculate-betting");
        assert!(text(&doc, "odds-result").starts_with("Please enter valid Fractional Odds (e.g. 5/1)"));
        doc.set_value_of("fractional-odds", "2/1").unwrap();
        doc.set_value_of("betting-stake", "0").unwrap();
        click(&mut doc, "calculate-betting");
        assert_eq!(text(&doc, "odds-result"), "Please enter a valid stake.");
        assert!(doc.take_effects().is_empty());
    }
}
