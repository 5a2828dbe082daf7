//! REPL command grammar.
//!
//! One command per line: a verb followed by its arguments. The last
//! argument of `set` and `choose` takes the rest of the line so values may
//! contain spaces.

use std::str::FromStr;

use calc_core::theme::ThemeVariant;
use calc_core::{CalcError, CalcResult};

pub const HELP: &str = "\
Commands:
  list                      all calculators by category
  search <query>            filter the sidebar (empty query shows all)
  open <calculator-id>      mount a calculator
  set <element-id> <value>  type into an input
  choose <select-id> <value>
                            pick an option
  check <element-id> on|off toggle a checkbox or radio
  click <element-id>        press a button
  show                      print the calculator display
  info                      reveal the \"What is this?\" explanation
  theme                     toggle light/dark
  variant soft|medium|enhanced
                            pick the dark theme variant
  help                      this text
  quit                      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Open(String),
    Set { id: String, value: String },
    Choose { id: String, value: String },
    Check { id: String, on: bool },
    Click(String),
    Show,
    Info,
    Theme,
    Variant(ThemeVariant),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CalcError;

    fn from_str(line: &str) -> CalcResult<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" | "find" => Command::Search(rest.to_string()),
            "open" => Command::Open(one_word(verb, rest)?),
            "set" => {
                let (id, value) = id_and_value(verb, rest)?;
                Command::Set { id, value }
            }
            "choose" => {
                let (id, value) = id_and_value(verb, rest)?;
                Command::Choose { id, value }
            }
            "check" => {
                let (id, state) = id_and_value(verb, rest)?;
                let on = match state.to_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => return Err(CalcError::invalid_input("check", state, "Expected 'on' or 'off'")),
                };
                Command::Check { id, on }
            }
            "click" | "press" => Command::Click(one_word(verb, rest)?),
            "show" => Command::Show,
            "info" => Command::Info,
            "theme" => Command::Theme,
            "variant" => Command::Variant(one_word(verb, rest)?.to_lowercase().parse()?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err(CalcError::missing_field("command")),
            other => return Err(CalcError::invalid_input("command", other, "Unknown command (try 'help')")),
        };
        Ok(command)
    }
}

fn one_word(verb: &str, rest: &str) -> CalcResult<String> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [word] => Ok(word.to_string()),
        [] => Err(CalcError::missing_field(format!("{verb} argument"))),
        _ => Err(CalcError::invalid_input(verb, rest, "Expected a single argument")),
    }
}

fn id_and_value(verb: &str, rest: &str) -> CalcResult<(String, String)> {
    match rest.split_once(char::is_whitespace) {
        Some((id, value)) => Ok((id.to_string(), value.trim().to_string())),
        None if rest.is_empty() => Err(CalcError::missing_field(format!("{verb} element id"))),
        // `set <id>` with nothing after clears the field.
        None => Ok((rest.to_string(), String::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!("  SHOW ".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "open force-calculator".parse::<Command>().unwrap(),
            Command::Open("force-calculator".into())
        );
    }

    #[test]
    fn test_parse_value_keeps_spaces() {
        assert_eq!(
            "set stats-input 1, 2, 3".parse::<Command>().unwrap(),
            Command::Set {
                id: "stats-input".into(),
                value: "1, 2, 3".into()
            }
        );
        assert_eq!(
            "set mass".parse::<Command>().unwrap(),
            Command::Set {
                id: "mass".into(),
                value: String::new()
            }
        );
        assert_eq!(
            "search  ohm ".parse::<Command>().unwrap(),
            Command::Search("ohm".into())
        );
    }

    #[test]
    fn test_parse_check_and_variant() {
        assert_eq!(
            "check pw-symbols off".parse::<Command>().unwrap(),
            Command::Check {
                id: "pw-symbols".into(),
                on: false
            }
        );
        assert!("check pw-symbols maybe".parse::<Command>().is_err());
        assert_eq!(
            "variant Enhanced".parse::<Command>().unwrap(),
            Command::Variant(ThemeVariant::Enhanced)
        );
        assert!("variant neon".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Command>(), Err(CalcError::MissingField { .. })));
        assert!(matches!("open".parse::<Command>(), Err(CalcError::MissingField { .. })));
        assert!(matches!("open a b".parse::<Command>(), Err(CalcError::InvalidInput { .. })));
        assert!(matches!("frobnicate".parse::<Command>(), Err(CalcError::InvalidInput { .. })));
    }
}
