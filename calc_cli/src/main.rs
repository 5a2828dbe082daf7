//! # Universal Calculator CLI
//!
//! Line-oriented terminal frontend. Drives the same [`UiState`] the GUI
//! uses: calculators are mounted into the headless document, commands type
//! into its inputs and press its buttons, and `show` prints the display as
//! text.
//!
//! ```bash
//! calc_cli --open force-calculator
//! > set mass 2
//! > set acceleration 3
//! > click calculate-force
//! Force: 6.00 N
//! ```

mod command;
mod session;

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use calc_core::calculations::default_registry;
use calc_core::config::AppConfig;
use calc_core::preferences::{FileStore, MemoryStore, PreferenceStore};
use calc_core::theme::system_prefers_dark;
use calc_core::{CalcError, UiState};

use command::Command;
use session::{Outcome, Session};

/// Universal Calculator in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print every calculator id and exit
    #[arg(long)]
    list: bool,

    /// Calculator to mount before the prompt appears
    #[arg(long, value_name = "CALCULATOR_ID")]
    open: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    show_config: bool,

    /// Report errors as JSON as well as text
    #[arg(long)]
    json_errors: bool,
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so they never interleave with command output.
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn open_store(config: &AppConfig) -> Box<dyn PreferenceStore> {
    let path = config
        .prefs_path
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("universal-calc").join("preferences.json")));
    match path.map(|p| FileStore::open(&p)) {
        Some(Ok(store)) => Box::new(store),
        Some(Err(err)) => {
            warn!(code = err.error_code(), "theme changes will not persist: {err}");
            Box::new(MemoryStore::new())
        }
        None => Box::new(MemoryStore::new()),
    }
}

fn report(err: &CalcError, json: bool) {
    eprintln!("Error: {}", err.user_message());
    if json {
        if let Ok(json) = serde_json::to_string_pretty(err) {
            eprintln!("{json}");
        }
    }
}

fn main() {
    let args = Args::parse();
    let config = AppConfig::from_env();
    init_tracing(&config);

    if args.show_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }

    let store = open_store(&config);
    let session = UiState::new(default_registry(), config, store, system_prefers_dark()).and_then(Session::new);
    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            report(&err, args.json_errors);
            std::process::exit(1);
        }
    };
    info!(calculators = session.ui().registry().len(), "Universal Calculator CLI ready");

    let mut pending = Vec::new();
    if args.list {
        pending.push(Command::List);
    }
    if let Some(id) = args.open {
        pending.push(Command::Open(id));
    }
    for command in pending {
        if let Err(err) = run(&mut session, command) {
            report(&err, args.json_errors);
            std::process::exit(1);
        }
    }
    if args.list {
        return;
    }

    println!("Universal Calculator - type 'help' for commands");
    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        if line.trim().is_empty() {
            continue;
        }

        let result = line.parse::<Command>().and_then(|command| run(&mut session, command));
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => report(&err, args.json_errors),
        }
    }
}

/// Execute one command and print its output. Returns `false` on quit.
fn run(session: &mut Session, command: Command) -> Result<bool, CalcError> {
    match session.execute(command)? {
        Outcome::Print(text) => {
            println!("{text}");
            Ok(true)
        }
        Outcome::Quit => Ok(false),
    }
}
