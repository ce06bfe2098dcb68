use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zcalc::input::{Keymap, translate_line};
use zcalc::screen::{Screen, TerminalScreen, copy_current};
use zcalc::{CalcError, Calculator, Config};

/// Keypad calculator for the terminal.
///
/// Keys are typed as whitespace separated tokens: runs of keypad characters
/// such as `12+5=`, or key names such as `Enter`, `Escape`, `n` or
/// `ctrl+Backspace`.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Keys to press; reads lines from stdin when omitted
    keys: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the final calculator state as JSON
    #[arg(long)]
    json: bool,

    /// Copy the final value to the clipboard
    #[arg(long)]
    copy: bool,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zcalc={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let keymap = config.keymap();
    let mut calc = Calculator::with_format(config.format);

    if cli.keys.is_empty() {
        run_interactive(&mut calc, &keymap, cli.json)?;
    } else {
        run_keys(&mut calc, &keymap, &cli.keys.join(" "), cli.json)?;
    }

    if cli.json {
        let snapshot = serde_json::to_string_pretty(&calc.snapshot())
            .context("Failed to serialize calculator state")?;
        println!("{}", snapshot);
    }

    if cli.copy {
        copy_current(&calc)?;
    }

    Ok(())
}

/// Press every key of `line`, then show the final frame.
fn run_keys(calc: &mut Calculator, keymap: &Keymap, line: &str, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut screen = TerminalScreen::new(stdout.lock());

    press_line(calc, keymap, line, &mut QuietScreen);

    if !json {
        screen.render(&calc.display_value(), calc.history());
    }
    screen
        .take_error()
        .map_or(Ok(()), Err)
        .context("Failed to write to stdout")
}

fn run_interactive(calc: &mut Calculator, keymap: &Keymap, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(calc, keymap, stdin.lock(), stdout.lock(), json)
}

/// Press each line's keys, drawing one frame per line.
fn run_session(
    calc: &mut Calculator,
    keymap: &Keymap,
    lines: impl BufRead,
    out: impl Write,
    json: bool,
) -> Result<()> {
    let mut screen = TerminalScreen::new(out);
    if !json {
        screen.render(&calc.display_value(), calc.history());
    }

    for line in lines.lines() {
        let line = line.context("Failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        press_line(calc, keymap, trimmed, &mut QuietScreen);
        if !json {
            screen.render(&calc.display_value(), calc.history());
        }
    }

    screen
        .take_error()
        .map_or(Ok(()), Err)
        .context("Failed to write to stdout")
}

fn press_line(calc: &mut Calculator, keymap: &Keymap, line: &str, screen: &mut dyn Screen) {
    let (inputs, unrecognized) = translate_line(line, keymap);
    for token in unrecognized {
        eprintln!("unrecognized key: {}", token.0);
    }
    for input in inputs {
        calc.handle(input, screen);
    }
}

/// Draws nothing; errors still go to stderr.
struct QuietScreen;

impl Screen for QuietScreen {
    fn render(&mut self, _display: &str, _history: &str) {}

    fn report_error(&mut self, error: &CalcError) {
        eprintln!("error: {}", error);
    }
}
