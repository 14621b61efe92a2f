use std::io;
use std::path::PathBuf;

use anyhow::Context;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use duopong::{config, game_modes, logging};

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("duopong");
    let args = match parse_args(&argv[1..]) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage(program);
            return Ok(());
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(program);
            std::process::exit(1);
        }
    };

    if let Some(path) = logging::init(args.debug)? {
        eprintln!("Debug logging to {}", path.display());
    }

    // Everything that can fail on bad input happens before raw mode
    let config = match &args.config_path {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("invalid configuration")?;

    enable_raw_mode()?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = game_modes::run_game_local(&mut terminal, &config, args.seed, release_events);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("game loop failed")
}

/// Parse arguments after the program name. `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().ok_or("--config requires a path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--seed" | "-s" => {
                let value = iter.next().ok_or("--seed requires a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                parsed.seed = Some(seed);
            }
            "--debug" | "-d" => parsed.debug = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Some(parsed))
}

fn print_usage(program: &str) {
    println!("duopong - two-player terminal Pong");
    println!();
    println!("Usage:");
    println!("  {} [--config <path>] [--seed <n>] [--debug]", program);
    println!();
    println!("Options:");
    println!("  -c, --config <path>   Config file (default: {})", config::get_config_path().display());
    println!("  -s, --seed <n>        Seed the serve direction for a reproducible match");
    println!("  -d, --debug           Write a debug log to {}", logging::log_file_path().display());
    println!("  -h, --help            Show this help");
    println!();
    println!("Controls: W/S left paddle, Up/Down right paddle, Space start, Esc stop, Q quit");
}
