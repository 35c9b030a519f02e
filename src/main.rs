//! Lander TUI entry point
//!
//! Console glue: argument parsing, the main menu, the terminal-mode
//! bracket around a descent, and the name/replay prompts. All simulation
//! logic lives in the library.

use std::io::{self, Write, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, execute, terminal};

use lander_tui::consts::TICK_MS;
use lander_tui::platform::TerminalPlatform;
use lander_tui::scores::{ScoreFile, ScoreRecord, sort_for_display};
use lander_tui::session::{DescentEnd, SessionConfig, run_descent};

#[derive(Parser)]
#[command(version, about = "A Martian lander descent simulator for the terminal")]
struct Args {
    /// Scoreboard file
    #[arg(long, default_value = "simulation_data.txt")]
    data_file: PathBuf,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = ScoreFile::new(&args.data_file);
    let config = SessionConfig {
        tick: Duration::from_millis(args.tick_ms),
    };

    loop {
        println!("\tFlight Simulator\n");
        println!("Menu");
        println!(" 1 - Run Simulation");
        println!(" 2 - Display simulation data");
        println!(" 3 - Quit");

        match read_line()?.trim() {
            "1" => run_simulation(&store, &config)?,
            "2" => display_stored_data(&store)?,
            "3" => {
                println!("Terminating application...");
                return Ok(());
            }
            _ => println!("Invalid selection. Select a value from the options shown above"),
        }
    }
}

// ── Simulation wrapper ──────────────────────────────────────────────────────

/// Run descents until the player declines a replay or bails out.
fn run_simulation(store: &ScoreFile, config: &SessionConfig) -> Result<()> {
    loop {
        match descend(config)? {
            DescentEnd::Landed {
                bounces,
                elapsed_seconds,
            } => {
                println!("Touchdown! {bounces} bounces, {elapsed_seconds:.3} seconds.");
                let name = prompt_name()?;
                let record = ScoreRecord {
                    name,
                    bounces: bounces as f64,
                    seconds: elapsed_seconds,
                };
                if let Err(err) = store.append(&record) {
                    eprintln!("Error opening file: {err}");
                    return Ok(());
                }
            }
            DescentEnd::Aborted => return Ok(()),
        }

        if !prompt_replay()? {
            return Ok(());
        }
    }
}

/// One descent inside the raw-mode/alternate-screen bracket. The
/// terminal is restored before any error propagates.
fn descend(config: &SessionConfig) -> Result<DescentEnd> {
    let mut out = stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run_descent(&mut TerminalPlatform, &mut out, config);

    execute!(out, terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    result.context("descent loop failed")
}

// ── Scoreboard display ──────────────────────────────────────────────────────

/// Print every stored record ordered by descent time. An unreadable file
/// aborts just this operation.
fn display_stored_data(store: &ScoreFile) -> Result<()> {
    let mut records = match store.load_all() {
        Ok(records) => records,
        Err(err) => {
            eprintln!("Error opening file: {err}");
            return Ok(());
        }
    };
    sort_for_display(&mut records);

    println!("*************************** Simulations Data ***************************");
    println!("Entries");
    for record in &records {
        println!(
            "Name: {} \tBounces: {} \tTime(Seconds): {}",
            record.name, record.bounces, record.seconds
        );
    }

    println!("\nPress Enter to continue");
    read_line()?;
    Ok(())
}

// ── Prompts ─────────────────────────────────────────────────────────────────

/// Ask for an entry name: one whitespace-free token, reprompting until
/// the input is valid (the score file is whitespace-delimited).
fn prompt_name() -> Result<String> {
    loop {
        print!("Enter a name for this simulation entry: ");
        stdout().flush()?;
        let line = read_line()?;
        let name = line.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            println!("Enter a single word, no spaces.");
            continue;
        }
        return Ok(name.to_string());
    }
}

fn prompt_replay() -> Result<bool> {
    loop {
        println!("Play again? (y/n)");
        println!("Press y to run the simulation again, or press n to go back to main menu.");
        match read_line()?.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => println!("Not a valid selection. Enter (y/n)"),
        }
    }
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line)
}
