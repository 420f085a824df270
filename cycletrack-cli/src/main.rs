//! Cycletrack — CNC cycle countdown board CLI.
//!
//! # Usage
//!
//! ```text
//! cycletrack board [--json] [--watch]
//! cycletrack configure <slot> --name <machine> --duration <dur>
//! cycletrack start|stop|toggle|reset <slot>
//! cycletrack reset-all
//! cycletrack dispatch <machine> --duration <dur>
//! cycletrack load <machine> <part>
//! cycletrack preset add <machine> <part> --duration <dur>
//! cycletrack preset rm <id>
//! cycletrack preset list [--machine <name>] [--json]
//! cycletrack daemon start|stop|status
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    board::BoardArgs,
    daemon::DaemonCommand,
    dispatch::{DispatchArgs, LoadArgs},
    presets::PresetCommand,
    timers,
};
use cycletrack_core::format_hms;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cycletrack",
    version,
    about = "Countdown board for CNC machining cycles",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the full timer board and system status lamp.
    Board(BoardArgs),

    /// Set a slot's machine name and cycle duration (leaves it stopped).
    Configure {
        /// Slot id (0-based).
        slot: u32,
        /// Machine name, stored uppercase.
        #[arg(long)]
        name: String,
        /// Cycle duration, e.g. `2h30m`, `45m`, `1:30:00`, or plain seconds.
        #[arg(long)]
        duration: DurationArg,
    },

    /// Start a configured slot counting down.
    Start { slot: u32 },

    /// Pause a slot, keeping its remaining time.
    Stop { slot: u32 },

    /// Flip a slot between running and paused.
    Toggle { slot: u32 },

    /// Clear one slot back to unconfigured.
    Reset { slot: u32 },

    /// Clear every slot on the board.
    ResetAll,

    /// Arm and start every slot matching a machine name.
    Dispatch(DispatchArgs),

    /// Arm a machine's slots from a saved preset (machine + part number).
    Load(LoadArgs),

    /// Manage saved part/runtime presets.
    Preset {
        #[command(subcommand)]
        command: PresetCommand,
    },

    /// Manage the background timer daemon.
    Daemon {
        #[command(subcommand)]
        command: DaemonCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared duration argument
// ---------------------------------------------------------------------------

/// A cycle duration parsed from CLI text.
///
/// Accepted forms: unit suffixes (`2h30m15s`, `45m`, `900s`), colon notation
/// (`1:30:00`, `45:00`), or a bare number of seconds. Hours cap at 99 and
/// minutes/seconds at 59, matching the board's display range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationArg(pub u32);

const MAX_HOURS: u32 = 99;
const MAX_MINUTE_OR_SECOND: u32 = 59;

impl FromStr for DurationArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty duration".to_string());
        }

        let (hours, minutes, seconds) = if s.contains(':') {
            parse_colon_form(s)?
        } else if s.chars().any(|c| c.is_ascii_alphabetic()) {
            parse_unit_form(s)?
        } else {
            let seconds: u32 = s
                .parse()
                .map_err(|_| format!("invalid duration '{s}'"))?;
            return finish(seconds);
        };

        if hours > MAX_HOURS {
            return Err(format!("hours component exceeds {MAX_HOURS}"));
        }
        if minutes > MAX_MINUTE_OR_SECOND || seconds > MAX_MINUTE_OR_SECOND {
            return Err(format!(
                "minutes and seconds components must be at most {MAX_MINUTE_OR_SECOND}"
            ));
        }
        finish(hours * 3600 + minutes * 60 + seconds)
    }
}

fn finish(total: u32) -> std::result::Result<DurationArg, String> {
    if total == 0 {
        return Err("duration must be greater than zero".to_string());
    }
    if total > MAX_HOURS * 3600 + MAX_MINUTE_OR_SECOND * 60 + MAX_MINUTE_OR_SECOND {
        return Err(format!("duration exceeds the board maximum of {MAX_HOURS}h59m59s"));
    }
    Ok(DurationArg(total))
}

/// `HH:MM:SS` or `MM:SS`.
fn parse_colon_form(s: &str) -> std::result::Result<(u32, u32, u32), String> {
    let parts: Vec<&str> = s.split(':').collect();
    let parse = |part: &str| -> std::result::Result<u32, String> {
        part.parse()
            .map_err(|_| format!("invalid duration component '{part}'"))
    };
    match parts.as_slice() {
        [m, sec] => Ok((0, parse(m)?, parse(sec)?)),
        [h, m, sec] => Ok((parse(h)?, parse(m)?, parse(sec)?)),
        _ => Err(format!("invalid duration '{s}'; use MM:SS or HH:MM:SS")),
    }
}

/// `NhNmNs` with each unit optional but in order, e.g. `2h`, `45m`, `1h30s`.
fn parse_unit_form(s: &str) -> std::result::Result<(u32, u32, u32), String> {
    let mut hours = None;
    let mut minutes = None;
    let mut seconds = None;
    let mut number = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        if number.is_empty() {
            return Err(format!("invalid duration '{s}'"));
        }
        let value: u32 = number
            .parse()
            .map_err(|_| format!("invalid duration '{s}'"))?;
        number.clear();
        let slot = match c.to_ascii_lowercase() {
            'h' => &mut hours,
            'm' => &mut minutes,
            's' => &mut seconds,
            other => return Err(format!("unknown duration unit '{other}'")),
        };
        if slot.is_some() {
            return Err(format!("duplicate duration unit in '{s}'"));
        }
        *slot = Some(value);
    }
    if !number.is_empty() {
        return Err(format!("trailing digits without a unit in '{s}'"));
    }

    Ok((
        hours.unwrap_or(0),
        minutes.unwrap_or(0),
        seconds.unwrap_or(0),
    ))
}

impl fmt::Display for DurationArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_hms(self.0))
    }
}

impl From<DurationArg> for u32 {
    fn from(d: DurationArg) -> Self {
        d.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Board(args) => args.run(),
        Commands::Configure { slot, name, duration } => {
            timers::configure(slot, &name, duration.0)
        }
        Commands::Start { slot } => timers::start(slot),
        Commands::Stop { slot } => timers::stop(slot),
        Commands::Toggle { slot } => timers::toggle(slot),
        Commands::Reset { slot } => timers::reset(slot),
        Commands::ResetAll => timers::reset_all(),
        Commands::Dispatch(args) => args.run(),
        Commands::Load(args) => args.run(),
        Commands::Preset { command } => commands::presets::run(command),
        Commands::Daemon { command } => commands::daemon::run(command),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
