//! `cycletrack board` — the timer board view.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use cycletrack_core::types::{format_hms, SlotCondition, SystemStatus};
use cycletrack_daemon::{request_status, SlotRow, StatusPayload};

/// Arguments for `cycletrack board`.
#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Repoll and redraw every second until interrupted.
    #[arg(long, conflicts_with = "json")]
    pub watch: bool,
}

impl BoardArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;

        if self.watch {
            loop {
                let status = request_status(&home)
                    .context("failed to query board status — is the daemon running?")?;
                // Clear screen and home the cursor before each redraw.
                print!("\x1b[2J\x1b[1;1H");
                print_board(&status);
                std::thread::sleep(std::time::Duration::from_secs(1));
            }
        }

        let status = request_status(&home)
            .context("failed to query board status — is the daemon running?")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&status)
                    .context("failed to serialize board status JSON")?
            );
            return Ok(());
        }

        print_board(&status);
        Ok(())
    }
}

#[derive(Tabled)]
struct BoardTableRow {
    #[tabled(rename = "slot")]
    slot: u32,
    #[tabled(rename = "machine")]
    machine: String,
    #[tabled(rename = "remaining")]
    remaining: String,
    #[tabled(rename = "cycle")]
    cycle: String,
    #[tabled(rename = "state")]
    state: String,
}

fn print_board(status: &StatusPayload) {
    println!(
        "Cycletrack v{} | {} slots | {} presets{}",
        env!("CARGO_PKG_VERSION"),
        status.slots.len(),
        status.preset_count,
        if status.persist {
            String::new()
        } else {
            format!(" | {}", "memory-only".red().bold())
        },
    );
    println!("{}", lamp_line(status.system_status, &status.status_label));

    let rows: Vec<BoardTableRow> = status
        .slots
        .iter()
        .map(|slot| BoardTableRow {
            slot: slot.id,
            machine: slot.name.clone(),
            remaining: format_hms(slot.remaining_seconds),
            cycle: format_hms(slot.initial_seconds),
            state: condition_label(slot).to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn lamp_line(status: SystemStatus, label: &str) -> String {
    let lamp = match status {
        SystemStatus::AlertCycleComplete => "■".red().bold(),
        SystemStatus::Urgent => "■".red(),
        SystemStatus::Warning => "■".yellow().bold(),
        SystemStatus::Optimal => "■".green().bold(),
        SystemStatus::Standby => "■".bright_black().bold(),
    };
    format!("{lamp} {label}")
}

fn condition_label(slot: &SlotRow) -> &'static str {
    match slot.condition {
        SlotCondition::Finished => "DONE",
        SlotCondition::Urgent => {
            if slot.is_running {
                "URGENT"
            } else {
                "PAUSED"
            }
        }
        SlotCondition::Warning => {
            if slot.is_running {
                "WARNING"
            } else {
                "PAUSED"
            }
        }
        SlotCondition::Safe => {
            if slot.is_running {
                "RUNNING"
            } else {
                "PAUSED"
            }
        }
        SlotCondition::Idle => "IDLE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(condition: SlotCondition, is_running: bool) -> SlotRow {
        SlotRow {
            id: 0,
            name: "D1".to_string(),
            initial_seconds: 3600,
            remaining_seconds: 1200,
            is_running,
            condition,
        }
    }

    #[test]
    fn paused_slots_show_paused_regardless_of_threshold() {
        assert_eq!(condition_label(&row(SlotCondition::Urgent, false)), "PAUSED");
        assert_eq!(condition_label(&row(SlotCondition::Safe, false)), "PAUSED");
        assert_eq!(condition_label(&row(SlotCondition::Urgent, true)), "URGENT");
    }

    #[test]
    fn finished_and_idle_ignore_running_flag() {
        assert_eq!(condition_label(&row(SlotCondition::Finished, false)), "DONE");
        assert_eq!(condition_label(&row(SlotCondition::Idle, false)), "IDLE");
    }
}
