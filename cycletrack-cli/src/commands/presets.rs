//! `cycletrack preset` — saved part/runtime presets.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use cycletrack_core::types::PresetRecord;
use cycletrack_core::format_hms;
use cycletrack_daemon::{request_command, DaemonRequest};

use crate::DurationArg;

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// Save a machine/part/runtime preset.
    Add(PresetAddArgs),
    /// Delete a preset by id.
    Rm {
        /// Preset id as shown by `preset list`.
        id: String,
    },
    /// List saved presets.
    List(PresetListArgs),
}

#[derive(Args, Debug)]
pub struct PresetAddArgs {
    /// Machine name the preset belongs to.
    pub machine: String,

    /// Part number, stored uppercase.
    pub part: String,

    /// Cycle runtime, e.g. `2h30m`, `45m`, `1:30:00`, or plain seconds.
    #[arg(long)]
    pub duration: DurationArg,
}

#[derive(Args, Debug)]
pub struct PresetListArgs {
    /// Filter to one machine (case-insensitive).
    #[arg(long)]
    pub machine: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(command: PresetCommand) -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;

    match command {
        PresetCommand::Add(args) => {
            let data = request_command(
                &home,
                &DaemonRequest::PresetAdd {
                    machine: args.machine,
                    part: args.part,
                    seconds: args.duration.0,
                },
            )
            .context("failed to save preset")?;
            let record: PresetRecord =
                serde_json::from_value(data).context("malformed preset in daemon response")?;
            println!(
                "saved preset {}: {} / {} @ {}",
                record.id,
                record.machine_name,
                record.part_number,
                format_hms(record.runtime_seconds)
            );
        }
        PresetCommand::Rm { id } => {
            let data = request_command(&home, &DaemonRequest::PresetRemove { id: id.clone() })
                .context("failed to remove preset")?;
            let removed = data
                .get("removed")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            if removed {
                println!("removed preset {id}");
            } else {
                println!("no preset with id {id}");
            }
        }
        PresetCommand::List(args) => {
            let data = request_command(
                &home,
                &DaemonRequest::PresetList {
                    machine: args.machine,
                },
            )
            .context("failed to list presets")?;
            let records: Vec<PresetRecord> =
                serde_json::from_value(data).context("malformed preset list in daemon response")?;

            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&records)
                        .context("failed to serialize preset JSON")?
                );
                return Ok(());
            }

            if records.is_empty() {
                println!("no presets saved");
                return Ok(());
            }
            print_table(&records);
        }
    }

    Ok(())
}

#[derive(Tabled)]
struct PresetTableRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "machine")]
    machine: String,
    #[tabled(rename = "part")]
    part: String,
    #[tabled(rename = "runtime")]
    runtime: String,
}

fn print_table(records: &[PresetRecord]) {
    let rows: Vec<PresetTableRow> = records
        .iter()
        .map(|record| PresetTableRow {
            id: record.id.to_string(),
            machine: record.machine_name.to_string(),
            part: record.part_number.clone(),
            runtime: format_hms(record.runtime_seconds),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
