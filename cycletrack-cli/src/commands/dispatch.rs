//! `cycletrack dispatch` / `cycletrack load` — arm slots in one step, either
//! with an explicit duration or from a saved preset.

use anyhow::{bail, Context, Result};
use clap::Args;

use cycletrack_core::format_hms;
use cycletrack_core::types::PresetRecord;
use cycletrack_daemon::{request_command, DaemonRequest};

use crate::DurationArg;

/// Arguments for `cycletrack dispatch`.
#[derive(Args, Debug)]
pub struct DispatchArgs {
    /// Machine name to dispatch to (case-insensitive).
    pub machine: String,

    /// Cycle duration, e.g. `2h30m`, `45m`, `1:30:00`, or plain seconds.
    #[arg(long)]
    pub duration: DurationArg,
}

impl DispatchArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let data = request_command(
            &home,
            &DaemonRequest::Dispatch {
                machine: self.machine.clone(),
                seconds: self.duration.0,
            },
        )
        .context("dispatch failed — is the daemon running?")?;

        let armed = data
            .get("armed")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0);
        report_armed(armed, &self.machine, self.duration.0);
        Ok(())
    }
}

/// Arguments for `cycletrack load`.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Machine name the preset was saved for (case-insensitive).
    pub machine: String,

    /// Part number to look up (case-insensitive).
    pub part: String,
}

impl LoadArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;

        let data = request_command(
            &home,
            &DaemonRequest::PresetList {
                machine: Some(self.machine.clone()),
            },
        )
        .context("failed to look up presets — is the daemon running?")?;
        let records: Vec<PresetRecord> =
            serde_json::from_value(data).context("malformed preset list in daemon response")?;

        let Some(preset) = records
            .iter()
            .find(|record| record.part_number.eq_ignore_ascii_case(&self.part))
        else {
            bail!(
                "no preset for machine '{}' part '{}'; run `cycletrack preset list`",
                self.machine,
                self.part
            );
        };

        let data = request_command(
            &home,
            &DaemonRequest::Dispatch {
                machine: self.machine.clone(),
                seconds: preset.runtime_seconds,
            },
        )
        .context("dispatch failed")?;
        let armed = data
            .get("armed")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0);
        println!(
            "loaded preset {} ({})",
            preset.part_number,
            format_hms(preset.runtime_seconds)
        );
        report_armed(armed, &self.machine, preset.runtime_seconds);
        Ok(())
    }
}

fn report_armed(armed: u64, machine: &str, seconds: u32) {
    if armed == 0 {
        println!("no slot named '{machine}' on the board; nothing armed");
    } else {
        println!(
            "{armed} slot(s) running for {} @ {}",
            machine.to_uppercase(),
            format_hms(seconds)
        );
    }
}
