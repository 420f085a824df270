//! Per-slot timer commands: configure, start, stop, toggle, reset.

use anyhow::{Context, Result};

use cycletrack_core::format_hms;
use cycletrack_daemon::{request_command, DaemonRequest};

pub fn configure(slot: u32, name: &str, seconds: u32) -> Result<()> {
    send(DaemonRequest::Configure {
        slot,
        name: name.to_string(),
        seconds,
    })?;
    println!(
        "slot {slot} configured: {} @ {}",
        name.to_uppercase(),
        format_hms(seconds)
    );
    Ok(())
}

pub fn start(slot: u32) -> Result<()> {
    send(DaemonRequest::Start { slot })?;
    println!("slot {slot} running");
    Ok(())
}

pub fn stop(slot: u32) -> Result<()> {
    send(DaemonRequest::Stop { slot })?;
    println!("slot {slot} paused");
    Ok(())
}

pub fn toggle(slot: u32) -> Result<()> {
    let data = send(DaemonRequest::Toggle { slot })?;
    let running = data
        .get("running")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    println!(
        "slot {slot} {}",
        if running { "running" } else { "paused" }
    );
    Ok(())
}

pub fn reset(slot: u32) -> Result<()> {
    send(DaemonRequest::Reset { slot })?;
    println!("slot {slot} cleared");
    Ok(())
}

pub fn reset_all() -> Result<()> {
    let data = send(DaemonRequest::ResetAll)?;
    let slots = data
        .get("slots")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    println!("cleared {slots} slots");
    Ok(())
}

fn send(request: DaemonRequest) -> Result<serde_json::Value> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    request_command(&home, &request).context("timer command failed — is the daemon running?")
}
