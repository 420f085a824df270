//! JSON newline-delimited socket protocol between the CLI and the daemon.
//!
//! One request per line, one response per line. Requests are a serde-tagged
//! enum (`{"cmd": "...", ...}`) because most commands carry typed payloads.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cycletrack_core::types::{SlotCondition, SystemStatus};

use crate::error::{io_err, DaemonError};
use crate::paths::socket_path;

/// JSON newline-delimited request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DaemonRequest {
    /// Full board status (slots, presets, system lamp).
    Status,
    /// Set a slot's name and duration; the slot is left stopped.
    Configure { slot: u32, name: String, seconds: u32 },
    /// Flip a slot's running state.
    Toggle { slot: u32 },
    Start { slot: u32 },
    Stop { slot: u32 },
    /// Full clear of one slot.
    Reset { slot: u32 },
    ResetAll,
    /// Arm every slot matching `machine` (case-insensitive) and start it.
    Dispatch { machine: String, seconds: u32 },
    PresetAdd { machine: String, part: String, seconds: u32 },
    PresetRemove { id: String },
    PresetList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        machine: Option<String>,
    },
    Shutdown,
}

/// JSON newline-delimited response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DaemonResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One slot row of the status payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRow {
    pub id: u32,
    pub name: String,
    pub initial_seconds: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub condition: SlotCondition,
}

/// The `status` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub system_status: SystemStatus,
    pub status_label: String,
    pub started_at_unix: u64,
    /// False once the session has dropped to memory-only after a failed
    /// snapshot write.
    pub persist: bool,
    pub preset_count: usize,
    pub slots: Vec<SlotRow>,
}

// ---------------------------------------------------------------------------
// Sync client helpers (used by the CLI)
// ---------------------------------------------------------------------------

/// Send one JSON request to the daemon socket and return one response.
pub fn send_request(home: &Path, request: &DaemonRequest) -> Result<DaemonResponse, DaemonError> {
    let socket = socket_path(home);
    if !socket.exists() {
        return Err(DaemonError::DaemonNotRunning { socket });
    }

    let mut stream = UnixStream::connect(&socket).map_err(|err| {
        if matches!(
            err.kind(),
            std::io::ErrorKind::NotFound
                | std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::ConnectionReset
        ) {
            DaemonError::DaemonNotRunning {
                socket: socket.clone(),
            }
        } else {
            io_err(&socket, err)
        }
    })?;

    let payload = serde_json::to_string(request)?;
    stream
        .write_all(payload.as_bytes())
        .map_err(|e| io_err(&socket, e))?;
    stream.write_all(b"\n").map_err(|e| io_err(&socket, e))?;
    stream.flush().map_err(|e| io_err(&socket, e))?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| io_err(&socket, e))?;
    if read == 0 {
        return Err(DaemonError::Protocol(
            "daemon closed connection before responding".to_string(),
        ));
    }

    let response: DaemonResponse = serde_json::from_str(line.trim_end())?;
    Ok(response)
}

/// Send any command and unwrap the data payload.
pub fn request_command(home: &Path, request: &DaemonRequest) -> Result<Value, DaemonError> {
    response_into_data(send_request(home, request)?)
}

/// Query board status, retrying briefly while the socket is still coming up.
pub fn request_status(home: &Path) -> Result<StatusPayload, DaemonError> {
    let request = DaemonRequest::Status;

    let mut last_not_running: Option<DaemonError> = None;
    for attempt in 0..5 {
        match send_request(home, &request) {
            Ok(response) => {
                let data = response_into_data(response)?;
                return serde_json::from_value(data).map_err(DaemonError::Json);
            }
            Err(err @ DaemonError::DaemonNotRunning { .. }) => {
                last_not_running = Some(err);
                if attempt < 4 {
                    sleep(Duration::from_millis(100));
                    continue;
                }
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_not_running.unwrap_or_else(|| {
        DaemonError::Protocol("daemon status retry loop exited unexpectedly".to_string())
    }))
}

pub fn request_shutdown(home: &Path) -> Result<(), DaemonError> {
    let response = send_request(home, &DaemonRequest::Shutdown)?;
    response_into_data(response).map(|_| ())
}

fn response_into_data(response: DaemonResponse) -> Result<Value, DaemonError> {
    if response.ok {
        Ok(response.data.unwrap_or(Value::Null))
    } else {
        Err(DaemonError::Protocol(
            response
                .error
                .unwrap_or_else(|| "unknown daemon error".to_string()),
        ))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_encode_with_cmd_tag() {
        let encoded = serde_json::to_value(&DaemonRequest::Configure {
            slot: 2,
            name: "D3".to_string(),
            seconds: 300,
        })
        .expect("encode");
        assert_eq!(
            encoded,
            json!({"cmd": "configure", "slot": 2, "name": "D3", "seconds": 300})
        );

        let encoded = serde_json::to_value(&DaemonRequest::ResetAll).expect("encode");
        assert_eq!(encoded, json!({"cmd": "reset_all"}));
    }

    #[test]
    fn requests_decode_from_cmd_tag() {
        let decoded: DaemonRequest =
            serde_json::from_str(r#"{"cmd":"dispatch","machine":"d1","seconds":3600}"#)
                .expect("decode");
        assert!(matches!(
            decoded,
            DaemonRequest::Dispatch { ref machine, seconds: 3600 } if machine == "d1"
        ));
    }

    #[test]
    fn error_response_skips_absent_fields() {
        let encoded = serde_json::to_value(DaemonResponse::error("nope")).expect("encode");
        assert_eq!(encoded, json!({"ok": false, "error": "nope"}));
        let encoded = serde_json::to_value(DaemonResponse::ok(json!({"n": 1}))).expect("encode");
        assert_eq!(encoded, json!({"ok": true, "data": {"n": 1}}));
    }

    #[test]
    fn status_payload_roundtrips_through_value() {
        let payload = StatusPayload {
            system_status: cycletrack_core::SystemStatus::Standby,
            status_label: "SYSTEM: STANDBY".to_string(),
            started_at_unix: 1_000_000,
            persist: true,
            preset_count: 0,
            slots: vec![SlotRow {
                id: 0,
                name: "D1".to_string(),
                initial_seconds: 0,
                remaining_seconds: 0,
                is_running: false,
                condition: cycletrack_core::SlotCondition::Idle,
            }],
        };
        let value = serde_json::to_value(&payload).expect("encode");
        assert_eq!(value["systemStatus"], json!("standby"));
        assert_eq!(value["slots"][0]["condition"], json!("idle"));
        let back: StatusPayload = serde_json::from_value(value).expect("decode");
        assert_eq!(back.slots.len(), 1);
        assert_eq!(back.status_label, payload.status_label);
    }
}
