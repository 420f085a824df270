//! Cycletrack daemon: single-owner timer session + 1 Hz tick + socket server.

mod error;
pub mod paths;
pub mod protocol;
mod runtime;
mod session;

pub use error::DaemonError;
pub use protocol::{
    request_command, request_shutdown, request_status, send_request, DaemonRequest,
    DaemonResponse, SlotRow, StatusPayload,
};
pub use runtime::{run, start_blocking};
pub use session::Session;
