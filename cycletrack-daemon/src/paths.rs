use std::path::{Path, PathBuf};
use std::time::Duration;

use cycletrack_core::store::data_root_at;

pub const DAEMON_SOCKET: &str = "daemon.sock";

/// Cadence of the countdown clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub fn socket_path(home: &Path) -> PathBuf {
    data_root_at(home).join(DAEMON_SOCKET)
}
