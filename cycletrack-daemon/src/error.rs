use std::path::PathBuf;

use thiserror::Error;

/// Error surface for the daemon runtime, session, and socket protocol.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] cycletrack_core::CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("channel closed: {0}")]
    ChannelClosed(&'static str),

    #[error("daemon protocol error: {0}")]
    Protocol(String),

    #[error("daemon is not running (socket missing: {})", socket.display())]
    DaemonNotRunning { socket: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DaemonError {
    DaemonError::Io {
        path: path.into(),
        source,
    }
}
