//! Error types for cycletrack-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SlotId;

/// All errors that can arise from registry, catalog, and snapshot operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (snapshot save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot parse error on load — includes file path and serde context.
    #[error("failed to parse snapshot at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Config parse error on load.
    #[error("failed to parse config at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.cycletrack/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The snapshot file did not exist at the expected path.
    #[error("snapshot not found at {}", path.display())]
    SnapshotNotFound { path: PathBuf },

    /// A registry operation named a slot id outside the fixed roster.
    #[error("no timer slot with id {id}")]
    SlotNotFound { id: SlotId },

    /// Start refused: the slot is unconfigured or already finished.
    #[error("timer slot {id} cannot be started (unconfigured or finished)")]
    NotStartable { id: SlotId },

    /// Rejected input (blank required field, non-positive duration).
    #[error("validation failed: {0}")]
    Validation(String),
}
