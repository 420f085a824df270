//! Cycletrack core library — domain types, timer registry, preset catalog,
//! status classification, and snapshot persistence.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`registry`] — the fixed-slot [`TimerRegistry`]
//! - [`status`] — aggregate [`classify`] over the slot set
//! - [`presets`] — the [`PresetCatalog`]
//! - [`store`] — JSON snapshot load / save with fallback defaults
//! - [`config`] — YAML dashboard config (machine roster)
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod presets;
pub mod registry;
pub mod status;
pub mod store;
pub mod types;

pub use config::DashboardConfig;
pub use error::CoreError;
pub use presets::PresetCatalog;
pub use registry::TimerRegistry;
pub use status::classify;
pub use types::{
    format_hms, MachineName, PresetId, PresetRecord, SlotCondition, SlotId, SystemStatus,
    TimerSlot,
};
