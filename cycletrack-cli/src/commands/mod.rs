pub mod board;
pub mod daemon;
pub mod dispatch;
pub mod presets;
pub mod timers;
