//! TUI widgets

mod mode_indicator;

pub use mode_indicator::ModeIndicator;
