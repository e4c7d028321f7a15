//! TUI interaction modes

/// The current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Move between fields and adjust them (default)
    #[default]
    Normal,
    /// Typing a number into the selected numeric field (activated with i or Enter)
    Edit,
}

impl Mode {
    /// Returns a short code for compact display.
    pub fn short_code(&self) -> &'static str {
        match self {
            Mode::Normal => "NOR",
            Mode::Edit => "EDT",
        }
    }
}
