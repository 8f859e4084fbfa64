// Shared ANSI/VT100 control sequences used across the UI.

/// Reset terminal styling to defaults.
pub const STYLE_RESET: &str = crate::csi!("0m");
