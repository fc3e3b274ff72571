//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get the color for a resource or operation state
    pub fn for_state(&self, state: &str) -> TableColor {
        match state.to_lowercase().as_str() {
            "up" | "online" | "success" | "succeeded" | "healthy" | "connected" => self.success,
            "updating" | "in_progress" | "running" | "pending" => self.warning,
            "failed" | "error" | "offline" | "unhealthy" => self.error,
            _ => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_colors() {
        let theme = ColorTheme::default();
        assert_eq!(theme.for_state("online"), TableColor::Green);
        assert_eq!(theme.for_state("updating"), TableColor::Yellow);
        assert_eq!(theme.for_state("failed"), TableColor::Red);
        assert_eq!(theme.for_state("unknown"), TableColor::DarkGrey);
    }
}
