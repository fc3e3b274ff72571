//! State icons for CLI output

/// Icons for resource and operation states
pub struct StateIcon;

impl StateIcon {
    /// Resource is up and healthy
    pub const UP: &'static str = "✓";

    /// Resource is converging
    pub const UPDATING: &'static str = "⟳";

    /// Resource failed
    pub const FAILED: &'static str = "✗";

    /// Any other state
    pub const NEUTRAL: &'static str = "●";

    /// Get the icon for a resource state
    pub fn for_state(state: &str) -> &'static str {
        match state.to_lowercase().as_str() {
            "up" | "online" | "success" | "succeeded" | "healthy" | "connected" => Self::UP,
            "updating" | "in_progress" | "running" | "pending" => Self::UPDATING,
            "failed" | "error" | "offline" | "unhealthy" => Self::FAILED,
            _ => Self::NEUTRAL,
        }
    }

    /// Icon plus the state text, as shown in detail views
    pub fn with_state(state: &str) -> String {
        format!("{} {}", Self::for_state(state), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_state() {
        assert_eq!(StateIcon::for_state("up"), StateIcon::UP);
        assert_eq!(StateIcon::for_state("Updating"), StateIcon::UPDATING);
        assert_eq!(StateIcon::for_state("FAILED"), StateIcon::FAILED);
        assert_eq!(StateIcon::for_state("deleting"), StateIcon::NEUTRAL);
        assert_eq!(StateIcon::for_state(""), StateIcon::NEUTRAL);
    }

    #[test]
    fn test_operation_states() {
        assert_eq!(StateIcon::for_state("success"), StateIcon::UP);
        assert_eq!(StateIcon::for_state("in_progress"), StateIcon::UPDATING);
    }
}
