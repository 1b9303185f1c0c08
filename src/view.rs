use std::fmt;

/// Console views an operator can switch between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// Stats overview plus the most recent leads. The landing view.
    #[default]
    Dashboard,
    /// Full lead list with per-lead detail.
    Leads,
    /// Client-side breakdown of the current lead list.
    Analytics,
    /// Runtime configuration, read-only.
    Settings,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Leads, View::Analytics, View::Settings];

    /// Resolve a view name. Unrecognized names land on the dashboard
    /// rather than erroring; switching views is never a failure.
    pub fn parse(name: &str) -> View {
        match name.trim().to_ascii_lowercase().as_str() {
            "dashboard" => View::Dashboard,
            "leads" => View::Leads,
            "analytics" => View::Analytics,
            "settings" => View::Settings,
            other => {
                if !other.is_empty() {
                    tracing::warn!("unknown view {:?}, falling back to dashboard", other);
                }
                View::Dashboard
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Leads => "leads",
            View::Analytics => "analytics",
            View::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert_eq!(View::parse("dashboard"), View::Dashboard);
        assert_eq!(View::parse("leads"), View::Leads);
        assert_eq!(View::parse("analytics"), View::Analytics);
        assert_eq!(View::parse("settings"), View::Settings);
    }

    #[test]
    fn names_are_case_and_whitespace_tolerant() {
        assert_eq!(View::parse("  Leads "), View::Leads);
        assert_eq!(View::parse("ANALYTICS"), View::Analytics);
    }

    #[test]
    fn unknown_names_fall_back_to_dashboard() {
        assert_eq!(View::parse("reports"), View::Dashboard);
        assert_eq!(View::parse(""), View::Dashboard);
        assert_eq!(View::default(), View::Dashboard);
    }

    #[test]
    fn round_trips_through_as_str() {
        for view in View::ALL {
            assert_eq!(View::parse(view.as_str()), view);
        }
    }
}
