use {
    crate::domain::{IncidentReport, ReportKind},
    chrono::{DateTime, Duration, Utc},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// Recency windows offered on the community map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum DateWindow {
    #[strum(serialize = "24h")]
    Last24h,
    #[strum(serialize = "7d")]
    Last7d,
    #[strum(serialize = "30d")]
    Last30d,
}

impl DateWindow {
    pub fn span(self) -> Duration {
        match self {
            Self::Last24h => Duration::days(1),
            Self::Last7d => Duration::days(7),
            Self::Last30d => Duration::days(30),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapFilter {
    pub kind: Option<ReportKind>,
    pub window: Option<DateWindow>,
}

impl MapFilter {
    /// Public map rules: must be placeable, open, of the chosen kind and recent enough.
    /// Reports without a creation time pass the date check.
    pub fn accepts(&self, report: &IncidentReport, now: DateTime<Utc>) -> bool {
        if report.position.is_none() {
            return false;
        }
        if self.kind.is_some_and(|k| k != report.kind) {
            return false;
        }
        if report.is_solved || report.is_rejected {
            return false;
        }
        match (self.window, report.created_at) {
            (Some(window), Some(created)) => now - created <= window.span(),
            _ => true,
        }
    }

    pub fn apply<'a>(
        &self,
        reports: &'a [IncidentReport],
        now: DateTime<Utc>,
    ) -> Vec<&'a IncidentReport> {
        reports.iter().filter(|r| self.accepts(r, now)).collect()
    }
}
