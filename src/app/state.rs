// src/app/state.rs

use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// Which zone set is drawn for the active report. At most one at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ZoneDisplayMode {
    #[default]
    None,
    #[strum(serialize = "fixed")]
    FixedTier,
    Travel,
}

/// The map's selection: nothing, or one report plus its display mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapSelection {
    #[default]
    Idle,
    Active {
        report_id: String,
        mode: ZoneDisplayMode,
    },
}

impl MapSelection {
    /// Clicking a marker. Always resets the mode, even for the same report.
    pub fn select(&mut self, report_id: impl Into<String>) {
        *self = Self::Active {
            report_id: report_id.into(),
            mode: ZoneDisplayMode::None,
        };
    }

    /// A popup button: selects the report and switches to `mode` in one step.
    pub fn show(&mut self, report_id: impl Into<String>, mode: ZoneDisplayMode) {
        *self = Self::Active {
            report_id: report_id.into(),
            mode,
        };
    }

    /// Changes the mode of the current report. No-op while idle.
    pub fn set_mode(&mut self, new_mode: ZoneDisplayMode) {
        if let Self::Active { mode, .. } = self {
            *mode = new_mode;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    pub fn report_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Active { report_id, .. } => Some(report_id),
        }
    }

    pub fn mode(&self) -> ZoneDisplayMode {
        match self {
            Self::Idle => ZoneDisplayMode::None,
            Self::Active { mode, .. } => *mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_resets_mode() {
        let mut sel = MapSelection::default();
        assert_eq!(sel.mode(), ZoneDisplayMode::None);

        sel.show("a", ZoneDisplayMode::Travel);
        assert_eq!(sel.mode(), ZoneDisplayMode::Travel);

        sel.select("a");
        assert_eq!(sel.report_id(), Some("a"));
        assert_eq!(sel.mode(), ZoneDisplayMode::None);
    }

    #[test]
    fn test_switching_modes_keeps_one_active() {
        let mut sel = MapSelection::default();
        sel.set_mode(ZoneDisplayMode::FixedTier);
        assert_eq!(sel, MapSelection::Idle);

        sel.select("b");
        sel.set_mode(ZoneDisplayMode::FixedTier);
        sel.set_mode(ZoneDisplayMode::Travel);
        assert_eq!(
            sel,
            MapSelection::Active {
                report_id: "b".to_string(),
                mode: ZoneDisplayMode::Travel
            }
        );

        sel.show("c", ZoneDisplayMode::FixedTier);
        assert_eq!(sel.report_id(), Some("c"));
        assert_eq!(sel.mode(), ZoneDisplayMode::FixedTier);

        sel.clear();
        assert_eq!(sel.report_id(), None);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("fixed".parse::<ZoneDisplayMode>().ok(), Some(ZoneDisplayMode::FixedTier));
        assert_eq!("Travel".parse::<ZoneDisplayMode>().ok(), Some(ZoneDisplayMode::Travel));
        assert_eq!(ZoneDisplayMode::None.to_string(), "none");
    }
}
