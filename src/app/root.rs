use crate::{
    analysis::{Hotspot, ProbabilityZone},
    app::{MapSelection, ZoneDisplayMode},
    domain::Coordinate,
};

/// View model behind the hotspot map: the renderable reports and the current selection.
#[derive(Debug, Clone, Default)]
pub struct HotspotMap {
    hotspots: Vec<Hotspot>,
    selection: MapSelection,
}

/// What the renderer draws for the active report.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLayer<'a> {
    pub hotspot: &'a Hotspot,
    pub center: Coordinate,
    pub zones: Vec<ProbabilityZone>,
}

impl HotspotMap {
    pub fn new(hotspots: Vec<Hotspot>) -> Self {
        Self {
            hotspots,
            selection: MapSelection::Idle,
        }
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn selection(&self) -> &MapSelection {
        &self.selection
    }

    /// Marker click. Unknown ids are ignored.
    pub fn select(&mut self, report_id: &str) -> bool {
        if self.find(report_id).is_none() {
            log::warn!("Ignoring selection of unknown report {}", report_id);
            return false;
        }
        self.selection.select(report_id);
        true
    }

    /// Popup button: select `report_id` and show `mode` for it.
    pub fn show(&mut self, report_id: &str, mode: ZoneDisplayMode) -> bool {
        if self.find(report_id).is_none() {
            log::warn!("Ignoring zone request for unknown report {}", report_id);
            return false;
        }
        self.selection.show(report_id, mode);
        true
    }

    pub fn set_mode(&mut self, mode: ZoneDisplayMode) {
        self.selection.set_mode(mode);
    }

    /// Replaces the report set (e.g. after a reload). Drops a selection that no longer exists.
    pub fn replace_hotspots(&mut self, hotspots: Vec<Hotspot>) {
        self.hotspots = hotspots;
        if let Some(id) = self.selection.report_id()
            && self.find(id).is_none()
        {
            self.selection.clear();
        }
    }

    pub fn active_layer(&self) -> Option<ZoneLayer<'_>> {
        let hotspot = self.find(self.selection.report_id()?)?;
        let mode = self.selection.mode();
        if mode == ZoneDisplayMode::None {
            return None;
        }
        Some(ZoneLayer {
            hotspot,
            center: hotspot.anchor,
            zones: hotspot.zones(mode),
        })
    }

    fn find(&self, report_id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == report_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{ZoneKind, build_hotspots},
        domain::{IncidentReport, ReportKind},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn map() -> HotspotMap {
        let reports: Vec<IncidentReport> = ["a", "b"]
            .iter()
            .map(|id| {
                IncidentReport::from_document(
                    ReportKind::Missing,
                    *id,
                    &json!({ "dateOfDisappearance": "2024-06-01T00:00:00Z", "position": [0.6, 34.8] }),
                )
            })
            .collect();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 4, 0, 0).unwrap();
        HotspotMap::new(build_hotspots(&reports, now))
    }

    #[test]
    fn test_no_layer_until_mode_chosen() {
        let mut m = map();
        assert!(m.active_layer().is_none());
        assert!(m.select("a"));
        assert!(m.active_layer().is_none());

        m.set_mode(ZoneDisplayMode::Travel);
        let layer = m.active_layer().unwrap();
        assert_eq!(layer.hotspot.id, "a");
        assert_eq!(layer.zones.len(), 2);
        assert_eq!(layer.zones[1].kind, ZoneKind::TravelFoot);
        assert_eq!(layer.zones[1].radius_meters.value(), 12_000.0);
    }

    #[test]
    fn test_selecting_another_report_resets_mode() {
        let mut m = map();
        m.show("a", ZoneDisplayMode::FixedTier);
        assert_eq!(m.active_layer().unwrap().zones.len(), 3);

        m.select("b");
        assert!(m.active_layer().is_none());
        assert_eq!(m.selection().report_id(), Some("b"));
    }

    #[test]
    fn test_unknown_ids_and_reload() {
        let mut m = map();
        assert!(!m.select("zzz"));
        assert_eq!(m.selection(), &MapSelection::Idle);

        m.show("b", ZoneDisplayMode::Travel);
        let keep_a: Vec<Hotspot> = m.hotspots().iter().filter(|h| h.id == "a").cloned().collect();
        m.replace_hotspots(keep_a);
        assert_eq!(m.selection(), &MapSelection::Idle);
    }
}
