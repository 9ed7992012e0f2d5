use {
    crate::{
        analysis::{
            ProbabilityZone, TravelRadii, compute_elapsed_hours, compute_radii, fixed_tier_zones,
            travel_zones,
        },
        app::ZoneDisplayMode,
        config::{DF, Hours},
        domain::{Coordinate, IncidentReport},
    },
    chrono::{DateTime, Utc},
    rayon::prelude::*,
    serde::{Deserialize, Serialize},
};

/// A report that can be placed on the hotspot map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub anchor: Coordinate,
    pub hours_missing: Hours,
    #[serde(flatten)]
    pub radii: TravelRadii,
}

impl Hotspot {
    /// `None` when the report has no usable coordinate or disappearance time.
    pub fn from_report(report: &IncidentReport, now: DateTime<Utc>) -> Option<Self> {
        let Some(anchor) = report.position else {
            if DF.log_dropped_reports {
                log::debug!("Dropping report {}: no resolvable position", report.id);
            }
            return None;
        };
        let Some(disappeared_at) = report.disappeared_at else {
            if DF.log_dropped_reports {
                log::debug!("Dropping report {}: no disappearance time", report.id);
            }
            return None;
        };

        let hours_missing = compute_elapsed_hours(now, disappeared_at);
        let radii = compute_radii(
            hours_missing,
            &report.terrain,
            report.injured,
            report.location.as_deref(),
        );

        if DF.log_hotspots {
            log::info!(
                "{} @ {} missing {} -> foot {} / car {}",
                report.id,
                anchor,
                hours_missing,
                radii.foot_meters,
                radii.car_meters
            );
        }

        Some(Self {
            id: report.id.clone(),
            name: report.name.clone(),
            summary: report.summary.clone(),
            anchor,
            hours_missing,
            radii,
        })
    }

    /// Zones to draw for this hotspot under the given display mode.
    pub fn zones(&self, mode: ZoneDisplayMode) -> Vec<ProbabilityZone> {
        match mode {
            ZoneDisplayMode::None => Vec::new(),
            ZoneDisplayMode::FixedTier => fixed_tier_zones(),
            ZoneDisplayMode::Travel => travel_zones(&self.radii),
        }
    }
}

/// Renderable set for the hotspot map, in input order.
/// Reports without a coordinate or disappearance time are left out.
pub fn build_hotspots(reports: &[IncidentReport], now: DateTime<Utc>) -> Vec<Hotspot> {
    let hotspots: Vec<Hotspot> = crate::trace_time!("Build hotspots", 5_000, {
        reports
            .par_iter()
            .filter_map(|r| Hotspot::from_report(r, now))
            .collect()
    });

    let dropped = reports.len() - hotspots.len();
    if dropped > 0 && DF.log_dropped_reports {
        log::info!(
            "{} of {} reports left off the map (missing position or time)",
            dropped,
            reports.len()
        );
    }
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReportKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn missing(id: &str, doc: serde_json::Value) -> IncidentReport {
        IncidentReport::from_document(ReportKind::Missing, id, &doc)
    }

    #[test]
    fn test_builds_radii_from_document() {
        let r = missing(
            "a",
            json!({
                "missingPersonName": "Wanjiru",
                "dateOfDisappearance": "2024-06-01T02:00:00Z",
                "position": "lat: -1.29, lon: 36.82"
            }),
        );
        let h = Hotspot::from_report(&r, now()).unwrap();
        assert_eq!(h.anchor, Coordinate::new(-1.29, 36.82).unwrap());
        assert_eq!(h.hours_missing.value(), 10.0);
        assert_eq!(h.radii.foot_meters.value(), 30_000.0);
        assert_eq!(h.radii.car_meters.value(), 200_000.0);
    }

    #[test]
    fn test_future_disappearance_uses_absolute_gap() {
        let r = missing(
            "f",
            json!({
                "dateOfDisappearance": "2024-06-01T14:00:00Z",
                "position": [0.5, 35.0]
            }),
        );
        let h = Hotspot::from_report(&r, now()).unwrap();
        assert_eq!(h.hours_missing.value(), 2.0);
    }

    #[test]
    fn test_drops_unplaceable_reports_and_keeps_order() {
        let reports = vec![
            missing("1", json!({ "dateOfDisappearance": "2024-06-01", "position": [0.1, 34.0] })),
            missing("2", json!({ "dateOfDisappearance": "2024-06-01", "position": null })),
            missing("3", json!({ "dateOfDisappearance": "not a date", "position": [0.2, 34.0] })),
            missing("4", json!({ "position": [0.3, 34.0] })),
            missing("5", json!({ "dateOfDisappearance": "2024-05-31", "geopoint": "0.4, 34.1" })),
        ];
        let ids: Vec<String> = build_hotspots(&reports, now())
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_zones_follow_display_mode() {
        let r = missing(
            "z",
            json!({ "dateOfDisappearance": "2024-06-01T10:00:00Z", "position": [0.0, 35.0] }),
        );
        let h = Hotspot::from_report(&r, now()).unwrap();
        assert!(h.zones(ZoneDisplayMode::None).is_empty());
        assert_eq!(h.zones(ZoneDisplayMode::FixedTier).len(), 3);
        let travel = h.zones(ZoneDisplayMode::Travel);
        assert_eq!(travel.len(), 2);
        assert_eq!(travel[1].radius_meters.value(), 6_000.0);
    }
}
