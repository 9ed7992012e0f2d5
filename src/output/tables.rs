use {
    crate::{
        access::AccessContext,
        analysis::{Hotspot, ProbabilityZone, ZoneKind},
        domain::IncidentReport,
        utils::{TimeUtils, format_duration},
    },
    itertools::Itertools,
    serde::Serialize,
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled, Serialize)]
pub struct HotspotRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Anchor")]
    pub anchor: String,
    #[tabled(rename = "Missing")]
    pub missing: String,
    #[tabled(rename = "On foot")]
    pub foot: String,
    #[tabled(rename = "Vehicle")]
    pub vehicle: String,
}

impl From<&Hotspot> for HotspotRow {
    fn from(h: &Hotspot) -> Self {
        let ms = (h.hours_missing.value() * TimeUtils::MS_IN_H as f64) as i64;
        Self {
            id: h.id.clone(),
            name: h.name.clone(),
            anchor: h.anchor.to_string(),
            missing: format_duration(ms),
            foot: h.radii.foot_meters.to_string(),
            vehicle: h.radii.car_meters.to_string(),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct ZoneRow {
    #[tabled(rename = "Zone")]
    pub kind: String,
    #[tabled(rename = "Radius (m)")]
    pub radius: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Color")]
    pub color: String,
    #[tabled(rename = "Weight")]
    pub weight: u8,
}

impl From<&ProbabilityZone> for ZoneRow {
    fn from(z: &ProbabilityZone) -> Self {
        let kind = match z.kind {
            ZoneKind::FixedTier(tier) => format!("Tier {}", tier),
            ZoneKind::TravelFoot => "Foot".to_string(),
            ZoneKind::TravelVehicle => "Vehicle".to_string(),
        };
        Self {
            kind,
            radius: format!("{:.0}", z.radius_meters.value()),
            label: z.label.clone(),
            color: z.style.hex_color(),
            weight: z.style.weight,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct MapRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Position")]
    pub position: String,
    #[tabled(rename = "Reported")]
    pub created: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&IncidentReport> for MapRow {
    fn from(r: &IncidentReport) -> Self {
        Self {
            id: r.id.clone(),
            kind: r.kind.to_string(),
            title: r.name.clone(),
            description: r.summary.clone(),
            position: r.position.map(|p| p.to_string()).unwrap_or_default(),
            created: r
                .created_at
                .map(|t| t.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: r.status_label().to_string(),
        }
    }
}

pub fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn describe_session(ctx: &AccessContext) -> String {
    let who = ctx.email().unwrap_or("anonymous");
    let caps = ctx.capabilities().join(", ");
    if caps.is_empty() {
        format!("{}: no capabilities", who)
    } else {
        format!("{}: {}", who, caps)
    }
}
