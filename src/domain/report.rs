use {
    crate::{
        config::{ESTIMATOR, PERSISTENCE},
        domain::{Coordinate, TerrainTags, parse_position},
        utils::parse_timestamp,
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    strum_macros::{Display, EnumIter, EnumString},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Missing,
    Danger,
}

impl ReportKind {
    /// Collection the backend stores this kind of report in.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Missing => PERSISTENCE.collections.missing_reports,
            Self::Danger => PERSISTENCE.collections.danger_reports,
        }
    }

    fn default_name(self) -> &'static str {
        match self {
            Self::Missing => "Unknown",
            Self::Danger => "Danger Report",
        }
    }
}

/// A report as decoded from its stored document. Every field is best-effort.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IncidentReport {
    pub id: String,
    pub kind: ReportKind,
    pub name: String,
    pub summary: String,
    pub location: Option<String>,
    pub county: Option<String>,

    // Estimator inputs
    pub disappeared_at: Option<DateTime<Utc>>,
    pub terrain: TerrainTags,
    pub injured: bool,
    pub position: Option<Coordinate>,

    // Moderation state
    pub created_at: Option<DateTime<Utc>>,
    pub is_solved: bool,
    pub is_rejected: bool,
    pub is_verified: bool,
}

impl IncidentReport {
    pub fn from_document(kind: ReportKind, id: impl Into<String>, doc: &Value) -> Self {
        let text = |key: &str| {
            doc.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let flag = |key: &str| doc.get(key).and_then(Value::as_bool).unwrap_or(false);

        let (name, summary) = match kind {
            ReportKind::Missing => (
                text("missingPersonName"),
                text("lastSeen").unwrap_or_else(|| "No details".to_string()),
            ),
            ReportKind::Danger => (
                text("category"),
                text("description").unwrap_or_else(|| "No description provided.".to_string()),
            ),
        };

        let position = parse_position(
            ["position", "geopoint"]
                .into_iter()
                .filter_map(|key| doc.get(key)),
        );

        Self {
            id: id.into(),
            kind,
            name: name.unwrap_or_else(|| kind.default_name().to_string()),
            summary,
            location: text("location"),
            county: text("county"),
            disappeared_at: doc.get("dateOfDisappearance").and_then(parse_timestamp),
            terrain: TerrainTags::from_value(doc.get("terrain")),
            injured: injury_flag(doc),
            position,
            created_at: doc.get("createdAt").and_then(parse_timestamp),
            is_solved: flag("isSolved"),
            is_rejected: flag("isRejected"),
            is_verified: flag("isVerified"),
        }
    }

    /// Pending / Verified / Resolved / Rejected, as the moderation table shows it.
    pub fn status_label(&self) -> &'static str {
        if self.is_solved {
            "Resolved"
        } else if self.is_rejected {
            "Rejected"
        } else if self.is_verified {
            "Verified"
        } else {
            "Pending"
        }
    }
}

/// `flags` may be an array of strings or a single string; `injured` may be a plain bool.
fn injury_flag(doc: &Value) -> bool {
    let needle = ESTIMATOR.keywords.injured_flag;
    let in_flags = match doc.get("flags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|f| f.trim().eq_ignore_ascii_case(needle)),
        Some(Value::String(s)) => s.to_lowercase().contains(needle),
        _ => false,
    };
    in_flags || doc.get("injured").and_then(Value::as_bool).unwrap_or(false)
}
