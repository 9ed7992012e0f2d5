use {
    crate::{
        config::{ALERTS, DF, PERSISTENCE, danger_message, missing_message},
        data::DocumentStore,
        domain::ReportKind,
    },
    anyhow::{Context, Result},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// An in-app alert for one user about one new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: String,
    pub user_id: String,
    #[serde(rename = "reportId")]
    pub report_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Same (report, user) always maps to the same id, so a re-run trigger can't double-notify.
pub fn notification_id(report_id: &str, user_id: &str) -> String {
    let key = format!("{}:{}", report_id, user_id);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}

/// One notification per user. Pure; no I/O.
pub fn county_notifications(
    kind: ReportKind,
    report_id: &str,
    county: &str,
    user_ids: &[String],
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let (title, message) = match kind {
        ReportKind::Danger => (ALERTS.danger_title, danger_message(county)),
        ReportKind::Missing => (ALERTS.missing_title, missing_message(county)),
    };

    user_ids
        .iter()
        .map(|user_id| Notification {
            notification_id: notification_id(report_id, user_id),
            user_id: user_id.clone(),
            report_id: report_id.to_string(),
            title: title.to_string(),
            message: message.clone(),
            read: false,
            created_at: now,
        })
        .collect()
}

/// Fans a newly created report out to every user registered in its county.
/// Returns how many notifications were newly written.
pub async fn notify_county(
    store: &dyn DocumentStore,
    kind: ReportKind,
    report_id: &str,
    county: Option<&str>,
    now: DateTime<Utc>,
) -> Result<usize> {
    let Some(county) = county.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(0);
    };

    let users = store
        .find_by_field(PERSISTENCE.collections.users, "county", county)
        .await
        .with_context(|| format!("Failed to look up users in {}", county))?;
    let user_ids: Vec<String> = users.into_iter().map(|d| d.id).collect();

    let mut written = 0;
    for n in county_notifications(kind, report_id, county, &user_ids, now) {
        let body = serde_json::to_value(&n)?;
        if store
            .insert_if_absent(PERSISTENCE.collections.notifications, &n.notification_id, &body)
            .await?
        {
            written += 1;
        }
    }

    if DF.log_alerts {
        log::info!(
            "ALERTS: {} report {} -> {} new notifications in {}",
            kind,
            report_id,
            written,
            county
        );
    }
    Ok(written)
}
