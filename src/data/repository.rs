use {
    crate::{
        access::{AccessContext, Capability, DirectoryEntry},
        analysis::{Hotspot, MapFilter, build_hotspots},
        config::{DF, PERSISTENCE},
        data::DocumentStore,
        domain::{IncidentReport, ReportKind},
        notify::notify_county,
    },
    anyhow::{Context, Result, bail},
    chrono::{DateTime, SecondsFormat, Utc},
    serde_json::{Value, json},
    std::sync::Arc,
    strum_macros::{Display, EnumString},
    uuid::Uuid,
};

/// Moderation toggles on a report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFlag {
    Solved,
    Rejected,
    Verified,
}

impl ReportFlag {
    fn field(self) -> &'static str {
        match self {
            Self::Solved => "isSolved",
            Self::Rejected => "isRejected",
            Self::Verified => "isVerified",
        }
    }
}

/// Outcome of a report submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub id: String,
    pub notifications: usize,
}

/// Typed access to reports and the admin directory.
/// Capabilities are checked here, not only in whatever front end calls it.
#[derive(Clone)]
pub struct ReportRepository {
    store: Arc<dyn DocumentStore>,
}

impl ReportRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Resolves the session's capabilities once. `None` is an anonymous visitor.
    pub async fn resolve_session(&self, email: Option<&str>) -> Result<AccessContext> {
        let Some(email) = email else {
            return Ok(AccessContext::anonymous());
        };
        let ctx = AccessContext::for_user(email, &self.directory().await?);
        if DF.log_access {
            log::info!(
                "ACCESS: {} -> [{}]",
                ctx.email().unwrap_or_default(),
                itertools::join(ctx.capabilities(), ", ")
            );
        }
        Ok(ctx)
    }

    pub async fn directory(&self) -> Result<Vec<DirectoryEntry>> {
        let docs = self
            .store
            .list(PERSISTENCE.collections.admin_users)
            .await
            .context("Failed to load admin directory")?;
        Ok(docs
            .iter()
            .filter_map(|d| DirectoryEntry::from_document(&d.body))
            .collect())
    }

    pub async fn upsert_directory_entry(
        &self,
        ctx: &AccessContext,
        id: &str,
        body: &Value,
    ) -> Result<()> {
        ctx.require(Capability::ManageUsers)?;
        if DirectoryEntry::from_document(body).is_none() {
            bail!("Directory entry {} has no email", id);
        }
        self.store
            .upsert(PERSISTENCE.collections.admin_users, id, body)
            .await
    }

    pub async fn remove_directory_entry(&self, ctx: &AccessContext, id: &str) -> Result<bool> {
        ctx.require(Capability::ManageUsers)?;
        self.store
            .delete(PERSISTENCE.collections.admin_users, id)
            .await
    }

    /// Public listing; decoding never fails per report.
    pub async fn list_reports(&self, kind: ReportKind) -> Result<Vec<IncidentReport>> {
        let docs = self
            .store
            .list(kind.collection())
            .await
            .with_context(|| format!("Failed to load {} reports", kind))?;
        Ok(docs
            .iter()
            .map(|d| IncidentReport::from_document(kind, d.id.clone(), &d.body))
            .collect())
    }

    /// Danger reports followed by missing-person reports, as the community map loads them.
    pub async fn community_map(
        &self,
        filter: MapFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<IncidentReport>> {
        let mut all = self.list_reports(ReportKind::Danger).await?;
        all.extend(self.list_reports(ReportKind::Missing).await?);
        Ok(crate::trace_time!("Community map filter", {
            all.into_iter().filter(|r| filter.accepts(r, now)).collect()
        }))
    }

    /// Renderable missing-person hotspots.
    pub async fn hotspots(&self, ctx: &AccessContext, now: DateTime<Utc>) -> Result<Vec<Hotspot>> {
        ctx.require(Capability::ViewHotspots)?;
        let reports = self.list_reports(ReportKind::Missing).await?;
        Ok(build_hotspots(&reports, now))
    }

    /// Stores a new report with fresh moderation state, then alerts its county.
    pub async fn submit_report(
        &self,
        ctx: &AccessContext,
        kind: ReportKind,
        mut body: Value,
        now: DateTime<Utc>,
    ) -> Result<Submitted> {
        ctx.require(Capability::SubmitReports)?;
        let Some(fields) = body.as_object_mut() else {
            bail!("A report must be a JSON object");
        };

        let created_at = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        fields.insert("status".into(), json!("Pending"));
        fields.insert("isSolved".into(), json!(false));
        fields.insert("isRejected".into(), json!(false));
        fields.insert("isVerified".into(), json!(false));
        fields.insert("createdAt".into(), json!(created_at));
        if let Some(email) = ctx.email() {
            fields.insert("reportedBy".into(), json!(email));
        }
        let county = fields
            .get("county")
            .and_then(Value::as_str)
            .map(str::to_string);

        let id = Uuid::new_v4().to_string();
        self.store
            .upsert(kind.collection(), &id, &body)
            .await
            .context("Failed to store report")?;

        let notifications = notify_county(self.store.as_ref(), kind, &id, county.as_deref(), now)
            .await
            .unwrap_or_else(|e| {
                // The report is saved either way.
                log::error!("County alerts for {} failed: {:#}", id, e);
                0
            });

        Ok(Submitted { id, notifications })
    }

    pub async fn set_flag(
        &self,
        ctx: &AccessContext,
        kind: ReportKind,
        id: &str,
        flag: ReportFlag,
        value: bool,
    ) -> Result<()> {
        ctx.require(Capability::ManageReports)?;
        let found = self
            .store
            .set_field(kind.collection(), id, flag.field(), &json!(value))
            .await?;
        if !found {
            bail!("No {} report with id {}", kind, id);
        }
        if DF.log_access {
            log::info!(
                "ACCESS: {} set {} = {} on {}/{}",
                ctx.email().unwrap_or("anonymous"),
                flag,
                value,
                kind,
                id
            );
        }
        Ok(())
    }
}
