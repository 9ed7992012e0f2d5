use {
    crate::{
        access::{AccessContext, Capability},
        config::{DF, PERSISTENCE},
        data::{DocumentStore, ReportRepository},
        utils::parse_timestamp,
    },
    anyhow::{Context, Result, bail},
    chrono::{DateTime, SecondsFormat, Utc},
    serde::{Deserialize, Serialize},
    serde_json::{Value, json},
    strum_macros::{Display, EnumString},
    uuid::Uuid,
};

const PENDING: &str = "Pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum LeadStatus {
    New,
    Assigned,
}

/// A private tip about a missing person. Only staff see these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub missing_name: String,
    pub location: Option<String>,
    pub county: Option<String>,
    pub description: String,
    pub status: LeadStatus,
    pub assignee: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn from_document(id: impl Into<String>, doc: &Value) -> Self {
        let text = |key: &str| {
            doc.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let status = match doc.get("status").and_then(Value::as_str) {
            Some(s) if s.eq_ignore_ascii_case("assigned") => LeadStatus::Assigned,
            _ => LeadStatus::New,
        };
        Self {
            id: id.into(),
            missing_name: text("missingname").unwrap_or_else(|| "Unknown".to_string()),
            location: text("location"),
            county: text("county"),
            description: text("description").unwrap_or_default(),
            status,
            assignee: doc
                .pointer("/assignedTo/name")
                .and_then(Value::as_str)
                .map(str::to_string),
            created_at: doc.get("createdWhen").and_then(parse_timestamp),
        }
    }
}

/// Staff verdict on a volunteer's offer to follow up a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum RequestDecision {
    #[strum(serialize = "approve", to_string = "Approved")]
    Approved,
    #[strum(serialize = "reject", to_string = "Rejected")]
    Rejected,
}

impl RequestDecision {
    fn stamp_field(self) -> &'static str {
        match self {
            Self::Approved => "approvedAt",
            Self::Rejected => "rejectedAt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerRequest {
    pub id: String,
    pub lead_id: String,
    pub volunteer_name: String,
    pub organization_name: String,
    pub requested_by: String,
    pub status: String,
}

impl VolunteerRequest {
    fn from_document(id: impl Into<String>, doc: &Value) -> Self {
        let text = |key: &str| {
            doc.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            id: id.into(),
            lead_id: text("leadId"),
            volunteer_name: text("volunteerName"),
            organization_name: text("organizationName"),
            requested_by: text("requestedByEmail"),
            status: text("status"),
        }
    }
}

fn stamp(now: DateTime<Utc>) -> Value {
    json!(now.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Lead workflow: tips come in, staff assign them, volunteers offer help and staff rule on it.
impl ReportRepository {
    pub async fn submit_lead(
        &self,
        ctx: &AccessContext,
        mut body: Value,
        now: DateTime<Utc>,
    ) -> Result<String> {
        ctx.require(Capability::SubmitReports)?;
        let Some(fields) = body.as_object_mut() else {
            bail!("A lead must be a JSON object");
        };
        fields.insert("createdWhen".into(), stamp(now));
        fields.remove("status");
        fields.remove("assignedTo");

        let id = Uuid::new_v4().to_string();
        self.store()
            .upsert(PERSISTENCE.collections.leads, &id, &body)
            .await
            .context("Failed to store lead")?;
        Ok(id)
    }

    pub async fn list_leads(&self, ctx: &AccessContext) -> Result<Vec<Lead>> {
        ctx.require(Capability::ViewHotspots)?;
        let docs = self
            .store()
            .list(PERSISTENCE.collections.leads)
            .await
            .context("Failed to load leads")?;
        Ok(docs
            .iter()
            .map(|d| Lead::from_document(d.id.clone(), &d.body))
            .collect())
    }

    pub async fn assign_lead(
        &self,
        ctx: &AccessContext,
        lead_id: &str,
        assignee: &str,
        organization: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        ctx.require(Capability::ManageReports)?;
        let assigned_to = json!({
            "name": assignee,
            "organization": organization,
            "assignedAt": stamp(now),
        });
        let leads = PERSISTENCE.collections.leads;
        if !self
            .store()
            .set_field(leads, lead_id, "assignedTo", &assigned_to)
            .await?
        {
            bail!("No lead with id {}", lead_id);
        }
        self.store()
            .set_field(leads, lead_id, "status", &json!(LeadStatus::Assigned.to_string()))
            .await?;

        if DF.log_access {
            log::info!(
                "ACCESS: {} assigned lead {} to {} ({})",
                ctx.email().unwrap_or("anonymous"),
                lead_id,
                assignee,
                organization
            );
        }
        Ok(())
    }

    /// Files a pending offer to help with a lead. Returns the request id.
    pub async fn request_to_volunteer(
        &self,
        ctx: &AccessContext,
        lead_id: &str,
        volunteer_name: &str,
        organization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        ctx.require(Capability::RespondToLeads)?;
        if self
            .store()
            .get(PERSISTENCE.collections.leads, lead_id)
            .await?
            .is_none()
        {
            bail!("No lead with id {}", lead_id);
        }

        let organization = organization
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or("Independent");
        let body = json!({
            "leadId": lead_id,
            "volunteerName": volunteer_name,
            "organizationName": organization,
            "requestedByEmail": ctx.email().unwrap_or_default(),
            "status": PENDING,
            "requestedAt": stamp(now),
        });

        let id = Uuid::new_v4().to_string();
        self.store()
            .upsert(PERSISTENCE.collections.volunteer_requests, &id, &body)
            .await
            .context("Failed to store volunteer request")?;
        Ok(id)
    }

    pub async fn pending_volunteer_requests(
        &self,
        ctx: &AccessContext,
    ) -> Result<Vec<VolunteerRequest>> {
        ctx.require(Capability::ManageReports)?;
        let docs = self
            .store()
            .find_by_field(PERSISTENCE.collections.volunteer_requests, "status", PENDING)
            .await?;
        Ok(docs
            .iter()
            .map(|d| VolunteerRequest::from_document(d.id.clone(), &d.body))
            .collect())
    }

    /// Only pending requests can be decided.
    pub async fn decide_volunteer_request(
        &self,
        ctx: &AccessContext,
        request_id: &str,
        decision: RequestDecision,
        now: DateTime<Utc>,
    ) -> Result<()> {
        ctx.require(Capability::ManageReports)?;
        let requests = PERSISTENCE.collections.volunteer_requests;
        let Some(doc) = self.store().get(requests, request_id).await? else {
            bail!("No volunteer request with id {}", request_id);
        };
        let current = VolunteerRequest::from_document(request_id, &doc);
        if current.status != PENDING {
            bail!(
                "Volunteer request {} is already {}",
                request_id,
                current.status
            );
        }

        self.store()
            .set_field(requests, request_id, "status", &json!(decision.to_string()))
            .await?;
        self.store()
            .set_field(requests, request_id, decision.stamp_field(), &stamp(now))
            .await?;

        if DF.log_access {
            log::info!(
                "ACCESS: {} {} volunteer request {}",
                ctx.email().unwrap_or("anonymous"),
                decision,
                request_id
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{access::AccessDenied, data::SqliteDocumentStore};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 2, 10, 30, 0).unwrap()
    }

    async fn repo() -> ReportRepository {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        for (id, entry) in [
            ("a1", json!({ "email": "desk@police.ke", "orgrole": "Police" })),
            ("a2", json!({ "email": "vol@redcross.ke", "orgrole": "Volunteer" })),
        ] {
            store.upsert("adminusers", id, &entry).await.unwrap();
        }
        ReportRepository::new(Arc::new(store))
    }

    async fn session(repo: &ReportRepository, email: &str) -> AccessContext {
        repo.resolve_session(Some(email)).await.unwrap()
    }

    fn tip() -> Value {
        json!({
            "missingname": "Njeri",
            "name": "Caller",
            "phone": "0700000000",
            "county": "Kiambu",
            "description": "Seen near the bus stage",
            "status": "Assigned"
        })
    }

    #[tokio::test]
    async fn test_lead_submission_and_assignment() {
        let repo = repo().await;
        let citizen = session(&repo, "tipster@mail.ke").await;
        let police = session(&repo, "desk@police.ke").await;
        let volunteer = session(&repo, "vol@redcross.ke").await;

        let id = repo.submit_lead(&citizen, tip(), now()).await.unwrap();
        assert!(repo.list_leads(&citizen).await.is_err());

        let leads = repo.list_leads(&volunteer).await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].missing_name, "Njeri");
        // A submitter can't pre-assign their own lead
        assert_eq!(leads[0].status, LeadStatus::New);
        assert_eq!(leads[0].created_at, Some(now()));

        let denied = repo
            .assign_lead(&volunteer, &id, "Otieno", "Red Cross", now())
            .await
            .unwrap_err();
        assert!(denied.downcast_ref::<AccessDenied>().is_some());

        repo.assign_lead(&police, &id, "Otieno", "Kiambu Police", now())
            .await
            .unwrap();
        let lead = &repo.list_leads(&police).await.unwrap()[0];
        assert_eq!(lead.status, LeadStatus::Assigned);
        assert_eq!(lead.assignee.as_deref(), Some("Otieno"));

        assert!(
            repo.assign_lead(&police, "missing-lead", "X", "Y", now())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_volunteer_request_lifecycle() {
        let repo = repo().await;
        let citizen = session(&repo, "tipster@mail.ke").await;
        let police = session(&repo, "desk@police.ke").await;
        let volunteer = session(&repo, "vol@redcross.ke").await;
        let lead = repo.submit_lead(&citizen, tip(), now()).await.unwrap();

        assert!(
            repo.request_to_volunteer(&police, &lead, "Desk", None, now())
                .await
                .is_err()
        );
        assert!(
            repo.request_to_volunteer(&volunteer, "nope", "Wairimu", None, now())
                .await
                .is_err()
        );

        let first = repo
            .request_to_volunteer(&volunteer, &lead, "Wairimu", None, now())
            .await
            .unwrap();
        let second = repo
            .request_to_volunteer(&volunteer, &lead, "Wairimu", Some("Red Cross"), now())
            .await
            .unwrap();

        assert!(repo.pending_volunteer_requests(&volunteer).await.is_err());
        let pending = repo.pending_volunteer_requests(&police).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].organization_name, "Independent");
        assert_eq!(pending[0].requested_by, "vol@redcross.ke");

        repo.decide_volunteer_request(&police, &first, RequestDecision::Approved, now())
            .await
            .unwrap();
        repo.decide_volunteer_request(&police, &second, RequestDecision::Rejected, now())
            .await
            .unwrap();
        assert!(repo.pending_volunteer_requests(&police).await.unwrap().is_empty());

        let stored = repo
            .store()
            .get("volunteerRequests", &first)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["status"], json!("Approved"));
        assert_eq!(stored["approvedAt"], json!("2024-08-02T10:30:00Z"));

        // Already decided
        assert!(
            repo.decide_volunteer_request(&police, &first, RequestDecision::Rejected, now())
                .await
                .is_err()
        );
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!(
            "approve".parse::<RequestDecision>().ok(),
            Some(RequestDecision::Approved)
        );
        assert_eq!(
            "REJECT".parse::<RequestDecision>().ok(),
            Some(RequestDecision::Rejected)
        );
        assert_eq!(RequestDecision::Approved.to_string(), "Approved");
    }
}
