use {
    crate::{
        access::{AccessContext, Capability},
        config::{DF, PERSISTENCE},
        data::{Document, DocumentStore, ReportRepository},
    },
    anyhow::{Context, Result, bail},
    chrono::{DateTime, SecondsFormat, Utc},
    serde_json::{Map, Value, json},
    uuid::Uuid,
};

const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "number", "code"];

/// Every required field present and non-blank. Phone numbers may be stored as numbers.
fn missing_fields(fields: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|key| match fields.get(*key) {
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Number(_)) => false,
            _ => true,
        })
        .collect()
}

/// Partner organization registry (`org` collection).
impl ReportRepository {
    pub async fn list_organizations(&self, ctx: &AccessContext) -> Result<Vec<Document>> {
        ctx.require(Capability::ManageOrganizations)?;
        self.store()
            .list(PERSISTENCE.collections.organizations)
            .await
            .context("Failed to load organizations")
    }

    /// Creates an organization when `id` is `None`, otherwise merges `body` into the existing one.
    /// Returns the organization id.
    pub async fn save_organization(
        &self,
        ctx: &AccessContext,
        id: Option<&str>,
        body: Value,
        now: DateTime<Utc>,
    ) -> Result<String> {
        ctx.require(Capability::ManageOrganizations)?;
        let Value::Object(fields) = body else {
            bail!("An organization must be a JSON object");
        };
        let orgs = PERSISTENCE.collections.organizations;

        let (id, merged) = match id {
            Some(id) => {
                let Some(Value::Object(mut existing)) = self.store().get(orgs, id).await? else {
                    bail!("No organization with id {}", id);
                };
                existing.extend(fields);
                (id.to_string(), existing)
            }
            None => {
                let mut fresh = fields;
                fresh
                    .entry("role")
                    .or_insert_with(|| json!("organization"));
                fresh.insert(
                    "createdAt".into(),
                    json!(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
                );
                (Uuid::new_v4().to_string(), fresh)
            }
        };

        let missing = missing_fields(&merged);
        if !missing.is_empty() {
            bail!("Organization is missing {}", missing.join(", "));
        }

        self.store()
            .upsert(orgs, &id, &Value::Object(merged))
            .await
            .context("Failed to store organization")?;
        if DF.log_access {
            log::info!(
                "ACCESS: {} saved organization {}",
                ctx.email().unwrap_or("anonymous"),
                id
            );
        }
        Ok(id)
    }

    pub async fn remove_organization(&self, ctx: &AccessContext, id: &str) -> Result<bool> {
        ctx.require(Capability::ManageOrganizations)?;
        self.store()
            .delete(PERSISTENCE.collections.organizations, id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SqliteDocumentStore;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 2, 9, 0, 0).unwrap()
    }

    async fn repo() -> ReportRepository {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        for (id, entry) in [
            ("a1", json!({ "email": "head@org.ke", "orgrole": "Administrator" })),
            ("a2", json!({ "email": "acct@org.ke", "role": "Administrator" })),
        ] {
            store.upsert("adminusers", id, &entry).await.unwrap();
        }
        ReportRepository::new(Arc::new(store))
    }

    fn org() -> Value {
        json!({
            "name": "Mombasa Search & Rescue",
            "email": "info@msar.ke",
            "number": 712345678,
            "code": "MSAR",
            "county": "Mombasa"
        })
    }

    #[tokio::test]
    async fn test_only_org_administrators_manage_organizations() {
        let repo = repo().await;
        let head = repo.resolve_session(Some("head@org.ke")).await.unwrap();
        let account_admin = repo.resolve_session(Some("acct@org.ke")).await.unwrap();

        assert!(
            repo.save_organization(&account_admin, None, org(), now())
                .await
                .is_err()
        );
        assert!(repo.list_organizations(&account_admin).await.is_err());

        let id = repo
            .save_organization(&head, None, org(), now())
            .await
            .unwrap();
        let listed = repo.list_organizations(&head).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].body["role"], json!("organization"));
        assert_eq!(listed[0].body["createdAt"], json!("2024-08-02T09:00:00Z"));

        repo.save_organization(&head, Some(&id), json!({ "county": "Kilifi" }), now())
            .await
            .unwrap();
        let body = repo.store().get("org", &id).await.unwrap().unwrap();
        assert_eq!(body["county"], json!("Kilifi"));
        assert_eq!(body["code"], json!("MSAR"));

        assert!(repo.remove_organization(&account_admin, &id).await.is_err());
        assert!(repo.remove_organization(&head, &id).await.unwrap());
    }

    #[tokio::test]
    async fn test_required_fields_are_enforced() {
        let repo = repo().await;
        let head = repo.resolve_session(Some("head@org.ke")).await.unwrap();

        let err = repo
            .save_organization(&head, None, json!({ "name": "X", "email": " " }), now())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Organization is missing email, number, code");

        assert!(
            repo.save_organization(&head, Some("ghost"), org(), now())
                .await
                .is_err()
        );
    }
}
