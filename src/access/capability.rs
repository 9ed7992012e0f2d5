use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::collections::BTreeSet,
    strum_macros::{Display, EnumIter, EnumString},
    thiserror::Error,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
pub enum Capability {
    SubmitReports,
    ViewHotspots,
    ManageReports,
    ManageUsers,
    ManageOrganizations,
    RespondToLeads,
}

/// Roles that appear in either `role` or `orgrole` of an admin directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Citizen,
    Organization,
    Administrator,
    Moderator,
    Police,
    Volunteer,
    User,
}

impl Role {
    /// Grants when the role sits in the account-level `role` field.
    fn role_grants(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Citizen | Self::User => &[],
            Self::Organization | Self::Police | Self::Volunteer => &[ViewHotspots],
            Self::Administrator | Self::Moderator => &[ViewHotspots, ManageReports],
        }
    }

    /// Grants when the role sits in `orgrole`, the position within an organization.
    fn orgrole_grants(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Citizen | Self::Organization | Self::User => &[],
            Self::Moderator | Self::Police => &[ViewHotspots, ManageReports],
            Self::Administrator => &[
                ViewHotspots,
                ManageReports,
                ManageUsers,
                ManageOrganizations,
            ],
            Self::Volunteer => &[ViewHotspots, RespondToLeads],
        }
    }
}

/// One `adminusers` document, reduced to the fields that matter for access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub email: String,
    pub role: Option<Role>,
    pub orgrole: Option<Role>,
}

impl DirectoryEntry {
    pub fn from_document(doc: &Value) -> Option<Self> {
        let email = doc.get("email")?.as_str()?.trim();
        if email.is_empty() {
            return None;
        }
        let role_of = |key: &str| {
            doc.get(key)
                .and_then(Value::as_str)
                .and_then(|s| s.trim().parse::<Role>().ok())
        };
        Some(Self {
            email: email.to_string(),
            role: role_of("role"),
            orgrole: role_of("orgrole"),
        })
    }

    fn grants(&self) -> impl Iterator<Item = Capability> {
        let account = self.role.map(Role::role_grants).unwrap_or_default();
        let org = self.orgrole.map(Role::orgrole_grants).unwrap_or_default();
        account.iter().chain(org).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{who} lacks {capability}")]
pub struct AccessDenied {
    pub who: String,
    pub capability: Capability,
}

/// Who is acting and what they may do. Resolved once per session and passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessContext {
    email: Option<String>,
    capabilities: BTreeSet<Capability>,
}

impl AccessContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Signed-in users may always submit; directory roles add to that.
    pub fn for_user(email: &str, entries: &[DirectoryEntry]) -> Self {
        let email = normalize_email(email);
        let mut capabilities = BTreeSet::from([Capability::SubmitReports]);
        for entry in entries
            .iter()
            .filter(|e| normalize_email(&e.email) == email)
        {
            capabilities.extend(entry.grants());
        }
        Self {
            email: Some(email),
            capabilities,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AccessDenied> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AccessDenied {
                who: self.email.clone().unwrap_or_else(|| "anonymous".to_string()),
                capability,
            })
        }
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
