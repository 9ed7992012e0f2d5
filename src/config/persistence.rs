//! Document store persistence configuration

/// Configuration for the SQLite document database
pub struct DatabaseConfig {
    /// Default database file (overridable with `--db`)
    pub path: &'static str,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
    /// Statements slower than this are logged at warn level
    pub slow_statement_secs: u64,
}

/// Collection names, matching the hosted backend's export layout
pub struct CollectionNames {
    pub missing_reports: &'static str,
    pub danger_reports: &'static str,
    pub admin_users: &'static str,
    pub users: &'static str,
    pub notifications: &'static str,
    pub leads: &'static str,
    pub volunteer_requests: &'static str,
    pub organizations: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub database: DatabaseConfig,
    pub collections: CollectionNames,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    database: DatabaseConfig {
        path: "hotspot.sqlite",
        max_connections: 5,
        busy_timeout_secs: 60,
        slow_statement_secs: 10,
    },
    collections: CollectionNames {
        missing_reports: "missingPersonsReports",
        danger_reports: "dangerReports",
        admin_users: "adminusers",
        users: "users",
        notifications: "notifications",
        leads: "leads",
        volunteer_requests: "volunteerRequests",
        organizations: "org",
    },
};
