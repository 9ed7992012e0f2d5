mod import;
mod leads;
mod organizations;
mod repository;
mod storage;

pub use {
    import::{ImportSummary, import_export, import_file},
    leads::{Lead, LeadStatus, RequestDecision, VolunteerRequest},
    repository::{ReportFlag, ReportRepository, Submitted},
    storage::{Document, DocumentStore, SqliteDocumentStore},
};
