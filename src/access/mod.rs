// Capability-based access control
mod capability;

pub use capability::{AccessContext, AccessDenied, Capability, DirectoryEntry, Role};
