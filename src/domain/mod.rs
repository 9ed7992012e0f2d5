// Domain types and value objects
mod coordinate;
mod report;
mod terrain;

// Re-export commonly used types to the world
pub use coordinate::{Coordinate, RawPosition, parse_position};
pub use report::{IncidentReport, ReportKind};
pub use terrain::TerrainTags;
