//! Configuration module for the hotspot estimator.

// Can all be private now because we have a public re-export.
mod alerts;
mod debug;
mod estimator;
mod persistence;
mod types;

// Re-export commonly used items
pub use alerts::{ALERTS, danger_message, missing_message};
pub use debug::{DF, LOG_PERFORMANCE};
pub use estimator::{
    ESTIMATOR, EstimatorConfig, HOTSPOT_TIERS, HotspotTier, SearchSpeeds, TRAVEL_STYLES,
    TerrainKeywords, TravelStyles,
};
pub use persistence::{PERSISTENCE, PersistenceConfig};
pub use types::{Hours, Km, KmPerHour, Meters, ProbabilityTier, ZoneStyle};
