// Search-radius estimation and map shaping
mod hotspot;
mod map_filter;
mod search_radius;
mod zones;

pub use hotspot::{Hotspot, build_hotspots};
pub use map_filter::{DateWindow, MapFilter};
pub use search_radius::{
    TravelRadii, compute_elapsed_hours, compute_radii, compute_radii_with,
};
pub use zones::{ProbabilityZone, ZoneKind, fixed_tier_zones, travel_zones};
