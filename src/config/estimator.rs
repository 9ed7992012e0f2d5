//! Search-radius estimation configuration

use crate::config::{Km, KmPerHour, Meters, ProbabilityTier, ZoneStyle};

/// Average travel speeds used to turn time-missing into distance.
pub struct SearchSpeeds {
    pub adult_foot: KmPerHour,
    pub injured_foot: KmPerHour,
    pub local_road: KmPerHour,
    pub highway: KmPerHour,
}

/// Keyword matching applied to terrain tags and location text (lowercase, substring match).
pub struct TerrainKeywords {
    /// Any of these slows foot travel by `difficult_terrain_factor`.
    pub difficult: &'static [&'static str],
    /// Switches vehicle travel to highway speed.
    pub highway: &'static str,
    /// Flag value marking the subject as injured.
    pub injured_flag: &'static str,
}

/// The Master Estimator Configuration
pub struct EstimatorConfig {
    pub speeds: SearchSpeeds,
    pub keywords: TerrainKeywords,
    pub difficult_terrain_factor: f64,

    // Travel caps
    pub foot_cap: Km,
    pub vehicle_cap: Km,
}

pub const ESTIMATOR: EstimatorConfig = EstimatorConfig {
    speeds: SearchSpeeds {
        adult_foot: KmPerHour::new(3.0),
        injured_foot: KmPerHour::new(0.75),
        local_road: KmPerHour::new(50.0),
        highway: KmPerHour::new(100.0),
    },
    keywords: TerrainKeywords {
        difficult: &["forest", "river", "mountain/hill"],
        highway: "highway",
        injured_flag: "injured",
    },
    difficult_terrain_factor: 0.6,

    foot_cap: Km::new(50.0),
    vehicle_cap: Km::new(200.0),
};

/// One of the fixed search-management bands.
#[derive(Debug, Clone, Copy)]
pub struct HotspotTier {
    pub tier: ProbabilityTier,
    pub radius: Meters,
    pub label: &'static str,
    pub style: ZoneStyle,
}

pub const HOTSPOT_TIERS: [HotspotTier; 3] = [
    HotspotTier {
        tier: ProbabilityTier::High,
        radius: Meters::new(5_000.0),
        label: "High probability (0-5 km)",
        style: ZoneStyle {
            color_rgb: (255, 0, 0),
            fill_opacity: 0.6,
            weight: 3,
        },
    },
    HotspotTier {
        tier: ProbabilityTier::Medium,
        radius: Meters::new(20_000.0),
        label: "Medium probability (5-20 km)",
        style: ZoneStyle {
            color_rgb: (255, 165, 0),
            fill_opacity: 0.4,
            weight: 2,
        },
    },
    HotspotTier {
        tier: ProbabilityTier::Low,
        radius: Meters::new(60_000.0),
        label: "Low probability (20-60 km)",
        style: ZoneStyle {
            color_rgb: (0, 255, 0),
            fill_opacity: 0.2,
            weight: 1,
        },
    },
];

/// Styles for the travel-based circles. Foot is drawn over vehicle.
pub struct TravelStyles {
    pub foot: ZoneStyle,
    pub vehicle: ZoneStyle,
}

pub const TRAVEL_STYLES: TravelStyles = TravelStyles {
    foot: ZoneStyle {
        color_rgb: (255, 0, 0), // red
        fill_opacity: 0.45,
        weight: 2,
    },
    vehicle: ZoneStyle {
        color_rgb: (255, 165, 0), // orange
        fill_opacity: 0.25,
        weight: 1,
    },
};

