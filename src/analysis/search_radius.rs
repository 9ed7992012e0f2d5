use {
    crate::{
        config::{ESTIMATOR, EstimatorConfig, Hours, Km, KmPerHour, Meters},
        domain::TerrainTags,
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Travel-based radii for one report. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelRadii {
    pub foot_meters: Meters,
    pub car_meters: Meters,
}

/// Absolute time between two instants, in hours. Order of arguments doesn't matter.
pub fn compute_elapsed_hours(now: DateTime<Utc>, disappeared_at: DateTime<Utc>) -> Hours {
    let ms = (now - disappeared_at).num_milliseconds().unsigned_abs();
    Hours::new(ms as f64 / 1000.0 / Hours::SECS_IN_H)
}

pub fn compute_radii(
    elapsed: Hours,
    terrain: &TerrainTags,
    injured: bool,
    location: Option<&str>,
) -> TravelRadii {
    compute_radii_with(&ESTIMATOR, elapsed, terrain, injured, location)
}

pub fn compute_radii_with(
    cfg: &EstimatorConfig,
    elapsed: Hours,
    terrain: &TerrainTags,
    injured: bool,
    location: Option<&str>,
) -> TravelRadii {
    let foot = foot_radius(cfg, elapsed, terrain, injured).capped(cfg.foot_cap);

    let road_speed = road_speed(cfg, terrain, location);
    let car = (road_speed * elapsed).capped(cfg.vehicle_cap);

    TravelRadii {
        foot_meters: foot.to_meters(),
        car_meters: car.to_meters(),
    }
}

/// Foot distance before the cap is applied.
pub(crate) fn foot_radius(
    cfg: &EstimatorConfig,
    elapsed: Hours,
    terrain: &TerrainTags,
    injured: bool,
) -> Km {
    let speed = if injured {
        cfg.speeds.injured_foot
    } else {
        cfg.speeds.adult_foot
    };
    let raw = speed * elapsed;
    if terrain.mentions_any(cfg.keywords.difficult) {
        raw.scaled(cfg.difficult_terrain_factor)
    } else {
        raw
    }
}

fn road_speed(cfg: &EstimatorConfig, terrain: &TerrainTags, location: Option<&str>) -> KmPerHour {
    let keyword = cfg.keywords.highway;
    let on_highway = terrain.mentions(keyword)
        || location.is_some_and(|l| l.to_lowercase().contains(keyword));
    if on_highway {
        cfg.speeds.highway
    } else {
        cfg.speeds.local_road
    }
}
