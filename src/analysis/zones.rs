use {
    crate::{
        analysis::TravelRadii,
        config::{HOTSPOT_TIERS, Meters, ProbabilityTier, TRAVEL_STYLES, ZoneStyle},
    },
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    FixedTier(ProbabilityTier),
    TravelFoot,
    TravelVehicle,
}

/// A circle to draw around the anchor coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityZone {
    pub kind: ZoneKind,
    pub radius_meters: Meters,
    pub label: String,
    pub style: ZoneStyle,
}

/// The three constant bands, innermost first. Independent of any report.
pub fn fixed_tier_zones() -> Vec<ProbabilityZone> {
    HOTSPOT_TIERS
        .iter()
        .map(|tier| ProbabilityZone {
            kind: ZoneKind::FixedTier(tier.tier),
            radius_meters: tier.radius,
            label: tier.label.to_string(),
            style: tier.style,
        })
        .collect()
}

/// Vehicle first so the foot circle is drawn on top.
pub fn travel_zones(radii: &TravelRadii) -> Vec<ProbabilityZone> {
    vec![
        ProbabilityZone {
            kind: ZoneKind::TravelVehicle,
            radius_meters: radii.car_meters,
            label: format!("Vehicle range ({})", radii.car_meters),
            style: TRAVEL_STYLES.vehicle,
        },
        ProbabilityZone {
            kind: ZoneKind::TravelFoot,
            radius_meters: radii.foot_meters,
            label: format!("On-foot range ({})", radii.foot_meters),
            style: TRAVEL_STYLES.foot,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tiers_are_constant() {
        let zones = fixed_tier_zones();
        assert_eq!(zones.len(), 3);
        let radii: Vec<f64> = zones.iter().map(|z| z.radius_meters.value()).collect();
        assert_eq!(radii, vec![5_000.0, 20_000.0, 60_000.0]);
        assert_eq!(zones[0].kind, ZoneKind::FixedTier(ProbabilityTier::High));
        assert_eq!(zones[0].style.hex_color(), "#FF0000");
        assert_eq!(zones[1].style.hex_color(), "#FFA500");
        assert_eq!(zones[2].style.hex_color(), "#00FF00");
        assert!(zones.windows(2).all(|w| w[0].style.weight > w[1].style.weight));
    }

    #[test]
    fn test_travel_zone_order_and_radii() {
        let radii = TravelRadii {
            foot_meters: Meters::new(900.0),
            car_meters: Meters::new(100_000.0),
        };
        let zones = travel_zones(&radii);
        assert_eq!(zones[0].kind, ZoneKind::TravelVehicle);
        assert_eq!(zones[0].radius_meters.value(), 100_000.0);
        assert_eq!(zones[1].kind, ZoneKind::TravelFoot);
        assert_eq!(zones[1].label, "On-foot range (900 m)");
    }
}
