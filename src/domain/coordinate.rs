use {
    regex_lite::Regex,
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::sync::LazyLock,
};

/// Two signed decimals. The separator is either a bare `-` right after the first
/// number, or a run that can't start inside it (no digit, no `.` before a digit),
/// so a decimal is never split in two.
static TWO_NUMBERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+(?:\.\d+)?)(?:-|\.?[^\d.\-][^\d\-]*)(-?\d+(?:\.\d+)?)")
        .expect("static pattern")
});

/// Anchor point of all zones drawn for a report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Rejects non-finite and out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// The shapes a stored position shows up in.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPosition {
    /// `[lat, lon]`, numbers or numeric strings
    Pair(Value, Value),
    /// `{ latitude, longitude }` (also the `_latitude` export form)
    LatLon { latitude: Value, longitude: Value },
    /// Free text such as `"lat: -1.29, lon: 36.82"`
    Text(String),
}

impl RawPosition {
    /// Classifies a document field. `None` for null or unrecognised shapes.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) if items.len() >= 2 => {
                Some(Self::Pair(items[0].clone(), items[1].clone()))
            }
            Value::Object(map) => {
                let latitude = map.get("latitude").or_else(|| map.get("_latitude"))?;
                let longitude = map.get("longitude").or_else(|| map.get("_longitude"))?;
                Some(Self::LatLon {
                    latitude: latitude.clone(),
                    longitude: longitude.clone(),
                })
            }
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }

    pub fn resolve(&self) -> Option<Coordinate> {
        match self {
            Self::Pair(lat, lon) => Coordinate::new(number_of(lat)?, number_of(lon)?),
            Self::LatLon {
                latitude,
                longitude,
            } => Coordinate::new(number_of(latitude)?, number_of(longitude)?),
            Self::Text(text) => {
                let caps = TWO_NUMBERS.captures(text)?;
                let lat = caps.get(1)?.as_str().parse().ok()?;
                let lon = caps.get(2)?.as_str().parse().ok()?;
                Coordinate::new(lat, lon)
            }
        }
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Tries each candidate field in order and returns the first coordinate that resolves.
pub fn parse_position<'a>(candidates: impl IntoIterator<Item = &'a Value>) -> Option<Coordinate> {
    candidates
        .into_iter()
        .filter_map(RawPosition::from_value)
        .find_map(|raw| raw.resolve())
}
