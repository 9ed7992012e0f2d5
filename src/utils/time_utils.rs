use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// `<input type="date">` value
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    /// `<input type="datetime-local">` values, with and without seconds
    pub const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Best-effort decode of a stored timestamp.
///
/// Accepts RFC 3339 strings, bare dates, `datetime-local` strings (read as UTC),
/// epoch milliseconds, and the two object shapes the hosted backend exports
/// (`{seconds, nanoseconds}` and `{_seconds, _nanoseconds}`).
/// Anything else yields `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp_str(text.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::Object(map) => {
            let secs = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

fn parse_timestamp_str(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in TimeUtils::LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, TimeUtils::DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}d {}h", days, hours % 24);
    }
    let months = days / 30;
    if months < 12 {
        return format!("{}M", months);
    }
    let years = months / 12;
    let rem_months = months % 12;
    format!("{}Y {}M", years, rem_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp(&json!("2024-03-01T10:00:00+03:00")).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_form_values() {
        assert_eq!(
            parse_timestamp(&json!("2024-03-01")),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp(&json!("2024-03-01T18:30")),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_epoch_and_backend_objects() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let secs = expected.timestamp();
        assert_eq!(parse_timestamp(&json!(secs * 1000)), Some(expected));
        assert_eq!(
            parse_timestamp(&json!({ "seconds": secs, "nanoseconds": 0 })),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp(&json!({ "_seconds": secs, "_nanoseconds": 0 })),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(&json!("last tuesday")), None);
        assert_eq!(parse_timestamp(&json!("")), None);
        assert_eq!(parse_timestamp(&Value::Null), None);
        assert_eq!(parse_timestamp(&json!(true)), None);
        assert_eq!(parse_timestamp(&json!({ "nanoseconds": 5 })), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30 * TimeUtils::MS_IN_S), "30s");
        assert_eq!(format_duration(5 * TimeUtils::MS_IN_H), "5h");
        assert_eq!(format_duration(50 * TimeUtils::MS_IN_H), "2d 2h");
    }
}
