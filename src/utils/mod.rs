mod perf;
mod time_utils;

pub use time_utils::{TimeUtils, format_duration, now_utc, parse_timestamp};
