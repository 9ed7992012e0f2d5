//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Reports dropped from the map (no coordinate / no timestamp)
    pub log_dropped_reports: bool,

    /// Per-report radii as they are computed
    pub log_hotspots: bool,

    /// Capability resolution and denials
    pub log_access: bool,

    /// County alert fan-out
    pub log_alerts: bool,

    pub log_store: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_dropped_reports: true,
    log_access: true,

    log_hotspots: false,
    log_alerts: false,
    log_store: false,
    log_performance: false,
};

pub const LOG_PERFORMANCE: bool = DF.log_performance;
