#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod access;
pub mod analysis;
pub mod app;
pub mod commands;
pub mod config;
pub mod data;
pub mod domain;
pub mod notify;
pub mod output;
pub mod utils;

// Re-export commonly used types outside of crate
pub use access::{AccessContext, Capability};
pub use analysis::{
    Hotspot, ProbabilityZone, TravelRadii, build_hotspots, compute_elapsed_hours, compute_radii,
    fixed_tier_zones,
};
pub use app::{HotspotMap, ZoneDisplayMode};
pub use data::{DocumentStore, ReportRepository, SqliteDocumentStore};
pub use domain::{Coordinate, IncidentReport, ReportKind, TerrainTags};

// CLI argument parsing
use {
    crate::{analysis::DateWindow, config::PERSISTENCE, data::ReportFlag},
    chrono::{DateTime, Utc},
    clap::{Args, Parser, Subcommand},
    std::path::PathBuf,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Document database file
    #[arg(long, global = true, default_value = PERSISTENCE.database.path)]
    pub db: PathBuf,

    /// Evaluate as of this instant (RFC 3339) instead of the system clock
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a JSON export (`{collection: {id: document}}`) into the database
    Import { file: PathBuf },

    /// Search zones for missing-person reports
    Hotspots(HotspotArgs),

    /// Open reports as shown on the community map
    Map(MapArgs),

    /// Capabilities resolved for an email (omit for anonymous)
    Whoami {
        #[arg(long)]
        email: Option<String>,
    },

    /// Submit a new report from a JSON file
    Submit {
        #[arg(long)]
        email: String,
        #[arg(long)]
        kind: ReportKind,
        file: PathBuf,
    },

    /// Set or clear a moderation flag on a report
    Flag(FlagArgs),
}

#[derive(Args, Debug, Clone)]
pub struct HotspotArgs {
    /// Signed-in staff email
    #[arg(long)]
    pub email: String,

    /// Show the zones of this report
    #[arg(long)]
    pub report: Option<String>,

    /// none | fixed | travel
    #[arg(long, default_value = "travel")]
    pub mode: ZoneDisplayMode,

    /// Print JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// missing | danger
    #[arg(long)]
    pub kind: Option<ReportKind>,

    /// 24h | 7d | 30d
    #[arg(long)]
    pub window: Option<DateWindow>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FlagArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub kind: ReportKind,
    #[arg(long)]
    pub id: String,
    /// solved | rejected | verified
    #[arg(long)]
    pub flag: ReportFlag,
    /// Pass `--value false` to clear
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub value: bool,
}
