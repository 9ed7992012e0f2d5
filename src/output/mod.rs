// Terminal and JSON rendering for the CLI
mod tables;

pub use tables::{HotspotRow, MapRow, ZoneRow, describe_session, render};
