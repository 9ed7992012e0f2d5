mod root;
mod state;

pub use root::{HotspotMap, ZoneLayer};
pub use state::{MapSelection, ZoneDisplayMode};
