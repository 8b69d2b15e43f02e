pub mod entry;
pub mod reader;

pub use entry::RosterEntry;
pub use reader::{read_lines, read_records, resolve_roster_path};
