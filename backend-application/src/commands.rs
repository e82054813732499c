// Application commands (writes)

pub mod extract_commands;
pub mod ingest_commands;
pub mod item_commands;
