// Application queries (reads)

pub mod insight_queries;
pub mod item_queries;
