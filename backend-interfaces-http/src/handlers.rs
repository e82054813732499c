pub mod extract_handlers;
pub mod ingest_handlers;
pub mod insight_handlers;
pub mod item_handlers;
pub mod ops_handlers;

pub use extract_handlers::*;
pub use ingest_handlers::*;
pub use insight_handlers::*;
pub use item_handlers::*;
pub use ops_handlers::*;
