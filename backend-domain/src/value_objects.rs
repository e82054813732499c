// Domain value objects
pub mod category;
pub mod identifiers;
pub mod processing_status;
pub mod sort_key;
pub mod warranty_status;

pub use category::*;
pub use identifiers::*;
pub use processing_status::*;
pub use sort_key::*;
pub use warranty_status::*;
