// Domain entities

pub mod extraction;
pub mod item;
pub mod runtime;
pub mod summary;

pub use extraction::*;
pub use item::*;
pub use runtime::*;
pub use summary::*;
