// Pure domain services

pub mod catalog;
pub mod insights;
pub mod warranty;

pub use catalog::*;
pub use insights::*;
pub use warranty::*;
