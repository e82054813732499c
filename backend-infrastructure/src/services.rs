pub mod gemini_service;
pub mod receipt_files;

pub use gemini_service::*;
pub use receipt_files::*;
