pub mod item_files;

pub use item_files::*;
