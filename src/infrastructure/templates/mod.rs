//! Template loading for the index files

pub mod filesystem_loader;
pub mod traits;

pub use filesystem_loader::*;
pub use traits::*;
