//! Application layer - sequences a generation run over the domain ports

pub mod dto;
pub mod errors;
pub mod generate_api;
pub mod traits;

pub use dto::*;
pub use errors::*;
pub use generate_api::*;
pub use traits::*;
