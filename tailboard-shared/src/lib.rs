pub mod instant;
pub mod models;

pub use models::*;
