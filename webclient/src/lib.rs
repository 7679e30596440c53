// exported modules
pub mod error;
pub mod model;
pub mod stos;

// re-exports
pub use error::*;
pub use model::*;
pub use stos::StosClient;

// internal modules
mod http;
mod util;
