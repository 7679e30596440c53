pub mod model;
pub mod parse;

pub use model::*;
pub use parse::*;
