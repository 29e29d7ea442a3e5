pub mod data;
pub mod kind;

pub use data::*;
pub use kind::*;
