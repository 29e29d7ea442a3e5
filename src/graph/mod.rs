pub mod definition;
pub mod editor;

pub use definition::*;
